//! Route registry and typed destinations.
//!
//! Every screen is named by a [`RoutePath`]. A [`Destination`] pairs a route
//! with its parameters and a canonical path string. The canonical path always
//! parses back into the same destination, so destinations can be persisted,
//! restored, and compared by path.
//!
//! # Path format
//!
//! Route formats are literal segments plus `{name}` path parameters, e.g.
//! `/ar/{model}`. Optional query parameters are appended sorted by name:
//! `/recipes?ingredients=egg,rice`. Parameter values are limited to ASCII
//! alphanumerics and `-_.~,` so no escaping is ever needed.

use std::{collections::BTreeMap, fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::RouteError;

/// Closed set of navigable screens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RoutePath {
    /// Splash shown after onboarding data is submitted.
    SplashAfterOnboarding,
    /// Main dashboard.
    Home,
    /// Sign-in and sign-up.
    Auth,
    /// Profile setup wizard.
    Onboarding,
    /// Augmented-reality exercise viewer for one model.
    ArScene,
    /// Card-swipe exercise browser.
    ExerciseList,
    /// Calorie tracking.
    CalorieViewer,
    /// Recipe suggestions from available ingredients.
    MakeSomethingOutOf,
}

impl RoutePath {
    /// Every route, in registry order.
    pub const ALL: [Self; 8] = [
        Self::SplashAfterOnboarding,
        Self::Home,
        Self::Auth,
        Self::Onboarding,
        Self::ArScene,
        Self::ExerciseList,
        Self::CalorieViewer,
        Self::MakeSomethingOutOf,
    ];

    /// Path format with `{name}` placeholders for path parameters.
    pub const fn format(self) -> &'static str {
        match self {
            Self::SplashAfterOnboarding => "/splash",
            Self::Home => "/home",
            Self::Auth => "/auth",
            Self::Onboarding => "/onboarding",
            Self::ArScene => "/ar/{model}",
            Self::ExerciseList => "/exercises",
            Self::CalorieViewer => "/calories",
            Self::MakeSomethingOutOf => "/recipes",
        }
    }

    /// Optional query parameters the route accepts.
    pub const fn query_params(self) -> &'static [&'static str] {
        match self {
            Self::MakeSomethingOutOf => &["ingredients"],
            Self::SplashAfterOnboarding
            | Self::Home
            | Self::Auth
            | Self::Onboarding
            | Self::ArScene
            | Self::ExerciseList
            | Self::CalorieViewer => &[],
        }
    }

    /// Names of the required path parameters, in path order.
    pub fn path_params(self) -> impl Iterator<Item = &'static str> {
        self.segments().filter_map(param_name)
    }

    /// Start building a destination for this route.
    pub fn directions(self) -> Directions {
        Directions::new(self)
    }

    fn segments(self) -> impl Iterator<Item = &'static str> {
        self.format().split('/').skip(1)
    }

    fn matches(self, segments: &[&str]) -> bool {
        let mut count = 0;
        for (pattern, segment) in self.segments().zip(segments) {
            count += 1;
            let matched = match param_name(pattern) {
                Some(_) => !segment.is_empty(),
                None => pattern == *segment,
            };
            if !matched {
                return false;
            }
        }
        count == segments.len() && self.segments().count() == count
    }
}

impl fmt::Display for RoutePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.format())
    }
}

fn param_name(segment: &str) -> Option<&str> {
    segment.strip_prefix('{').and_then(|s| s.strip_suffix('}'))
}

fn validate_value(name: &str, value: &str) -> Result<(), RouteError> {
    let valid = !value.is_empty()
        && value.bytes().all(|b| b.is_ascii_alphanumeric() || b"-_.~,".contains(&b));
    if valid {
        Ok(())
    } else {
        Err(RouteError::InvalidParameter { name: name.to_owned(), value: value.to_owned() })
    }
}

/// Builder for a [`Destination`].
///
/// Created by [`RoutePath::directions`]. Validation happens in
/// [`Directions::build`], so a builder can be assembled freely.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Directions {
    route: RoutePath,
    path_params: BTreeMap<String, String>,
    query: BTreeMap<String, String>,
}

impl Directions {
    fn new(route: RoutePath) -> Self {
        Self { route, path_params: BTreeMap::new(), query: BTreeMap::new() }
    }

    /// Set a path parameter.
    #[must_use]
    pub fn path_param(mut self, name: &str, value: impl Into<String>) -> Self {
        self.path_params.insert(name.to_owned(), value.into());
        self
    }

    /// Set an optional query parameter.
    #[must_use]
    pub fn query_param(mut self, name: &str, value: impl Into<String>) -> Self {
        self.query.insert(name.to_owned(), value.into());
        self
    }

    /// Validate the parameters and produce the destination.
    pub fn build(mut self) -> Result<Destination, RouteError> {
        let route = self.route;
        let mut path = String::new();
        let mut path_values = BTreeMap::new();

        for segment in route.segments() {
            path.push('/');
            match param_name(segment) {
                Some(name) => {
                    let value = self
                        .path_params
                        .remove(name)
                        .ok_or(RouteError::MissingParameter { route, name })?;
                    validate_value(name, &value)?;
                    path.push_str(&value);
                    path_values.insert(name.to_owned(), value);
                },
                None => path.push_str(segment),
            }
        }

        if let Some(name) = self.path_params.into_keys().next() {
            return Err(RouteError::UnexpectedParameter { route, name });
        }

        for (index, (name, value)) in self.query.iter().enumerate() {
            if !route.query_params().contains(&name.as_str()) {
                return Err(RouteError::UnexpectedParameter { route, name: name.clone() });
            }
            validate_value(name, value)?;
            path.push(if index == 0 { '?' } else { '&' });
            path.push_str(name);
            path.push('=');
            path.push_str(value);
        }

        Ok(Destination { route, path, params: RouteParams { path: path_values, query: self.query } })
    }
}

/// Resolved parameters of a destination.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct RouteParams {
    /// Required path parameters, by name.
    pub path: BTreeMap<String, String>,
    /// Optional query parameters, by name.
    pub query: BTreeMap<String, String>,
}

/// A navigable screen plus the parameters needed to render it.
///
/// Immutable once built. Two destinations are equal iff their canonical
/// paths are equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Destination {
    route: RoutePath,
    path: String,
    params: RouteParams,
}

impl Destination {
    /// Destination for a route without path parameters.
    pub fn of(route: RoutePath) -> Result<Self, RouteError> {
        route.directions().build()
    }

    /// Parse a canonical path back into a destination.
    pub fn parse(url: &str) -> Result<Self, RouteError> {
        let unknown = || RouteError::UnknownRoute { path: url.to_owned() };

        let (path, query) = match url.split_once('?') {
            Some((path, query)) => (path, Some(query)),
            None => (url, None),
        };
        let segments: Vec<&str> = path.strip_prefix('/').ok_or_else(unknown)?.split('/').collect();
        let route =
            RoutePath::ALL.into_iter().find(|route| route.matches(&segments)).ok_or_else(unknown)?;

        let mut directions = route.directions();
        for (pattern, segment) in route.segments().zip(&segments) {
            if let Some(name) = param_name(pattern) {
                directions = directions.path_param(name, *segment);
            }
        }

        if let Some(query) = query {
            for pair in query.split('&') {
                let Some((name, value)) = pair.split_once('=') else {
                    return Err(RouteError::InvalidParameter {
                        name: pair.to_owned(),
                        value: String::new(),
                    });
                };
                if directions.query.contains_key(name) {
                    return Err(RouteError::DuplicateParameter { name: name.to_owned() });
                }
                directions = directions.query_param(name, value);
            }
        }

        directions.build()
    }

    /// Route key.
    pub fn route(&self) -> RoutePath {
        self.route
    }

    /// Canonical path string.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// All parameters.
    pub fn params(&self) -> &RouteParams {
        &self.params
    }

    /// Path parameter by name. `None` if the route declares no such
    /// parameter.
    pub fn path_param(&self, name: &str) -> Option<&str> {
        self.params.path.get(name).map(String::as_str)
    }

    /// Query parameter by name. `None` if not supplied.
    pub fn query_param(&self, name: &str) -> Option<&str> {
        self.params.query.get(name).map(String::as_str)
    }
}

impl fmt::Display for Destination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path)
    }
}

impl FromStr for Destination {
    type Err = RouteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Destination {
    type Error = RouteError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Destination> for String {
    fn from(destination: Destination) -> Self {
        destination.path
    }
}

/// Outcome of resolving an externally supplied path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Path names a registered route.
    Found(Destination),
    /// Fallback for paths no route matches. Rendered as "not found".
    NotFound {
        /// Unresolved path, verbatim.
        path: String,
    },
}

/// Resolve a path such as a deep link, falling back to
/// [`Resolution::NotFound`] instead of failing.
pub fn resolve(url: &str) -> Resolution {
    match Destination::parse(url) {
        Ok(destination) => Resolution::Found(destination),
        Err(err) => {
            tracing::debug!(%err, url, "route resolution fell back to not-found");
            Resolution::NotFound { path: url.to_owned() }
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_route_without_params_builds_its_format() {
        for route in RoutePath::ALL {
            if route.path_params().next().is_none() {
                let destination = Destination::of(route).unwrap();
                assert_eq!(destination.path(), route.format());
                assert_eq!(destination.route(), route);
            }
        }
    }

    #[test]
    fn route_table() {
        let table: Vec<String> = RoutePath::ALL
            .iter()
            .map(|route| {
                let params: Vec<_> = route.path_params().collect();
                format!("{route:?} {} {params:?} {:?}", route.format(), route.query_params())
            })
            .collect();

        insta::assert_snapshot!(table.join("\n"), @r#"
        SplashAfterOnboarding /splash [] []
        Home /home [] []
        Auth /auth [] []
        Onboarding /onboarding [] []
        ArScene /ar/{model} ["model"] []
        ExerciseList /exercises [] []
        CalorieViewer /calories [] []
        MakeSomethingOutOf /recipes [] ["ingredients"]
        "#);
    }

    #[test]
    fn path_params_are_substituted() {
        let destination =
            RoutePath::ArScene.directions().path_param("model", "burpee").build().unwrap();
        assert_eq!(destination.path(), "/ar/burpee");
        assert_eq!(destination.path_param("model"), Some("burpee"));
    }

    #[test]
    fn missing_path_param_is_rejected() {
        assert_eq!(
            Destination::of(RoutePath::ArScene),
            Err(RouteError::MissingParameter { route: RoutePath::ArScene, name: "model" })
        );
    }

    #[test]
    fn query_params_are_sorted_and_validated() {
        let destination = RoutePath::MakeSomethingOutOf
            .directions()
            .query_param("ingredients", "egg,rice")
            .build()
            .unwrap();
        assert_eq!(destination.path(), "/recipes?ingredients=egg,rice");
        assert_eq!(destination.query_param("ingredients"), Some("egg,rice"));

        let err = RoutePath::Home.directions().query_param("tab", "1").build();
        assert!(matches!(err, Err(RouteError::UnexpectedParameter { .. })));

        let err = RoutePath::MakeSomethingOutOf
            .directions()
            .query_param("ingredients", "egg rice")
            .build();
        assert!(matches!(err, Err(RouteError::InvalidParameter { .. })));
    }

    #[test]
    fn parse_round_trips() {
        for url in ["/home", "/ar/squat", "/recipes", "/recipes?ingredients=oats"] {
            let destination = Destination::parse(url).unwrap();
            assert_eq!(destination.path(), url);
            assert_eq!(Destination::parse(destination.path()).unwrap(), destination);
        }
    }

    #[test]
    fn parse_rejects_unknown_paths() {
        for url in ["", "home", "/", "/home/", "/ar", "/ar/", "/ar/a/b", "/missing"] {
            let err = Destination::parse(url).unwrap_err();
            assert!(err.is_unknown_route(), "{url:?} gave {err:?}");
        }
    }

    #[test]
    fn parse_rejects_duplicate_query() {
        assert_eq!(
            Destination::parse("/recipes?ingredients=a&ingredients=b"),
            Err(RouteError::DuplicateParameter { name: "ingredients".into() })
        );
    }

    #[test]
    fn resolve_falls_back_to_not_found() {
        assert_eq!(resolve("/nowhere"), Resolution::NotFound { path: "/nowhere".into() });
        assert!(matches!(resolve("/auth"), Resolution::Found(d) if d.route() == RoutePath::Auth));
    }

    #[test]
    fn destination_serializes_as_path() {
        let destination = Destination::parse("/ar/plank").unwrap();
        let mut bytes = Vec::new();
        ciborium::into_writer(&destination, &mut bytes).unwrap();

        let text: String = ciborium::from_reader(bytes.as_slice()).unwrap();
        assert_eq!(text, "/ar/plank");

        let decoded: Destination = ciborium::from_reader(bytes.as_slice()).unwrap();
        assert_eq!(decoded, destination);
    }
}
