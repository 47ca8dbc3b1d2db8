//! Operations for model-based testing.
//!
//! Operations are generated by proptest (through `arbitrary`) and applied to
//! both the reference model and the real router.

use arbitrary::Arbitrary;
use bourbon_core::{BackTo, RoutePath, RouterInput, Target};

/// Route picked by index into [`RoutePath::ALL`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Arbitrary)]
pub struct RouteIndex(pub u8);

impl RouteIndex {
    /// Route this index selects.
    pub fn route(self) -> RoutePath {
        RoutePath::ALL[usize::from(self.0) % RoutePath::ALL.len()]
    }
}

/// Short parameter value drawn from a small alphabet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Arbitrary)]
pub struct ParamValue(pub u8);

impl ParamValue {
    /// Rendered value.
    pub fn value(self) -> String {
        format!("m{}", self.0 % 8)
    }
}

/// URL handed to the router as a deep link.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Arbitrary)]
pub enum ModelUrl {
    /// Canonical path of a route, path parameters filled in.
    Screen(RouteIndex, ParamValue),
    /// Recipes with an optional ingredients query.
    Recipes(Option<ParamValue>),
    /// Path no route matches.
    Unknown(u8),
}

impl ModelUrl {
    /// Rendered URL.
    pub fn url(self) -> String {
        match self {
            Self::Screen(route, value) => route.route().format().replace("{model}", &value.value()),
            Self::Recipes(Some(value)) => format!("/recipes?ingredients={}", value.value()),
            Self::Recipes(None) => "/recipes".to_owned(),
            Self::Unknown(n) => format!("/nowhere/{n}"),
        }
    }

    /// Route the URL resolves to. `None` for unknown paths.
    pub fn route(self) -> Option<RoutePath> {
        match self {
            Self::Screen(route, _) => Some(route.route()),
            Self::Recipes(_) => Some(RoutePath::MakeSomethingOutOf),
            Self::Unknown(_) => None,
        }
    }
}

/// Navigation intents that can be applied to the system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Arbitrary)]
pub enum Operation {
    /// Push a route by key. Dropped if the route needs path parameters.
    Go(RouteIndex),
    /// Push a deep link.
    GoUrl(ModelUrl),
    /// Replace the current entry with a route by key.
    Replace(RouteIndex),
    /// Pop one entry.
    BackPrevious,
    /// Pop up to `n` entries.
    BackSteps(u8),
    /// Pop until the route is current.
    BackToRoute(RouteIndex),
    /// Platform back.
    SystemBack,
    /// Make a route current, unwinding to it if it is already on the stack.
    Land(RouteIndex),
}

impl Operation {
    /// Router input for this operation.
    pub fn to_input(self) -> RouterInput {
        match self {
            Self::Go(route) => RouterInput::GoToDestination(Target::Route(route.route())),
            Self::GoUrl(url) => RouterInput::GoToDestination(Target::Url(url.url())),
            Self::Replace(route) => RouterInput::ReplaceTopDestination(Target::Route(route.route())),
            Self::BackPrevious => RouterInput::GoBack(BackTo::Previous),
            Self::BackSteps(n) => RouterInput::GoBack(BackTo::Steps(usize::from(n % 6))),
            Self::BackToRoute(route) => RouterInput::GoBack(BackTo::Route(route.route())),
            Self::SystemBack => RouterInput::SystemBack,
            Self::Land(route) => RouterInput::Land(route.route()),
        }
    }
}
