//! Backstack navigation state machine.
//!
//! The [`Router`] owns the [`Backstack`] and is the only place it changes.
//! It consumes [`RouterInput`] intents and produces [`RouterAction`]s for the
//! runtime: a single [`RouterAction::Render`] per applied mutation, a
//! [`RouterAction::NotFound`] for URLs the registry cannot resolve, and
//! [`RouterAction::DeferBack`] when the platform should handle back itself.
//!
//! Intents that cannot be applied leave the backstack untouched and produce
//! no `Render`.

use crate::{
    BackTo, Backstack, Destination, RouteError, RoutePath,
    route::{self, Resolution},
};

/// Routes where the system back action is left to the platform.
pub const DEFAULT_EXCLUDED: [RoutePath; 2] = [RoutePath::SplashAfterOnboarding, RoutePath::Onboarding];

/// Where a navigation intent points.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    /// Route without path parameters.
    Route(RoutePath),
    /// Fully built destination.
    Destination(Destination),
    /// Raw path, resolved through the route registry.
    Url(String),
}

impl From<RoutePath> for Target {
    fn from(route: RoutePath) -> Self {
        Self::Route(route)
    }
}

impl From<Destination> for Target {
    fn from(destination: Destination) -> Self {
        Self::Destination(destination)
    }
}

impl From<&str> for Target {
    fn from(url: &str) -> Self {
        Self::Url(url.to_owned())
    }
}

impl From<String> for Target {
    fn from(url: String) -> Self {
        Self::Url(url)
    }
}

/// Navigation intents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouterInput {
    /// Push a destination on top of the stack.
    GoToDestination(Target),
    /// Swap the current entry for a destination.
    ReplaceTopDestination(Target),
    /// Unwind the stack.
    GoBack(BackTo),
    /// Platform back gesture or button.
    SystemBack,
    /// Make a route current against the live stack: unwind to it when it is
    /// below the current entry, otherwise replace the top. A no-op when the
    /// route is already current.
    Land(RoutePath),
}

/// Instructions produced by the router.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouterAction {
    /// Backstack changed; re-render the current destination.
    Render,
    /// URL resolved to no route. Backstack unchanged.
    NotFound {
        /// Unresolved path.
        path: String,
    },
    /// System back was not intercepted; the platform default applies.
    DeferBack,
}

/// Navigation state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Router {
    backstack: Backstack,
    excluded: Vec<RoutePath>,
}

impl Router {
    /// Router whose backstack holds only `root`, with the default back
    /// exclusions.
    pub fn new(root: Destination) -> Self {
        Self { backstack: Backstack::new(root), excluded: DEFAULT_EXCLUDED.to_vec() }
    }

    /// Router rooted at a route without path parameters.
    pub fn at(route: RoutePath) -> Result<Self, RouteError> {
        Destination::of(route).map(Self::new)
    }

    /// Resume from a previously saved backstack.
    pub fn restore(backstack: Backstack) -> Self {
        Self { backstack, excluded: DEFAULT_EXCLUDED.to_vec() }
    }

    /// Replace the set of routes where system back is not intercepted.
    #[must_use]
    pub fn with_excluded(mut self, excluded: impl IntoIterator<Item = RoutePath>) -> Self {
        self.excluded = excluded.into_iter().collect();
        self
    }

    /// Current history.
    pub fn backstack(&self) -> &Backstack {
        &self.backstack
    }

    /// Current destination.
    pub fn current(&self) -> &Destination {
        self.backstack.current()
    }

    /// Routes where system back is left to the platform.
    pub fn excluded(&self) -> &[RoutePath] {
        &self.excluded
    }

    /// Returns true if a system back would pop the stack.
    pub fn intercepts_back(&self) -> bool {
        self.backstack.len() > 1 && !self.excluded.contains(&self.current().route())
    }

    /// Process an intent and return actions.
    pub fn handle(&mut self, input: RouterInput) -> Vec<RouterAction> {
        match input {
            RouterInput::GoToDestination(target) => match Self::resolve(target) {
                Ok(destination) => {
                    tracing::debug!(path = destination.path(), depth = self.backstack.len() + 1, "push");
                    self.backstack.push(destination);
                    vec![RouterAction::Render]
                },
                Err(actions) => actions,
            },
            RouterInput::ReplaceTopDestination(target) => match Self::resolve(target) {
                Ok(destination) => {
                    let path = destination.path().to_owned();
                    if self.backstack.replace_top(destination) {
                        tracing::debug!(%path, "replace top");
                        vec![RouterAction::Render]
                    } else {
                        tracing::debug!(%path, "replace refused, destination already adjacent");
                        vec![]
                    }
                },
                Err(actions) => actions,
            },
            RouterInput::GoBack(to) => {
                let popped = self.backstack.pop_to(to);
                if popped == 0 {
                    tracing::debug!(?to, "back ignored at root");
                    vec![]
                } else {
                    tracing::debug!(?to, popped, "back");
                    vec![RouterAction::Render]
                }
            },
            RouterInput::SystemBack => {
                if self.intercepts_back() && self.backstack.pop().is_some() {
                    vec![RouterAction::Render]
                } else {
                    tracing::debug!(route = ?self.current().route(), "system back deferred");
                    vec![RouterAction::DeferBack]
                }
            },
            RouterInput::Land(route) => self.land(route),
        }
    }

    fn land(&mut self, route: RoutePath) -> Vec<RouterAction> {
        if self.current().route() == route {
            tracing::debug!(?route, "land on current route");
            return vec![];
        }
        if self.backstack.contains(route) {
            let popped = self.backstack.pop_to(BackTo::Route(route));
            tracing::debug!(?route, popped, "land by unwinding");
            return vec![RouterAction::Render];
        }
        match Destination::of(route) {
            Ok(destination) if self.backstack.replace_top(destination.clone()) => {
                tracing::debug!(?route, "land by replacing top");
                vec![RouterAction::Render]
            },
            Ok(_) => vec![],
            Err(err) => {
                tracing::debug!(%err, "landing intent dropped");
                vec![]
            },
        }
    }

    fn resolve(target: Target) -> Result<Destination, Vec<RouterAction>> {
        match target {
            Target::Destination(destination) => Ok(destination),
            Target::Route(route) => Destination::of(route).map_err(|err| {
                tracing::debug!(%err, "navigation intent dropped");
                vec![]
            }),
            Target::Url(url) => match route::resolve(&url) {
                Resolution::Found(destination) => Ok(destination),
                Resolution::NotFound { path } => Err(vec![RouterAction::NotFound { path }]),
            },
        }
    }
}
