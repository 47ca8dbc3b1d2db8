//! Reference model for model-based router testing.
//!
//! Operations are applied to both [`ModelBackstack`] and a real
//! [`bourbon_core::Router`]; the resulting paths and outcomes must match.

mod backstack;
mod operation;

pub use backstack::{ModelBackstack, ModelEntry, Outcome};
pub use operation::{ModelUrl, Operation, ParamValue, RouteIndex};

use bourbon_core::RouterAction;

/// Translate router actions into the model's outcome vocabulary.
///
/// Returns `None` for action lists the router should never produce.
pub fn outcome_of(actions: &[RouterAction]) -> Option<Outcome> {
    match actions {
        [] => Some(Outcome::Unchanged),
        [RouterAction::Render] => Some(Outcome::Changed),
        [RouterAction::NotFound { path }] => Some(Outcome::NotFound(path.clone())),
        [RouterAction::DeferBack] => Some(Outcome::Deferred),
        _ => None,
    }
}
