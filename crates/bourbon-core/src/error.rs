//! Error types for the navigation core.
//!
//! Errors never cross a state machine boundary as panics. Route errors are
//! reported by the router as "nothing happened" (or a not-found fallback),
//! and validation errors are stored on the wizard state for the UI to read.

use thiserror::Error;

use crate::{RoutePath, onboarding::Step};

/// Errors produced while building or parsing a [`crate::Destination`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RouteError {
    /// The path matches no registered route.
    #[error("no route matches {path:?}")]
    UnknownRoute {
        /// Path that failed to resolve.
        path: String,
    },

    /// A path parameter declared by the route format was not supplied.
    #[error("route {route} requires parameter {name:?}")]
    MissingParameter {
        /// Route being built.
        route: RoutePath,
        /// Name of the missing parameter.
        name: &'static str,
    },

    /// A parameter value is empty or contains characters outside the
    /// canonical set.
    #[error("invalid value {value:?} for parameter {name:?}")]
    InvalidParameter {
        /// Parameter name.
        name: String,
        /// Rejected value.
        value: String,
    },

    /// A parameter the route does not declare.
    #[error("route {route} does not accept parameter {name:?}")]
    UnexpectedParameter {
        /// Route being built.
        route: RoutePath,
        /// Name of the unexpected parameter.
        name: String,
    },

    /// The same query parameter appeared twice in a parsed path.
    #[error("parameter {name:?} given more than once")]
    DuplicateParameter {
        /// Parameter name.
        name: String,
    },
}

impl RouteError {
    /// Returns true if the error means the path names no screen at all.
    ///
    /// Parameter errors are not "unknown": the route exists, but the caller
    /// built it wrong.
    pub fn is_unknown_route(&self) -> bool {
        matches!(self, Self::UnknownRoute { .. })
    }
}

/// A wizard step whose data does not satisfy its completion rule.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Required field is empty or unselected.
    #[error("{field} is required")]
    Missing {
        /// Step owning the field.
        step: Step,
        /// Human-readable field name.
        field: &'static str,
    },

    /// Numeric field could not be parsed.
    #[error("{field} must be a number, got {value:?}")]
    NotANumber {
        /// Step owning the field.
        step: Step,
        /// Human-readable field name.
        field: &'static str,
        /// Raw text that failed to parse.
        value: String,
    },

    /// Numeric field outside its accepted range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange {
        /// Step owning the field.
        step: Step,
        /// Human-readable field name.
        field: &'static str,
        /// Inclusive lower bound.
        min: u16,
        /// Inclusive upper bound.
        max: u16,
    },
}

impl ValidationError {
    /// Step the failing field belongs to.
    pub fn step(&self) -> Step {
        match self {
            Self::Missing { step, .. }
            | Self::NotANumber { step, .. }
            | Self::OutOfRange { step, .. } => *step,
        }
    }
}

/// Deserialized backstack with no entries.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("backstack must contain at least one destination")]
pub struct EmptyBackstack;

/// Text that names none of the choices of a profile enum.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown {kind} {value:?}")]
pub struct UnknownChoice {
    /// Name of the enum being parsed.
    pub kind: &'static str,
    /// Rejected text.
    pub value: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_unknown_route_is_unknown() {
        assert!(RouteError::UnknownRoute { path: "/nope".into() }.is_unknown_route());
        assert!(
            !RouteError::MissingParameter { route: RoutePath::ArScene, name: "model" }
                .is_unknown_route()
        );
        assert!(!RouteError::DuplicateParameter { name: "ingredients".into() }.is_unknown_route());
    }

    #[test]
    fn validation_error_reports_its_step() {
        let err = ValidationError::OutOfRange { step: Step::Height, field: "height", min: 50, max: 272 };
        assert_eq!(err.step(), Step::Height);
        assert_eq!(err.to_string(), "height must be between 50 and 272");
    }
}
