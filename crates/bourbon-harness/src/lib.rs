//! Deterministic test harness for Bourbon navigation.
//!
//! # Model-Based Testing
//!
//! The `model` module provides a reference backstack. Operations are applied
//! to both the model and the real router, and their observable states are
//! compared.
//!
//! # Invariant Testing
//!
//! The `invariants` module checks properties that must hold in every
//! reachable state. Use [`InvariantRegistry::standard()`] for the router and
//! wizard invariants.
//!
//! # Scripted Collaborators
//!
//! [`SimUserRepository`] implements the runtime's repository port in memory
//! with failure injection and a call log, for driving runtime flows under a
//! paused tokio clock.

#![forbid(unsafe_code)]

pub mod invariants;
pub mod model;
pub mod sim_repository;

pub use invariants::{
    BackstackNonEmpty, Invariant, InvariantRegistry, InvariantResult, PageMatchesStep,
    RouterSnapshot, StepTransitions, SubmissionAtTerminal, SystemSnapshot, Violation,
    VisibilityFollowsOrder, WizardSnapshot,
};
pub use model::{ModelBackstack, ModelEntry, ModelUrl, Operation, Outcome, ParamValue, RouteIndex, outcome_of};
pub use sim_repository::{RepoCall, SimUserRepository};
