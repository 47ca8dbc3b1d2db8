//! Runtime layer for Bourbon
//!
//! Runs the pure machines from `bourbon_core` as serialized mailbox actors and
//! executes their actions against collaborators.
//!
//! # Components
//!
//! - [`Machine`]: uniform view of a core state machine
//! - [`mailbox::spawn`]: actor with an unbounded inbox and `watch` snapshots
//! - [`Scope`]: cancellation owner for actor and effect tasks
//! - [`UserRepository`]: account and profile port
//! - [`Runtime`]: router plus screen sessions wired to the repository

mod error;
mod machine;
pub mod mailbox;
mod ports;
mod runtime;
mod scope;

pub use error::RuntimeError;
pub use machine::Machine;
pub use mailbox::{Effects, MachineHandle, Snapshot};
pub use ports::{RepositoryError, UserRepository};
pub use runtime::{
    AuthSession, DEFAULT_SPLASH_DURATION, DEFAULT_STARTUP_DELAY, DeckSession, OnboardingSession,
    Runtime, RuntimeConfig, Session, ShellEvent, probe_session,
};
pub use scope::Scope;
