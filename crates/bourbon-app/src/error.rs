//! Runtime errors.

use bourbon_core::RouteError;
use thiserror::Error;

use crate::RepositoryError;

/// Errors surfaced by the [`crate::Runtime`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RuntimeError {
    /// Configured destination could not be built.
    #[error(transparent)]
    Route(#[from] RouteError),

    /// Collaborator call failed.
    #[error(transparent)]
    Repository(#[from] RepositoryError),

    /// Machine task has stopped.
    #[error("{machine} machine is closed")]
    Closed {
        /// Machine name.
        machine: &'static str,
    },
}
