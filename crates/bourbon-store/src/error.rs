//! Store errors.

use bourbon_app::RepositoryError;
use thiserror::Error;

/// Errors from a [`crate::ProfileStore`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// Database could not be opened, read, or written.
    #[error("storage I/O: {0}")]
    Io(String),

    /// Stored bytes could not be encoded or decoded.
    #[error("serialization: {0}")]
    Serialization(String),

    /// System randomness unavailable.
    #[error("randomness unavailable: {0}")]
    Random(String),
}

impl From<StoreError> for RepositoryError {
    fn from(err: StoreError) -> Self {
        RepositoryError::Storage(err.to_string())
    }
}
