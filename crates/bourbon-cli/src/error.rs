//! Shell errors.

use std::io;

use bourbon_app::RuntimeError;
use bourbon_store::StoreError;
use thiserror::Error;

/// Errors that end a shell run.
#[derive(Error, Debug)]
pub enum CliError {
    /// Reading commands or writing output failed.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Local store could not be opened or written.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Runtime refused to start or a machine stopped.
    #[error(transparent)]
    Runtime(#[from] RuntimeError),

    /// Waiting for a command's effects took too long.
    #[error("timed out waiting for {what}")]
    Timeout {
        /// What the shell was waiting for.
        what: &'static str,
    },
}
