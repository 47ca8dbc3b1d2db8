//! Command-line shell for Bourbon
//!
//! Drives the navigation runtime from typed commands, one per line, and
//! prints the settled backstack and screen after each one. Accounts and the
//! last backstack live in a local store.
//!
//! # Components
//!
//! - [`command::parse`]: line to [`Command`]
//! - [`Shell`]: opens the session for the current route and waits for
//!   effects before printing
//! - [`render`]: text views of machine state

pub mod catalogue;
pub mod command;
mod error;
pub mod render;
mod shell;

pub use command::Command;
pub use error::CliError;
pub use shell::{Flow, Shell};
