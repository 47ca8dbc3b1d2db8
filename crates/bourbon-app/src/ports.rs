//! Collaborator ports.
//!
//! The runtime reaches accounts and stored profiles only through
//! [`UserRepository`]. Production wires a concrete backend; tests use a
//! scripted fake.

use std::future::Future;

use bourbon_core::{User, UserData};
use thiserror::Error;

/// Failures reported by a [`UserRepository`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    /// Backend could not be reached.
    #[error("repository unavailable: {0}")]
    Unavailable(String),

    /// Email and password do not match an account.
    #[error("invalid email or password")]
    InvalidCredentials,

    /// Sign-up for an email that already has an account.
    #[error("an account already exists for {email}")]
    AccountExists {
        /// Email that is taken.
        email: String,
    },

    /// Operation requires a signed-in user.
    #[error("no user is signed in")]
    NotSignedIn,

    /// Stored data could not be read or written.
    #[error("storage error: {0}")]
    Storage(String),

    /// Backend does not offer this operation.
    #[error("{0} is not supported by this repository")]
    Unsupported(&'static str),
}

/// Accounts, sessions and stored profiles.
///
/// Implementations are cheap to clone and shared between effect tasks.
pub trait UserRepository: Clone + Send + Sync + 'static {
    /// Returns true if a user is signed in.
    fn is_logged_in(&self) -> impl Future<Output = Result<bool, RepositoryError>> + Send;

    /// Signed-in user without profile data. `None` when signed out.
    fn current_user(&self) -> impl Future<Output = Result<Option<User>, RepositoryError>> + Send;

    /// Returns true if an account exists for `email`.
    fn exists(&self, email: &str) -> impl Future<Output = Result<bool, RepositoryError>> + Send;

    /// Returns true if `user` has a stored profile.
    fn has_data(&self, user: &User) -> impl Future<Output = Result<bool, RepositoryError>> + Send;

    /// Stored profile of `user`, if any.
    fn load_user_data(
        &self,
        user: &User,
    ) -> impl Future<Output = Result<Option<UserData>, RepositoryError>> + Send;

    /// Signed-in user with profile data attached.
    fn load_user_fully(&self) -> impl Future<Output = Result<Option<User>, RepositoryError>> + Send;

    /// Store `data` as the profile of `user`.
    fn save_data(
        &self,
        user: &User,
        data: &UserData,
    ) -> impl Future<Output = Result<(), RepositoryError>> + Send;

    /// Sign in with email and password.
    fn sign_in_with_email(
        &self,
        email: &str,
        password: &str,
    ) -> impl Future<Output = Result<User, RepositoryError>> + Send;

    /// Create an account and sign in.
    fn sign_up_with_email(
        &self,
        email: &str,
        password: &str,
    ) -> impl Future<Output = Result<User, RepositoryError>> + Send;

    /// Sign in through Google.
    fn sign_in_with_google(&self) -> impl Future<Output = Result<User, RepositoryError>> + Send;

    /// End the current session.
    fn sign_out(&self) -> impl Future<Output = Result<(), RepositoryError>> + Send;
}
