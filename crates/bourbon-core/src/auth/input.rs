//! Auth form inputs and side-effects.

use super::AuthType;

/// Inputs processed by the [`crate::AuthMachine`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthInput {
    /// Email text edited.
    EmailChanged(String),
    /// Password text edited.
    PasswordChanged(String),
    /// Confirmation text edited.
    ConfirmPasswordChanged(String),
    /// Password visibility toggled.
    PasswordVisibilityChanged,
    /// Switch between login and registration.
    SwitchAuthType(AuthType),
    /// Submit the form.
    ConfirmButton,
    /// Start Google sign-in.
    SignInByGoogle,
    /// The pending sign-in or sign-up succeeded.
    Succeeded,
    /// The pending sign-in or sign-up failed.
    Failed {
        /// Failure description.
        message: String,
    },
}

/// Actions produced by the [`crate::AuthMachine`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthAction {
    /// Form state changed.
    Render,

    /// Sign in with an existing account.
    SignIn {
        /// Account email, trimmed.
        email: String,
        /// Account password.
        password: String,
    },

    /// Create an account.
    SignUp {
        /// Account email, trimmed.
        email: String,
        /// Chosen password.
        password: String,
    },

    /// Sign in through Google.
    SignInWithGoogle,
}
