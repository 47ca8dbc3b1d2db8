//! Sign-in and sign-up form.
//!
//! The [`AuthMachine`] validates input locally and emits a credential action
//! for the runtime. While a request is in flight the form is locked; the
//! runtime reports the outcome with [`AuthInput::Succeeded`] or
//! [`AuthInput::Failed`].

mod input;

pub use input::{AuthAction, AuthInput};
use thiserror::Error;

/// Shortest accepted password.
pub const MIN_PASSWORD_LEN: usize = 6;

/// Which form is shown.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum AuthType {
    /// Existing account.
    #[default]
    Login,
    /// New account.
    Register,
}

impl AuthType {
    /// The other form.
    pub fn inverse(self) -> Self {
        match self {
            Self::Login => Self::Register,
            Self::Register => Self::Login,
        }
    }
}

/// Password problem shown under the password fields.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PasswordError {
    /// Nothing entered.
    #[error("Password is required")]
    Empty,
    /// Fewer than [`MIN_PASSWORD_LEN`] characters.
    #[error("Use at least 6 characters")]
    TooShort,
    /// Confirmation differs.
    #[error("Passwords do not match")]
    NotMatch,
}

/// Auth form state machine.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthMachine {
    auth_type: AuthType,
    email: String,
    password: String,
    confirm_password: String,
    password_visible: bool,
    wrong_email: bool,
    password_error: Option<PasswordError>,
    loading: bool,
    failure: Option<String>,
}

impl AuthMachine {
    /// Empty login form.
    pub fn new() -> Self {
        Self::default()
    }

    /// Form shown.
    pub fn auth_type(&self) -> AuthType {
        self.auth_type
    }

    /// Email text.
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Password text.
    pub fn password(&self) -> &str {
        &self.password
    }

    /// Confirmation text. Only used when registering.
    pub fn confirm_password(&self) -> &str {
        &self.confirm_password
    }

    /// Whether the password is shown in clear.
    pub fn password_visible(&self) -> bool {
        self.password_visible
    }

    /// Whether the last submit found the email malformed.
    pub fn wrong_email(&self) -> bool {
        self.wrong_email
    }

    /// Password problem found by the last submit.
    pub fn password_error(&self) -> Option<PasswordError> {
        self.password_error
    }

    /// A request is in flight.
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Failure reported for the last request.
    pub fn failure(&self) -> Option<&str> {
        self.failure.as_deref()
    }

    /// Process an input and return actions.
    pub fn handle(&mut self, input: AuthInput) -> Vec<AuthAction> {
        if self.loading && !matches!(input, AuthInput::Succeeded | AuthInput::Failed { .. }) {
            tracing::debug!(?input, "auth input ignored while loading");
            return vec![];
        }

        match input {
            AuthInput::EmailChanged(email) => {
                self.email = email;
                self.wrong_email = false;
                self.failure = None;
                vec![AuthAction::Render]
            },
            AuthInput::PasswordChanged(password) => {
                self.password = password;
                self.password_error = None;
                self.failure = None;
                vec![AuthAction::Render]
            },
            AuthInput::ConfirmPasswordChanged(confirm) => {
                self.confirm_password = confirm;
                if self.password_error == Some(PasswordError::NotMatch) {
                    self.password_error = None;
                }
                vec![AuthAction::Render]
            },
            AuthInput::PasswordVisibilityChanged => {
                self.password_visible = !self.password_visible;
                vec![AuthAction::Render]
            },
            AuthInput::SwitchAuthType(auth_type) => {
                if auth_type == self.auth_type {
                    return vec![];
                }
                self.auth_type = auth_type;
                self.confirm_password.clear();
                self.password_error = None;
                self.failure = None;
                vec![AuthAction::Render]
            },
            AuthInput::ConfirmButton => self.confirm(),
            AuthInput::SignInByGoogle => {
                self.loading = true;
                self.failure = None;
                vec![AuthAction::Render, AuthAction::SignInWithGoogle]
            },
            AuthInput::Succeeded => {
                if !self.loading {
                    return vec![];
                }
                self.loading = false;
                vec![AuthAction::Render]
            },
            AuthInput::Failed { message } => {
                if !self.loading {
                    return vec![];
                }
                tracing::debug!(%message, "auth request failed");
                self.loading = false;
                self.failure = Some(message);
                vec![AuthAction::Render]
            },
        }
    }

    fn confirm(&mut self) -> Vec<AuthAction> {
        let email = self.email.trim().to_owned();
        self.wrong_email = !is_valid_email(&email);
        self.password_error = self.check_password();
        if self.wrong_email || self.password_error.is_some() {
            tracing::debug!(wrong_email = self.wrong_email, password = ?self.password_error, "auth form rejected");
            return vec![AuthAction::Render];
        }

        self.loading = true;
        self.failure = None;
        let password = self.password.clone();
        let request = match self.auth_type {
            AuthType::Login => AuthAction::SignIn { email, password },
            AuthType::Register => AuthAction::SignUp { email, password },
        };
        vec![AuthAction::Render, request]
    }

    fn check_password(&self) -> Option<PasswordError> {
        if self.password.is_empty() {
            Some(PasswordError::Empty)
        } else if self.password.chars().count() < MIN_PASSWORD_LEN {
            Some(PasswordError::TooShort)
        } else if self.auth_type == AuthType::Register && self.password != self.confirm_password {
            Some(PasswordError::NotMatch)
        } else {
            None
        }
    }
}

/// Minimal shape check: one `@`, non-empty local part, dotted domain, no
/// whitespace.
pub fn is_valid_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.contains('@')
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
        && !email.chars().any(char::is_whitespace)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled(auth_type: AuthType) -> AuthMachine {
        let mut auth = AuthMachine::new();
        auth.handle(AuthInput::SwitchAuthType(auth_type));
        auth.handle(AuthInput::EmailChanged(" ana@example.com ".into()));
        auth.handle(AuthInput::PasswordChanged("secret1".into()));
        auth
    }

    #[test]
    fn email_shapes() {
        assert!(is_valid_email("a@b.co"));
        for bad in ["", "a", "@b.co", "a@b", "a@.co", "a@b.", "a@@b.co", "a b@c.de"] {
            assert!(!is_valid_email(bad), "{bad:?}");
        }
    }

    #[test]
    fn login_emits_sign_in_and_locks() {
        let mut auth = filled(AuthType::Login);
        let actions = auth.handle(AuthInput::ConfirmButton);
        assert_eq!(
            actions,
            vec![
                AuthAction::Render,
                AuthAction::SignIn { email: "ana@example.com".into(), password: "secret1".into() }
            ]
        );
        assert!(auth.is_loading());
        assert!(auth.handle(AuthInput::ConfirmButton).is_empty());
        assert!(auth.handle(AuthInput::EmailChanged("x".into())).is_empty());
    }

    #[test]
    fn register_requires_matching_confirmation() {
        let mut auth = filled(AuthType::Register);
        auth.handle(AuthInput::ConfirmPasswordChanged("secret2".into()));
        assert_eq!(auth.handle(AuthInput::ConfirmButton), vec![AuthAction::Render]);
        assert_eq!(auth.password_error(), Some(PasswordError::NotMatch));

        auth.handle(AuthInput::ConfirmPasswordChanged("secret1".into()));
        assert_eq!(auth.password_error(), None);
        let actions = auth.handle(AuthInput::ConfirmButton);
        assert!(matches!(actions.as_slice(), [AuthAction::Render, AuthAction::SignUp { .. }]));
    }

    #[test]
    fn short_password_and_bad_email_are_flagged() {
        let mut auth = AuthMachine::new();
        auth.handle(AuthInput::EmailChanged("nope".into()));
        auth.handle(AuthInput::PasswordChanged("abc".into()));
        assert_eq!(auth.handle(AuthInput::ConfirmButton), vec![AuthAction::Render]);
        assert!(auth.wrong_email());
        assert_eq!(auth.password_error(), Some(PasswordError::TooShort));
        assert!(!auth.is_loading());
        assert_eq!(PasswordError::TooShort.to_string(), "Use at least 6 characters");
    }

    #[test]
    fn failure_unlocks_and_is_shown() {
        let mut auth = filled(AuthType::Login);
        auth.handle(AuthInput::ConfirmButton);
        auth.handle(AuthInput::Failed { message: "invalid credentials".into() });
        assert!(!auth.is_loading());
        assert_eq!(auth.failure(), Some("invalid credentials"));

        auth.handle(AuthInput::PasswordChanged("secret2".into()));
        assert_eq!(auth.failure(), None);
    }

    #[test]
    fn switching_type_clears_confirmation() {
        let mut auth = filled(AuthType::Register);
        auth.handle(AuthInput::ConfirmPasswordChanged("secret1".into()));
        auth.handle(AuthInput::SwitchAuthType(auth.auth_type().inverse()));
        assert_eq!(auth.auth_type(), AuthType::Login);
        assert_eq!(auth.confirm_password(), "");
        assert!(auth.handle(AuthInput::SwitchAuthType(AuthType::Login)).is_empty());
    }

    #[test]
    fn google_sign_in_locks_form() {
        let mut auth = AuthMachine::new();
        assert_eq!(
            auth.handle(AuthInput::SignInByGoogle),
            vec![AuthAction::Render, AuthAction::SignInWithGoogle]
        );
        assert!(auth.is_loading());
        auth.handle(AuthInput::Succeeded);
        assert!(!auth.is_loading());
    }
}
