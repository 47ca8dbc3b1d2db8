//! [`UserRepository`] over a local [`ProfileStore`].
//!
//! Email accounts only. Emails are trimmed and lowercased before every
//! lookup, and the display name of a new account is the email's local part.

use bourbon_app::{RepositoryError, UserRepository};
use bourbon_core::{User, UserData};

use crate::{PasswordDigest, ProfileStore, StoredAccount, new_uid};

/// Local account directory backed by a [`ProfileStore`].
#[derive(Clone)]
pub struct LocalUserRepository<S: ProfileStore> {
    store: S,
}

impl<S: ProfileStore> LocalUserRepository<S> {
    /// Repository over `store`.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    fn signed_in_account(&self) -> Result<Option<StoredAccount>, RepositoryError> {
        let Some(email) = self.store.load_session()? else {
            return Ok(None);
        };
        let account = self.store.load_account(&email)?;
        if account.is_none() {
            tracing::warn!(%email, "session names an unknown account");
        }
        Ok(account)
    }
}

fn normalize(email: &str) -> String {
    email.trim().to_lowercase()
}

fn display_name(email: &str) -> String {
    email.split('@').next().unwrap_or(email).to_owned()
}

fn to_user(account: StoredAccount) -> User {
    User { uid: account.uid, name: account.name, email: account.email, data: None }
}

impl<S: ProfileStore> UserRepository for LocalUserRepository<S> {
    async fn is_logged_in(&self) -> Result<bool, RepositoryError> {
        Ok(self.signed_in_account()?.is_some())
    }

    async fn current_user(&self) -> Result<Option<User>, RepositoryError> {
        Ok(self.signed_in_account()?.map(to_user))
    }

    async fn exists(&self, email: &str) -> Result<bool, RepositoryError> {
        Ok(self.store.load_account(&normalize(email))?.is_some())
    }

    async fn has_data(&self, user: &User) -> Result<bool, RepositoryError> {
        Ok(self.store.load_user_data(&user.uid)?.is_some())
    }

    async fn load_user_data(&self, user: &User) -> Result<Option<UserData>, RepositoryError> {
        Ok(self.store.load_user_data(&user.uid)?)
    }

    async fn load_user_fully(&self) -> Result<Option<User>, RepositoryError> {
        let Some(account) = self.signed_in_account()? else {
            return Ok(None);
        };
        let data = self.store.load_user_data(&account.uid)?;
        Ok(Some(User { data, ..to_user(account) }))
    }

    async fn save_data(&self, user: &User, data: &UserData) -> Result<(), RepositoryError> {
        self.store.store_user_data(&user.uid, data)?;
        tracing::info!(uid = %user.uid, "profile saved");
        Ok(())
    }

    async fn sign_in_with_email(&self, email: &str, password: &str) -> Result<User, RepositoryError> {
        let email = normalize(email);
        let account = self
            .store
            .load_account(&email)?
            .filter(|account| account.password.verify(password))
            .ok_or(RepositoryError::InvalidCredentials)?;

        self.store.store_session(Some(&account.email))?;
        tracing::info!(uid = %account.uid, "signed in");
        Ok(to_user(account))
    }

    async fn sign_up_with_email(&self, email: &str, password: &str) -> Result<User, RepositoryError> {
        let email = normalize(email);
        let account = StoredAccount {
            uid: new_uid(),
            name: display_name(&email),
            password: PasswordDigest::new(password)?,
            email,
        };

        if !self.store.create_account(&account)? {
            return Err(RepositoryError::AccountExists { email: account.email });
        }
        self.store.store_session(Some(&account.email))?;
        tracing::info!(uid = %account.uid, "account created");
        Ok(to_user(account))
    }

    async fn sign_in_with_google(&self) -> Result<User, RepositoryError> {
        Err(RepositoryError::Unsupported("google sign-in"))
    }

    async fn sign_out(&self) -> Result<(), RepositoryError> {
        self.store.store_session(None)?;
        tracing::info!("signed out");
        Ok(())
    }
}
