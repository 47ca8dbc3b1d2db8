//! Scripted [`UserRepository`] for runtime tests.
//!
//! Accounts, profiles and the session live in shared memory. Individual
//! operations can be made to fail, and every call is logged so tests can
//! assert on the sequence of collaborator calls.

#![allow(clippy::disallowed_types, reason = "Synchronous locking operations only")]

use std::{
    collections::{HashMap, HashSet},
    sync::{Arc, Mutex, MutexGuard},
};

use bourbon_app::{RepositoryError, UserRepository};
use bourbon_core::{User, UserData};

/// Repository operations, for failure injection and the call log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RepoCall {
    /// `is_logged_in`
    IsLoggedIn,
    /// `current_user`
    CurrentUser,
    /// `exists`
    Exists,
    /// `has_data`
    HasData,
    /// `load_user_data`
    LoadUserData,
    /// `load_user_fully`
    LoadUserFully,
    /// `save_data`
    SaveData,
    /// `sign_in_with_email`
    SignIn,
    /// `sign_up_with_email`
    SignUp,
    /// `sign_in_with_google`
    SignInWithGoogle,
    /// `sign_out`
    SignOut,
}

#[derive(Default)]
struct SimState {
    /// Users and passwords by email
    accounts: HashMap<String, (User, String)>,
    /// Profiles by uid
    profiles: HashMap<String, UserData>,
    signed_in: Option<String>,
    google: Option<String>,
    failing: HashSet<RepoCall>,
    calls: Vec<RepoCall>,
}

/// In-memory repository with failure injection.
///
/// Clones share state.
#[derive(Clone, Default)]
pub struct SimUserRepository {
    state: Arc<Mutex<SimState>>,
}

impl SimUserRepository {
    /// Repository with no accounts.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an account.
    #[must_use]
    pub fn with_account(self, email: &str, password: &str) -> Self {
        self.lock().accounts.insert(email.to_owned(), (sim_user(email), password.to_owned()));
        self
    }

    /// Store a profile for an existing account.
    #[must_use]
    pub fn with_profile(self, email: &str, data: UserData) -> Self {
        {
            let mut state = self.lock();
            if let Some((user, _)) = state.accounts.get(email) {
                let uid = user.uid.clone();
                state.profiles.insert(uid, data);
            }
        }
        self
    }

    /// Start signed in as `email`.
    #[must_use]
    pub fn signed_in_as(self, email: &str) -> Self {
        self.lock().signed_in = Some(email.to_owned());
        self
    }

    /// Account that Google sign-in resolves to. Without one, Google
    /// sign-in is unsupported.
    #[must_use]
    pub fn with_google_account(self, email: &str) -> Self {
        self.lock().google = Some(email.to_owned());
        self
    }

    /// Make `call` fail with [`RepositoryError::Unavailable`] until healed.
    pub fn fail(&self, call: RepoCall) {
        tracing::debug!(?call, "failure injected");
        self.lock().failing.insert(call);
    }

    /// Stop failing `call`.
    pub fn heal(&self, call: RepoCall) {
        tracing::debug!(?call, "failure healed");
        self.lock().failing.remove(&call);
    }

    /// Every call so far, in order.
    pub fn calls(&self) -> Vec<RepoCall> {
        self.lock().calls.clone()
    }

    /// Stored profile of the account with `email`.
    pub fn profile_of(&self, email: &str) -> Option<UserData> {
        let state = self.lock();
        let (user, _) = state.accounts.get(email)?;
        state.profiles.get(&user.uid).cloned()
    }

    /// Email of the signed-in account.
    pub fn signed_in(&self) -> Option<String> {
        self.lock().signed_in.clone()
    }

    #[allow(clippy::expect_used)]
    fn lock(&self) -> MutexGuard<'_, SimState> {
        self.state.lock().expect("Mutex poisoned")
    }

    /// Log `call` and fail it if scripted to.
    fn enter(&self, call: RepoCall) -> Result<MutexGuard<'_, SimState>, RepositoryError> {
        let mut state = self.lock();
        state.calls.push(call);
        if state.failing.contains(&call) {
            tracing::debug!(?call, "scripted failure");
            return Err(RepositoryError::Unavailable(format!("{call:?} scripted to fail")));
        }
        Ok(state)
    }
}

fn sim_user(email: &str) -> User {
    User {
        uid: format!("uid-{email}"),
        name: email.split('@').next().unwrap_or(email).to_owned(),
        email: email.to_owned(),
        data: None,
    }
}

impl SimState {
    fn current(&self) -> Option<User> {
        let email = self.signed_in.as_ref()?;
        self.accounts.get(email).map(|(user, _)| user.clone())
    }
}

impl UserRepository for SimUserRepository {
    async fn is_logged_in(&self) -> Result<bool, RepositoryError> {
        Ok(self.enter(RepoCall::IsLoggedIn)?.current().is_some())
    }

    async fn current_user(&self) -> Result<Option<User>, RepositoryError> {
        Ok(self.enter(RepoCall::CurrentUser)?.current())
    }

    async fn exists(&self, email: &str) -> Result<bool, RepositoryError> {
        Ok(self.enter(RepoCall::Exists)?.accounts.contains_key(email))
    }

    async fn has_data(&self, user: &User) -> Result<bool, RepositoryError> {
        Ok(self.enter(RepoCall::HasData)?.profiles.contains_key(&user.uid))
    }

    async fn load_user_data(&self, user: &User) -> Result<Option<UserData>, RepositoryError> {
        Ok(self.enter(RepoCall::LoadUserData)?.profiles.get(&user.uid).cloned())
    }

    async fn load_user_fully(&self) -> Result<Option<User>, RepositoryError> {
        let state = self.enter(RepoCall::LoadUserFully)?;
        Ok(state.current().map(|user| User { data: state.profiles.get(&user.uid).cloned(), ..user }))
    }

    async fn save_data(&self, user: &User, data: &UserData) -> Result<(), RepositoryError> {
        self.enter(RepoCall::SaveData)?.profiles.insert(user.uid.clone(), data.clone());
        Ok(())
    }

    async fn sign_in_with_email(&self, email: &str, password: &str) -> Result<User, RepositoryError> {
        let mut state = self.enter(RepoCall::SignIn)?;
        let user = match state.accounts.get(email) {
            Some((user, stored)) if stored == password => user.clone(),
            _ => return Err(RepositoryError::InvalidCredentials),
        };
        state.signed_in = Some(email.to_owned());
        Ok(user)
    }

    async fn sign_up_with_email(&self, email: &str, password: &str) -> Result<User, RepositoryError> {
        let mut state = self.enter(RepoCall::SignUp)?;
        if state.accounts.contains_key(email) {
            return Err(RepositoryError::AccountExists { email: email.to_owned() });
        }
        let user = sim_user(email);
        state.accounts.insert(email.to_owned(), (user.clone(), password.to_owned()));
        state.signed_in = Some(email.to_owned());
        Ok(user)
    }

    async fn sign_in_with_google(&self) -> Result<User, RepositoryError> {
        let mut state = self.enter(RepoCall::SignInWithGoogle)?;
        let email = state.google.clone().ok_or(RepositoryError::Unsupported("google sign-in"))?;
        let user = state
            .accounts
            .entry(email.clone())
            .or_insert_with(|| (sim_user(&email), String::new()))
            .0
            .clone();
        state.signed_in = Some(email);
        Ok(user)
    }

    async fn sign_out(&self) -> Result<(), RepositoryError> {
        self.enter(RepoCall::SignOut)?.signed_in = None;
        Ok(())
    }
}
