//! In-memory profile store.

#![allow(clippy::disallowed_types, reason = "Synchronous in-memory operations only")]

use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};

use bourbon_core::{Backstack, UserData};

use crate::{ProfileStore, StoreError, StoredAccount, user_data_key};

/// In-memory store for tests and throwaway sessions.
///
/// Clones share state. Uses `lock().expect()`, which panics if the mutex is
/// poisoned.
#[derive(Clone, Default)]
pub struct MemoryStore {
    inner: Arc<Mutex<MemoryStoreInner>>,
}

#[derive(Default)]
struct MemoryStoreInner {
    /// Accounts by normalized email
    accounts: HashMap<String, StoredAccount>,
    /// Profiles by `userdata/{uid}` key
    user_data: HashMap<String, UserData>,
    /// Signed-in email
    session: Option<String>,
    backstack: Option<Backstack>,
}

impl MemoryStore {
    /// Empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of accounts.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    #[allow(clippy::expect_used)]
    pub fn account_count(&self) -> usize {
        self.inner.lock().expect("Mutex poisoned").accounts.len()
    }
}

impl ProfileStore for MemoryStore {
    #[allow(clippy::expect_used)]
    fn create_account(&self, account: &StoredAccount) -> Result<bool, StoreError> {
        let mut inner = self.inner.lock().expect("Mutex poisoned");
        if inner.accounts.contains_key(&account.email) {
            return Ok(false);
        }
        inner.accounts.insert(account.email.clone(), account.clone());
        Ok(true)
    }

    #[allow(clippy::expect_used)]
    fn load_account(&self, email: &str) -> Result<Option<StoredAccount>, StoreError> {
        Ok(self.inner.lock().expect("Mutex poisoned").accounts.get(email).cloned())
    }

    #[allow(clippy::expect_used)]
    fn store_user_data(&self, uid: &str, data: &UserData) -> Result<(), StoreError> {
        self.inner.lock().expect("Mutex poisoned").user_data.insert(user_data_key(uid), data.clone());
        Ok(())
    }

    #[allow(clippy::expect_used)]
    fn load_user_data(&self, uid: &str) -> Result<Option<UserData>, StoreError> {
        Ok(self.inner.lock().expect("Mutex poisoned").user_data.get(&user_data_key(uid)).cloned())
    }

    #[allow(clippy::expect_used)]
    fn store_session(&self, email: Option<&str>) -> Result<(), StoreError> {
        self.inner.lock().expect("Mutex poisoned").session = email.map(str::to_owned);
        Ok(())
    }

    #[allow(clippy::expect_used)]
    fn load_session(&self) -> Result<Option<String>, StoreError> {
        Ok(self.inner.lock().expect("Mutex poisoned").session.clone())
    }

    #[allow(clippy::expect_used)]
    fn store_backstack(&self, backstack: &Backstack) -> Result<(), StoreError> {
        self.inner.lock().expect("Mutex poisoned").backstack = Some(backstack.clone());
        Ok(())
    }

    #[allow(clippy::expect_used)]
    fn load_backstack(&self) -> Result<Option<Backstack>, StoreError> {
        Ok(self.inner.lock().expect("Mutex poisoned").backstack.clone())
    }
}
