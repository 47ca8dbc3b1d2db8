//! Persistence for Bourbon
//!
//! A [`ProfileStore`] keeps local accounts, stored profiles, the signed-in
//! session, and the last backstack. [`LocalUserRepository`] builds the
//! runtime's `UserRepository` port on top of any store.
//!
//! The trait is synchronous: every implementation is local and fast, and the
//! repository calls it from inside its async methods.

mod error;
mod memory;
mod password;
mod redb;
mod repository;

use bourbon_core::{Backstack, UserData};
pub use error::StoreError;
pub use memory::MemoryStore;
pub use password::{PasswordDigest, new_uid};
pub use repository::LocalUserRepository;
use serde::{Deserialize, Serialize, de::DeserializeOwned};

pub use self::redb::RedbStore;

/// Key under which a user's profile is stored.
pub fn user_data_key(uid: &str) -> String {
    format!("userdata/{uid}")
}

/// Account record keyed by normalized email.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredAccount {
    /// Stable account identifier.
    pub uid: String,
    /// Normalized email.
    pub email: String,
    /// Display name.
    pub name: String,
    /// Salted password digest.
    pub password: PasswordDigest,
}

/// Durable state behind the local user repository.
///
/// Must be Clone (shared by the repository and the shell), Send + Sync, and
/// synchronous. Clones access the same underlying storage.
///
/// # Panics
///
/// In-memory implementations may panic if an internal mutex is poisoned.
pub trait ProfileStore: Clone + Send + Sync + 'static {
    /// Insert an account.
    ///
    /// Returns `false` without writing if an account with the same email
    /// exists.
    fn create_account(&self, account: &StoredAccount) -> Result<bool, StoreError>;

    /// Account for a normalized email. `None` if unknown.
    fn load_account(&self, email: &str) -> Result<Option<StoredAccount>, StoreError>;

    /// Store or overwrite the profile of `uid`.
    fn store_user_data(&self, uid: &str, data: &UserData) -> Result<(), StoreError>;

    /// Profile of `uid`. `None` if none stored.
    fn load_user_data(&self, uid: &str) -> Result<Option<UserData>, StoreError>;

    /// Record the signed-in account's email, or clear it with `None`.
    fn store_session(&self, email: Option<&str>) -> Result<(), StoreError>;

    /// Email of the signed-in account.
    fn load_session(&self) -> Result<Option<String>, StoreError>;

    /// Save the backstack for the next start.
    fn store_backstack(&self, backstack: &Backstack) -> Result<(), StoreError>;

    /// Last saved backstack.
    fn load_backstack(&self) -> Result<Option<Backstack>, StoreError>;
}

pub(crate) fn encode<T: Serialize>(value: &T) -> Result<Vec<u8>, StoreError> {
    let mut bytes = Vec::new();
    ciborium::into_writer(value, &mut bytes).map_err(|e| StoreError::Serialization(e.to_string()))?;
    Ok(bytes)
}

pub(crate) fn decode<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, StoreError> {
    ciborium::from_reader(bytes).map_err(|e| StoreError::Serialization(e.to_string()))
}
