//! Redb-backed durable store.
//!
//! Accounts, profiles, and the session survive restarts. Every write is its
//! own transaction.

use std::{path::Path, sync::Arc};

use bourbon_core::{Backstack, UserData};
use redb::{Database, ReadableTable, TableDefinition};
use serde::{Serialize, de::DeserializeOwned};

use crate::{ProfileStore, StoreError, StoredAccount, decode, encode, user_data_key};

/// Table: accounts
/// Key: normalized email
/// Value: CBOR-encoded StoredAccount
const ACCOUNTS: TableDefinition<&str, &[u8]> = TableDefinition::new("accounts");

/// Table: user_data
/// Key: `userdata/{uid}`
/// Value: CBOR-encoded UserData
const USER_DATA: TableDefinition<&str, &[u8]> = TableDefinition::new("user_data");

/// Table: session
/// Key: [`SESSION_EMAIL`] or [`SESSION_BACKSTACK`]
/// Value: CBOR-encoded String or Backstack
const SESSION: TableDefinition<&str, &[u8]> = TableDefinition::new("session");

const SESSION_EMAIL: &str = "current_email";
const SESSION_BACKSTACK: &str = "backstack";

/// Durable store backed by Redb.
///
/// Thread-safe through Redb's internal locking. Clone is cheap (Arc).
#[derive(Clone)]
pub struct RedbStore {
    db: Arc<Database>,
}

impl RedbStore {
    /// Open or create a database at `path`.
    ///
    /// Creates the tables if they don't exist.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Io` if the database cannot be opened or created.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let db = Database::create(path.as_ref()).map_err(|e| StoreError::Io(e.to_string()))?;

        let txn = db.begin_write().map_err(|e| StoreError::Io(e.to_string()))?;
        {
            let _ = txn.open_table(ACCOUNTS).map_err(|e| StoreError::Io(e.to_string()))?;
            let _ = txn.open_table(USER_DATA).map_err(|e| StoreError::Io(e.to_string()))?;
            let _ = txn.open_table(SESSION).map_err(|e| StoreError::Io(e.to_string()))?;
        }
        txn.commit().map_err(|e| StoreError::Io(e.to_string()))?;

        tracing::debug!(path = %path.as_ref().display(), "opened profile store");
        Ok(Self { db: Arc::new(db) })
    }

    fn put<T: Serialize>(
        &self,
        table: TableDefinition<&str, &[u8]>,
        key: &str,
        value: &T,
    ) -> Result<(), StoreError> {
        let bytes = encode(value)?;
        let txn = self.db.begin_write().map_err(|e| StoreError::Io(e.to_string()))?;
        {
            let mut table = txn.open_table(table).map_err(|e| StoreError::Io(e.to_string()))?;
            table.insert(key, bytes.as_slice()).map_err(|e| StoreError::Io(e.to_string()))?;
        }
        txn.commit().map_err(|e| StoreError::Io(e.to_string()))
    }

    fn get<T: DeserializeOwned>(
        &self,
        table: TableDefinition<&str, &[u8]>,
        key: &str,
    ) -> Result<Option<T>, StoreError> {
        let txn = self.db.begin_read().map_err(|e| StoreError::Io(e.to_string()))?;
        let table = txn.open_table(table).map_err(|e| StoreError::Io(e.to_string()))?;

        match table.get(key).map_err(|e| StoreError::Io(e.to_string()))? {
            Some(value) => decode(value.value()).map(Some),
            None => Ok(None),
        }
    }
}

impl ProfileStore for RedbStore {
    fn create_account(&self, account: &StoredAccount) -> Result<bool, StoreError> {
        let bytes = encode(account)?;
        let txn = self.db.begin_write().map_err(|e| StoreError::Io(e.to_string()))?;
        {
            let mut table = txn.open_table(ACCOUNTS).map_err(|e| StoreError::Io(e.to_string()))?;
            let taken = table
                .get(account.email.as_str())
                .map_err(|e| StoreError::Io(e.to_string()))?
                .is_some();
            if taken {
                return Ok(false);
            }
            table
                .insert(account.email.as_str(), bytes.as_slice())
                .map_err(|e| StoreError::Io(e.to_string()))?;
        }
        txn.commit().map_err(|e| StoreError::Io(e.to_string()))?;

        Ok(true)
    }

    fn load_account(&self, email: &str) -> Result<Option<StoredAccount>, StoreError> {
        self.get(ACCOUNTS, email)
    }

    fn store_user_data(&self, uid: &str, data: &UserData) -> Result<(), StoreError> {
        self.put(USER_DATA, &user_data_key(uid), data)
    }

    fn load_user_data(&self, uid: &str) -> Result<Option<UserData>, StoreError> {
        self.get(USER_DATA, &user_data_key(uid))
    }

    fn store_session(&self, email: Option<&str>) -> Result<(), StoreError> {
        let Some(email) = email else {
            let txn = self.db.begin_write().map_err(|e| StoreError::Io(e.to_string()))?;
            {
                let mut table =
                    txn.open_table(SESSION).map_err(|e| StoreError::Io(e.to_string()))?;
                table.remove(SESSION_EMAIL).map_err(|e| StoreError::Io(e.to_string()))?;
            }
            return txn.commit().map_err(|e| StoreError::Io(e.to_string()));
        };
        self.put(SESSION, SESSION_EMAIL, &email)
    }

    fn load_session(&self) -> Result<Option<String>, StoreError> {
        self.get(SESSION, SESSION_EMAIL)
    }

    fn store_backstack(&self, backstack: &Backstack) -> Result<(), StoreError> {
        self.put(SESSION, SESSION_BACKSTACK, backstack)
    }

    fn load_backstack(&self) -> Result<Option<Backstack>, StoreError> {
        self.get(SESSION, SESSION_BACKSTACK)
    }
}
