//! Salted password digests and account identifiers.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;
use uuid::Uuid;

use crate::StoreError;

const SALT_LEN: usize = 16;

/// SHA-256 over salt and password, both hex-encoded for storage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PasswordDigest {
    salt: String,
    digest: String,
}

impl PasswordDigest {
    /// Digest `password` under a fresh random salt.
    pub fn new(password: &str) -> Result<Self, StoreError> {
        let salt = random_bytes::<SALT_LEN>()?;
        Ok(Self::with_salt(password, &salt))
    }

    fn with_salt(password: &str, salt: &[u8]) -> Self {
        Self { salt: hex::encode(salt), digest: hex::encode(digest(salt, password)) }
    }

    /// Returns true if `password` produces this digest.
    pub fn verify(&self, password: &str) -> bool {
        let Ok(salt) = hex::decode(&self.salt) else {
            return false;
        };
        let expected = digest(&salt, password);
        let Ok(stored) = hex::decode(&self.digest) else {
            return false;
        };
        stored.as_slice().ct_eq(expected.as_slice()).into()
    }
}

/// Fresh random account identifier, a v4 UUID without hyphens.
pub fn new_uid() -> String {
    Uuid::new_v4().simple().to_string()
}

fn digest(salt: &[u8], password: &str) -> [u8; 32] {
    Sha256::new().chain_update(salt).chain_update(password.as_bytes()).finalize().into()
}

fn random_bytes<const N: usize>() -> Result<[u8; N], StoreError> {
    let mut bytes = [0u8; N];
    getrandom::fill(&mut bytes).map_err(|e| StoreError::Random(e.to_string()))?;
    Ok(bytes)
}
