//! Secure store port
//!
//! Defines the opaque save/read/delete capability used to keep the
//! credential between runs. Values are raw bytes; typed access goes
//! through [`crate::auth::SecureEntry`].

use std::fmt;

use async_trait::async_trait;

/// Errors that can occur during secure store operations.
#[derive(Debug, thiserror::Error)]
pub enum SecureStoreError {
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Address of one stored value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StoreKey {
    /// Owning service.
    pub service: String,
    /// Account within the service.
    pub account: String,
}

impl StoreKey {
    /// Creates a key.
    #[must_use]
    pub fn new(service: impl Into<String>, account: impl Into<String>) -> Self {
        Self {
            service: service.into(),
            account: account.into(),
        }
    }
}

impl fmt::Display for StoreKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.service, self.account)
    }
}

/// Secure key-value storage.
#[async_trait]
pub trait SecureStore: Send + Sync {
    /// Stores `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    /// Returns an error if the value cannot be persisted.
    async fn save(&self, key: &StoreKey, value: Vec<u8>) -> Result<(), SecureStoreError>;

    /// Reads the value under `key`.
    ///
    /// # Returns
    /// `None` when nothing is stored.
    async fn read(&self, key: &StoreKey) -> Result<Option<Vec<u8>>, SecureStoreError>;

    /// Removes the value under `key`. Removing an absent key succeeds.
    ///
    /// # Errors
    /// Returns an error if the backing storage cannot be updated.
    async fn delete(&self, key: &StoreKey) -> Result<(), SecureStoreError>;
}
