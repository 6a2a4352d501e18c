//! Typed access to one secure store entry.

use std::marker::PhantomData;
use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::ports::{SecureStore, SecureStoreError, StoreKey};

/// One value of type `T` kept under a fixed key, stored as JSON.
pub struct SecureEntry<T> {
    store: Arc<dyn SecureStore>,
    key: StoreKey,
    value: PhantomData<fn() -> T>,
}

impl<T: Serialize + DeserializeOwned> SecureEntry<T> {
    /// Binds `key` in `store`.
    #[must_use]
    pub fn new(store: Arc<dyn SecureStore>, key: StoreKey) -> Self {
        Self {
            store,
            key,
            value: PhantomData,
        }
    }

    /// The key this entry lives under.
    #[must_use]
    pub const fn key(&self) -> &StoreKey {
        &self.key
    }

    /// Replaces the stored value.
    ///
    /// # Errors
    ///
    /// Returns an error if encoding or the store write fails.
    pub async fn save(&self, value: &T) -> Result<(), SecureStoreError> {
        let bytes = serde_json::to_vec(value)
            .map_err(|e| SecureStoreError::Serialization(e.to_string()))?;
        self.store.save(&self.key, bytes).await
    }

    /// Reads the stored value; `None` when nothing is stored.
    ///
    /// # Errors
    ///
    /// Returns an error if the store read fails or the bytes do not decode.
    pub async fn read(&self) -> Result<Option<T>, SecureStoreError> {
        match self.store.read(&self.key).await? {
            Some(bytes) => serde_json::from_slice(&bytes)
                .map(Some)
                .map_err(|e| SecureStoreError::Serialization(e.to_string())),
            None => Ok(None),
        }
    }

    /// Removes the stored value. Deleting a missing entry succeeds.
    ///
    /// # Errors
    ///
    /// Returns an error if the store delete fails.
    pub async fn delete(&self) -> Result<(), SecureStoreError> {
        self.store.delete(&self.key).await
    }
}
