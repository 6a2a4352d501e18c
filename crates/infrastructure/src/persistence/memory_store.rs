//! In-memory secure store.

use std::collections::HashMap;

use async_trait::async_trait;
use folio_application::ports::{SecureStore, SecureStoreError, StoreKey};
use parking_lot::Mutex;

/// Secure store that lives only as long as the process.
#[derive(Debug, Default)]
pub struct MemorySecureStore {
    entries: Mutex<HashMap<StoreKey, Vec<u8>>>,
}

impl MemorySecureStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SecureStore for MemorySecureStore {
    async fn save(&self, key: &StoreKey, value: Vec<u8>) -> Result<(), SecureStoreError> {
        self.entries.lock().insert(key.clone(), value);
        Ok(())
    }

    async fn read(&self, key: &StoreKey) -> Result<Option<Vec<u8>>, SecureStoreError> {
        Ok(self.entries.lock().get(key).cloned())
    }

    async fn delete(&self, key: &StoreKey) -> Result<(), SecureStoreError> {
        self.entries.lock().remove(key);
        Ok(())
    }
}
