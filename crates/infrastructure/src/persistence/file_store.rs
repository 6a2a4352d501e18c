//! File-based secure store implementation.
//!
//! Every entry lives in one JSON document:
//! ```json
//! {
//!   "folio.auth": {
//!     "access-token": "\"eyJhbGciOi...\""
//!   }
//! }
//! ```
//! Values must be UTF-8. On Unix the file is readable by its owner only.

use std::collections::BTreeMap;
use std::io;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use folio_application::ports::{SecureStore, SecureStoreError, StoreKey};
use tokio::sync::Mutex;

use crate::serialization::{from_json_bytes, to_json_stable_bytes};

type Document = BTreeMap<String, BTreeMap<String, String>>;

/// Secure store persisted to a single JSON file.
#[derive(Debug)]
pub struct FileSecureStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileSecureStore {
    /// Creates a store backed by `path`. Nothing is touched until first use.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    /// Location of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn load(&self) -> Result<Document, SecureStoreError> {
        match tokio::fs::read(&self.path).await {
            Ok(content) if content.is_empty() => Ok(Document::new()),
            Ok(content) => from_json_bytes(&content)
                .map_err(|e| SecureStoreError::Serialization(e.to_string())),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(Document::new()),
            Err(e) => Err(e.into()),
        }
    }

    async fn store(&self, document: &Document) -> Result<(), SecureStoreError> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        let content = to_json_stable_bytes(document)
            .map_err(|e| SecureStoreError::Serialization(e.to_string()))?;

        let staging = self.path.with_extension("tmp");
        write_private(&staging, &content).await?;
        tokio::fs::rename(&staging, &self.path).await?;
        Ok(())
    }
}

#[cfg(unix)]
async fn write_private(path: &Path, content: &[u8]) -> io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    use tokio::io::AsyncWriteExt;

    let mut file = tokio::fs::OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .mode(0o600)
        .open(path)
        .await?;
    file.write_all(content).await?;
    file.sync_all().await?;
    tokio::fs::set_permissions(path, std::fs::Permissions::from_mode(0o600)).await
}

#[cfg(not(unix))]
async fn write_private(path: &Path, content: &[u8]) -> io::Result<()> {
    tokio::fs::write(path, content).await
}

#[async_trait]
impl SecureStore for FileSecureStore {
    async fn save(&self, key: &StoreKey, value: Vec<u8>) -> Result<(), SecureStoreError> {
        let value = String::from_utf8(value)
            .map_err(|e| SecureStoreError::Serialization(e.to_string()))?;

        let _guard = self.lock.lock().await;
        let mut document = self.load().await?;
        document
            .entry(key.service.clone())
            .or_default()
            .insert(key.account.clone(), value);
        self.store(&document).await?;

        tracing::debug!(%key, path = %self.path.display(), "secure entry saved");
        Ok(())
    }

    async fn read(&self, key: &StoreKey) -> Result<Option<Vec<u8>>, SecureStoreError> {
        let _guard = self.lock.lock().await;
        let document = self.load().await?;
        Ok(document
            .get(&key.service)
            .and_then(|accounts| accounts.get(&key.account))
            .map(|value| value.clone().into_bytes()))
    }

    async fn delete(&self, key: &StoreKey) -> Result<(), SecureStoreError> {
        let _guard = self.lock.lock().await;
        let mut document = self.load().await?;

        let Some(accounts) = document.get_mut(&key.service) else {
            return Ok(());
        };
        if accounts.remove(&key.account).is_none() {
            return Ok(());
        }
        if accounts.is_empty() {
            document.remove(&key.service);
        }
        self.store(&document).await?;

        tracing::debug!(%key, path = %self.path.display(), "secure entry deleted");
        Ok(())
    }
}
