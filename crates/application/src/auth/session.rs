//! The session owning the bearer credential.

use std::sync::Arc;

use async_trait::async_trait;

use super::SecureEntry;
use crate::ports::{SecureStore, SecureStoreError, StoreKey};

/// Store service the access token is kept under by default.
pub const DEFAULT_SERVICE: &str = "folio.auth";

/// Store account the access token is kept under by default.
pub const DEFAULT_ACCOUNT: &str = "access-token";

/// Read/write access to the current bearer credential.
///
/// No expiry tracking and no refresh: the server is the only judge of
/// validity.
#[async_trait]
pub trait Session: Send + Sync {
    /// The stored token, or `None` when absent or unreadable.
    async fn token(&self) -> Option<String>;

    /// Replaces the stored token.
    async fn set_token(&self, token: &str) -> Result<(), SecureStoreError>;

    /// Removes the stored token. Idempotent.
    async fn delete_auth(&self) -> Result<(), SecureStoreError>;
}

/// [`Session`] persisted through a [`SecureStore`].
pub struct AuthSession {
    entry: SecureEntry<String>,
}

impl AuthSession {
    /// Creates a session under the default key.
    #[must_use]
    pub fn new(store: Arc<dyn SecureStore>) -> Self {
        Self::with_key(store, StoreKey::new(DEFAULT_SERVICE, DEFAULT_ACCOUNT))
    }

    /// Creates a session under a custom key.
    #[must_use]
    pub fn with_key(store: Arc<dyn SecureStore>, key: StoreKey) -> Self {
        Self {
            entry: SecureEntry::new(store, key),
        }
    }
}

#[async_trait]
impl Session for AuthSession {
    async fn token(&self) -> Option<String> {
        match self.entry.read().await {
            Ok(token) => token,
            Err(error) => {
                tracing::warn!(key = %self.entry.key(), %error, "stored token could not be read");
                None
            }
        }
    }

    async fn set_token(&self, token: &str) -> Result<(), SecureStoreError> {
        self.entry.save(&token.to_string()).await
    }

    async fn delete_auth(&self) -> Result<(), SecureStoreError> {
        self.entry.delete().await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::testing::MemoryStore;
    use pretty_assertions::assert_eq;

    fn session() -> (AuthSession, Arc<MemoryStore>) {
        let store = Arc::new(MemoryStore::default());
        (AuthSession::new(store.clone()), store)
    }

    #[tokio::test]
    async fn test_fresh_session_has_no_token() {
        let (session, _) = session();
        assert_eq!(session.token().await, None);
    }

    #[tokio::test]
    async fn test_set_token_then_read() {
        let (session, store) = session();

        session.set_token("abc").await.unwrap();

        assert_eq!(session.token().await.as_deref(), Some("abc"));
        assert!(
            store
                .raw(&StoreKey::new(DEFAULT_SERVICE, DEFAULT_ACCOUNT))
                .is_some()
        );
    }

    #[tokio::test]
    async fn test_set_token_replaces_previous() {
        let (session, _) = session();

        session.set_token("first").await.unwrap();
        session.set_token("second").await.unwrap();

        assert_eq!(session.token().await.as_deref(), Some("second"));
    }

    #[tokio::test]
    async fn test_delete_auth_is_idempotent() {
        let (session, _) = session();
        session.set_token("abc").await.unwrap();

        session.delete_auth().await.unwrap();
        session.delete_auth().await.unwrap();

        assert_eq!(session.token().await, None);
    }

    #[tokio::test]
    async fn test_corrupt_entry_reads_as_absent() {
        let (session, store) = session();
        store
            .save(&StoreKey::new(DEFAULT_SERVICE, DEFAULT_ACCOUNT), b"\xff".to_vec())
            .await
            .unwrap();

        assert_eq!(session.token().await, None);
    }

    #[tokio::test]
    async fn test_custom_key_is_isolated() {
        let store = Arc::new(MemoryStore::default());
        let a = AuthSession::with_key(store.clone(), StoreKey::new("a", "token"));
        let b = AuthSession::with_key(store, StoreKey::new("b", "token"));

        a.set_token("abc").await.unwrap();

        assert_eq!(b.token().await, None);
    }
}
