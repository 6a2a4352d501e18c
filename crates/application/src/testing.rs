//! In-crate test doubles.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use bytes::Bytes;
use folio_domain::{HttpRequest, HttpResponse};
use parking_lot::Mutex;
use tokio::sync::Notify;
use url::Url;

use crate::ports::{
    HttpClient, HttpClientError, ImageLoader, SecureStore, SecureStoreError, StoreKey,
};

/// HTTP client answering from a table keyed by URL path.
///
/// Unknown paths fail with `HttpClientError::Send`.
#[derive(Default)]
pub struct MockHttpClient {
    responses: Mutex<HashMap<String, Result<HttpResponse, HttpClientError>>>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl MockHttpClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(&self, path: &str, status: u16, body: impl Into<Vec<u8>>) {
        self.responses
            .lock()
            .insert(path.to_string(), Ok(HttpResponse::new(status, body)));
    }

    pub fn fail(&self, path: &str, error: HttpClientError) {
        self.responses.lock().insert(path.to_string(), Err(error));
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().clone()
    }
}

#[async_trait]
impl HttpClient for MockHttpClient {
    async fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, HttpClientError> {
        self.requests.lock().push(request.clone());
        self.responses
            .lock()
            .get(request.url.path())
            .cloned()
            .unwrap_or_else(|| Err(HttpClientError::Send("no route".to_string())))
    }
}

/// Secure store backed by a map.
#[derive(Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<StoreKey, Vec<u8>>>,
}

impl MemoryStore {
    pub fn raw(&self, key: &StoreKey) -> Option<Vec<u8>> {
        self.entries.lock().get(key).cloned()
    }
}

#[async_trait]
impl SecureStore for MemoryStore {
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

/// Image loader that counts fetches and can be held open with a gate.
#[derive(Default)]
pub struct MockImageLoader {
    pub calls: AtomicUsize,
    pub gate: Option<Arc<Notify>>,
    pub fail: bool,
}

#[async_trait]
impl ImageLoader for MockImageLoader {
    async fn load(&self, url: &Url) -> Result<Bytes, HttpClientError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
        if self.fail {
            return Err(HttpClientError::Send("unreachable".to_string()));
        }
        Ok(Bytes::from(url.path().to_string()))
    }
}
