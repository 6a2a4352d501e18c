//! Hand-written doubles shared by the screen tests.
#![allow(dead_code, clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use std::collections::{HashMap, VecDeque};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use folio_application::{
    ArticlesUseCase, ImageData, LoadImageUseCase, LoginUseCase, SecureStoreError, Session,
    no_image,
};
use folio_domain::{Article, ArticleId, ArticlesError, AuthToken, Credentials, LoginError};
use folio_ui::{ArticleItem, Navigator, NavigatorRef};
use futures::FutureExt;
use parking_lot::Mutex;
use tokio::sync::{Semaphore, mpsc};

const TIMEOUT: Duration = Duration::from_secs(2);

/// Next value on `rx`, failing the test if none arrives in time.
pub async fn next<T>(rx: &mut mpsc::UnboundedReceiver<T>) -> T {
    tokio::time::timeout(TIMEOUT, rx.recv())
        .await
        .expect("timed out waiting for output")
        .expect("output closed")
}

/// Everything currently queued on `rx`.
pub fn drain<T>(rx: &mut mpsc::UnboundedReceiver<T>) -> Vec<T> {
    let mut values = Vec::new();
    while let Ok(value) = rx.try_recv() {
        values.push(value);
    }
    values
}

/// Lets every other ready task run.
pub async fn settle() {
    for _ in 0..16 {
        tokio::task::yield_now().await;
    }
}

/// Polls `condition` until it holds.
pub async fn wait_until(condition: impl Fn() -> bool) {
    tokio::time::timeout(TIMEOUT, async {
        while !condition() {
            tokio::task::yield_now().await;
        }
    })
    .await
    .expect("condition never held");
}

/// Counts every transition.
#[derive(Default)]
pub struct RecordingNavigator {
    pub starts: AtomicUsize,
    pub lists: AtomicUsize,
    pub details: Mutex<Vec<ArticleId>>,
}

impl RecordingNavigator {
    pub fn new() -> (Arc<Self>, NavigatorRef) {
        let navigator = Arc::new(Self::default());
        let erased: Arc<dyn Navigator> = navigator.clone();
        (navigator, NavigatorRef::from_arc(&erased))
    }

    pub fn starts(&self) -> usize {
        self.starts.load(Ordering::SeqCst)
    }

    pub fn lists(&self) -> usize {
        self.lists.load(Ordering::SeqCst)
    }
}

impl Navigator for RecordingNavigator {
    fn start(&self) {
        self.starts.fetch_add(1, Ordering::SeqCst);
    }

    fn show_list(&self) {
        self.lists.fetch_add(1, Ordering::SeqCst);
    }

    fn show_detail(&self, item: ArticleItem) {
        self.details.lock().push(item.id);
    }
}

/// Session recording every mutation.
#[derive(Default)]
pub struct MockSession {
    pub token: Mutex<Option<String>>,
    pub saved: Mutex<Vec<String>>,
    pub deletes: AtomicUsize,
}

impl MockSession {
    pub fn deletes(&self) -> usize {
        self.deletes.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Session for MockSession {
    async fn token(&self) -> Option<String> {
        self.token.lock().clone()
    }

    async fn set_token(&self, token: &str) -> Result<(), SecureStoreError> {
        self.saved.lock().push(token.to_string());
        *self.token.lock() = Some(token.to_string());
        Ok(())
    }

    async fn delete_auth(&self) -> Result<(), SecureStoreError> {
        self.deletes.fetch_add(1, Ordering::SeqCst);
        *self.token.lock() = None;
        Ok(())
    }
}

/// Holds calls open until the test releases them.
pub struct Gate(Semaphore);

impl Gate {
    pub fn closed() -> Arc<Self> {
        Arc::new(Self(Semaphore::new(0)))
    }

    pub fn release(&self, calls: usize) {
        self.0.add_permits(calls);
    }

    async fn pass(&self) {
        self.0.acquire().await.unwrap().forget();
    }
}

/// Increments a counter unless disarmed before drop.
struct CancelGuard<'a>(Option<&'a AtomicUsize>);

impl CancelGuard<'_> {
    fn disarm(mut self) {
        self.0 = None;
    }
}

impl Drop for CancelGuard<'_> {
    fn drop(&mut self) {
        if let Some(counter) = self.0 {
            counter.fetch_add(1, Ordering::SeqCst);
        }
    }
}

/// Articles use case answering from queued results.
///
/// Empty queues answer with an empty list; unknown ids fail with `Generic`.
#[derive(Default)]
pub struct MockArticles {
    pub lists: Mutex<VecDeque<Result<Vec<Article>, ArticlesError>>>,
    pub details: Mutex<HashMap<ArticleId, Result<Article, ArticlesError>>>,
    pub calls: AtomicUsize,
    pub cancelled: AtomicUsize,
    pub gate: Option<Arc<Gate>>,
    pub panics: bool,
}

impl MockArticles {
    pub fn returning(
        results: impl IntoIterator<Item = Result<Vec<Article>, ArticlesError>>,
    ) -> Self {
        Self {
            lists: Mutex::new(results.into_iter().collect()),
            ..Self::default()
        }
    }

    pub fn gated(mut self, gate: &Arc<Gate>) -> Self {
        self.gate = Some(Arc::clone(gate));
        self
    }

    pub fn with_details(self, id: ArticleId, result: Result<Article, ArticlesError>) -> Self {
        self.details.lock().insert(id, result);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    async fn enter(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let guard = CancelGuard(Some(&self.cancelled));
        if let Some(gate) = &self.gate {
            gate.pass().await;
        }
        guard.disarm();
        if self.panics {
            panic!("articles backend exploded");
        }
    }
}

#[async_trait]
impl ArticlesUseCase for MockArticles {
    async fn get_articles(&self) -> Result<Vec<Article>, ArticlesError> {
        self.enter().await;
        self.lists.lock().pop_front().unwrap_or_else(|| Ok(Vec::new()))
    }

    async fn get_article_details(&self, id: ArticleId) -> Result<Article, ArticlesError> {
        self.enter().await;
        self.details
            .lock()
            .get(&id)
            .cloned()
            .unwrap_or(Err(ArticlesError::Generic))
    }
}

/// Login use case with a fixed answer.
pub struct MockLogin {
    pub result: Result<AuthToken, LoginError>,
    pub requests: Mutex<Vec<Credentials>>,
    pub gate: Option<Arc<Gate>>,
    pub panics: bool,
}

impl MockLogin {
    pub fn succeeding(token: &str) -> Self {
        Self::answering(Ok(AuthToken::new(token, "refresh")))
    }

    pub fn failing() -> Self {
        Self::answering(Err(LoginError::InvalidData))
    }

    fn answering(result: Result<AuthToken, LoginError>) -> Self {
        Self {
            result,
            requests: Mutex::new(Vec::new()),
            gate: None,
            panics: false,
        }
    }

    pub fn gated(mut self, gate: &Arc<Gate>) -> Self {
        self.gate = Some(Arc::clone(gate));
        self
    }

    pub fn requests(&self) -> Vec<Credentials> {
        self.requests.lock().clone()
    }
}

#[async_trait]
impl LoginUseCase for MockLogin {
    async fn get_token(&self, credentials: &Credentials) -> Result<AuthToken, LoginError> {
        self.requests.lock().push(credentials.clone());
        if let Some(gate) = &self.gate {
            gate.pass().await;
        }
        if self.panics {
            panic!("login backend exploded");
        }
        self.result.clone()
    }
}

/// Image use case serving fixed bytes per URL.
#[derive(Default)]
pub struct MockImages {
    pub images: HashMap<String, Bytes>,
    pub requested: Mutex<Vec<Option<String>>>,
}

impl MockImages {
    pub fn serving(url: &str, bytes: &'static [u8]) -> Self {
        Self {
            images: HashMap::from([(url.to_string(), Bytes::from_static(bytes))]),
            ..Self::default()
        }
    }

    pub fn requested(&self) -> Vec<Option<String>> {
        self.requested.lock().clone()
    }
}

impl LoadImageUseCase for MockImages {
    fn load_image(&self, url: Option<&str>) -> ImageData {
        self.requested.lock().push(url.map(str::to_string));
        match url.and_then(|u| self.images.get(u)) {
            Some(bytes) => futures::future::ready(Some(bytes.clone())).boxed().shared(),
            None => no_image(),
        }
    }
}

pub fn article(id: ArticleId) -> Article {
    Article::new(id)
        .with_title(format!("Article {id}"))
        .with_thumbnail(format!("https://example.com/{id}.jpg"))
}
