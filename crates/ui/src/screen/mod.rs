//! Screen state machines and the machinery they share.
//!
//! A screen's `transform` spawns one driver task per activation. The driver
//! owns every output sender and selects over, in priority order, finished
//! background work and then each input stream as declared. Use case calls run
//! in a per-activation [`JoinSet`]; dropping the [`Activation`] aborts the
//! driver, which drops the set and aborts whatever is still running.

mod detail;
mod list;
mod login;

use std::collections::HashMap;
use std::future::Future;
use std::hash::Hash;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use folio_application::Session;
use folio_domain::ArticlesError;
use futures::stream::{self, BoxStream};
use futures::{FutureExt, StreamExt};
use tokio::sync::mpsc;
use tokio::task::{JoinHandle, JoinSet};

use crate::navigator::NavigatorRef;

pub use detail::{DetailInput, DetailOutput, DetailScreen};
pub use list::{ListInput, ListOutput, ListScreen};
pub use login::{LoginInput, LoginOutput, LoginScreen};

/// A stream of user events feeding a screen.
pub type EventStream<T> = BoxStream<'static, T>;

/// An input that never fires.
#[must_use]
pub fn no_events<T: Send + 'static>() -> EventStream<T> {
    stream::empty().boxed()
}

/// Adapts a channel receiver into an input stream.
///
/// The stream ends once every sender is dropped.
#[must_use]
pub fn from_receiver<T: Send + 'static>(receiver: mpsc::UnboundedReceiver<T>) -> EventStream<T> {
    stream::unfold(receiver, |mut receiver| async move {
        receiver.recv().await.map(|event| (event, receiver))
    })
    .boxed()
}

/// A running screen pipeline.
///
/// Dropping it cancels the driver and all outstanding work.
#[derive(Debug)]
pub struct Activation {
    driver: JoinHandle<()>,
}

impl Activation {
    fn spawn<F>(driver: F) -> Self
    where
        F: Future<Output = ()> + Send + 'static,
    {
        Self {
            driver: tokio::spawn(driver),
        }
    }

    /// True once every input has ended and all work has settled.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.driver.is_finished()
    }

    /// Waits for the driver to end on its own.
    pub async fn finished(mut self) {
        if let Err(error) = (&mut self.driver).await
            && !error.is_cancelled()
        {
            tracing::error!(%error, "screen driver failed");
        }
    }
}

impl Drop for Activation {
    fn drop(&mut self) {
        self.driver.abort();
    }
}

/// Use case calls of one activation, tagged with their action kind.
///
/// A call that panics completes with `None`.
pub(crate) struct BackgroundTasks<K, T> {
    set: JoinSet<(K, Option<T>)>,
}

impl<K, T> BackgroundTasks<K, T>
where
    K: Send + 'static,
    T: Send + 'static,
{
    pub(crate) fn new() -> Self {
        Self {
            set: JoinSet::new(),
        }
    }

    pub(crate) fn spawn<F>(&mut self, kind: K, work: F)
    where
        F: Future<Output = T> + Send + 'static,
    {
        self.set.spawn(async move {
            let outcome = AssertUnwindSafe(work).catch_unwind().await.ok();
            (kind, outcome)
        });
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.set.is_empty()
    }

    /// Next finished call in completion order; `None` once the set is empty.
    pub(crate) async fn next(&mut self) -> Option<(K, Option<T>)> {
        loop {
            match self.set.join_next().await? {
                Ok(done) => return Some(done),
                Err(error) => tracing::debug!(%error, "background task cancelled"),
            }
        }
    }
}

/// Per-kind pending counters driving an `is_loading` output.
pub(crate) struct LoadingTracker<K> {
    pending: HashMap<K, usize>,
    output: mpsc::UnboundedSender<bool>,
}

impl<K: Copy + Eq + Hash> LoadingTracker<K> {
    pub(crate) fn new(output: mpsc::UnboundedSender<bool>) -> Self {
        Self {
            pending: HashMap::new(),
            output,
        }
    }

    pub(crate) fn is_loading(&self) -> bool {
        !self.pending.is_empty()
    }

    pub(crate) fn begin(&mut self, kind: K) {
        *self.pending.entry(kind).or_default() += 1;
        self.emit();
    }

    pub(crate) fn end(&mut self, kind: K) {
        if let Some(count) = self.pending.get_mut(&kind) {
            *count = count.saturating_sub(1);
            if *count == 0 {
                self.pending.remove(&kind);
            }
        }
        self.emit();
    }

    /// Re-sends the current aggregate.
    pub(crate) fn emit(&self) {
        let _ = self.output.send(self.is_loading());
    }
}

/// Deletes the credential, then returns to the login screen.
pub(crate) async fn reset_session(session: &dyn Session, navigator: &NavigatorRef) {
    if let Err(error) = session.delete_auth().await {
        tracing::warn!(%error, "stored credential could not be deleted");
    }
    navigator.start();
}

/// Reacts to an expired token at most once per activation.
pub(crate) struct SessionExpiry {
    session: Arc<dyn Session>,
    navigator: NavigatorRef,
    fired: bool,
}

impl SessionExpiry {
    pub(crate) const fn new(session: Arc<dyn Session>, navigator: NavigatorRef) -> Self {
        Self {
            session,
            navigator,
            fired: false,
        }
    }

    pub(crate) async fn observe(&mut self, error: ArticlesError) {
        if error != ArticlesError::ExpiredToken || self.fired {
            return;
        }
        self.fired = true;
        tracing::info!("session expired; returning to login");
        reset_session(self.session.as_ref(), &self.navigator).await;
    }
}
