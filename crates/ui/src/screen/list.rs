//! Article list screen.

use std::sync::Arc;

use folio_application::{ArticlesUseCase, LoadImageUseCase, Session};
use folio_domain::{Article, ArticlesError};
use futures::StreamExt;
use tokio::sync::mpsc;

use super::{
    Activation, BackgroundTasks, EventStream, LoadingTracker, SessionExpiry, no_events,
    reset_session,
};
use crate::navigator::NavigatorRef;
use crate::state::{ArticleItem, ListState};

/// Events fed to the list screen.
pub struct ListInput {
    /// The screen became visible.
    pub appeared: EventStream<()>,
    /// Pull to refresh.
    pub refresh: EventStream<()>,
    /// An article was picked.
    pub select: EventStream<ArticleItem>,
    /// The logout button was pressed.
    pub logout: EventStream<()>,
}

impl Default for ListInput {
    fn default() -> Self {
        Self {
            appeared: no_events(),
            refresh: no_events(),
            select: no_events(),
            logout: no_events(),
        }
    }
}

/// Channels the list screen renders from.
pub struct ListOutput {
    /// Result of every fetch, in completion order.
    pub state: mpsc::UnboundedReceiver<ListState>,
    /// Whether any fetch is in flight.
    pub is_loading: mpsc::UnboundedReceiver<bool>,
    /// The running pipeline.
    pub activation: Activation,
}

/// Article list state machine.
pub struct ListScreen {
    session: Arc<dyn Session>,
    articles: Arc<dyn ArticlesUseCase>,
    images: Arc<dyn LoadImageUseCase>,
    navigator: NavigatorRef,
}

impl ListScreen {
    /// Creates the screen.
    #[must_use]
    pub fn new(
        session: Arc<dyn Session>,
        articles: Arc<dyn ArticlesUseCase>,
        images: Arc<dyn LoadImageUseCase>,
        navigator: NavigatorRef,
    ) -> Self {
        Self {
            session,
            articles,
            images,
            navigator,
        }
    }

    /// Starts one activation of the screen.
    #[must_use]
    pub fn transform(&self, input: ListInput) -> ListOutput {
        let (state_tx, state) = mpsc::unbounded_channel();
        let (loading_tx, is_loading) = mpsc::unbounded_channel();

        let driver = ListDriver {
            session: Arc::clone(&self.session),
            articles: Arc::clone(&self.articles),
            images: Arc::clone(&self.images),
            navigator: self.navigator.clone(),
            expiry: SessionExpiry::new(Arc::clone(&self.session), self.navigator.clone()),
            tasks: BackgroundTasks::new(),
            loading: LoadingTracker::new(loading_tx),
            state: state_tx,
        };

        ListOutput {
            state,
            is_loading,
            activation: Activation::spawn(driver.run(input)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Fetch {
    Appeared,
    Refresh,
}

struct ListDriver {
    session: Arc<dyn Session>,
    articles: Arc<dyn ArticlesUseCase>,
    images: Arc<dyn LoadImageUseCase>,
    navigator: NavigatorRef,
    expiry: SessionExpiry,
    tasks: BackgroundTasks<Fetch, Result<Vec<Article>, ArticlesError>>,
    loading: LoadingTracker<Fetch>,
    state: mpsc::UnboundedSender<ListState>,
}

impl ListDriver {
    async fn run(mut self, input: ListInput) {
        let mut appeared = input.appeared.fuse();
        let mut refresh = input.refresh.fuse();
        let mut select = input.select.fuse();
        let mut logout = input.logout.fuse();

        loop {
            tokio::select! {
                biased;
                Some((fetch, outcome)) = self.tasks.next(), if !self.tasks.is_empty() => {
                    self.fetched(fetch, outcome).await;
                }
                Some(()) = appeared.next() => self.fetch(Fetch::Appeared),
                Some(()) = refresh.next() => self.fetch(Fetch::Refresh),
                Some(item) = select.next() => {
                    self.navigator.show_detail(item);
                    self.loading.emit();
                }
                Some(()) = logout.next() => {
                    tracing::info!("logging out");
                    reset_session(self.session.as_ref(), &self.navigator).await;
                    self.loading.emit();
                }
                else => break,
            }
        }
        tracing::debug!("list activation finished");
    }

    fn fetch(&mut self, fetch: Fetch) {
        self.loading.begin(fetch);
        let articles = Arc::clone(&self.articles);
        self.tasks
            .spawn(fetch, async move { articles.get_articles().await });
    }

    async fn fetched(
        &mut self,
        fetch: Fetch,
        outcome: Option<Result<Vec<Article>, ArticlesError>>,
    ) {
        let state = match outcome {
            Some(Ok(articles)) if articles.is_empty() => ListState::NoResults,
            Some(Ok(articles)) => ListState::Success(
                articles
                    .into_iter()
                    .map(|article| ArticleItem::load(article, self.images.as_ref()))
                    .collect(),
            ),
            Some(Err(error)) => ListState::Failure(error),
            None => {
                tracing::error!(?fetch, "article fetch ended without a result");
                ListState::Failure(ArticlesError::Generic)
            }
        };

        let failure = match &state {
            ListState::Failure(error) => Some(*error),
            _ => None,
        };
        let _ = self.state.send(state);
        if let Some(error) = failure {
            self.expiry.observe(error).await;
        }
        self.loading.end(fetch);
    }
}
