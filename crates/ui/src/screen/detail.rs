//! Article detail screen.

use std::sync::Arc;

use folio_application::{ArticlesUseCase, LoadImageUseCase, Session};
use folio_domain::{Article, ArticlesError};
use futures::StreamExt;
use tokio::sync::mpsc;

use super::{Activation, BackgroundTasks, EventStream, LoadingTracker, SessionExpiry, no_events};
use crate::navigator::NavigatorRef;
use crate::state::{ArticleItem, DetailState};

/// Events fed to the detail screen.
pub struct DetailInput {
    /// The screen became visible.
    pub appeared: EventStream<()>,
}

impl Default for DetailInput {
    fn default() -> Self {
        Self {
            appeared: no_events(),
        }
    }
}

/// Channels the detail screen renders from.
pub struct DetailOutput {
    /// The item as selected, then as fetched.
    pub state: mpsc::UnboundedReceiver<DetailState>,
    /// Whether the details fetch is in flight.
    pub is_loading: mpsc::UnboundedReceiver<bool>,
    /// The running pipeline.
    pub activation: Activation,
}

/// Article detail state machine.
pub struct DetailScreen {
    session: Arc<dyn Session>,
    articles: Arc<dyn ArticlesUseCase>,
    images: Arc<dyn LoadImageUseCase>,
    navigator: NavigatorRef,
    item: ArticleItem,
}

impl DetailScreen {
    /// Creates the screen for `item`.
    #[must_use]
    pub fn new(
        session: Arc<dyn Session>,
        articles: Arc<dyn ArticlesUseCase>,
        images: Arc<dyn LoadImageUseCase>,
        navigator: NavigatorRef,
        item: ArticleItem,
    ) -> Self {
        Self {
            session,
            articles,
            images,
            navigator,
            item,
        }
    }

    /// The article this screen shows.
    #[must_use]
    pub const fn item(&self) -> &ArticleItem {
        &self.item
    }

    /// Starts one activation of the screen.
    #[must_use]
    pub fn transform(&self, input: DetailInput) -> DetailOutput {
        let (state_tx, state) = mpsc::unbounded_channel();
        let (loading_tx, is_loading) = mpsc::unbounded_channel();

        let driver = DetailDriver {
            articles: Arc::clone(&self.articles),
            images: Arc::clone(&self.images),
            item: self.item.clone(),
            expiry: SessionExpiry::new(Arc::clone(&self.session), self.navigator.clone()),
            tasks: BackgroundTasks::new(),
            loading: LoadingTracker::new(loading_tx),
            state: state_tx,
        };

        DetailOutput {
            state,
            is_loading,
            activation: Activation::spawn(driver.run(input)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct Details;

struct DetailDriver {
    articles: Arc<dyn ArticlesUseCase>,
    images: Arc<dyn LoadImageUseCase>,
    item: ArticleItem,
    expiry: SessionExpiry,
    tasks: BackgroundTasks<Details, Result<Article, ArticlesError>>,
    loading: LoadingTracker<Details>,
    state: mpsc::UnboundedSender<DetailState>,
}

impl DetailDriver {
    async fn run(mut self, input: DetailInput) {
        let mut appeared = input.appeared.fuse();

        loop {
            tokio::select! {
                biased;
                Some((_, outcome)) = self.tasks.next(), if !self.tasks.is_empty() => {
                    self.fetched(outcome).await;
                }
                Some(()) = appeared.next() => self.appeared(),
                else => break,
            }
        }
        tracing::debug!(article_id = self.item.id, "detail activation finished");
    }

    fn appeared(&mut self) {
        let _ = self.state.send(DetailState::Success(self.item.clone()));
        self.loading.begin(Details);

        let articles = Arc::clone(&self.articles);
        let id = self.item.id;
        self.tasks.spawn(Details, async move {
            articles.get_article_details(id).await
        });
    }

    async fn fetched(&mut self, outcome: Option<Result<Article, ArticlesError>>) {
        let result = outcome.unwrap_or_else(|| {
            tracing::error!(article_id = self.item.id, "detail fetch ended without a result");
            Err(ArticlesError::Generic)
        });

        match result {
            Ok(article) => {
                let item = ArticleItem::load(article, self.images.as_ref());
                let _ = self.state.send(DetailState::Success(item));
            }
            Err(error) => {
                let _ = self.state.send(DetailState::Failure(error));
                self.expiry.observe(error).await;
            }
        }
        self.loading.end(Details);
    }
}
