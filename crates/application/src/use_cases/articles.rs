//! Articles use case

use std::sync::Arc;

use async_trait::async_trait;
use folio_domain::{ApiBase, Article, ArticleId, ArticlesError, Resource};

use crate::auth::Session;
use crate::resource_client::ResourceClient;

/// Loads articles with the current session credential.
#[async_trait]
pub trait ArticlesUseCase: Send + Sync {
    /// Fetches the article list.
    async fn get_articles(&self) -> Result<Vec<Article>, ArticlesError>;

    /// Fetches one article with its full content.
    async fn get_article_details(&self, id: ArticleId) -> Result<Article, ArticlesError>;
}

/// [`ArticlesUseCase`] over the resource client.
///
/// The token is read from the session on every call, so a login or logout
/// between calls is picked up without rebuilding the use case.
pub struct FetchArticles {
    client: ResourceClient,
    session: Arc<dyn Session>,
    api: ApiBase,
}

impl FetchArticles {
    /// Creates the use case.
    #[must_use]
    pub fn new(client: ResourceClient, session: Arc<dyn Session>, api: ApiBase) -> Self {
        Self {
            client,
            session,
            api,
        }
    }
}

#[async_trait]
impl ArticlesUseCase for FetchArticles {
    async fn get_articles(&self) -> Result<Vec<Article>, ArticlesError> {
        let token = self.session.token().await;
        let resource = Resource::articles(&self.api, token);
        self.client.request(&resource).await.map_err(|error| {
            tracing::warn!(%error, "article list request failed");
            ArticlesError::from(error)
        })
    }

    async fn get_article_details(&self, id: ArticleId) -> Result<Article, ArticlesError> {
        let token = self.session.token().await;
        let resource = Resource::article_details(&self.api, token, id);
        self.client.request(&resource).await.map_err(|error| {
            tracing::warn!(article_id = id, %error, "article details request failed");
            ArticlesError::from(error)
        })
    }
}
