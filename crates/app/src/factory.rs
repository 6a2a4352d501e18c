//! Composition of adapters, use cases and screens.

use std::sync::Arc;

use folio_application::{
    ArticlesUseCase, AuthSession, FetchArticles, HttpClientError, LoadImage, LoadImageUseCase,
    LoginUseCase, RequestToken, ResourceClient, SecureStore, Session,
};
use folio_infrastructure::{FileSecureStore, ReqwestHttpClient, ReqwestImageLoader};
use folio_ui::{ArticleItem, DetailScreen, ListScreen, LoginScreen, NavigatorRef};

use crate::config::{AppConfig, ConfigError};

/// Errors raised while assembling the application.
#[derive(Debug, thiserror::Error)]
pub enum FactoryError {
    /// The configuration is unusable.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The HTTP client could not be built.
    #[error("HTTP client could not be created: {0}")]
    Http(#[from] HttpClientError),
}

/// Shared dependencies every screen is built from.
#[derive(Clone)]
pub struct ApplicationFactory {
    session: Arc<dyn Session>,
    articles: Arc<dyn ArticlesUseCase>,
    login: Arc<dyn LoginUseCase>,
    images: Arc<dyn LoadImageUseCase>,
    header_image_url: String,
}

impl ApplicationFactory {
    /// Builds everything from `config`, keeping the token in the configured file.
    ///
    /// # Errors
    ///
    /// Returns an error if the API URL is invalid or the HTTP client fails to build.
    pub fn new(config: &AppConfig) -> Result<Self, FactoryError> {
        let store = Arc::new(FileSecureStore::new(config.store_path()));
        tracing::debug!(path = %store.path().display(), "using file secure store");
        Self::with_store(config, store)
    }

    /// Builds everything from `config` on top of an explicit store.
    ///
    /// # Errors
    ///
    /// Returns an error if the API URL is invalid or the HTTP client fails to build.
    pub fn with_store(
        config: &AppConfig,
        store: Arc<dyn SecureStore>,
    ) -> Result<Self, FactoryError> {
        let api = config.api_base()?;

        let mut http = ReqwestHttpClient::new()?;
        if let Some(timeout) = config.request_timeout() {
            http = http.with_timeout(timeout);
        }
        let client = ResourceClient::new(Arc::new(http.clone()));

        let session: Arc<dyn Session> =
            Arc::new(AuthSession::with_key(store, config.store_key()));
        let articles = Arc::new(FetchArticles::new(
            client.clone(),
            Arc::clone(&session),
            api.clone(),
        ));
        let login = Arc::new(RequestToken::new(client, api));
        let images = Arc::new(LoadImage::new(Arc::new(ReqwestImageLoader::new(http))));

        Ok(Self {
            session,
            articles,
            login,
            images,
            header_image_url: config.header_image_url(),
        })
    }

    /// The credential session.
    #[must_use]
    pub fn session(&self) -> Arc<dyn Session> {
        Arc::clone(&self.session)
    }

    /// A login screen reporting to `navigator`.
    #[must_use]
    pub fn login_screen(&self, navigator: NavigatorRef) -> LoginScreen {
        LoginScreen::new(
            self.session(),
            Arc::clone(&self.login),
            Arc::clone(&self.images),
            navigator,
        )
        .with_header_image(self.header_image_url.clone())
    }

    /// An article list screen reporting to `navigator`.
    #[must_use]
    pub fn list_screen(&self, navigator: NavigatorRef) -> ListScreen {
        ListScreen::new(
            self.session(),
            Arc::clone(&self.articles),
            Arc::clone(&self.images),
            navigator,
        )
    }

    /// A detail screen for `item` reporting to `navigator`.
    #[must_use]
    pub fn detail_screen(&self, navigator: NavigatorRef, item: ArticleItem) -> DetailScreen {
        DetailScreen::new(
            self.session(),
            Arc::clone(&self.articles),
            Arc::clone(&self.images),
            navigator,
            item,
        )
    }
}
