//! Login screen.

use std::sync::Arc;

use bytes::Bytes;
use folio_application::{LoadImageUseCase, LoginUseCase, Session};
use folio_domain::{AuthToken, Credentials, LoginError};
use futures::StreamExt;
use tokio::sync::mpsc;

use super::{Activation, BackgroundTasks, EventStream, LoadingTracker, no_events};
use crate::navigator::NavigatorRef;

/// Events fed to the login screen.
pub struct LoginInput {
    /// The screen became visible.
    pub appeared: EventStream<()>,
    /// New content of the username field.
    pub username_changed: EventStream<String>,
    /// New content of the password field.
    pub password_changed: EventStream<String>,
    /// The login button was pressed.
    pub login_tap: EventStream<()>,
}

impl Default for LoginInput {
    fn default() -> Self {
        Self {
            appeared: no_events(),
            username_changed: no_events(),
            password_changed: no_events(),
            login_tap: no_events(),
        }
    }
}

/// Channels the login screen renders from.
pub struct LoginOutput {
    /// Header image bytes, sent only when an image arrived.
    pub header_image: mpsc::UnboundedReceiver<Bytes>,
    /// Whether the login button accepts taps.
    pub enable_login: mpsc::UnboundedReceiver<bool>,
    /// Whether a login request is in flight.
    pub is_loading: mpsc::UnboundedReceiver<bool>,
    /// Outcome of each login: `None` on success.
    pub open_list: mpsc::UnboundedReceiver<Option<LoginError>>,
    /// The running pipeline.
    pub activation: Activation,
}

/// Login screen state machine.
pub struct LoginScreen {
    session: Arc<dyn Session>,
    login: Arc<dyn LoginUseCase>,
    images: Arc<dyn LoadImageUseCase>,
    navigator: NavigatorRef,
    header_image_url: Option<String>,
}

impl LoginScreen {
    /// Creates the screen without a header image.
    #[must_use]
    pub fn new(
        session: Arc<dyn Session>,
        login: Arc<dyn LoginUseCase>,
        images: Arc<dyn LoadImageUseCase>,
        navigator: NavigatorRef,
    ) -> Self {
        Self {
            session,
            login,
            images,
            navigator,
            header_image_url: None,
        }
    }

    /// Sets the image fetched into `header_image` on every appearance.
    #[must_use]
    pub fn with_header_image(mut self, url: impl Into<String>) -> Self {
        self.header_image_url = Some(url.into());
        self
    }

    /// Starts one activation of the screen.
    #[must_use]
    pub fn transform(&self, input: LoginInput) -> LoginOutput {
        let (header_tx, header_image) = mpsc::unbounded_channel();
        let (enable_tx, enable_login) = mpsc::unbounded_channel();
        let (loading_tx, is_loading) = mpsc::unbounded_channel();
        let (open_tx, open_list) = mpsc::unbounded_channel();

        let driver = LoginDriver {
            session: Arc::clone(&self.session),
            login: Arc::clone(&self.login),
            images: Arc::clone(&self.images),
            navigator: self.navigator.clone(),
            header_image_url: self.header_image_url.clone(),
            credentials: Credentials::default(),
            enabled: false,
            in_flight: false,
            tasks: BackgroundTasks::new(),
            loading: LoadingTracker::new(loading_tx),
            header_image: header_tx,
            enable_login: enable_tx,
            open_list: open_tx,
        };

        LoginOutput {
            header_image,
            enable_login,
            is_loading,
            open_list,
            activation: Activation::spawn(driver.run(input)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Action {
    HeaderImage,
    Login,
}

enum Completion {
    HeaderImage(Option<Bytes>),
    Login(Result<AuthToken, LoginError>),
}

struct LoginDriver {
    session: Arc<dyn Session>,
    login: Arc<dyn LoginUseCase>,
    images: Arc<dyn LoadImageUseCase>,
    navigator: NavigatorRef,
    header_image_url: Option<String>,
    credentials: Credentials,
    enabled: bool,
    in_flight: bool,
    tasks: BackgroundTasks<Action, Completion>,
    loading: LoadingTracker<Action>,
    header_image: mpsc::UnboundedSender<Bytes>,
    enable_login: mpsc::UnboundedSender<bool>,
    open_list: mpsc::UnboundedSender<Option<LoginError>>,
}

impl LoginDriver {
    async fn run(mut self, input: LoginInput) {
        let mut appeared = input.appeared.fuse();
        let mut username = input.username_changed.fuse();
        let mut password = input.password_changed.fuse();
        let mut taps = input.login_tap.fuse();

        loop {
            tokio::select! {
                biased;
                Some((action, outcome)) = self.tasks.next(), if !self.tasks.is_empty() => {
                    self.complete(action, outcome).await;
                }
                Some(()) = appeared.next() => self.appeared(),
                Some(value) = username.next() => {
                    self.credentials.username = value;
                    self.refresh_enabled();
                }
                Some(value) = password.next() => {
                    self.credentials.password = value;
                    self.refresh_enabled();
                }
                Some(()) = taps.next() => self.tapped(),
                else => break,
            }
        }
        tracing::debug!("login activation finished");
    }

    fn appeared(&mut self) {
        self.enabled = false;
        let _ = self.enable_login.send(false);
        self.loading.emit();

        if let Some(url) = &self.header_image_url {
            let image = self.images.load_image(Some(url.as_str()));
            self.tasks
                .spawn(Action::HeaderImage, async move { Completion::HeaderImage(image.await) });
        }
    }

    fn refresh_enabled(&mut self) {
        self.enabled = self.credentials.is_complete();
        let _ = self.enable_login.send(self.enabled);
    }

    fn tapped(&mut self) {
        if self.in_flight {
            tracing::debug!("login already in flight; tap ignored");
            return;
        }
        if !self.enabled {
            tracing::debug!("login disabled; tap ignored");
            return;
        }

        self.in_flight = true;
        self.loading.begin(Action::Login);

        let login = Arc::clone(&self.login);
        let credentials = self.credentials.clone();
        self.tasks.spawn(Action::Login, async move {
            Completion::Login(login.get_token(&credentials).await)
        });
    }

    async fn complete(&mut self, action: Action, outcome: Option<Completion>) {
        match (action, outcome) {
            (_, Some(Completion::HeaderImage(Some(bytes)))) => {
                let _ = self.header_image.send(bytes);
            }
            (Action::HeaderImage, _) => {}
            (Action::Login, outcome) => {
                let result = match outcome {
                    Some(Completion::Login(result)) => result,
                    _ => {
                        tracing::error!("login task ended without a result");
                        Err(LoginError::InvalidData)
                    }
                };
                self.logged_in(result).await;
                self.in_flight = false;
                self.loading.end(Action::Login);
            }
        }
    }

    async fn logged_in(&self, result: Result<AuthToken, LoginError>) {
        match result {
            Ok(token) => {
                if let Err(error) = self.session.set_token(&token.token).await {
                    tracing::warn!(%error, "token could not be stored");
                }
                tracing::info!(username = %self.credentials.username, "logged in");
                self.navigator.show_list();
                let _ = self.open_list.send(None);
            }
            Err(error) => {
                let _ = self.open_list.send(Some(error));
            }
        }
    }
}
