//! Screen stack and navigation.

use std::sync::{Arc, Weak};

use folio_domain::LoginError;
use folio_ui::{
    Activation, ArticleItem, DetailInput, DetailState, ListInput, ListState, LoginInput,
    Navigator, NavigatorRef, from_receiver,
};
use parking_lot::Mutex;
use tokio::sync::mpsc;

use crate::factory::ApplicationFactory;

/// Which screen is on top.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenKind {
    /// Credentials form.
    Login,
    /// Article list.
    List,
    /// One article.
    Detail,
}

/// Everything the host draws, merged from the visible screen's outputs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Render {
    /// A screen came to the top.
    Screen(ScreenKind),
    /// The login header image arrived, with its size in bytes.
    HeaderImage(usize),
    /// The login button changed state.
    LoginEnabled(bool),
    /// The loading indicator changed.
    Loading(bool),
    /// A login attempt finished; `None` on success.
    LoginResult(Option<LoginError>),
    /// New list content.
    List(ListState),
    /// New detail content.
    Detail(DetailState),
}

/// User intents routed to the screen on top.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    /// Username field edited.
    Username(String),
    /// Password field edited.
    Password(String),
    /// Login pressed.
    Login,
    /// Pull to refresh.
    Refresh,
    /// Article at this list position picked.
    Open(usize),
    /// Logout pressed.
    Logout,
    /// Back pressed.
    Back,
}

/// Owns the screen stack and implements [`Navigator`] for the screens.
pub struct MainCoordinator {
    factory: ApplicationFactory,
    navigator: NavigatorRef,
    render: mpsc::UnboundedSender<Render>,
    stack: Mutex<Vec<Screen>>,
}

impl MainCoordinator {
    /// Creates a coordinator with an empty stack.
    ///
    /// Nothing is shown until [`Navigator::start`] is called.
    #[must_use]
    pub fn new(factory: ApplicationFactory, render: mpsc::UnboundedSender<Render>) -> Arc<Self> {
        Arc::new_cyclic(|this: &Weak<Self>| {
            let navigator: Weak<dyn Navigator> = this.clone();
            Self {
                factory,
                navigator: NavigatorRef::new(navigator),
                render,
                stack: Mutex::new(Vec::new()),
            }
        })
    }

    /// The screen on top, if any.
    #[must_use]
    pub fn current(&self) -> Option<ScreenKind> {
        self.stack.lock().last().map(Screen::kind)
    }

    /// Routes `intent` to the screen on top. Intents the screen has no use for are dropped.
    pub fn dispatch(&self, intent: Intent) {
        if intent == Intent::Back {
            self.back();
            return;
        }

        let stack = self.stack.lock();
        let Some(top) = stack.last() else {
            tracing::debug!(?intent, "no screen to receive intent");
            return;
        };

        let delivered = match (&top.inputs, intent) {
            (Inputs::Login(login), Intent::Username(value)) => login.username.send(value).is_ok(),
            (Inputs::Login(login), Intent::Password(value)) => login.password.send(value).is_ok(),
            (Inputs::Login(login), Intent::Login) => login.tap.send(()).is_ok(),
            (Inputs::List(list), Intent::Refresh) => list.refresh.send(()).is_ok(),
            (Inputs::List(list), Intent::Logout) => list.logout.send(()).is_ok(),
            (Inputs::List(list), Intent::Open(index)) => {
                let item = list.items.lock().get(index).cloned();
                match item {
                    Some(item) => list.select.send(item).is_ok(),
                    None => {
                        tracing::debug!(index, "no article at position");
                        false
                    }
                }
            }
            (_, intent) => {
                tracing::debug!(?intent, screen = ?top.kind(), "intent not applicable");
                false
            }
        };
        if !delivered {
            tracing::trace!("intent dropped");
        }
    }

    /// Pops the top screen, revealing and re-appearing the one below.
    pub fn back(&self) {
        let mut stack = self.stack.lock();
        if stack.len() < 2 {
            tracing::debug!("nothing to go back to");
            return;
        }
        stack.pop();
        if let Some(top) = stack.last() {
            let _ = self.render.send(Render::Screen(top.kind()));
            top.appear();
        }
    }

    fn replace(&self, screen: Screen) {
        let kind = screen.kind();
        let previous = std::mem::replace(&mut *self.stack.lock(), vec![screen]);
        drop(previous);
        self.shown(kind);
    }

    fn push(&self, screen: Screen) {
        let kind = screen.kind();
        self.stack.lock().push(screen);
        self.shown(kind);
    }

    fn shown(&self, kind: ScreenKind) {
        tracing::info!(screen = ?kind, "screen shown");
        let _ = self.render.send(Render::Screen(kind));
        if let Some(top) = self.stack.lock().last() {
            top.appear();
        }
    }

    fn login(&self) -> Screen {
        let (appeared, appeared_rx) = mpsc::unbounded_channel();
        let (username, username_rx) = mpsc::unbounded_channel();
        let (password, password_rx) = mpsc::unbounded_channel();
        let (tap, tap_rx) = mpsc::unbounded_channel();

        let output = self.factory.login_screen(self.navigator.clone()).transform(LoginInput {
            appeared: from_receiver(appeared_rx),
            username_changed: from_receiver(username_rx),
            password_changed: from_receiver(password_rx),
            login_tap: from_receiver(tap_rx),
        });

        forward(output.header_image, &self.render, |bytes| {
            Render::HeaderImage(bytes.len())
        });
        forward(output.enable_login, &self.render, Render::LoginEnabled);
        forward(output.is_loading, &self.render, Render::Loading);
        forward(output.open_list, &self.render, Render::LoginResult);

        Screen {
            appeared,
            inputs: Inputs::Login(LoginInputs {
                username,
                password,
                tap,
            }),
            _activation: output.activation,
        }
    }

    fn list(&self) -> Screen {
        let (appeared, appeared_rx) = mpsc::unbounded_channel();
        let (refresh, refresh_rx) = mpsc::unbounded_channel();
        let (select, select_rx) = mpsc::unbounded_channel();
        let (logout, logout_rx) = mpsc::unbounded_channel();

        let output = self.factory.list_screen(self.navigator.clone()).transform(ListInput {
            appeared: from_receiver(appeared_rx),
            refresh: from_receiver(refresh_rx),
            select: from_receiver(select_rx),
            logout: from_receiver(logout_rx),
        });

        let items = Arc::new(Mutex::new(Vec::new()));
        let visible = Arc::clone(&items);
        forward(output.state, &self.render, move |state| {
            *visible.lock() = match &state {
                ListState::Success(items) => items.clone(),
                _ => Vec::new(),
            };
            Render::List(state)
        });
        forward(output.is_loading, &self.render, Render::Loading);

        Screen {
            appeared,
            inputs: Inputs::List(ListInputs {
                refresh,
                select,
                logout,
                items,
            }),
            _activation: output.activation,
        }
    }

    fn detail(&self, item: ArticleItem) -> Screen {
        let (appeared, appeared_rx) = mpsc::unbounded_channel();

        let output = self
            .factory
            .detail_screen(self.navigator.clone(), item)
            .transform(DetailInput {
                appeared: from_receiver(appeared_rx),
            });

        forward(output.state, &self.render, Render::Detail);
        forward(output.is_loading, &self.render, Render::Loading);

        Screen {
            appeared,
            inputs: Inputs::Detail,
            _activation: output.activation,
        }
    }
}

impl Navigator for MainCoordinator {
    fn start(&self) {
        self.replace(self.login());
    }

    fn show_list(&self) {
        self.replace(self.list());
    }

    fn show_detail(&self, item: ArticleItem) {
        tracing::debug!(article_id = item.id, "opening article");
        self.push(self.detail(item));
    }
}

/// Pumps one screen output into the render channel.
///
/// The pump ends once the screen's activation is gone and everything it
/// already sent has been delivered.
fn forward<T, F>(
    mut output: mpsc::UnboundedReceiver<T>,
    render: &mpsc::UnboundedSender<Render>,
    wrap: F,
) where
    T: Send + 'static,
    F: Fn(T) -> Render + Send + 'static,
{
    let render = render.clone();
    tokio::spawn(async move {
        while let Some(value) = output.recv().await {
            if render.send(wrap(value)).is_err() {
                break;
            }
        }
    });
}

struct LoginInputs {
    username: mpsc::UnboundedSender<String>,
    password: mpsc::UnboundedSender<String>,
    tap: mpsc::UnboundedSender<()>,
}

struct ListInputs {
    refresh: mpsc::UnboundedSender<()>,
    select: mpsc::UnboundedSender<ArticleItem>,
    logout: mpsc::UnboundedSender<()>,
    items: Arc<Mutex<Vec<ArticleItem>>>,
}

enum Inputs {
    Login(LoginInputs),
    List(ListInputs),
    Detail,
}

/// One live screen: its input senders and pipeline.
struct Screen {
    appeared: mpsc::UnboundedSender<()>,
    inputs: Inputs,
    _activation: Activation,
}

impl Screen {
    const fn kind(&self) -> ScreenKind {
        match self.inputs {
            Inputs::Login(_) => ScreenKind::Login,
            Inputs::List(_) => ScreenKind::List,
            Inputs::Detail => ScreenKind::Detail,
        }
    }

    fn appear(&self) {
        let _ = self.appeared.send(());
    }
}
