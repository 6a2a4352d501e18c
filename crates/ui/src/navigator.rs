//! Navigation capability.

use std::sync::{Arc, Weak};

use crate::state::ArticleItem;

/// Screen transitions performed by the host.
///
/// Implementations own the screens; screens only ever hold a [`NavigatorRef`].
pub trait Navigator: Send + Sync {
    /// Resets to the login screen.
    fn start(&self);

    /// Shows the article list.
    fn show_list(&self);

    /// Shows the details of `item`.
    fn show_detail(&self, item: ArticleItem);
}

/// Non-owning handle to a [`Navigator`].
///
/// Calls are dropped silently once the navigator is gone.
#[derive(Clone)]
pub struct NavigatorRef(Weak<dyn Navigator>);

impl NavigatorRef {
    /// Wraps a weak reference.
    #[must_use]
    pub fn new(navigator: Weak<dyn Navigator>) -> Self {
        Self(navigator)
    }

    /// Downgrades a strong reference.
    #[must_use]
    pub fn from_arc(navigator: &Arc<dyn Navigator>) -> Self {
        Self(Arc::downgrade(navigator))
    }

    /// See [`Navigator::start`].
    pub fn start(&self) {
        self.with(|n| n.start());
    }

    /// See [`Navigator::show_list`].
    pub fn show_list(&self) {
        self.with(|n| n.show_list());
    }

    /// See [`Navigator::show_detail`].
    pub fn show_detail(&self, item: ArticleItem) {
        self.with(|n| n.show_detail(item));
    }

    fn with(&self, f: impl FnOnce(&dyn Navigator)) {
        match self.0.upgrade() {
            Some(navigator) => f(navigator.as_ref()),
            None => tracing::debug!("navigator released; transition skipped"),
        }
    }
}

impl std::fmt::Debug for NavigatorRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("NavigatorRef")
            .field(&(self.0.strong_count() > 0))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct Counting(AtomicUsize);

    impl Navigator for Counting {
        fn start(&self) {
            self.0.fetch_add(1, Ordering::SeqCst);
        }
        fn show_list(&self) {}
        fn show_detail(&self, _item: ArticleItem) {}
    }

    #[test]
    fn test_calls_reach_live_navigator() {
        let counting = Arc::new(Counting::default());
        let navigator: Arc<dyn Navigator> = counting.clone();
        let handle = NavigatorRef::from_arc(&navigator);

        handle.start();
        handle.start();

        assert_eq!(counting.0.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_released_navigator_is_ignored() {
        let navigator: Arc<dyn Navigator> = Arc::new(Counting::default());
        let handle = NavigatorRef::from_arc(&navigator);
        drop(navigator);

        handle.start();
        handle.show_list();
    }
}
