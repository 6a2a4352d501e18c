//! Render state emitted by the screens.

mod article_item;

use folio_domain::ArticlesError;

pub use article_item::ArticleItem;

/// Message shown for any failure the user can retry.
pub const GENERIC_FAILURE_MESSAGE: &str = "Something went wrong. Please try again later.";

/// Message shown when the server has no articles.
pub const NO_RESULTS_MESSAGE: &str = "There are no articles to show.";

/// Render state of the article list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListState {
    /// At least one article.
    Success(Vec<ArticleItem>),
    /// The server returned an empty list.
    NoResults,
    /// Loading failed.
    Failure(ArticlesError),
}

impl ListState {
    /// Text to show instead of the list, if any.
    ///
    /// An expired session resets silently.
    #[must_use]
    pub const fn user_message(&self) -> Option<&'static str> {
        match self {
            Self::Success(_) | Self::Failure(ArticlesError::ExpiredToken) => None,
            Self::NoResults => Some(NO_RESULTS_MESSAGE),
            Self::Failure(ArticlesError::Generic) => Some(GENERIC_FAILURE_MESSAGE),
        }
    }
}

/// Render state of the detail screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DetailState {
    /// The article to show, possibly before its content is loaded.
    Success(ArticleItem),
    /// Loading the details failed.
    Failure(ArticlesError),
}

impl DetailState {
    /// Text to show instead of the article, if any.
    #[must_use]
    pub const fn user_message(&self) -> Option<&'static str> {
        match self {
            Self::Success(_) | Self::Failure(ArticlesError::ExpiredToken) => None,
            Self::Failure(ArticlesError::Generic) => Some(GENERIC_FAILURE_MESSAGE),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_application::no_image;
    use folio_domain::Article;

    #[test]
    fn test_list_messages() {
        let item = ArticleItem::new(Article::new(1), no_image());
        assert_eq!(ListState::Success(vec![item]).user_message(), None);
        assert_eq!(ListState::NoResults.user_message(), Some(NO_RESULTS_MESSAGE));
        assert_eq!(
            ListState::Failure(ArticlesError::Generic).user_message(),
            Some(GENERIC_FAILURE_MESSAGE)
        );
        assert_eq!(
            ListState::Failure(ArticlesError::ExpiredToken).user_message(),
            None
        );
    }

    #[test]
    fn test_detail_messages() {
        let item = ArticleItem::new(Article::new(1), no_image());
        assert_eq!(DetailState::Success(item).user_message(), None);
        assert_eq!(
            DetailState::Failure(ArticlesError::Generic).user_message(),
            Some(GENERIC_FAILURE_MESSAGE)
        );
        assert_eq!(
            DetailState::Failure(ArticlesError::ExpiredToken).user_message(),
            None
        );
    }
}
