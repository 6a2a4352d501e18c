//! Presentation model of one article.

use std::fmt;
use std::hash::{Hash, Hasher};

use folio_application::{ImageData, LoadImageUseCase};
use folio_domain::{Article, ArticleId};

/// An article ready to render, with a lazily loaded thumbnail.
///
/// Two items are equal when their ids are equal.
#[derive(Clone)]
pub struct ArticleItem {
    /// Server identity.
    pub id: ArticleId,
    /// Headline.
    pub title: Option<String>,
    /// Short teaser text.
    pub summary: Option<String>,
    /// Publication date as served.
    pub date: Option<String>,
    /// Full body, once loaded.
    pub content: Option<String>,
    image: ImageData,
}

impl ArticleItem {
    /// Builds an item with an explicit image handle.
    #[must_use]
    pub fn new(article: Article, image: ImageData) -> Self {
        Self {
            id: article.id,
            title: article.title,
            summary: article.summary,
            date: article.date,
            content: article.content,
            image,
        }
    }

    /// Builds an item whose image is fetched from its thumbnail URL.
    #[must_use]
    pub fn load(article: Article, images: &dyn LoadImageUseCase) -> Self {
        let image = images.load_image(article.thumbnail_url.as_deref());
        Self::new(article, image)
    }

    /// Handle to the thumbnail bytes. Nothing is fetched until it is polled.
    #[must_use]
    pub fn image(&self) -> ImageData {
        self.image.clone()
    }
}

impl PartialEq for ArticleItem {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for ArticleItem {}

impl Hash for ArticleItem {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for ArticleItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ArticleItem")
            .field("id", &self.id)
            .field("title", &self.title)
            .field("has_content", &self.content.is_some())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_application::no_image;
    use std::collections::HashSet;

    #[test]
    fn test_identity_is_the_id() {
        let a = ArticleItem::new(Article::new(1).with_title("a"), no_image());
        let b = ArticleItem::new(Article::new(1).with_title("b"), no_image());
        let c = ArticleItem::new(Article::new(2).with_title("a"), no_image());

        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(HashSet::from([a, b, c]).len(), 2);
    }

    #[tokio::test]
    async fn test_image_handle_is_shared() {
        let item = ArticleItem::new(Article::new(1), no_image());
        assert_eq!(item.clone().image().await, None);
        assert_eq!(item.image().await, None);
    }
}
