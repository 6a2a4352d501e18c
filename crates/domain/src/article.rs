//! Article entity

use serde::{Deserialize, Serialize};

/// Identity of an article on the server.
pub type ArticleId = i64;

/// An article as served by `/api/v1/articles`.
///
/// Only `id` is guaranteed; every other field may be absent on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Article {
    /// Server identity.
    pub id: ArticleId,
    /// Headline.
    #[serde(default)]
    pub title: Option<String>,
    /// Short teaser text.
    #[serde(default)]
    pub summary: Option<String>,
    /// Publication date, verbatim from the server.
    #[serde(default)]
    pub date: Option<String>,
    /// Full body, usually only present on the detail endpoint.
    #[serde(default)]
    pub content: Option<String>,
    /// Absolute URL of the thumbnail image.
    #[serde(default)]
    pub thumbnail_url: Option<String>,
    /// URL template for sized thumbnails.
    #[serde(default)]
    pub thumbnail_template_url: Option<String>,
}

impl Article {
    /// Creates an article with only an identity.
    #[must_use]
    pub const fn new(id: ArticleId) -> Self {
        Self {
            id,
            title: None,
            summary: None,
            date: None,
            content: None,
            thumbnail_url: None,
            thumbnail_template_url: None,
        }
    }

    /// Sets the title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Sets the summary.
    #[must_use]
    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = Some(summary.into());
        self
    }

    /// Sets the body content.
    #[must_use]
    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    /// Sets the thumbnail URL.
    #[must_use]
    pub fn with_thumbnail(mut self, url: impl Into<String>) -> Self {
        self.thumbnail_url = Some(url.into());
        self
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_decode_snake_case_wire_keys() {
        let json = r#"{
            "id": 42,
            "title": "Rust 2024",
            "summary": "Editions",
            "date": "2022-10-08T09:00:00Z",
            "thumbnail_url": "https://example.com/42.jpg",
            "thumbnail_template_url": "https://example.com/{w}/42.jpg",
            "unknown_field": true
        }"#;

        let article: Article = serde_json::from_str(json).unwrap();

        assert_eq!(article.id, 42);
        assert_eq!(article.title.as_deref(), Some("Rust 2024"));
        assert_eq!(
            article.thumbnail_url.as_deref(),
            Some("https://example.com/42.jpg")
        );
        assert_eq!(
            article.thumbnail_template_url.as_deref(),
            Some("https://example.com/{w}/42.jpg")
        );
        assert_eq!(article.content, None);
    }

    #[test]
    fn test_decode_minimal_article() {
        let article: Article = serde_json::from_str(r#"{"id": 7}"#).unwrap();
        assert_eq!(article, Article::new(7));
    }

    #[test]
    fn test_decode_requires_id() {
        let result = serde_json::from_str::<Article>(r#"{"title": "no id"}"#);
        assert!(result.is_err());
    }
}
