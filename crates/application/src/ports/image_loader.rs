//! Image loader port

use async_trait::async_trait;
use bytes::Bytes;
use url::Url;

use super::HttpClientError;

/// Port for downloading image bytes.
#[async_trait]
pub trait ImageLoader: Send + Sync {
    /// Fetches the bytes at `url`.
    ///
    /// # Errors
    ///
    /// Returns an error if the download fails or the server answers with a
    /// non-success status.
    async fn load(&self, url: &Url) -> Result<Bytes, HttpClientError>;
}
