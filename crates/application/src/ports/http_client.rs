//! HTTP Client port

use async_trait::async_trait;
use folio_domain::{HttpRequest, HttpResponse};
use thiserror::Error;

/// Failures of the raw exchange, split by how far the exchange got.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum HttpClientError {
    /// The request could not be sent or no response arrived.
    #[error("request failed: {0}")]
    Send(String),

    /// The caller-supplied timeout elapsed before a response arrived.
    #[error("request timed out after {timeout_ms}ms")]
    Timeout {
        /// Timeout that was applied.
        timeout_ms: u64,
    },

    /// A response arrived but its body could not be read.
    #[error("failed to read response body: {0}")]
    ReadBody(String),
}

/// Port for executing HTTP requests.
///
/// This trait abstracts the HTTP client implementation, allowing
/// the application layer to be independent of specific HTTP libraries.
/// Implementations perform no status classification and no retries.
#[async_trait]
pub trait HttpClient: Send + Sync {
    /// Executes an HTTP request and returns the raw response.
    ///
    /// # Errors
    ///
    /// Returns an error if no complete response could be obtained.
    async fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, HttpClientError>;
}
