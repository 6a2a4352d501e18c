//! Typed resource client.
//!
//! Executes a [`Resource`] through the [`HttpClient`] port and classifies the
//! outcome. Status takes priority over body: a 4xx is `Unauthorized` even when
//! its body would decode.

use std::sync::Arc;

use folio_domain::{HttpResponse, Resource};
use serde::de::DeserializeOwned;

use crate::error::TransportError;
use crate::ports::HttpClient;

/// Executes resource descriptors and decodes their typed results.
#[derive(Clone)]
pub struct ResourceClient {
    http: Arc<dyn HttpClient>,
}

impl ResourceClient {
    /// Creates a resource client over the given transport.
    #[must_use]
    pub fn new(http: Arc<dyn HttpClient>) -> Self {
        Self { http }
    }

    /// Executes `resource` and decodes the body as `T`.
    ///
    /// No retries happen at this layer.
    ///
    /// # Errors
    ///
    /// Returns the classified [`TransportError`].
    pub async fn request<T: DeserializeOwned>(
        &self,
        resource: &Resource<T>,
    ) -> Result<T, TransportError> {
        let request = resource.to_http_request();
        tracing::debug!(
            method = %request.method,
            url = %request.url,
            authorized = resource.bearer_token().is_some(),
            "sending request"
        );

        let response = self.http.execute(&request).await.map_err(|error| {
            tracing::debug!(url = %request.url, %error, "transport failure");
            TransportError::from(error)
        })?;

        tracing::debug!(
            url = %request.url,
            status = response.status.as_u16(),
            "response received"
        );
        decode_response(response)
    }
}

/// Classifies a raw response and decodes its body on success.
///
/// # Errors
///
/// - `Decode` for a 2xx body that does not match `T`
/// - `Unauthorized` for any 4xx
/// - `DataLoading` for every other status
pub fn decode_response<T: DeserializeOwned>(response: HttpResponse) -> Result<T, TransportError> {
    let status = response.status;
    if status.is_success() {
        serde_json::from_slice(&response.body).map_err(|e| TransportError::Decode(e.to_string()))
    } else if status.is_client_error() {
        Err(TransportError::Unauthorized { status })
    } else {
        Err(TransportError::DataLoading {
            status_code: status.as_u16(),
            body: response.body,
        })
    }
}
