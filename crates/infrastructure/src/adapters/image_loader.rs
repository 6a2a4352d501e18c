//! Image loader over reqwest.

use async_trait::async_trait;
use bytes::Bytes;
use folio_application::ports::{HttpClientError, ImageLoader};
use url::Url;

use super::ReqwestHttpClient;

/// Fetches image bytes with a plain GET.
///
/// Any non-2xx status counts as a failure.
#[derive(Clone)]
pub struct ReqwestImageLoader {
    http: ReqwestHttpClient,
}

impl ReqwestImageLoader {
    /// Creates a loader sharing the connection pool of `http`.
    #[must_use]
    pub const fn new(http: ReqwestHttpClient) -> Self {
        Self { http }
    }
}

#[async_trait]
impl ImageLoader for ReqwestImageLoader {
    async fn load(&self, url: &Url) -> Result<Bytes, HttpClientError> {
        let mut builder = self.http.client().get(url.clone());
        if let Some(timeout) = self.http.timeout() {
            builder = builder.timeout(timeout);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| HttpClientError::Send(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(HttpClientError::Send(format!("unexpected status {status}")));
        }

        response
            .bytes()
            .await
            .map_err(|e| HttpClientError::ReadBody(e.to_string()))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn loader() -> ReqwestImageLoader {
        ReqwestImageLoader::new(ReqwestHttpClient::new().unwrap())
    }

    #[tokio::test]
    async fn test_loads_bytes() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/images/ipad.jpg"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(vec![0xff, 0xd8, 0xff]))
            .mount(&server)
            .await;
        let url = Url::parse(&format!("{}/images/ipad.jpg", server.uri())).unwrap();

        let bytes = loader().load(&url).await.unwrap();

        assert_eq!(bytes.as_ref(), &[0xff, 0xd8, 0xff]);
    }

    #[tokio::test]
    async fn test_missing_image_is_error() {
        let server = MockServer::start().await;
        let url = Url::parse(&format!("{}/images/none.jpg", server.uri())).unwrap();

        let result = loader().load(&url).await;

        assert!(matches!(result, Err(HttpClientError::Send(_))));
    }
}
