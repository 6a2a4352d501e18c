//! Login use case

use async_trait::async_trait;
use folio_domain::{ApiBase, AuthToken, Credentials, LoginError, Resource};

use crate::resource_client::ResourceClient;

/// Exchanges credentials for a token pair.
#[async_trait]
pub trait LoginUseCase: Send + Sync {
    /// Requests a token with the password grant.
    ///
    /// Every failure collapses into [`LoginError::InvalidData`].
    async fn get_token(&self, credentials: &Credentials) -> Result<AuthToken, LoginError>;
}

/// [`LoginUseCase`] over the resource client.
pub struct RequestToken {
    client: ResourceClient,
    api: ApiBase,
}

impl RequestToken {
    /// Creates the use case.
    #[must_use]
    pub const fn new(client: ResourceClient, api: ApiBase) -> Self {
        Self { client, api }
    }
}

#[async_trait]
impl LoginUseCase for RequestToken {
    async fn get_token(&self, credentials: &Credentials) -> Result<AuthToken, LoginError> {
        let resource = Resource::login(&self.api, credentials).map_err(|error| {
            tracing::warn!(%error, "login request could not be built");
            LoginError::InvalidData
        })?;

        self.client.request(&resource).await.map_err(|error| {
            tracing::warn!(username = %credentials.username, %error, "login failed");
            LoginError::from(error)
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::ports::HttpClientError;
    use crate::testing::MockHttpClient;
    use pretty_assertions::assert_eq;

    fn use_case() -> (RequestToken, Arc<MockHttpClient>) {
        let http = Arc::new(MockHttpClient::new());
        let use_case = RequestToken::new(
            ResourceClient::new(http.clone()),
            ApiBase::parse("https://example.com").unwrap(),
        );
        (use_case, http)
    }

    #[tokio::test]
    async fn test_successful_login_returns_token() {
        let (use_case, http) = use_case();
        http.respond(
            "/auth/token",
            200,
            r#"{"access_token": "abc", "refresh_token": "def"}"#,
        );

        let token = use_case
            .get_token(&Credentials::new("code", "test"))
            .await
            .unwrap();

        assert_eq!(token, AuthToken::new("abc", "def"));
        let sent = http.requests();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].header("authorization"), None);
        assert_eq!(sent[0].header("content-type"), Some("application/json"));
        let body: serde_json::Value =
            serde_json::from_slice(sent[0].body.as_deref().unwrap()).unwrap();
        assert_eq!(
            body,
            serde_json::json!({"username": "code", "password": "test", "grant_type": "password"})
        );
    }

    #[tokio::test]
    async fn test_every_failure_is_invalid_data() {
        let (use_case, http) = use_case();
        let credentials = Credentials::new("code", "wrong");

        http.respond("/auth/token", 401, r#"{"error": "invalid_grant"}"#);
        assert_eq!(
            use_case.get_token(&credentials).await,
            Err(LoginError::InvalidData)
        );

        http.respond("/auth/token", 503, "");
        assert_eq!(
            use_case.get_token(&credentials).await,
            Err(LoginError::InvalidData)
        );

        http.respond("/auth/token", 200, r#"{"unexpected": true}"#);
        assert_eq!(
            use_case.get_token(&credentials).await,
            Err(LoginError::InvalidData)
        );

        http.fail("/auth/token", HttpClientError::Send("refused".into()));
        assert_eq!(
            use_case.get_token(&credentials).await,
            Err(LoginError::InvalidData)
        );
    }
}
