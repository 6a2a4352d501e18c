//! Declarative description of one API call.

use std::fmt;
use std::marker::PhantomData;

use url::Url;

use super::wire::{HttpRequest, header};
use super::{ApiBase, HttpMethod};
use crate::article::{Article, ArticleId};
use crate::auth::{AuthToken, Credentials, TokenRequest};
use crate::error::{DomainError, DomainResult};

/// An endpoint call whose successful response decodes into `T`.
///
/// Immutable once built; a new descriptor is built for every call.
pub struct Resource<T> {
    url: Url,
    method: HttpMethod,
    body: Option<Vec<u8>>,
    bearer_token: Option<String>,
    expects: PhantomData<fn() -> T>,
}

impl<T> Resource<T> {
    /// Describes a GET of `url`.
    #[must_use]
    pub const fn get(url: Url) -> Self {
        Self {
            url,
            method: HttpMethod::Get,
            body: None,
            bearer_token: None,
            expects: PhantomData,
        }
    }

    /// Describes a POST of `body` to `url`.
    #[must_use]
    pub const fn post(url: Url, body: Vec<u8>) -> Self {
        Self {
            url,
            method: HttpMethod::Post,
            body: Some(body),
            bearer_token: None,
            expects: PhantomData,
        }
    }

    /// Attaches a bearer token. Empty tokens count as absent.
    #[must_use]
    pub fn with_bearer(mut self, token: Option<String>) -> Self {
        self.bearer_token = token.filter(|t| !t.is_empty());
        self
    }

    /// Target URL.
    #[must_use]
    pub const fn url(&self) -> &Url {
        &self.url
    }

    /// Request method.
    #[must_use]
    pub const fn method(&self) -> HttpMethod {
        self.method
    }

    /// Raw body, if any.
    #[must_use]
    pub fn body(&self) -> Option<&[u8]> {
        self.body.as_deref()
    }

    /// Bearer token, if any.
    #[must_use]
    pub fn bearer_token(&self) -> Option<&str> {
        self.bearer_token.as_deref()
    }

    /// Builds the wire request.
    ///
    /// `Authorization` is present iff a bearer token is attached;
    /// `Content-Type` is present iff there is a body.
    #[must_use]
    pub fn to_http_request(&self) -> HttpRequest {
        let mut request = HttpRequest::new(self.method, self.url.clone())
            .with_header(header::ACCEPT, header::APPLICATION_JSON);

        if let Some(token) = &self.bearer_token {
            request = request.with_header(header::AUTHORIZATION, header::bearer(token));
        }
        if let Some(body) = &self.body {
            request = request
                .with_header(header::CONTENT_TYPE, header::APPLICATION_JSON)
                .with_body(body.clone());
        }
        request
    }
}

impl Resource<Vec<Article>> {
    /// `GET /api/v1/articles`
    #[must_use]
    pub fn articles(base: &ApiBase, token: Option<String>) -> Self {
        Self::get(base.endpoint(["api", "v1", "articles"])).with_bearer(token)
    }
}

impl Resource<Article> {
    /// `GET /api/v1/articles/{id}`
    #[must_use]
    pub fn article_details(base: &ApiBase, token: Option<String>, id: ArticleId) -> Self {
        let id = id.to_string();
        Self::get(base.endpoint(["api", "v1", "articles", id.as_str()])).with_bearer(token)
    }
}

impl Resource<AuthToken> {
    /// `POST /auth/token` with the password grant. Never carries a token.
    ///
    /// # Errors
    ///
    /// Returns `InvalidBody` if the credentials cannot be encoded.
    pub fn login(base: &ApiBase, credentials: &Credentials) -> DomainResult<Self> {
        let body = serde_json::to_vec(&TokenRequest::from(credentials))
            .map_err(|e| DomainError::InvalidBody(e.to_string()))?;
        Ok(Self::post(base.endpoint(["auth", "token"]), body))
    }
}

impl<T> Clone for Resource<T> {
    fn clone(&self) -> Self {
        Self {
            url: self.url.clone(),
            method: self.method,
            body: self.body.clone(),
            bearer_token: self.bearer_token.clone(),
            expects: PhantomData,
        }
    }
}

impl<T> fmt::Debug for Resource<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Resource")
            .field("method", &self.method)
            .field("url", &self.url.as_str())
            .field("has_body", &self.body.is_some())
            .field("authorized", &self.bearer_token.is_some())
            .finish()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn base() -> ApiBase {
        ApiBase::parse("https://mobilecodetest.fws.io").unwrap()
    }

    #[test]
    fn test_articles_resource_with_token() {
        let resource = Resource::articles(&base(), Some("abc".to_string()));
        let request = resource.to_http_request();

        assert_eq!(request.method, HttpMethod::Get);
        assert_eq!(
            request.url.as_str(),
            "https://mobilecodetest.fws.io/api/v1/articles"
        );
        assert_eq!(request.header("authorization"), Some("Bearer abc"));
        assert_eq!(request.header("accept"), Some("application/json"));
        assert_eq!(request.header("content-type"), None);
        assert!(request.body.is_none());
    }

    #[test]
    fn test_missing_or_empty_token_omits_header() {
        let without = Resource::articles(&base(), None).to_http_request();
        assert_eq!(without.header(header::AUTHORIZATION), None);

        let empty = Resource::articles(&base(), Some(String::new())).to_http_request();
        assert_eq!(empty.header(header::AUTHORIZATION), None);
    }

    #[test]
    fn test_details_resource_path() {
        let resource = Resource::article_details(&base(), None, 17);
        assert_eq!(
            resource.url().as_str(),
            "https://mobilecodetest.fws.io/api/v1/articles/17"
        );
    }

    #[test]
    fn test_login_resource() {
        let resource = Resource::login(&base(), &Credentials::new("code", "test")).unwrap();
        let request = resource.to_http_request();

        assert_eq!(request.method, HttpMethod::Post);
        assert_eq!(request.url.path(), "/auth/token");
        assert_eq!(request.header(header::AUTHORIZATION), None);
        assert_eq!(request.header(header::CONTENT_TYPE), Some("application/json"));

        let body: serde_json::Value =
            serde_json::from_slice(request.body.as_deref().unwrap()).unwrap();
        assert_eq!(body["grant_type"], "password");
        assert_eq!(body["username"], "code");
    }

    #[test]
    fn test_debug_hides_token() {
        let resource = Resource::articles(&base(), Some("very-secret".to_string()));
        let debug = format!("{resource:?} {:?}", resource.to_http_request());
        assert!(!debug.contains("very-secret"));
    }
}
