//! API base URL and endpoint construction.

use std::fmt;

use url::Url;

use crate::error::{DomainError, DomainResult};

/// Validated root of the articles API.
///
/// Always an absolute `http`/`https` URL that can carry path segments, so
/// endpoint construction never fails once an `ApiBase` exists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiBase(Url);

impl ApiBase {
    /// Parses and validates a base URL.
    ///
    /// # Errors
    ///
    /// Returns `InvalidUrl` if the string is not a URL and `InvalidBaseUrl`
    /// if it cannot be used as an API root.
    pub fn parse(raw: &str) -> DomainResult<Self> {
        let url = Url::parse(raw).map_err(|e| DomainError::InvalidUrl(format!("{e}: {raw}")))?;
        Self::new(url)
    }

    /// Validates an already parsed URL.
    ///
    /// # Errors
    ///
    /// Returns `InvalidBaseUrl` for non-HTTP schemes and opaque URLs.
    pub fn new(url: Url) -> DomainResult<Self> {
        if !matches!(url.scheme(), "http" | "https") || url.cannot_be_a_base() {
            return Err(DomainError::InvalidBaseUrl(url.to_string()));
        }
        Ok(Self(url))
    }

    /// Returns the underlying URL.
    #[must_use]
    pub const fn as_url(&self) -> &Url {
        &self.0
    }

    /// Appends path segments to the base, keeping any base path prefix.
    ///
    /// Each segment is percent-encoded on its own.
    #[must_use]
    pub fn endpoint<I, S>(&self, segments: I) -> Url
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut url = self.0.clone();
        url.set_query(None);
        url.set_fragment(None);
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }
}

impl fmt::Display for ApiBase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
