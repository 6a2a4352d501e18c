//! Authentication types for the password grant.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Grant type sent with every token request.
pub const GRANT_TYPE_PASSWORD: &str = "password";

/// Token pair returned by `/auth/token`.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthToken {
    /// Bearer token attached to authorized requests.
    #[serde(rename = "access_token")]
    pub token: String,
    /// Refresh token issued alongside the access token.
    pub refresh_token: String,
}

impl AuthToken {
    /// Creates a new token pair.
    #[must_use]
    pub fn new(token: impl Into<String>, refresh_token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            refresh_token: refresh_token.into(),
        }
    }
}

impl fmt::Debug for AuthToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthToken")
            .field("token", &"<redacted>")
            .field("refresh_token", &"<redacted>")
            .finish()
    }
}

/// Username and password typed into the login screen.
///
/// Transient: never persisted.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    /// Account name.
    pub username: String,
    /// Account password.
    pub password: String,
}

impl Credentials {
    /// Creates a credential pair.
    #[must_use]
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Returns true when both fields are non-empty.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        !self.username.is_empty() && !self.password.is_empty()
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Wire body of the password grant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TokenRequest<'a> {
    /// Account name.
    pub username: &'a str,
    /// Account password.
    pub password: &'a str,
    /// Always [`GRANT_TYPE_PASSWORD`].
    pub grant_type: &'static str,
}

impl<'a> From<&'a Credentials> for TokenRequest<'a> {
    fn from(credentials: &'a Credentials) -> Self {
        Self {
            username: &credentials.username,
            password: &credentials.password,
            grant_type: GRANT_TYPE_PASSWORD,
        }
    }
}
