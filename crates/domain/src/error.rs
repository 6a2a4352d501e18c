//! Domain error types

use thiserror::Error;

/// Domain-level errors that can occur during validation or processing.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// The provided URL is invalid or malformed.
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    /// The URL cannot serve as the base of the API endpoints.
    #[error("invalid API base URL: {0}")]
    InvalidBaseUrl(String),

    /// The request body could not be encoded.
    #[error("invalid body: {0}")]
    InvalidBody(String),
}

/// Result type alias for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;

/// Errors surfaced by the articles use-case.
///
/// Only `ExpiredToken` carries a side effect: the session is torn down and
/// navigation is reset to the login screen.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArticlesError {
    /// The server rejected the stored credential.
    #[error("the session has expired")]
    ExpiredToken,

    /// Any other failure while loading articles.
    #[error("articles could not be loaded")]
    Generic,
}

/// Errors surfaced by the login use-case.
///
/// Every underlying cause collapses into `InvalidData`.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LoginError {
    /// The credentials were rejected or the exchange failed.
    #[error("invalid username or password")]
    InvalidData,
}
