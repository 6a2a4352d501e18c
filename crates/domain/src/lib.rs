//! Folio Domain - Core business types
//!
//! This crate defines the domain model for the Folio articles reader.
//! All types here are pure Rust with no I/O dependencies.

pub mod article;
pub mod auth;
pub mod error;
pub mod request;
pub mod response;

pub use article::{Article, ArticleId};
pub use auth::{AuthToken, Credentials, TokenRequest};
pub use error::{ArticlesError, DomainError, DomainResult, LoginError};
pub use request::{ApiBase, HttpMethod, HttpRequest, Resource};
pub use response::{HttpResponse, StatusCode};
