//! Folio Application - Use cases and ports
//!
//! This crate defines the application layer with:
//! - Port traits (interfaces for external dependencies)
//! - The typed resource client and its failure classification
//! - The authentication session
//! - Use case orchestration and the transport-to-domain error boundary

pub mod auth;
pub mod error;
pub mod ports;
pub mod resource_client;
pub mod use_cases;

#[cfg(test)]
pub(crate) mod testing;

pub use auth::{AuthSession, DEFAULT_ACCOUNT, DEFAULT_SERVICE, SecureEntry, Session};
pub use error::TransportError;
pub use ports::{
    HttpClient, HttpClientError, ImageLoader, SecureStore, SecureStoreError, StoreKey,
};
pub use resource_client::ResourceClient;
pub use use_cases::{
    ArticlesUseCase, FetchArticles, ImageData, LoadImage, LoadImageUseCase, LoginUseCase,
    RequestToken, no_image,
};
