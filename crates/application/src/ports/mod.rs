//! Port definitions (interfaces)
//!
//! Ports define the boundaries between the application core and external systems.
//! Each port is a trait that can be implemented by adapters in the infrastructure layer.

mod http_client;
mod image_loader;
mod secure_store;

pub use http_client::{HttpClient, HttpClientError};
pub use image_loader::ImageLoader;
pub use secure_store::{SecureStore, SecureStoreError, StoreKey};
