//! Authentication domain types

mod types;

pub use types::{AuthToken, Credentials, GRANT_TYPE_PASSWORD, TokenRequest};
