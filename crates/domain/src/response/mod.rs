//! Response-side types.

mod types;

pub use types::{HttpResponse, StatusCode};
