//! Request-side types: resource descriptors, endpoints and the wire request.

mod endpoint;
mod method;
mod resource;
mod wire;

pub use endpoint::ApiBase;
pub use method::HttpMethod;
pub use resource::Resource;
pub use wire::{HttpRequest, header};
