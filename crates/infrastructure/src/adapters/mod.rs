//! Network adapters.

mod image_loader;
mod reqwest_client;

pub use image_loader::ReqwestImageLoader;
pub use reqwest_client::ReqwestHttpClient;
