//! Application use cases.
//!
//! Use cases are the single boundary where transport failures become domain
//! errors. Each one is a trait with a single concrete implementation so the
//! presentation layer can substitute them.

mod articles;
mod load_image;
mod login;

pub use articles::{ArticlesUseCase, FetchArticles};
pub use load_image::{ImageData, LoadImage, LoadImageUseCase, no_image};
pub use login::{LoginUseCase, RequestToken};
