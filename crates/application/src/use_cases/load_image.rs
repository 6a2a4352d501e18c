//! Image loading side channel.
//!
//! An image is exposed as a lazily started shared future. Handles for the
//! same URL share one fetch while any of them is alive.

use std::collections::HashMap;
use std::sync::Arc;

use bytes::Bytes;
use futures::future::{BoxFuture, Shared, WeakShared};
use futures::{FutureExt, future};
use parking_lot::Mutex;
use url::Url;

use crate::ports::ImageLoader;

/// Shared handle to image bytes; `None` means no image.
pub type ImageData = Shared<BoxFuture<'static, Option<Bytes>>>;

/// A handle that resolves to no image at once.
#[must_use]
pub fn no_image() -> ImageData {
    future::ready(None).boxed().shared()
}

/// Best-effort image fetching.
pub trait LoadImageUseCase: Send + Sync {
    /// Returns a handle for `url`. Nothing is fetched until it is polled.
    ///
    /// Missing or unparsable URLs and fetch failures all resolve to `None`.
    fn load_image(&self, url: Option<&str>) -> ImageData;
}

/// [`LoadImageUseCase`] over an [`ImageLoader`], deduplicating by URL.
pub struct LoadImage {
    loader: Arc<dyn ImageLoader>,
    in_flight: Mutex<HashMap<String, WeakShared<BoxFuture<'static, Option<Bytes>>>>>,
}

impl LoadImage {
    /// Creates the use case.
    #[must_use]
    pub fn new(loader: Arc<dyn ImageLoader>) -> Self {
        Self {
            loader,
            in_flight: Mutex::new(HashMap::new()),
        }
    }
}

impl LoadImageUseCase for LoadImage {
    fn load_image(&self, url: Option<&str>) -> ImageData {
        let Some(raw) = url.filter(|u| !u.is_empty()) else {
            return no_image();
        };
        let parsed = match Url::parse(raw) {
            Ok(parsed) => parsed,
            Err(error) => {
                tracing::debug!(url = raw, %error, "image url rejected");
                return no_image();
            }
        };

        let mut in_flight = self.in_flight.lock();
        in_flight.retain(|_, handle| handle.upgrade().is_some());
        if let Some(existing) = in_flight.get(raw).and_then(WeakShared::upgrade) {
            return existing;
        }

        let loader = Arc::clone(&self.loader);
        let fetch = async move {
            match loader.load(&parsed).await {
                Ok(bytes) => Some(bytes),
                Err(error) => {
                    tracing::debug!(url = %parsed, %error, "image fetch failed");
                    None
                }
            }
        }
        .boxed()
        .shared();

        if let Some(handle) = fetch.downgrade() {
            in_flight.insert(raw.to_string(), handle);
        }
        fetch
    }
}
