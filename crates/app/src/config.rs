//! Application configuration.
//!
//! Sources, lowest priority first: built-in defaults, an optional TOML file
//! (`folio.toml`, or the path in `FOLIO_CONFIG`), then `FOLIO_*` environment
//! variables.

use std::path::{Path, PathBuf};
use std::time::Duration;

use config::{Config, Environment, File, FileFormat};
use folio_application::{DEFAULT_ACCOUNT, DEFAULT_SERVICE, StoreKey};
use folio_domain::{ApiBase, DomainError};
use serde::Deserialize;

/// Server used when nothing else is configured.
pub const DEFAULT_API_URL: &str = "https://mobilecodetest.fws.io";

/// Config file read from the working directory by default.
pub const DEFAULT_CONFIG_FILE: &str = "folio.toml";

/// Errors raised while loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A source could not be read or parsed.
    #[error("configuration could not be loaded: {0}")]
    Load(#[from] config::ConfigError),

    /// The API URL is unusable.
    #[error("invalid api_url: {0}")]
    ApiUrl(#[from] DomainError),
}

/// Settings of one run.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AppConfig {
    /// Base URL of the articles API.
    pub api_url: String,
    /// Image shown on the login screen; defaults to one served by the API.
    #[serde(default)]
    pub header_image_url: Option<String>,
    /// Location of the credential file.
    #[serde(default)]
    pub store_path: Option<PathBuf>,
    /// Store service the token is kept under.
    pub store_service: String,
    /// Store account the token is kept under.
    pub store_account: String,
    /// Per-request timeout; none when unset.
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
}

impl AppConfig {
    /// Loads from the default file location and the environment.
    ///
    /// # Errors
    ///
    /// Returns an error if a present source is malformed.
    pub fn load() -> Result<Self, ConfigError> {
        let file = std::env::var_os("FOLIO_CONFIG")
            .map_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE), PathBuf::from);
        Self::load_from(&file)
    }

    /// Loads from `file` (if it exists) and the environment.
    ///
    /// # Errors
    ///
    /// Returns an error if a present source is malformed.
    pub fn load_from(file: &Path) -> Result<Self, ConfigError> {
        let config = Config::builder()
            .set_default("api_url", DEFAULT_API_URL)?
            .set_default("store_service", DEFAULT_SERVICE)?
            .set_default("store_account", DEFAULT_ACCOUNT)?
            .add_source(File::from(file).format(FileFormat::Toml).required(false))
            .add_source(Environment::with_prefix("FOLIO").try_parsing(true))
            .build()?;

        let loaded: Self = config.try_deserialize()?;
        tracing::debug!(api_url = %loaded.api_url, file = %file.display(), "configuration loaded");
        Ok(loaded)
    }

    /// The validated API base.
    ///
    /// # Errors
    ///
    /// Returns an error if `api_url` is not an absolute http(s) URL.
    pub fn api_base(&self) -> Result<ApiBase, ConfigError> {
        Ok(ApiBase::parse(&self.api_url)?)
    }

    /// The login header image, falling back to the API's own.
    #[must_use]
    pub fn header_image_url(&self) -> String {
        self.header_image_url.clone().unwrap_or_else(|| {
            format!("{}/images/ipad.jpg", self.api_url.trim_end_matches('/'))
        })
    }

    /// The credential file, falling back to the user data directory.
    #[must_use]
    pub fn store_path(&self) -> PathBuf {
        self.store_path.clone().unwrap_or_else(|| {
            dirs::data_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("folio")
                .join("secure-store.json")
        })
    }

    /// Key of the token entry.
    #[must_use]
    pub fn store_key(&self) -> StoreKey {
        StoreKey::new(&self.store_service, &self.store_account)
    }

    /// The request timeout, if configured.
    #[must_use]
    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            header_image_url: None,
            store_path: None,
            store_service: DEFAULT_SERVICE.to_string(),
            store_account: DEFAULT_ACCOUNT.to_string(),
            request_timeout_secs: None,
        }
    }
}
