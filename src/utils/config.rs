//! Application configuration

use crate::utils::error::{FetchError, Result};
use crate::utils::paths::get_downloads_dir;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;

/// Metadata endpoint used when nothing else is configured
pub const DEFAULT_API_ENDPOINT: &str = "https://www.clipto.com/api/youtube";

/// Application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    /// Download location
    pub download_location: PathBuf,

    /// Metadata API endpoint (POST target)
    pub api_endpoint: String,

    /// User-Agent header sent on both requests
    pub user_agent: String,

    /// Timeout for the metadata request, in seconds
    pub metadata_timeout_secs: u64,

    /// Skip TLS certificate verification on outbound requests
    pub accept_invalid_certs: bool,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            download_location: get_downloads_dir(),
            api_endpoint: DEFAULT_API_ENDPOINT.to_string(),
            user_agent: format!("clipfetch/{}", env!("CARGO_PKG_VERSION")),
            metadata_timeout_secs: 30,
            accept_invalid_certs: false,
        }
    }
}

impl AppSettings {
    /// Load settings from a JSON file; keys absent from the file keep their defaults
    pub fn load(path: &Path) -> Result<Self> {
        debug!("Loading settings from {:?}", path);
        let raw = std::fs::read_to_string(path).map_err(|e| {
            FetchError::StorageError(format!("failed to read config {}: {}", path.display(), e))
        })?;
        let settings: AppSettings = serde_json::from_str(&raw).map_err(|e| {
            FetchError::InvalidInput(format!("invalid config {}: {}", path.display(), e))
        })?;
        settings.validate()?;
        Ok(settings)
    }

    /// Reject settings no client could run with
    pub fn validate(&self) -> Result<()> {
        if self.api_endpoint.trim().is_empty() {
            return Err(FetchError::InvalidInput("api_endpoint is empty".to_string()));
        }
        reqwest::Url::parse(&self.api_endpoint).map_err(|e| {
            FetchError::InvalidInput(format!("api_endpoint {:?}: {}", self.api_endpoint, e))
        })?;
        if self.metadata_timeout_secs == 0 {
            return Err(FetchError::InvalidInput(
                "metadata_timeout_secs must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    pub fn metadata_timeout(&self) -> Duration {
        Duration::from_secs(self.metadata_timeout_secs)
    }
}
