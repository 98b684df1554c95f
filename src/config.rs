//! Uploader configuration.
//!
//! Precedence: defaults < config.toml < `WEBHOOK_UPLOADER_ENDPOINT`.

use crate::upload::UploadTiming;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info};
use url::Url;

pub const DEFAULT_ENDPOINT: &str = "http://localhost:5678/webhook-test/upload";
pub const ENDPOINT_ENV_VAR: &str = "WEBHOOK_UPLOADER_ENDPOINT";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("Invalid webhook endpoint '{0}': expected an http or https URL")]
    InvalidEndpoint(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UploaderConfig {
    pub endpoint: String,
    pub settle_delay_ms: u64,
    pub success_reset_ms: u64,
    pub error_reset_ms: u64,
    pub request_timeout_secs: Option<u64>,
}

impl Default for UploaderConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            settle_delay_ms: 1000,
            success_reset_ms: 5000,
            error_reset_ms: 10000,
            request_timeout_secs: None,
        }
    }
}

pub fn config_path() -> PathBuf {
    dirs::config_dir()
        .map(|dir| dir.join("webhook-uploader").join("config.toml"))
        .unwrap_or_else(|| PathBuf::from("webhook-uploader.toml"))
}

impl UploaderConfig {
    /// Loads the platform config file, then applies the environment override.
    pub fn load() -> Result<Self, ConfigError> {
        let endpoint_override = std::env::var(ENDPOINT_ENV_VAR).ok();
        Self::load_from(&config_path(), endpoint_override)
    }

    pub fn load_from(path: &Path, endpoint_override: Option<String>) -> Result<Self, ConfigError> {
        let mut config = if path.exists() {
            info!("Loading config from {}", path.display());
            let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
                path: path.to_path_buf(),
                source,
            })?;
            toml::from_str(&content).map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })?
        } else {
            debug!("No config file at {}, using defaults", path.display());
            UploaderConfig::default()
        };

        if let Some(endpoint) = endpoint_override.filter(|e| !e.trim().is_empty()) {
            debug!("Endpoint overridden by {}", ENDPOINT_ENV_VAR);
            config.endpoint = endpoint.trim().to_string();
        }

        config.endpoint_url()?;
        Ok(config)
    }

    pub fn endpoint_url(&self) -> Result<Url, ConfigError> {
        let url = Url::parse(&self.endpoint)
            .map_err(|_| ConfigError::InvalidEndpoint(self.endpoint.clone()))?;
        match url.scheme() {
            "http" | "https" => Ok(url),
            _ => Err(ConfigError::InvalidEndpoint(self.endpoint.clone())),
        }
    }

    pub fn timing(&self) -> UploadTiming {
        UploadTiming {
            settle_delay: Duration::from_millis(self.settle_delay_ms),
            success_reset: Duration::from_millis(self.success_reset_ms),
            error_reset: Duration::from_millis(self.error_reset_ms),
        }
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }
}
