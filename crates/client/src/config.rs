//! Client configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `DOGMATCH_API_BASE_URL` - Adoption service base URL
//!   (default: `https://frontend-take-home-service.fetch.com`)
//! - `DOGMATCH_DATA_DIR` - Directory holding persisted favorites (default: `.dogmatch`)

use std::path::PathBuf;

use thiserror::Error;
use url::Url;

use crate::api::DEFAULT_API_BASE_URL;

/// Default directory for the durable key-value store.
pub const DEFAULT_DATA_DIR: &str = ".dogmatch";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
    #[error("Invalid API base URL {0}: {1}")]
    InvalidBaseUrl(String, String),
}

/// Client configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Adoption service base URL
    pub api_base_url: Url,
    /// Directory of the favorites store
    pub data_dir: PathBuf,
}

impl ClientConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set but invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let raw_base_url = get_env_or_default("DOGMATCH_API_BASE_URL", DEFAULT_API_BASE_URL);
        let api_base_url = parse_base_url(&raw_base_url).map_err(|e| {
            ConfigError::InvalidEnvVar("DOGMATCH_API_BASE_URL".to_string(), e.to_string())
        })?;

        let data_dir = get_optional_env("DOGMATCH_DATA_DIR")
            .map_or_else(|| PathBuf::from(DEFAULT_DATA_DIR), PathBuf::from);

        if data_dir.as_os_str().is_empty() {
            return Err(ConfigError::InvalidEnvVar(
                "DOGMATCH_DATA_DIR".to_string(),
                "must not be empty".to_string(),
            ));
        }

        Ok(Self {
            api_base_url,
            data_dir,
        })
    }
}

/// Parse an adoption service base URL. Only `http` and `https` are accepted.
///
/// # Errors
///
/// Returns `ConfigError::InvalidBaseUrl` if the value is not an absolute
/// http(s) URL.
pub fn parse_base_url(raw: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(raw.trim())
        .map_err(|e| ConfigError::InvalidBaseUrl(raw.to_string(), e.to_string()))?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::InvalidBaseUrl(
            raw.to_string(),
            format!("unsupported scheme {}", url.scheme()),
        ));
    }

    Ok(url)
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
