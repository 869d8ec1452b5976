//! Front-end configuration loaded via OrthoConfig.

use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;
use thiserror::Error;
use url::Url;

const DEFAULT_API_BASE_URL: &str = "http://localhost:5000";
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Errors raised while validating settings.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// The base URL did not parse.
    #[error("api base url '{url}' is invalid: {reason}")]
    InvalidBaseUrl {
        /// Configured value.
        url: String,
        /// Parser message.
        reason: String,
    },
    /// The base URL is not http(s).
    #[error("api base url must use http or https, got '{scheme}'")]
    UnsupportedScheme {
        /// Scheme that was supplied.
        scheme: String,
    },
}

/// Settings for the Codefolio front end.
///
/// Read from `CODEFOLIO_*` environment variables and OrthoConfig's usual
/// configuration files.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "CODEFOLIO")]
pub struct FrontendSettings {
    /// Base URL of the Codefolio REST API.
    pub api_base_url: Option<String>,
    /// Per-request timeout in seconds.
    pub request_timeout_secs: Option<u64>,
    /// Emit JSON log lines instead of plain text.
    #[ortho_config(default = false)]
    pub json_logs: bool,
}

impl FrontendSettings {
    /// Validated API base URL, falling back to the local development server.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the value does not parse or is not an
    /// http(s) URL.
    pub fn api_base_url(&self) -> Result<Url, ConfigError> {
        let raw = self.api_base_url.as_deref().unwrap_or(DEFAULT_API_BASE_URL);
        let url = Url::parse(raw).map_err(|error| ConfigError::InvalidBaseUrl {
            url: raw.to_owned(),
            reason: error.to_string(),
        })?;
        match url.scheme() {
            "http" | "https" => Ok(url),
            other => Err(ConfigError::UnsupportedScheme {
                scheme: other.to_owned(),
            }),
        }
    }

    /// Request timeout, never shorter than one second.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(
            self.request_timeout_secs
                .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS)
                .max(1),
        )
    }
}
