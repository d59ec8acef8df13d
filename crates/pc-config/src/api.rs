//! Backend API endpoint configuration.

use pc_core::ApiVersion;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

fn default_base_url() -> String {
    "http://localhost:8000".to_string()
}

const fn default_timeout_secs() -> u64 {
    30
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiConfig {
    /// Scheme and host of the PromptCrafter backend, without the `/api/..` suffix.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// API revision the versioned routes are mounted under.
    #[serde(default)]
    pub version: ApiVersion,

    /// Per-request timeout.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            version: ApiVersion::default(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl ApiConfig {
    /// Versioned API root, e.g. `http://localhost:8000/api/v1.1`.
    #[must_use]
    pub fn api_root(&self) -> String {
        self.version.api_root(&self.base_url)
    }

    /// Base URL without a trailing slash, for unversioned routes.
    #[must_use]
    pub fn base(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }

    /// Reject values that cannot produce a usable URL.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] when the base URL has no
    /// `http(s)://` scheme or the timeout is zero.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            return Err(ConfigError::InvalidValue {
                field: "api.base_url".into(),
                reason: format!("'{}' must start with http:// or https://", self.base_url),
            });
        }
        if self.timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "api.timeout_secs".into(),
                reason: "must be greater than zero".into(),
            });
        }
        Ok(())
    }
}
