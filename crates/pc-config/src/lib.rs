//! # pc-config
//!
//! Layered configuration loading for the PromptCrafter client using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`PCRAFTER_*` prefix, `__` as separator)
//! 2. Project-level `.promptcrafter/config.toml`
//! 3. User-level `~/.config/promptcrafter/config.toml`
//! 4. Built-in defaults
//!
//! Figment maps `PCRAFTER_API__BASE_URL` -> `api.base_url`,
//! `PCRAFTER_AUTH__LOGIN_TIMEOUT_SECS` -> `auth.login_timeout_secs`, etc.
//!
//! ```no_run
//! use pc_config::PcConfig;
//!
//! let config = PcConfig::load_with_dotenv().expect("config");
//! println!("API root: {}", config.api.api_root());
//! ```

mod api;
mod auth;
mod error;
mod general;

pub use api::ApiConfig;
pub use auth::AuthConfig;
pub use error::ConfigError;
pub use general::GeneralConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Prefix for environment overrides.
pub const ENV_PREFIX: &str = "PCRAFTER_";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct PcConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub auth: AuthConfig,
    #[serde(default)]
    pub general: GeneralConfig,
}

impl PcConfig {
    /// Load configuration from TOML files and environment variables.
    ///
    /// Does NOT call `dotenvy` -- use [`Self::load_with_dotenv`] for `.env` loading.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if a source fails to parse or a value is invalid.
    pub fn load() -> Result<Self, ConfigError> {
        let config: Self = Self::figment().extract()?;
        config.api.validate()?;
        Ok(config)
    }

    /// Load `.env` from the current directory, then [`Self::load`].
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if a source fails to parse or a value is invalid.
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::load()
    }

    /// Build the figment provider chain.
    ///
    /// Public so tests can inspect the figment or layer extra providers.
    #[must_use]
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        let local_path = PathBuf::from(".promptcrafter/config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        figment.merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("promptcrafter").join("config.toml"))
    }
}
