//! Login flow and session storage configuration.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

const fn default_login_timeout_secs() -> u64 {
    120
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AuthConfig {
    /// How long the browser login waits for the OAuth callback.
    #[serde(default = "default_login_timeout_secs")]
    pub login_timeout_secs: u64,

    /// Override for the session file. Empty means `~/.promptcrafter/session.json`.
    #[serde(default)]
    pub session_file: String,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            login_timeout_secs: default_login_timeout_secs(),
            session_file: String::new(),
        }
    }
}

impl AuthConfig {
    /// Resolve the session file path, or `None` if no home directory exists.
    #[must_use]
    pub fn session_path(&self) -> Option<PathBuf> {
        if !self.session_file.is_empty() {
            return Some(PathBuf::from(&self.session_file));
        }
        dirs::home_dir().map(|home| home.join(".promptcrafter").join("session.json"))
    }
}
