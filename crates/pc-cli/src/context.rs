use std::time::Duration;

use anyhow::Context;
use pc_auth::{AuthApi, FileSessionStore};
use pc_client::{ProcessApi, PromptCrafterApi};
use pc_config::PcConfig;

/// Shared state for one command invocation.
///
/// A single `reqwest` client (with its cookie jar) backs every API binding so
/// session cookies set by one call are sent on the next.
pub struct AppContext {
    pub config: PcConfig,
    pub http: reqwest::Client,
    pub store: FileSessionStore,
}

impl AppContext {
    pub fn init(config: PcConfig) -> anyhow::Result<Self> {
        let http = pc_auth::http_client(Duration::from_secs(config.api.timeout_secs))
            .context("failed to build HTTP client")?;

        let session_path = config
            .auth
            .session_path()
            .context("home directory not found; set auth.session_file")?;
        tracing::debug!(path = %session_path.display(), "using session file");

        Ok(Self {
            config,
            http,
            store: FileSessionStore::new(session_path),
        })
    }

    pub fn auth_api(&self) -> AuthApi {
        AuthApi::new(self.http.clone(), self.config.api.api_root())
    }

    pub fn process_api(&self) -> ProcessApi {
        ProcessApi::new(self.http.clone(), self.config.api.api_root())
    }

    pub fn library_api(&self) -> PromptCrafterApi {
        PromptCrafterApi::new(self.http.clone(), self.config.api.base())
    }

    pub fn login_timeout(&self) -> Duration {
        Duration::from_secs(self.config.auth.login_timeout_secs)
    }
}
