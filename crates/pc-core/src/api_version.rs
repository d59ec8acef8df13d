use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

/// Backend API revision.
///
/// The backend mounts its routers under `/api/{version}`; both revisions are
/// live, so the version is an explicit setting rather than a hardcoded path.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ApiVersion {
    #[serde(rename = "v1")]
    V1,
    #[default]
    #[serde(rename = "v1.1")]
    V1_1,
}

impl ApiVersion {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::V1 => "v1",
            Self::V1_1 => "v1.1",
        }
    }

    /// Join a base URL and this version into the versioned API root,
    /// e.g. `http://localhost:8000` → `http://localhost:8000/api/v1.1`.
    #[must_use]
    pub fn api_root(self, base_url: &str) -> String {
        format!("{}/api/{}", base_url.trim_end_matches('/'), self.as_str())
    }
}

impl fmt::Display for ApiVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ApiVersion {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().trim_start_matches('/') {
            "v1" | "1" => Ok(Self::V1),
            "v1.1" | "1.1" => Ok(Self::V1_1),
            other => Err(CoreError::UnsupportedApiVersion(other.to_string())),
        }
    }
}
