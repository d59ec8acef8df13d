//! General application configuration.

use pc_core::PromptChoice;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct GeneralConfig {
    /// Rendering copied when `--copy` is given without a value.
    #[serde(default)]
    pub default_copy: PromptChoice,
}
