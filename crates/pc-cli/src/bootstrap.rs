use anyhow::Context;
use pc_config::PcConfig;

use crate::cli::GlobalFlags;

/// Load `.env`, the layered config, then apply `--api-url`/`--api-version`.
pub fn load_config(flags: &GlobalFlags) -> anyhow::Result<PcConfig> {
    let config = PcConfig::load_with_dotenv().context("failed to load pcrafter configuration")?;
    apply_overrides(config, flags)
}

fn apply_overrides(mut config: PcConfig, flags: &GlobalFlags) -> anyhow::Result<PcConfig> {
    if let Some(url) = &flags.api_url {
        config.api.base_url.clone_from(url);
    }
    if let Some(version) = flags.api_version {
        config.api.version = version;
    }
    config
        .api
        .validate()
        .context("invalid --api-url / --api-version override")?;
    Ok(config)
}
