use clap::Parser;
use pc_core::ApiVersion;

pub mod global;
pub mod root_commands;
pub mod subcommands;

pub use global::{GlobalFlags, OutputFormat};
pub use root_commands::Commands;

/// Top-level CLI parser for the `pcrafter` binary.
#[derive(Debug, Parser)]
#[command(name = "pcrafter", version, about = "PromptCrafter - structured prompt builder")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format: json, table, raw
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Quiet mode (suppress status messages)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose mode (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Backend base URL (overrides `api.base_url`)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// API version for the versioned routes: v1 or v1.1
    #[arg(long, global = true)]
    pub api_version: Option<ApiVersion>,
}

impl Cli {
    /// Extract ergonomic global flags struct for command handlers.
    #[must_use]
    pub fn global_flags(&self) -> GlobalFlags {
        GlobalFlags {
            format: self.format,
            quiet: self.quiet,
            api_url: self.api_url.clone(),
            api_version: self.api_version,
        }
    }
}
