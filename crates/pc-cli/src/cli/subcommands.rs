use clap::{Args, Subcommand};
use pc_core::PromptChoice;
use pc_core::prompt::parse_field_assignment;

/// Arguments for `pcrafter login`.
#[derive(Clone, Debug, Args)]
pub struct LoginArgs {
    /// Log in with email and password instead of the browser
    #[arg(long, requires = "email")]
    pub password: bool,

    /// Account email for password login
    #[arg(long, requires = "password")]
    pub email: Option<String>,
}

/// Arguments for `pcrafter process`.
#[derive(Clone, Debug, Args)]
pub struct ProcessArgs {
    /// What the prompt should accomplish (required by the backend)
    #[arg(long)]
    pub task: Option<String>,

    /// Persona the model should adopt
    #[arg(long)]
    pub role: Option<String>,

    #[arg(long)]
    pub title: Option<String>,

    #[arg(long)]
    pub constraints: Option<String>,

    /// Desired output format
    #[arg(long)]
    pub output: Option<String>,

    #[arg(long)]
    pub personality: Option<String>,

    /// Comma-separated tags
    #[arg(long)]
    pub tags: Option<String>,

    /// Extra form field as key=value (repeatable)
    #[arg(long = "field", value_parser = parse_field_assignment)]
    pub fields: Vec<(String, String)>,

    /// Copy the result to the clipboard: structured or natural
    #[arg(long, num_args = 0..=1)]
    pub copy: Option<Option<PromptChoice>>,
}

/// Arguments for `pcrafter prompt generate`.
#[derive(Clone, Debug, Args)]
pub struct GenerateArgs {
    #[arg(long, default_value = "")]
    pub role: String,

    #[arg(long, default_value = "")]
    pub task: String,

    #[arg(long, default_value = "")]
    pub constraints: String,

    #[arg(long, default_value = "")]
    pub output: String,

    #[arg(long, default_value = "")]
    pub personality: String,
}

/// Arguments for `pcrafter prompt save`.
#[derive(Clone, Debug, Args)]
pub struct SaveArgs {
    #[arg(long)]
    pub title: String,

    /// Additional form field as key=value (repeatable)
    #[arg(long = "field", value_parser = parse_field_assignment)]
    pub fields: Vec<(String, String)>,
}

/// Exactly one of `--public` / `--private`.
#[derive(Clone, Debug, Args)]
#[group(required = true, multiple = false)]
pub struct Visibility {
    /// Make the prompt visible to everyone
    #[arg(long)]
    pub public: bool,

    /// Make the prompt visible only to its owner
    #[arg(long)]
    pub private: bool,
}

/// Prompt library subcommands.
#[derive(Clone, Debug, Subcommand)]
pub enum PromptCommands {
    /// Generate a prompt without saving it
    Generate(GenerateArgs),
    /// Save a prompt to the library
    Save(SaveArgs),
    /// Make a saved prompt public or private
    Toggle {
        id: i64,

        #[command(flatten)]
        visibility: Visibility,
    },
    /// Delete a saved prompt
    Delete { id: i64 },
}
