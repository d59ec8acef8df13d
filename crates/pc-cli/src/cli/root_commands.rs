use clap::Subcommand;

use crate::cli::subcommands::{LoginArgs, ProcessArgs, PromptCommands};

/// Root command tree for the `pcrafter` binary.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Show who is logged in
    Whoami,
    /// Log in (Google in the browser by default)
    Login(LoginArgs),
    /// End the session and clear stored credentials
    Logout,
    /// Turn form fields into a structured and a natural prompt
    Process(ProcessArgs),
    /// Prompt library operations
    Prompt {
        #[command(subcommand)]
        action: PromptCommands,
    },
}
