use crate::cli::GlobalFlags;
use crate::cli::root_commands::Commands;
use crate::commands;
use crate::context::AppContext;

/// Dispatch a parsed command to the corresponding handler module.
pub async fn dispatch(command: Commands, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    match command {
        Commands::Whoami => commands::whoami::handle(ctx, flags).await,
        Commands::Login(args) => commands::login::handle(&args, ctx, flags).await,
        Commands::Logout => commands::logout::handle(ctx, flags).await,
        Commands::Process(args) => commands::process::handle(&args, ctx, flags).await,
        Commands::Prompt { action } => commands::prompt::handle(&action, ctx, flags).await,
    }
}
