use anyhow::Context;
use pc_client::{GenerateRequest, SavePromptForm};

use crate::cli::GlobalFlags;
use crate::cli::subcommands::{GenerateArgs, PromptCommands, SaveArgs};
use crate::context::AppContext;
use crate::output::output;

/// Handle `pcrafter prompt <subcommand>`.
pub async fn handle(action: &PromptCommands, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let api = ctx.library_api();

    match action {
        PromptCommands::Generate(args) => {
            let generated = api
                .generate_prompt(&generate_request(args))
                .await
                .context("prompt generate failed")?;
            output(&generated, flags.format)
        }
        PromptCommands::Save(args) => {
            let saved = api
                .save_prompt(&save_form(args))
                .await
                .context("prompt save failed")?;
            output(&saved, flags.format)
        }
        PromptCommands::Toggle { id, visibility } => {
            let toggled = api
                .toggle_public(*id, visibility.public)
                .await
                .context("prompt toggle failed")?;
            output(&toggled, flags.format)
        }
        PromptCommands::Delete { id } => {
            let deleted = api
                .delete_prompt(*id)
                .await
                .context("prompt delete failed")?;
            output(&deleted, flags.format)
        }
    }
}

fn generate_request(args: &GenerateArgs) -> GenerateRequest {
    GenerateRequest {
        role: args.role.clone(),
        task: args.task.clone(),
        constraints: args.constraints.clone(),
        output: args.output.clone(),
        personality: args.personality.clone(),
    }
}

fn save_form(args: &SaveArgs) -> SavePromptForm {
    args.fields
        .iter()
        .fold(SavePromptForm::new().field("title", &args.title), |form, (key, value)| {
            form.field(key, value)
        })
}
