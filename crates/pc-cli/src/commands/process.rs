use pc_client::form::REJECTED;
use pc_client::{CopyOutcome, PromptForm, SubmitOutcome};
use pc_core::{PromptChoice, PromptRequest};
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::ProcessArgs;
use crate::context::AppContext;
use crate::output::output;
use crate::terminal::{SystemClipboard, TerminalView};

#[derive(Serialize)]
struct ProcessResponse {
    structured: String,
    natural: String,
    copied: Option<PromptChoice>,
}

pub async fn handle(args: &ProcessArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let request = build_request(args);
    let mut view = TerminalView::new(flags.quiet);
    let mut form = PromptForm::new(ctx.process_api())
        .with_bearer(pc_auth::stored_access_token(&ctx.store));

    let result = match form.submit(&request, &mut view).await {
        SubmitOutcome::Rendered(result) => result,
        SubmitOutcome::Skipped => anyhow::bail!("a non-empty --task is required"),
        SubmitOutcome::RateLimited { detail } => anyhow::bail!("rate limited: {detail}"),
        SubmitOutcome::Rejected { status } => anyhow::bail!("{REJECTED} (HTTP {status})"),
        SubmitOutcome::Failed { message } => anyhow::bail!(message),
    };

    let copied = match args.copy {
        None => None,
        Some(choice) => {
            let choice = choice.unwrap_or(ctx.config.general.default_copy);
            match form.copy(choice, &mut SystemClipboard, &mut view) {
                CopyOutcome::Copied(choice) => Some(choice),
                CopyOutcome::NothingToCopy | CopyOutcome::Failed(_) => None,
            }
        }
    };

    output(
        &ProcessResponse {
            structured: result.structured,
            natural: result.natural,
            copied,
        },
        flags.format,
    )
}

/// Named flags first, then `--field` assignments, so a repeated key takes
/// the `--field` value.
fn build_request(args: &ProcessArgs) -> PromptRequest {
    let named = [
        ("role", &args.role),
        ("title", &args.title),
        ("task", &args.task),
        ("constraints", &args.constraints),
        ("output", &args.output),
        ("personality", &args.personality),
        ("tags", &args.tags),
    ];

    let named = named
        .into_iter()
        .filter_map(|(key, value)| value.as_deref().map(|v| (key.to_string(), v.to_string())));

    PromptRequest::from_fields(named.chain(args.fields.iter().cloned()))
}
