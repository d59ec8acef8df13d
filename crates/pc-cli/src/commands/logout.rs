use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;
use crate::terminal::TerminalView;

#[derive(Serialize)]
struct LogoutResponse {
    cleared: bool,
    server_acknowledged: bool,
}

pub async fn handle(ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let api = ctx.auth_api();
    let mut view = TerminalView::new(flags.quiet);
    let server_acknowledged = pc_auth::logout::logout(&api, &ctx.store, &mut view).await?;
    output(
        &LogoutResponse {
            cleared: true,
            server_acknowledged,
        },
        flags.format,
    )
}
