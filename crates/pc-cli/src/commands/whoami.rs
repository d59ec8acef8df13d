use pc_auth::{SessionStore, resolve_session};
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;
use crate::terminal::TerminalView;

#[derive(Serialize)]
struct WhoamiResponse {
    authenticated: bool,
    email: Option<String>,
    plan: Option<String>,
    expires_at: Option<String>,
    session_file: String,
    note: Option<String>,
}

pub async fn handle(ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let pending = ctx.store.load().map(|s| s.login_pending).unwrap_or(false);
    let api = ctx.auth_api();
    let mut view = TerminalView::new(flags.quiet);

    let session = resolve_session(&api, &ctx.store, &mut view).await;
    let session_file = ctx.store.path().display().to_string();

    let response = match session {
        Some(session) => WhoamiResponse {
            authenticated: true,
            expires_at: session
                .access_token
                .as_deref()
                .and_then(|token| pc_auth::token::decode_expiry(token).ok())
                .map(|exp| exp.to_rfc3339()),
            email: Some(session.email),
            plan: Some(session.plan),
            session_file,
            note: None,
        },
        None => WhoamiResponse {
            authenticated: false,
            email: None,
            plan: None,
            expires_at: None,
            session_file,
            note: Some(if pending {
                "a browser login was started but never completed".into()
            } else {
                "not logged in".into()
            }),
        },
    };

    output(&response, flags.format)
}
