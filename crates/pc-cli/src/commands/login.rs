use std::io::{BufRead, Write};

use anyhow::Context;
use pc_auth::browser_flow::SystemBrowser;
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::LoginArgs;
use crate::context::AppContext;
use crate::output::output;
use crate::terminal::TerminalView;

/// Read by password login before falling back to a stdin prompt.
const PASSWORD_ENV: &str = "PCRAFTER_PASSWORD";

#[derive(Serialize)]
struct LoginResponse {
    authenticated: bool,
    method: &'static str,
    email: String,
    plan: String,
    expires_at: Option<String>,
}

pub async fn handle(args: &LoginArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let api = ctx.auth_api();
    let mut view = TerminalView::new(flags.quiet);

    let (method, session) = match (args.password, args.email.as_deref()) {
        (true, Some(email)) => {
            let password = read_password()?;
            let session = pc_auth::password::login(&api, &ctx.store, &mut view, email, &password)
                .await
                .context("password login failed")?;
            ("password", session)
        }
        _ => {
            let session = pc_auth::browser_flow::login(
                &api,
                &ctx.store,
                &mut view,
                &mut SystemBrowser,
                ctx.login_timeout(),
            )
            .await
            .context("browser login failed")?;
            ("google", session)
        }
    };

    output(
        &LoginResponse {
            authenticated: true,
            method,
            expires_at: session
                .access_token
                .as_deref()
                .and_then(|token| pc_auth::token::decode_expiry(token).ok())
                .map(|exp| exp.to_rfc3339()),
            email: session.email,
            plan: session.plan,
        },
        flags.format,
    )
}

fn read_password() -> anyhow::Result<String> {
    if let Ok(password) = std::env::var(PASSWORD_ENV) {
        return Ok(password);
    }

    eprint!("Password: ");
    std::io::stderr().flush().context("failed to flush prompt")?;

    let mut line = String::new();
    std::io::stdin()
        .lock()
        .read_line(&mut line)
        .context("failed to read password from stdin")?;

    let password = line.trim_end_matches(['\r', '\n']).to_string();
    if password.is_empty() {
        anyhow::bail!("no password given (set {PASSWORD_ENV} or type it at the prompt)");
    }
    Ok(password)
}
