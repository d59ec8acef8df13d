use pc_core::Session;

use crate::api::{AuthApi, TokenPair};
use crate::error::AuthError;
use crate::store::SessionStore;
use crate::view::SessionView;

const HTML_DONE: &str =
    "<html><body><h1>Signed in to PromptCrafter</h1><p>You can close this tab.</p></body></html>";
const HTML_STATE_MISMATCH: &str = "<html><body><h1>Login failed</h1><p>State mismatch. Check CLI output.</p></body></html>";
const HTML_WAITING: &str =
    "<html><body><h1>Waiting for login…</h1><p>Redirecting, please wait.</p></body></html>";

/// How the login URL reaches the user.
pub trait BrowserLauncher: Send {
    /// Present `url` to the user. Failure is reported, not fatal.
    ///
    /// # Errors
    ///
    /// Returns a description of why the URL could not be opened.
    fn launch(&mut self, url: &str) -> Result<(), String>;
}

/// Opens the system browser via `open`.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemBrowser;

impl BrowserLauncher for SystemBrowser {
    fn launch(&mut self, url: &str) -> Result<(), String> {
        eprintln!("Opening browser to: {url}");
        open::that(url).map_err(|e| e.to_string())
    }
}

/// Google OAuth login through a loopback callback.
///
/// 1. Bind `tiny_http` on `127.0.0.1:0`
/// 2. Mark `login_pending` in storage
/// 3. Open `{api}/login/google` with the loopback redirect and a CSRF state
/// 4. Wait (in `spawn_blocking`) for `/callback?access_token=..&state=..`
/// 5. Store the tokens, clear `login_pending`, resolve the session
///
/// # Errors
///
/// Returns `AuthError::BrowserFlowFailed` if the server cannot bind, the
/// callback times out or carries a mismatched state, and
/// `AuthError::NotAuthenticated` if the received token does not resolve to a
/// user.
pub async fn login(
    api: &AuthApi,
    store: &dyn SessionStore,
    view: &mut dyn SessionView,
    launcher: &mut dyn BrowserLauncher,
    timeout: std::time::Duration,
) -> Result<Session, AuthError> {
    let server = tiny_http::Server::http("127.0.0.1:0")
        .map_err(|e| AuthError::BrowserFlowFailed(format!("failed to bind: {e}")))?;
    let port = server
        .server_addr()
        .to_ip()
        .map(|a| a.port())
        .ok_or_else(|| AuthError::BrowserFlowFailed("no port".into()))?;

    let state = new_state_nonce()?;
    let redirect_uri = format!("http://127.0.0.1:{port}/callback");
    let login_url = api.google_login_url(&redirect_uri, &state);

    store.update(&mut |s| s.login_pending = true)?;

    if let Err(error) = launcher.launch(&login_url) {
        eprintln!("Failed to open browser: {error}");
        eprintln!("Open this URL manually, then return here: {login_url}");
    }

    let waited = tokio::task::spawn_blocking(move || wait_for_callback(&server, timeout, &state))
        .await
        .map_err(|e| AuthError::BrowserFlowFailed(format!("spawn_blocking join: {e}")));

    let tokens = match waited {
        Ok(Ok(tokens)) => tokens,
        Ok(Err(error)) | Err(error) => {
            clear_pending(store);
            return Err(error);
        }
    };

    store.update(&mut |s| {
        s.access_token = Some(tokens.access_token.clone());
        if tokens.refresh_token.is_some() {
            s.refresh_token.clone_from(&tokens.refresh_token);
        }
        s.login_pending = false;
    })?;

    crate::resolver::resolve_session(api, store, view)
        .await
        .ok_or(AuthError::NotAuthenticated)
}

fn clear_pending(store: &dyn SessionStore) {
    if let Err(error) = store.update(&mut |s| s.login_pending = false) {
        tracing::warn!(%error, "failed to clear login_pending");
    }
}

/// Random 16-byte hex nonce for the OAuth `state` parameter.
fn new_state_nonce() -> Result<String, AuthError> {
    let mut nonce_bytes = [0u8; 16];
    getrandom::fill(&mut nonce_bytes)
        .map_err(|e| AuthError::BrowserFlowFailed(format!("failed to generate state: {e}")))?;
    Ok(nonce_bytes.iter().map(|b| format!("{b:02x}")).collect())
}

/// Tokens and state pulled from a callback query string.
#[derive(Debug, Default, PartialEq, Eq)]
struct CallbackParams {
    access_token: Option<String>,
    refresh_token: Option<String>,
    state: Option<String>,
}

fn parse_callback_query(query: &str) -> Result<CallbackParams, AuthError> {
    let mut params = CallbackParams::default();
    for pair in query.split('&') {
        let Some((key, value)) = pair.split_once('=') else {
            continue;
        };
        let decoded = urlencoding::decode(value)
            .map_err(|e| AuthError::BrowserFlowFailed(format!("URL decode: {e}")))?
            .into_owned();
        match key {
            "access_token" | "token" => params.access_token = Some(decoded),
            "refresh_token" => params.refresh_token = Some(decoded),
            "state" => params.state = Some(decoded),
            _ => {}
        }
    }
    Ok(params)
}

fn html(body: &str) -> tiny_http::Response<std::io::Cursor<Vec<u8>>> {
    let response = tiny_http::Response::from_string(body);
    match tiny_http::Header::from_bytes("Content-Type", "text/html; charset=utf-8") {
        Ok(header) => response.with_header(header),
        Err(()) => response,
    }
}

/// Block until the loopback server receives the OAuth callback.
///
/// Requests that are not `/callback?..` (favicon, preflight) get a 204, and
/// callbacks without a token are intermediate redirects: answer and keep
/// waiting.
fn wait_for_callback(
    server: &tiny_http::Server,
    timeout: std::time::Duration,
    expected_state: &str,
) -> Result<TokenPair, AuthError> {
    let deadline = std::time::Instant::now() + timeout;
    let timed_out = || {
        AuthError::BrowserFlowFailed(format!(
            "browser callback timed out after {}s",
            timeout.as_secs()
        ))
    };

    loop {
        let remaining = deadline.saturating_duration_since(std::time::Instant::now());
        if remaining.is_zero() {
            return Err(timed_out());
        }

        let request = match server.recv_timeout(remaining) {
            Ok(Some(req)) => req,
            Ok(None) => return Err(timed_out()),
            Err(e) => return Err(AuthError::BrowserFlowFailed(format!("recv error: {e}"))),
        };

        let url = request.url().to_string();
        let Some(query) = url.strip_prefix("/callback?") else {
            let _ = request.respond(tiny_http::Response::from_string("").with_status_code(204));
            continue;
        };

        let params = parse_callback_query(query)?;
        let Some(access_token) = params.access_token else {
            let _ = request.respond(html(HTML_WAITING));
            continue;
        };

        if params.state.as_deref() != Some(expected_state) {
            let _ = request.respond(html(HTML_STATE_MISMATCH).with_status_code(400));
            return Err(AuthError::BrowserFlowFailed(
                "state mismatch (possible CSRF)".into(),
            ));
        }

        let _ = request.respond(html(HTML_DONE));
        return Ok(TokenPair {
            access_token,
            refresh_token: params.refresh_token,
        });
    }
}
