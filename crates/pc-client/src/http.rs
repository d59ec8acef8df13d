//! Shared HTTP response helpers.
//!
//! Centralizes status-code checks (429 with the backend's `detail` text,
//! other non-success statuses with the server's error text or a
//! per-endpoint fallback) so endpoint code stays focused on request shape.

use serde_json::Value;

use crate::error::ClientError;

/// Shown in the login modal when a 429 carries no `detail`.
pub const DEFAULT_RATE_LIMIT_DETAIL: &str = "Too many requests. Log in to keep crafting prompts.";

/// Check a response, mapping failures onto [`ClientError`].
///
/// - **429** → [`ClientError::RateLimited`] with the body's `detail`.
/// - **Non-success** → [`ClientError::Api`] with the body's `error` text,
///   falling back to `fallback`.
pub async fn check_response(
    resp: reqwest::Response,
    fallback: &str,
) -> Result<reqwest::Response, ClientError> {
    let status = resp.status();
    if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
        let body = resp.text().await.unwrap_or_default();
        return Err(ClientError::RateLimited {
            detail: field(&body, &["detail"])
                .unwrap_or_else(|| DEFAULT_RATE_LIMIT_DETAIL.to_string()),
        });
    }
    if !status.is_success() {
        let body = resp.text().await.unwrap_or_default();
        return Err(ClientError::Api {
            status: status.as_u16(),
            message: field(&body, &["error"]).unwrap_or_else(|| fallback.to_string()),
        });
    }
    Ok(resp)
}

/// First string-valued `keys` entry of a JSON object body.
fn field(body: &str, keys: &[&str]) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    keys.iter().find_map(|key| {
        value
            .get(*key)
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
            .map(String::from)
    })
}
