//! HTTP binding for the backend's `/user/*` and `/login/*` routes.

use std::time::Duration;

use pc_core::Session;
use serde::Deserialize;

use crate::error::AuthError;

/// Tokens returned by `/user/refresh` and `/user/login`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TokenPair {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
}

/// Successful `/user/login` response.
#[derive(Debug, Clone)]
pub struct LoginGrant {
    pub tokens: TokenPair,
    pub user: Option<Session>,
}

/// Build the HTTP client shared by every PromptCrafter call.
///
/// The cookie store stands in for the browser's ambient credentials: any
/// session cookie the backend sets is replayed on later requests. Redirects
/// are not followed, so a login-page redirect surfaces as a 3xx failure.
///
/// # Errors
///
/// Returns `AuthError::Http` if the TLS backend fails to initialize.
pub fn http_client(timeout: Duration) -> Result<reqwest::Client, AuthError> {
    Ok(reqwest::Client::builder()
        .user_agent(concat!("pcrafter/", env!("CARGO_PKG_VERSION")))
        .timeout(timeout)
        .cookie_store(true)
        .redirect(reqwest::redirect::Policy::none())
        .build()?)
}

/// Client for the authentication endpoints under the versioned API root.
#[derive(Debug, Clone)]
pub struct AuthApi {
    http: reqwest::Client,
    api_root: String,
}

impl AuthApi {
    /// `api_root` is the versioned root, e.g. `http://localhost:8000/api/v1.1`.
    pub fn new(http: reqwest::Client, api_root: impl Into<String>) -> Self {
        Self {
            http,
            api_root: api_root.into().trim_end_matches('/').to_string(),
        }
    }

    #[must_use]
    pub fn api_root(&self) -> &str {
        &self.api_root
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.api_root)
    }

    /// `GET /user/me`, with ambient credentials only or with a bearer token.
    ///
    /// # Errors
    ///
    /// `AuthError::NotAuthenticated` on 401, `AuthError::Api` on other
    /// non-success statuses, `AuthError::InvalidResponse` when the body has no
    /// user email.
    pub async fn me(&self, bearer: Option<&str>) -> Result<Session, AuthError> {
        let mut request = self.http.get(self.url("/user/me"));
        if let Some(token) = bearer {
            request = request.bearer_auth(token);
        }
        let resp = check_response(request.send().await?).await?;
        let body: serde_json::Value = resp.json().await?;
        Session::from_user_value(&body)
            .ok_or_else(|| AuthError::InvalidResponse("/user/me response has no email".into()))
    }

    /// `GET /user/refresh`. The stored refresh token, when present, goes in
    /// the `Authorization` header; otherwise only cookies are sent.
    ///
    /// # Errors
    ///
    /// Same status mapping as [`Self::me`].
    pub async fn refresh(&self, refresh_token: Option<&str>) -> Result<TokenPair, AuthError> {
        let mut request = self.http.get(self.url("/user/refresh"));
        if let Some(token) = refresh_token {
            request = request.bearer_auth(token);
        }
        let resp = check_response(request.send().await?).await?;
        Ok(resp.json().await?)
    }

    /// `POST /user/login` with OAuth2 password-form fields.
    ///
    /// # Errors
    ///
    /// Same status mapping as [`Self::me`].
    pub async fn login(&self, email: &str, password: &str) -> Result<LoginGrant, AuthError> {
        let resp = self
            .http
            .post(self.url("/user/login"))
            .form(&[("username", email), ("password", password)])
            .send()
            .await?;
        let body: serde_json::Value = check_response(resp).await?.json().await?;
        let tokens: TokenPair = serde_json::from_value(body.clone())
            .map_err(|e| AuthError::InvalidResponse(format!("login response: {e}")))?;
        Ok(LoginGrant {
            tokens,
            user: Session::from_user_value(&body),
        })
    }

    /// `POST /user/logout` with the access token.
    ///
    /// # Errors
    ///
    /// Same status mapping as [`Self::me`].
    pub async fn logout(&self, access_token: &str) -> Result<(), AuthError> {
        let resp = self
            .http
            .post(self.url("/user/logout"))
            .bearer_auth(access_token)
            .send()
            .await?;
        check_response(resp).await?;
        Ok(())
    }

    /// URL that starts the Google OAuth redirect flow.
    #[must_use]
    pub fn google_login_url(&self, redirect_uri: &str, state: &str) -> String {
        format!(
            "{}?redirect_uri={}&state={}",
            self.url("/login/google"),
            urlencoding::encode(redirect_uri),
            urlencoding::encode(state)
        )
    }
}

/// Map a response status onto [`AuthError`], passing successes through.
pub(crate) async fn check_response(
    resp: reqwest::Response,
) -> Result<reqwest::Response, AuthError> {
    let status = resp.status();
    if status == reqwest::StatusCode::UNAUTHORIZED {
        return Err(AuthError::NotAuthenticated);
    }
    if !status.is_success() {
        let body = resp.text().await.unwrap_or_default();
        return Err(AuthError::Api {
            status: status.as_u16(),
            message: error_message(&body),
        });
    }
    Ok(resp)
}

/// Pull the human-readable message out of an error body.
///
/// FastAPI uses `detail`, the older Flask routes use `error`.
pub(crate) fn error_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| {
            ["detail", "error", "message"]
                .iter()
                .find_map(|key| v.get(*key).and_then(serde_json::Value::as_str).map(String::from))
        })
        .unwrap_or_else(|| body.trim().to_string())
}
