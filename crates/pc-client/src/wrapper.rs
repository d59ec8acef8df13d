//! Thin binding of the unversioned prompt-library routes.
//!
//! Every method returns a parsed result or a [`ClientError`]; deletion is a
//! request like the others rather than a page navigation.
//!
//! These routes sit behind a login check that answers with a redirect to the
//! login page. A redirect is never a success: a 3xx status fails directly,
//! and a client that follows redirects is caught by the response landing on
//! a different URL than the one requested.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ClientError;
use crate::http::check_response;

/// Body of `POST /api/generate`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerateRequest {
    pub role: String,
    pub task: String,
    pub constraints: String,
    pub output: String,
    pub personality: String,
}

/// Fields of `POST /save_prompt`, sent as multipart form data.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SavePromptForm {
    fields: Vec<(String, String)>,
}

impl SavePromptForm {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn field(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.push((key.into(), value.into()));
        self
    }

    #[must_use]
    pub fn fields(&self) -> &[(String, String)] {
        &self.fields
    }

    fn to_multipart(&self) -> reqwest::multipart::Form {
        self.fields
            .iter()
            .fold(reqwest::multipart::Form::new(), |form, (key, value)| {
                form.text(key.clone(), value.clone())
            })
    }
}

#[derive(Serialize)]
struct VisibilityUpdate {
    is_public: bool,
}

/// Confirmation returned by [`PromptCrafterApi::delete_prompt`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DeletedPrompt {
    pub id: i64,
}

/// Client for the prompt-library routes; holds nothing but a base URL.
#[derive(Debug, Clone)]
pub struct PromptCrafterApi {
    http: reqwest::Client,
    base_url: String,
}

impl PromptCrafterApi {
    pub fn new(http: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// Send `request` and check it, refusing redirected responses.
    async fn send(
        &self,
        request: reqwest::RequestBuilder,
        fallback: &str,
    ) -> Result<reqwest::Response, ClientError> {
        let request = request.build()?;
        let requested = request.url().clone();
        let resp = check_response(self.http.execute(request).await?, fallback).await?;
        if resp.url() != &requested {
            tracing::warn!(%requested, landed = %resp.url(), "request was redirected");
            return Err(ClientError::Api {
                status: reqwest::StatusCode::FOUND.as_u16(),
                message: fallback.to_string(),
            });
        }
        Ok(resp)
    }

    /// `POST /api/generate`.
    ///
    /// # Errors
    ///
    /// [`ClientError::Api`] with the server's `error` text or "Failed to
    /// generate prompt"; transport and parse errors otherwise.
    pub async fn generate_prompt(&self, request: &GenerateRequest) -> Result<Value, ClientError> {
        let request = self.http.post(self.url("/api/generate")).json(request);
        json_body(self.send(request, "Failed to generate prompt").await?).await
    }

    /// `POST /save_prompt` as multipart form data.
    ///
    /// # Errors
    ///
    /// [`ClientError::Api`] with the server's `error` text or "Failed to save
    /// prompt"; transport and parse errors otherwise.
    pub async fn save_prompt(&self, form: &SavePromptForm) -> Result<Value, ClientError> {
        let request = self
            .http
            .post(self.url("/save_prompt"))
            .multipart(form.to_multipart());
        json_body(self.send(request, "Failed to save prompt").await?).await
    }

    /// `POST /toggle_public/{id}` with `{"is_public": ..}`.
    ///
    /// # Errors
    ///
    /// [`ClientError::Api`] with the server's `error` text or "Failed to
    /// update prompt visibility"; transport and parse errors otherwise.
    pub async fn toggle_public(&self, prompt_id: i64, is_public: bool) -> Result<Value, ClientError> {
        let request = self
            .http
            .post(self.url(&format!("/toggle_public/{prompt_id}")))
            .json(&VisibilityUpdate { is_public });
        json_body(self.send(request, "Failed to update prompt visibility").await?).await
    }

    /// `GET /delete_prompt/{id}`.
    ///
    /// Success carries no JSON body; the id is echoed back. A redirect (the
    /// login page, or the library page on a permission failure) is an error.
    ///
    /// # Errors
    ///
    /// [`ClientError::Api`] with the server's `error` text or "Failed to
    /// delete prompt"; transport errors otherwise.
    pub async fn delete_prompt(&self, prompt_id: i64) -> Result<DeletedPrompt, ClientError> {
        let request = self.http.get(self.url(&format!("/delete_prompt/{prompt_id}")));
        self.send(request, "Failed to delete prompt").await?;
        tracing::debug!(prompt_id, "prompt deleted");
        Ok(DeletedPrompt { id: prompt_id })
    }
}

async fn json_body(resp: reqwest::Response) -> Result<Value, ClientError> {
    let body = resp.text().await?;
    serde_json::from_str(&body).map_err(|e| ClientError::Parse(format!("response body: {e}")))
}
