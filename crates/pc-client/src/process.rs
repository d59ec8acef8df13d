//! `POST {api}/pcrafter/process`.

use pc_core::{PromptRequest, PromptResult};
use serde::Deserialize;

use crate::error::ClientError;
use crate::http::check_response;

#[derive(Deserialize)]
struct ProcessResponse {
    structured_prompt: String,
    natural_prompt: String,
}

/// Client for the prompt-processing endpoint under the versioned API root.
#[derive(Debug, Clone)]
pub struct ProcessApi {
    http: reqwest::Client,
    api_root: String,
}

impl ProcessApi {
    /// `api_root` is the versioned root, e.g. `http://localhost:8000/api/v1.1`.
    pub fn new(http: reqwest::Client, api_root: impl Into<String>) -> Self {
        Self {
            http,
            api_root: api_root.into().trim_end_matches('/').to_string(),
        }
    }

    #[must_use]
    pub fn endpoint(&self) -> String {
        format!("{}/pcrafter/process", self.api_root)
    }

    /// Submit a prompt request.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::RateLimited`] on 429, [`ClientError::Api`] on
    /// other non-success statuses, [`ClientError::Http`] on transport failure
    /// and [`ClientError::Parse`] when the body lacks the two prompt fields.
    pub async fn process(
        &self,
        request: &PromptRequest,
        bearer: Option<&str>,
    ) -> Result<PromptResult, ClientError> {
        let mut builder = self.http.post(self.endpoint()).json(request);
        if let Some(token) = bearer {
            builder = builder.bearer_auth(token);
        }
        tracing::debug!(url = %self.endpoint(), "submitting prompt");

        let resp = check_response(builder.send().await?, "Server rejected the prompt").await?;
        let body = resp.text().await?;
        let data: ProcessResponse = serde_json::from_str(&body)
            .map_err(|e| ClientError::Parse(format!("process response: {e}")))?;

        Ok(PromptResult {
            structured: data.structured_prompt,
            natural: data.natural_prompt,
        })
    }
}
