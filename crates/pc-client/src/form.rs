//! Prompt form controller.
//!
//! Owns the most recent [`PromptResult`] for the copy action; nothing else
//! in the process can reach it except through [`PromptForm::result`].

use pc_core::{PromptChoice, PromptRequest, PromptResult};

use crate::error::ClientError;
use crate::process::ProcessApi;

pub const EMPTY_STATE: &str = "No prompt yet. Fill the form to see the structured content.";
pub const PROCESSING: &str = "Processing…";
pub const REJECTED: &str = "Server rejected the prompt";
pub const NOTHING_TO_COPY: &str = "Nothing to copy yet. Generate a prompt first.";
pub const COPIED: &str = "Copied to clipboard!";
pub const COPY_FAILED: &str = "Failed to copy to clipboard";

/// Where the controller renders its state.
pub trait PromptView {
    /// Placeholder shown before any result, and after a reset.
    fn show_empty(&mut self, message: &str);

    /// Request is in flight.
    fn show_processing(&mut self, message: &str);

    /// Main display gets the structured text, the meta panel the natural one.
    fn show_result(&mut self, structured: &str, natural: &str);

    /// Inline failure message in the main display.
    fn show_error(&mut self, message: &str);

    /// Modal asking the user to log in, with the server's explanation.
    fn show_login_prompt(&mut self, detail: &str);

    /// Short-lived notice (copy feedback).
    fn show_notice(&mut self, message: &str);
}

/// System clipboard access.
pub trait Clipboard {
    /// # Errors
    ///
    /// Returns a description of the clipboard failure.
    fn write_text(&mut self, text: &str) -> Result<(), String>;
}

/// What a submission did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// No `task`; nothing was sent.
    Skipped,
    /// Rendered and retained.
    Rendered(PromptResult),
    /// 429; the login prompt was shown.
    RateLimited { detail: String },
    /// Other non-success status.
    Rejected { status: u16 },
    /// Transport or parse failure, with the message shown.
    Failed { message: String },
}

/// What a copy attempt did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CopyOutcome {
    Copied(PromptChoice),
    NothingToCopy,
    Failed(String),
}

pub struct PromptForm {
    api: ProcessApi,
    bearer: Option<String>,
    result: Option<PromptResult>,
}

impl PromptForm {
    pub fn new(api: ProcessApi) -> Self {
        Self {
            api,
            bearer: None,
            result: None,
        }
    }

    /// Send `token` as `Authorization: Bearer` on submissions.
    #[must_use]
    pub fn with_bearer(mut self, token: Option<String>) -> Self {
        self.bearer = token;
        self
    }

    /// The retained result, if the last submission succeeded.
    #[must_use]
    pub fn result(&self) -> Option<&PromptResult> {
        self.result.as_ref()
    }

    /// Drop any retained result and show the empty state.
    pub fn reset(&mut self, view: &mut dyn PromptView) {
        self.result = None;
        view.show_empty(EMPTY_STATE);
    }

    /// Submit a request built from form fields.
    pub async fn submit(
        &mut self,
        request: &PromptRequest,
        view: &mut dyn PromptView,
    ) -> SubmitOutcome {
        if !request.is_submittable() {
            tracing::debug!("prompt form submitted without a task; ignoring");
            return SubmitOutcome::Skipped;
        }

        view.show_processing(PROCESSING);

        match self.api.process(request, self.bearer.as_deref()).await {
            Ok(result) => {
                view.show_result(&result.structured, &result.natural);
                self.result = Some(result.clone());
                SubmitOutcome::Rendered(result)
            }
            Err(ClientError::RateLimited { detail }) => {
                tracing::info!(%detail, "prompt submission rate limited");
                self.result = None;
                view.show_empty(EMPTY_STATE);
                view.show_login_prompt(&detail);
                SubmitOutcome::RateLimited { detail }
            }
            Err(ClientError::Api { status, message }) => {
                tracing::warn!(status, %message, "prompt submission rejected");
                self.result = None;
                view.show_error(REJECTED);
                SubmitOutcome::Rejected { status }
            }
            Err(error) => {
                tracing::warn!(%error, "prompt submission failed");
                let message = error.to_string();
                self.result = None;
                view.show_error(&message);
                SubmitOutcome::Failed { message }
            }
        }
    }

    /// Copy the chosen rendering of the retained result.
    pub fn copy(
        &self,
        choice: PromptChoice,
        clipboard: &mut dyn Clipboard,
        view: &mut dyn PromptView,
    ) -> CopyOutcome {
        let Some(result) = &self.result else {
            view.show_notice(NOTHING_TO_COPY);
            return CopyOutcome::NothingToCopy;
        };

        match clipboard.write_text(choice.pick(result)) {
            Ok(()) => {
                view.show_notice(COPIED);
                CopyOutcome::Copied(choice)
            }
            Err(error) => {
                tracing::warn!(%error, "clipboard write failed");
                view.show_notice(COPY_FAILED);
                CopyOutcome::Failed(error)
            }
        }
    }
}
