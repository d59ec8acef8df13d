//! # pc-client
//!
//! Prompt-side HTTP clients for PromptCrafter.
//!
//! - [`process`]: `POST {api}/pcrafter/process`
//! - [`form`]: the form controller that submits, renders and copies results
//! - [`wrapper`]: generate / save / toggle-visibility / delete bindings

pub mod form;
pub mod process;
pub mod wrapper;

mod error;
mod http;

pub use error::ClientError;
pub use form::{Clipboard, CopyOutcome, PromptForm, PromptView, SubmitOutcome};
pub use process::ProcessApi;
pub use wrapper::{DeletedPrompt, GenerateRequest, PromptCrafterApi, SavePromptForm};
