//! Cross-cutting error types for the PromptCrafter client.
//!
//! Transport and storage errors live in the crates that own them
//! (`AuthError`, `ClientError`); this module only covers input validation.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    /// A form field assignment was not of the form `key=value`.
    #[error("invalid field '{0}': expected key=value")]
    InvalidField(String),

    /// An unknown API version string.
    #[error("unsupported API version '{0}' (expected v1 or v1.1)")]
    UnsupportedApiVersion(String),

    /// An unknown copy target.
    #[error("unknown prompt choice '{0}' (expected structured or natural)")]
    UnknownChoice(String),
}
