//! Client error types.

use thiserror::Error;

/// Errors from the prompt-processing endpoint and the API wrapper.
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP transport error.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The backend returned a non-success status.
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Server-supplied error text, or the endpoint's default message.
        message: String,
    },

    /// The backend returned 429; `detail` is its explanation.
    #[error("rate limited: {detail}")]
    RateLimited {
        /// Server-provided `detail` text.
        detail: String,
    },

    /// A response body did not have the expected shape.
    #[error("parse error: {0}")]
    Parse(String),
}
