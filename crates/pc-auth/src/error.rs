use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("not authenticated; run `pcrafter login`")]
    NotAuthenticated,

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("unexpected response: {0}")]
    InvalidResponse(String),

    #[error("session store error: {0}")]
    TokenStoreError(String),

    #[error("browser login failed: {0}")]
    BrowserFlowFailed(String),

    #[error("{0}")]
    Other(String),
}
