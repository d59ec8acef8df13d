//! # pc-core
//!
//! Core types shared across the PromptCrafter client crates.
//!
//! - [`session`]: the authenticated user and the client-side storage record
//! - [`prompt`]: prompt request building (tag splitting, required `task`) and
//!   the structured/natural result pair
//! - [`api_version`]: the backend API revision (`v1`, `v1.1`)
//! - [`errors`]: validation errors raised while building requests

pub mod api_version;
pub mod errors;
pub mod prompt;
pub mod session;

pub use api_version::ApiVersion;
pub use errors::CoreError;
pub use prompt::{PromptChoice, PromptRequest, PromptResult};
pub use session::{Session, StoredSession};
