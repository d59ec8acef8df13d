//! # pc-auth
//!
//! Authentication state for the PromptCrafter client.
//!
//! Provides session storage ([`store`]), the login-state resolver
//! ([`resolver`]), Google OAuth through a loopback callback
//! ([`browser_flow`]), password login ([`password`]) and logout.

pub mod api;
pub mod browser_flow;
pub mod error;
pub mod logout;
pub mod password;
pub mod resolver;
pub mod store;
pub mod token;
pub mod view;

pub use api::{AuthApi, TokenPair, http_client};
pub use error::AuthError;
pub use resolver::{SessionResolver, resolve_session};
pub use store::{FileSessionStore, MemorySessionStore, SessionStore};
pub use view::{NoopView, SessionView};

/// The stored access token, if any, for authenticating other API calls.
#[must_use]
pub fn stored_access_token(store: &dyn SessionStore) -> Option<String> {
    match store.load() {
        Ok(stored) => stored.access_token,
        Err(error) => {
            tracing::warn!(%error, "session store unreadable");
            None
        }
    }
}
