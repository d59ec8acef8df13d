//! Login-state resolution.
//!
//! Sequence, short-circuiting on the first success:
//! 1. `/user/me` with ambient credentials (cookies)
//! 2. on 401, `/user/refresh`, then `/user/me` with the new access token
//! 3. on any earlier failure, `/user/me` with the previously stored access token
//! 4. otherwise logged out: storage is cleared
//!
//! Every failure, transport errors included, just moves to the next step.

use pc_core::{Session, StoredSession};

use crate::api::AuthApi;
use crate::error::AuthError;
use crate::store::SessionStore;
use crate::view::SessionView;

pub struct SessionResolver<'a> {
    api: &'a AuthApi,
    store: &'a dyn SessionStore,
}

impl<'a> SessionResolver<'a> {
    pub fn new(api: &'a AuthApi, store: &'a dyn SessionStore) -> Self {
        Self { api, store }
    }

    /// Resolve the current session and update `view` to match.
    pub async fn resolve(&self, view: &mut dyn SessionView) -> Option<Session> {
        let resolved = self.resolve_session().await;
        match &resolved {
            Some(session) => view.show_profile(session),
            None => view.show_login(),
        }
        resolved
    }

    async fn resolve_session(&self) -> Option<Session> {
        let stored = self.store.load().unwrap_or_else(|error| {
            tracing::warn!(%error, "session store unreadable; treating as empty");
            StoredSession::default()
        });

        match self.api.me(None).await {
            Ok(user) => {
                tracing::debug!(email = %user.email, "resolved session from ambient credentials");
                return Some(self.cache(user, stored.access_token, stored.refresh_token));
            }
            Err(AuthError::NotAuthenticated) => {
                tracing::debug!("/user/me returned 401; trying refresh");
                if let Some(session) = self.try_refresh(&stored).await {
                    return Some(session);
                }
            }
            Err(error) => tracing::debug!(%error, "/user/me failed"),
        }

        if let Some(token) = stored.access_token.as_deref() {
            if crate::token::is_near_expiry(token, 0) {
                tracing::debug!("stored access token looks expired; trying it anyway");
            }
            match self.api.me(Some(token)).await {
                Ok(user) => {
                    tracing::debug!(email = %user.email, "resolved session from stored token");
                    return Some(self.cache(
                        user,
                        stored.access_token.clone(),
                        stored.refresh_token.clone(),
                    ));
                }
                Err(error) => tracing::debug!(%error, "stored access token rejected"),
            }
        }

        tracing::debug!("no usable credentials; logged out");
        if let Err(error) = self.store.clear() {
            tracing::warn!(%error, "failed to clear session store");
        }
        None
    }

    async fn try_refresh(&self, stored: &StoredSession) -> Option<Session> {
        let tokens = match self.api.refresh(stored.refresh_token.as_deref()).await {
            Ok(tokens) => tokens,
            Err(error) => {
                tracing::debug!(%error, "/user/refresh failed");
                return None;
            }
        };

        let refresh_token = tokens
            .refresh_token
            .clone()
            .or_else(|| stored.refresh_token.clone());
        let access_token = tokens.access_token;
        self.persist(&mut |s| {
            s.access_token = Some(access_token.clone());
            s.refresh_token.clone_from(&refresh_token);
        });

        match self.api.me(Some(&access_token)).await {
            Ok(user) => {
                tracing::debug!(email = %user.email, "resolved session after refresh");
                Some(self.cache(user, Some(access_token), refresh_token))
            }
            Err(error) => {
                tracing::debug!(%error, "/user/me rejected refreshed token");
                None
            }
        }
    }

    fn cache(&self, user: Session, access: Option<String>, refresh: Option<String>) -> Session {
        let session = user.with_tokens(access, refresh);
        let cached = session.clone();
        self.persist(&mut |s| {
            s.access_token.clone_from(&cached.access_token);
            s.refresh_token.clone_from(&cached.refresh_token);
            s.user = Some(cached.clone());
        });
        session
    }

    fn persist(&self, f: &mut dyn FnMut(&mut StoredSession)) {
        if let Err(error) = self.store.update(f) {
            tracing::warn!(%error, "failed to update session store");
        }
    }
}

/// Resolve with a one-off resolver.
pub async fn resolve_session(
    api: &AuthApi,
    store: &dyn SessionStore,
    view: &mut dyn SessionView,
) -> Option<Session> {
    SessionResolver::new(api, store).resolve(view).await
}
