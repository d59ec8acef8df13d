use pc_core::Session;

use crate::api::AuthApi;
use crate::error::AuthError;
use crate::store::SessionStore;
use crate::view::SessionView;

/// Email/password login against `POST /user/login`.
///
/// Stores the returned tokens (and the user from the login envelope), then
/// runs the resolver so the view and cache reflect the confirmed session.
///
/// # Errors
///
/// Returns `AuthError::NotAuthenticated` for rejected credentials or a token
/// that does not resolve, `AuthError::Api`/`Http` for other failures.
pub async fn login(
    api: &AuthApi,
    store: &dyn SessionStore,
    view: &mut dyn SessionView,
    email: &str,
    password: &str,
) -> Result<Session, AuthError> {
    let grant = api.login(email, password).await?;
    tracing::debug!(email, "password login accepted");

    store.update(&mut |s| {
        s.access_token = Some(grant.tokens.access_token.clone());
        s.refresh_token.clone_from(&grant.tokens.refresh_token);
        s.user = grant.user.clone();
        s.login_pending = false;
    })?;

    crate::resolver::resolve_session(api, store, view)
        .await
        .ok_or(AuthError::NotAuthenticated)
}
