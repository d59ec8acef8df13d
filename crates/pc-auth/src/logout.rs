use crate::api::AuthApi;
use crate::error::AuthError;
use crate::store::SessionStore;
use crate::view::SessionView;

/// End the session on the server (best effort) and clear local storage.
///
/// Returns whether the server acknowledged the logout. A rejected or
/// unreachable logout endpoint still clears local state.
///
/// # Errors
///
/// Returns `AuthError::TokenStoreError` if local storage cannot be cleared.
pub async fn logout(
    api: &AuthApi,
    store: &dyn SessionStore,
    view: &mut dyn SessionView,
) -> Result<bool, AuthError> {
    let stored = store.load().unwrap_or_default();

    let acknowledged = match stored.access_token.as_deref() {
        Some(token) => match api.logout(token).await {
            Ok(()) => true,
            Err(error) => {
                tracing::warn!(%error, "server logout failed; clearing local session anyway");
                false
            }
        },
        None => {
            tracing::debug!("no stored access token; skipping server logout");
            false
        }
    };

    store.clear()?;
    view.show_login();
    Ok(acknowledged)
}
