use pc_core::Session;

/// The login/profile controls the resolver toggles.
///
/// Implementations must be idempotent: the resolver may show the same state
/// more than once.
pub trait SessionView {
    /// Hide the login controls and show the signed-in profile.
    fn show_profile(&mut self, session: &Session);

    /// Hide the profile and show the login controls.
    fn show_login(&mut self);
}

/// A view that displays nothing, for callers that only want the result.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopView;

impl SessionView for NoopView {
    fn show_profile(&mut self, _session: &Session) {}

    fn show_login(&mut self) {}
}
