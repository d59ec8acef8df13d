use serde::{Deserialize, Serialize};
use serde_json::Value;

const DEFAULT_PLAN: &str = "free";

fn default_plan() -> String {
    DEFAULT_PLAN.to_string()
}

/// The authenticated user as seen by the client.
///
/// Produced by the session resolver from a `/user/me` response and cached in
/// client storage under the `user` key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub email: String,
    #[serde(default = "default_plan")]
    pub plan: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
}

impl Session {
    /// Parse a user payload from the backend.
    ///
    /// Accepts either a bare user object (`{"email": .., "plan": ..}`) or the
    /// login envelope (`{"user": {"email": ..}}`). Returns `None` when no
    /// email is present.
    #[must_use]
    pub fn from_user_value(value: &Value) -> Option<Self> {
        let user = value.get("user").filter(|u| u.is_object()).unwrap_or(value);
        let email = user.get("email")?.as_str()?.trim();
        if email.is_empty() {
            return None;
        }
        let plan = user
            .get("plan")
            .and_then(Value::as_str)
            .filter(|p| !p.is_empty())
            .map_or_else(default_plan, str::to_string);

        Some(Self {
            email: email.to_string(),
            plan,
            access_token: None,
            refresh_token: None,
        })
    }

    /// Attach the tokens the session was resolved with.
    #[must_use]
    pub fn with_tokens(mut self, access: Option<String>, refresh: Option<String>) -> Self {
        self.access_token = access;
        self.refresh_token = refresh;
        self
    }
}

/// Client-side session storage record.
///
/// Mirrors the four storage keys the web client kept in session storage:
/// `access_token`, `refresh_token`, `user` and `login_pending`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredSession {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<Session>,
    #[serde(default)]
    pub login_pending: bool,
}

impl StoredSession {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}
