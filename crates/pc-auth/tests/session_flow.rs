//! Session resolution, login and logout against a loopback fake backend.

mod support;

use std::time::Duration;

use pc_auth::browser_flow::BrowserLauncher;
use pc_auth::{AuthApi, AuthError, MemorySessionStore, SessionStore, SessionView};
use pc_core::{Session, StoredSession};
use pretty_assertions::assert_eq;
use serde_json::json;
use support::{FakeBackend, Route};

const ME: &str = "/api/v1.1/user/me";
const REFRESH: &str = "/api/v1.1/user/refresh";
const LOGIN: &str = "/api/v1.1/user/login";
const LOGOUT: &str = "/api/v1.1/user/logout";

#[derive(Debug, Default)]
struct RecordingView {
    profiles: Vec<String>,
    logins: usize,
}

impl SessionView for RecordingView {
    fn show_profile(&mut self, session: &Session) {
        self.profiles.push(session.email.clone());
    }

    fn show_login(&mut self) {
        self.logins += 1;
    }
}

fn api_for(backend: &FakeBackend) -> AuthApi {
    let http = pc_auth::http_client(Duration::from_secs(5)).expect("client");
    AuthApi::new(http, format!("{}/api/v1.1", backend.url()))
}

fn user(email: &str) -> serde_json::Value {
    json!({"email": email, "plan": "pro"})
}

fn unauthorized() -> serde_json::Value {
    json!({"detail": "Could not validate credentials"})
}

#[tokio::test]
async fn ambient_credentials_resolve_directly() {
    let backend = FakeBackend::start(vec![Route::get(ME).respond(200, user("ada@example.com"))]);
    let api = api_for(&backend);
    let store = MemorySessionStore::default();
    let mut view = RecordingView::default();

    let session = pc_auth::resolve_session(&api, &store, &mut view)
        .await
        .expect("session");

    assert_eq!(session.email, "ada@example.com");
    assert_eq!(session.plan, "pro");
    assert_eq!(view.profiles, vec!["ada@example.com"]);
    assert_eq!(view.logins, 0);
    assert_eq!(backend.hits("GET", REFRESH), 0);
    assert_eq!(
        store.snapshot().user.map(|u| u.email).as_deref(),
        Some("ada@example.com")
    );
}

#[tokio::test]
async fn unauthorized_me_falls_back_to_refresh() {
    let backend = FakeBackend::start(vec![
        Route::get(ME)
            .bearer("fresh_access")
            .respond(200, user("ada@example.com")),
        Route::get(ME).respond(401, unauthorized()),
        Route::get(REFRESH)
            .bearer("refresh_0")
            .respond(200, json!({"access_token": "fresh_access", "token_type": "bearer"})),
    ]);
    let api = api_for(&backend);
    let store = MemorySessionStore::new(StoredSession {
        refresh_token: Some("refresh_0".into()),
        ..Default::default()
    });
    let mut view = RecordingView::default();

    let session = pc_auth::resolve_session(&api, &store, &mut view)
        .await
        .expect("session");

    assert_eq!(session.access_token.as_deref(), Some("fresh_access"));
    assert_eq!(session.refresh_token.as_deref(), Some("refresh_0"));

    let stored = store.snapshot();
    assert_eq!(stored.access_token.as_deref(), Some("fresh_access"));
    assert_eq!(stored.refresh_token.as_deref(), Some("refresh_0"));
    assert_eq!(stored.user.map(|u| u.email).as_deref(), Some("ada@example.com"));

    let me_calls: Vec<_> = backend
        .requests()
        .into_iter()
        .filter(|r| r.path == ME)
        .map(|r| r.authorization)
        .collect();
    assert_eq!(me_calls, vec![None, Some("Bearer fresh_access".to_string())]);
}

#[tokio::test]
async fn stored_token_used_when_refresh_fails() {
    let backend = FakeBackend::start(vec![
        Route::get(ME)
            .bearer("stored_access")
            .respond(200, user("grace@example.com")),
        Route::get(ME).respond(401, unauthorized()),
        Route::get(REFRESH).respond(401, unauthorized()),
    ]);
    let api = api_for(&backend);
    let store = MemorySessionStore::new(StoredSession {
        access_token: Some("stored_access".into()),
        ..Default::default()
    });
    let mut view = RecordingView::default();

    let session = pc_auth::resolve_session(&api, &store, &mut view)
        .await
        .expect("session");

    assert_eq!(session.email, "grace@example.com");
    assert_eq!(session.access_token.as_deref(), Some("stored_access"));
    assert_eq!(backend.hits("GET", REFRESH), 1);
    assert_eq!(backend.hits("GET", ME), 2);
}

#[tokio::test]
async fn server_error_skips_refresh_but_tries_stored_token() {
    let backend = FakeBackend::start(vec![
        Route::get(ME)
            .bearer("stored_access")
            .respond(200, user("grace@example.com")),
        Route::get(ME).respond(500, json!({"detail": "boom"})),
    ]);
    let api = api_for(&backend);
    let store = MemorySessionStore::new(StoredSession {
        access_token: Some("stored_access".into()),
        ..Default::default()
    });

    let session = pc_auth::resolve_session(&api, &store, &mut RecordingView::default()).await;

    assert!(session.is_some());
    assert_eq!(backend.hits("GET", REFRESH), 0);
}

#[tokio::test]
async fn no_tokens_and_failing_endpoints_log_out() {
    let backend = FakeBackend::start(vec![
        Route::get(ME).respond(401, unauthorized()),
        Route::get(REFRESH).respond(401, unauthorized()),
    ]);
    let api = api_for(&backend);
    let store = MemorySessionStore::new(StoredSession {
        login_pending: true,
        ..Default::default()
    });
    let mut view = RecordingView::default();

    let session = pc_auth::resolve_session(&api, &store, &mut view).await;

    assert!(session.is_none());
    assert_eq!(view.logins, 1);
    assert!(view.profiles.is_empty());
    assert!(store.snapshot().is_empty());
    assert_eq!(backend.hits("GET", ME), 1);
    assert_eq!(backend.hits("GET", REFRESH), 1);
}

#[tokio::test]
async fn unreachable_backend_is_logged_out() {
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind");
        listener.local_addr().expect("addr").port()
    };
    let http = pc_auth::http_client(Duration::from_secs(2)).expect("client");
    let api = AuthApi::new(http, format!("http://127.0.0.1:{port}/api/v1.1"));
    let store = MemorySessionStore::new(StoredSession {
        access_token: Some("stale".into()),
        ..Default::default()
    });
    let mut view = RecordingView::default();

    assert!(pc_auth::resolve_session(&api, &store, &mut view).await.is_none());
    assert_eq!(view.logins, 1);
    assert!(store.snapshot().is_empty());
}

#[tokio::test]
async fn password_login_stores_tokens_and_resolves() {
    let backend = FakeBackend::start(vec![
        Route::post(LOGIN).respond(
            200,
            json!({
                "message": "Login Successful",
                "access_token": "a1",
                "refresh_token": "r1",
                "user": {"email": "ada@example.com", "user_uid": "u-1"}
            }),
        ),
        Route::get(ME).bearer("a1").respond(200, user("ada@example.com")),
        Route::get(ME).respond(401, unauthorized()),
        Route::get(REFRESH).respond(401, unauthorized()),
    ]);
    let api = api_for(&backend);
    let store = MemorySessionStore::default();
    let mut view = RecordingView::default();

    let session = pc_auth::password::login(&api, &store, &mut view, "ada@example.com", "pw")
        .await
        .expect("login");

    assert_eq!(session.email, "ada@example.com");
    assert_eq!(store.snapshot().access_token.as_deref(), Some("a1"));
    assert_eq!(view.profiles, vec!["ada@example.com"]);

    let login = backend
        .requests()
        .into_iter()
        .find(|r| r.path == LOGIN)
        .expect("login request");
    assert!(login.body.contains("username=ada%40example.com"));
    assert!(login.body.contains("password=pw"));
}

#[tokio::test]
async fn rejected_password_is_not_authenticated() {
    let backend = FakeBackend::start(vec![Route::post(LOGIN).respond(401, unauthorized())]);
    let api = api_for(&backend);
    let store = MemorySessionStore::default();

    let err = pc_auth::password::login(
        &api,
        &store,
        &mut RecordingView::default(),
        "ada@example.com",
        "wrong",
    )
    .await
    .unwrap_err();

    assert!(matches!(err, AuthError::NotAuthenticated));
    assert!(store.snapshot().is_empty());
}

#[tokio::test]
async fn logout_calls_server_and_clears_store() {
    let backend = FakeBackend::start(vec![
        Route::post(LOGOUT)
            .bearer("a1")
            .respond(200, json!({"message": "Logout successful"})),
    ]);
    let api = api_for(&backend);
    let store = MemorySessionStore::new(StoredSession {
        access_token: Some("a1".into()),
        refresh_token: Some("r1".into()),
        ..Default::default()
    });
    let mut view = RecordingView::default();

    let acknowledged = pc_auth::logout::logout(&api, &store, &mut view)
        .await
        .expect("logout");

    assert!(acknowledged);
    assert!(store.snapshot().is_empty());
    assert_eq!(view.logins, 1);
}

#[tokio::test]
async fn logout_clears_store_even_when_server_rejects() {
    let backend = FakeBackend::start(vec![Route::post(LOGOUT).respond(401, unauthorized())]);
    let api = api_for(&backend);
    let store = MemorySessionStore::new(StoredSession {
        access_token: Some("revoked".into()),
        ..Default::default()
    });

    let acknowledged = pc_auth::logout::logout(&api, &store, &mut RecordingView::default())
        .await
        .expect("logout");

    assert!(!acknowledged);
    assert!(store.snapshot().is_empty());
}

/// Stands in for the browser: follows the login URL straight to the loopback
/// callback with the given token.
struct CallbackBrowser {
    token: &'static str,
    tamper_state: bool,
    launched: Vec<String>,
}

fn query_param(url: &str, key: &str) -> Option<String> {
    let query = url.split_once('?')?.1;
    let raw = query
        .split('&')
        .filter_map(|pair| pair.split_once('='))
        .find(|(k, _)| *k == key)?
        .1;
    urlencoding::decode(raw).ok().map(|d| d.into_owned())
}

impl BrowserLauncher for CallbackBrowser {
    fn launch(&mut self, url: &str) -> Result<(), String> {
        self.launched.push(url.to_string());
        let redirect = query_param(url, "redirect_uri").ok_or("no redirect_uri")?;
        let mut state = query_param(url, "state").ok_or("no state")?;
        if self.tamper_state {
            state.push_str("-tampered");
        }
        let origin = redirect.trim_end_matches("/callback").to_string();
        let callback = format!("{redirect}?access_token={}&state={state}", self.token);
        tokio::spawn(async move {
            let client = reqwest::Client::new();
            let _ = client.get(format!("{origin}/favicon.ico")).send().await;
            let _ = client.get(callback).send().await;
        });
        Ok(())
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn google_login_completes_through_loopback_callback() {
    let backend = FakeBackend::start(vec![
        Route::get(ME).bearer("g1").respond(200, user("ada@example.com")),
        Route::get(ME).respond(401, unauthorized()),
        Route::get(REFRESH).respond(401, unauthorized()),
    ]);
    let api = api_for(&backend);
    let store = MemorySessionStore::default();
    let mut view = RecordingView::default();
    let mut browser = CallbackBrowser {
        token: "g1",
        tamper_state: false,
        launched: Vec::new(),
    };

    let session = pc_auth::browser_flow::login(
        &api,
        &store,
        &mut view,
        &mut browser,
        Duration::from_secs(10),
    )
    .await
    .expect("login");

    assert_eq!(session.email, "ada@example.com");
    assert!(browser.launched[0].starts_with(&format!("{}/api/v1.1/login/google?", backend.url())));
    let stored = store.snapshot();
    assert_eq!(stored.access_token.as_deref(), Some("g1"));
    assert!(!stored.login_pending);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn google_login_rejects_mismatched_state() {
    let backend = FakeBackend::start(vec![]);
    let api = api_for(&backend);
    let store = MemorySessionStore::default();
    let mut browser = CallbackBrowser {
        token: "g1",
        tamper_state: true,
        launched: Vec::new(),
    };

    let err = pc_auth::browser_flow::login(
        &api,
        &store,
        &mut RecordingView::default(),
        &mut browser,
        Duration::from_secs(10),
    )
    .await
    .unwrap_err();

    assert!(err.to_string().contains("state mismatch"));
    let stored = store.snapshot();
    assert!(!stored.login_pending);
    assert!(stored.access_token.is_none());
}
