//! Loopback fake of the PromptCrafter backend for integration tests.
//!
//! Routes are matched in order on method, path (query ignored) and, when
//! set, the exact bearer token. Unmatched requests get a 404.

#![allow(dead_code)]

use std::io::Read;
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;

#[derive(Debug, Clone)]
pub struct Route {
    method: &'static str,
    path: String,
    bearer: Option<String>,
    status: u16,
    body: String,
}

impl Route {
    pub fn get(path: &str) -> Self {
        Self::new("GET", path)
    }

    pub fn post(path: &str) -> Self {
        Self::new("POST", path)
    }

    fn new(method: &'static str, path: &str) -> Self {
        Self {
            method,
            path: path.to_string(),
            bearer: None,
            status: 200,
            body: "{}".to_string(),
        }
    }

    /// Only match requests carrying `Authorization: Bearer <token>`.
    pub fn bearer(mut self, token: &str) -> Self {
        self.bearer = Some(token.to_string());
        self
    }

    pub fn respond(mut self, status: u16, body: serde_json::Value) -> Self {
        self.status = status;
        self.body = body.to_string();
        self
    }

    fn matches(&self, request: &Recorded) -> bool {
        self.method == request.method
            && self.path == request.path
            && self.bearer.as_ref().is_none_or(|token| {
                request.authorization.as_deref() == Some(format!("Bearer {token}").as_str())
            })
    }
}

#[derive(Debug, Clone)]
pub struct Recorded {
    pub method: String,
    pub path: String,
    pub query: Option<String>,
    pub authorization: Option<String>,
    pub content_type: Option<String>,
    pub body: String,
}

pub struct FakeBackend {
    server: Arc<tiny_http::Server>,
    base_url: String,
    requests: Arc<Mutex<Vec<Recorded>>>,
    handle: Option<JoinHandle<()>>,
}

impl FakeBackend {
    pub fn start(routes: Vec<Route>) -> Self {
        let server = Arc::new(tiny_http::Server::http("127.0.0.1:0").expect("bind fake backend"));
        let port = server.server_addr().to_ip().expect("ip listener").port();
        let requests = Arc::new(Mutex::new(Vec::new()));

        let handle = {
            let server = Arc::clone(&server);
            let requests = Arc::clone(&requests);
            std::thread::spawn(move || {
                for mut request in server.incoming_requests() {
                    let recorded = record(&mut request);
                    let (status, body) = routes
                        .iter()
                        .find(|route| route.matches(&recorded))
                        .map_or((404, r#"{"detail":"Not Found"}"#.to_string()), |route| {
                            (route.status, route.body.clone())
                        });
                    requests.lock().expect("requests lock").push(recorded);

                    let header =
                        tiny_http::Header::from_bytes("Content-Type", "application/json").unwrap();
                    let response = tiny_http::Response::from_string(body)
                        .with_status_code(status)
                        .with_header(header);
                    let _ = request.respond(response);
                }
            })
        };

        Self {
            server,
            base_url: format!("http://127.0.0.1:{port}"),
            requests,
            handle: Some(handle),
        }
    }

    pub fn url(&self) -> &str {
        &self.base_url
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.requests.lock().expect("requests lock").clone()
    }

    pub fn hits(&self, method: &str, path: &str) -> usize {
        self.requests()
            .iter()
            .filter(|r| r.method == method && r.path == path)
            .count()
    }
}

impl Drop for FakeBackend {
    fn drop(&mut self) {
        self.server.unblock();
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

fn header(request: &tiny_http::Request, name: &'static str) -> Option<String> {
    request
        .headers()
        .iter()
        .find(|h| h.field.equiv(name))
        .map(|h| h.value.as_str().to_string())
}

fn record(request: &mut tiny_http::Request) -> Recorded {
    let (path, query) = match request.url().split_once('?') {
        Some((path, query)) => (path.to_string(), Some(query.to_string())),
        None => (request.url().to_string(), None),
    };
    let mut body = String::new();
    let _ = request.as_reader().read_to_string(&mut body);
    Recorded {
        method: request.method().to_string(),
        path,
        query,
        authorization: header(request, "Authorization"),
        content_type: header(request, "Content-Type"),
        body,
    }
}
