//! Loopback fake of the PromptCrafter backend for the prompt-side tests.
//!
//! Routes are matched in order on method and path (query ignored).
//! Unmatched requests get a 404.

#![allow(dead_code)]

use std::io::Read;
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;

#[derive(Debug, Clone)]
pub struct Route {
    method: &'static str,
    path: String,
    status: u16,
    body: String,
    location: Option<String>,
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
            status: 200,
            body: "{}".to_string(),
            location: None,
        }
    }

    pub fn respond(mut self, status: u16, body: serde_json::Value) -> Self {
        self.status = status;
        self.body = body.to_string();
        self
    }

    /// Answer with a `302 Found` pointing at `location`.
    pub fn redirect(mut self, location: &str) -> Self {
        self.status = 302;
        self.body = String::new();
        self.location = Some(location.to_string());
        self
    }
}

#[derive(Debug, Clone)]
pub struct Recorded {
    pub method: String,
    pub path: String,
    pub content_type: Option<String>,
    pub authorization: Option<String>,
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
                    let route = routes
                        .iter()
                        .find(|r| r.method == recorded.method && r.path == recorded.path);
                    requests.lock().expect("requests lock").push(recorded);

                    let mut response = match route {
                        Some(route) => tiny_http::Response::from_string(route.body.clone())
                            .with_status_code(route.status),
                        None => tiny_http::Response::from_string(r#"{"detail":"Not Found"}"#)
                            .with_status_code(404),
                    };
                    response.add_header(
                        tiny_http::Header::from_bytes("Content-Type", "application/json").unwrap(),
                    );
                    if let Some(location) = route.and_then(|r| r.location.as_deref()) {
                        response.add_header(
                            tiny_http::Header::from_bytes("Location", location).unwrap(),
                        );
                    }
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
    let path = request
        .url()
        .split_once('?')
        .map_or_else(|| request.url().to_string(), |(path, _)| path.to_string());
    let mut body = String::new();
    let _ = request.as_reader().read_to_string(&mut body);
    Recorded {
        method: request.method().to_string(),
        path,
        content_type: header(request, "Content-Type"),
        authorization: header(request, "Authorization"),
        body,
    }
}
