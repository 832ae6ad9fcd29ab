//! In-process stand-in for the AMIE and usage APIs.
//!
//! Records every request and answers from a table of canned replies keyed by
//! `"METHOD /path"`. Unregistered routes get a 404.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::Router;
use axum::extract::{Query, State};
use axum::http::{HeaderMap, Method, StatusCode, Uri};

use crate::AmieConfig;

#[derive(Clone, Debug)]
pub(crate) struct Seen {
    pub method: Method,
    pub path: String,
    pub query: HashMap<String, String>,
    pub headers: HeaderMap,
    pub body: String,
}

impl Seen {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|value| value.to_str().ok())
    }

    pub fn json(&self) -> serde_json::Value {
        serde_json::from_str(&self.body).unwrap()
    }
}

#[derive(Clone, Default)]
struct Shared {
    seen: Arc<Mutex<Vec<Seen>>>,
    replies: Arc<Mutex<HashMap<String, (u16, String)>>>,
}

pub(crate) struct TestServer {
    pub url: String,
    shared: Shared,
}

impl TestServer {
    pub async fn start() -> Self {
        let shared = Shared::default();
        let app = Router::new().fallback(record).with_state(shared.clone());
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let url = format!("http://{}/", listener.local_addr().unwrap());
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        Self { url, shared }
    }

    pub fn reply(&self, method: &str, path: &str, status: u16, body: impl Into<String>) {
        self.shared
            .replies
            .lock()
            .unwrap()
            .insert(format!("{method} {path}"), (status, body.into()));
    }

    pub fn seen(&self) -> Vec<Seen> {
        self.shared.seen.lock().unwrap().clone()
    }

    pub fn last(&self) -> Seen {
        self.seen().pop().unwrap()
    }

    /// Site `NCSA`, key `secret`, both base URLs pointing here.
    pub fn config(&self) -> AmieConfig {
        AmieConfig::new("NCSA", "secret")
            .with_amie_url(&self.url)
            .with_usage_url(&self.url)
    }
}

async fn record(
    State(shared): State<Shared>,
    method: Method,
    uri: Uri,
    Query(query): Query<HashMap<String, String>>,
    headers: HeaderMap,
    body: String,
) -> (StatusCode, String) {
    let key = format!("{method} {}", uri.path());
    shared.seen.lock().unwrap().push(Seen {
        method,
        path: uri.path().to_string(),
        query,
        headers,
        body,
    });
    let reply = shared.replies.lock().unwrap().get(&key).cloned();
    match reply {
        Some((status, body)) => (StatusCode::from_u16(status).unwrap(), body),
        None => (StatusCode::NOT_FOUND, String::new()),
    }
}
