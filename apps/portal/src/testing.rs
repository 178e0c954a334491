//! In-memory doubles for controller tests.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::Value;

use crate::api::ApiClient;
use crate::http::{HttpResponse, HttpTransport, Method, TransportError};
use crate::notify::{Notice, NoticeKind, Notifier};

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct RecordedCall {
    pub method: Method,
    pub path: String,
    pub body: Option<Value>,
}

type Reply = Result<HttpResponse, TransportError>;

/// Canned replies keyed by (method, path). Unrouted requests get a 404.
#[derive(Default)]
pub(crate) struct FakeTransport {
    routes: Mutex<HashMap<(Method, String), Reply>>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl FakeTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn client(self: &Arc<Self>) -> ApiClient {
        ApiClient::new(self.clone())
    }

    pub fn respond_json(&self, method: Method, path: &str, status: u16, body: Value) {
        self.route(method, path, Ok(HttpResponse::new(status, body.to_string())));
    }

    pub fn respond_text(&self, method: Method, path: &str, status: u16, body: &str) {
        self.route(method, path, Ok(HttpResponse::new(status, body)));
    }

    pub fn fail(&self, method: Method, path: &str, err: TransportError) {
        self.route(method, path, Err(err));
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn calls_to(&self, method: Method, path: &str) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.method == method && c.path == path)
            .count()
    }

    fn route(&self, method: Method, path: &str, reply: Reply) {
        self.routes
            .lock()
            .unwrap()
            .insert((method, path.to_string()), reply);
    }

    fn handle(&self, method: Method, path: &str, body: Option<&Value>) -> Reply {
        self.calls.lock().unwrap().push(RecordedCall {
            method,
            path: path.to_string(),
            body: body.cloned(),
        });
        self.routes
            .lock()
            .unwrap()
            .get(&(method, path.to_string()))
            .cloned()
            .unwrap_or_else(|| Ok(HttpResponse::new(404, r#"{"message":"no route"}"#)))
    }
}

#[async_trait]
impl HttpTransport for FakeTransport {
    async fn get(&self, path: &str) -> Reply {
        self.handle(Method::Get, path, None)
    }

    async fn post(&self, path: &str, body: &Value) -> Reply {
        self.handle(Method::Post, path, Some(body))
    }

    async fn put(&self, path: &str, body: &Value) -> Reply {
        self.handle(Method::Put, path, Some(body))
    }

    async fn delete(&self, path: &str) -> Reply {
        self.handle(Method::Delete, path, None)
    }
}

#[derive(Default)]
pub(crate) struct RecordingNotifier {
    notices: Mutex<Vec<Notice>>,
}

impl RecordingNotifier {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn last(&self) -> Option<Notice> {
        self.notices.lock().unwrap().last().cloned()
    }

    pub fn count(&self, kind: NoticeKind) -> usize {
        self.notices
            .lock()
            .unwrap()
            .iter()
            .filter(|n| n.kind == kind)
            .count()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notice: Notice) {
        self.notices.lock().unwrap().push(notice);
    }
}
