#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::Router;
use axum::body::{Body, Bytes};
use axum::http::{Request, StatusCode};
use axum::response::Response;
use chat_ui_proxy::config::Config;
use chat_ui_proxy::message::ChatRequest;
use chat_ui_proxy::routes::create_router;
use chat_ui_proxy::services::diagnostics::{Diagnostics, Failure};
use chat_ui_proxy::services::upstream::{UpstreamClient, UpstreamError, UpstreamResponse};
use chat_ui_proxy::state::AppState;
use tokio::sync::Notify;

pub fn public_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("public")
}

pub fn test_config(api_url: &str) -> Config {
    Config {
        api_url: api_url.to_string(),
        api_key: "test-key-123".to_string(),
        public_dir: public_dir(),
        ..Config::default()
    }
}

pub fn build_app(
    config: Config,
    upstream: Arc<dyn UpstreamClient>,
    diagnostics: Arc<dyn Diagnostics>,
) -> Router {
    let public_dir = config.public_dir.clone();
    let state = Arc::new(AppState::new(config, upstream, diagnostics));
    create_router(&public_dir).with_state(state)
}

pub fn chat_request(body: impl Into<Body>) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/chat")
        .header("content-type", "application/json")
        .body(body.into())
        .unwrap()
}

pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

pub async fn body_bytes(response: Response) -> Bytes {
    axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap()
}

#[derive(Clone)]
pub enum Scripted {
    Respond(StatusCode, &'static str),
    Unavailable,
    RequestError,
}

/// Upstream double that answers from a script and records every call.
pub struct MockUpstream {
    script: Scripted,
    calls: Mutex<Vec<ChatRequest>>,
}

impl MockUpstream {
    pub fn new(script: Scripted) -> Arc<Self> {
        Arc::new(Self {
            script,
            calls: Mutex::new(Vec::new()),
        })
    }

    pub fn calls(&self) -> Vec<ChatRequest> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl UpstreamClient for MockUpstream {
    async fn send(&self, request: &ChatRequest) -> Result<UpstreamResponse, UpstreamError> {
        self.calls.lock().unwrap().push(request.clone());
        match &self.script {
            Scripted::Respond(status, body) => Ok(UpstreamResponse {
                status: *status,
                body: Bytes::from_static(body.as_bytes()),
            }),
            Scripted::Unavailable => Err(UpstreamError::Unavailable(
                "connection refused".to_string(),
            )),
            Scripted::RequestError => Err(UpstreamError::Request(
                "builder error: invalid header value".to_string(),
            )),
        }
    }
}

/// Upstream double that never answers and flags when its call is dropped.
pub struct HangingUpstream {
    pub started: Arc<Notify>,
    pub dropped: Arc<AtomicBool>,
}

struct DropFlag(Arc<AtomicBool>);

impl Drop for DropFlag {
    fn drop(&mut self) {
        self.0.store(true, Ordering::SeqCst);
    }
}

#[async_trait]
impl UpstreamClient for HangingUpstream {
    async fn send(&self, _request: &ChatRequest) -> Result<UpstreamResponse, UpstreamError> {
        let _flag = DropFlag(self.dropped.clone());
        self.started.notify_one();
        std::future::pending::<Result<UpstreamResponse, UpstreamError>>().await
    }
}

#[derive(Default)]
pub struct RecordingDiagnostics {
    pub warnings: Mutex<Vec<Failure>>,
    pub errors: Mutex<Vec<Failure>>,
}

impl RecordingDiagnostics {
    pub fn warnings(&self) -> Vec<Failure> {
        self.warnings.lock().unwrap().clone()
    }

    pub fn errors(&self) -> Vec<Failure> {
        self.errors.lock().unwrap().clone()
    }
}

impl Diagnostics for RecordingDiagnostics {
    fn warn(&self, failure: &Failure) {
        self.warnings.lock().unwrap().push(failure.clone());
    }

    fn error(&self, failure: &Failure) {
        self.errors.lock().unwrap().push(failure.clone());
    }
}
