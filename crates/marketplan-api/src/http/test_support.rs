//! Stub upstream servers and an in-process app for end-to-end tests.

use std::sync::{Arc, Mutex};
use std::sync::atomic::{AtomicUsize, Ordering};

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::routing::post;
use axum::{Json, Router};
use serde_json::{json, Value};

use marketplan_infra::bridge::SECRET_HEADER;
use marketplan_infra::secret::Credentials;
use marketplan_types::config::ServiceConfig;

use crate::http::router::build_router;
use crate::state::AppState;

/// Bind a router to an ephemeral localhost port and return its base URL.
pub async fn serve(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}")
}

/// Generation provider stub answering every call with a fixed status.
#[derive(Clone)]
pub struct GenerationStub {
    pub base_url: String,
    pub calls: Arc<AtomicUsize>,
    pub prompts: Arc<Mutex<Vec<String>>>,
}

#[derive(Clone, Default)]
struct GenerationLog {
    calls: Arc<AtomicUsize>,
    prompts: Arc<Mutex<Vec<String>>>,
}

impl GenerationStub {
    pub async fn spawn(status: StatusCode, content: &str) -> Self {
        let log = GenerationLog::default();
        let reply = if status.is_success() {
            json!({ "choices": [{ "message": { "role": "assistant", "content": content } }] })
        } else {
            json!({ "error": { "message": content } })
        };
        let router = Router::new()
            .route(
                "/v1/chat/completions",
                post(move |State(log): State<GenerationLog>, Json(body): Json<Value>| {
                    let reply = reply.clone();
                    async move {
                        log.calls.fetch_add(1, Ordering::SeqCst);
                        if let Some(prompt) = body["messages"][0]["content"].as_str() {
                            log.prompts.lock().unwrap().push(prompt.to_string());
                        }
                        (status, Json(reply))
                    }
                }),
            )
            .with_state(log.clone());
        let base = serve(router).await;
        Self {
            base_url: format!("{base}/v1"),
            calls: log.calls,
            prompts: log.prompts,
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Prompt text of every call received so far.
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

/// Bridge stub recording every payload it receives.
#[derive(Clone)]
pub struct BridgeStub {
    pub url: String,
    pub received: Arc<Mutex<Vec<(Option<String>, Value)>>>,
}

impl BridgeStub {
    pub async fn spawn(status: StatusCode) -> Self {
        let received: Arc<Mutex<Vec<(Option<String>, Value)>>> = Arc::default();
        let router = Router::new()
            .route(
                "/plans",
                post(
                    move |State(received): State<Arc<Mutex<Vec<(Option<String>, Value)>>>>,
                          headers: HeaderMap,
                          Json(body): Json<Value>| async move {
                        let secret = headers
                            .get(SECRET_HEADER)
                            .and_then(|v| v.to_str().ok())
                            .map(str::to_string);
                        received.lock().unwrap().push((secret, body));
                        (status, Json(json!({ "ok": status.is_success() })))
                    },
                ),
            )
            .with_state(received.clone());
        let base = serve(router).await;
        Self {
            url: format!("{base}/plans"),
            received,
        }
    }

    pub fn received(&self) -> Vec<(Option<String>, Value)> {
        self.received.lock().unwrap().clone()
    }
}

/// Fully configured state pointing at the two stubs.
pub fn state_for(generation: &GenerationStub, bridge: &BridgeStub) -> AppState {
    let mut config = ServiceConfig::default();
    config.generation.base_url = generation.base_url.clone();
    config.generation.timeout_secs = 5;
    config.bridge.url = Some(bridge.url.clone());
    config.bridge.timeout_secs = 5;

    let credentials = Credentials::from_lookup(|key| match key {
        "OPENAI_API_KEY" => Some("sk-test".to_string()),
        "GIBLINK_BRIDGE_SECRET_KEY" => Some("bridge-secret".to_string()),
        _ => None,
    });

    AppState::new(config, credentials, Vec::new())
}

/// Serve the application router and return its base URL.
pub async fn spawn_app(state: AppState) -> String {
    serve(build_router(state)).await
}
