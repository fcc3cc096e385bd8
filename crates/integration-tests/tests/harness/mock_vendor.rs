//! Mock vendor backend serving the Anthropic, Google and `OpenAI` endpoints
//!
//! Records every request it receives and answers with canned success
//! payloads, or with a fixed failure when started that way.

use std::net::SocketAddr;
use std::sync::{Arc, Mutex, PoisonError};

use axum::body::Bytes;
use axum::extract::{Path, RawQuery, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::{Json, Router, routing};
use serde_json::{Value, json};
use tokio_util::sync::CancellationToken;

/// Text every successful mock response carries
pub const REPLY: &str = "{\"total\": 1250.00}";

/// A request received by the mock
#[derive(Debug, Clone)]
pub struct Recorded {
    pub vendor: &'static str,
    pub path: String,
    pub query: Option<String>,
    pub headers: HeaderMap,
    pub body: Value,
}

/// Canned failure returned instead of a success payload
#[derive(Debug, Clone)]
struct Failure {
    status: StatusCode,
    content_type: &'static str,
    body: String,
}

struct MockVendorState {
    requests: Mutex<Vec<Recorded>>,
    failure: Option<Failure>,
}

/// Mock vendor backend
pub struct MockVendor {
    addr: SocketAddr,
    shutdown: CancellationToken,
    state: Arc<MockVendorState>,
}

impl MockVendor {
    /// Start a mock that answers every call successfully
    pub async fn start() -> anyhow::Result<Self> {
        Self::start_inner(None).await
    }

    /// Start a mock that answers every call with `status` and a JSON body
    pub async fn start_failing_json(status: u16, body: &Value) -> anyhow::Result<Self> {
        Self::start_inner(Some(Failure {
            status: StatusCode::from_u16(status)?,
            content_type: "application/json",
            body: body.to_string(),
        }))
        .await
    }

    /// Start a mock that answers every call with `status` and a plain-text body
    pub async fn start_failing_text(status: u16, body: &str) -> anyhow::Result<Self> {
        Self::start_inner(Some(Failure {
            status: StatusCode::from_u16(status)?,
            content_type: "text/plain",
            body: body.to_owned(),
        }))
        .await
    }

    async fn start_inner(failure: Option<Failure>) -> anyhow::Result<Self> {
        let state = Arc::new(MockVendorState {
            requests: Mutex::new(Vec::new()),
            failure,
        });

        let app = Router::new()
            .route("/v1/messages", routing::post(handle_anthropic))
            .route("/v1beta/models/{target}", routing::post(handle_google))
            .route("/v1/chat/completions", routing::post(handle_openai))
            .with_state(Arc::clone(&state));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let shutdown = CancellationToken::new();
        let shutdown_clone = shutdown.clone();

        tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async move {
                    shutdown_clone.cancelled().await;
                })
                .await
                .ok();
        });

        Ok(Self { addr, shutdown, state })
    }

    pub fn anthropic_base_url(&self) -> String {
        format!("http://{}/v1", self.addr)
    }

    pub fn google_base_url(&self) -> String {
        format!("http://{}/v1beta", self.addr)
    }

    pub fn openai_base_url(&self) -> String {
        format!("http://{}/v1", self.addr)
    }

    /// Every request received so far, oldest first
    pub fn requests(&self) -> Vec<Recorded> {
        self.state
            .requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Number of requests received
    pub fn request_count(&self) -> usize {
        self.requests().len()
    }

    /// The only request received, panicking if there was not exactly one
    pub fn single_request(&self) -> Recorded {
        let mut requests = self.requests();
        assert_eq!(requests.len(), 1, "expected exactly one vendor request");
        requests.remove(0)
    }
}

impl Drop for MockVendor {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}

impl MockVendorState {
    fn record(&self, vendor: &'static str, path: String, query: Option<String>, headers: HeaderMap, body: &Bytes) {
        let body = serde_json::from_slice(body).unwrap_or(Value::Null);

        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(Recorded {
                vendor,
                path,
                query,
                headers,
                body,
            });
    }

    fn respond(&self, success: impl FnOnce() -> Value) -> Response {
        match &self.failure {
            Some(failure) => (
                failure.status,
                [(header::CONTENT_TYPE, failure.content_type)],
                failure.body.clone(),
            )
                .into_response(),
            None => Json(success()).into_response(),
        }
    }
}

async fn handle_anthropic(
    State(state): State<Arc<MockVendorState>>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    state.record("anthropic", "/v1/messages".to_owned(), None, headers, &body);

    let model = requested_model(&body);
    state.respond(|| {
        json!({
            "id": "msg_mock",
            "type": "message",
            "role": "assistant",
            "model": model,
            "content": [{"type": "text", "text": REPLY}],
            "stop_reason": "end_turn",
            "usage": {"input_tokens": 120, "output_tokens": 12}
        })
    })
}

async fn handle_google(
    State(state): State<Arc<MockVendorState>>,
    Path(target): Path<String>,
    RawQuery(query): RawQuery,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    state.record("google", format!("/v1beta/models/{target}"), query, headers, &body);

    state.respond(|| {
        json!({
            "candidates": [{
                "content": {"role": "model", "parts": [{"text": REPLY}]},
                "finishReason": "STOP"
            }],
            "usageMetadata": {"promptTokenCount": 120, "candidatesTokenCount": 12, "totalTokenCount": 132}
        })
    })
}

async fn handle_openai(
    State(state): State<Arc<MockVendorState>>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    state.record("openai", "/v1/chat/completions".to_owned(), None, headers, &body);

    let model = requested_model(&body);
    state.respond(|| {
        json!({
            "id": "chatcmpl-mock",
            "object": "chat.completion",
            "model": format!("{model}-2024-08-06"),
            "choices": [{
                "index": 0,
                "message": {"role": "assistant", "content": REPLY},
                "finish_reason": "stop"
            }],
            "usage": {"prompt_tokens": 120, "completion_tokens": 12, "total_tokens": 132}
        })
    })
}

fn requested_model(body: &Bytes) -> String {
    serde_json::from_slice::<Value>(body)
        .ok()
        .and_then(|v| v.get("model").and_then(Value::as_str).map(str::to_owned))
        .unwrap_or_default()
}
