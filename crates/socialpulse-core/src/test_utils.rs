//! Test utilities for socialpulse-core
//!
//! This module provides a mock run-flow server that records every request
//! it receives and answers with a configurable status and body.

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::{
    extract::State,
    http::{header, HeaderMap, StatusCode, Uri},
    response::{IntoResponse, Response},
    routing::post,
    Router,
};
use serde_json::{json, Value};
use tokio::sync::oneshot;

/// A request as seen by the mock server
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub path: String,
    pub authorization: Option<String>,
    pub content_type: Option<String>,
    /// Parsed JSON body (`Value::Null` if it was not JSON)
    pub body: Value,
}

/// How the server answers
#[derive(Debug, Clone)]
enum Reply {
    /// Well-formed response echoing the prompt's first line
    Echo,
    Fixed { status: u16, body: String },
}

struct ServerState {
    reply: Reply,
    delay: Option<Duration>,
    requests: Vec<RecordedRequest>,
}

type SharedState = Arc<Mutex<ServerState>>;

/// Mock run-flow server for tests
pub struct MockInsightServer {
    addr: SocketAddr,
    state: SharedState,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl MockInsightServer {
    /// Start a server that answers every prompt with
    /// `Insight for: <first line of the prompt>`
    pub async fn start() -> Self {
        Self::spawn(Reply::Echo, None).await
    }

    /// Start a server that always answers with `status` and `body`
    pub async fn with_response(status: u16, body: &str) -> Self {
        Self::spawn(
            Reply::Fixed {
                status,
                body: body.to_string(),
            },
            None,
        )
        .await
    }

    /// Start a server returning a well-formed response carrying `text`
    pub async fn with_reply_text(text: &str) -> Self {
        Self::with_response(200, &well_formed_response(text).to_string()).await
    }

    /// Start an echo server that waits `delay` before answering
    pub async fn with_delay(delay: Duration) -> Self {
        Self::spawn(Reply::Echo, Some(delay)).await
    }

    async fn spawn(reply: Reply, delay: Option<Duration>) -> Self {
        let state = Arc::new(Mutex::new(ServerState {
            reply,
            delay,
            requests: Vec::new(),
        }));

        let app = Router::new()
            .route("/lf/:namespace/api/v1/run/:flow", post(handle_run))
            .with_state(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let (shutdown_tx, shutdown_rx) = oneshot::channel();

        tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async {
                    shutdown_rx.await.ok();
                })
                .await
                .unwrap();
        });

        Self {
            addr,
            state,
            shutdown_tx: Some(shutdown_tx),
        }
    }

    /// Get the base URL for this mock server
    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Requests received so far, oldest first
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state.lock().unwrap().requests.clone()
    }

    /// Number of requests received so far
    pub fn hits(&self) -> usize {
        self.state.lock().unwrap().requests.len()
    }

    /// Stop the mock server
    pub fn stop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

impl Drop for MockInsightServer {
    fn drop(&mut self) {
        self.stop();
    }
}

/// `{"outputs":[{"outputs":[{"results":{"message":{"text": ...}}}]}]}`
pub fn well_formed_response(text: &str) -> Value {
    json!({
        "session_id": "mock-session",
        "outputs": [{
            "inputs": {"input_value": ""},
            "outputs": [{
                "results": {"message": {"text": text, "sender": "Machine"}}
            }]
        }]
    })
}

/// Run-flow endpoint
async fn handle_run(
    State(state): State<SharedState>,
    uri: Uri,
    headers: HeaderMap,
    body: String,
) -> Response {
    let header_value = |name: header::HeaderName| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(|s| s.to_string())
    };
    let parsed: Value = serde_json::from_str(&body).unwrap_or(Value::Null);

    let (reply, delay) = {
        let mut state = state.lock().unwrap();
        state.requests.push(RecordedRequest {
            path: uri.path().to_string(),
            authorization: header_value(header::AUTHORIZATION),
            content_type: header_value(header::CONTENT_TYPE),
            body: parsed.clone(),
        });
        (state.reply.clone(), state.delay)
    };

    if let Some(delay) = delay {
        tokio::time::sleep(delay).await;
    }

    let (status, body) = match reply {
        Reply::Echo => {
            let prompt = parsed["input_value"].as_str().unwrap_or_default();
            let first_line = prompt.lines().next().unwrap_or_default();
            (
                200,
                well_formed_response(&format!("Insight for: {first_line}")).to_string(),
            )
        }
        Reply::Fixed { status, body } => (status, body),
    };

    let status = StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, [(header::CONTENT_TYPE, "application/json")], body).into_response()
}
