//! Scripted upstream server.

use std::collections::VecDeque;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use axum::extract::{Query, State};
use axum::http::{header, HeaderMap, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::{Json, Router};
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use tracing::debug;

/// Body of a canned response.
#[derive(Debug, Clone)]
pub enum ScriptedBody {
    Json(Value),
    /// Sent verbatim, for exercising unreadable bodies.
    Text(String),
}

/// One canned upstream response.
#[derive(Debug, Clone)]
pub struct ScriptedResponse {
    pub status: u16,
    pub body: ScriptedBody,
    /// How long to stall before answering.
    pub delay: Option<Duration>,
}

impl ScriptedResponse {
    /// A 200 response with the given JSON body.
    pub fn ok(body: Value) -> Self {
        Self::json(200, body)
    }

    /// A response with an arbitrary status and JSON body.
    pub fn json(status: u16, body: Value) -> Self {
        Self {
            status,
            body: ScriptedBody::Json(body),
            delay: None,
        }
    }

    /// A response with the given status and a small JSON error body.
    pub fn status(status: u16) -> Self {
        Self::json(status, json!({ "error": format!("scripted status {status}") }))
    }

    /// A response with a raw text body.
    pub fn text(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: ScriptedBody::Text(body.into()),
            delay: None,
        }
    }

    /// Stall for `delay` before answering, e.g. to trip a client timeout.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }
}

impl IntoResponse for ScriptedResponse {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        match self.body {
            ScriptedBody::Json(body) => (status, Json(body)).into_response(),
            ScriptedBody::Text(body) => (status, body).into_response(),
        }
    }
}

/// A request as seen by the mock upstream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedRequest {
    pub path: String,
    /// Raw query string, if any.
    pub query: Option<String>,
    /// Decoded query pairs in the order they were sent.
    pub params: Vec<(String, String)>,
    pub user_agent: Option<String>,
}

impl RecordedRequest {
    /// Decoded query pairs in the order they were sent.
    pub fn query_pairs(&self) -> Vec<(String, String)> {
        self.params.clone()
    }
}

#[derive(Debug, Default)]
struct MockState {
    script: Mutex<VecDeque<ScriptedResponse>>,
    last: Mutex<Option<ScriptedResponse>>,
    requests: Mutex<Vec<RecordedRequest>>,
}

impl MockState {
    /// Pop the next scripted response; the final entry repeats forever.
    fn next_response(&self) -> ScriptedResponse {
        let next = lock(&self.script).pop_front();
        let mut last = lock(&self.last);
        match next {
            Some(response) => {
                *last = Some(response.clone());
                response
            }
            None => last
                .clone()
                .unwrap_or_else(|| ScriptedResponse::ok(json!({}))),
        }
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// An in-process HTTP server impersonating EONET.
///
/// Any `GET` path is answered from the script. The server stops when the
/// `MockUpstream` is dropped.
pub struct MockUpstream {
    addr: SocketAddr,
    base_url: String,
    state: Arc<MockState>,
    handle: JoinHandle<()>,
}

impl MockUpstream {
    /// Bind to an ephemeral localhost port and start serving `script`.
    pub async fn start(script: Vec<ScriptedResponse>) -> std::io::Result<Self> {
        let state = Arc::new(MockState {
            script: Mutex::new(script.into()),
            ..Default::default()
        });

        let app = Router::new().fallback(respond).with_state(state.clone());

        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let handle = tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, app).await {
                debug!("Mock upstream stopped: {}", e);
            }
        });

        Ok(Self {
            addr,
            base_url: format!("http://{addr}"),
            state,
            handle,
        })
    }

    /// Base URL to point a client at, e.g. `http://127.0.0.1:41234`.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Number of requests served so far.
    pub fn hits(&self) -> usize {
        lock(&self.state.requests).len()
    }

    /// Snapshot of every request served so far.
    pub fn requests(&self) -> Vec<RecordedRequest> {
        lock(&self.state.requests).clone()
    }
}

impl Drop for MockUpstream {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

async fn respond(
    State(state): State<Arc<MockState>>,
    uri: Uri,
    headers: HeaderMap,
    Query(params): Query<Vec<(String, String)>>,
) -> ScriptedResponse {
    lock(&state.requests).push(RecordedRequest {
        path: uri.path().to_string(),
        query: uri.query().map(str::to_string),
        params,
        user_agent: headers
            .get(header::USER_AGENT)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string),
    });
    let response = state.next_response();
    debug!(path = %uri.path(), status = response.status, "Mock upstream response");

    if let Some(delay) = response.delay {
        tokio::time::sleep(delay).await;
    }
    response
}
