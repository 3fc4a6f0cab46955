//! Fake search API server for integration tests.
//!
//! Spins up a minimal `axum` HTTP server on a random TCP port bound to
//! 127.0.0.1 and serves `GET /search?q=...`. Replies are configured per query
//! text (with a fallback for everything else), and every decoded `q` value is
//! recorded so tests can check the encoding round trip.
//!
//! # Example
//!
//! ```rust,no_run
//! # async fn demo() {
//! use common::fake_search_api::{FakeSearchApi, Reply};
//!
//! let api = FakeSearchApi::start().await.unwrap();
//! api.reply("rust", Reply::results(&[hit("https://a.example", 0.9321)])).await;
//!
//! // Point the transport at api.endpoint()
//! let endpoint = api.endpoint();
//! # }
//! ```

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use scout_core::ResultItem;
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::Mutex;

/// A canned HTTP response.
#[derive(Debug, Clone)]
pub struct Reply {
    status: StatusCode,
    body: String,
    delay: Duration,
}

impl Reply {
    /// `200 OK` with `{"results": [...]}`.
    pub fn results(items: &[ResultItem]) -> Self {
        let body = serde_json::json!({ "results": items }).to_string();
        Self::raw(body)
    }

    /// `200 OK` with an arbitrary body.
    pub fn raw(body: impl Into<String>) -> Self {
        Self { status: StatusCode::OK, body: body.into(), delay: Duration::ZERO }
    }

    /// Empty body with the given status code.
    pub fn status(code: u16) -> Self {
        Self {
            status: StatusCode::from_u16(code).unwrap(),
            body: String::new(),
            delay: Duration::ZERO,
        }
    }

    /// Hold the response back for `delay` before sending it.
    pub fn delayed(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

struct ApiState {
    replies: HashMap<String, Reply>,
    fallback: Reply,
    received: Vec<String>,
}

/// Handle to the running fake search API.
pub struct FakeSearchApi {
    addr: SocketAddr,
    state: Arc<Mutex<ApiState>>,
}

impl FakeSearchApi {
    /// Start the server on a random port. Unknown queries get an empty
    /// result list until [`FakeSearchApi::fallback`] says otherwise.
    pub async fn start() -> std::io::Result<Self> {
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let state = Arc::new(Mutex::new(ApiState {
            replies: HashMap::new(),
            fallback: Reply::results(&[]),
            received: Vec::new(),
        }));

        let app = Router::new()
            .route("/search", get(search))
            .with_state(state.clone());

        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Ok(Self { addr, state })
    }

    /// Full search endpoint, e.g. `http://127.0.0.1:PORT/search`.
    pub fn endpoint(&self) -> String {
        format!("http://{}/search", self.addr)
    }

    pub async fn reply(&self, query: &str, reply: Reply) {
        self.state.lock().await.replies.insert(query.to_string(), reply);
    }

    pub async fn fallback(&self, reply: Reply) {
        self.state.lock().await.fallback = reply;
    }

    /// Decoded `q` values in arrival order.
    pub async fn received(&self) -> Vec<String> {
        self.state.lock().await.received.clone()
    }
}

async fn search(
    Query(params): Query<HashMap<String, String>>,
    State(state): State<Arc<Mutex<ApiState>>>,
) -> Response {
    let query = params.get("q").cloned().unwrap_or_default();
    let reply = {
        let mut state = state.lock().await;
        state.received.push(query.clone());
        state.replies.get(&query).cloned().unwrap_or_else(|| state.fallback.clone())
    };

    if !reply.delay.is_zero() {
        tokio::time::sleep(reply.delay).await;
    }
    (
        reply.status,
        [(axum::http::header::CONTENT_TYPE, "application/json")],
        reply.body,
    )
        .into_response()
}
