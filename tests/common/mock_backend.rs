//! Mock REST backend: scripted `{status, data}` replies, captured requests.

#![allow(dead_code)]

use axum::body::Body;
use axum::extract::State;
use axum::http::{Request, Response, StatusCode};
use axum::routing::any;
use axum::Router;
use serde_json::{json, Value};
use std::collections::VecDeque;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::Mutex;

/// A captured request for assertions.
#[derive(Debug, Clone)]
pub struct CapturedRequest {
    pub method: String,
    pub path: String,
    pub query: Option<String>,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl CapturedRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    pub fn json(&self) -> Option<Value> {
        serde_json::from_slice(&self.body).ok()
    }
}

/// A mock response to return.
#[derive(Debug, Clone)]
pub struct MockResponse {
    pub status: u16,
    pub body: Vec<u8>,
    pub delay_ms: u64,
}

impl Default for MockResponse {
    fn default() -> Self {
        Self::json(json!({ "status": 200 }))
    }
}

impl MockResponse {
    pub fn json(body: Value) -> Self {
        Self {
            status: 200,
            body: body.to_string().into_bytes(),
            delay_ms: 0,
        }
    }

    /// HTTP 200 with `{status: 200, data}`.
    pub fn ok(data: Value) -> Self {
        Self::json(json!({ "status": 200, "data": data }))
    }

    /// HTTP `status` with `{status, message}`.
    pub fn error(status: u16, message: &str) -> Self {
        Self {
            status,
            body: json!({ "status": status, "message": message })
                .to_string()
                .into_bytes(),
            delay_ms: 0,
        }
    }

    pub fn with_delay(mut self, ms: u64) -> Self {
        self.delay_ms = ms;
        self
    }
}

#[derive(Clone)]
struct MockState {
    requests: Arc<Mutex<Vec<CapturedRequest>>>,
    responses: Arc<Mutex<VecDeque<MockResponse>>>,
}

/// Mock backend server for testing.
pub struct MockBackend {
    pub addr: SocketAddr,
    state: MockState,
    shutdown: tokio::sync::watch::Sender<bool>,
}

impl MockBackend {
    pub async fn start() -> Self {
        let state = MockState {
            requests: Arc::new(Mutex::new(Vec::new())),
            responses: Arc::new(Mutex::new(VecDeque::new())),
        };

        let (shutdown_tx, mut shutdown_rx) = tokio::sync::watch::channel(false);

        let app = Router::new()
            .route("/{*path}", any(handle_request))
            .with_state(state.clone());

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind mock server");
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async move {
                    let _ = shutdown_rx.changed().await;
                })
                .await
                .ok();
        });

        tokio::time::sleep(tokio::time::Duration::from_millis(10)).await;

        Self {
            addr,
            state,
            shutdown: shutdown_tx,
        }
    }

    /// Enqueue a response for the next request. Requests beyond the queue
    /// get `{"status": 200}`.
    pub async fn enqueue_response(&self, resp: MockResponse) {
        self.state.responses.lock().await.push_back(resp);
    }

    pub async fn captured_requests(&self) -> Vec<CapturedRequest> {
        self.state.requests.lock().await.clone()
    }

    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }
}

impl Drop for MockBackend {
    fn drop(&mut self) {
        let _ = self.shutdown.send(true);
    }
}

async fn handle_request(State(state): State<MockState>, req: Request<Body>) -> Response<Body> {
    let method = req.method().to_string();
    let path = req.uri().path().to_string();
    let query = req.uri().query().map(str::to_string);
    let headers: Vec<(String, String)> = req
        .headers()
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_str().unwrap_or("").to_string()))
        .collect();

    let body = axum::body::to_bytes(req.into_body(), 1024 * 1024)
        .await
        .unwrap_or_default()
        .to_vec();

    state.requests.lock().await.push(CapturedRequest {
        method,
        path,
        query,
        headers,
        body,
    });

    let mock_resp = state
        .responses
        .lock()
        .await
        .pop_front()
        .unwrap_or_default();

    if mock_resp.delay_ms > 0 {
        tokio::time::sleep(tokio::time::Duration::from_millis(mock_resp.delay_ms)).await;
    }

    Response::builder()
        .status(StatusCode::from_u16(mock_resp.status).unwrap())
        .header("content-type", "application/json")
        .body(Body::from(mock_resp.body))
        .unwrap()
}
