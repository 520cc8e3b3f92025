//! Shared test utilities and mock infrastructure.

#![allow(dead_code, unused_imports)]

pub mod mock_backend;

use async_trait::async_trait;
use parking_lot::Mutex;
use social_sync::actions::{Dispatcher, Viewer};
use social_sync::api::{ApiError, ApiRequest, ApiResponse, Transport};
use social_sync::app::App;
use social_sync::config::{Config, ResponseOrdering};
use social_sync::reconcile::{Reconciler, Sequencer};
use social_sync::session::{AccountType, AuthToken, Session, SessionStore};
use social_sync::store::SharedStore;
use std::collections::VecDeque;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;

pub const VIEWER: &str = "me";

/// Write a config file pointing at `base_url`.
pub fn temp_config(base_url: &str, ordering: &str) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config_path = temp_dir.path().join("config.toml");

    let content = format!(
        r#"[api]
base_url = "{base_url}"
timeout_seconds = 5
connect_timeout_seconds = 2

[reconcile]
ordering = "{ordering}"

[session]
path = "{session}"
"#,
        session = temp_dir.path().join("session.json").display(),
    );

    std::fs::write(&config_path, content).expect("Failed to write config");
    (temp_dir, config_path)
}

/// An `App` against `base_url`, logged in as [`VIEWER`].
pub fn make_app(base_url: &str) -> (TempDir, App) {
    let (dir, config_path) = temp_config(base_url, "last_request");
    let config = Config::load_from(&config_path).expect("config");
    let sessions = SessionStore::at(config.session.path.as_deref());
    let mut app = App::new(&config, sessions).expect("app");
    app.login(Session::new(VIEWER, AuthToken::new("test-token"), AccountType::Personal))
        .expect("login");
    (dir, app)
}

// -- Scripted transport -------------------------------------------------------

/// One scripted reply: a result released after `delay`.
pub struct Reply {
    pub result: Result<ApiResponse, ApiError>,
    pub delay: Duration,
}

impl Reply {
    pub fn ok(data: serde_json::Value) -> Self {
        Self {
            result: Ok(ApiResponse::new(200, Some(data))),
            delay: Duration::ZERO,
        }
    }

    pub fn status(status: u16) -> Self {
        Self {
            result: Ok(ApiResponse::new(status, None)),
            delay: Duration::ZERO,
        }
    }

    pub fn timeout() -> Self {
        Self {
            result: Err(ApiError::Timeout { duration: 30 }),
            delay: Duration::ZERO,
        }
    }

    pub fn after(mut self, ms: u64) -> Self {
        self.delay = Duration::from_millis(ms);
        self
    }
}

/// Transport that hands out queued replies in request order and records
/// what was sent.
#[derive(Default)]
pub struct ScriptedTransport {
    replies: Mutex<VecDeque<Reply>>,
    sent: Mutex<Vec<ApiRequest>>,
}

impl ScriptedTransport {
    pub fn new(replies: Vec<Reply>) -> Arc<Self> {
        Arc::new(Self {
            replies: Mutex::new(replies.into()),
            sent: Mutex::new(Vec::new()),
        })
    }

    pub fn sent(&self) -> Vec<ApiRequest> {
        self.sent.lock().clone()
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, ApiError> {
        self.sent.lock().push(request);
        let reply = self.replies.lock().pop_front().unwrap_or(Reply::status(200));
        if !reply.delay.is_zero() {
            tokio::time::sleep(reply.delay).await;
        }
        reply.result
    }
}

pub fn reconciler(transport: Arc<ScriptedTransport>, ordering: ResponseOrdering) -> Reconciler {
    Reconciler::new(
        SharedStore::new(),
        transport,
        Arc::new(Sequencer::new(ordering)),
    )
}

/// Dispatcher for a logged-in personal account.
pub fn dispatcher(transport: Arc<ScriptedTransport>, ordering: ResponseOrdering) -> Dispatcher {
    Dispatcher::new(
        reconciler(transport, ordering),
        Some(Viewer::new(VIEWER, AccountType::Personal)),
    )
}
