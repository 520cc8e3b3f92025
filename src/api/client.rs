use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::RwLock;
use reqwest::{Client, Method, Url};
use serde_json::Value;
use tokio::time::timeout;

use crate::api::endpoint::{ApiRequest, HttpMethod};
use crate::api::error::ApiError;
use crate::api::response::ApiResponse;
use crate::config::ApiConfig;

/// Sends interaction requests to the backend.
///
/// The reconciler only depends on this trait, so tests can script
/// responses without a server.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, ApiError>;
}

/// HTTP transport over `reqwest`.
///
/// Every request carries `Authorization: Bearer <token>` once a token is set.
#[derive(Clone)]
pub struct RestClient {
    client: Client,
    base_url: String,
    token: Arc<RwLock<Option<String>>>,
    request_timeout: Duration,
}

impl RestClient {
    pub fn new(config: &ApiConfig) -> Result<Self, ApiError> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(config.connect_timeout_seconds as u64))
            .build()
            .map_err(ApiError::ClientBuild)?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            token: Arc::new(RwLock::new(None)),
            request_timeout: Duration::from_secs(config.timeout_seconds as u64),
        })
    }

    pub fn set_token(&self, token: Option<String>) {
        *self.token.write() = token;
    }

    pub fn has_token(&self) -> bool {
        self.token.read().is_some()
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    pub async fn get(&self, path: &str, query: &[(&str, &str)]) -> Result<ApiResponse, ApiError> {
        if query.is_empty() {
            return self.send(ApiRequest::get(path)).await;
        }

        let mut url = Url::parse(&self.url(path))
            .map_err(|e| ApiError::InvalidUrl(format!("invalid url for '{}': {}", path, e)))?;
        url.query_pairs_mut().extend_pairs(query.iter());
        let relative = match url.query() {
            Some(q) => format!("{}?{}", path, q),
            None => path.to_string(),
        };
        self.send(ApiRequest::get(relative)).await
    }

    pub async fn post(&self, path: &str, body: Value) -> Result<ApiResponse, ApiError> {
        self.send(ApiRequest::post(path, body)).await
    }

    pub async fn put(&self, path: &str, body: Value) -> Result<ApiResponse, ApiError> {
        self.send(ApiRequest::put(path, body)).await
    }

    pub async fn del(&self, path: &str) -> Result<ApiResponse, ApiError> {
        self.send(ApiRequest::delete(path)).await
    }

    async fn do_send(&self, request: ApiRequest) -> Result<ApiResponse, ApiError> {
        let url = self.url(&request.path);
        let method = match request.method {
            HttpMethod::Get => Method::GET,
            HttpMethod::Post => Method::POST,
            HttpMethod::Put => Method::PUT,
            HttpMethod::Delete => Method::DELETE,
        };

        let mut builder = self.client.request(method, &url);

        let token = self.token.read().clone();
        if let Some(token) = token {
            builder = builder.bearer_auth(token);
        }

        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| ApiError::Connection {
                url: url.clone(),
                source: e,
            })?;

        let status = response.status().as_u16();
        let body = response
            .bytes()
            .await
            .map_err(|e| ApiError::Connection {
                url: url.clone(),
                source: e,
            })?;

        tracing::debug!(
            method = request.method.as_str(),
            url = %url,
            status,
            bytes = body.len(),
            "API response"
        );

        Ok(ApiResponse::from_body(status, &body))
    }
}

#[async_trait]
impl Transport for RestClient {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, ApiError> {
        match timeout(self.request_timeout, self.do_send(request)).await {
            Ok(result) => result,
            Err(_) => Err(ApiError::Timeout {
                duration: self.request_timeout.as_secs(),
            }),
        }
    }
}
