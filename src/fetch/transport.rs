//! HTTP transport port and adapters.

use crate::error::{ApiError, FetchError};
use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::{HashMap, HashSet};
use std::time::Duration;

/// Status and body of a completed GET.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn ok(body: impl Into<String>) -> Self {
        Self {
            status: 200,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Turn a non-success status into a [`FetchError::Status`].
    pub fn error_for_status(self, url: &str) -> Result<Self, FetchError> {
        if self.is_success() {
            Ok(self)
        } else {
            Err(FetchError::Status {
                url: url.to_string(),
                status: self.status,
            })
        }
    }
}

/// Blocking-style GET capability used by the fetcher.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn get(&self, url: &str, timeout: Duration) -> Result<HttpResponse, FetchError>;
}

/// Transport backed by a shared `reqwest::Client`.
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new(user_agent: &str) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder()
            .user_agent(user_agent)
            .build()
            .map_err(|e| ApiError::ConfigError(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self { client })
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn get(&self, url: &str, timeout: Duration) -> Result<HttpResponse, FetchError> {
        let transport_error = |e: reqwest::Error| FetchError::Transport {
            url: url.to_string(),
            message: e.to_string(),
        };
        let response = self
            .client
            .get(url)
            .timeout(timeout)
            .send()
            .await
            .map_err(transport_error)?;
        let status = response.status().as_u16();
        let body = response.text().await.map_err(transport_error)?;
        Ok(HttpResponse { status, body })
    }
}

/// In-memory transport serving fixed responses.
///
/// Unknown URLs answer 404; URLs registered with [`StaticTransport::fail`]
/// produce a transport error. Every request is recorded in order.
#[derive(Default)]
pub struct StaticTransport {
    routes: HashMap<String, HttpResponse>,
    failing: HashSet<String>,
    requests: Mutex<Vec<String>>,
}

impl StaticTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `body` with status 200 for `url`.
    pub fn route(mut self, url: impl Into<String>, body: impl Into<String>) -> Self {
        self.routes.insert(url.into(), HttpResponse::ok(body));
        self
    }

    pub fn route_status(mut self, url: impl Into<String>, status: u16, body: impl Into<String>) -> Self {
        self.routes.insert(
            url.into(),
            HttpResponse {
                status,
                body: body.into(),
            },
        );
        self
    }

    pub fn fail(mut self, url: impl Into<String>) -> Self {
        self.failing.insert(url.into());
        self
    }

    /// URLs requested so far, in request order.
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().clone()
    }

    pub fn request_count(&self, url: &str) -> usize {
        self.requests.lock().iter().filter(|u| *u == url).count()
    }
}

#[async_trait]
impl Transport for StaticTransport {
    async fn get(&self, url: &str, _timeout: Duration) -> Result<HttpResponse, FetchError> {
        self.requests.lock().push(url.to_string());
        if self.failing.contains(url) {
            return Err(FetchError::Transport {
                url: url.to_string(),
                message: "connection refused".to_string(),
            });
        }
        Ok(self.routes.get(url).cloned().unwrap_or(HttpResponse {
            status: 404,
            body: r#"{"message":"Not Found"}"#.to_string(),
        }))
    }
}
