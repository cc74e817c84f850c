//! Shared upstream HTTP client.
//!
//! One [`HttpClient`] is created by the entry point before any transport
//! starts, handed to every service, and shut down after the transport
//! returns. The underlying `reqwest::Client` pools connections and is safe
//! to use from many concurrent tool calls.
//!
//! Services only see the [`HttpFetch`] trait, so tests can swap in an
//! in-memory upstream.

use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Query parameters for an upstream GET request.
pub type Query = Vec<(&'static str, String)>;

/// Failure of a single upstream request.
#[derive(Debug, Error)]
#[error("{0}")]
pub struct UpstreamError(String);

impl UpstreamError {
    /// Create a new upstream error from its message.
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }
}

impl From<reqwest::Error> for UpstreamError {
    fn from(err: reqwest::Error) -> Self {
        Self(err.to_string())
    }
}

/// Fetch a JSON document from an upstream API.
#[async_trait]
pub trait HttpFetch: Send + Sync {
    /// Perform a GET request and decode the body as JSON.
    ///
    /// Any non-2xx status, network error, timeout or undecodable body is
    /// reported as an [`UpstreamError`] carrying the original failure text.
    async fn get_json(&self, url: &str, query: &Query) -> Result<Value, UpstreamError>;
}

/// Pooled async HTTP client with a fixed overall request timeout.
#[derive(Debug, Clone)]
pub struct HttpClient {
    inner: reqwest::Client,
    timeout: Duration,
}

impl HttpClient {
    /// Build a new client.
    pub fn new(timeout: Duration) -> Result<Self, UpstreamError> {
        let inner = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;

        info!("HTTP client created (timeout: {:?})", timeout);
        Ok(Self { inner, timeout })
    }

    /// Configured request timeout.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Release pooled connections.
    ///
    /// Consumes the handle; clones still held by services keep working until
    /// they are dropped as well.
    pub fn shutdown(self) {
        drop(self.inner);
        info!("HTTP client shut down");
    }
}

#[async_trait]
impl HttpFetch for HttpClient {
    async fn get_json(&self, url: &str, query: &Query) -> Result<Value, UpstreamError> {
        debug!(url, ?query, "GET upstream");

        let response = self
            .inner
            .get(url)
            .query(query)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| {
                warn!("Upstream request to {} failed: {}", url, e);
                UpstreamError::from(e)
            })?;

        Ok(response.json::<Value>().await?)
    }
}

/// Join a list of upstream field names into Open-Meteo's comma syntax.
pub fn fields(names: &[&str]) -> String {
    names.join(",")
}
