//! In-memory upstream used by unit tests.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::Value;

use crate::core::http_client::{HttpFetch, Query, UpstreamError};

pub const GEO_URL: &str = "https://geo.test/v1/search";
pub const FORECAST_URL: &str = "https://forecast.test/v1/forecast";
pub const AIR_URL: &str = "https://air.test/v1/air-quality";

/// Canned responses keyed by URL; records every request it receives.
#[derive(Default)]
pub struct StubFetch {
    responses: HashMap<String, Result<Value, String>>,
    calls: Mutex<Vec<(String, Query)>>,
}

impl StubFetch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_json(mut self, url: &str, body: Value) -> Self {
        self.responses.insert(url.to_string(), Ok(body));
        self
    }

    pub fn with_failure(mut self, url: &str, msg: &str) -> Self {
        self.responses.insert(url.to_string(), Err(msg.to_string()));
        self
    }

    pub fn into_arc(self) -> Arc<Self> {
        Arc::new(self)
    }

    pub fn calls(&self) -> Vec<(String, Query)> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    /// Value of a query parameter from the `n`th recorded call.
    pub fn param(&self, n: usize, key: &str) -> Option<String> {
        self.calls()
            .get(n)
            .and_then(|(_, q)| q.iter().find(|(k, _)| *k == key).map(|(_, v)| v.clone()))
    }
}

#[async_trait]
impl HttpFetch for StubFetch {
    async fn get_json(&self, url: &str, query: &Query) -> Result<Value, UpstreamError> {
        self.calls
            .lock()
            .unwrap()
            .push((url.to_string(), query.clone()));

        match self.responses.get(url) {
            Some(Ok(body)) => Ok(body.clone()),
            Some(Err(msg)) => Err(UpstreamError::new(msg.clone())),
            None => Err(UpstreamError::new(format!("no stub for {}", url))),
        }
    }
}

/// Geocoding payload with a single London match.
pub fn london() -> Value {
    serde_json::json!({
        "results": [{ "name": "London", "latitude": 51.5074, "longitude": -0.1278 }]
    })
}
