//! City name to coordinates resolution.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{info, instrument, warn};

use crate::core::http_client::{HttpFetch, Query};
use crate::domains::tools::{ToolError, ToolResult};

/// A validated latitude/longitude pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Coordinates {
    latitude: f64,
    longitude: f64,
}

impl Coordinates {
    /// Build coordinates, rejecting values outside the valid ranges.
    pub fn new(latitude: f64, longitude: f64) -> Option<Self> {
        let valid = (-90.0..=90.0).contains(&latitude) && (-180.0..=180.0).contains(&longitude);
        valid.then_some(Self {
            latitude,
            longitude,
        })
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    /// `latitude`/`longitude` query parameters for Open-Meteo endpoints.
    pub(crate) fn query(&self) -> Query {
        vec![
            ("latitude", self.latitude.to_string()),
            ("longitude", self.longitude.to_string()),
        ]
    }
}

#[derive(Debug, Deserialize)]
struct GeocodingResponse {
    #[serde(default)]
    results: Option<Vec<GeocodingMatch>>,
}

#[derive(Debug, Deserialize)]
struct GeocodingMatch {
    latitude: f64,
    longitude: f64,
}

/// Resolves free-text city names through the geocoding API.
#[derive(Clone)]
pub struct GeoResolver {
    http: Arc<dyn HttpFetch>,
    url: String,
    language: String,
}

impl GeoResolver {
    pub fn new(http: Arc<dyn HttpFetch>, url: impl Into<String>, language: impl Into<String>) -> Self {
        Self {
            http,
            url: url.into(),
            language: language.into(),
        }
    }

    /// Resolve `city` to the coordinates of its best match.
    #[instrument(skip(self))]
    pub async fn resolve(&self, city: &str) -> ToolResult<Coordinates> {
        let query: Query = vec![
            ("name", city.to_string()),
            ("count", "1".to_string()),
            ("language", self.language.clone()),
            ("format", "json".to_string()),
        ];

        let body = self
            .http
            .get_json(&self.url, &query)
            .await
            .map_err(|e| ToolError::api(format!("Geocoding API failed: {}", e)))?;

        let response: GeocodingResponse = serde_json::from_value(body)
            .map_err(|e| ToolError::api(format!("Geocoding API failed: {}", e)))?;

        let best = match response.results.and_then(|r| r.into_iter().next()) {
            Some(m) => m,
            None => {
                warn!("No geocoding match for {}", city);
                return Err(ToolError::geocoding(format!("City not found: {}", city)));
            }
        };

        let coords = Coordinates::new(best.latitude, best.longitude).ok_or_else(|| {
            ToolError::api(format!(
                "Geocoding API failed: coordinates out of range ({}, {})",
                best.latitude, best.longitude
            ))
        })?;

        info!(
            "Resolved {} to ({}, {})",
            city,
            coords.latitude(),
            coords.longitude()
        );
        Ok(coords)
    }
}
