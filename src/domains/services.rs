//! Service bundle handed to the tool registry.

use std::sync::Arc;

use crate::core::config::UpstreamConfig;
use crate::core::http_client::HttpFetch;

use super::air_quality::AirQualityClient;
use super::geocoding::GeoResolver;
use super::time::TimeResolver;
use super::weather::WeatherClient;

/// All upstream-facing services, sharing one HTTP client.
#[derive(Clone)]
pub struct Services {
    pub geo: GeoResolver,
    pub weather: WeatherClient,
    pub air_quality: AirQualityClient,
    pub time: TimeResolver,
}

impl Services {
    /// Wire every service to `http` using the configured endpoints.
    pub fn new(http: Arc<dyn HttpFetch>, upstream: &UpstreamConfig) -> Self {
        Self {
            geo: GeoResolver::new(
                http.clone(),
                upstream.geocoding_url.clone(),
                upstream.language.clone(),
            ),
            weather: WeatherClient::new(http.clone(), upstream.forecast_url.clone()),
            air_quality: AirQualityClient::new(http, upstream.air_quality_url.clone()),
            time: TimeResolver::new(),
        }
    }
}
