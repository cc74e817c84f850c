//! Weather forecast client.
//!
//! Wraps the Open-Meteo forecast endpoint. Current conditions are mapped into
//! a typed [`WeatherForecast`]; the detailed and date-range queries pass the
//! upstream JSON through untouched.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{info, instrument};

use crate::core::http_client::{HttpFetch, Query, fields};
use crate::domains::geocoding::Coordinates;
use crate::domains::tools::{ToolError, ToolResult};

const CURRENT_FIELDS: &[&str] = &[
    "temperature_2m",
    "relative_humidity_2m",
    "apparent_temperature",
    "precipitation",
    "weather_code",
    "wind_speed_10m",
    "wind_direction_10m",
    "visibility",
];

const DETAIL_CURRENT_FIELDS: &[&str] = &[
    "temperature_2m",
    "relative_humidity_2m",
    "apparent_temperature",
    "is_day",
    "precipitation",
    "rain",
    "showers",
    "snowfall",
    "weather_code",
    "cloud_cover",
    "pressure_msl",
    "surface_pressure",
    "wind_speed_10m",
    "wind_direction_10m",
    "wind_gusts_10m",
    "visibility",
];

const DETAIL_HOURLY_FIELDS: &[&str] = &[
    "temperature_2m",
    "relative_humidity_2m",
    "dew_point_2m",
    "apparent_temperature",
    "precipitation_probability",
    "precipitation",
    "weather_code",
    "pressure_msl",
    "surface_pressure",
    "cloud_cover",
    "visibility",
    "wind_speed_10m",
    "wind_direction_10m",
    "wind_gusts_10m",
    "uv_index",
];

const DETAIL_DAILY_FIELDS: &[&str] = &[
    "weather_code",
    "temperature_2m_max",
    "temperature_2m_min",
    "apparent_temperature_max",
    "apparent_temperature_min",
    "sunrise",
    "sunset",
    "uv_index_max",
    "precipitation_sum",
    "rain_sum",
    "showers_sum",
    "snowfall_sum",
    "precipitation_hours",
    "precipitation_probability_max",
];

const RANGE_HOURLY_FIELDS: &[&str] = &["temperature_2m", "precipitation_probability", "wind_speed_10m"];

/// Current weather conditions at a location.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeatherForecast {
    /// Temperature in Celsius.
    pub temperature: f64,
    /// Apparent temperature in Celsius.
    pub feels_like: f64,
    /// Relative humidity in percent.
    pub humidity: i32,
    /// Wind speed in km/h.
    pub wind_speed: f64,
    /// Wind direction in degrees.
    pub wind_direction: i32,
    /// Precipitation in mm.
    pub precipitation: f64,
    pub uv_index: f64,
    /// Visibility in meters.
    pub visibility: f64,
}

impl WeatherForecast {
    /// Render as a markdown section.
    pub fn to_markdown(&self) -> String {
        format!(
            "### Current Weather\n\
             - **Temperature**: {:.1}°C\n\
             - **Feels Like**: {:.1}°C\n\
             - **Humidity**: {}%\n\
             - **Wind**: {:.1} km/h (Direction: {}°)\n\
             - **Precipitation**: {:.1} mm\n\
             - **UV Index**: {:.1}\n\
             - **Visibility**: {:.0} m\n",
            self.temperature,
            self.feels_like,
            self.humidity,
            self.wind_speed,
            self.wind_direction,
            self.precipitation,
            self.uv_index,
            self.visibility,
        )
    }
}

#[derive(Debug, Deserialize)]
struct CurrentResponse {
    current: CurrentBlock,
    #[serde(default)]
    daily: Option<DailyBlock>,
}

#[derive(Debug, Deserialize)]
struct CurrentBlock {
    temperature_2m: f64,
    apparent_temperature: f64,
    relative_humidity_2m: f64,
    wind_speed_10m: f64,
    wind_direction_10m: f64,
    precipitation: f64,
    #[serde(default)]
    visibility: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct DailyBlock {
    #[serde(default)]
    uv_index_max: Option<Vec<Option<f64>>>,
}

impl From<CurrentResponse> for WeatherForecast {
    fn from(response: CurrentResponse) -> Self {
        let current = response.current;
        // Missing daily UV data is not an error upstream; report 0.0.
        let uv_index = response
            .daily
            .and_then(|d| d.uv_index_max)
            .and_then(|values| values.into_iter().next().flatten())
            .unwrap_or(0.0);

        Self {
            temperature: current.temperature_2m,
            feels_like: current.apparent_temperature,
            humidity: current.relative_humidity_2m.round() as i32,
            wind_speed: current.wind_speed_10m,
            wind_direction: current.wind_direction_10m.round() as i32,
            precipitation: current.precipitation,
            uv_index,
            visibility: current.visibility.unwrap_or(0.0),
        }
    }
}

/// Client for the forecast endpoint.
#[derive(Clone)]
pub struct WeatherClient {
    http: Arc<dyn HttpFetch>,
    url: String,
}

impl WeatherClient {
    pub fn new(http: Arc<dyn HttpFetch>, url: impl Into<String>) -> Self {
        Self {
            http,
            url: url.into(),
        }
    }

    /// Current conditions plus today's maximum UV index.
    #[instrument(skip(self))]
    pub async fn get_current(&self, coords: Coordinates) -> ToolResult<WeatherForecast> {
        let mut query = coords.query();
        query.push(("current", fields(CURRENT_FIELDS)));
        query.push(("daily", "uv_index_max".to_string()));
        query.push(("timezone", "auto".to_string()));

        let body = self.fetch(&query).await?;
        let response: CurrentResponse = serde_json::from_value(body)
            .map_err(|e| ToolError::api(format!("Weather API failed: {}", e)))?;

        info!("Fetched current weather");
        Ok(response.into())
    }

    /// Full current/hourly/daily payload, passed through as-is.
    #[instrument(skip(self))]
    pub async fn get_details(&self, coords: Coordinates) -> ToolResult<Value> {
        let mut query = coords.query();
        query.push(("current", fields(DETAIL_CURRENT_FIELDS)));
        query.push(("hourly", fields(DETAIL_HOURLY_FIELDS)));
        query.push(("daily", fields(DETAIL_DAILY_FIELDS)));
        query.push(("timezone", "auto".to_string()));

        self.fetch(&query).await
    }

    /// Hourly temperature, precipitation probability and wind speed between
    /// two `YYYY-MM-DD` dates. Dates are forwarded unchecked.
    #[instrument(skip(self))]
    pub async fn get_range(
        &self,
        coords: Coordinates,
        start_date: &str,
        end_date: &str,
    ) -> ToolResult<Value> {
        let mut query = coords.query();
        query.push(("start_date", start_date.to_string()));
        query.push(("end_date", end_date.to_string()));
        query.push(("hourly", fields(RANGE_HOURLY_FIELDS)));
        query.push(("timezone", "auto".to_string()));

        self.fetch(&query).await
    }

    async fn fetch(&self, query: &Query) -> ToolResult<Value> {
        self.http
            .get_json(&self.url, query)
            .await
            .map_err(|e| ToolError::api(format!("Weather API failed: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::testing::{FORECAST_URL, StubFetch};
    use serde_json::json;

    fn london() -> Coordinates {
        Coordinates::new(51.5074, -0.1278).unwrap()
    }

    fn current_body() -> Value {
        json!({
            "current": {
                "temperature_2m": 20.0,
                "apparent_temperature": 19.5,
                "relative_humidity_2m": 50,
                "wind_speed_10m": 10.0,
                "wind_direction_10m": 180,
                "precipitation": 0.0,
                "visibility": 10000.0,
                "weather_code": 0
            },
            "daily": { "uv_index_max": [5.0] }
        })
    }

    #[tokio::test]
    async fn test_get_current() {
        let stub = StubFetch::new()
            .with_json(FORECAST_URL, current_body())
            .into_arc();
        let client = WeatherClient::new(stub.clone(), FORECAST_URL);

        let forecast = client.get_current(london()).await.unwrap();
        assert_eq!(forecast.temperature, 20.0);
        assert_eq!(forecast.feels_like, 19.5);
        assert_eq!(forecast.humidity, 50);
        assert_eq!(forecast.wind_direction, 180);
        assert_eq!(forecast.uv_index, 5.0);
        assert_eq!(forecast.visibility, 10000.0);

        assert_eq!(stub.param(0, "daily").as_deref(), Some("uv_index_max"));
        assert_eq!(stub.param(0, "timezone").as_deref(), Some("auto"));
        assert_eq!(stub.param(0, "latitude").as_deref(), Some("51.5074"));
        assert!(stub.param(0, "current").unwrap().contains("apparent_temperature"));
    }

    #[tokio::test]
    async fn test_get_current_defaults_uv_and_visibility() {
        let mut body = current_body();
        body.as_object_mut().unwrap().remove("daily");
        body["current"].as_object_mut().unwrap().remove("visibility");

        let stub = StubFetch::new().with_json(FORECAST_URL, body).into_arc();
        let forecast = WeatherClient::new(stub, FORECAST_URL)
            .get_current(london())
            .await
            .unwrap();

        assert_eq!(forecast.uv_index, 0.0);
        assert_eq!(forecast.visibility, 0.0);
    }

    #[tokio::test]
    async fn test_get_current_empty_uv_array() {
        let mut body = current_body();
        body["daily"]["uv_index_max"] = json!([]);

        let stub = StubFetch::new().with_json(FORECAST_URL, body).into_arc();
        let forecast = WeatherClient::new(stub, FORECAST_URL)
            .get_current(london())
            .await
            .unwrap();
        assert_eq!(forecast.uv_index, 0.0);
    }

    #[tokio::test]
    async fn test_get_current_malformed_payload() {
        let stub = StubFetch::new()
            .with_json(FORECAST_URL, json!({ "current": { "temperature_2m": 1.0 } }))
            .into_arc();
        let err = WeatherClient::new(stub, FORECAST_URL)
            .get_current(london())
            .await
            .unwrap_err();
        assert!(matches!(err, ToolError::Api(_)));
    }

    #[tokio::test]
    async fn test_get_range_forwards_dates() {
        let body = json!({ "hourly": { "temperature_2m": [1.0, 2.0] } });
        let stub = StubFetch::new().with_json(FORECAST_URL, body.clone()).into_arc();
        let client = WeatherClient::new(stub.clone(), FORECAST_URL);

        let data = client
            .get_range(london(), "2024-05-01", "not-a-date")
            .await
            .unwrap();

        assert_eq!(data, body);
        assert_eq!(stub.param(0, "start_date").as_deref(), Some("2024-05-01"));
        assert_eq!(stub.param(0, "end_date").as_deref(), Some("not-a-date"));
        assert_eq!(
            stub.param(0, "hourly").as_deref(),
            Some("temperature_2m,precipitation_probability,wind_speed_10m")
        );
    }

    #[tokio::test]
    async fn test_get_details_passes_through() {
        let body = json!({ "current": { "is_day": 1 }, "unexpected": [1, 2, 3] });
        let stub = StubFetch::new().with_json(FORECAST_URL, body.clone()).into_arc();
        let data = WeatherClient::new(stub.clone(), FORECAST_URL)
            .get_details(london())
            .await
            .unwrap();

        assert_eq!(data, body);
        assert!(stub.param(0, "daily").unwrap().contains("sunrise"));
    }

    #[tokio::test]
    async fn test_upstream_failure_is_api_error() {
        let stub = StubFetch::new()
            .with_failure(FORECAST_URL, "error sending request: connection refused")
            .into_arc();
        let client = WeatherClient::new(stub, FORECAST_URL);

        for err in [
            client.get_current(london()).await.unwrap_err(),
            client.get_details(london()).await.unwrap_err(),
            client.get_range(london(), "2024-01-01", "2024-01-02").await.unwrap_err(),
        ] {
            assert!(matches!(err, ToolError::Api(_)));
            assert!(err.to_string().contains("connection refused"));
        }
    }

    #[test]
    fn test_markdown() {
        let forecast = WeatherForecast {
            temperature: 20.0,
            feels_like: 19.5,
            humidity: 50,
            wind_speed: 10.0,
            wind_direction: 180,
            precipitation: 0.0,
            uv_index: 5.0,
            visibility: 10000.0,
        };
        let md = forecast.to_markdown();
        assert!(md.starts_with("### Current Weather\n"));
        assert!(md.contains("- **Temperature**: 20.0°C"));
        assert!(md.contains("- **Feels Like**: 19.5°C"));
        assert!(md.contains("- **Humidity**: 50%"));
        assert!(md.contains("- **Wind**: 10.0 km/h (Direction: 180°)"));
        assert!(md.contains("- **Visibility**: 10000 m"));
    }
}
