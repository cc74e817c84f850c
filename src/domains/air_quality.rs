//! Air quality client.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{info, instrument};

use crate::core::http_client::{HttpFetch, Query, fields};
use crate::domains::geocoding::Coordinates;
use crate::domains::tools::{ToolError, ToolResult};

const CURRENT_FIELDS: &[&str] = &[
    "us_aqi",
    "pm10",
    "pm2_5",
    "ozone",
    "carbon_monoxide",
    "nitrogen_dioxide",
    "sulphur_dioxide",
];

const DETAIL_CURRENT_FIELDS: &[&str] = &[
    "us_aqi",
    "pm10",
    "pm2_5",
    "ozone",
    "carbon_monoxide",
    "nitrogen_dioxide",
    "sulphur_dioxide",
    "european_aqi",
];

const DETAIL_HOURLY_FIELDS: &[&str] = &[
    "pm10",
    "pm2_5",
    "ozone",
    "carbon_monoxide",
    "nitrogen_dioxide",
    "sulphur_dioxide",
    "us_aqi",
    "european_aqi",
];

/// US EPA air quality category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AqiLevel {
    Good,
    Moderate,
    UnhealthyForSensitiveGroups,
    Unhealthy,
    VeryUnhealthy,
    Hazardous,
}

impl AqiLevel {
    /// Category for an AQI value. Breakpoints are inclusive upper bounds.
    pub fn from_aqi(aqi: i32) -> Self {
        match aqi {
            i32::MIN..=50 => Self::Good,
            51..=100 => Self::Moderate,
            101..=150 => Self::UnhealthyForSensitiveGroups,
            151..=200 => Self::Unhealthy,
            201..=300 => Self::VeryUnhealthy,
            _ => Self::Hazardous,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Good => "Good",
            Self::Moderate => "Moderate",
            Self::UnhealthyForSensitiveGroups => "Unhealthy for Sensitive Groups",
            Self::Unhealthy => "Unhealthy",
            Self::VeryUnhealthy => "Very Unhealthy",
            Self::Hazardous => "Hazardous",
        }
    }
}

impl fmt::Display for AqiLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Current pollutant readings at a location.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AirQualityData {
    /// US Air Quality Index.
    pub aqi: i32,
    pub pm2_5: f64,
    pub pm10: f64,
    pub ozone: f64,
    pub carbon_monoxide: Option<f64>,
    pub nitrogen_dioxide: Option<f64>,
    pub sulphur_dioxide: Option<f64>,
}

impl AirQualityData {
    pub fn aqi_level(&self) -> AqiLevel {
        AqiLevel::from_aqi(self.aqi)
    }

    /// Render as a markdown section. Optional pollutants are listed only
    /// when the upstream reported them.
    pub fn to_markdown(&self) -> String {
        let mut md = format!(
            "### Air Quality\n\
             - **AQI**: {} ({})\n\
             - **PM2.5**: {} µg/m³\n\
             - **PM10**: {} µg/m³\n\
             - **Ozone**: {} µg/m³\n",
            self.aqi,
            self.aqi_level(),
            self.pm2_5,
            self.pm10,
            self.ozone,
        );

        let optional = [
            ("Carbon Monoxide", self.carbon_monoxide),
            ("Nitrogen Dioxide", self.nitrogen_dioxide),
            ("Sulphur Dioxide", self.sulphur_dioxide),
        ];
        for (label, value) in optional {
            if let Some(v) = value {
                md.push_str(&format!("- **{}**: {} µg/m³\n", label, v));
            }
        }
        md
    }
}

#[derive(Debug, Deserialize)]
struct CurrentResponse {
    current: CurrentBlock,
}

#[derive(Debug, Deserialize)]
struct CurrentBlock {
    us_aqi: f64,
    pm2_5: f64,
    pm10: f64,
    ozone: f64,
    #[serde(default)]
    carbon_monoxide: Option<f64>,
    #[serde(default)]
    nitrogen_dioxide: Option<f64>,
    #[serde(default)]
    sulphur_dioxide: Option<f64>,
}

impl From<CurrentBlock> for AirQualityData {
    fn from(c: CurrentBlock) -> Self {
        Self {
            aqi: c.us_aqi.round() as i32,
            pm2_5: c.pm2_5,
            pm10: c.pm10,
            ozone: c.ozone,
            carbon_monoxide: c.carbon_monoxide,
            nitrogen_dioxide: c.nitrogen_dioxide,
            sulphur_dioxide: c.sulphur_dioxide,
        }
    }
}

/// Client for the air quality endpoint.
#[derive(Clone)]
pub struct AirQualityClient {
    http: Arc<dyn HttpFetch>,
    url: String,
}

impl AirQualityClient {
    pub fn new(http: Arc<dyn HttpFetch>, url: impl Into<String>) -> Self {
        Self {
            http,
            url: url.into(),
        }
    }

    #[instrument(skip(self))]
    pub async fn get_current(&self, coords: Coordinates) -> ToolResult<AirQualityData> {
        let mut query = coords.query();
        query.push(("current", fields(CURRENT_FIELDS)));
        query.push(("timezone", "auto".to_string()));

        let body = self.fetch(&query).await?;
        let response: CurrentResponse = serde_json::from_value(body)
            .map_err(|e| ToolError::api(format!("Air Quality API failed: {}", e)))?;

        let data = AirQualityData::from(response.current);
        info!("Fetched air quality (AQI {})", data.aqi);
        Ok(data)
    }

    /// Current and hourly pollutants with both US and European AQI,
    /// passed through as-is.
    #[instrument(skip(self))]
    pub async fn get_details(&self, coords: Coordinates) -> ToolResult<Value> {
        let mut query = coords.query();
        query.push(("current", fields(DETAIL_CURRENT_FIELDS)));
        query.push(("hourly", fields(DETAIL_HOURLY_FIELDS)));
        query.push(("timezone", "auto".to_string()));

        self.fetch(&query).await
    }

    async fn fetch(&self, query: &Query) -> ToolResult<Value> {
        self.http
            .get_json(&self.url, query)
            .await
            .map_err(|e| ToolError::api(format!("Air Quality API failed: {}", e)))
    }
}
