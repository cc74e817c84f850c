//! Weather by date range tool definition.

use async_trait::async_trait;
use rmcp::model::{CallToolResult, JsonObject, Tool};
use schemars::JsonSchema;
use serde::Deserialize;
use tracing::{info, instrument};

use crate::domains::geocoding::GeoResolver;
use crate::domains::tools::definitions::common::{parse_params, text_result, tool_model};
use crate::domains::tools::{ToolHandler, ToolResult};
use crate::domains::weather::WeatherClient;

/// Parameters for the date range tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct WeatherRangeParams {
    #[schemars(description = "City name (e.g. 'London')")]
    pub city: String,

    #[schemars(description = "Start date (YYYY-MM-DD)")]
    pub start_date: String,

    #[schemars(description = "End date (YYYY-MM-DD)")]
    pub end_date: String,
}

/// Hourly weather trends for a city between two dates.
#[derive(Clone)]
pub struct WeatherRangeTool {
    geo: GeoResolver,
    weather: WeatherClient,
}

impl WeatherRangeTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "get_weather_by_datetime_range";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Get hourly weather trends for a date range.";

    pub fn new(geo: GeoResolver, weather: WeatherClient) -> Self {
        Self { geo, weather }
    }

    #[instrument(skip_all, fields(city = %params.city))]
    pub async fn execute(&self, params: &WeatherRangeParams) -> ToolResult<CallToolResult> {
        info!(
            "Weather range tool called for {} ({} to {})",
            params.city, params.start_date, params.end_date
        );

        let coords = self.geo.resolve(&params.city).await?;
        let data = self
            .weather
            .get_range(coords, &params.start_date, &params.end_date)
            .await?;

        Ok(text_result(format!(
            "Weather for {} from {} to {}:\n{}",
            params.city, params.start_date, params.end_date, data
        )))
    }

    pub fn to_tool() -> Tool {
        tool_model::<WeatherRangeParams>(Self::NAME, Self::DESCRIPTION)
    }
}

#[async_trait]
impl ToolHandler for WeatherRangeTool {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn descriptor(&self) -> Tool {
        Self::to_tool()
    }

    async fn handle(&self, arguments: JsonObject) -> ToolResult<CallToolResult> {
        let params: WeatherRangeParams = parse_params(arguments)?;
        self.execute(&params).await
    }
}
