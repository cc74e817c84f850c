//! Current weather tool definition.
//!
//! Geocodes a city and renders its current conditions as markdown.

use async_trait::async_trait;
use rmcp::model::{CallToolResult, JsonObject, Tool};
use tracing::{info, instrument};

use crate::domains::geocoding::GeoResolver;
use crate::domains::tools::definitions::common::{CityParams, parse_params, text_result, tool_model};
use crate::domains::tools::{ToolHandler, ToolResult};
use crate::domains::weather::WeatherClient;

/// Current weather tool - temperature, wind, humidity and UV for a city.
#[derive(Clone)]
pub struct CurrentWeatherTool {
    geo: GeoResolver,
    weather: WeatherClient,
}

impl CurrentWeatherTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "get_current_weather";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Get current weather metrics for a city.";

    pub fn new(geo: GeoResolver, weather: WeatherClient) -> Self {
        Self { geo, weather }
    }

    /// Execute the tool logic.
    #[instrument(skip_all, fields(city = %params.city))]
    pub async fn execute(&self, params: &CityParams) -> ToolResult<CallToolResult> {
        info!("Current weather tool called for city: {}", params.city);

        let coords = self.geo.resolve(&params.city).await?;
        let forecast = self.weather.get_current(coords).await?;

        Ok(text_result(forecast.to_markdown()))
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        tool_model::<CityParams>(Self::NAME, Self::DESCRIPTION)
    }
}

#[async_trait]
impl ToolHandler for CurrentWeatherTool {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn descriptor(&self) -> Tool {
        Self::to_tool()
    }

    async fn handle(&self, arguments: JsonObject) -> ToolResult<CallToolResult> {
        let params: CityParams = parse_params(arguments)?;
        self.execute(&params).await
    }
}
