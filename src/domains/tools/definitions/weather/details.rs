//! Detailed weather tool definition.
//!
//! Returns the raw upstream forecast payload as pretty-printed JSON.

use async_trait::async_trait;
use rmcp::model::{CallToolResult, JsonObject, Tool};
use tracing::{info, instrument};

use crate::domains::geocoding::GeoResolver;
use crate::domains::tools::definitions::common::{CityParams, json_result, parse_params, tool_model};
use crate::domains::tools::{ToolHandler, ToolResult};
use crate::domains::weather::WeatherClient;

#[derive(Clone)]
pub struct WeatherDetailsTool {
    geo: GeoResolver,
    weather: WeatherClient,
}

impl WeatherDetailsTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "get_weather_details";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Get detailed raw weather data (JSON) for a city.";

    pub fn new(geo: GeoResolver, weather: WeatherClient) -> Self {
        Self { geo, weather }
    }

    #[instrument(skip_all, fields(city = %params.city))]
    pub async fn execute(&self, params: &CityParams) -> ToolResult<CallToolResult> {
        info!("Weather details tool called for city: {}", params.city);

        let coords = self.geo.resolve(&params.city).await?;
        let data = self.weather.get_details(coords).await?;
        json_result(&data)
    }

    pub fn to_tool() -> Tool {
        tool_model::<CityParams>(Self::NAME, Self::DESCRIPTION)
    }
}

#[async_trait]
impl ToolHandler for WeatherDetailsTool {
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
