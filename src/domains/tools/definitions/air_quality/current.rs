//! Current air quality tool definition.

use async_trait::async_trait;
use rmcp::model::{CallToolResult, JsonObject, Tool};
use tracing::{info, instrument};

use crate::domains::air_quality::AirQualityClient;
use crate::domains::geocoding::GeoResolver;
use crate::domains::tools::definitions::common::{CityParams, parse_params, text_result, tool_model};
use crate::domains::tools::{ToolHandler, ToolResult};

/// AQI and main pollutant concentrations for a city, as markdown.
#[derive(Clone)]
pub struct AirQualityTool {
    geo: GeoResolver,
    air_quality: AirQualityClient,
}

impl AirQualityTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "get_air_quality";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Get current air quality metrics for a city.";

    pub fn new(geo: GeoResolver, air_quality: AirQualityClient) -> Self {
        Self { geo, air_quality }
    }

    #[instrument(skip_all, fields(city = %params.city))]
    pub async fn execute(&self, params: &CityParams) -> ToolResult<CallToolResult> {
        info!("Air quality tool called for city: {}", params.city);

        let coords = self.geo.resolve(&params.city).await?;
        let data = self.air_quality.get_current(coords).await?;

        Ok(text_result(data.to_markdown()))
    }

    pub fn to_tool() -> Tool {
        tool_model::<CityParams>(Self::NAME, Self::DESCRIPTION)
    }
}

#[async_trait]
impl ToolHandler for AirQualityTool {
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
