//! Time conversion tool definition.

use async_trait::async_trait;
use rmcp::model::{CallToolResult, JsonObject, Tool};
use schemars::JsonSchema;
use serde::Deserialize;
use tracing::{info, instrument};

use crate::domains::time::TimeResolver;
use crate::domains::tools::definitions::common::{parse_params, text_result, tool_model};
use crate::domains::tools::{ToolHandler, ToolResult};

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct ConvertTimeParams {
    #[schemars(description = "Time string in ISO format")]
    pub time_str: String,

    #[schemars(description = "Source timezone name")]
    pub from_timezone: String,

    #[schemars(description = "Target timezone name")]
    pub to_timezone: String,
}

/// Convert a timestamp between two IANA zones.
#[derive(Clone, Default)]
pub struct ConvertTimeTool {
    time: TimeResolver,
}

impl ConvertTimeTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "convert_time";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Convert time between timezones.";

    pub fn new(time: TimeResolver) -> Self {
        Self { time }
    }

    #[instrument(skip_all, fields(from = %params.from_timezone, to = %params.to_timezone))]
    pub fn execute(&self, params: &ConvertTimeParams) -> ToolResult<CallToolResult> {
        info!(
            "Convert time tool called: {} from {} to {}",
            params.time_str, params.from_timezone, params.to_timezone
        );
        let converted =
            self.time
                .convert(&params.time_str, &params.from_timezone, &params.to_timezone)?;
        Ok(text_result(converted))
    }

    pub fn to_tool() -> Tool {
        tool_model::<ConvertTimeParams>(Self::NAME, Self::DESCRIPTION)
    }
}

#[async_trait]
impl ToolHandler for ConvertTimeTool {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn descriptor(&self) -> Tool {
        Self::to_tool()
    }

    async fn handle(&self, arguments: JsonObject) -> ToolResult<CallToolResult> {
        let params: ConvertTimeParams = parse_params(arguments)?;
        self.execute(&params)
    }
}
