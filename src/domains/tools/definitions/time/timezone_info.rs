//! Timezone info tool definition.

use async_trait::async_trait;
use rmcp::model::{CallToolResult, JsonObject, Tool};
use tracing::{info, instrument};

use super::current_datetime::TimezoneParams;
use crate::domains::time::TimeResolver;
use crate::domains::tools::definitions::common::{json_result, parse_params, tool_model};
use crate::domains::tools::{ToolHandler, ToolResult};

/// Offset, DST flag and abbreviation for a zone, as pretty JSON.
#[derive(Clone, Default)]
pub struct TimezoneInfoTool {
    time: TimeResolver,
}

impl TimezoneInfoTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "get_timezone_info";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Get information about a specific timezone.";

    pub fn new(time: TimeResolver) -> Self {
        Self { time }
    }

    #[instrument(skip_all, fields(timezone = %params.timezone_name))]
    pub fn execute(&self, params: &TimezoneParams) -> ToolResult<CallToolResult> {
        info!("Timezone info tool called for {}", params.timezone_name);
        let zone = self.time.zone_info(&params.timezone_name)?;
        json_result(&zone)
    }

    pub fn to_tool() -> Tool {
        tool_model::<TimezoneParams>(Self::NAME, Self::DESCRIPTION)
    }
}

#[async_trait]
impl ToolHandler for TimezoneInfoTool {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn descriptor(&self) -> Tool {
        Self::to_tool()
    }

    async fn handle(&self, arguments: JsonObject) -> ToolResult<CallToolResult> {
        let params: TimezoneParams = parse_params(arguments)?;
        self.execute(&params)
    }
}
