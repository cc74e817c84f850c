//! Current datetime tool definition.

use async_trait::async_trait;
use rmcp::model::{CallToolResult, JsonObject, Tool};
use schemars::JsonSchema;
use serde::Deserialize;
use tracing::{info, instrument};

use crate::domains::time::TimeResolver;
use crate::domains::tools::definitions::common::{parse_params, text_result, tool_model};
use crate::domains::tools::{ToolHandler, ToolResult};

/// Parameters shared by the single-zone time tools.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct TimezoneParams {
    #[schemars(description = "IANA Timezone name (e.g. 'Asia/Shanghai')")]
    pub timezone_name: String,
}

#[derive(Clone, Default)]
pub struct CurrentDatetimeTool {
    time: TimeResolver,
}

impl CurrentDatetimeTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "get_current_datetime";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Get current datetime for a specific timezone.";

    pub fn new(time: TimeResolver) -> Self {
        Self { time }
    }

    #[instrument(skip_all, fields(timezone = %params.timezone_name))]
    pub fn execute(&self, params: &TimezoneParams) -> ToolResult<CallToolResult> {
        info!("Current datetime tool called for {}", params.timezone_name);
        let now = self.time.current_datetime(&params.timezone_name)?;
        Ok(text_result(now))
    }

    pub fn to_tool() -> Tool {
        tool_model::<TimezoneParams>(Self::NAME, Self::DESCRIPTION)
    }
}

#[async_trait]
impl ToolHandler for CurrentDatetimeTool {
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::tools::ToolError;
    use chrono::DateTime;
    use rmcp::model::RawContent;

    fn params(zone: &str) -> TimezoneParams {
        TimezoneParams {
            timezone_name: zone.to_string(),
        }
    }

    #[test]
    fn test_execute_returns_offset_timestamp() {
        let result = CurrentDatetimeTool::default()
            .execute(&params("Asia/Shanghai"))
            .unwrap();
        let text = match &result.content[0].raw {
            RawContent::Text(text) => &text.text,
            _ => panic!("Expected text content"),
        };
        assert!(text.ends_with("+08:00"));
        assert!(DateTime::parse_from_rfc3339(text).is_ok());
    }

    #[test]
    fn test_execute_unknown_zone() {
        let err = CurrentDatetimeTool::default()
            .execute(&params("Mars/Olympus"))
            .unwrap_err();
        assert!(matches!(err, ToolError::InvalidParameter(_)));
    }
}
