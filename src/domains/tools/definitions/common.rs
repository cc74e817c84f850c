//! Common utilities shared across tool definitions.
//!
//! Parameter decoding, tool metadata construction and result formatting.

use rmcp::{
    handler::server::tool::cached_schema_for_type,
    model::{CallToolResult, Content, JsonObject, Tool},
};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize, de::DeserializeOwned};

use crate::domains::tools::{ToolError, ToolResult};

/// Parameters for the city-based tools.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct CityParams {
    /// City name, e.g. "London".
    #[schemars(description = "City name (e.g. 'London')")]
    pub city: String,
}

/// Build the Tool model for a parameter type.
pub fn tool_model<P>(name: &'static str, description: &'static str) -> Tool
where
    P: JsonSchema + 'static,
{
    Tool {
        name: name.into(),
        description: Some(description.into()),
        input_schema: cached_schema_for_type::<P>(),
        annotations: None,
        output_schema: None,
        icons: None,
        meta: None,
        title: None,
    }
}

/// Decode tool arguments into their parameter struct.
pub fn parse_params<P: DeserializeOwned>(arguments: JsonObject) -> ToolResult<P> {
    serde_json::from_value(serde_json::Value::Object(arguments))
        .map_err(|e| ToolError::invalid_parameter(e.to_string()))
}

/// Create a success result with text content.
pub fn text_result(content: impl Into<String>) -> CallToolResult {
    CallToolResult::success(vec![Content::text(content.into())])
}

/// Create a success result holding pretty-printed JSON.
pub fn json_result<T: Serialize + ?Sized>(value: &T) -> ToolResult<CallToolResult> {
    Ok(text_result(serde_json::to_string_pretty(value)?))
}
