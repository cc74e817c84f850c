//! Tool-specific error types.
//!
//! Every service, resolver and tool handler returns [`ToolResult`]. Errors are
//! raised where they are detected and travel unchanged up to the transport,
//! which maps them onto MCP error payloads.

use rmcp::ErrorData as McpError;
use thiserror::Error;

/// Result type for tool operations.
pub type ToolResult<T> = Result<T, ToolError>;

/// Errors that can occur during tool operations.
#[derive(Debug, Error)]
pub enum ToolError {
    /// An upstream HTTP call failed (status, network or timeout).
    #[error("{0}")]
    Api(String),

    /// The geocoding API answered but knows no such place.
    #[error("{0}")]
    Geocoding(String),

    /// A caller-supplied argument is missing, empty or invalid.
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// The requested tool is not registered.
    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    /// An internal error occurred.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ToolError {
    /// Create a new upstream API error.
    pub fn api(msg: impl Into<String>) -> Self {
        Self::Api(msg.into())
    }

    /// Create a new geocoding error.
    pub fn geocoding(msg: impl Into<String>) -> Self {
        Self::Geocoding(msg.into())
    }

    /// Create a new "invalid parameter" error.
    pub fn invalid_parameter(msg: impl Into<String>) -> Self {
        Self::InvalidParameter(msg.into())
    }

    /// Create a new "unknown tool" error.
    pub fn unknown_tool(name: impl Into<String>) -> Self {
        Self::UnknownTool(name.into())
    }

    /// Create a new "internal" error.
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// JSON-RPC error code used when this error reaches a client.
    pub fn rpc_code(&self) -> i32 {
        match self {
            Self::InvalidParameter(_) | Self::UnknownTool(_) | Self::Geocoding(_) => -32602,
            Self::Api(_) | Self::Internal(_) => -32603,
        }
    }
}

impl From<ToolError> for McpError {
    fn from(err: ToolError) -> Self {
        match err {
            ToolError::InvalidParameter(_)
            | ToolError::UnknownTool(_)
            | ToolError::Geocoding(_) => McpError::invalid_params(err.to_string(), None),
            ToolError::Api(_) | ToolError::Internal(_) => {
                McpError::internal_error(err.to_string(), None)
            }
        }
    }
}

impl From<serde_json::Error> for ToolError {
    fn from(err: serde_json::Error) -> Self {
        Self::Internal(format!("JSON serialization failed: {}", err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_keeps_upstream_text() {
        let err = ToolError::api("Weather API failed: connection refused");
        assert_eq!(err.to_string(), "Weather API failed: connection refused");
    }

    #[test]
    fn test_rpc_codes() {
        assert_eq!(ToolError::invalid_parameter("x").rpc_code(), -32602);
        assert_eq!(ToolError::unknown_tool("x").rpc_code(), -32602);
        assert_eq!(ToolError::geocoding("x").rpc_code(), -32602);
        assert_eq!(ToolError::api("x").rpc_code(), -32603);
        assert_eq!(ToolError::internal("x").rpc_code(), -32603);
    }

    #[test]
    fn test_into_mcp_error() {
        let err: McpError = ToolError::unknown_tool("nope").into();
        assert_eq!(err.message, "Unknown tool: nope");
    }
}
