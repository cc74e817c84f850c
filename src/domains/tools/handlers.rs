//! Tool handler interface.
//!
//! Every tool in `definitions/` implements [`ToolHandler`]. The registry
//! keeps one instance per tool, built once at startup, and routes calls to
//! it by name.

use async_trait::async_trait;
use rmcp::model::{CallToolResult, JsonObject, Tool};

use super::ToolResult;

/// A callable tool: static metadata plus an async handler.
#[async_trait]
pub trait ToolHandler: Send + Sync {
    /// Name the tool is registered under.
    fn name(&self) -> &'static str;

    /// Tool metadata (name, description, input schema) shown to clients.
    fn descriptor(&self) -> Tool;

    /// Execute the tool with already validated arguments.
    async fn handle(&self, arguments: JsonObject) -> ToolResult<CallToolResult>;
}
