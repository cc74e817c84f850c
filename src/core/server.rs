//! MCP Server implementation and lifecycle management.
//!
//! This module contains the main server handler that implements the MCP
//! protocol by delegating to the tool registry.
//!
//! The ToolRouter used by rmcp is built from the same [`ToolRegistry`] the
//! HTTP transport dispatches through, so both expose the same tools.
//! **Adding a new tool does NOT require modifying this file!**

use rmcp::{ServerHandler, handler::server::tool::ToolRouter, model::*, tool_handler};
use serde_json::Value;
use std::sync::Arc;
use tracing::{info, instrument, warn};

use super::config::Config;
use super::http_client::HttpClient;
use super::transport::TransportService;
use crate::domains::services::Services;
use crate::domains::tools::{ToolError, ToolRegistry, build_tool_router};

const INSTRUCTIONS: &str = "Weather, air quality and time tools. City-based tools accept a \
     city name and geocode it first. Time tools take IANA timezone names such as \
     'Asia/Shanghai'.";

/// The main MCP server handler.
///
/// This struct implements the `ServerHandler` trait from rmcp and forwards
/// tool calls to the shared [`ToolRegistry`].
#[derive(Clone)]
pub struct McpServer {
    /// Server configuration.
    config: Arc<Config>,

    /// Tool registry shared with the router.
    registry: Arc<ToolRegistry>,

    /// Tool router for handling tool calls.
    tool_router: ToolRouter<Self>,
}

impl McpServer {
    /// Create a new MCP server with the given configuration and tools.
    pub fn new(config: Config, registry: Arc<ToolRegistry>) -> Self {
        Self {
            tool_router: build_tool_router::<Self>(registry.clone()),
            config: Arc::new(config),
            registry,
        }
    }

    /// Get the server name.
    pub fn name(&self) -> &str {
        &self.config.server.name
    }

    /// Get the server version.
    pub fn version(&self) -> &str {
        &self.config.server.version
    }

    // ========================================================================
    // HTTP Transport Support Methods
    // ========================================================================

    /// List all available tools (for HTTP transport).
    pub fn list_tools(&self) -> Vec<Value> {
        self.registry
            .list_tools()
            .into_iter()
            .map(|t| {
                serde_json::json!({
                    "name": t.name,
                    "description": t.description,
                    "inputSchema": t.input_schema
                })
            })
            .collect()
    }

    /// Call a tool by name (for HTTP transport).
    ///
    /// Missing or null arguments are treated as an empty object.
    #[instrument(skip(self, arguments))]
    pub async fn call_tool(&self, name: &str, arguments: Value) -> Result<Value, ToolError> {
        let arguments = match arguments {
            Value::Object(map) => map,
            Value::Null => JsonObject::new(),
            _ => {
                return Err(ToolError::invalid_parameter(
                    "Tool arguments must be a JSON object",
                ));
            }
        };

        let result = self.registry.dispatch(name, arguments).await?;
        Ok(serde_json::to_value(result)?)
    }
}

/// Wire the services and tool registry around `http` and build the server.
///
/// The server (through its registry) holds the only handles to `http`
/// besides the caller's.
pub fn build_server(config: Config, http: Arc<HttpClient>) -> super::error::Result<McpServer> {
    let services = Services::new(http, &config.upstream);
    let registry = Arc::new(ToolRegistry::new(&services)?);
    Ok(McpServer::new(config, registry))
}

/// Run the configured transport until it finishes or the process is
/// interrupted, then release the shared HTTP client.
pub async fn serve(config: Config) -> super::error::Result<()> {
    let http = Arc::new(HttpClient::new(config.upstream.request_timeout())?);
    let transport = TransportService::new(config.transport.clone());
    let server = build_server(config, http.clone())?;

    info!("Server initialized");

    // The losing branch is dropped here, taking the server with it.
    let outcome = tokio::select! {
        result = transport.run(server) => result.map_err(Into::into),
        _ = tokio::signal::ctrl_c() => {
            info!("Interrupted, shutting down");
            Ok(())
        }
    };

    release_client(http);
    outcome
}

/// Shut the client down if this is the last handle to it.
///
/// Returns `false` when something still holds a clone; the pool is then
/// released when that holder drops it.
fn release_client(http: Arc<HttpClient>) -> bool {
    match Arc::try_unwrap(http) {
        Ok(client) => {
            client.shutdown();
            true
        }
        Err(shared) => {
            warn!(
                "HTTP client still held by {} other handle(s)",
                Arc::strong_count(&shared) - 1
            );
            false
        }
    }
}

/// ServerHandler implementation with tool_handler macro for automatic tool routing.
#[tool_handler]
impl ServerHandler for McpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(INSTRUCTIONS.to_string()),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: self.config.server.name.clone(),
                version: self.config.server.version.clone(),
                ..Implementation::from_build_env()
            },
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::UpstreamConfig;
    use crate::domains::services::Services;
    use crate::domains::testing::StubFetch;
    use serde_json::json;

    fn test_server() -> McpServer {
        let services = Services::new(StubFetch::new().into_arc(), &UpstreamConfig::default());
        let registry = Arc::new(ToolRegistry::new(&services).unwrap());
        McpServer::new(Config::default(), registry)
    }

    #[test]
    fn test_get_info_tools_only() {
        let info = test_server().get_info();
        assert!(info.capabilities.tools.is_some());
        assert!(info.capabilities.resources.is_none());
        assert!(info.capabilities.prompts.is_none());
        assert_eq!(info.server_info.name, "weather-mcp-server");
    }

    #[test]
    fn test_list_tools_json_shape() {
        let tools = test_server().list_tools();
        assert_eq!(tools.len(), 8);
        assert_eq!(tools[0]["name"], "get_current_weather");
        assert_eq!(tools[0]["inputSchema"]["type"], "object");
    }

    #[tokio::test]
    async fn test_call_tool_returns_content() {
        let result = test_server()
            .call_tool("get_timezone_info", json!({ "timezone_name": "UTC" }))
            .await
            .unwrap();
        assert_eq!(result["content"][0]["type"], "text");
        assert!(result["content"][0]["text"]
            .as_str()
            .unwrap()
            .contains("\"offset\": \"+0000\""));
    }

    #[test]
    fn test_client_released_once_server_dropped() {
        let http = Arc::new(HttpClient::new(std::time::Duration::from_secs(5)).unwrap());
        let server = build_server(Config::default(), http.clone()).unwrap();
        assert!(Arc::strong_count(&http) > 1);
        assert!(!release_client(http.clone()));

        drop(server);
        assert_eq!(Arc::strong_count(&http), 1);
        assert!(release_client(http));
    }

    #[tokio::test]
    async fn test_call_tool_rejects_non_object_arguments() {
        let err = test_server()
            .call_tool("get_timezone_info", json!(["UTC"]))
            .await
            .unwrap_err();
        assert!(matches!(err, ToolError::InvalidParameter(_)));
    }
}
