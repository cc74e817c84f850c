//! Tool Registry - central registration and dispatch for all tools.
//!
//! This module provides:
//! - A registry of all available tools, built once at startup
//! - Argument validation against each tool's input schema
//! - Name-based dispatch shared by every transport

use std::collections::HashMap;
use std::sync::Arc;

use rmcp::model::{CallToolResult, JsonObject, Tool};
use serde_json::Value;
use tracing::{debug, instrument, warn};

use crate::domains::services::Services;

use super::definitions::{
    AirQualityDetailsTool, AirQualityTool, ConvertTimeTool, CurrentDatetimeTool,
    CurrentWeatherTool, TimezoneInfoTool, WeatherDetailsTool, WeatherRangeTool,
};
use super::{ToolError, ToolHandler, ToolResult};

// ============================================================================
// Tool Registry
// ============================================================================

/// Tool registry - owns one handler per tool.
pub struct ToolRegistry {
    handlers: Vec<Arc<dyn ToolHandler>>,
    descriptors: Vec<Tool>,
    index: HashMap<&'static str, usize>,
}

impl ToolRegistry {
    /// Build the registry with every tool wired to `services`.
    pub fn new(services: &Services) -> ToolResult<Self> {
        let handlers: Vec<Arc<dyn ToolHandler>> = vec![
            Arc::new(CurrentWeatherTool::new(
                services.geo.clone(),
                services.weather.clone(),
            )),
            Arc::new(WeatherRangeTool::new(
                services.geo.clone(),
                services.weather.clone(),
            )),
            Arc::new(WeatherDetailsTool::new(
                services.geo.clone(),
                services.weather.clone(),
            )),
            Arc::new(AirQualityTool::new(
                services.geo.clone(),
                services.air_quality.clone(),
            )),
            Arc::new(AirQualityDetailsTool::new(
                services.geo.clone(),
                services.air_quality.clone(),
            )),
            Arc::new(CurrentDatetimeTool::new(services.time)),
            Arc::new(TimezoneInfoTool::new(services.time)),
            Arc::new(ConvertTimeTool::new(services.time)),
        ];
        Self::from_handlers(handlers)
    }

    /// Build a registry from an explicit handler list, keeping its order.
    ///
    /// Fails if two handlers share a name.
    pub fn from_handlers(handlers: Vec<Arc<dyn ToolHandler>>) -> ToolResult<Self> {
        let mut index = HashMap::with_capacity(handlers.len());
        for (i, handler) in handlers.iter().enumerate() {
            if index.insert(handler.name(), i).is_some() {
                return Err(ToolError::internal(format!(
                    "Duplicate tool name: {}",
                    handler.name()
                )));
            }
        }
        let descriptors = handlers.iter().map(|h| h.descriptor()).collect();

        Ok(Self {
            handlers,
            descriptors,
            index,
        })
    }

    /// Get all tool names, in registration order.
    pub fn tool_names(&self) -> Vec<&'static str> {
        self.handlers.iter().map(|h| h.name()).collect()
    }

    /// Get all tools as Tool models (metadata).
    ///
    /// Both transports list tools from here.
    pub fn list_tools(&self) -> Vec<Tool> {
        self.descriptors.clone()
    }

    /// Validate arguments and run the named tool.
    #[instrument(skip(self, arguments))]
    pub async fn dispatch(&self, name: &str, arguments: JsonObject) -> ToolResult<CallToolResult> {
        let Some(&i) = self.index.get(name) else {
            warn!("Unknown tool requested: {}", name);
            return Err(ToolError::unknown_tool(name));
        };

        let missing = missing_required(&self.descriptors[i], &arguments);
        if !missing.is_empty() {
            return Err(ToolError::invalid_parameter(format!(
                "Missing required parameters: {}",
                missing.join(", ")
            )));
        }

        debug!("Dispatching {}", name);
        self.handlers[i].handle(arguments).await
    }
}

/// Required schema fields that are absent, null or an empty string.
fn missing_required<'a>(tool: &'a Tool, arguments: &JsonObject) -> Vec<&'a str> {
    let Some(Value::Array(required)) = tool.input_schema.get("required") else {
        return Vec::new();
    };

    required
        .iter()
        .filter_map(Value::as_str)
        .filter(|field| match arguments.get(*field) {
            None | Some(Value::Null) => true,
            Some(Value::String(s)) => s.is_empty(),
            Some(_) => false,
        })
        .collect()
}
