//! Error types and handling for the MCP server.
//!
//! This module defines a unified error type for server startup and
//! transport failures. Tool failures keep their own [`ToolError`] type and
//! are only wrapped here when they abort startup.
//!
//! [`ToolError`]: crate::domains::tools::ToolError

use thiserror::Error;

use super::http_client::UpstreamError;
use super::transport::TransportError;

/// A specialized Result type for MCP server operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Unified error type for the MCP server.
#[derive(Debug, Error)]
pub enum Error {
    /// The tool registry could not be built.
    #[error("Tool error: {0}")]
    Tool(#[from] crate::domains::tools::ToolError),

    /// The shared HTTP client could not be built.
    #[error("Upstream client error: {0}")]
    Upstream(#[from] UpstreamError),

    /// A transport failed to start or stopped abnormally.
    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    /// Configuration-related errors.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Create a new configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}
