//! Weather MCP Server Library
//!
//! A Model Context Protocol (MCP) server exposing weather, air quality and
//! timezone tools backed by the Open-Meteo APIs.
//!
//! # Architecture
//!
//! - **core**: configuration, error handling, the shared upstream HTTP
//!   client, the MCP server handler and its transports
//! - **domains**: business logic
//!   - **geocoding**, **weather**, **air_quality**, **time**: typed clients
//!   - **tools**: the eight MCP tools, their registry and router
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use weather_mcp_server::core::{Config, HttpClient, build_server};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env();
//!     let http = Arc::new(HttpClient::new(config.upstream.request_timeout())?);
//!     let server = build_server(config, http)?;
//!     // Start a transport, or call `core::serve` to do all of the above...
//!     Ok(())
//! }
//! ```

pub mod core;
pub mod domains;

// Re-export commonly used types for convenience
pub use core::{Config, Error, McpServer, Result};
