//! Transport layer for the MCP server.
//!
//! This module provides three transport implementations:
//! - **STDIO**: Standard input/output (default for MCP) - feature: `stdio`
//! - **HTTP**: HTTP server with JSON-RPC over POST requests - feature: `http`
//! - **Streamable HTTP**: the MCP streamable HTTP protocol via rmcp - feature: `http`
//!
//! Each transport handles the connection lifecycle and delegates
//! message processing to the MCP server handler.
//!
//! # Feature Flags
//!
//! - `stdio` (default): STDIO transport via rmcp
//! - `http` (default): both HTTP transports - adds axum, tower-http and
//!   rmcp's streamable HTTP server

mod config;
mod error;
mod service;

#[cfg(feature = "http")]
pub mod http;

#[cfg(feature = "http")]
pub mod streamable_http;

#[cfg(feature = "stdio")]
pub mod stdio;

pub use config::TransportConfig;
pub use error::{TransportError, TransportResult};
pub use service::TransportService;

#[cfg(feature = "http")]
pub use config::HttpConfig;
