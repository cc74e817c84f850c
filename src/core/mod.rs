//! Core module containing shared infrastructure components.
//!
//! This module provides the foundational building blocks for the MCP server,
//! including error handling, configuration, the shared upstream HTTP client,
//! server lifecycle management, and transport layer abstractions.

pub mod config;
pub mod error;
pub mod http_client;
pub mod server;
pub mod transport;

pub use config::Config;
pub use error::{Error, Result};
pub use http_client::{HttpClient, HttpFetch};
pub use server::{McpServer, build_server, serve};
pub use transport::{TransportConfig, TransportService};
