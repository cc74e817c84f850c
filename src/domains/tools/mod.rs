//! Tools domain module.
//!
//! Tools are the functions MCP clients call: weather, air quality and time.
//!
//! ## Architecture
//!
//! - `definitions/` - Individual tool implementations (one file per tool)
//! - `handlers.rs` - The [`ToolHandler`] interface every tool implements
//! - `registry.rs` - Tool registry, argument validation and dispatch
//! - `router.rs` - rmcp ToolRouter built from the registry for stdio
//! - `error.rs` - Tool-specific error types
//!
//! ## Adding a New Tool
//!
//! 1. Create a new file in `definitions/` implementing [`ToolHandler`]
//! 2. Export it in `definitions/mod.rs`
//! 3. Add it to `ToolRegistry::new`
//!
//! The router and both transports pick it up from the registry.

pub mod definitions;
mod error;
mod handlers;
mod registry;
pub mod router;

pub use error::{ToolError, ToolResult};
pub use handlers::ToolHandler;
pub use registry::ToolRegistry;
pub use router::build_tool_router;
