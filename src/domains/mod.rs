//! Domains module containing business logic organized by bounded contexts.
//!
//! - `geocoding`, `weather`, `air_quality`, `time`: upstream clients and
//!   their typed results
//! - `services`: the bundle of those clients shared by the tools
//! - `tools`: the MCP-facing tool layer

pub mod air_quality;
pub mod geocoding;
pub mod services;
pub mod time;
pub mod tools;
pub mod weather;

#[cfg(test)]
pub(crate) mod testing;
