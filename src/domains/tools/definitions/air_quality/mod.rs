//! Air quality tools module.

pub mod current;
pub mod details;

pub use current::AirQualityTool;
pub use details::AirQualityDetailsTool;
