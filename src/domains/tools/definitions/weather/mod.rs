//! Weather tools module.
//!
//! - `current`: markdown summary of current conditions
//! - `range`: hourly trends between two dates
//! - `details`: raw forecast payload as JSON

pub mod current;
pub mod details;
pub mod range;

pub use current::CurrentWeatherTool;
pub use details::WeatherDetailsTool;
pub use range::{WeatherRangeParams, WeatherRangeTool};
