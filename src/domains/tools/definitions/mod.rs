//! Tool definitions module.
//!
//! One file per tool, grouped by the service they front.

pub mod air_quality;
pub mod common;
pub mod time;
pub mod weather;

pub use air_quality::{AirQualityDetailsTool, AirQualityTool};
pub use common::CityParams;
pub use time::{
    ConvertTimeParams, ConvertTimeTool, CurrentDatetimeTool, TimezoneInfoTool, TimezoneParams,
};
pub use weather::{CurrentWeatherTool, WeatherDetailsTool, WeatherRangeParams, WeatherRangeTool};
