//! Time tools module.
//!
//! These tools do no network I/O.

pub mod convert;
pub mod current_datetime;
pub mod timezone_info;

pub use convert::{ConvertTimeParams, ConvertTimeTool};
pub use current_datetime::{CurrentDatetimeTool, TimezoneParams};
pub use timezone_info::TimezoneInfoTool;
