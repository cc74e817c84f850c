//! Configuration management for the MCP server.
//!
//! This module provides a centralized configuration structure that can be
//! populated from environment variables (and a `.env` file) or defaults.

use super::transport::TransportConfig;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::warn;

/// Default Open-Meteo geocoding endpoint.
pub const DEFAULT_GEOCODING_URL: &str = "https://geocoding-api.open-meteo.com/v1/search";

/// Default Open-Meteo forecast endpoint.
pub const DEFAULT_FORECAST_URL: &str = "https://api.open-meteo.com/v1/forecast";

/// Default Open-Meteo air quality endpoint.
pub const DEFAULT_AIR_QUALITY_URL: &str =
    "https://air-quality-api.open-meteo.com/v1/air-quality";

/// Main configuration structure for the MCP server.
///
/// This struct contains all configurable aspects of the server, organized
/// by domain for clarity and maintainability.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Server identification and metadata.
    pub server: ServerConfig,

    /// Logging configuration.
    pub logging: LoggingConfig,

    /// Transport configuration.
    pub transport: TransportConfig,

    /// Upstream weather API endpoints.
    pub upstream: UpstreamConfig,
}

/// Server identification configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// The name of the server as reported to clients.
    pub name: String,

    /// The version of the server.
    pub version: String,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "trace").
    pub level: String,

    /// Whether to include timestamps in log output.
    pub with_timestamps: bool,
}

/// Upstream endpoints and HTTP client settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpstreamConfig {
    pub geocoding_url: String,
    pub forecast_url: String,
    pub air_quality_url: String,

    /// Language for geocoding results.
    pub language: String,

    /// Per-request timeout, in seconds.
    pub request_timeout_secs: u64,
}

impl UpstreamConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            geocoding_url: DEFAULT_GEOCODING_URL.to_string(),
            forecast_url: DEFAULT_FORECAST_URL.to_string(),
            air_quality_url: DEFAULT_AIR_QUALITY_URL.to_string(),
            language: "en".to_string(),
            request_timeout_secs: 30,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                name: "weather-mcp-server".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            logging: LoggingConfig {
                level: "info".to_string(),
                with_timestamps: true,
            },
            transport: TransportConfig::default(),
            upstream: UpstreamConfig::default(),
        }
    }
}

impl Config {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from environment variables.
    ///
    /// Environment variables are expected to be prefixed with `MCP_`.
    /// For example: `MCP_SERVER_NAME`, `MCP_LOG_LEVEL`.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let mut config = Self::default();

        if let Ok(name) = std::env::var("MCP_SERVER_NAME") {
            config.server.name = name;
        }

        if let Ok(level) = std::env::var("MCP_LOG_LEVEL") {
            config.logging.level = level;
        }

        if let Ok(timestamps) = std::env::var("MCP_LOG_TIMESTAMPS") {
            config.logging.with_timestamps =
                timestamps.to_lowercase() != "false" && timestamps != "0";
        }

        // Load transport configuration from environment
        config.transport = TransportConfig::from_env();

        if let Ok(url) = std::env::var("MCP_GEOCODING_URL") {
            config.upstream.geocoding_url = url;
        }

        if let Ok(url) = std::env::var("MCP_FORECAST_URL") {
            config.upstream.forecast_url = url;
        }

        if let Ok(url) = std::env::var("MCP_AIR_QUALITY_URL") {
            config.upstream.air_quality_url = url;
        }

        if let Ok(language) = std::env::var("MCP_GEOCODING_LANGUAGE") {
            config.upstream.language = language;
        }

        if let Ok(timeout) = std::env::var("MCP_REQUEST_TIMEOUT_SECS") {
            match timeout.parse::<u64>() {
                Ok(secs) if secs > 0 => config.upstream.request_timeout_secs = secs,
                _ => warn!(
                    "Ignoring invalid MCP_REQUEST_TIMEOUT_SECS={:?}, using {}s",
                    timeout, config.upstream.request_timeout_secs
                ),
            }
        }

        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    // Mutex to ensure env var tests run serially
    static ENV_TEST_LOCK: Mutex<()> = Mutex::new(());

    #[test]
    fn test_upstream_defaults() {
        let config = Config::default();
        assert_eq!(config.upstream.geocoding_url, DEFAULT_GEOCODING_URL);
        assert_eq!(config.upstream.forecast_url, DEFAULT_FORECAST_URL);
        assert_eq!(config.upstream.air_quality_url, DEFAULT_AIR_QUALITY_URL);
        assert_eq!(config.upstream.language, "en");
        assert_eq!(config.upstream.request_timeout(), Duration::from_secs(30));
    }

    #[test]
    fn test_upstream_from_env() {
        let _lock = ENV_TEST_LOCK.lock().unwrap();
        unsafe {
            std::env::set_var("MCP_FORECAST_URL", "http://127.0.0.1:9000/v1/forecast");
            std::env::set_var("MCP_REQUEST_TIMEOUT_SECS", "5");
        }
        let config = Config::from_env();
        assert_eq!(
            config.upstream.forecast_url,
            "http://127.0.0.1:9000/v1/forecast"
        );
        assert_eq!(config.upstream.request_timeout_secs, 5);
        unsafe {
            std::env::remove_var("MCP_FORECAST_URL");
            std::env::remove_var("MCP_REQUEST_TIMEOUT_SECS");
        }
    }

    #[test]
    fn test_invalid_timeout_keeps_default() {
        let _lock = ENV_TEST_LOCK.lock().unwrap();
        unsafe {
            std::env::set_var("MCP_REQUEST_TIMEOUT_SECS", "soon");
        }
        let config = Config::from_env();
        assert_eq!(config.upstream.request_timeout_secs, 30);
        unsafe {
            std::env::remove_var("MCP_REQUEST_TIMEOUT_SECS");
        }
    }

    #[test]
    fn test_log_timestamps_from_env() {
        let _lock = ENV_TEST_LOCK.lock().unwrap();
        assert!(Config::default().logging.with_timestamps);
        unsafe {
            std::env::set_var("MCP_LOG_TIMESTAMPS", "false");
        }
        assert!(!Config::from_env().logging.with_timestamps);
        unsafe {
            std::env::set_var("MCP_LOG_TIMESTAMPS", "1");
        }
        assert!(Config::from_env().logging.with_timestamps);
        unsafe {
            std::env::remove_var("MCP_LOG_TIMESTAMPS");
        }
    }

    #[test]
    fn test_server_name_from_env() {
        let _lock = ENV_TEST_LOCK.lock().unwrap();
        unsafe {
            std::env::set_var("MCP_SERVER_NAME", "forecast-box");
        }
        let config = Config::from_env();
        assert_eq!(config.server.name, "forecast-box");
        unsafe {
            std::env::remove_var("MCP_SERVER_NAME");
        }
    }
}
