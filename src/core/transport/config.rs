//! Transport configuration types.

use serde::{Deserialize, Serialize};

/// Transport configuration options.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum TransportConfig {
    /// Standard input/output transport (default for MCP).
    #[cfg(feature = "stdio")]
    Stdio,

    /// HTTP transport with JSON-RPC over POST.
    #[cfg(feature = "http")]
    Http(HttpConfig),

    /// MCP streamable HTTP transport (sessions, SSE responses).
    #[cfg(feature = "http")]
    StreamableHttp(HttpConfig),
}

/// HTTP transport configuration.
#[cfg(feature = "http")]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    /// Port number to listen on.
    pub port: u16,

    /// Host address to bind to.
    #[serde(default = "default_host")]
    pub host: String,

    /// Path for JSON-RPC endpoint.
    #[serde(default = "default_rpc_path")]
    pub rpc_path: String,

    /// Enable CORS for browser clients.
    #[serde(default = "default_cors")]
    pub enable_cors: bool,
}

#[cfg(feature = "http")]
fn default_host() -> String {
    "127.0.0.1".to_string()
}

#[cfg(feature = "http")]
fn default_rpc_path() -> String {
    "/mcp".to_string()
}

#[cfg(feature = "http")]
fn default_cors() -> bool {
    true
}

#[cfg(feature = "http")]
const DEFAULT_HTTP_PORT: u16 = 8080;

impl Default for TransportConfig {
    fn default() -> Self {
        #[cfg(feature = "stdio")]
        {
            return Self::Stdio;
        }

        #[cfg(all(not(feature = "stdio"), feature = "http"))]
        {
            return Self::Http(HttpConfig::default());
        }

        #[cfg(not(any(feature = "stdio", feature = "http")))]
        {
            compile_error!("At least one transport feature must be enabled: stdio or http");
        }
    }
}

#[cfg(feature = "http")]
impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_HTTP_PORT,
            host: default_host(),
            rpc_path: default_rpc_path(),
            enable_cors: default_cors(),
        }
    }
}

#[cfg(feature = "http")]
impl HttpConfig {
    /// HTTP settings from `MCP_HTTP_*` variables.
    pub fn from_env() -> Self {
        let port = std::env::var("MCP_HTTP_PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(DEFAULT_HTTP_PORT);
        let host = std::env::var("MCP_HTTP_HOST").unwrap_or_else(|_| default_host());
        let rpc_path = std::env::var("MCP_HTTP_PATH").unwrap_or_else(|_| default_rpc_path());
        let enable_cors = std::env::var("MCP_HTTP_CORS")
            .map(|v| v.to_lowercase() != "false" && v != "0")
            .unwrap_or(true);
        Self {
            port,
            host,
            rpc_path,
            enable_cors,
        }
    }
}

impl TransportConfig {
    /// Resolve a transport mode name (`stdio`, `http` or `streamable-http`).
    ///
    /// HTTP settings come from the environment; `port` overrides the port
    /// of the HTTP modes and is ignored for stdio.
    /// Returns `None` for names that are unknown or not compiled in.
    pub fn from_mode(mode: &str, port: Option<u16>) -> Option<Self> {
        let config = match mode.to_lowercase().as_str() {
            #[cfg(feature = "stdio")]
            "stdio" => Self::Stdio,
            #[cfg(feature = "http")]
            "http" => Self::Http(HttpConfig::from_env()),
            #[cfg(feature = "http")]
            "streamable-http" => Self::StreamableHttp(HttpConfig::from_env()),
            _ => return None,
        };
        Some(config.with_port(port))
    }

    /// Override the listening port of an HTTP transport. Stdio is unchanged.
    pub fn with_port(self, port: Option<u16>) -> Self {
        match (self, port) {
            #[cfg(feature = "http")]
            (Self::Http(cfg), Some(port)) => Self::Http(HttpConfig { port, ..cfg }),
            #[cfg(feature = "http")]
            (Self::StreamableHttp(cfg), Some(port)) => {
                Self::StreamableHttp(HttpConfig { port, ..cfg })
            }
            (config, _) => config,
        }
    }

    /// Load transport config from environment variables.
    pub fn from_env() -> Self {
        let transport = std::env::var("MCP_TRANSPORT").unwrap_or_default();
        Self::from_mode(&transport, None).unwrap_or_default()
    }

    /// Get a description of this transport for logging.
    pub fn description(&self) -> String {
        match self {
            #[cfg(feature = "stdio")]
            Self::Stdio => "STDIO (standard MCP mode)".to_string(),
            #[cfg(feature = "http")]
            Self::Http(cfg) => format!("HTTP on {}:{}{}", cfg.host, cfg.port, cfg.rpc_path),
            #[cfg(feature = "http")]
            Self::StreamableHttp(cfg) => format!(
                "Streamable HTTP on {}:{}{}",
                cfg.host, cfg.port, cfg.rpc_path
            ),
        }
    }
}
