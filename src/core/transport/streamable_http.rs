//! Streamable HTTP transport implementation.
//!
//! Serves the MCP streamable HTTP protocol through rmcp: clients open a
//! session with `initialize`, then exchange JSON-RPC messages over POST with
//! responses streamed as SSE.

use axum::{Json, Router, response::IntoResponse, routing::get};
use rmcp::transport::streamable_http_server::{
    StreamableHttpService, session::local::LocalSessionManager,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::info;

use super::{TransportError, TransportResult, config::HttpConfig};
use crate::core::McpServer;

/// Streamable HTTP transport handler.
pub struct StreamableHttpTransport {
    config: HttpConfig,
}

impl StreamableHttpTransport {
    pub fn new(config: HttpConfig) -> Self {
        Self { config }
    }

    /// Get the bind address.
    pub fn address(&self) -> String {
        format!("{}:{}", self.config.host, self.config.port)
    }

    /// Build the axum router serving `server` on the configured path.
    ///
    /// Each session gets its own clone of the server; all clones share the
    /// same tool registry.
    pub fn router(&self, server: McpServer) -> Router {
        let service = StreamableHttpService::new(
            move || Ok(server.clone()),
            LocalSessionManager::default().into(),
            Default::default(),
        );

        let mut app = Router::new()
            .nest_service(&self.config.rpc_path, service)
            .route("/health", get(health_check))
            .layer(TraceLayer::new_for_http());

        if self.config.enable_cors {
            let cors = CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any);
            app = app.layer(cors);
        }

        app
    }

    /// Run the streamable HTTP transport.
    pub async fn run(self, server: McpServer) -> TransportResult<()> {
        let addr = self.address();
        let app = self.router(server);

        let listener = tokio::net::TcpListener::bind(&addr)
            .await
            .map_err(|e| TransportError::bind(&addr, e))?;

        info!("Ready - listening on {} (MCP streamable HTTP)", addr);
        info!("  → MCP:    {}", self.config.rpc_path);
        info!("  → Health: GET /health");

        axum::serve(listener, app)
            .await
            .map_err(|e| TransportError::http(e.to_string()))?;

        Ok(())
    }
}

async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "transport": "streamable-http",
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}
