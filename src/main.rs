//! Weather MCP Server Entry Point
//!
//! Initializes logging, loads configuration, then hands over to
//! [`serve`], which runs the selected transport until it finishes or the
//! process is interrupted.

use anyhow::Result;
use clap::Parser;
use tracing::{Level, info};
use tracing_subscriber::{EnvFilter, fmt};

use weather_mcp_server::core::{Config, Error, TransportConfig, serve};

/// Weather, air quality and time tools over MCP.
#[derive(Debug, Parser)]
#[command(name = "weather-mcp-server", version, about)]
struct Cli {
    /// Transport mode: `stdio`, `http` or `streamable-http`.
    #[arg(long)]
    mode: Option<String>,

    /// Port for the HTTP transports. Ignored for stdio.
    #[arg(long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration from environment
    let mut config = Config::from_env();
    config.transport = resolve_transport(&cli, config.transport)?;

    // Initialize logging
    init_logging(&config.logging.level, config.logging.with_timestamps);

    info!("Starting {} v{}", config.server.name, config.server.version);

    serve(config).await?;
    info!("Server shutting down");

    Ok(())
}

/// Apply the command line on top of the configured transport.
///
/// `--mode` picks the transport; `--port` alone only changes the port of an
/// HTTP transport and never switches away from stdio.
fn resolve_transport(
    cli: &Cli,
    configured: TransportConfig,
) -> weather_mcp_server::Result<TransportConfig> {
    match cli.mode.as_deref() {
        Some(mode) => TransportConfig::from_mode(mode, cli.port)
            .ok_or_else(|| Error::config(format!("Unsupported transport mode: {}", mode))),
        None => Ok(configured.with_port(cli.port)),
    }
}

/// Initialize the logging subsystem.
///
/// Logs go to stderr; stdout belongs to the stdio transport.
fn init_logging(level: &str, with_timestamps: bool) {
    let level = match level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let filter = EnvFilter::from_default_env().add_directive(level.into());

    let builder = fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .with_writer(std::io::stderr);

    if with_timestamps {
        builder.init();
    } else {
        builder.without_time().init();
    }
}
