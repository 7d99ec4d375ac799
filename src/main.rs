//! httpbin: diagnostic HTTP request reflector.
//!
//! ```text
//! httpbin [PORT] [--config FILE]
//! ```
//!
//! PORT defaults to 8000 and overrides `listener.port` from the config file.

use std::path::PathBuf;

use clap::Parser;

use httpbin::config::{load_config, BinConfig};
use httpbin::lifecycle::{wait_for_signal, Shutdown};
use httpbin::observability::init_logging;
use httpbin::HttpServer;

#[derive(Parser)]
#[command(name = "httpbin", version)]
#[command(about = "Diagnostic HTTP echo service for testing HTTP clients", long_about = None)]
struct Cli {
    /// Port to listen on (default 8000).
    port: Option<u16>,

    /// Optional TOML configuration file.
    #[arg(short, long, env = "HTTPBIN_CONFIG")]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => BinConfig::default(),
    }
    .with_port(cli.port);

    init_logging(&config.observability);

    tracing::info!("httpbin v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        host = %config.listener.host,
        port = config.listener.port,
        realm = %config.auth.realm,
        request_timeout_secs = config.timeouts.request_secs,
        "Configuration loaded"
    );

    let listener = httpbin::net::bind(&config.listener).await?;

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    let signal_shutdown = shutdown.clone();
    tokio::spawn(async move {
        wait_for_signal().await;
        signal_shutdown.trigger();
    });

    HttpServer::new(config).run(listener, server_shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
