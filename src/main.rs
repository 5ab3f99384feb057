//! Registration service binary.
//!
//! Startup order: config → logging → metrics (opt-in) → record store →
//! listener → serve until SIGINT/SIGTERM.

use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use registro_afiliados::config;
use registro_afiliados::lifecycle::{signals, startup, Shutdown};
use registro_afiliados::observability::{logging, metrics};
use registro_afiliados::HttpServer;

#[derive(Parser)]
#[command(name = "registro-afiliados")]
#[command(about = "Affiliate registration service", long_about = None)]
struct Args {
    /// Optional TOML config file; environment variables override it
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let config = config::load(args.config.as_deref())?;

    logging::init_logging(&config.observability);

    tracing::info!("registro-afiliados v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.listener.bind_address(),
        allowed_origin = %config.cors.allowed_origin,
        request_timeout_secs = config.timeouts.request_secs,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse::<SocketAddr>() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(e) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                error = %e,
                "Failed to parse metrics address"
            ),
        }
    }

    let service = startup::build_service(&config);

    let listener = TcpListener::bind(config.listener.bind_address()).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    let server = HttpServer::new(config, service)?;
    let server_shutdown = shutdown.subscribe();

    tokio::spawn(async move {
        signals::shutdown_signal().await;
        shutdown.trigger();
    });

    server.run(listener, server_shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
