mod config;
mod error;
mod mackerel;
mod metrics;
mod models;
mod routes;
mod server;
mod state;

use clap::Parser;
use std::sync::Arc;
use tracing::{info, warn};

use config::{CliArgs, WebhookConfig};
use mackerel::{MackerelClient, MetricsSink};
use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "autify2mackerel=info,tower_http=info".into()),
        )
        .init();

    let args = CliArgs::parse();
    info!("Starting autify2mackerel v{}", env!("CARGO_PKG_VERSION"));

    let port_defaulted = args.port.is_none();
    let config = WebhookConfig::from_args(args);
    if port_defaulted {
        info!("Defaulting to port {}", config.port);
    }
    info!("Service name: {}", config.service_name);
    if !config.api_key_configured() {
        warn!("MACKEREL_APIKEY is not set; test plan webhooks will be answered with 500");
    }

    let sink = MackerelClient::from_config(&config)?
        .map(|client| Arc::new(client) as Arc<dyn MetricsSink>);
    let port = config.port;
    let state = Arc::new(AppState::new(config, sink));

    let router = server::build_router(state);
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", port)).await?;
    info!("Listening on http://0.0.0.0:{}", port);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Shutting down");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to install Ctrl+C handler: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Received shutdown signal");
}
