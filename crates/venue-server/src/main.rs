//! TCP server binary for the venue matching engine.

use anyhow::Result;
use tracing::info;
use tracing_subscriber::EnvFilter;
use venue_server::config::Config;
use venue_server::server;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = Config::from_env()?;
    info!(
        addr = %config.socket_addr_string(),
        max_clients = config.max_clients,
        "starting venue-server"
    );

    server::run(config).await
}
