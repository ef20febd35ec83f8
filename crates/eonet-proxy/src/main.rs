//! HTTP proxy for NASA EONET natural-event data.
//!
//! Serves upstream payloads verbatim under `/raw/events`, `/categories` and
//! `/sources`, and a flattened view under `/normalized/events`.

mod config;
mod error;
mod routes;
mod state;

use eonet_client::EonetClient;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::config::Config;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = Config::from_env()?;
    info!(
        addr = %config.addr,
        base_url = %config.settings.base_url,
        retries = config.settings.retries,
        timeout_secs = config.settings.timeout_secs,
        "Starting EONET proxy"
    );

    let client = EonetClient::new(config.settings)?;
    let app = routes::router().with_state(AppState::new(client));

    info!(addr = %config.addr, "EONET proxy listening");
    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
