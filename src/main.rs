//! HTTP server for the capacity engine.
//!
//! Environment:
//! - `CAPACITY_CONFIG`: configuration directory (default `./config/default`)
//! - `PORT`: listen port (default 3000)
//! - `RUST_LOG`: log filter (default `info`)

use std::net::SocketAddr;

use tracing::info;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use capacity_engine::api::{AppState, create_router};
use capacity_engine::config::ConfigLoader;

const DEFAULT_CONFIG_DIR: &str = "./config/default";
const DEFAULT_PORT: u16 = 3000;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    let config_dir =
        std::env::var("CAPACITY_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_DIR.to_string());
    let port = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(DEFAULT_PORT);

    let config = ConfigLoader::load(&config_dir)?;
    let router = create_router(AppState::new(config));

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, config_dir = %config_dir, "Capacity engine listening");

    axum::serve(listener, router).await?;
    Ok(())
}
