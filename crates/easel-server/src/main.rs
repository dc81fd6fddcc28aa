//! Easel Canvas Server
//!
//! HTTP backend for collaborative drawing canvases. Clients add shapes,
//! text and images to named canvases, undo changes, query which element
//! sits under a point, and fetch PNG previews or PDF exports.
//!
//! Canvas state lives in memory for the lifetime of the process.

use clap::Parser;
use tracing::info;

mod config;
mod error;
mod handlers;
mod routes;
mod state;
mod storage;

use crate::config::Config;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "easel_server=info,tower_http=info".into()),
        )
        .init();

    let config = Config::parse();
    let state = AppState::from_config(&config)?;
    let app = routes::router(state);

    let addr = config.addr();
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Easel server listening on {}", addr);
    info!("Uploads in {}, exports in {}", config.upload_dir.display(), config.export_dir.display());

    axum::serve(listener, app).await?;
    Ok(())
}
