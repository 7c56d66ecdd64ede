//! Wishwall - wish wall service backed by Feishu Bitable
//!
//! Serves a wish wall page and a JSON API from a Feishu Bitable table,
//! with a short-lived in-memory cache in front of the upstream.

mod cache;
mod config;
mod error;
mod page;
mod server;
mod store;
mod types;
mod wish;

use crate::config::Config;
use crate::error::{Result, WishwallError};
use crate::server::{start_server, ServerState, SharedState};
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::{prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    let env_filter = EnvFilter::from_default_env().add_directive("wishwall_server=info".parse()?);

    // Use JSON format for GCP Cloud Logging when LOG_FORMAT=json
    if std::env::var("LOG_FORMAT")
        .map(|v| v == "json")
        .unwrap_or(false)
    {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_stackdriver::layer())
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(env_filter).init();
    }

    info!("Starting Wishwall service...");

    // Load configuration from environment
    let config = Config::from_env();
    info!("Port: {}", config.port);
    info!("Cache TTL: {} seconds", config.cache_ttl_secs);
    if !config.is_configured() {
        warn!("Feishu configuration incomplete; serving empty wish lists");
    }

    let port = config.port;

    // Create shared state
    let state: SharedState = Arc::new(ServerState::new(config));

    // Start HTTP server (blocking)
    start_server(state, port)
        .await
        .map_err(|e| WishwallError::Config(format!("Server error: {}", e)))?;

    Ok(())
}
