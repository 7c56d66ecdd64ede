//! HTTP server for the wishwall endpoints

use std::sync::Arc;

use axum::extract::State;
use axum::response::{Html, Json};
use axum::routing::get;
use axum::Router;
use chrono::{DateTime, Utc};
use tower_http::cors::CorsLayer;
use tracing::{error, info, warn};

use crate::config::Config;
use crate::page::render_page;
use crate::store::WishStore;
use crate::types::{HealthResponse, RefreshResponse, Wish};

/// Shared state for the HTTP server
pub struct ServerState {
    pub config: Config,
    pub store: WishStore,
    pub started_at: DateTime<Utc>,
}

impl ServerState {
    pub fn new(config: Config) -> Self {
        let store = WishStore::new(&config);
        Self {
            config,
            store,
            started_at: Utc::now(),
        }
    }
}

pub type SharedState = Arc<ServerState>;

/// Create the HTTP router
pub fn create_router(state: SharedState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/health", get(health))
        .route("/refresh", get(refresh))
        .route("/api/wishes", get(api_wishes))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Start the HTTP server
pub async fn start_server(state: SharedState, port: u16) -> std::io::Result<()> {
    let router = create_router(state);
    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], port));
    info!("Starting HTTP server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router).await
}

/// Wish wall page; renders empty when unconfigured or on fetch failure
async fn index(State(state): State<SharedState>) -> Html<String> {
    let entry_url = state.config.wish_entry_url.as_deref();

    if !state.config.is_configured() {
        warn!("Feishu config incomplete, rendering empty wish wall");
        return Html(render_page(&[], entry_url));
    }

    match state.store.recent_wishes().await {
        Ok(wishes) => {
            info!(count = wishes.len(), "Rendered wish wall");
            Html(render_page(&wishes, entry_url))
        }
        Err(e) => {
            error!(error = %e, "Failed to load wishes");
            Html(render_page(&[], entry_url))
        }
    }
}

/// Health check endpoint; measures a live (uncached) fetch when configured
async fn health(State(state): State<SharedState>) -> Json<HealthResponse> {
    let env_ok = state.config.is_configured();
    let cached = state.store.cached().await;
    let cache = state.store.cache_stats().await;
    let uptime_secs = (Utc::now() - state.started_at).num_seconds() as u64;

    if !env_ok {
        return Json(HealthResponse {
            env_ok,
            cached,
            wish_count: 0,
            fetch_error: None,
            uptime_secs,
            cache,
        });
    }

    match state.store.fetch_live().await {
        Ok(wishes) => Json(HealthResponse {
            env_ok,
            cached,
            wish_count: wishes.len(),
            fetch_error: None,
            uptime_secs,
            cache,
        }),
        Err(e) => {
            error!(error = %e, "Health check fetch failed");
            Json(HealthResponse {
                env_ok,
                cached,
                wish_count: 0,
                fetch_error: Some(true),
                uptime_secs,
                cache,
            })
        }
    }
}

/// Clear the response cache (manual refresh)
async fn refresh(State(state): State<SharedState>) -> Json<RefreshResponse> {
    state.store.clear_cache().await;
    info!("Cache cleared manually");
    Json(RefreshResponse { ok: true })
}

/// JSON listing of the normalized, filtered wishes
async fn api_wishes(State(state): State<SharedState>) -> Json<Vec<Wish>> {
    if !state.config.is_configured() {
        return Json(vec![]);
    }

    match state.store.recent_wishes().await {
        Ok(wishes) => Json(wishes),
        Err(e) => {
            error!(error = %e, "Failed to load wishes for API");
            Json(vec![])
        }
    }
}
