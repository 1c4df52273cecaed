mod advice;
mod auth;
mod config;
mod cv;
mod db;
mod editor;
mod errors;
mod llm_client;
mod models;
mod pdf;
mod presentation;
mod routes;
mod state;
mod store;
mod templates;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use axum::http::HeaderValue;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::db::create_pool;
use crate::llm_client::LlmClient;
use crate::pdf::RenderClient;
use crate::routes::build_router;
use crate::state::AppState;
use crate::store::postgres::{PgCvStore, PgUserStore};
use crate::store::{CvStore, UserStore};

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting CV Builder API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize PostgreSQL
    let pool = create_pool(&config.database_url).await?;
    let cvs: Arc<dyn CvStore> = Arc::new(PgCvStore::new(pool.clone()));
    let users: Arc<dyn UserStore> = Arc::new(PgUserStore::new(pool));

    // Initialize LLM client
    let llm = LlmClient::new(config.llm_api_key.clone());
    info!("LLM client initialized (model: {})", llm_client::MODEL);

    // Initialize headless render client
    let renderer = RenderClient::new(config.renderer_url.clone());
    info!("PDF render client initialized ({})", config.renderer_url);

    // Build app state
    let state = AppState {
        cvs,
        users,
        llm,
        renderer,
        config: config.clone(),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(build_cors(&config));

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Restricts CORS to the configured origins; with none configured (local
/// development) the layer stays permissive.
fn build_cors(config: &Config) -> CorsLayer {
    if config.cors_origins.is_empty() {
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = config
        .cors_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(Any)
        .allow_headers(Any)
}
