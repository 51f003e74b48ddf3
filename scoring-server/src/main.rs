//! AFEWS Scoring Server
//!
//! HTTP front for the authentication-failure risk scoring engine.
//!
//! # Lifecycle
//!
//! ```text
//!  env / .env ──► Config ──► fit engine (blocking thread)
//!                                 │ error: refuse to start
//!                                 ▼
//!                        Arc<ScoringEngine> ──► Router ──► listener
//! ```
//!
//! The listener is bound only after the fit completes, so every request
//! sees the finished, read-only engine.

mod config;
mod error;
mod handlers;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use afews_core::ScoringEngine;

pub use error::{AppError, AppResult};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "afews_server=debug,afews_core=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = config::Config::from_env();

    tracing::info!(
        "AFEWS Scoring Server starting ({}{})",
        config.environment,
        if config.is_production() { "" } else { ", non-production" }
    );
    tracing::info!("Training corpus: {}", config.engine.corpus);

    // Fit before accepting traffic
    let engine_config = config.engine.clone();
    let engine = tokio::task::spawn_blocking(move || ScoringEngine::fit(&engine_config))
        .await
        .context("engine fit task failed")?
        .context("failed to initialize scoring engine")?;

    tracing::info!(
        "Engine ready: {} trees, {} training records",
        engine.metadata().n_trees,
        engine.metadata().trained_on_records
    );

    // Build application state
    let state = AppState {
        engine: Arc::new(engine),
        config: config.clone(),
    };

    let app = create_router(state);

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    axum::serve(listener, app).await.context("server error")?;

    Ok(())
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<ScoringEngine>,
    pub config: config::Config,
}

/// Create the main router with all routes
fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health::check))
        .route("/api/v1/engine/status", get(handlers::status::get))
        .route("/api/v1/score", post(handlers::score::score))
        .route("/api/v1/score/batch", post(handlers::score::score_batch))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
