//! HTTP server: routes, handlers and the runner.

use axum::{
    extract::{rejection::JsonRejection, State},
    routing::{get, post},
    Json, Router,
};
use rbl_core::{AggregateResponse, RblError, RblProvider, Result};
use rbl_engine::RblEngine;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::config::ServerConfig;
use crate::error::ApiError;

/// Shared handler state.
#[derive(Clone)]
pub struct AppState {
    engine: Arc<RblEngine>,
}

impl AppState {
    /// Wrap an engine for the handlers
    #[must_use]
    pub fn new(engine: RblEngine) -> Self {
        Self {
            engine: Arc::new(engine),
        }
    }
}

/// Body of `POST /api/rbl-check`.
#[derive(Debug, Default, Deserialize)]
pub struct CheckRequest {
    /// IPv4, IPv6 or domain to check
    #[serde(default)]
    pub target: Option<String>,
}

/// Body of `GET /health`.
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub providers: usize,
}

/// Build the API router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/rbl-check", post(check))
        .route("/api/rbl-check/providers", get(providers))
        .route("/health", get(health))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn check(
    State(state): State<AppState>,
    payload: std::result::Result<Json<CheckRequest>, JsonRejection>,
) -> std::result::Result<Json<AggregateResponse>, ApiError> {
    let Json(request) = payload.map_err(|e| ApiError::BadRequest(e.body_text()))?;

    let target = request
        .target
        .filter(|t| !t.trim().is_empty())
        .ok_or_else(|| RblError::Validation("Target is required".into()))?;

    let response = state.engine.check(&target).await?;
    Ok(Json(response))
}

async fn providers(State(state): State<AppState>) -> Json<Vec<RblProvider>> {
    Json(state.engine.catalog().iter().cloned().collect())
}

async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".into(),
        providers: state.engine.catalog().len(),
    })
}

/// Start the HTTP server and serve until Ctrl-C.
pub async fn run(config: &ServerConfig) -> Result<()> {
    let catalog = config.build_catalog()?;
    info!(
        providers = catalog.len(),
        custom = config.catalog.is_some(),
        "loaded provider catalog"
    );

    let engine = RblEngine::with_system_resolver(Arc::new(catalog), config.engine.clone())?;
    let app = router(AppState::new(engine));

    let listener = TcpListener::bind(config.listen)
        .await
        .map_err(|e| RblError::Internal(format!("bind {}: {e}", config.listen)))?;
    info!(addr = %config.listen, "RBL check API listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| RblError::Internal(format!("server error: {e}")))?;

    info!("RBL check API stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "failed to listen for Ctrl-C");
        std::future::pending::<()>().await;
    }
    info!("shutdown requested");
}
