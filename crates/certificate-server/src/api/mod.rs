//! API module for the certificate server

pub mod error;
pub mod handlers;

use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use error::ApiError;
use handlers::AppState;

/// Health check response
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// Readiness check response
#[derive(Serialize)]
pub struct ReadyResponse {
    pub ready: bool,
    pub certificate_count: usize,
    pub user_count: usize,
    pub started_at: String,
}

/// Health check endpoint
///
/// GET /health
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".into(),
        version: env!("CARGO_PKG_VERSION").into(),
    })
}

/// Readiness check endpoint
///
/// GET /ready
pub async fn ready(State(state): State<Arc<AppState>>) -> Result<Json<ReadyResponse>, ApiError> {
    let counts = state.store.counts().await?;

    Ok(Json(ReadyResponse {
        ready: true,
        certificate_count: counts.certificates,
        user_count: counts.users,
        started_at: state.started_at.to_rfc3339(),
    }))
}

/// Create the API router
pub fn create_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Health endpoints
        .route("/health", get(health))
        .route("/ready", get(ready))
        // Certificate endpoints
        .route(
            "/certificates/{id}",
            get(handlers::get_certificate)
                .post(handlers::create_certificate)
                .put(handlers::update_certificate)
                .delete(handlers::delete_certificate),
        )
        .route("/users/{id}/certificates", get(handlers::list_certificates))
        // Transfer endpoints
        .route(
            "/certificates/{id}/transfers",
            post(handlers::request_transfer).put(handlers::accept_transfer),
        )
        // Middleware
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
