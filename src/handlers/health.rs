//! Welcome and health endpoints.
//!
//! # Endpoints
//!
//! - `GET /` - Plain-text pointer to the product routes
//! - `GET /health` - Liveness with catalog size and uptime

use axum::Json;
use axum::extract::State;
use chrono::Utc;
use tracing::instrument;

use crate::models::HealthResponse;
use crate::state::AppState;

/// Body of `GET /`.
pub const WELCOME_MESSAGE: &str =
    "Welcome to the Product API! Go to /api/products to see all products.";

/// Root endpoint.
pub async fn index() -> &'static str {
    WELCOME_MESSAGE
}

/// Health check endpoint.
///
/// Always returns 200 OK; the in-memory store has no external dependency
/// that could degrade.
///
/// # Response Body
///
/// ```json
/// {
///   "status": "healthy",
///   "version": "0.1.0",
///   "productsCount": 3,
///   "uptimeSeconds": 42,
///   "timestamp": "2024-01-15T10:30:00Z"
/// }
/// ```
#[instrument(skip(state))]
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        products_count: state.store.len().await,
        uptime_seconds: state.uptime_seconds(),
        timestamp: Utc::now(),
    })
}
