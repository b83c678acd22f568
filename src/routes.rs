//! Application routing configuration with middleware stack.
//!
//! # Middleware Stack (outermost first)
//!
//! ```text
//! Request
//!    │
//!    ▼
//! ┌──────────────────┐
//! │  Panic Catcher   │ ← 500 InternalServerError if a handler panics
//! └────────┬─────────┘
//!          │
//!          ▼
//! ┌──────────────────┐
//! │   Request ID     │ ← Adds X-Request-Id header
//! └────────┬─────────┘
//!          │
//!          ▼
//! ┌──────────────────┐
//! │     Tracing      │ ← HTTP request/response logging
//! └────────┬─────────┘
//!          │
//!          ▼
//! ┌──────────────────┐
//! │      CORS        │ ← Cross-origin headers
//! └────────┬─────────┘
//!          │
//!          ▼
//! ┌──────────────────┐
//! │  Authentication  │ ← 401 if invalid (writes only)
//! └────────┬─────────┘
//!          │
//!          ▼
//! ┌──────────────────┐
//! │  Body Size Limit │
//! └────────┬─────────┘
//!          │
//!          ▼
//!   Validation extractor → Handler
//! ```
//!
//! # Route Groups
//!
//! - `/`, `/health` - Welcome text and health
//! - `/api/products` - Catalog reads and writes

use std::any::Any;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{Any as AnyOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};

use crate::error::AppError;
use crate::handlers;
use crate::middleware::{ApiKeyAuth, LogRequest, LogResponse, RequestSpan, propagate_request_id};
use crate::state::AppState;

/// Build the application router with all routes and middleware configured.
///
/// # Middleware Configuration
///
/// - **Authentication**: Always installed; without `API_KEY` every write is rejected
/// - **CORS**: Configured from `cors_allowed_origins`
/// - **Body limit**: `max_request_body_size`
pub fn build_router(state: AppState) -> Router {
    let config = &state.config;

    let cors = build_cors_layer(&config.cors_allowed_origins);

    let mut router = Router::new()
        .route("/", get(handlers::index))
        .route("/health", get(handlers::health_check))
        .route(
            "/api/products",
            get(handlers::list_products).post(handlers::create_product),
        )
        // Static segments win over `{id}`
        .route("/api/products/search", get(handlers::search_products))
        .route("/api/products/stats", get(handlers::product_stats))
        .route(
            "/api/products/{id}",
            get(handlers::get_product)
                .put(handlers::update_product)
                .delete(handlers::delete_product),
        )
        .fallback(handlers::not_found)
        // A known path with an unsupported method is reported like an unknown route
        .method_not_allowed_fallback(handlers::not_found);

    // =========================================================================
    // Apply Middleware Stack (order matters - applied bottom to top)
    // =========================================================================

    // 1. Request body size limit
    info!(
        max_size_bytes = config.max_request_body_size,
        "Request body size limit configured"
    );
    router = router.layer(DefaultBodyLimit::max(config.max_request_body_size));

    // 2. Authentication for write methods
    let auth_layer = ApiKeyAuth::new(config.api_key.clone());
    if auth_layer.is_configured() {
        info!("API key authentication enabled for write routes");
    } else {
        warn!("No API_KEY set, all write routes will reject requests");
    }
    router = router.layer(auth_layer);

    // 3. CORS
    router = router.layer(cors);

    // 4. Tracing
    router = router.layer(
        TraceLayer::new_for_http()
            .make_span_with(RequestSpan)
            .on_request(LogRequest)
            .on_response(LogResponse),
    );

    // 5. Request ID
    router = router.layer(axum::middleware::from_fn(propagate_request_id));

    // 6. Panic catcher - applied last, wraps everything
    router = router.layer(CatchPanicLayer::custom(handle_panic));

    router.with_state(state)
}

/// Build CORS layer from configuration.
///
/// # Arguments
///
/// * `allowed_origins` - List of allowed origins, or `["*"]` for any origin
fn build_cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let allow_any = allowed_origins.iter().any(|o| o == "*");

    if allow_any {
        CorsLayer::new()
            .allow_origin(AnyOrigin)
            .allow_methods(AnyOrigin)
            .allow_headers(AnyOrigin)
    } else {
        let origins: Vec<_> = allowed_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();

        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(AnyOrigin)
            .allow_headers(AnyOrigin)
    }
}

/// Map a caught panic to the generic 500 body.
fn handle_panic(payload: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else {
        "unknown panic payload".to_string()
    };

    error!(panic = %detail, "Handler panicked");
    AppError::Internal(format!("panic: {detail}")).into_response()
}
