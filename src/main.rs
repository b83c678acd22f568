use std::net::SocketAddr;
use std::process::ExitCode;

use tokio::net::TcpListener;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use product_api::config::DEFAULT_LOG_LEVEL;
use product_api::{AppResult, AppState, Config, ProductStore, build_router, metrics, utils};

#[tokio::main]
async fn main() -> ExitCode {
    // Configuration is read first so RUST_LOG (from the environment or .env)
    // drives the log filter; a load error is reported once logging is up.
    let config = Config::from_env();

    // Initialize logging
    let filter = config
        .as_ref()
        .map_or_else(|_| EnvFilter::new(DEFAULT_LOG_LEVEL), Config::env_filter);
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(true)
        .init();

    info!("Starting Product API v{}", env!("CARGO_PKG_VERSION"));

    match run(config).await {
        Ok(()) => ExitCode::from(exitcode::OK as u8),
        Err(exit_code) => ExitCode::from(exit_code as u8),
    }
}

/// Run the application, returning an exit code on error.
async fn run(config: AppResult<Config>) -> Result<(), exitcode::ExitCode> {
    let config = config.map_err(|e| {
        error!("{e}");
        exitcode::CONFIG
    })?;
    info!(
        host = %config.host,
        port = %config.port,
        default_page_limit = config.default_page_limit,
        max_page_limit = config.max_page_limit,
        log_level = %config.log_level,
        "Configuration loaded"
    );

    if !config.auth_configured() {
        warn!("API_KEY is not set: POST, PUT and DELETE requests will be rejected");
    }

    if let Some(metrics_addr) = config.metrics_addr() {
        metrics::try_init_metrics(metrics_addr);
    } else {
        info!("Metrics disabled (METRICS_PORT=0)");
    }

    // Build the catalog
    let store = if config.seed_sample_data {
        ProductStore::with_sample_data()
    } else {
        ProductStore::new()
    };
    let product_count = store.len().await;
    metrics::set_product_count(product_count);
    info!(products = product_count, "Product store initialized");

    // Build application state and router
    let state = AppState::new(store, config.clone());
    let app = build_router(state);

    // Start server
    let addr: SocketAddr = config.server_addr().parse().map_err(|e| {
        error!("Invalid server address: {e}");
        exitcode::CONFIG
    })?;
    let listener = TcpListener::bind(addr).await.map_err(|e| {
        error!("Failed to bind to {addr}: {e}");
        exitcode::UNAVAILABLE
    })?;

    info!("Server listening on http://{addr}");
    info!("API endpoints:");
    info!("  GET    /                      - Welcome");
    info!("  GET    /health                - Health check");
    info!("  GET    /api/products          - List products");
    info!("  GET    /api/products/search   - Search by name");
    info!("  GET    /api/products/stats    - Category stats");
    info!("  GET    /api/products/{{id}}     - Get product");
    info!("  POST   /api/products          - Create product");
    info!("  PUT    /api/products/{{id}}     - Update product");
    info!("  DELETE /api/products/{{id}}     - Delete product");

    // Start server with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(utils::shutdown_signal())
        .await
        .map_err(|e| {
            error!("Server error: {e}");
            exitcode::SOFTWARE
        })?;

    info!("Server shutdown complete");
    Ok(())
}
