//! # Product API
//!
//! A small REST service over an in-memory product catalog, built on Axum:
//!
//! - **Catalog**: list with category filter and pagination, name search,
//!   per-category stats, create/read/update/delete
//! - **Security**: shared-secret API key on write routes, input validation
//! - **Observability**: request IDs, structured logging, Prometheus metrics
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      Axum HTTP Server                       │
//! ├─────────────────────────────────────────────────────────────┤
//! │  Middleware (Panic → Request ID → Trace → CORS → Auth)      │
//! ├─────────────────────────────────────────────────────────────┤
//! │  Extractors (ValidatedProduct)                              │
//! ├─────────────────────────────────────────────────────────────┤
//! │  Handlers (health, products)                                │
//! ├─────────────────────────────────────────────────────────────┤
//! │  Query (filter, paginate, search, stats)                    │
//! ├─────────────────────────────────────────────────────────────┤
//! │  ProductStore (Arc<RwLock<Vec<Product>>>)                   │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use product_api::{AppState, Config, ProductStore, build_router};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::from_env()?;
//!     let state = AppState::new(ProductStore::with_sample_data(), config.clone());
//!     let app = build_router(state);
//!
//!     let listener = tokio::net::TcpListener::bind(config.server_addr()).await?;
//!     axum::serve(listener, app).await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Security Configuration
//!
//! Writes are rejected until a key is configured:
//! ```bash
//! API_KEY=your-secret-key cargo run
//! ```

pub mod config;
pub mod error;
pub mod handlers;
pub mod metrics;
pub mod middleware;
pub mod models;
pub mod query;
pub mod routes;
pub mod state;
pub mod store;
pub mod utils;
pub mod validation;

// Re-exports for convenience
pub use config::Config;
pub use error::{AppError, AppResult};
pub use routes::build_router;
pub use state::AppState;
pub use store::ProductStore;
