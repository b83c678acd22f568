//! Shared application state for Axum handlers.
//!
//! Cloned for every request. The store is an `Arc` around its lock and the
//! configuration is read-only after startup, so clones are cheap and safe to
//! share across worker threads.

use std::sync::Arc;
use std::time::Instant;

use crate::config::Config;
use crate::store::ProductStore;

/// Shared application state for Axum handlers.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Product catalog
    pub store: ProductStore,
    /// Application configuration
    pub config: Arc<Config>,
    /// Timestamp when the application started
    pub started_at: Instant,
}

impl AppState {
    pub fn new(store: ProductStore, config: Config) -> Self {
        Self {
            store,
            config: Arc::new(config),
            started_at: Instant::now(),
        }
    }

    /// Get the application uptime in seconds.
    pub fn uptime_seconds(&self) -> u64 {
        self.started_at.elapsed().as_secs()
    }
}
