//! Application configuration loaded from environment variables.
//!
//! All configuration is loaded from environment variables with sensible defaults
//! for development. In production, configure via environment variables or a `.env` file.
//!
//! # Security Configuration
//!
//! - `API_KEY`: Shared secret required in the `x-api-key` header for write routes.
//!   When unset, every write request is rejected.
//! - `CORS_ALLOWED_ORIGINS`: Comma-separated list of allowed origins (default: `*` for dev)
//!
//! # Listing
//!
//! - `DEFAULT_PAGE_LIMIT`: Page size when the client sends no `limit` (default: 5)
//! - `MAX_PAGE_LIMIT`: Upper clamp for client-supplied `limit` (default: 100)

use std::env;

use tracing_subscriber::EnvFilter;

use crate::error::{AppError, AppResult};

/// Log filter used when `RUST_LOG` is unset or invalid.
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Application configuration loaded from environment variables.
///
/// # Example
///
/// ```rust,ignore
/// let config = Config::from_env()?;
/// println!("Server will listen on {}", config.server_addr());
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    // =========================================================================
    // Server Configuration
    // =========================================================================
    /// Server host address (default: "0.0.0.0")
    pub host: String,

    /// Server port (default: 3000)
    pub port: u16,

    /// Maximum request body size in bytes (default: 1MB)
    pub max_request_body_size: usize,

    // =========================================================================
    // Catalog Configuration
    // =========================================================================
    /// Page size used when the `limit` query parameter is absent or invalid
    pub default_page_limit: usize,

    /// Largest page size a client may request
    pub max_page_limit: usize,

    /// Start with the built-in sample products (default: true)
    pub seed_sample_data: bool,

    // =========================================================================
    // Security Configuration
    // =========================================================================
    /// Shared secret for POST/PUT/DELETE, passed via the `x-api-key` header
    pub api_key: Option<String>,

    /// Allowed CORS origins, "*" allows any
    pub cors_allowed_origins: Vec<String>,

    // =========================================================================
    // Observability Configuration
    // =========================================================================
    /// Log level (e.g., "info", "debug", "trace")
    pub log_level: String,

    /// Port for Prometheus metrics endpoint (default: 9090, 0 = disabled)
    pub metrics_port: u16,
}

impl Config {
    /// Load configuration from environment variables with sensible defaults.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if any value cannot be parsed or the
    /// resulting configuration is inconsistent.
    pub fn from_env() -> AppResult<Self> {
        // Load an .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let config = Self {
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: Self::parse_env("PORT", 3000)?,
            max_request_body_size: Self::parse_env("MAX_REQUEST_BODY_SIZE", 1024 * 1024)?,

            default_page_limit: Self::parse_env("DEFAULT_PAGE_LIMIT", 5)?,
            max_page_limit: Self::parse_env("MAX_PAGE_LIMIT", 100)?,
            seed_sample_data: Self::parse_env("SEED_SAMPLE_DATA", true)?,

            api_key: env::var("API_KEY").ok().filter(|k| !k.is_empty()),
            cors_allowed_origins: Self::parse_cors_origins(),

            log_level: env::var("RUST_LOG").unwrap_or_else(|_| DEFAULT_LOG_LEVEL.to_string()),
            metrics_port: Self::parse_env("METRICS_PORT", 9090)?,
        };

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values for consistency and correctness.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if validation fails.
    pub fn validate(&self) -> AppResult<()> {
        if self.default_page_limit == 0 {
            return Err(AppError::Config(
                "DEFAULT_PAGE_LIMIT must be greater than 0".to_string(),
            ));
        }

        if self.max_page_limit == 0 {
            return Err(AppError::Config(
                "MAX_PAGE_LIMIT must be greater than 0".to_string(),
            ));
        }

        if self.default_page_limit > self.max_page_limit {
            return Err(AppError::Config(format!(
                "DEFAULT_PAGE_LIMIT ({}) must be <= MAX_PAGE_LIMIT ({})",
                self.default_page_limit, self.max_page_limit
            )));
        }

        if self.max_request_body_size == 0 {
            return Err(AppError::Config(
                "MAX_REQUEST_BODY_SIZE must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }

    /// Get the full server address for binding.
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Tracing filter built from `log_level`.
    ///
    /// An unparsable directive falls back to [`DEFAULT_LOG_LEVEL`].
    pub fn env_filter(&self) -> EnvFilter {
        EnvFilter::try_new(&self.log_level).unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_LEVEL))
    }

    /// Check if a shared secret is configured for write routes.
    pub fn auth_configured(&self) -> bool {
        self.api_key.is_some()
    }

    /// Check if Prometheus metrics export is enabled.
    pub fn metrics_enabled(&self) -> bool {
        self.metrics_port > 0
    }

    /// Get the metrics endpoint address, `None` when disabled.
    pub fn metrics_addr(&self) -> Option<std::net::SocketAddr> {
        self.metrics_enabled()
            .then(|| std::net::SocketAddr::from(([0, 0, 0, 0], self.metrics_port)))
    }

    /// Parse an environment variable into the specified type with a default value.
    fn parse_env<T>(name: &str, default: T) -> AppResult<T>
    where
        T: std::str::FromStr,
        T::Err: std::fmt::Display,
    {
        match env::var(name) {
            Ok(val) => val
                .trim()
                .parse()
                .map_err(|e| AppError::Config(format!("Invalid {name}: {e}"))),
            Err(_) => Ok(default),
        }
    }

    /// Parse CORS allowed origins from environment variable.
    fn parse_cors_origins() -> Vec<String> {
        env::var("CORS_ALLOWED_ORIGINS")
            .unwrap_or_else(|_| "*".to_string())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect()
    }
}

/// Default configuration for testing and development.
///
/// Production deployments should use `Config::from_env()` instead.
impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            max_request_body_size: 1024 * 1024,
            default_page_limit: 5,
            max_page_limit: 100,
            seed_sample_data: true,
            api_key: None,
            cors_allowed_origins: vec!["*".to_string()],
            log_level: DEFAULT_LOG_LEVEL.to_string(),
            metrics_port: 9090,
        }
    }
}
