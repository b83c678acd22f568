//! Prometheus metrics for application observability.
//!
//! Metrics are exposed via a dedicated HTTP listener when `METRICS_PORT` is
//! non-zero. Recording functions are no-ops until [`init_metrics`] installs
//! the exporter, so handlers and tests can call them unconditionally.
//!
//! # Available Metrics
//!
//! ## Counters
//! - `product_api_products_created_total`
//! - `product_api_products_updated_total`
//! - `product_api_products_deleted_total`
//! - `product_api_auth_failures_total` (label: reason)
//!
//! ## Histograms
//! - `product_api_request_duration_seconds` (label: status)
//!
//! ## Gauges
//! - `product_api_products` - Products currently in the store

use metrics::{counter, describe_counter, describe_gauge, describe_histogram, gauge, histogram};
use metrics_exporter_prometheus::PrometheusBuilder;
use std::net::SocketAddr;
use tracing::{error, info};

/// Metric names as constants for consistency.
pub mod names {
    pub const PRODUCTS_CREATED_TOTAL: &str = "product_api_products_created_total";
    pub const PRODUCTS_UPDATED_TOTAL: &str = "product_api_products_updated_total";
    pub const PRODUCTS_DELETED_TOTAL: &str = "product_api_products_deleted_total";
    pub const AUTH_FAILURES_TOTAL: &str = "product_api_auth_failures_total";
    pub const REQUEST_DURATION_SECONDS: &str = "product_api_request_duration_seconds";
    pub const PRODUCTS: &str = "product_api_products";
}

/// Initialize the Prometheus metrics exporter on `metrics_addr`.
pub fn init_metrics(metrics_addr: SocketAddr) -> Result<(), String> {
    PrometheusBuilder::new()
        .with_http_listener(metrics_addr)
        .install()
        .map_err(|e| format!("Failed to install Prometheus exporter: {e}"))?;

    describe_counter!(
        names::PRODUCTS_CREATED_TOTAL,
        "Total number of products created"
    );
    describe_counter!(
        names::PRODUCTS_UPDATED_TOTAL,
        "Total number of products updated"
    );
    describe_counter!(
        names::PRODUCTS_DELETED_TOTAL,
        "Total number of products deleted"
    );
    describe_counter!(
        names::AUTH_FAILURES_TOTAL,
        "Total number of rejected write requests"
    );
    describe_histogram!(
        names::REQUEST_DURATION_SECONDS,
        "HTTP request duration in seconds"
    );
    describe_gauge!(names::PRODUCTS, "Number of products in the store");

    info!(addr = %metrics_addr, "Prometheus metrics endpoint started");
    Ok(())
}

/// Try to initialize metrics, logging any errors but not failing.
pub fn try_init_metrics(metrics_addr: SocketAddr) {
    if let Err(e) = init_metrics(metrics_addr) {
        error!(error = %e, "Failed to initialize metrics, continuing without metrics");
    }
}

pub fn record_product_created() {
    counter!(names::PRODUCTS_CREATED_TOTAL).increment(1);
}

pub fn record_product_updated() {
    counter!(names::PRODUCTS_UPDATED_TOTAL).increment(1);
}

pub fn record_product_deleted() {
    counter!(names::PRODUCTS_DELETED_TOTAL).increment(1);
}

/// Record a rejected write (`reason` is "missing" or "invalid").
pub fn record_auth_failure(reason: &'static str) {
    counter!(names::AUTH_FAILURES_TOTAL, "reason" => reason).increment(1);
}

/// Record HTTP request duration.
pub fn record_request_duration(status: u16, duration_secs: f64) {
    histogram!(names::REQUEST_DURATION_SECONDS, "status" => status.to_string())
        .record(duration_secs);
}

/// Update the store size gauge.
pub fn set_product_count(count: usize) {
    gauge!(names::PRODUCTS).set(count as f64);
}
