use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::Product;

/// Raw `key=value` pairs of a query string, in request order.
pub type QueryPairs = Vec<(String, String)>;

/// Query parameters for `GET /api/products`.
///
/// Kept as raw strings: invalid numbers fall back to defaults instead of
/// rejecting the request. A repeated key keeps its first value.
#[derive(Debug, Default, PartialEq)]
pub struct ListProductsQuery {
    pub category: Option<String>,
    pub page: Option<String>,
    pub limit: Option<String>,
}

impl ListProductsQuery {
    pub fn from_pairs(pairs: &[(String, String)]) -> Self {
        Self {
            category: first_value(pairs, "category"),
            page: first_value(pairs, "page"),
            limit: first_value(pairs, "limit"),
        }
    }
}

/// Query parameters for `GET /api/products/search`.
///
/// A repeated `name` keeps its first value.
#[derive(Debug, Default, PartialEq)]
pub struct SearchQuery {
    pub name: Option<String>,
}

impl SearchQuery {
    pub fn from_pairs(pairs: &[(String, String)]) -> Self {
        Self {
            name: first_value(pairs, "name"),
        }
    }
}

fn first_value(pairs: &[(String, String)], key: &str) -> Option<String> {
    pairs
        .iter()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.clone())
}

/// One page of the (optionally filtered) catalog.
#[derive(Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProductPage {
    pub current_page: usize,
    pub total_pages: usize,
    pub total_products: usize,
    pub products: Vec<Product>,
}

/// Name search results.
#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub results: Vec<Product>,
}

/// Product counts per category.
#[derive(Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CategoryStats {
    pub total_products: usize,
    /// Ordered by category name
    pub count_by_category: BTreeMap<String, usize>,
}

#[derive(Debug, Serialize)]
pub struct UpdateResponse {
    pub message: String,
    pub product: Product,
}

#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub message: String,
    pub deleted: Product,
}

/// Health check response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    /// Service health status
    pub status: String,
    /// Service version
    pub version: String,
    /// Number of products currently stored
    pub products_count: usize,
    /// Uptime in seconds
    pub uptime_seconds: u64,
    /// Current timestamp
    pub timestamp: DateTime<Utc>,
}
