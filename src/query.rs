//! Filtering, pagination, search, and stats over a catalog snapshot.
//!
//! Everything here is a pure function over `Vec<Product>` taken from
//! [`ProductStore::list`](crate::store::ProductStore::list), so none of it
//! touches the lock.
//!
//! # Pagination Rules
//!
//! - `page` is 1-based and defaults to 1; values below 1 become 1.
//! - `limit` defaults to the configured page size; values below 1 become 1
//!   and values above the configured maximum become the maximum.
//! - Anything that is not an integer falls back to the default.
//! - A page past the end is empty, not an error.

use std::collections::BTreeMap;

use crate::error::{AppError, AppResult};
use crate::models::{CategoryStats, Product, ProductPage};

/// First page number.
pub const DEFAULT_PAGE: usize = 1;

/// Resolved page position for a listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: usize,
    pub limit: usize,
}

impl PageRequest {
    /// Resolve raw `page`/`limit` query values.
    ///
    /// `max_limit` must be at least 1; [`Config::validate`](crate::config::Config::validate)
    /// guarantees this for configured values.
    pub fn parse(
        raw_page: Option<&str>,
        raw_limit: Option<&str>,
        default_limit: usize,
        max_limit: usize,
    ) -> Self {
        let max_limit = max_limit.max(1);

        let page = parse_integer(raw_page)
            .map(clamp_to_positive)
            .unwrap_or(DEFAULT_PAGE);

        let limit = parse_integer(raw_limit)
            .map(clamp_to_positive)
            .unwrap_or(default_limit)
            .clamp(1, max_limit);

        Self { page, limit }
    }

    /// Index of the first item on this page.
    pub fn offset(&self) -> usize {
        self.page.saturating_sub(1).saturating_mul(self.limit)
    }
}

fn parse_integer(raw: Option<&str>) -> Option<i64> {
    raw.and_then(|v| v.trim().parse::<i64>().ok())
}

fn clamp_to_positive(value: i64) -> usize {
    usize::try_from(value.max(1)).unwrap_or(usize::MAX)
}

/// Keep products whose category equals `category`, ignoring case.
///
/// A missing or empty category keeps everything.
pub fn filter_by_category(products: Vec<Product>, category: Option<&str>) -> Vec<Product> {
    match category.filter(|c| !c.is_empty()) {
        Some(category) => {
            let wanted = category.to_lowercase();
            products
                .into_iter()
                .filter(|p| p.category.to_lowercase() == wanted)
                .collect()
        }
        None => products,
    }
}

/// Cut one page out of `products`.
pub fn paginate(products: Vec<Product>, request: PageRequest) -> ProductPage {
    let limit = request.limit.max(1);
    let total_products = products.len();
    let total_pages = total_products.div_ceil(limit);

    let page_items = products
        .into_iter()
        .skip(request.offset())
        .take(limit)
        .collect();

    ProductPage {
        current_page: request.page,
        total_pages,
        total_products,
        products: page_items,
    }
}

/// Products whose name contains `name`, ignoring case.
///
/// # Errors
///
/// - `Validation` when `name` is missing or empty
/// - `NotFound` when nothing matches
pub fn search_by_name(products: Vec<Product>, name: Option<&str>) -> AppResult<Vec<Product>> {
    let needle = match name {
        Some(name) if !name.is_empty() => name.to_lowercase(),
        _ => {
            return Err(AppError::Validation(
                "Please provide a name to search".to_string(),
            ));
        }
    };

    let results: Vec<Product> = products
        .into_iter()
        .filter(|p| p.name.to_lowercase().contains(&needle))
        .collect();

    if results.is_empty() {
        return Err(AppError::NotFound("No products found.".to_string()));
    }

    Ok(results)
}

/// Count products per category in one pass.
pub fn category_stats(products: &[Product]) -> CategoryStats {
    let mut count_by_category = BTreeMap::new();
    for product in products {
        *count_by_category
            .entry(product.category.clone())
            .or_insert(0) += 1;
    }

    CategoryStats {
        total_products: products.len(),
        count_by_category,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::indexing_slicing)]
mod tests {
    use rust_decimal::Decimal;

    use super::*;
    use crate::store::sample_products;

    fn numbered(count: usize) -> Vec<Product> {
        (1..=count)
            .map(|i| Product {
                id: i.to_string(),
                name: format!("Item {i}"),
                description: String::new(),
                price: Decimal::from(i as u64),
                category: if i % 2 == 0 { "even" } else { "odd" }.to_string(),
                in_stock: true,
            })
            .collect()
    }

    fn ids(products: &[Product]) -> Vec<&str> {
        products.iter().map(|p| p.id.as_str()).collect()
    }

    // ==========================================================================
    // PageRequest
    // ==========================================================================

    #[test]
    fn test_page_request_defaults() {
        let request = PageRequest::parse(None, None, 5, 100);
        assert_eq!(request, PageRequest { page: 1, limit: 5 });
    }

    #[test]
    fn test_page_request_non_numeric_falls_back() {
        let request = PageRequest::parse(Some("abc"), Some("ten"), 5, 100);
        assert_eq!(request, PageRequest { page: 1, limit: 5 });

        let request = PageRequest::parse(Some("2.5"), Some(""), 5, 100);
        assert_eq!(request, PageRequest { page: 1, limit: 5 });
    }

    #[test]
    fn test_page_request_clamps_low_values() {
        let request = PageRequest::parse(Some("0"), Some("0"), 5, 100);
        assert_eq!(request, PageRequest { page: 1, limit: 1 });

        let request = PageRequest::parse(Some("-3"), Some("-10"), 5, 100);
        assert_eq!(request, PageRequest { page: 1, limit: 1 });
    }

    #[test]
    fn test_page_request_clamps_to_max_limit() {
        let request = PageRequest::parse(Some("2"), Some("5000"), 5, 100);
        assert_eq!(request, PageRequest { page: 2, limit: 100 });
    }

    #[test]
    fn test_page_request_accepts_whitespace() {
        let request = PageRequest::parse(Some(" 3 "), Some(" 2"), 5, 100);
        assert_eq!(request, PageRequest { page: 3, limit: 2 });
    }

    #[test]
    fn test_offset_does_not_overflow() {
        let request = PageRequest {
            page: usize::MAX,
            limit: 100,
        };
        assert_eq!(request.offset(), usize::MAX);
    }

    // ==========================================================================
    // Pagination
    // ==========================================================================

    #[test]
    fn test_paginate_first_page() {
        let page = paginate(numbered(12), PageRequest { page: 1, limit: 5 });

        assert_eq!(page.current_page, 1);
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.total_products, 12);
        assert_eq!(ids(&page.products), vec!["1", "2", "3", "4", "5"]);
    }

    #[test]
    fn test_paginate_last_partial_page() {
        let page = paginate(numbered(12), PageRequest { page: 3, limit: 5 });
        assert_eq!(ids(&page.products), vec!["11", "12"]);
    }

    #[test]
    fn test_paginate_past_end_is_empty() {
        let page = paginate(numbered(3), PageRequest { page: 9, limit: 5 });

        assert!(page.products.is_empty());
        assert_eq!(page.current_page, 9);
        assert_eq!(page.total_pages, 1);
    }

    #[test]
    fn test_paginate_empty_catalog() {
        let page = paginate(Vec::new(), PageRequest { page: 1, limit: 5 });

        assert_eq!(page.total_pages, 0);
        assert_eq!(page.total_products, 0);
    }

    #[test]
    fn test_paginate_count_and_total_pages_property() {
        for total in 0..20 {
            for limit in 1..7 {
                for page_no in 1..6 {
                    let page = paginate(
                        numbered(total),
                        PageRequest {
                            page: page_no,
                            limit,
                        },
                    );
                    assert!(page.products.len() <= limit);
                    assert_eq!(page.total_pages, total.div_ceil(limit));
                }
            }
        }
    }

    // ==========================================================================
    // Category filter
    // ==========================================================================

    #[test]
    fn test_filter_is_case_insensitive() {
        let lower = filter_by_category(sample_products(), Some("electronics"));
        let mixed = filter_by_category(sample_products(), Some("Electronics"));

        assert_eq!(ids(&lower), vec!["1", "2"]);
        assert_eq!(lower, mixed);
    }

    #[test]
    fn test_filter_requires_exact_match() {
        let result = filter_by_category(sample_products(), Some("electro"));
        assert!(result.is_empty());
    }

    #[test]
    fn test_filter_missing_or_empty_keeps_all() {
        assert_eq!(filter_by_category(sample_products(), None).len(), 3);
        assert_eq!(filter_by_category(sample_products(), Some("")).len(), 3);
    }

    // ==========================================================================
    // Search
    // ==========================================================================

    #[test]
    fn test_search_missing_name() {
        let err = search_by_name(sample_products(), None).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));

        let err = search_by_name(sample_products(), Some("")).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[test]
    fn test_search_no_matches() {
        let err = search_by_name(sample_products(), Some("tractor")).unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
        assert_eq!(err.to_string(), "No products found.");
    }

    #[test]
    fn test_search_substring_case_insensitive() {
        let results = search_by_name(sample_products(), Some("COFFEE")).unwrap();
        assert_eq!(ids(&results), vec!["3"]);

        let results = search_by_name(sample_products(), Some("A")).unwrap();
        assert_eq!(ids(&results), vec!["1", "2", "3"]);
        assert!(
            results
                .iter()
                .all(|p| p.name.to_lowercase().contains('a'))
        );
    }

    // ==========================================================================
    // Stats
    // ==========================================================================

    #[test]
    fn test_category_stats() {
        let stats = category_stats(&sample_products());

        assert_eq!(stats.total_products, 3);
        assert_eq!(stats.count_by_category["electronics"], 2);
        assert_eq!(stats.count_by_category["kitchen"], 1);
    }

    #[test]
    fn test_category_stats_empty() {
        let stats = category_stats(&[]);
        assert_eq!(stats.total_products, 0);
        assert!(stats.count_by_category.is_empty());
    }
}
