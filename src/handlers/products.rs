//! Product catalog endpoints.
//!
//! Reads are public. Writes reach these handlers only after the auth layer
//! accepted the `x-api-key` header, and create/update bodies arrive already
//! validated through [`ValidatedProduct`].

use axum::Json;
use axum::extract::rejection::QueryRejection;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use tracing::{info, instrument};

use crate::error::{AppError, AppResult};
use crate::metrics;
use crate::middleware::ValidatedProduct;
use crate::models::{
    CategoryStats, DeleteResponse, ListProductsQuery, Product, ProductPage, QueryPairs,
    SearchQuery, SearchResponse, UpdateResponse,
};
use crate::query::{self, PageRequest};
use crate::state::AppState;

pub const PRODUCT_UPDATED_MESSAGE: &str = "Product updated successfully";
pub const PRODUCT_DELETED_MESSAGE: &str = "Product deleted successfully";

/// List products, optionally filtered by category, one page at a time.
///
/// # Query Parameters
///
/// - `category` - Case-insensitive exact match
/// - `page` - 1-based page number (default: 1)
/// - `limit` - Page size (default: `DEFAULT_PAGE_LIMIT`, max: `MAX_PAGE_LIMIT`)
///
/// Repeated keys keep their first value.
#[instrument(skip(state))]
pub async fn list_products(
    State(state): State<AppState>,
    raw_query: Result<Query<QueryPairs>, QueryRejection>,
) -> AppResult<Json<ProductPage>> {
    let Query(pairs) = raw_query?;
    let params = ListProductsQuery::from_pairs(&pairs);

    let page = PageRequest::parse(
        params.page.as_deref(),
        params.limit.as_deref(),
        state.config.default_page_limit,
        state.config.max_page_limit,
    );

    let products = query::filter_by_category(state.store.list().await, params.category.as_deref());
    Ok(Json(query::paginate(products, page)))
}

/// Case-insensitive substring search on product names.
#[instrument(skip(state))]
pub async fn search_products(
    State(state): State<AppState>,
    raw_query: Result<Query<QueryPairs>, QueryRejection>,
) -> AppResult<Json<SearchResponse>> {
    let Query(pairs) = raw_query?;
    let params = SearchQuery::from_pairs(&pairs);

    let results = query::search_by_name(state.store.list().await, params.name.as_deref())?;
    Ok(Json(SearchResponse { results }))
}

/// Product totals per category.
#[instrument(skip(state))]
pub async fn product_stats(State(state): State<AppState>) -> Json<CategoryStats> {
    let products = state.store.list().await;
    Json(query::category_stats(&products))
}

#[instrument(skip(state))]
pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<Product>> {
    state
        .store
        .find_by_id(&id)
        .await
        .map(Json)
        .ok_or_else(AppError::product_not_found)
}

/// Create a product with a server-generated id.
///
/// Returns 201 Created with the stored record.
#[instrument(skip(state, body))]
pub async fn create_product(
    State(state): State<AppState>,
    ValidatedProduct(body): ValidatedProduct,
) -> (StatusCode, Json<Product>) {
    let product = state.store.insert(body).await;
    info!(id = %product.id, "Product created");

    metrics::record_product_created();
    metrics::set_product_count(state.store.len().await);

    (StatusCode::CREATED, Json(product))
}

/// Update a product in place.
///
/// `name`, `price` and `category` are replaced; `description` and `inStock`
/// only when the body carries them.
#[instrument(skip(state, body))]
pub async fn update_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ValidatedProduct(body): ValidatedProduct,
) -> AppResult<Json<UpdateResponse>> {
    let product = state
        .store
        .update_fields(&id, body.into())
        .await
        .ok_or_else(AppError::product_not_found)?;
    info!(id = %product.id, "Product updated");

    metrics::record_product_updated();

    Ok(Json(UpdateResponse {
        message: PRODUCT_UPDATED_MESSAGE.to_string(),
        product,
    }))
}

#[instrument(skip(state))]
pub async fn delete_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<DeleteResponse>> {
    let deleted = state
        .store
        .remove(&id)
        .await
        .ok_or_else(AppError::product_not_found)?;
    info!(id = %deleted.id, "Product deleted");

    metrics::record_product_deleted();
    metrics::set_product_count(state.store.len().await);

    Ok(Json(DeleteResponse {
        message: PRODUCT_DELETED_MESSAGE.to_string(),
        deleted,
    }))
}

/// Fallback for routes that do not exist, or do not accept the method.
pub async fn not_found() -> AppError {
    AppError::NotFound("Route not found".to_string())
}
