mod api;
mod product;

pub use api::{
    CategoryStats, DeleteResponse, HealthResponse, ListProductsQuery, ProductPage,
    QueryPairs, SearchQuery, SearchResponse, UpdateResponse,
};
pub use product::{Product, ProductChanges, ProductDraft, ProductPayload};
