//! In-memory product storage.
//!
//! [`ProductStore`] is a cheap, clonable handle over a shared, ordered list
//! of products. Every clone sees the same data, so the store lives in
//! [`AppState`](crate::state::AppState) and tests can build isolated
//! instances.
//!
//! # Thread Safety
//!
//! Mutations (`insert`, `update_fields`, `remove`) hold the single write
//! lock for their whole read-modify-write, so concurrent requests on the
//! multi-threaded runtime cannot lose updates. Reads return owned snapshots
//! and never hold the lock across an `.await`.

use std::sync::Arc;

use rust_decimal::Decimal;
use tokio::sync::RwLock;
use tracing::{debug, instrument};
use uuid::Uuid;

use crate::models::{Product, ProductChanges, ProductDraft};

/// Shared, ordered product collection.
#[derive(Debug, Clone, Default)]
pub struct ProductStore {
    products: Arc<RwLock<Vec<Product>>>,
}

impl ProductStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store holding `products` in the given order.
    pub fn with_products(products: Vec<Product>) -> Self {
        Self {
            products: Arc::new(RwLock::new(products)),
        }
    }

    /// Create a store pre-filled with [`sample_products`].
    pub fn with_sample_data() -> Self {
        Self::with_products(sample_products())
    }

    /// Snapshot of all products in insertion order.
    pub async fn list(&self) -> Vec<Product> {
        self.products.read().await.clone()
    }

    pub async fn len(&self) -> usize {
        self.products.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.products.read().await.is_empty()
    }

    /// Look up a product by id.
    pub async fn find_by_id(&self, id: &str) -> Option<Product> {
        self.products
            .read()
            .await
            .iter()
            .find(|p| p.id == id)
            .cloned()
    }

    /// Append a new product built from `draft` and return it.
    ///
    /// The id is generated while the write lock is held and is checked
    /// against every stored id, so it is unique in the store.
    #[instrument(skip(self, draft), fields(name = %draft.name))]
    pub async fn insert(&self, draft: ProductDraft) -> Product {
        let mut products = self.products.write().await;

        let id = loop {
            let candidate = Uuid::new_v4().to_string();
            if !products.iter().any(|p| p.id == candidate) {
                break candidate;
            }
        };

        let product = Product::from_draft(id, draft);
        products.push(product.clone());
        debug!(id = %product.id, total = products.len(), "Product inserted");

        product
    }

    /// Apply `changes` to the product with `id`, returning the updated record.
    ///
    /// Returns `None` when no product has that id.
    #[instrument(skip(self, changes))]
    pub async fn update_fields(&self, id: &str, changes: ProductChanges) -> Option<Product> {
        let mut products = self.products.write().await;
        let product = products.iter_mut().find(|p| p.id == id)?;

        product.apply(changes);
        debug!(id, "Product updated");

        Some(product.clone())
    }

    /// Remove the product with `id`, returning it.
    ///
    /// Returns `None` when no product has that id.
    #[instrument(skip(self))]
    pub async fn remove(&self, id: &str) -> Option<Product> {
        let mut products = self.products.write().await;
        let index = products.iter().position(|p| p.id == id)?;

        let removed = products.remove(index);
        debug!(id, remaining = products.len(), "Product removed");

        Some(removed)
    }
}

/// The catalog a fresh server starts with when seeding is enabled.
pub fn sample_products() -> Vec<Product> {
    vec![
        Product {
            id: "1".to_string(),
            name: "Laptop".to_string(),
            description: "High-performance laptop".to_string(),
            price: Decimal::from(1200),
            category: "electronics".to_string(),
            in_stock: true,
        },
        Product {
            id: "2".to_string(),
            name: "Smartphone".to_string(),
            description: "Latest model".to_string(),
            price: Decimal::from(800),
            category: "electronics".to_string(),
            in_stock: true,
        },
        Product {
            id: "3".to_string(),
            name: "Coffee Maker".to_string(),
            description: "Programmable maker".to_string(),
            price: Decimal::from(50),
            category: "kitchen".to_string(),
            in_stock: false,
        },
    ]
}
