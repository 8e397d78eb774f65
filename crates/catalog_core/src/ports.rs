//! Storage port traits.
//!
//! The service talks to persistence exclusively through these traits so the
//! in-memory and Postgres backends are interchangeable.

use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::Result;
use crate::types::{Banner, Category, Entity, Product, ProductFilter, SubofSub, Subcategory, Unit};

/// Keyed record storage for one entity type.
///
/// Listing returns records in insertion order. Deleting a record detaches its
/// children (their reference to it becomes null) rather than removing them.
#[async_trait]
pub trait EntityStore<E: Entity>: Send + Sync {
    async fn list(&self) -> Result<Vec<E>>;

    async fn get(&self, id: Uuid) -> Result<Option<E>>;

    async fn insert(&self, entity: &E) -> Result<()>;

    /// Replace the stored record with the same uuid. Returns `false` if none exists.
    async fn update(&self, entity: &E) -> Result<bool>;

    /// Returns `false` if nothing was deleted.
    async fn delete(&self, id: Uuid) -> Result<bool>;
}

/// Product storage with the two query shapes the catalog needs.
#[async_trait]
pub trait ProductStore: EntityStore<Product> {
    /// Products whose reference column equals the filter id.
    async fn filter_products(&self, filter: ProductFilter) -> Result<Vec<Product>>;

    /// Case-insensitive substring search over product text and the names of
    /// the product's category hierarchy. `query` is non-empty.
    async fn search_products(&self, query: &str) -> Result<Vec<Product>>;
}

/// One handle per table, shared by the service.
#[derive(Clone)]
pub struct Stores {
    pub categories: Arc<dyn EntityStore<Category>>,
    pub subcategories: Arc<dyn EntityStore<Subcategory>>,
    pub sub_of_subs: Arc<dyn EntityStore<SubofSub>>,
    pub units: Arc<dyn EntityStore<Unit>>,
    pub products: Arc<dyn ProductStore>,
    pub banners: Arc<dyn EntityStore<Banner>>,
}
