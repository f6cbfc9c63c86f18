//! # Catalog Store
//!
//! The persistence collaborator the query compiler hands plans to.
//! Records come back as JSON objects keyed by camelCase field names.

pub mod errors;
pub mod memory;
pub mod model;

pub use errors::{StoreError, StoreResult};
pub use memory::MemoryStore;
pub use model::{CatalogSeed, Category, Product, Swiper, Tag};

use async_trait::async_trait;
use serde_json::Value;

use crate::query::{CategoryLookup, Projection, QueryPlan, Relations};

/// Store operations used by the HTTP layer
#[async_trait]
pub trait CatalogStore: CategoryLookup {
    /// Products matching `plan`, ordered, paginated and projected
    async fn find_products(&self, plan: &QueryPlan) -> StoreResult<Vec<Value>>;

    /// Number of products matching `plan`; pagination is ignored
    async fn count_products(&self, plan: &QueryPlan) -> StoreResult<usize>;

    /// One product with the requested relations attached
    async fn find_product(&self, id: i64, relations: &Relations) -> StoreResult<Option<Value>>;

    /// Banners, ordered, paginated and projected
    async fn find_swipers(&self, plan: &QueryPlan) -> StoreResult<Vec<Value>>;

    /// One banner, optionally projected
    async fn find_swiper(
        &self,
        id: i64,
        projection: Option<&Projection>,
    ) -> StoreResult<Option<Value>>;
}
