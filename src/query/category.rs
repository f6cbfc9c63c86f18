//! # Category Resolution
//!
//! Maps a category name to its identifier through an injected lookup.
//! This is the only step of compilation that performs I/O.

use async_trait::async_trait;
use tracing::debug;

use crate::store::{Category, StoreResult};

use super::errors::{CompileError, CompileResult};

/// Lookup capability the compiler needs from the store
#[async_trait]
pub trait CategoryLookup: Send + Sync {
    /// Find a category by exact, case-sensitive name
    async fn find_category_by_name(&self, name: &str) -> StoreResult<Option<Category>>;
}

/// Resolves category names to identifiers
pub struct CategoryResolver<'a, L: CategoryLookup + ?Sized> {
    lookup: &'a L,
}

impl<'a, L: CategoryLookup + ?Sized> CategoryResolver<'a, L> {
    pub fn new(lookup: &'a L) -> Self {
        Self { lookup }
    }

    /// Resolve `name`, failing with `ResourceNotFound("category")`
    pub async fn resolve(&self, name: &str) -> CompileResult<i64> {
        match self.lookup.find_category_by_name(name).await? {
            Some(category) => {
                debug!(category = name, id = category.id, "resolved category");
                Ok(category.id)
            }
            None => Err(CompileError::not_found("category")),
        }
    }
}
