//! # In-Memory Catalog Store
//!
//! Executes a [`QueryPlan`] against records held in memory.
//!
//! Execution order for lists:
//! 1. filter (featured, price, stock, category, search)
//! 2. attach requested relations
//! 3. stable multi-key sort
//! 4. skip/take
//! 5. project

use std::cmp::Ordering;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;
use serde_json::{Map, Value};
use tracing::debug;

use crate::query::{
    CategoryLookup, Direction, OrderToken, Projection, QueryPlan, Relations, PRODUCT,
};

use super::errors::{StoreError, StoreResult};
use super::model::{CatalogSeed, Category, Product, Swiper, Tag};
use super::CatalogStore;

/// Catalog contents
#[derive(Debug, Default)]
struct CatalogData {
    categories: Vec<Category>,
    tags: Vec<Tag>,
    products: Vec<Product>,
    swipers: Vec<Swiper>,
}

/// In-memory store behind a read/write lock
#[derive(Debug, Default)]
pub struct MemoryStore {
    data: RwLock<CatalogData>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store holding the seed's records
    pub fn from_seed(seed: CatalogSeed) -> Self {
        Self {
            data: RwLock::new(CatalogData {
                categories: seed.categories,
                tags: seed.tags,
                products: seed.products,
                swipers: seed.swipers,
            }),
        }
    }

    fn read(&self) -> StoreResult<RwLockReadGuard<'_, CatalogData>> {
        self.data.read().map_err(|_| StoreError::LockPoisoned)
    }

    fn write(&self) -> StoreResult<RwLockWriteGuard<'_, CatalogData>> {
        self.data.write().map_err(|_| StoreError::LockPoisoned)
    }

    pub fn insert_category(&self, category: Category) -> StoreResult<()> {
        self.write()?.categories.push(category);
        Ok(())
    }

    pub fn insert_tag(&self, tag: Tag) -> StoreResult<()> {
        self.write()?.tags.push(tag);
        Ok(())
    }

    pub fn insert_product(&self, product: Product) -> StoreResult<()> {
        self.write()?.products.push(product);
        Ok(())
    }

    pub fn insert_swiper(&self, swiper: Swiper) -> StoreResult<()> {
        self.write()?.swipers.push(swiper);
        Ok(())
    }

    fn category_by_name(&self, name: &str) -> StoreResult<Option<Category>> {
        let data = self.read()?;
        Ok(data.categories.iter().find(|c| c.name == name).cloned())
    }

    /// Filtered product records with relations attached, unsorted
    fn matching_products(&self, plan: &QueryPlan) -> StoreResult<Vec<Value>> {
        let data = self.read()?;
        let no_relations = Relations::new();
        let relations = plan.relations.as_ref().unwrap_or(&no_relations);

        let mut records = Vec::new();
        for product in data.products.iter().filter(|p| product_matches(plan, p)) {
            let record = data.product_record(product, relations)?;

            let text = PRODUCT
                .text_fields
                .iter()
                .map(|field| record.get(*field).and_then(Value::as_str));
            if plan.search_matches(text) {
                records.push(record);
            }
        }

        Ok(records)
    }

    fn query_products(&self, plan: &QueryPlan) -> StoreResult<Vec<Value>> {
        let mut records = self.matching_products(plan)?;
        sort_records(&mut records, &plan.order);
        let records = paginate(records, plan);
        debug!(count = records.len(), "product query executed");
        Ok(project_all(records, plan.projection.as_ref()))
    }

    fn query_product(&self, id: i64, relations: &Relations) -> StoreResult<Option<Value>> {
        let data = self.read()?;
        data.products
            .iter()
            .find(|p| p.id == id)
            .map(|p| data.product_record(p, relations))
            .transpose()
    }

    fn query_swipers(&self, plan: &QueryPlan) -> StoreResult<Vec<Value>> {
        let mut records = {
            let data = self.read()?;
            data.swipers
                .iter()
                .map(serde_json::to_value)
                .collect::<Result<Vec<_>, _>>()?
        };
        sort_records(&mut records, &plan.order);
        let records = paginate(records, plan);
        Ok(project_all(records, plan.projection.as_ref()))
    }

    fn query_swiper(&self, id: i64, projection: Option<&Projection>) -> StoreResult<Option<Value>> {
        let data = self.read()?;
        match data.swipers.iter().find(|s| s.id == id) {
            Some(swiper) => Ok(Some(project(serde_json::to_value(swiper)?, projection))),
            None => Ok(None),
        }
    }
}

impl CatalogData {
    /// Product as JSON with the requested relations attached
    fn product_record(&self, product: &Product, relations: &Relations) -> StoreResult<Value> {
        let mut record = serde_json::to_value(product)?;
        let Some(object) = record.as_object_mut() else {
            return Ok(record);
        };

        if relations.get("category").copied().unwrap_or(false) {
            let category = product
                .category_id
                .and_then(|id| self.categories.iter().find(|c| c.id == id));
            object.insert("category".to_string(), serde_json::to_value(category)?);
        }

        if relations.get("tags").copied().unwrap_or(false) {
            let tags: Vec<&Tag> = self
                .tags
                .iter()
                .filter(|t| product.tag_ids.contains(&t.id))
                .collect();
            object.insert("tags".to_string(), serde_json::to_value(tags)?);
        }

        Ok(record)
    }
}

/// Typed filters; search is applied on the encoded record
fn product_matches(plan: &QueryPlan, product: &Product) -> bool {
    if plan.featured_only && !product.featured {
        return false;
    }

    if let Some(range) = &plan.price_range {
        if !range.matches(product.price) {
            return false;
        }
    }

    if let Some(range) = &plan.stock_range {
        match product.stock {
            Some(stock) if range.matches(stock as f64) => {}
            _ => return false,
        }
    }

    match plan.category_id {
        Some(id) => product.category_id == Some(id),
        None => true,
    }
}

/// Stable sort by every order key in turn
fn sort_records(records: &mut [Value], order: &[OrderToken]) {
    if order.is_empty() {
        return;
    }

    records.sort_by(|a, b| {
        for key in order {
            let cmp = compare_json_values(a.get(&key.field), b.get(&key.field));
            let cmp = match key.direction {
                Direction::Asc => cmp,
                Direction::Desc => cmp.reverse(),
            };
            if cmp != Ordering::Equal {
                return cmp;
            }
        }
        Ordering::Equal
    });
}

/// Total order over JSON values: missing and null first, then booleans,
/// numbers, strings; arrays and objects last and mutually equal
fn compare_json_values(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    match (a, b) {
        (Some(Value::Bool(a)), Some(Value::Bool(b))) => a.cmp(b),
        (Some(Value::Number(a)), Some(Value::Number(b))) => {
            let a = a.as_f64().unwrap_or(0.0);
            let b = b.as_f64().unwrap_or(0.0);
            a.total_cmp(&b)
        }
        (Some(Value::String(a)), Some(Value::String(b))) => a.cmp(b),
        _ => type_rank(a).cmp(&type_rank(b)),
    }
}

fn type_rank(value: Option<&Value>) -> u8 {
    match value {
        None | Some(Value::Null) => 0,
        Some(Value::Bool(_)) => 1,
        Some(Value::Number(_)) => 2,
        Some(Value::String(_)) => 3,
        Some(Value::Array(_)) | Some(Value::Object(_)) => 4,
    }
}

fn paginate(records: Vec<Value>, plan: &QueryPlan) -> Vec<Value> {
    records
        .into_iter()
        .skip(plan.offset.unwrap_or(0))
        .take(plan.limit.unwrap_or(usize::MAX))
        .collect()
}

fn project_all(records: Vec<Value>, projection: Option<&Projection>) -> Vec<Value> {
    records
        .into_iter()
        .map(|record| project(record, projection))
        .collect()
}

/// Keep only the fields flagged `true`
fn project(record: Value, projection: Option<&Projection>) -> Value {
    let Some(projection) = projection else {
        return record;
    };

    match record {
        Value::Object(object) => {
            let filtered: Map<String, Value> = object
                .into_iter()
                .filter(|(key, _)| projection.get(key).copied().unwrap_or(false))
                .collect();
            Value::Object(filtered)
        }
        other => other,
    }
}

#[async_trait]
impl CategoryLookup for MemoryStore {
    async fn find_category_by_name(&self, name: &str) -> StoreResult<Option<Category>> {
        self.category_by_name(name)
    }
}

#[async_trait]
impl CatalogStore for MemoryStore {
    async fn find_products(&self, plan: &QueryPlan) -> StoreResult<Vec<Value>> {
        self.query_products(plan)
    }

    async fn count_products(&self, plan: &QueryPlan) -> StoreResult<usize> {
        Ok(self.matching_products(plan)?.len())
    }

    async fn find_product(&self, id: i64, relations: &Relations) -> StoreResult<Option<Value>> {
        self.query_product(id, relations)
    }

    async fn find_swipers(&self, plan: &QueryPlan) -> StoreResult<Vec<Value>> {
        self.query_swipers(plan)
    }

    async fn find_swiper(
        &self,
        id: i64,
        projection: Option<&Projection>,
    ) -> StoreResult<Option<Value>> {
        self.query_swiper(id, projection)
    }
}
