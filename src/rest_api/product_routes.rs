//! Product HTTP Routes
//!
//! - `GET /`           list, full query compiler
//! - `GET /featured`   list restricted to featured products
//! - `GET /count`      number of matching products
//! - `GET /search`     list, `q` matched against name/description/detail
//! - `GET /:id`        one product, `include=category` only

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use serde_json::Value;

use crate::query::{RawParams, RelationIncluder, Relations, PRODUCT};
use crate::store::CatalogStore;

use super::errors::{RestError, RestResult};
use super::request::{compile_plan, parse_id, QueryPairs};
use super::response::{CountResponse, ListResponse, SingleResponse};

/// Relations a single product may include
const SINGLE_PRODUCT_RELATIONS: &[&str] = &["category"];

pub fn product_routes<S: CatalogStore + 'static>(store: Arc<S>) -> Router {
    Router::new()
        .route("/", get(list_products_handler::<S>))
        .route("/featured", get(list_featured_handler::<S>))
        .route("/count", get(count_products_handler::<S>))
        .route("/search", get(search_products_handler::<S>))
        .route("/:id", get(get_product_handler::<S>))
        .with_state(store)
}

async fn list_products_handler<S: CatalogStore + 'static>(
    State(store): State<Arc<S>>,
    Query(query): Query<QueryPairs>,
) -> RestResult<Json<ListResponse<Value>>> {
    let plan = compile_plan(store.as_ref(), PRODUCT, query).await?;
    let data = store.find_products(&plan).await?;
    Ok(Json(ListResponse::new(data)))
}

async fn list_featured_handler<S: CatalogStore + 'static>(
    State(store): State<Arc<S>>,
    Query(query): Query<QueryPairs>,
) -> RestResult<Json<ListResponse<Value>>> {
    let plan = compile_plan(store.as_ref(), PRODUCT, query).await?.featured();
    let data = store.find_products(&plan).await?;
    Ok(Json(ListResponse::new(data)))
}

async fn count_products_handler<S: CatalogStore + 'static>(
    State(store): State<Arc<S>>,
    Query(query): Query<QueryPairs>,
) -> RestResult<Json<CountResponse>> {
    let plan = compile_plan(store.as_ref(), PRODUCT, query).await?;
    let count = store.count_products(&plan).await?;
    Ok(Json(CountResponse::new(count)))
}

async fn search_products_handler<S: CatalogStore + 'static>(
    State(store): State<Arc<S>>,
    Query(query): Query<QueryPairs>,
) -> RestResult<Json<ListResponse<Value>>> {
    // Same compiler; `q` is picked up as the search term
    let plan = compile_plan(store.as_ref(), PRODUCT, query).await?;
    let data = store.find_products(&plan).await?;
    Ok(Json(ListResponse::new(data)))
}

async fn get_product_handler<S: CatalogStore + 'static>(
    State(store): State<Arc<S>>,
    Path(id): Path<String>,
    Query(query): Query<QueryPairs>,
) -> RestResult<Json<SingleResponse<Value>>> {
    let id = parse_id(&id)?;

    let params = RawParams::from_pairs(query);
    let relations = match params.list("include") {
        Some(raw) => RelationIncluder::new(SINGLE_PRODUCT_RELATIONS).compile(&raw)?,
        None => Relations::new(),
    };

    let product = store
        .find_product(id, &relations)
        .await?
        .ok_or_else(|| RestError::NotFound("product".to_string()))?;

    Ok(Json(SingleResponse::new(product)))
}
