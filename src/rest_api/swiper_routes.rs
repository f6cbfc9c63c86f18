//! Swiper (banner) HTTP Routes

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use serde_json::Value;

use crate::query::{FieldSelector, RawParams, SWIPER};
use crate::store::CatalogStore;

use super::errors::{RestError, RestResult};
use super::request::{compile_plan, parse_id, QueryPairs};
use super::response::{ListResponse, SingleResponse};

pub fn swiper_routes<S: CatalogStore + 'static>(store: Arc<S>) -> Router {
    Router::new()
        .route("/", get(list_swipers_handler::<S>))
        .route("/:id", get(get_swiper_handler::<S>))
        .with_state(store)
}

async fn list_swipers_handler<S: CatalogStore + 'static>(
    State(store): State<Arc<S>>,
    Query(query): Query<QueryPairs>,
) -> RestResult<Json<ListResponse<Value>>> {
    let plan = compile_plan(store.as_ref(), SWIPER, query).await?;
    let data = store.find_swipers(&plan).await?;
    Ok(Json(ListResponse::new(data)))
}

async fn get_swiper_handler<S: CatalogStore + 'static>(
    State(store): State<Arc<S>>,
    Path(id): Path<String>,
    Query(query): Query<QueryPairs>,
) -> RestResult<Json<SingleResponse<Value>>> {
    let id = parse_id(&id)?;

    let params = RawParams::from_pairs(query);
    let projection = params
        .list("select")
        .map(|raw| FieldSelector::new(SWIPER.scalar_fields).compile(&raw))
        .filter(|projection| !projection.is_empty());

    let swiper = store
        .find_swiper(id, projection.as_ref())
        .await?
        .ok_or_else(|| RestError::NotFound("swiper".to_string()))?;

    Ok(Json(SingleResponse::new(swiper)))
}
