//! Catalog API Tests
//!
//! End-to-end tests through the axum router:
//! - Query strings compile into plans executed by the memory store
//! - Compile errors surface as structured 4xx bodies
//! - Product and swiper endpoints share the compiler

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use catalogd::config::ServiceConfig;
use catalogd::rest_api::build_router;
use catalogd::store::{Category, MemoryStore, Product, Swiper, Tag};
use serde_json::Value;
use tower::ServiceExt;

// =============================================================================
// Helper Functions
// =============================================================================

fn seeded_store() -> MemoryStore {
    let store = MemoryStore::new();
    store.insert_category(Category::new(3, "Shoes")).unwrap();
    store.insert_category(Category::new(4, "Bags")).unwrap();
    store.insert_tag(Tag::new(1, "sale")).unwrap();

    store
        .insert_product(
            Product::new(1, "Red Runner", 20.0)
                .with_description("Lightweight running shoe")
                .with_stock(5)
                .with_category(3)
                .with_tags(vec![1])
                .featured(),
        )
        .unwrap();
    store
        .insert_product(
            Product::new(2, "Blue Flats", 15.0)
                .with_description("Everyday flats")
                .with_stock(0)
                .with_category(3),
        )
        .unwrap();
    store
        .insert_product(
            Product::new(3, "Canvas Tote", 35.0)
                .with_detail("Red stitching")
                .with_category(4),
        )
        .unwrap();

    store
        .insert_swiper(Swiper::new(1, "Spring sale", "/banners/spring.png"))
        .unwrap();
    store
        .insert_swiper(Swiper::new(2, "New arrivals", "/banners/new.png"))
        .unwrap();
    store
}

fn app() -> Router {
    build_router(&ServiceConfig::default(), Arc::new(seeded_store()))
}

async fn get(uri: &str) -> (StatusCode, Value) {
    let response = app()
        .oneshot(Request::get(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&body).unwrap())
}

fn ids(body: &Value) -> Vec<i64> {
    body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|record| record["id"].as_i64().unwrap())
        .collect()
}

// =============================================================================
// Product List Tests
// =============================================================================

/// Price, category and search combine with AND.
#[tokio::test]
async fn test_combined_filters() {
    let (status, body) =
        get("/api/v1/products?price=gte_10&price=lte_50&category=Shoes&search=red").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["count"], 1);
    assert_eq!(body["data"][0]["name"], "Red Runner");
}

/// Search matches name, description or detail, case-insensitively.
#[tokio::test]
async fn test_search_any_text_field() {
    let (_, body) = get("/api/v1/products?search=RED&order_by=id").await;
    assert_eq!(ids(&body), vec![1, 3]);
}

/// Unfiltered request returns every product.
#[tokio::test]
async fn test_list_all() {
    let (status, body) = get("/api/v1/products").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 3);
}

/// Multi-key order with pagination.
#[tokio::test]
async fn test_order_and_pagination() {
    let (_, body) = get("/api/v1/products?order_by=price.desc&offset=1&limit=1").await;
    assert_eq!(ids(&body), vec![1]);

    let (_, body) = get("/api/v1/products?order_by=categoryId,price.desc").await;
    assert_eq!(body["count"], 3);
}

/// Non-numeric pagination falls back to the store default.
#[tokio::test]
async fn test_non_numeric_pagination_is_ignored() {
    let (status, body) = get("/api/v1/products?offset=abc&limit=xyz").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 3);
}

/// Select keeps whitelisted fields only.
#[tokio::test]
async fn test_select_projection() {
    let (_, body) = get("/api/v1/products?select=id,name,password&order_by=id").await;
    let first = body["data"][0].as_object().unwrap();

    assert_eq!(first.len(), 2);
    assert_eq!(first["id"], 1);
    assert_eq!(first["name"], "Red Runner");
}

/// Include attaches relations on top of every scalar.
#[tokio::test]
async fn test_include_relations() {
    let (_, body) = get("/api/v1/products?include=tags,category&order_by=id").await;
    let first = &body["data"][0];

    assert_eq!(first["category"]["name"], "Shoes");
    assert_eq!(first["tags"][0]["name"], "sale");
    assert_eq!(first["price"], 20.0);
}

/// Stock range excludes products without stock.
#[tokio::test]
async fn test_stock_range() {
    let (_, body) = get("/api/v1/products?stock=gt_0").await;
    assert_eq!(ids(&body), vec![1]);

    let (_, body) = get("/api/v1/products?stock=lte_10&order_by=id").await;
    assert_eq!(ids(&body), vec![1, 2]);
}

// =============================================================================
// Rejection Tests
// =============================================================================

/// Unknown relation rejects the whole request.
#[tokio::test]
async fn test_invalid_include() {
    let (status, body) = get("/api/v1/products?include=tags,bogus").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"]["status"], 400);
    assert_eq!(body["error"]["type"], "InvalidInclude");
    assert!(body["error"]["message"].as_str().unwrap().contains("bogus"));
}

/// Unknown category is a 404.
#[tokio::test]
async fn test_unknown_category() {
    let (status, body) = get("/api/v1/products?category=Hats").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["type"], "ResourceNotFound");
}

/// Every range rejection is a 400 with its own kind.
#[tokio::test]
async fn test_range_rejections() {
    let cases = [
        ("price=lt_100&price=gt_10&price=gte_5", "TooManyRangeTerms"),
        ("price=lt_100&price=lte_50", "ConflictingRangeTerms"),
        ("price=lt_abc", "InvalidRangeValue"),
        ("stock=gt_1.5", "InvalidRangeValue"),
    ];

    for (query, kind) in cases {
        let (status, body) = get(&format!("/api/v1/products?{query}")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{query}");
        assert_eq!(body["error"]["type"], kind, "{query}");
    }
}

/// Bad direction is rejected.
#[tokio::test]
async fn test_invalid_order() {
    let (status, body) = get("/api/v1/products?order_by=price.sideways").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["type"], "InvalidOrder");
}

// =============================================================================
// Product Endpoint Variants
// =============================================================================

/// Featured endpoint restricts to featured products.
#[tokio::test]
async fn test_featured() {
    let (_, body) = get("/api/v1/products/featured").await;
    assert_eq!(ids(&body), vec![1]);
}

/// Count ignores pagination.
#[tokio::test]
async fn test_count() {
    let (status, body) = get("/api/v1/products/count?category=Shoes&limit=1").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 2);
    assert!(body.get("data").is_none());
}

/// Search endpoint uses `q`.
#[tokio::test]
async fn test_search_endpoint() {
    let (_, body) = get("/api/v1/products/search?q=flats").await;
    assert_eq!(ids(&body), vec![2]);
}

/// Single product with its category.
#[tokio::test]
async fn test_get_product() {
    let (status, body) = get("/api/v1/products/1?include=category").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["name"], "Red Runner");
    assert_eq!(body["data"]["category"]["id"], 3);
    assert!(body["data"].get("tags").is_none());
}

/// Single product only accepts `include=category`.
#[tokio::test]
async fn test_get_product_rejects_tags() {
    let (status, body) = get("/api/v1/products/1?include=tags").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["type"], "InvalidInclude");
}

/// Missing and malformed identifiers.
#[tokio::test]
async fn test_get_product_errors() {
    let (status, body) = get("/api/v1/products/99").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["type"], "ResourceNotFound");

    let (status, body) = get("/api/v1/products/abc").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["type"], "InvalidIdentifier");
}

// =============================================================================
// Swiper Tests
// =============================================================================

/// Swipers share the compiler but ignore product filters.
#[tokio::test]
async fn test_list_swipers() {
    let (status, body) = get("/api/v1/swipers?select=title,price&order_by=id.desc&price=lt_x").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 2);
    assert_eq!(body["data"][0], serde_json::json!({"title": "New arrivals"}));
}

/// Swipers have no relations.
#[tokio::test]
async fn test_swiper_include_rejected() {
    let (status, body) = get("/api/v1/swipers?include=tags").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["type"], "InvalidInclude");
}

/// Single swiper with projection.
#[tokio::test]
async fn test_get_swiper() {
    let (status, body) = get("/api/v1/swipers/1?select=filePath").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["data"],
        serde_json::json!({"filePath": "/banners/spring.png"})
    );

    let (status, _) = get("/api/v1/swipers/7").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
