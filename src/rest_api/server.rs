//! # Catalog Server
//!
//! Combines the entity routers under `/api/v1` with a root `/health`.

use std::io;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::{http::StatusCode, response::IntoResponse, routing::get, Json, Router};
use serde::Serialize;
use tokio::net::TcpListener;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::config::ServiceConfig;
use crate::store::CatalogStore;

use super::product_routes::product_routes;
use super::swiper_routes::swiper_routes;

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// HTTP server for the catalog API
pub struct CatalogServer {
    config: ServiceConfig,
    router: Router,
}

impl CatalogServer {
    /// Create a server backed by `store`
    pub fn with_store<S: CatalogStore + 'static>(config: ServiceConfig, store: Arc<S>) -> Self {
        let router = build_router(&config, store);
        Self { config, router }
    }

    /// Get the socket address
    pub fn socket_addr(&self) -> String {
        self.config.socket_addr()
    }

    /// Get the router (for testing)
    pub fn router(self) -> Router {
        self.router
    }

    /// Bind and serve until the listener fails
    pub async fn start(self) -> Result<(), io::Error> {
        let addr: SocketAddr = self
            .config
            .socket_addr()
            .parse()
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;

        let listener = TcpListener::bind(addr).await?;
        info!(%addr, "catalog server listening");
        info!("products: http://{}/api/v1/products", addr);
        info!("swipers: http://{}/api/v1/swipers", addr);

        axum::serve(listener, self.router).await?;
        Ok(())
    }
}

/// Build the combined router for `store`
pub fn build_router<S: CatalogStore + 'static>(config: &ServiceConfig, store: Arc<S>) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .nest("/api/v1/products", product_routes(store.clone()))
        .nest("/api/v1/swipers", swiper_routes(store))
        .layer(cors_layer(&config.cors_origins))
        .layer(TraceLayer::new_for_http())
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    // No configured origins means any origin
    if origins.is_empty() {
        return CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);
    }

    let origins: Vec<_> = origins.iter().filter_map(|s| s.parse().ok()).collect();
    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(Any)
        .allow_headers(Any)
}

async fn health_handler() -> impl IntoResponse {
    let response = HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    };

    (StatusCode::OK, Json(response))
}
