//! # REST API
//!
//! HTTP surface of the catalog: query strings are compiled into a
//! [`QueryPlan`](crate::query::QueryPlan) and executed against a
//! [`CatalogStore`](crate::store::CatalogStore).

pub mod errors;
pub mod product_routes;
pub mod request;
pub mod response;
pub mod server;
pub mod swiper_routes;

pub use errors::{ErrorBody, ErrorResponse, RestError, RestResult};
pub use product_routes::product_routes;
pub use request::{compile_plan, parse_id, QueryPairs};
pub use response::{CountResponse, ListResponse, SingleResponse};
pub use server::{build_router, CatalogServer, HealthResponse};
pub use swiper_routes::swiper_routes;
