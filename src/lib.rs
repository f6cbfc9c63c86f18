//! catalogd - product catalog query service
//!
//! Compiles untyped query-string parameters into validated query plans
//! and serves them over HTTP against an in-memory catalog store.

pub mod cli;
pub mod config;
pub mod query;
pub mod rest_api;
pub mod store;
