//! CLI command implementations

use std::path::Path;
use std::sync::Arc;

use axum::extract::Query;
use axum::http::Uri;
use serde_json::Value;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::config::ServiceConfig;
use crate::query::{EntityProfile, FilterCompiler, RawParams};
use crate::rest_api::{CatalogServer, ErrorResponse, QueryPairs};
use crate::store::{CatalogSeed, MemoryStore};

use super::args::Command;
use super::errors::{CliError, CliResult};
use super::io::write_json;

/// Parse arguments and run the selected command
pub fn run() -> CliResult<()> {
    let cli = super::args::Cli::parse_args();
    run_command(cli.command)
}

/// Run the appropriate command based on CLI args
pub fn run_command(cmd: Command) -> CliResult<()> {
    match cmd {
        Command::Serve { config, port } => serve(&config, port),
        Command::Compile {
            entity,
            seed,
            query,
        } => compile(&entity, seed.as_deref(), &query),
    }
}

/// Install the JSON log subscriber on stderr.
///
/// `RUST_LOG` takes precedence over `filter`. A second call is a no-op.
pub fn init_logging(filter: &str) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    let _ = tracing_subscriber::fmt()
        .json()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Start the HTTP server and block until it stops
pub fn serve(config_path: &Path, port: Option<u16>) -> CliResult<()> {
    let mut config = ServiceConfig::load(config_path)?;
    if let Some(port) = port {
        config.port = port;
    }
    init_logging(&config.log_filter);

    let store = Arc::new(load_store(config.seed_path.as_deref())?);
    info!(config = %config_path.display(), "catalog store ready");

    let server = CatalogServer::with_store(config, store);

    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| CliError::boot_failed(format!("Failed to create tokio runtime: {}", e)))?;

    rt.block_on(async {
        server
            .start()
            .await
            .map_err(|e| CliError::boot_failed(format!("HTTP server failed: {}", e)))
    })?;

    Ok(())
}

/// Compile `query` for `entity` and print the plan or the compile error
pub fn compile(entity: &str, seed: Option<&Path>, query: &str) -> CliResult<()> {
    init_logging("warn");
    let output = compile_query(entity, seed, query)?;
    write_json(&output)
}

/// Plan (or structured error body) for one query string
pub fn compile_query(entity: &str, seed: Option<&Path>, query: &str) -> CliResult<Value> {
    let profile = EntityProfile::by_name(entity)
        .ok_or_else(|| CliError::invalid_argument(format!("unknown entity '{}'", entity)))?;
    let store = load_store(seed)?;
    let params = RawParams::from_pairs(decode_query(query)?);

    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| CliError::boot_failed(format!("Failed to create tokio runtime: {}", e)))?;
    let result = rt.block_on(FilterCompiler::new(profile, &store).compile(&params));

    let output = match result {
        Ok(plan) => serde_json::to_value(plan)?,
        Err(err) => serde_json::to_value(ErrorResponse::from(&err))?,
    };
    Ok(output)
}

fn load_store(seed: Option<&Path>) -> CliResult<MemoryStore> {
    match seed {
        Some(path) => Ok(MemoryStore::from_seed(CatalogSeed::load(path)?)),
        None => Ok(MemoryStore::new()),
    }
}

/// Decode a raw query string, with or without the leading `?`
fn decode_query(query: &str) -> CliResult<QueryPairs> {
    let query = query.trim().trim_start_matches('?');
    let uri: Uri = format!("/?{}", query)
        .parse()
        .map_err(|e| CliError::invalid_argument(format!("invalid query string: {}", e)))?;

    let Query(pairs) = Query::<QueryPairs>::try_from_uri(&uri)
        .map_err(|e| CliError::invalid_argument(format!("invalid query string: {}", e)))?;
    Ok(pairs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_decode_query_keeps_repeated_keys() {
        let pairs = decode_query("?price=gte_10&price=lte_50&search=red%20shoe").unwrap();
        assert_eq!(
            pairs,
            vec![
                ("price".to_string(), "gte_10".to_string()),
                ("price".to_string(), "lte_50".to_string()),
                ("search".to_string(), "red shoe".to_string()),
            ]
        );
    }

    #[test]
    fn test_compile_query_prints_plan() {
        let output = compile_query("product", None, "order_by=price.desc&limit=5").unwrap();
        assert_eq!(
            output["order"],
            serde_json::json!([{"field": "price", "direction": "desc"}])
        );
        assert_eq!(output["limit"], 5);
    }

    #[test]
    fn test_compile_query_prints_error_body() {
        let output = compile_query("product", None, "include=bogus").unwrap();
        assert_eq!(output["success"], false);
        assert_eq!(output["error"]["type"], "InvalidInclude");
        assert_eq!(output["error"]["status"], 400);
    }

    #[test]
    fn test_compile_query_resolves_category_from_seed() {
        let mut seed = tempfile::NamedTempFile::new().unwrap();
        seed.write_all(br#"{"categories": [{"id": 3, "name": "Shoes"}]}"#)
            .unwrap();

        let output = compile_query("product", Some(seed.path()), "category=Shoes").unwrap();
        assert_eq!(output["categoryId"], 3);

        let output = compile_query("product", None, "category=Shoes").unwrap();
        assert_eq!(output["error"]["type"], "ResourceNotFound");
    }

    #[test]
    fn test_compile_query_unknown_entity() {
        let result = compile_query("user", None, "");
        assert!(matches!(result, Err(CliError::InvalidArgument(_))));
    }
}
