//! # Request Helpers
//!
//! Glue between axum extractors and the query compiler.

use crate::query::{
    CategoryLookup, CompileError, EntityProfile, FilterCompiler, QueryPlan, RawParams,
};

use super::errors::RestResult;

/// Decoded query-string pairs, repeated keys kept in order
pub type QueryPairs = Vec<(String, String)>;

/// Compile request pairs for `profile`
pub async fn compile_plan<L>(
    lookup: &L,
    profile: EntityProfile,
    pairs: QueryPairs,
) -> RestResult<QueryPlan>
where
    L: CategoryLookup + ?Sized,
{
    let params = RawParams::from_pairs(pairs);
    let plan = FilterCompiler::new(profile, lookup).compile(&params).await?;
    Ok(plan)
}

/// Parse a numeric path identifier
pub fn parse_id(raw: &str) -> RestResult<i64> {
    raw.trim()
        .parse()
        .map_err(|_| CompileError::InvalidIdentifier(raw.to_string()).into())
}
