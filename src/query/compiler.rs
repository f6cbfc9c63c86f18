//! # Filter Compiler
//!
//! Orchestrates the individual compilers into one [`QueryPlan`].
//!
//! Order of work:
//! 1. `include` is validated strictly before `select` is honoured
//! 2. `order_by`, `offset`, `limit`
//! 3. `price`, `stock`, `search`/`q`
//! 4. `category`, the only step that touches the store
//!
//! The first failure is returned; nothing is accumulated.

use tracing::debug;

use super::category::{CategoryLookup, CategoryResolver};
use super::errors::CompileResult;
use super::include::RelationIncluder;
use super::order::OrderCompiler;
use super::params::RawParams;
use super::plan::{Projection, QueryPlan, Relations};
use super::profile::EntityProfile;
use super::range::{RangeCompiler, RangePredicate};
use super::selector::FieldSelector;

pub const SELECT: &str = "select";
pub const INCLUDE: &str = "include";
pub const ORDER_BY: &str = "order_by";
pub const OFFSET: &str = "offset";
pub const LIMIT: &str = "limit";
pub const PRICE: &str = "price";
pub const STOCK: &str = "stock";
pub const CATEGORY: &str = "category";
pub const SEARCH: &str = "search";
pub const SEARCH_ALIAS: &str = "q";

/// Compiles raw request parameters for one entity
pub struct FilterCompiler<'a, L: CategoryLookup + ?Sized> {
    profile: EntityProfile,
    lookup: &'a L,
}

impl<'a, L: CategoryLookup + ?Sized> FilterCompiler<'a, L> {
    pub fn new(profile: EntityProfile, lookup: &'a L) -> Self {
        Self { profile, lookup }
    }

    pub fn profile(&self) -> &EntityProfile {
        &self.profile
    }

    /// Compile `params` into a plan, or the first error found
    pub async fn compile(&self, params: &RawParams) -> CompileResult<QueryPlan> {
        let (projection, relations) = self.compile_projection(params)?;

        let mut plan = QueryPlan {
            projection,
            relations,
            ..Default::default()
        };

        if let Some(raw) = params.list(ORDER_BY) {
            plan.order = OrderCompiler::compile(&raw)?;
        }
        plan.offset = parse_count(params, OFFSET);
        plan.limit = parse_count(params, LIMIT);

        if self.profile.filterable {
            plan.price_range = compile_range(RangeCompiler::price(), params.terms(PRICE))?;
            plan.stock_range = compile_range(RangeCompiler::stock(), params.terms(STOCK))?;
            plan.search_term = params
                .text(SEARCH)
                .or_else(|| params.text(SEARCH_ALIAS))
                .map(str::to_string);

            if let Some(name) = params.text(CATEGORY) {
                let id = CategoryResolver::new(self.lookup).resolve(name).await?;
                plan.category_id = Some(id);
            }
        }

        debug!(entity = self.profile.name, plan = ?plan, "compiled query plan");
        Ok(plan)
    }

    /// Merge `select` and `include` into a projection.
    ///
    /// - only `select`: the selected scalars
    /// - only `include`: every scalar plus the relations
    /// - both: the union, relations written last
    fn compile_projection(
        &self,
        params: &RawParams,
    ) -> CompileResult<(Option<Projection>, Option<Relations>)> {
        let relations = match params.list(INCLUDE) {
            Some(raw) => RelationIncluder::new(self.profile.relations).compile(&raw)?,
            None => Relations::new(),
        };
        let selected = params
            .list(SELECT)
            .map(|raw| FieldSelector::new(self.profile.scalar_fields).compile(&raw));

        if selected.is_none() && relations.is_empty() {
            return Ok((None, None));
        }

        let mut projection = selected.unwrap_or_else(|| self.profile.all_scalars());
        projection.extend(relations.iter().map(|(k, v)| (k.clone(), *v)));

        let projection = (!projection.is_empty()).then_some(projection);
        let relations = (!relations.is_empty()).then_some(relations);
        Ok((projection, relations))
    }
}

fn compile_range(
    compiler: RangeCompiler,
    terms: Vec<&str>,
) -> CompileResult<Option<RangePredicate>> {
    if terms.is_empty() {
        return Ok(None);
    }
    compiler.compile(&terms).map(Some)
}

/// Non-negative integer, or unset when the value does not parse
fn parse_count(params: &RawParams, key: &str) -> Option<usize> {
    let raw = params.text(key)?;
    match raw.parse::<usize>() {
        Ok(count) => Some(count),
        Err(_) => {
            debug!(param = key, value = raw, "ignoring non-numeric pagination value");
            None
        }
    }
}
