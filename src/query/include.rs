//! # Relation Inclusion
//!
//! Strict counterpart of [`FieldSelector`](super::FieldSelector): one
//! relation outside the allowed set rejects the whole request.

use super::errors::{CompileError, CompileResult};
use super::plan::Relations;
use super::profile::PRODUCT_RELATIONS;
use super::selector::{whitelist, WhitelistMode};

/// Strict inclusion compiler for `include`
#[derive(Debug, Clone, Copy)]
pub struct RelationIncluder<'a> {
    allowed: &'a [&'a str],
}

impl Default for RelationIncluder<'static> {
    fn default() -> Self {
        Self::new(PRODUCT_RELATIONS)
    }
}

impl<'a> RelationIncluder<'a> {
    pub fn new(allowed: &'a [&'a str]) -> Self {
        Self { allowed }
    }

    /// Compile a relation list, rejecting any unknown relation
    pub fn compile(&self, raw: &str) -> CompileResult<Relations> {
        whitelist(raw, self.allowed, WhitelistMode::Strict).map_err(CompileError::InvalidInclude)
    }
}
