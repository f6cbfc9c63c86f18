//! # Field Selection
//!
//! Turns a comma-separated field list into a projection restricted to a
//! whitelist. Two validation modes exist: [`WhitelistMode::Permissive`]
//! drops unknown tokens, [`WhitelistMode::Strict`] rejects the first one.

use tracing::debug;

use super::plan::Projection;

/// How a whitelist treats tokens outside the allowed set
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WhitelistMode {
    /// Unknown tokens are dropped
    Permissive,
    /// Unknown tokens reject the whole list
    Strict,
}

/// Split a comma list into trimmed, non-empty tokens
pub(crate) fn split_list(raw: &str) -> impl Iterator<Item = &str> {
    raw.split(',').map(str::trim).filter(|token| !token.is_empty())
}

/// Map every allowed token to `true`.
///
/// In strict mode the first unknown token is returned as the error.
pub(crate) fn whitelist(
    raw: &str,
    allowed: &[&str],
    mode: WhitelistMode,
) -> Result<Projection, String> {
    let mut selected = Projection::new();

    for token in split_list(raw) {
        if allowed.contains(&token) {
            selected.insert(token.to_string(), true);
            continue;
        }

        match mode {
            WhitelistMode::Strict => return Err(token.to_string()),
            WhitelistMode::Permissive => debug!(field = token, "dropping unknown field"),
        }
    }

    Ok(selected)
}

/// Permissive projection compiler for `select`
#[derive(Debug, Clone, Copy)]
pub struct FieldSelector<'a> {
    allowed: &'a [&'a str],
}

impl<'a> FieldSelector<'a> {
    pub fn new(allowed: &'a [&'a str]) -> Self {
        Self { allowed }
    }

    /// Compile a field list. Never fails; the result may be empty.
    pub fn compile(&self, raw: &str) -> Projection {
        whitelist(raw, self.allowed, WhitelistMode::Permissive).unwrap_or_default()
    }
}
