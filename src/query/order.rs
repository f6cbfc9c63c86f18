//! # Order Compilation
//!
//! Parses `order_by` (comma-separated `field` or `field.direction`) into
//! a multi-key sort, primary key first.

use serde::Serialize;

use super::errors::{CompileError, CompileResult};
use super::selector::split_list;

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    #[default]
    Asc,
    Desc,
}

impl Direction {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.to_ascii_lowercase().as_str() {
            "asc" => Some(Direction::Asc),
            "desc" => Some(Direction::Desc),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Asc => "asc",
            Direction::Desc => "desc",
        }
    }
}

/// One sort key
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderToken {
    pub field: String,
    pub direction: Direction,
}

impl OrderToken {
    pub fn new(field: impl Into<String>, direction: Direction) -> Self {
        Self {
            field: field.into(),
            direction,
        }
    }

    pub fn asc(field: impl Into<String>) -> Self {
        Self::new(field, Direction::Asc)
    }

    pub fn desc(field: impl Into<String>) -> Self {
        Self::new(field, Direction::Desc)
    }
}

/// Compiler for `order_by`
pub struct OrderCompiler;

impl OrderCompiler {
    /// Compile an order list, preserving caller order.
    ///
    /// Duplicate fields are kept; the store decides what they mean.
    pub fn compile(raw: &str) -> CompileResult<Vec<OrderToken>> {
        split_list(raw).map(Self::compile_token).collect()
    }

    fn compile_token(token: &str) -> CompileResult<OrderToken> {
        let (field, direction) = match token.rfind('.') {
            Some(dot_pos) => {
                let direction = Direction::parse(&token[dot_pos + 1..])
                    .ok_or_else(|| CompileError::InvalidOrder(token.to_string()))?;
                (&token[..dot_pos], direction)
            }
            None => (token, Direction::Asc),
        };

        if field.is_empty() {
            return Err(CompileError::InvalidOrder(token.to_string()));
        }

        Ok(OrderToken::new(field, direction))
    }
}
