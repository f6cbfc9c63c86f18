//! # Range Compilation
//!
//! Turns up to two `<op>_<number>` terms (`gte_10`, `lt_100`) for one
//! numeric field into a single bounded predicate.
//!
//! Rules:
//! - at most [`MAX_RANGE_TERMS`] terms; counted before anything is parsed
//! - `lt`/`lte` set the upper bound, `gt`/`gte` the lower bound
//! - two terms must target different bounds
//! - values are plain non-negative decimals; integer fields reject fractions

use serde::Serialize;

use super::errors::{CompileError, CompileResult};

/// Maximum number of terms for one range field
pub const MAX_RANGE_TERMS: usize = 2;

/// Comparison operator of a range term
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeOp {
    Lt,
    Lte,
    Gt,
    Gte,
}

impl RangeOp {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "lt" => Some(RangeOp::Lt),
            "lte" => Some(RangeOp::Lte),
            "gt" => Some(RangeOp::Gt),
            "gte" => Some(RangeOp::Gte),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RangeOp::Lt => "lt",
            RangeOp::Lte => "lte",
            RangeOp::Gt => "gt",
            RangeOp::Gte => "gte",
        }
    }

    /// `lt`/`lte` bound from above
    pub fn is_upper(&self) -> bool {
        matches!(self, RangeOp::Lt | RangeOp::Lte)
    }

    pub fn is_inclusive(&self) -> bool {
        matches!(self, RangeOp::Lte | RangeOp::Gte)
    }
}

/// One parsed range term
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RangeToken {
    pub op: RangeOp,
    pub value: f64,
}

impl RangeToken {
    /// Parse `<op>_<number>`; `None` when the term is malformed
    pub fn parse(raw: &str) -> Option<Self> {
        let (op, number) = raw.split_once('_')?;
        let op = RangeOp::parse(op)?;

        if !is_plain_decimal(number) {
            return None;
        }
        let value: f64 = number.parse().ok()?;
        if !value.is_finite() {
            return None;
        }

        Some(Self { op, value })
    }

    fn bound(&self) -> Bound {
        Bound {
            value: self.value,
            inclusive: self.op.is_inclusive(),
        }
    }
}

/// Digits with at most one decimal point, e.g. `10`, `9.99`, `.5`
fn is_plain_decimal(raw: &str) -> bool {
    let mut seen_digit = false;
    let mut seen_dot = false;

    for c in raw.chars() {
        match c {
            '0'..='9' => seen_digit = true,
            '.' if !seen_dot => seen_dot = true,
            _ => return false,
        }
    }

    seen_digit
}

/// One side of a range
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Bound {
    pub value: f64,
    pub inclusive: bool,
}

impl Bound {
    pub fn inclusive(value: f64) -> Self {
        Self {
            value,
            inclusive: true,
        }
    }

    pub fn exclusive(value: f64) -> Self {
        Self {
            value,
            inclusive: false,
        }
    }
}

/// A pair of optional bounds on a numeric field
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RangePredicate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lower_bound: Option<Bound>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub upper_bound: Option<Bound>,
}

impl RangePredicate {
    /// Check whether `value` lies within both bounds
    pub fn matches(&self, value: f64) -> bool {
        let above_lower = match self.lower_bound {
            Some(Bound {
                value: lower,
                inclusive: true,
            }) => value >= lower,
            Some(Bound { value: lower, .. }) => value > lower,
            None => true,
        };
        let below_upper = match self.upper_bound {
            Some(Bound {
                value: upper,
                inclusive: true,
            }) => value <= upper,
            Some(Bound { value: upper, .. }) => value < upper,
            None => true,
        };

        above_lower && below_upper
    }

    pub fn is_unbounded(&self) -> bool {
        self.lower_bound.is_none() && self.upper_bound.is_none()
    }
}

/// Numeric domain of a range field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumericKind {
    Decimal,
    Integer,
}

/// Range compiler for one named field
#[derive(Debug, Clone, Copy)]
pub struct RangeCompiler {
    field: &'static str,
    kind: NumericKind,
}

impl RangeCompiler {
    pub const fn new(field: &'static str, kind: NumericKind) -> Self {
        Self { field, kind }
    }

    pub const fn price() -> Self {
        Self::new("price", NumericKind::Decimal)
    }

    pub const fn stock() -> Self {
        Self::new("stock", NumericKind::Integer)
    }

    /// Compile one or two raw terms into a predicate
    pub fn compile(&self, terms: &[&str]) -> CompileResult<RangePredicate> {
        if terms.len() > MAX_RANGE_TERMS {
            return Err(CompileError::TooManyRangeTerms {
                field: self.field.to_string(),
                count: terms.len(),
            });
        }
        if terms.is_empty() {
            return Err(self.invalid_value(""));
        }

        let mut predicate = RangePredicate::default();
        let mut lower_term: Option<&str> = None;
        let mut upper_term: Option<&str> = None;

        for &raw in terms {
            let token = self.parse_token(raw)?;

            let (slot, seen) = if token.op.is_upper() {
                (&mut predicate.upper_bound, &mut upper_term)
            } else {
                (&mut predicate.lower_bound, &mut lower_term)
            };

            if let Some(first) = seen {
                return Err(CompileError::ConflictingRangeTerms {
                    field: self.field.to_string(),
                    first: first.to_string(),
                    second: raw.to_string(),
                });
            }

            *slot = Some(token.bound());
            *seen = Some(raw);
        }

        Ok(predicate)
    }

    fn parse_token(&self, raw: &str) -> CompileResult<RangeToken> {
        let token = RangeToken::parse(raw).ok_or_else(|| self.invalid_value(raw))?;

        if self.kind == NumericKind::Integer && token.value.fract() != 0.0 {
            return Err(self.invalid_value(raw));
        }

        Ok(token)
    }

    fn invalid_value(&self, raw: &str) -> CompileError {
        CompileError::InvalidRangeValue {
            field: self.field.to_string(),
            term: raw.to_string(),
        }
    }
}
