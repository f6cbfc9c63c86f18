//! # Compile Errors
//!
//! Every way a request can fail to compile into a [`QueryPlan`].
//!
//! [`QueryPlan`]: super::QueryPlan

use axum::http::StatusCode;
use thiserror::Error;

use crate::store::StoreError;

/// Result type for compilation steps
pub type CompileResult<T> = Result<T, CompileError>;

/// Compile errors
///
/// A failed compilation always yields exactly one of these. None are
/// retryable and no partial plan ever reaches the store.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CompileError {
    // ==================
    // Malformed input (400)
    // ==================
    /// Relation token outside the allowed set
    #[error("include field is not correct: {0}")]
    InvalidInclude(String),

    /// More than two range terms for one field
    #[error("same parameter cannot be more than twice: {field} has {count} terms")]
    TooManyRangeTerms { field: String, count: usize },

    /// Two range terms targeting the same bound direction
    #[error("conflicting range terms for {field}: {first} and {second}")]
    ConflictingRangeTerms {
        field: String,
        first: String,
        second: String,
    },

    /// Malformed operator, non-numeric value, or fractional integer bound
    #[error("invalid range value for {field}: {term}")]
    InvalidRangeValue { field: String, term: String },

    /// Malformed ordering token
    #[error("invalid order_by term: {0}")]
    InvalidOrder(String),

    /// Malformed path identifier
    #[error("invalid identifier: {0}")]
    InvalidIdentifier(String),

    // ==================
    // Lookup failures
    // ==================
    /// Named resource has no match
    #[error("{0} not found")]
    ResourceNotFound(String),

    /// The store could not answer a lookup
    #[error("store unavailable: {0}")]
    StoreUnavailable(String),
}

impl CompileError {
    /// Get HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            CompileError::InvalidInclude(_)
            | CompileError::TooManyRangeTerms { .. }
            | CompileError::ConflictingRangeTerms { .. }
            | CompileError::InvalidRangeValue { .. }
            | CompileError::InvalidOrder(_)
            | CompileError::InvalidIdentifier(_) => StatusCode::BAD_REQUEST,

            CompileError::ResourceNotFound(_) => StatusCode::NOT_FOUND,

            CompileError::StoreUnavailable(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Stable machine-readable kind
    pub fn kind(&self) -> &'static str {
        match self {
            CompileError::InvalidInclude(_) => "InvalidInclude",
            CompileError::TooManyRangeTerms { .. } => "TooManyRangeTerms",
            CompileError::ConflictingRangeTerms { .. } => "ConflictingRangeTerms",
            CompileError::InvalidRangeValue { .. } => "InvalidRangeValue",
            CompileError::InvalidOrder(_) => "InvalidOrder",
            CompileError::InvalidIdentifier(_) => "InvalidIdentifier",
            CompileError::ResourceNotFound(_) => "ResourceNotFound",
            CompileError::StoreUnavailable(_) => "StoreUnavailable",
        }
    }

    /// Not-found error for a named resource
    pub fn not_found(resource: impl Into<String>) -> Self {
        CompileError::ResourceNotFound(resource.into())
    }
}

impl From<StoreError> for CompileError {
    fn from(err: StoreError) -> Self {
        CompileError::StoreUnavailable(err.to_string())
    }
}
