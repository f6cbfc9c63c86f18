//! # REST API Errors
//!
//! HTTP mapping for everything a request can fail with.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;
use tracing::{error, warn};

use crate::query::CompileError;
use crate::store::StoreError;

/// Result type for REST handlers
pub type RestResult<T> = Result<T, RestError>;

/// REST API errors
#[derive(Debug, Clone, Error)]
pub enum RestError {
    /// Request parameters failed to compile
    #[error(transparent)]
    Compile(#[from] CompileError),

    /// Record addressed by path does not exist
    #[error("{0} not found")]
    NotFound(String),

    /// Store failure while executing a plan
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl RestError {
    /// Get HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            RestError::Compile(err) => err.status_code(),
            RestError::NotFound(_) => StatusCode::NOT_FOUND,
            RestError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Stable machine-readable kind
    pub fn kind(&self) -> &'static str {
        match self {
            RestError::Compile(err) => err.kind(),
            RestError::NotFound(_) => "ResourceNotFound",
            RestError::Store(_) => "StoreUnavailable",
        }
    }
}

/// Error detail
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub status: u16,
    #[serde(rename = "type")]
    pub kind: String,
    pub message: String,
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: ErrorBody,
}

impl From<&RestError> for ErrorResponse {
    fn from(err: &RestError) -> Self {
        Self {
            success: false,
            error: ErrorBody {
                status: err.status_code().as_u16(),
                kind: err.kind().to_string(),
                message: err.to_string(),
            },
        }
    }
}

impl From<&CompileError> for ErrorResponse {
    fn from(err: &CompileError) -> Self {
        Self::from(&RestError::Compile(err.clone()))
    }
}

impl IntoResponse for RestError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            error!(kind = self.kind(), error = %self, "request failed");
        } else {
            warn!(kind = self.kind(), error = %self, "request rejected");
        }

        let body = Json(ErrorResponse::from(&self));
        (status, body).into_response()
    }
}
