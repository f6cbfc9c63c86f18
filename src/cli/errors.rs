//! CLI-specific error types
//!
//! Every CLI error is fatal: it is printed to stderr and the process exits
//! non-zero.

use std::io;

use thiserror::Error;

use crate::config::ConfigError;
use crate::store::StoreError;

/// CLI error
#[derive(Debug, Error)]
pub enum CliError {
    #[error("CATALOGD_CONFIG_ERROR: {0}")]
    Config(#[from] ConfigError),

    #[error("CATALOGD_SEED_ERROR: {0}")]
    Seed(#[from] StoreError),

    #[error("CATALOGD_INVALID_ARGUMENT: {0}")]
    InvalidArgument(String),

    #[error("CATALOGD_IO_ERROR: {0}")]
    Io(#[from] io::Error),

    #[error("CATALOGD_IO_ERROR: JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CATALOGD_BOOT_FAILED: {0}")]
    BootFailed(String),
}

impl CliError {
    /// Get the error code string
    pub fn code_str(&self) -> &'static str {
        match self {
            CliError::Config(_) => "CATALOGD_CONFIG_ERROR",
            CliError::Seed(_) => "CATALOGD_SEED_ERROR",
            CliError::InvalidArgument(_) => "CATALOGD_INVALID_ARGUMENT",
            CliError::Io(_) | CliError::Json(_) => "CATALOGD_IO_ERROR",
            CliError::BootFailed(_) => "CATALOGD_BOOT_FAILED",
        }
    }

    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        CliError::InvalidArgument(msg.into())
    }

    pub fn boot_failed(msg: impl Into<String>) -> Self {
        CliError::BootFailed(msg.into())
    }
}

/// CLI result type
pub type CliResult<T> = Result<T, CliError>;
