//! CLI module for catalogd
//!
//! Provides command-line interface for:
//! - serve: Load config and seed, run the HTTP API
//! - compile: One-shot query compilation, printed as JSON

mod args;
mod commands;
mod errors;
mod io;

pub use args::{Cli, Command};
pub use commands::{compile, compile_query, init_logging, run, run_command, serve};
pub use errors::{CliError, CliResult};
pub use io::write_json;
