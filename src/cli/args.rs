//! CLI argument definitions using clap
//!
//! Commands:
//! - catalogd serve --config <path> [--port <n>]
//! - catalogd compile [--entity <name>] [--seed <path>] <query>

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// catalogd - product catalog query service
#[derive(Parser, Debug)]
#[command(name = "catalogd")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Start the HTTP API server
    Serve {
        /// Path to configuration file
        #[arg(long, default_value = "./catalogd.json")]
        config: PathBuf,

        /// Override the configured port
        #[arg(long)]
        port: Option<u16>,
    },

    /// Compile a query string and print the resulting plan
    Compile {
        /// Entity the query targets (product or swiper)
        #[arg(long, default_value = "product")]
        entity: String,

        /// Seed file providing categories for `category=` lookups
        #[arg(long)]
        seed: Option<PathBuf>,

        /// Query string, e.g. "price=gte_10&price=lte_50&order_by=price.desc"
        query: String,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_serve() {
        let cli = Cli::try_parse_from(["catalogd", "serve", "--port", "8080"]).unwrap();
        match cli.command {
            Command::Serve { config, port } => {
                assert_eq!(config, PathBuf::from("./catalogd.json"));
                assert_eq!(port, Some(8080));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_compile() {
        let cli = Cli::try_parse_from([
            "catalogd",
            "compile",
            "--entity",
            "swiper",
            "select=title",
        ])
        .unwrap();
        match cli.command {
            Command::Compile {
                entity,
                seed,
                query,
            } => {
                assert_eq!(entity, "swiper");
                assert_eq!(seed, None);
                assert_eq!(query, "select=title");
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
