//! Service Configuration
//!
//! Loaded from a JSON file; every field has a default, so `{}` is a
//! valid configuration.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {message}")]
    Read { path: String, message: String },

    #[error("invalid config JSON {path}: {message}")]
    Parse { path: String, message: String },

    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Catalog service configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Host to bind to (default: "0.0.0.0")
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to bind to (default: 54321)
    #[serde(default = "default_port")]
    pub port: u16,

    /// CORS allowed origins; empty allows any origin
    #[serde(default = "default_cors_origins")]
    pub cors_origins: Vec<String>,

    /// JSON seed loaded into the in-memory store at startup
    #[serde(default)]
    pub seed_path: Option<PathBuf>,

    /// Log filter directive, overridden by `RUST_LOG` (default: "info")
    #[serde(default = "default_log_filter")]
    pub log_filter: String,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    54321
}

fn default_cors_origins() -> Vec<String> {
    vec![
        "http://localhost:5173".to_string(),
        "http://localhost:3000".to_string(),
    ]
}

fn default_log_filter() -> String {
    "info".to_string()
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origins: default_cors_origins(),
            seed_path: None,
            log_filter: default_log_filter(),
        }
    }
}

impl ServiceConfig {
    /// Create a new config with specified port
    pub fn with_port(port: u16) -> Self {
        Self {
            port,
            ..Default::default()
        }
    }

    /// Load configuration from file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

        let config: ServiceConfig =
            serde_json::from_str(&content).map_err(|e| ConfigError::Parse {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.port == 0 {
            return Err(ConfigError::Invalid("port must be > 0".to_string()));
        }
        if self.host.trim().is_empty() {
            return Err(ConfigError::Invalid("host must not be empty".to_string()));
        }
        Ok(())
    }

    /// Get the socket address string
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_config(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_default_config() {
        let config = ServiceConfig::default();
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 54321);
        assert_eq!(config.log_filter, "info");
        assert!(config.seed_path.is_none());
    }

    #[test]
    fn test_socket_addr() {
        let config = ServiceConfig::with_port(8080);
        assert_eq!(config.socket_addr(), "0.0.0.0:8080");
    }

    #[test]
    fn test_load_empty_object_uses_defaults() {
        let file = write_config("{}");
        let config = ServiceConfig::load(file.path()).unwrap();
        assert_eq!(config.port, 54321);
        assert!(!config.cors_origins.is_empty());
    }

    #[test]
    fn test_load_overrides() {
        let file = write_config(
            r#"{"port": 8081, "seed_path": "/srv/catalog.json", "log_filter": "debug"}"#,
        );
        let config = ServiceConfig::load(file.path()).unwrap();
        assert_eq!(config.port, 8081);
        assert_eq!(config.seed_path, Some(PathBuf::from("/srv/catalog.json")));
        assert_eq!(config.log_filter, "debug");
    }

    #[test]
    fn test_load_rejects_zero_port() {
        let file = write_config(r#"{"port": 0}"#);
        assert!(matches!(
            ServiceConfig::load(file.path()),
            Err(ConfigError::Invalid(_))
        ));
    }

    #[test]
    fn test_load_errors() {
        assert!(matches!(
            ServiceConfig::load(Path::new("/nonexistent/catalogd.json")),
            Err(ConfigError::Read { .. })
        ));

        let file = write_config("{not json");
        assert!(matches!(
            ServiceConfig::load(file.path()),
            Err(ConfigError::Parse { .. })
        ));
    }
}
