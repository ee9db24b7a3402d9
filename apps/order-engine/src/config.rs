//! Configuration loading for the order engine.
//!
//! Configuration comes from a YAML file with serde defaults for every
//! field, so a missing file or an empty document still yields a
//! runnable configuration. `DATABASE_URL` overrides the configured
//! database URL when set.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default configuration path relative to the working directory.
pub const DEFAULT_CONFIG_PATH: &str = "config.yaml";

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read configuration file.
    #[error("failed to read config file '{path}': {source}")]
    ReadError {
        /// Path to the config file.
        path: String,
        /// The underlying IO error.
        source: std::io::Error,
    },

    /// Failed to parse YAML configuration.
    #[error("failed to parse config YAML: {0}")]
    ParseError(#[from] serde_yaml_bw::Error),
}

/// Root configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// HTTP server configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// Database configuration.
    #[serde(default)]
    pub database: DatabaseConfig,
}

/// HTTP server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Port for the JSON API.
    #[serde(default = "default_http_port")]
    pub http_port: u16,
    /// Bind address.
    #[serde(default = "default_bind_address")]
    pub bind_address: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            http_port: default_http_port(),
            bind_address: default_bind_address(),
        }
    }
}

/// Database configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// SQLx connection URL.
    #[serde(default = "default_database_url")]
    pub url: String,
    /// Connection pool size.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: default_database_url(),
            max_connections: default_max_connections(),
        }
    }
}

fn default_http_port() -> u16 {
    8080
}

fn default_bind_address() -> String {
    "0.0.0.0".to_string()
}

fn default_database_url() -> String {
    "sqlite://orderdb.sqlite?mode=rwc".to_string()
}

fn default_max_connections() -> u32 {
    5
}

/// Load configuration from `path`, or from [`DEFAULT_CONFIG_PATH`].
///
/// An explicitly given path must exist; the default path is optional
/// and falls back to defaults when absent. A `DATABASE_URL`
/// environment variable overrides the configured database URL.
pub fn load_config(path: Option<&str>) -> Result<Config, ConfigError> {
    let mut config = match path {
        Some(path) => parse_file(path)?,
        None => match std::fs::read_to_string(DEFAULT_CONFIG_PATH) {
            Ok(contents) => parse(&contents)?,
            Err(_) => Config::default(),
        },
    };

    if let Ok(url) = std::env::var("DATABASE_URL") {
        config.database.url = url;
    }
    Ok(config)
}

fn parse_file(path: &str) -> Result<Config, ConfigError> {
    let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadError {
        path: path.to_string(),
        source,
    })?;
    parse(&contents)
}

fn parse(contents: &str) -> Result<Config, ConfigError> {
    if contents.trim().is_empty() {
        return Ok(Config::default());
    }
    Ok(serde_yaml_bw::from_str(contents)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_when_document_is_empty() {
        let config = parse("").unwrap();
        assert_eq!(config.server.http_port, 8080);
        assert_eq!(config.database.max_connections, 5);
        assert!(config.database.url.starts_with("sqlite://"));
    }

    #[test]
    fn partial_document_fills_the_rest() {
        let config = parse("server:\n  http_port: 9000\n").unwrap();
        assert_eq!(config.server.http_port, 9000);
        assert_eq!(config.server.bind_address, "0.0.0.0");
        assert_eq!(config.database.max_connections, 5);
    }

    #[test]
    fn full_document_parses() {
        let yaml = r#"
server:
  http_port: 9000
  bind_address: 127.0.0.1
database:
  url: "sqlite::memory:"
  max_connections: 1
"#;
        let config = parse(yaml).unwrap();
        assert_eq!(config.server.bind_address, "127.0.0.1");
        assert_eq!(config.database.url, "sqlite::memory:");
        assert_eq!(config.database.max_connections, 1);
    }

    #[test]
    fn explicit_missing_path_is_an_error() {
        let err = load_config(Some("/definitely/not/here.yaml")).unwrap_err();
        assert!(matches!(err, ConfigError::ReadError { .. }));
    }
}
