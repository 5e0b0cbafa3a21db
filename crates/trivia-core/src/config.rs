//! Configuration for the trivia service
//!
//! Settings come from (in order) built-in defaults, an optional TOML or JSON
//! file, and `TRIVIA_*` environment variables.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::pagination::QUESTIONS_PER_PAGE;

/// Environment variable overriding the listen address
pub const ENV_ADDR: &str = "TRIVIA_ADDR";
/// Environment variable overriding the database path
pub const ENV_DATABASE: &str = "TRIVIA_DATABASE";
/// Environment variable naming a config file
pub const ENV_CONFIG: &str = "TRIVIA_CONFIG";

/// Service-wide configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TriviaConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub pagination: PaginationConfig,
}

/// HTTP listener settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Socket address to bind
    pub addr: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: "127.0.0.1:5000".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// SQLite database file
    pub path: PathBuf,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("trivia.db"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaginationConfig {
    pub questions_per_page: usize,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            questions_per_page: QUESTIONS_PER_PAGE,
        }
    }
}

impl TriviaConfig {
    /// Create a new configuration with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from a TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        toml::from_str(toml_str).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Load configuration from a JSON string
    pub fn from_json(json_str: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(json_str).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Serialize configuration to TOML
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Load a config file; `.json` files are JSON, anything else TOML
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Io(format!("{}: {}", path.display(), e)))?;

        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Self::from_json(&contents),
            _ => Self::from_toml(&contents),
        }
    }

    /// Defaults, then the file named by `TRIVIA_CONFIG`, then env overrides
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = match std::env::var(ENV_CONFIG) {
            Ok(path) => Self::from_file(path)?,
            Err(_) => Self::default(),
        };
        config.apply_overrides(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    /// Apply `TRIVIA_ADDR` / `TRIVIA_DATABASE` from `lookup`
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(addr) = lookup(ENV_ADDR) {
            self.server.addr = addr;
        }
        if let Some(path) = lookup(ENV_DATABASE) {
            self.database.path = PathBuf::from(path);
        }
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.addr.trim().is_empty() {
            return Err(ConfigError::MissingField("server.addr".to_string()));
        }

        if self.database.path.as_os_str().is_empty() {
            return Err(ConfigError::MissingField("database.path".to_string()));
        }

        if self.pagination.questions_per_page == 0 {
            return Err(ConfigError::OutOfRange(
                "pagination.questions_per_page must be positive".to_string(),
            ));
        }

        Ok(())
    }
}

/// Configuration loading or validation error
#[derive(Debug, Clone, Error)]
pub enum ConfigError {
    #[error("Config parse error: {0}")]
    Parse(String),
    #[error("Config IO error: {0}")]
    Io(String),
    /// Value is out of valid range
    #[error("Value out of range: {0}")]
    OutOfRange(String),
    /// Required field is missing
    #[error("Missing field: {0}")]
    MissingField(String),
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn test_default_config() {
        let config = TriviaConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.pagination.questions_per_page, 10);
        assert_eq!(config.server.addr, "127.0.0.1:5000");
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = TriviaConfig::from_toml(
            r#"
[database]
path = "/var/lib/trivia/trivia.db"
"#,
        )
        .unwrap();
        assert_eq!(config.database.path, PathBuf::from("/var/lib/trivia/trivia.db"));
        assert_eq!(config.pagination.questions_per_page, QUESTIONS_PER_PAGE);
    }

    #[test]
    fn test_toml_roundtrip() {
        let mut config = TriviaConfig::default();
        config.pagination.questions_per_page = 25;
        let parsed = TriviaConfig::from_toml(&config.to_toml().unwrap()).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_json_file() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(file, r#"{{"server": {{"addr": "0.0.0.0:8080"}}}}"#).unwrap();

        let config = TriviaConfig::from_file(file.path()).unwrap();
        assert_eq!(config.server.addr, "0.0.0.0:8080");
    }

    #[test]
    fn test_missing_file() {
        let err = TriviaConfig::from_file("/nonexistent/trivia.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }

    #[test]
    fn test_overrides() {
        let mut config = TriviaConfig::default();
        config.apply_overrides(|key| match key {
            ENV_ADDR => Some("0.0.0.0:9000".to_string()),
            ENV_DATABASE => Some("/tmp/t.db".to_string()),
            _ => None,
        });
        assert_eq!(config.server.addr, "0.0.0.0:9000");
        assert_eq!(config.database.path, PathBuf::from("/tmp/t.db"));
    }

    #[test]
    fn test_out_of_range() {
        let mut config = TriviaConfig::default();
        config.pagination.questions_per_page = 0;
        assert!(matches!(config.validate(), Err(ConfigError::OutOfRange(_))));
    }
}
