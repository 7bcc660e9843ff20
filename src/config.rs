//! Configuration module
//!
//! The service reads a TOML file (by default
//! `<config dir>/freightcms-carriers/config.toml`). Every section and key is
//! optional; missing values fall back to the defaults below.

use std::num::NonZeroU64;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::carrier::query::DEFAULT_PAGE_SIZE;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub logging: LoggingConfig,
    pub cors: CorsConfig,
    pub pagination: PaginationConfig,
    pub metrics: MetricsConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

impl ServerConfig {
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Where carriers are stored
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    #[default]
    Sqlite,
    /// Process-local, lost on restart
    Memory,
}

impl StorageBackend {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Sqlite => "sqlite",
            Self::Memory => "memory",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    pub backend: StorageBackend,
    /// SeaORM connection URL, overridden by `DATABASE_URL`
    pub url: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::Sqlite,
            url: "sqlite://./carriers.db?mode=rwc".to_string(),
        }
    }
}

impl DatabaseConfig {
    pub fn connection_url(&self) -> String {
        std::env::var("DATABASE_URL")
            .ok()
            .filter(|url| !url.is_empty())
            .unwrap_or_else(|| self.url.clone())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `EnvFilter` directive; `RUST_LOG` takes precedence
    pub level: String,
    /// `text` or `json`
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "text".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CorsConfig {
    /// Allowed origins; `"*"` allows any
    pub allowed_origins: Vec<String>,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: vec!["*".to_string()],
        }
    }
}

impl CorsConfig {
    pub fn allows_any(&self) -> bool {
        self.allowed_origins.iter().any(|o| o == "*")
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PaginationConfig {
    /// Upper bound for `pageSize`
    pub max_page_size: u64,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self { max_page_size: 100 }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MetricsConfig {
    pub enabled: bool,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

impl AppConfig {
    /// Read and validate a TOML configuration file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&raw).map_err(|e| match e {
            ConfigError::Parse { source, .. } => ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            },
            other => other,
        })
    }

    pub fn from_toml(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(raw).map_err(|source| ConfigError::Parse {
            path: PathBuf::new(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.pagination.max_page_size < DEFAULT_PAGE_SIZE.get() {
            return Err(ConfigError::Invalid(format!(
                "pagination.max_page_size must be at least {}",
                DEFAULT_PAGE_SIZE
            )));
        }
        if self.database.backend == StorageBackend::Sqlite && self.database.connection_url().is_empty() {
            return Err(ConfigError::Invalid("database.url is empty".to_string()));
        }
        match self.logging.format.to_lowercase().as_str() {
            "text" | "json" => Ok(()),
            other => Err(ConfigError::Invalid(format!(
                "logging.format must be \"text\" or \"json\", got \"{other}\""
            ))),
        }
    }

    pub fn max_page_size(&self) -> NonZeroU64 {
        NonZeroU64::new(self.pagination.max_page_size).unwrap_or(NonZeroU64::MIN)
    }
}

/// `<config dir>/freightcms-carriers/config.toml`, or `./config.toml` when the
/// platform has no config directory.
pub fn default_config_path() -> PathBuf {
    dirs_next::config_dir()
        .map(|dir| dir.join("freightcms-carriers").join("config.toml"))
        .unwrap_or_else(|| PathBuf::from("config.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_uses_defaults() {
        let config = AppConfig::from_toml("").unwrap();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.database.backend, StorageBackend::Sqlite);
        assert_eq!(config.pagination.max_page_size, 100);
        assert!(config.metrics.enabled);
        assert!(config.cors.allows_any());
    }

    #[test]
    fn sections_override_defaults() {
        let config = AppConfig::from_toml(
            r#"
            [server]
            port = 3000

            [database]
            backend = "memory"

            [logging]
            format = "json"

            [cors]
            allowed_origins = ["http://localhost:5173"]

            [pagination]
            max_page_size = 25
            "#,
        )
        .unwrap();

        assert_eq!(config.server.address(), "0.0.0.0:3000");
        assert_eq!(config.database.backend, StorageBackend::Memory);
        assert_eq!(config.logging.format, "json");
        assert!(!config.cors.allows_any());
        assert_eq!(config.max_page_size().get(), 25);
    }

    #[test]
    fn zero_max_page_size_is_rejected() {
        let err = AppConfig::from_toml("[pagination]\nmax_page_size = 0").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn max_page_size_below_default_is_rejected() {
        let err = AppConfig::from_toml("[pagination]\nmax_page_size = 5").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(ref m) if m.contains("at least 10")));

        let config = AppConfig::from_toml("[pagination]\nmax_page_size = 10").unwrap();
        assert_eq!(config.max_page_size().get(), 10);
    }

    #[test]
    fn unknown_log_format_is_rejected() {
        assert!(AppConfig::from_toml("[logging]\nformat = \"xml\"").is_err());
    }

    #[test]
    fn malformed_toml_is_a_parse_error() {
        let err = AppConfig::from_toml("[server\nport = 1").unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let err = AppConfig::load(Path::new("/nonexistent/carriers.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }
}
