//! Configuration settings structures.
//!
//! Defines the typed configuration loaded from TOML files and environment
//! variables. Every field carries a serde default so a bare checkout runs
//! without any configuration file.

use serde::{Deserialize, Serialize};

use crate::config::error::ConfigError;
use crate::logger::{ConsoleConfig, FileConfig, LogFormat, LoggerConfig};

// ============================================================================
// Default value functions
// ============================================================================

fn default_app_name() -> String {
    "journal-rs".to_string()
}

fn default_app_version() -> String {
    crate::pkg_version().to_string()
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_request_timeout() -> u64 {
    30
}

fn default_keep_alive_timeout() -> u64 {
    75
}

fn default_mongo_uri() -> String {
    "mongodb://localhost:27017".to_string()
}

fn default_database_name() -> String {
    "journaldb".to_string()
}

fn default_max_pool_size() -> u32 {
    10
}

fn default_min_pool_size() -> u32 {
    1
}

fn default_connect_timeout() -> u64 {
    10
}

fn default_server_selection_timeout() -> u64 {
    30
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}

fn default_log_path() -> String {
    "logs/journal-rs.log".to_string()
}

fn default_log_format() -> String {
    "json".to_string()
}

// ============================================================================
// Application Configuration
// ============================================================================

/// Application basic information configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationConfig {
    /// Application name
    #[serde(default = "default_app_name")]
    pub name: String,

    /// Application version
    #[serde(default = "default_app_version")]
    pub version: String,
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            name: default_app_name(),
            version: default_app_version(),
        }
    }
}

// ============================================================================
// Server Configuration
// ============================================================================

/// Axum HTTP server configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Request timeout in seconds
    #[serde(default = "default_request_timeout")]
    pub request_timeout: u64,

    /// Keep-alive timeout in seconds
    #[serde(default = "default_keep_alive_timeout")]
    pub keep_alive_timeout: u64,
}

impl ServerConfig {
    /// Get the full server address as "host:port"
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            request_timeout: default_request_timeout(),
            keep_alive_timeout: default_keep_alive_timeout(),
        }
    }
}

// ============================================================================
// Database Configuration
// ============================================================================

/// MongoDB connection configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Connection string, e.g. "mongodb://localhost:27017"
    #[serde(default = "default_mongo_uri")]
    pub uri: String,

    /// Database name
    #[serde(default = "default_database_name")]
    pub database: String,

    /// Maximum connections in the driver pool
    #[serde(default = "default_max_pool_size")]
    pub max_pool_size: u32,

    /// Minimum connections kept warm in the driver pool
    #[serde(default = "default_min_pool_size")]
    pub min_pool_size: u32,

    /// Connect timeout in seconds
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout: u64,

    /// Server selection timeout in seconds
    #[serde(default = "default_server_selection_timeout")]
    pub server_selection_timeout: u64,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            uri: default_mongo_uri(),
            database: default_database_name(),
            max_pool_size: default_max_pool_size(),
            min_pool_size: default_min_pool_size(),
            connect_timeout: default_connect_timeout(),
            server_selection_timeout: default_server_selection_timeout(),
        }
    }
}

// ============================================================================
// Logger Configuration
// ============================================================================

/// Console sink settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsoleSettings {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default = "default_true")]
    pub colored: bool,
}

impl Default for ConsoleSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            colored: true,
        }
    }
}

/// File sink settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileSettings {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default = "default_log_path")]
    pub path: String,
    /// Output format: "full", "compact", or "json"
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for FileSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            path: default_log_path(),
            format: default_log_format(),
        }
    }
}

/// Logger configuration as it appears in the configuration sources
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggerSettings {
    /// Log level filter, e.g. "info" or "journal_rs=debug"
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default)]
    pub console: ConsoleSettings,

    #[serde(default)]
    pub file: FileSettings,
}

impl Default for LoggerSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            console: ConsoleSettings::default(),
            file: FileSettings::default(),
        }
    }
}

impl LoggerSettings {
    /// Converts the raw settings into the logger module's configuration.
    pub fn into_logger_config(self) -> Result<LoggerConfig, ConfigError> {
        let format: LogFormat = self
            .file
            .format
            .parse()
            .map_err(|_| ConfigError::validation("logger.file.format", "must be one of: full, compact, json"))?;

        Ok(LoggerConfig {
            level: self.level,
            console: ConsoleConfig {
                enabled: self.console.enabled,
                colored: self.console.colored,
            },
            file: FileConfig {
                enabled: self.file.enabled,
                path: self.file.path.into(),
                format,
            },
        })
    }
}

// ============================================================================
// Root Settings
// ============================================================================

/// Root application settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub application: ApplicationConfig,

    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub database: DatabaseConfig,

    #[serde(default)]
    pub logger: LoggerSettings,
}

impl Settings {
    /// Validates the combined configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::validation("server.port", "must not be 0"));
        }
        if self.database.uri.is_empty() {
            return Err(ConfigError::validation("database.uri", "must not be empty"));
        }
        if !self.database.uri.starts_with("mongodb://") && !self.database.uri.starts_with("mongodb+srv://") {
            return Err(ConfigError::validation(
                "database.uri",
                "must start with mongodb:// or mongodb+srv://",
            ));
        }
        if self.database.database.is_empty() {
            return Err(ConfigError::validation("database.database", "must not be empty"));
        }
        if self.database.min_pool_size > self.database.max_pool_size {
            return Err(ConfigError::validation(
                "database.min_pool_size",
                "must not exceed database.max_pool_size",
            ));
        }
        self.logger
            .clone()
            .into_logger_config()?
            .validate()
            .map_err(|error| ConfigError::validation("logger".to_string(), error.to_string()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let settings = Settings::default();
        assert!(settings.validate().is_ok());
        assert_eq!(settings.server.address(), "127.0.0.1:8080");
        assert_eq!(settings.database.database, "journaldb");
    }

    #[test]
    fn test_zero_port_rejected() {
        let mut settings = Settings::default();
        settings.server.port = 0;
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_non_mongo_uri_rejected() {
        let mut settings = Settings::default();
        settings.database.uri = "postgres://localhost/journal".to_string();
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_pool_bounds_checked() {
        let mut settings = Settings::default();
        settings.database.min_pool_size = 20;
        settings.database.max_pool_size = 10;
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_bad_log_format_rejected() {
        let mut settings = Settings::default();
        settings.logger.file.format = "xml".to_string();
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_settings_deserialize_from_toml() {
        let settings: Settings = toml::from_str(
            r#"
            [server]
            host = "0.0.0.0"
            port = 9000

            [database]
            uri = "mongodb://db:27017"
            database = "journal_test"
            "#,
        )
        .unwrap();
        assert_eq!(settings.server.address(), "0.0.0.0:9000");
        assert_eq!(settings.database.database, "journal_test");
        // Untouched sections keep their defaults
        assert_eq!(settings.logger.level, "info");
    }
}
