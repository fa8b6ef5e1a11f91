//! Layered configuration loading.

use std::path::PathBuf;

use config::{Config, Environment as EnvSource, File, FileFormat};

use crate::config::environment::Environment;
use crate::config::error::ConfigError;
use crate::config::settings::Settings;

/// Environment variable for the configuration directory
const CONFIG_DIR_ENV: &str = "JOURNAL_CONFIG_DIR";

/// Environment variable for a single configuration file
const CONFIG_FILE_ENV: &str = "JOURNAL_CONFIG_FILE";

/// Default configuration directory
const DEFAULT_CONFIG_DIR: &str = "config";

/// Environment variable prefix for configuration overrides
const ENV_PREFIX: &str = "JOURNAL";

/// Separator for nested configuration keys in environment variables
const ENV_SEPARATOR: &str = "__";

/// Configuration loader with layered sources, in order of priority:
/// 1. `default.toml`
/// 2. `{environment}.toml`
/// 3. `local.toml`
/// 4. `JOURNAL_*` environment variables (highest)
///
/// All files are optional; serde defaults cover anything left unset.
#[derive(Debug)]
pub struct ConfigLoader {
    config_dir: PathBuf,
    config_file: Option<PathBuf>,
    environment: Environment,
}

impl ConfigLoader {
    /// Creates a loader from the process environment.
    ///
    /// # Errors
    /// Returns an error when both `JOURNAL_CONFIG_DIR` and
    /// `JOURNAL_CONFIG_FILE` are set; they are mutually exclusive.
    pub fn new() -> Result<Self, ConfigError> {
        let config_dir = std::env::var(CONFIG_DIR_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_CONFIG_DIR));

        let config_file = std::env::var(CONFIG_FILE_ENV).ok().map(PathBuf::from);

        if config_file.is_some() && std::env::var(CONFIG_DIR_ENV).is_ok() {
            return Err(ConfigError::mutual_exclusivity(
                "JOURNAL_CONFIG_DIR and JOURNAL_CONFIG_FILE cannot both be set. \
                 Use JOURNAL_CONFIG_DIR for layered configuration or \
                 JOURNAL_CONFIG_FILE for a single configuration file.",
            ));
        }

        Ok(Self {
            config_dir,
            config_file,
            environment: Environment::from_env(),
        })
    }

    /// Overrides the detected environment (CLI `--env`).
    pub fn with_environment(mut self, environment: Environment) -> Self {
        self.environment = environment;
        self
    }

    /// Uses a single configuration file instead of layered loading
    /// (CLI `--config`).
    pub fn with_file(mut self, path: PathBuf) -> Self {
        self.config_file = Some(path);
        self
    }

    pub fn environment(&self) -> Environment {
        self.environment
    }

    /// Loads and validates settings from all sources.
    pub fn load(&self) -> Result<Settings, ConfigError> {
        let mut builder = Config::builder();

        if let Some(file) = &self.config_file {
            builder = builder.add_source(
                File::from(file.clone()).format(FileFormat::Toml).required(true),
            );
        } else {
            builder = builder
                .add_source(
                    File::from(self.config_dir.join("default.toml"))
                        .format(FileFormat::Toml)
                        .required(false),
                )
                .add_source(
                    File::from(
                        self.config_dir
                            .join(format!("{}.toml", self.environment.as_str())),
                    )
                    .format(FileFormat::Toml)
                    .required(false),
                )
                .add_source(
                    File::from(self.config_dir.join("local.toml"))
                        .format(FileFormat::Toml)
                        .required(false),
                );
        }

        let config = builder
            .add_source(EnvSource::with_prefix(ENV_PREFIX).separator(ENV_SEPARATOR))
            .build()?;

        let settings: Settings = config.try_deserialize().map_err(|error| {
            ConfigError::ParseError(format!("Failed to deserialize configuration: {}", error))
        })?;

        settings.validate()?;
        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_missing_files_fall_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let loader = ConfigLoader {
            config_dir: dir.path().to_path_buf(),
            config_file: None,
            environment: Environment::Test,
        };
        let settings = loader.load().unwrap();
        assert_eq!(settings.server.port, 8080);
    }

    #[test]
    fn test_environment_file_overrides_default() {
        let dir = tempfile::tempdir().unwrap();
        let mut default_file = std::fs::File::create(dir.path().join("default.toml")).unwrap();
        writeln!(default_file, "[server]\nport = 9000").unwrap();
        let mut test_file = std::fs::File::create(dir.path().join("test.toml")).unwrap();
        writeln!(test_file, "[server]\nport = 9001").unwrap();

        let loader = ConfigLoader {
            config_dir: dir.path().to_path_buf(),
            config_file: None,
            environment: Environment::Test,
        };
        let settings = loader.load().unwrap();
        assert_eq!(settings.server.port, 9001);
    }

    #[test]
    fn test_single_file_must_exist() {
        let loader = ConfigLoader {
            config_dir: PathBuf::from("config"),
            config_file: Some(PathBuf::from("/nonexistent/journal.toml")),
            environment: Environment::Test,
        };
        assert!(loader.load().is_err());
    }

    #[test]
    fn test_invalid_settings_rejected_at_load() {
        let dir = tempfile::tempdir().unwrap();
        let mut default_file = std::fs::File::create(dir.path().join("default.toml")).unwrap();
        writeln!(default_file, "[database]\nuri = \"postgres://nope\"").unwrap();

        let loader = ConfigLoader {
            config_dir: dir.path().to_path_buf(),
            config_file: None,
            environment: Environment::Test,
        };
        assert!(loader.load().is_err());
    }
}
