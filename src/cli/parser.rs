//! CLI argument parsing with clap.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use crate::config::Environment;

/// A journaling web service backed by a document store
#[derive(Parser, Debug)]
#[command(name = "journal-rs")]
#[command(about = "A journaling web service backed by MongoDB")]
#[command(long_about = "
Journal-rs serves a REST API for a personal-journaling application:
user registration, user administration, and journal entry management,
persisted in MongoDB.

EXAMPLES:
    # Start the server with default configuration
    journal-rs serve

    # Start server on custom host and port
    journal-rs serve --host 0.0.0.0 --port 8080

    # Use a single configuration file
    journal-rs --config /path/to/config.toml serve

    # Check configuration without starting the server
    journal-rs serve --dry-run
")]
#[command(version = crate::clap_long_version())]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Configuration file path
    ///
    /// Use a single TOML file instead of the layered configuration
    /// directory.
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Override environment detection
    ///
    /// Forces a specific environment instead of reading JOURNAL_APP_ENV.
    #[arg(short, long, value_enum)]
    pub env: Option<EnvironmentArg>,

    /// Enable verbose logging (debug level)
    #[arg(short, long)]
    pub verbose: bool,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the web server (default)
    Serve {
        /// Host address to bind to
        #[arg(long, value_name = "ADDRESS")]
        host: Option<String>,

        /// Port number to listen on
        #[arg(long, value_name = "PORT")]
        port: Option<u16>,

        /// Validate configuration and exit without starting the server
        #[arg(long)]
        dry_run: bool,
    },
}

/// Environment selection for the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum EnvironmentArg {
    #[value(alias = "dev")]
    Development,
    Test,
    #[value(alias = "prod")]
    Production,
}

impl From<EnvironmentArg> for Environment {
    fn from(arg: EnvironmentArg) -> Self {
        match arg {
            EnvironmentArg::Development => Environment::Development,
            EnvironmentArg::Test => Environment::Test,
            EnvironmentArg::Production => Environment::Production,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_defaults() {
        let cli = Cli::try_parse_from(["journal-rs"]).unwrap();
        assert!(cli.command.is_none());
        assert!(cli.config.is_none());
        assert!(!cli.verbose);
        assert!(!cli.quiet);
    }

    #[test]
    fn test_parse_serve_with_overrides() {
        let cli = Cli::try_parse_from([
            "journal-rs", "serve", "--host", "0.0.0.0", "--port", "9000", "--dry-run",
        ])
        .unwrap();
        match cli.command {
            Some(Commands::Serve {
                host,
                port,
                dry_run,
            }) => {
                assert_eq!(host.as_deref(), Some("0.0.0.0"));
                assert_eq!(port, Some(9000));
                assert!(dry_run);
            }
            other => panic!("Expected serve command, got {:?}", other),
        }
    }

    #[test]
    fn test_verbose_and_quiet_conflict() {
        assert!(Cli::try_parse_from(["journal-rs", "--verbose", "--quiet"]).is_err());
    }

    #[test]
    fn test_env_aliases() {
        let cli = Cli::try_parse_from(["journal-rs", "--env", "prod"]).unwrap();
        assert_eq!(cli.env, Some(EnvironmentArg::Production));
    }
}
