//! Logger error types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoggerError {
    #[error("Invalid log format: {0}")]
    InvalidFormat(String),

    #[error("Invalid log file path: {0}")]
    InvalidPath(String),

    #[error("At least one output (console or file) must be enabled")]
    NoSink,

    #[error("Failed to open log file")]
    Io(#[from] std::io::Error),

    #[error("Failed to install the global subscriber: {0}")]
    Init(String),
}
