//! CLI error types.

use thiserror::Error;

use crate::config::ConfigError;
use pricer_risk::PortfolioError;

/// Errors surfaced by the `pricer` binary.
#[derive(Debug, Error)]
pub enum CliError {
    /// Input file does not exist.
    #[error("File not found: {0}")]
    FileNotFound(String),

    /// Reading input or writing output failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Request is not valid JSON for the command.
    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// CSV output failed.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Configuration could not be built.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Portfolio operation failed.
    #[error(transparent)]
    Portfolio(#[from] PortfolioError),
}

/// Result alias for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;
