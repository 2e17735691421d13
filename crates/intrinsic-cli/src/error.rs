//! CLI error types.

use intrinsic_analytics::AnalyticsError;
use thiserror::Error;

/// CLI error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Missing required argument.
    #[error("Missing required argument: {0}")]
    MissingArgument(String),

    /// The engine rejected the inputs or failed to compute.
    #[error(transparent)]
    Engine(#[from] AnalyticsError),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// CLI result type.
pub type CliResult<T> = Result<T, CliError>;
