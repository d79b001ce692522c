//! CLI error types.

use thiserror::Error;

/// CLI error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Invalid date format.
    #[error("Invalid date format: {0}. Use YYYY-MM-DD.")]
    InvalidDate(String),

    /// Invalid rate or amount.
    #[error("Invalid {field}: {value}. Rates are decimal fractions, e.g. 0.0425 for 4.25%.")]
    InvalidNumber {
        /// Argument name.
        field: &'static str,
        /// Value as given.
        value: String,
    },

    /// Invalid index ratio.
    #[error("Invalid index ratio: {0}. Use CURRENT/BASE (e.g. 116.69/100) or a plain ratio.")]
    InvalidIndexRatio(String),

    /// Invalid price.
    #[error("Invalid price: {0}. Must be positive.")]
    InvalidPrice(f64),

    /// Missing required argument.
    #[error("Missing required argument: {0}")]
    MissingArgument(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),
}

/// CLI result type.
pub type CliResult<T> = Result<T, CliError>;
