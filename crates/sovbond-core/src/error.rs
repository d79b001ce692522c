//! Error types for the core crate.

use thiserror::Error;

/// A specialized Result type for core operations.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors raised by the core date and frequency types.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// Invalid calendar date or date arithmetic out of range.
    #[error("Invalid date: {message}")]
    InvalidDate {
        /// Description of the date error.
        message: String,
    },

    /// Coupon frequency outside the supported set (1, 2 or 4 per year).
    #[error("Unsupported coupon frequency: {periods} payments per year (expected 1, 2 or 4)")]
    UnsupportedFrequency {
        /// Payments per year that was requested.
        periods: u32,
    },
}

impl CoreError {
    /// Creates an invalid date error.
    #[must_use]
    pub fn invalid_date(message: impl Into<String>) -> Self {
        Self::InvalidDate {
            message: message.into(),
        }
    }

    /// Creates an unsupported frequency error.
    #[must_use]
    pub fn unsupported_frequency(periods: u32) -> Self {
        Self::UnsupportedFrequency { periods }
    }
}
