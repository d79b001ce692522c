//! Error types for bond pricing.

use rust_decimal::Decimal;
use thiserror::Error;

use sovbond_core::{CoreError, Date};

/// A specialized Result type for bond operations.
pub type BondResult<T> = Result<T, BondError>;

/// Errors that can occur while building or pricing an instrument.
///
/// All of these are deterministic input-validation failures.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BondError {
    /// Maturity is on or before settlement.
    #[error("Invalid date range: maturity {maturity} must be after settlement {settlement}")]
    InvalidDateRange {
        /// Settlement date.
        settlement: Date,
        /// Maturity date.
        maturity: Date,
    },

    /// Coupon frequency outside {1, 2, 4}.
    #[error("Unsupported coupon frequency: {periods} payments per year (expected 1, 2 or 4)")]
    UnsupportedFrequency {
        /// Payments per year that was requested.
        periods: u32,
    },

    /// Yield produces a non-positive discount base.
    #[error("Invalid yield: {value} - {reason}")]
    InvalidYield {
        /// The offending yield.
        value: f64,
        /// Reason for invalidity.
        reason: String,
    },

    /// Inflation index components must both be positive.
    #[error(
        "Invalid inflation factor: current index {current}, base index {base} \
         (both must be positive)"
    )]
    InvalidInflationFactor {
        /// Current index value.
        current: Decimal,
        /// Base index value.
        base: Decimal,
    },

    /// Missing required field.
    #[error("Missing required field: {field}")]
    MissingField {
        /// The missing field name.
        field: String,
    },

    /// Invalid instrument specification.
    #[error("Invalid instrument specification: {reason}")]
    InvalidSpec {
        /// Description of what's invalid.
        reason: String,
    },

    /// The target price lies outside the yield search bracket.
    #[error("Yield not bracketed: target price outside the prices at yields {lower} and {upper}")]
    YieldNotBracketed {
        /// Lower yield bound.
        lower: f64,
        /// Upper yield bound.
        upper: f64,
    },

    /// Yield search failed to converge.
    #[error("Yield search failed to converge after {iterations} iterations")]
    YieldConvergenceFailed {
        /// Number of iterations attempted.
        iterations: u32,
    },

    /// Core library error.
    #[error("Core error: {0}")]
    Core(CoreError),
}

impl BondError {
    /// Creates an invalid specification error.
    #[must_use]
    pub fn invalid_spec(reason: impl Into<String>) -> Self {
        Self::InvalidSpec {
            reason: reason.into(),
        }
    }

    /// Creates a missing field error.
    #[must_use]
    pub fn missing_field(field: impl Into<String>) -> Self {
        Self::MissingField {
            field: field.into(),
        }
    }

    /// Creates an invalid yield error.
    #[must_use]
    pub fn invalid_yield(value: f64, reason: impl Into<String>) -> Self {
        Self::InvalidYield {
            value,
            reason: reason.into(),
        }
    }
}

impl From<CoreError> for BondError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::UnsupportedFrequency { periods } => Self::UnsupportedFrequency { periods },
            other => Self::Core(other),
        }
    }
}
