//! Coupon frequency.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{CoreError, CoreResult};

/// Coupon payment frequency.
///
/// Sovereign coupon bonds pay annually, semi-annually or quarterly; any other
/// frequency is rejected with [`CoreError::UnsupportedFrequency`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(try_from = "u32", into = "u32")]
pub enum Frequency {
    /// Annual payments (1 per year)
    Annual,
    /// Semi-annual payments (2 per year)
    #[default]
    SemiAnnual,
    /// Quarterly payments (4 per year) - typical for capital indexed bonds
    Quarterly,
}

impl Frequency {
    /// Converts a number of payments per year into a frequency.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::UnsupportedFrequency` unless `periods` is 1, 2 or 4.
    pub fn from_periods(periods: u32) -> CoreResult<Self> {
        match periods {
            1 => Ok(Frequency::Annual),
            2 => Ok(Frequency::SemiAnnual),
            4 => Ok(Frequency::Quarterly),
            other => Err(CoreError::unsupported_frequency(other)),
        }
    }

    /// Returns the number of periods per year.
    #[must_use]
    pub fn periods_per_year(&self) -> u32 {
        match self {
            Frequency::Annual => 1,
            Frequency::SemiAnnual => 2,
            Frequency::Quarterly => 4,
        }
    }

    /// Returns the number of months per period.
    #[must_use]
    pub fn months_per_period(&self) -> u32 {
        12 / self.periods_per_year()
    }
}

impl TryFrom<u32> for Frequency {
    type Error = CoreError;

    fn try_from(periods: u32) -> Result<Self, Self::Error> {
        Self::from_periods(periods)
    }
}

impl From<Frequency> for u32 {
    fn from(freq: Frequency) -> Self {
        freq.periods_per_year()
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Frequency::Annual => "Annual",
            Frequency::SemiAnnual => "Semi-Annual",
            Frequency::Quarterly => "Quarterly",
        };
        write!(f, "{name}")
    }
}
