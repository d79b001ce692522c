//! Day count conventions for sovereign bond pricing.
//!
//! Three conventions cover the instruments priced here:
//!
//! - [`ActActIcma`]: Actual/Actual within a coupon period. Accrued interest
//!   and the fractional first discount period are ratios of actual days to
//!   actual days in the period, so leap years and uneven month lengths are
//!   handled by construction.
//! - [`Act365Fixed`]: Actual/365 Fixed, used for simple-interest
//!   (money-market) discounting of discount bills and final coupon periods.
//! - [`Act360`]: Actual/360, the alternative money-market basis.
//!
//! # Usage
//!
//! ```rust
//! use sovbond_core::daycounts::{DayCount, Act365Fixed};
//! use sovbond_core::types::Date;
//!
//! let dc = Act365Fixed;
//! let start = Date::from_ymd(2023, 9, 26).unwrap();
//! let end = Date::from_ymd(2024, 7, 31).unwrap();
//!
//! assert_eq!(dc.day_count(start, end), 309);
//! ```

mod act360;
mod act365;
mod actact;

pub use act360::Act360;
pub use act365::Act365Fixed;
pub use actact::ActActIcma;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::{Date, Frequency};

/// Trait for day count conventions.
///
/// Implementations must be thread-safe (`Send + Sync`).
pub trait DayCount: Send + Sync {
    /// Returns the name of the day count convention (e.g. "ACT/365F").
    fn name(&self) -> &'static str;

    /// Calculates the year fraction between two dates.
    ///
    /// Negative if `end` is before `start`.
    fn year_fraction(&self, start: Date, end: Date) -> Decimal;

    /// Calculates the number of days between two dates under the convention.
    fn day_count(&self, start: Date, end: Date) -> i64;
}

/// Enumeration of the supported day count conventions.
///
/// # Example
///
/// ```rust
/// use sovbond_core::daycounts::{DayCountConvention, DayCount};
/// use sovbond_core::types::{Date, Frequency};
///
/// let dc = DayCountConvention::ActActIcma.to_day_count(Frequency::SemiAnnual);
/// let start = Date::from_ymd(2022, 5, 15).unwrap();
/// let end = Date::from_ymd(2022, 11, 15).unwrap();
/// assert_eq!(dc.day_count(start, end), 184);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DayCountConvention {
    /// Actual/Actual ICMA - coupon-period based, government bonds
    ActActIcma,

    /// Actual/365 Fixed - money-market discounting
    Act365Fixed,

    /// Actual/360 - money-market discounting on a 360 day year
    Act360,
}

impl DayCountConvention {
    /// Creates a boxed day count implementation.
    ///
    /// `frequency` is the coupon frequency of the reference periods; it is
    /// ignored by conventions that do not depend on it.
    #[must_use]
    pub fn to_day_count(&self, frequency: Frequency) -> Box<dyn DayCount> {
        match self {
            DayCountConvention::ActActIcma => Box::new(ActActIcma::new(frequency)),
            DayCountConvention::Act365Fixed => Box::new(Act365Fixed),
            DayCountConvention::Act360 => Box::new(Act360),
        }
    }

    /// Returns the name of the convention.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            DayCountConvention::ActActIcma => "ACT/ACT ICMA",
            DayCountConvention::Act365Fixed => "ACT/365F",
            DayCountConvention::Act360 => "ACT/360",
        }
    }
}

impl std::fmt::Display for DayCountConvention {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}
