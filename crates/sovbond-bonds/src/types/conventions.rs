//! Issuer pricing conventions.
//!
//! Conventions that differ between term sheets but not between instruments
//! of the same issuer: the ex-interest (record date) window, how the final
//! coupon period is discounted, and the money-market day count.

use serde::{Deserialize, Serialize};

use sovbond_core::daycounts::DayCountConvention;

/// Discounting method for the final coupon period.
///
/// Once the next coupon is the maturity payment, the issuer formula switches
/// from periodic compounding to simple (money-market) interest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum FinalPeriodDiscounting {
    /// Simple interest on the money-market year fraction.
    ///
    /// DF = 1 / (1 + y × t)
    #[default]
    SimpleInterest,

    /// Same compounded formula as every other period.
    ///
    /// DF = (1 + y/f)^(-a/b)
    Compound,
}

/// Pricing conventions applied on top of the price formula.
///
/// # Example
///
/// ```rust
/// use sovbond_bonds::types::{FinalPeriodDiscounting, PricingConventions};
///
/// let conventions = PricingConventions::record_date(10);
/// assert_eq!(conventions.ex_interest_days, Some(10));
/// assert_eq!(conventions.final_period, FinalPeriodDiscounting::SimpleInterest);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct PricingConventions {
    /// Calendar days before a coupon date during which the bond trades
    /// ex-interest. `None` disables the ex-interest period.
    pub ex_interest_days: Option<u32>,

    /// Discounting used in the final coupon period.
    pub final_period: FinalPeriodDiscounting,

    /// Day count for simple-interest discounting of bills and final
    /// coupon periods.
    pub money_market_day_count: DayCountConvention,
}

impl Default for PricingConventions {
    fn default() -> Self {
        Self {
            ex_interest_days: None,
            final_period: FinalPeriodDiscounting::SimpleInterest,
            money_market_day_count: DayCountConvention::Act365Fixed,
        }
    }
}

impl PricingConventions {
    /// Conventions with an ex-interest period of `days` calendar days before
    /// each coupon date.
    #[must_use]
    pub fn record_date(days: u32) -> Self {
        Self {
            ex_interest_days: Some(days),
            ..Self::default()
        }
    }

    /// Sets the ex-interest period.
    #[must_use]
    pub fn with_ex_interest_days(mut self, days: Option<u32>) -> Self {
        self.ex_interest_days = days;
        self
    }

    /// Sets the final period discounting method.
    #[must_use]
    pub fn with_final_period(mut self, method: FinalPeriodDiscounting) -> Self {
        self.final_period = method;
        self
    }

    /// Sets the money-market day count.
    #[must_use]
    pub fn with_money_market_day_count(mut self, day_count: DayCountConvention) -> Self {
        self.money_market_day_count = day_count;
        self
    }
}
