//! Actual/Actual ICMA day count convention.

use rust_decimal::Decimal;

use super::DayCount;
use crate::types::{Date, Frequency};

/// Actual/Actual ICMA day count convention.
///
/// The year fraction depends on the coupon frequency and the actual number
/// of days in the coupon period the dates fall in.
///
/// # Formula
///
/// $$\text{Year Fraction} = \frac{\text{Days}}{\text{Frequency} \times \text{Days in Period}}$$
#[derive(Debug, Clone, Copy)]
pub struct ActActIcma {
    frequency: Frequency,
}

impl ActActIcma {
    /// Creates a new ACT/ACT ICMA convention with the given frequency.
    #[must_use]
    pub fn new(frequency: Frequency) -> Self {
        Self { frequency }
    }

    /// Returns the coupon frequency of the reference periods.
    #[must_use]
    pub fn frequency(&self) -> Frequency {
        self.frequency
    }

    /// Fraction of the coupon period between `start` and `end`.
    ///
    /// Returns zero for a degenerate (zero-length) period.
    #[must_use]
    pub fn period_fraction(
        &self,
        start: Date,
        end: Date,
        period_start: Date,
        period_end: Date,
    ) -> Decimal {
        let days_in_period = period_start.days_between(&period_end);
        if days_in_period == 0 {
            return Decimal::ZERO;
        }
        Decimal::from(start.days_between(&end)) / Decimal::from(days_in_period)
    }

    /// Calculates the year fraction given the coupon period dates.
    ///
    /// # Arguments
    ///
    /// * `start` - Accrual start date
    /// * `end` - Accrual end date
    /// * `period_start` - Start of the coupon period
    /// * `period_end` - End of the coupon period
    #[must_use]
    pub fn year_fraction_with_period(
        &self,
        start: Date,
        end: Date,
        period_start: Date,
        period_end: Date,
    ) -> Decimal {
        self.period_fraction(start, end, period_start, period_end)
            / Decimal::from(self.frequency.periods_per_year())
    }
}

impl Default for ActActIcma {
    fn default() -> Self {
        Self::new(Frequency::SemiAnnual)
    }
}

impl DayCount for ActActIcma {
    fn name(&self) -> &'static str {
        "ACT/ACT ICMA"
    }

    /// Uses the regular coupon period starting at `start` as the reference
    /// period.
    fn year_fraction(&self, start: Date, end: Date) -> Decimal {
        let months = self.frequency.months_per_period() as i32;
        match start.add_months(months) {
            Ok(period_end) => self.year_fraction_with_period(start, end, start, period_end),
            Err(_) => Decimal::from(start.days_between(&end)) / Decimal::from(365),
        }
    }

    fn day_count(&self, start: Date, end: Date) -> i64 {
        start.days_between(&end)
    }
}
