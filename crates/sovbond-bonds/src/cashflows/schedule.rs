//! Coupon schedule construction.
//!
//! A sovereign bond's coupon calendar is reconstructed from its maturity
//! date alone: coupon dates fall every `12 / frequency` months counting back
//! from maturity. The schedule only covers the periods still relevant at
//! settlement, starting with the period that contains the settlement date.
//!
//! # Month-end rule
//!
//! Each coupon date is `maturity - k × months_per_period`, computed directly
//! from maturity with the day clamped to the target month's length. A May 31
//! maturity therefore produces Nov 30 and May 31 coupon dates; clamping never
//! compounds from one step to the next.
//!
//! # Example
//!
//! ```rust
//! use sovbond_bonds::cashflows::build_schedule;
//! use sovbond_core::types::{Date, Frequency};
//!
//! let schedule = build_schedule(
//!     Date::from_ymd(2022, 11, 22).unwrap(),
//!     Date::from_ymd(2034, 5, 15).unwrap(),
//!     Frequency::SemiAnnual,
//! )
//! .unwrap();
//!
//! let current = schedule.current_period();
//! assert_eq!(current.start, Date::from_ymd(2022, 11, 15).unwrap());
//! assert_eq!(current.end, Date::from_ymd(2023, 5, 15).unwrap());
//! assert_eq!(schedule.remaining_coupons(), 23);
//! ```

use serde::{Deserialize, Serialize};

use sovbond_core::daycounts::ActActIcma;
use sovbond_core::types::{Date, Frequency};

use crate::error::{BondError, BondResult};
use crate::types::decimal_to_f64;

/// One coupon period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CouponPeriod {
    /// Period start (previous coupon date).
    pub start: Date,
    /// Period end (coupon payment date).
    pub end: Date,
    /// Position counted from settlement; 0 is the period containing settlement.
    pub index: usize,
}

impl CouponPeriod {
    /// Actual days in the period.
    #[must_use]
    pub fn days(&self) -> i64 {
        self.start.days_between(&self.end)
    }

    /// Returns true if `date` falls in `[start, end)`.
    #[must_use]
    pub fn contains(&self, date: Date) -> bool {
        self.start <= date && date < self.end
    }

    /// Actual days from period start to `date`.
    #[must_use]
    pub fn days_elapsed(&self, date: Date) -> i64 {
        self.start.days_between(&date)
    }

    /// Actual days from `date` to period end.
    #[must_use]
    pub fn days_remaining(&self, date: Date) -> i64 {
        date.days_between(&self.end)
    }

    /// Fraction of the period elapsed from the period start to `date`,
    /// on an actual/actual ICMA basis.
    pub fn fraction_elapsed(&self, date: Date, frequency: Frequency) -> BondResult<f64> {
        let fraction =
            ActActIcma::new(frequency).period_fraction(self.start, date, self.start, self.end);
        decimal_to_f64(fraction, "elapsed period fraction")
    }

    /// Fraction of the period remaining from `date` to the period end, on an
    /// actual/actual ICMA basis. This is the fractional exponent `a/b` of the
    /// first discount period.
    pub fn fraction_remaining(&self, date: Date, frequency: Frequency) -> BondResult<f64> {
        let fraction =
            ActActIcma::new(frequency).period_fraction(date, self.end, self.start, self.end);
        decimal_to_f64(fraction, "remaining period fraction")
    }
}

/// The coupon periods between settlement and maturity.
///
/// Periods are contiguous, non-overlapping and in chronological order; the
/// first one contains the settlement date and the last one ends at maturity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schedule {
    periods: Vec<CouponPeriod>,
    settlement: Date,
    maturity: Date,
    frequency: Frequency,
}

impl Schedule {
    /// Generates the schedule by stepping backward from maturity.
    ///
    /// If settlement falls exactly on a coupon date, that date starts the
    /// first period.
    ///
    /// # Errors
    ///
    /// Returns `BondError::InvalidDateRange` if maturity is not after
    /// settlement.
    pub fn generate(settlement: Date, maturity: Date, frequency: Frequency) -> BondResult<Self> {
        if maturity <= settlement {
            return Err(BondError::InvalidDateRange {
                settlement,
                maturity,
            });
        }

        let months_per_period = frequency.months_per_period() as i32;
        let years = settlement.years_between(&maturity).max(0) as usize;
        let max_steps = frequency.periods_per_year() as usize * (years + 2);

        let mut dates = vec![maturity];
        let mut reached_settlement = false;
        for step in 1..=max_steps {
            let date = maturity.add_months(-months_per_period * step as i32)?;
            dates.push(date);
            if date <= settlement {
                reached_settlement = true;
                break;
            }
        }
        if !reached_settlement {
            return Err(BondError::invalid_spec(format!(
                "coupon schedule from {maturity} did not reach settlement {settlement} \
                 within {max_steps} periods"
            )));
        }
        dates.reverse();

        let periods: Vec<CouponPeriod> = dates
            .windows(2)
            .enumerate()
            .map(|(index, w)| CouponPeriod {
                start: w[0],
                end: w[1],
                index,
            })
            .collect();

        log::debug!(
            "built {} coupon period(s) for settlement {} maturity {} ({})",
            periods.len(),
            settlement,
            maturity,
            frequency
        );

        Ok(Self {
            periods,
            settlement,
            maturity,
            frequency,
        })
    }

    /// Returns all periods in chronological order.
    #[must_use]
    pub fn periods(&self) -> &[CouponPeriod] {
        &self.periods
    }

    /// Returns an iterator over the future coupon periods.
    pub fn iter(&self) -> impl Iterator<Item = &CouponPeriod> + '_ {
        self.periods.iter()
    }

    /// The period containing settlement.
    #[must_use]
    pub fn current_period(&self) -> &CouponPeriod {
        // generate() always produces at least one period
        &self.periods[0]
    }

    /// Coupon date on or before settlement that starts the current period.
    #[must_use]
    pub fn previous_coupon_date(&self) -> Date {
        self.current_period().start
    }

    /// First coupon date after settlement.
    #[must_use]
    pub fn next_coupon_date(&self) -> Date {
        self.current_period().end
    }

    /// Coupon payment dates after settlement, ending with maturity.
    #[must_use]
    pub fn coupon_dates(&self) -> Vec<Date> {
        self.periods.iter().map(|p| p.end).collect()
    }

    /// Number of coupons still to be paid, including the next one.
    #[must_use]
    pub fn remaining_coupons(&self) -> usize {
        self.periods.len()
    }

    /// Returns true if the next coupon is the maturity payment.
    #[must_use]
    pub fn in_final_period(&self) -> bool {
        self.periods.len() == 1
    }

    /// Actual days from settlement to the next coupon date.
    #[must_use]
    pub fn days_to_next_coupon(&self) -> i64 {
        self.current_period().days_remaining(self.settlement)
    }

    /// Actual days in the current coupon period.
    #[must_use]
    pub fn days_in_current_period(&self) -> i64 {
        self.current_period().days()
    }

    /// Settlement date the schedule was built for.
    #[must_use]
    pub fn settlement(&self) -> Date {
        self.settlement
    }

    /// Maturity date.
    #[must_use]
    pub fn maturity(&self) -> Date {
        self.maturity
    }

    /// Coupon frequency.
    #[must_use]
    pub fn frequency(&self) -> Frequency {
        self.frequency
    }
}

/// Builds the coupon schedule for a bond settling on `settlement`.
///
/// Frequencies arrive already validated as [`Frequency`]; use
/// [`build_schedule_with_periods`] to validate a raw payments-per-year count.
pub fn build_schedule(
    settlement: Date,
    maturity: Date,
    frequency: Frequency,
) -> BondResult<Schedule> {
    Schedule::generate(settlement, maturity, frequency)
}

/// Builds the coupon schedule from a raw payments-per-year count.
///
/// # Errors
///
/// Returns `BondError::UnsupportedFrequency` unless `periods` is 1, 2 or 4,
/// and `BondError::InvalidDateRange` if maturity is not after settlement.
pub fn build_schedule_with_periods(
    settlement: Date,
    maturity: Date,
    periods: u32,
) -> BondResult<Schedule> {
    let frequency = Frequency::from_periods(periods)?;
    Schedule::generate(settlement, maturity, frequency)
}
