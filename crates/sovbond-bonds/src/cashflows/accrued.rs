//! Accrued interest calculations.
//!
//! Accrued interest is the share of the current coupon earned by the seller
//! up to settlement, apportioned on actual days over actual days in the
//! coupon period (actual/actual).
//!
//! During an ex-interest period the buyer does not receive the next coupon
//! and the accrued amount turns negative: the seller rebates the interest
//! for the days from settlement to the coupon date.

use rust_decimal::Decimal;

use sovbond_core::types::{Date, Frequency};

use crate::cashflows::CouponPeriod;
use crate::error::BondResult;
use crate::types::decimal_to_f64;

/// Calculator for accrued interest.
pub struct AccruedInterestCalculator;

impl AccruedInterestCalculator {
    /// Calculates standard accrued interest.
    ///
    /// `(days from period start to settlement / days in period)
    /// × (coupon_rate / frequency) × face_value`
    ///
    /// # Arguments
    ///
    /// * `period` - Coupon period containing settlement
    /// * `settlement` - Settlement date
    /// * `coupon_rate` - Annual coupon rate as decimal (e.g., 0.0425 for 4.25%)
    /// * `frequency` - Coupon frequency
    /// * `face_value` - Face value of the bond
    pub fn standard(
        period: &CouponPeriod,
        settlement: Date,
        coupon_rate: Decimal,
        frequency: Frequency,
        face_value: Decimal,
    ) -> BondResult<f64> {
        if coupon_rate.is_zero() {
            return Ok(0.0);
        }

        let period_coupon = period_coupon(coupon_rate, frequency, face_value)?;
        Ok(period_coupon * period.fraction_elapsed(settlement, frequency)?)
    }

    /// Calculates accrued interest honouring an ex-interest period.
    ///
    /// When settlement falls strictly after `period.end - ex_interest_days`,
    /// accrued interest is negative:
    /// `-(days from settlement to period end / days in period) × coupon`.
    /// Otherwise this is [`AccruedInterestCalculator::standard`].
    pub fn ex_interest(
        period: &CouponPeriod,
        settlement: Date,
        coupon_rate: Decimal,
        frequency: Frequency,
        face_value: Decimal,
        ex_interest_days: u32,
    ) -> BondResult<f64> {
        if !is_ex_interest(period, settlement, Some(ex_interest_days)) {
            return Self::standard(period, settlement, coupon_rate, frequency, face_value);
        }

        if coupon_rate.is_zero() {
            return Ok(0.0);
        }

        let period_coupon = period_coupon(coupon_rate, frequency, face_value)?;
        Ok(-period_coupon * period.fraction_remaining(settlement, frequency)?)
    }
}

/// Accrued interest for the period containing `settlement`.
///
/// Shorthand for [`AccruedInterestCalculator::standard`].
pub fn accrued_interest(
    period: &CouponPeriod,
    settlement: Date,
    coupon_rate: Decimal,
    frequency: Frequency,
    face_value: Decimal,
) -> BondResult<f64> {
    AccruedInterestCalculator::standard(period, settlement, coupon_rate, frequency, face_value)
}

/// Returns true if settlement is inside the ex-interest window before the
/// period's coupon date.
#[must_use]
pub fn is_ex_interest(
    period: &CouponPeriod,
    settlement: Date,
    ex_interest_days: Option<u32>,
) -> bool {
    match ex_interest_days {
        Some(days) => settlement > period.end.add_days(-i64::from(days)),
        None => false,
    }
}

fn period_coupon(
    coupon_rate: Decimal,
    frequency: Frequency,
    face_value: Decimal,
) -> BondResult<f64> {
    let rate = decimal_to_f64(coupon_rate, "coupon_rate")?;
    let face = decimal_to_f64(face_value, "face_value")?;
    Ok(rate / f64::from(frequency.periods_per_year()) * face)
}
