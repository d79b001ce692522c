//! Coupon schedules, cash flows and accrued interest.
//!
//! - [`Schedule`]: coupon periods from settlement to maturity
//! - [`CashFlow`]: a payment with its discount exponent and discount factor
//! - [`AccruedInterestCalculator`]: accrued interest, including ex-interest

mod accrued;
mod schedule;

pub use accrued::{accrued_interest, is_ex_interest, AccruedInterestCalculator};
pub use schedule::{build_schedule, build_schedule_with_periods, CouponPeriod, Schedule};

use serde::{Deserialize, Serialize};

use sovbond_core::types::Date;

/// A future payment discounted to settlement.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CashFlow {
    /// Payment date.
    pub date: Date,
    /// Amount paid (coupon, or face value plus coupon at maturity).
    pub amount: f64,
    /// Time from settlement to payment in coupon periods, `k + a/b`.
    /// Fractional for the first flow; in years for discount bills.
    pub exponent: f64,
    /// Discount factor applied to `amount`.
    pub discount_factor: f64,
}

impl CashFlow {
    /// Creates a new cash flow.
    #[must_use]
    pub fn new(date: Date, amount: f64, exponent: f64, discount_factor: f64) -> Self {
        Self {
            date,
            amount,
            exponent,
            discount_factor,
        }
    }

    /// Present value at settlement.
    #[must_use]
    pub fn present_value(&self) -> f64 {
        self.amount * self.discount_factor
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_present_value() {
        let cf = CashFlow::new(Date::from_ymd(2023, 5, 15).unwrap(), 2.125, 0.96, 0.98);
        assert!((cf.present_value() - 2.0825).abs() < 1e-12);
    }
}
