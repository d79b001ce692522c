//! Yield to maturity from a quoted price.
//!
//! The dirty price is strictly decreasing in yield, so bisection over a
//! bracket always converges once the target price is bracketed.
//!
//! The lower end of the bracket is raised to just above the lowest yield the
//! price formula accepts for the instrument. A three-year bill, for example,
//! has no price at `y = -0.5` because `1 + y × t` is negative there.

use serde::{Deserialize, Serialize};

use crate::error::{BondError, BondResult};
use crate::pricing::BondPricer;
use crate::types::Instrument;

/// Relative distance kept from the instrument's minimum yield.
const DOMAIN_MARGIN: f64 = 1e-9;

/// Result of a yield search.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct YieldResult {
    /// Yield to maturity as a decimal fraction.
    pub yield_to_maturity: f64,
    /// Bisection iterations used.
    pub iterations: u32,
    /// Dirty price at the solved yield minus the target.
    pub residual: f64,
}

/// Bisection settings for the yield search.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct YieldSearch {
    /// Lowest yield tried.
    pub lower: f64,
    /// Highest yield tried.
    pub upper: f64,
    /// Convergence tolerance on both yield and price.
    pub tolerance: f64,
    /// Maximum bisection iterations.
    pub max_iterations: u32,
}

impl Default for YieldSearch {
    fn default() -> Self {
        Self {
            lower: -0.5,
            upper: 1.0,
            tolerance: 1e-12,
            max_iterations: 200,
        }
    }
}

impl YieldSearch {
    /// Creates a search over `[lower, upper]` with default tolerance.
    #[must_use]
    pub fn new(lower: f64, upper: f64) -> Self {
        Self {
            lower: lower.min(upper),
            upper: lower.max(upper),
            ..Self::default()
        }
    }

    /// Sets the convergence tolerance.
    #[must_use]
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Sets the iteration limit.
    #[must_use]
    pub fn with_max_iterations(mut self, max_iterations: u32) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Clamps the bracket to the yields `instrument` can be priced at.
    fn bracket(&self, instrument: &Instrument) -> BondResult<(f64, f64)> {
        let minimum = BondPricer::minimum_yield(instrument)?;
        let lower = if minimum.is_finite() {
            self.lower.max(minimum + minimum.abs().max(1.0) * DOMAIN_MARGIN)
        } else {
            self.lower
        };
        if lower >= self.upper {
            return Err(BondError::YieldNotBracketed {
                lower,
                upper: self.upper,
            });
        }
        if lower > self.lower {
            log::debug!("yield search lower bound raised from {} to {lower}", self.lower);
        }
        Ok((lower, self.upper))
    }

    /// Finds the yield at which the instrument's dirty price equals `target`.
    ///
    /// The instrument's own yield is ignored.
    ///
    /// # Errors
    ///
    /// - `BondError::YieldNotBracketed` if `target` lies outside the prices at
    ///   the bracket ends
    /// - `BondError::YieldConvergenceFailed` if the iteration limit is hit
    /// - pricing errors at the bracket ends propagate unchanged
    pub fn solve_dirty(&self, instrument: &Instrument, target: f64) -> BondResult<YieldResult> {
        let objective = |y: f64| -> BondResult<f64> {
            let price = BondPricer::price(&instrument.with_yield(y))?;
            Ok(price.dirty_price - target)
        };

        let (mut lo, mut hi) = self.bracket(instrument)?;
        let f_lo = objective(lo)?;
        let f_hi = objective(hi)?;

        if f_lo * f_hi > 0.0 {
            return Err(BondError::YieldNotBracketed {
                lower: lo,
                upper: hi,
            });
        }

        if f_lo.abs() < self.tolerance {
            return Ok(YieldResult {
                yield_to_maturity: lo,
                iterations: 0,
                residual: f_lo,
            });
        }
        if f_hi.abs() < self.tolerance {
            return Ok(YieldResult {
                yield_to_maturity: hi,
                iterations: 0,
                residual: f_hi,
            });
        }

        let mut f_lo = f_lo;
        for iteration in 0..self.max_iterations {
            let mid = (lo + hi) / 2.0;
            let f_mid = objective(mid)?;

            if f_mid.abs() < self.tolerance || (hi - lo) / 2.0 < self.tolerance {
                log::debug!(
                    "yield search converged to {mid} after {} iteration(s)",
                    iteration + 1
                );
                return Ok(YieldResult {
                    yield_to_maturity: mid,
                    iterations: iteration + 1,
                    residual: f_mid,
                });
            }

            if f_mid * f_lo < 0.0 {
                hi = mid;
            } else {
                lo = mid;
                f_lo = f_mid;
            }
        }

        Err(BondError::YieldConvergenceFailed {
            iterations: self.max_iterations,
        })
    }

    /// Finds the yield from a clean price.
    ///
    /// Accrued interest does not depend on yield, so the target dirty price
    /// is `clean + accrued`.
    pub fn solve_clean(
        &self,
        instrument: &Instrument,
        clean_price: f64,
    ) -> BondResult<YieldResult> {
        let accrued = BondPricer::accrued_interest(instrument)?;
        self.solve_dirty(instrument, clean_price + accrued)
    }
}

/// Yield to maturity from a dirty price, using the default search bracket.
pub fn yield_from_dirty_price(
    instrument: &Instrument,
    dirty_price: f64,
) -> BondResult<YieldResult> {
    YieldSearch::default().solve_dirty(instrument, dirty_price)
}

/// Yield to maturity from a clean price, using the default search bracket.
pub fn yield_from_clean_price(
    instrument: &Instrument,
    clean_price: f64,
) -> BondResult<YieldResult> {
    YieldSearch::default().solve_clean(instrument, clean_price)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use rust_decimal_macros::dec;
    use sovbond_core::types::Date;

    fn date(y: i32, m: u32, d: u32) -> Date {
        Date::from_ymd(y, m, d).unwrap()
    }

    fn nominal_bond() -> Instrument {
        Instrument::nominal(date(2022, 11, 22), date(2034, 5, 15), dec!(0.0425), 0.04355)
            .unwrap()
    }

    #[test]
    fn test_recovers_yield_from_dirty_price() {
        let bond = nominal_bond();
        let dirty = bond.calculate_dirty_price().unwrap();

        let result = yield_from_dirty_price(&bond.with_yield(0.10), dirty).unwrap();
        assert_abs_diff_eq!(result.yield_to_maturity, 0.04355, epsilon = 1e-9);
        assert!(result.iterations > 0);
    }

    #[test]
    fn test_recovers_yield_from_clean_price() {
        let bond = nominal_bond();
        let clean = bond.calculate_clean_price().unwrap();

        let result = yield_from_clean_price(&bond, clean).unwrap();
        assert_abs_diff_eq!(result.yield_to_maturity, 0.04355, epsilon = 1e-9);
    }

    #[test]
    fn test_bill_yield() {
        let bill = Instrument::discount_bill(date(2023, 9, 26), date(2024, 7, 31), 0.0).unwrap();
        let result = yield_from_dirty_price(&bill, 95.939_019_582_073_85).unwrap();
        assert_abs_diff_eq!(result.yield_to_maturity, 0.05, epsilon = 1e-9);
    }

    #[test]
    fn test_multi_year_bill_yield() {
        let bill = Instrument::discount_bill(date(2023, 9, 26), date(2026, 9, 26), 0.05).unwrap();
        let dirty = bill.calculate_dirty_price().unwrap();

        let result = yield_from_dirty_price(&bill.with_yield(0.0), dirty).unwrap();
        assert_abs_diff_eq!(result.yield_to_maturity, 0.05, epsilon = 1e-9);
    }

    #[test]
    fn test_multi_year_bill_deeply_negative_yield() {
        // -0.30 lies inside the default bracket but close to the -1/t bound.
        let bill = Instrument::discount_bill(date(2023, 9, 26), date(2026, 9, 26), -0.30).unwrap();
        let dirty = bill.calculate_dirty_price().unwrap();

        let result = yield_from_dirty_price(&bill, dirty).unwrap();
        assert_abs_diff_eq!(result.yield_to_maturity, -0.30, epsilon = 1e-9);
    }

    #[test]
    fn test_bracket_entirely_below_domain() {
        let bill = Instrument::discount_bill(date(2023, 9, 26), date(2026, 9, 26), 0.05).unwrap();
        let result = YieldSearch::new(-0.9, -0.5).solve_dirty(&bill, 90.0);
        assert!(matches!(result, Err(BondError::YieldNotBracketed { .. })));
    }

    #[test]
    fn test_target_outside_bracket() {
        let bond = nominal_bond();
        let result = YieldSearch::new(0.0, 0.10).solve_dirty(&bond, 500.0);
        assert!(matches!(result, Err(BondError::YieldNotBracketed { .. })));
    }

    #[test]
    fn test_iteration_limit() {
        let bond = nominal_bond();
        let result = YieldSearch::default()
            .with_max_iterations(3)
            .solve_dirty(&bond, 99.140_564_061_635_56);
        assert_eq!(result, Err(BondError::YieldConvergenceFailed { iterations: 3 }));
    }

    #[test]
    fn test_bracket_order_normalised() {
        let search = YieldSearch::new(0.2, -0.1);
        assert_eq!(search.lower, -0.1);
        assert_eq!(search.upper, 0.2);
    }
}
