//! Bond pricing calculations.
//!
//! This module provides:
//! - [`BondPricer`]: prices nominal, inflation-indexed and discount-bill instruments
//! - [`PriceResult`]: dirty price, clean price and accrued interest
//! - [`round_price`] / [`PriceRounding`]: explicit rounding to a quoted precision
//! - [`YieldSearch`]: yield to maturity from a quoted price

mod rounding;
mod yield_search;

pub use rounding::{round_price, PriceRounding, RoundedPrice};
pub use yield_search::{yield_from_clean_price, yield_from_dirty_price, YieldResult, YieldSearch};

use serde::{Deserialize, Serialize};

use crate::cashflows::{is_ex_interest, AccruedInterestCalculator, CashFlow, Schedule};
use crate::error::{BondError, BondResult};
use crate::types::{decimal_to_f64, FinalPeriodDiscounting, Instrument, InstrumentKind};

/// Result of a bond pricing calculation.
///
/// All amounts are per the instrument's face value and unrounded.
/// `clean_price == dirty_price - accrued_interest` holds exactly.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceResult {
    /// Dirty price (including accrued interest).
    pub dirty_price: f64,
    /// Clean price (excluding accrued interest).
    pub clean_price: f64,
    /// Accrued interest; negative during an ex-interest period.
    pub accrued_interest: f64,
    /// Index ratio applied, for inflation-indexed bonds.
    pub index_ratio: Option<f64>,
}

impl PriceResult {
    /// Creates a result from a dirty price and accrued interest.
    #[must_use]
    pub fn new(dirty_price: f64, accrued_interest: f64, index_ratio: Option<f64>) -> Self {
        Self {
            dirty_price,
            clean_price: dirty_price - accrued_interest,
            accrued_interest,
            index_ratio,
        }
    }

    /// Rounds each amount independently to `places` decimal places.
    pub fn rounded(&self, places: u32) -> BondResult<RoundedPrice> {
        RoundedPrice::from_result(self, places)
    }
}

/// Bond pricing engine.
pub struct BondPricer;

impl BondPricer {
    /// Prices an instrument at its yield to maturity.
    ///
    /// # Errors
    ///
    /// - `BondError::InvalidYield` if the discount base is not positive
    /// - `BondError::InvalidInflationFactor` for a non-positive index
    /// - schedule errors propagate unchanged
    pub fn price(instrument: &Instrument) -> BondResult<PriceResult> {
        let flows = Self::cash_flows(instrument)?;
        let dirty_price: f64 = flows.iter().map(CashFlow::present_value).sum();
        let accrued = Self::accrued_interest(instrument)?;
        let index_ratio = match instrument.inflation() {
            Some(adjustment) => Some(adjustment.index_ratio()?),
            None => None,
        };

        let result = PriceResult::new(dirty_price, accrued, index_ratio);
        log::debug!(
            "{} {} -> {}: dirty {:.10} accrued {:.10} clean {:.10}",
            instrument.kind().name(),
            instrument.settlement(),
            instrument.maturity(),
            result.dirty_price,
            result.accrued_interest,
            result.clean_price
        );
        Ok(result)
    }

    /// Accrued interest at settlement, scaled by the index ratio for
    /// inflation-indexed bonds. Zero for discount bills.
    pub fn accrued_interest(instrument: &Instrument) -> BondResult<f64> {
        let ratio = match instrument.kind() {
            InstrumentKind::DiscountBill => return Ok(0.0),
            InstrumentKind::Nominal => 1.0,
            InstrumentKind::InflationIndexed(adjustment) => adjustment.index_ratio()?,
        };

        let schedule = coupon_schedule(instrument)?;
        let period = schedule.current_period();
        let real = match instrument.conventions().ex_interest_days {
            Some(days) => AccruedInterestCalculator::ex_interest(
                period,
                instrument.settlement(),
                instrument.coupon_rate(),
                instrument.frequency(),
                instrument.face_value(),
                days,
            )?,
            None => AccruedInterestCalculator::standard(
                period,
                instrument.settlement(),
                instrument.coupon_rate(),
                instrument.frequency(),
                instrument.face_value(),
            )?,
        };

        Ok(real * ratio)
    }

    /// Lowest yield the price formula accepts: prices exist only for yields
    /// strictly above this bound.
    ///
    /// Simple-interest discounting (bills and, by default, the final coupon
    /// period) needs `1 + y × t > 0`, so the bound is `-1/t`. Periodic
    /// compounding needs `1 + y/f > 0`, so the bound is `-f`.
    pub fn minimum_yield(instrument: &Instrument) -> BondResult<f64> {
        let periods_per_year = f64::from(instrument.frequency().periods_per_year());
        let t = match instrument.kind() {
            InstrumentKind::DiscountBill => Some(money_market_fraction(instrument)?),
            _ => {
                let schedule = coupon_schedule(instrument)?;
                let simple = instrument.conventions().final_period
                    == FinalPeriodDiscounting::SimpleInterest;
                (schedule.in_final_period() && simple)
                    .then(|| money_market_fraction(instrument))
                    .transpose()?
            }
        };

        Ok(match t {
            Some(t) if t > 0.0 => -1.0 / t,
            Some(_) => f64::NEG_INFINITY,
            None => -periods_per_year,
        })
    }

    /// Future cash flows, each carrying the discount factor that the dirty
    /// price applies to it. The present values sum to the dirty price.
    ///
    /// For inflation-indexed bonds the amounts are scaled by the index ratio
    /// and the discount factors include the average-inflation projection.
    pub fn cash_flows(instrument: &Instrument) -> BondResult<Vec<CashFlow>> {
        match instrument.kind() {
            InstrumentKind::DiscountBill => Ok(vec![bill_flow(instrument)?]),
            InstrumentKind::Nominal => coupon_flows(instrument, 1.0, None),
            InstrumentKind::InflationIndexed(adjustment) => {
                let average_inflation = adjustment
                    .average_inflation
                    .map(|p| decimal_to_f64(p, "average_inflation"))
                    .transpose()?;
                coupon_flows(instrument, adjustment.index_ratio()?, average_inflation)
            }
        }
    }
}

fn coupon_schedule(instrument: &Instrument) -> BondResult<Schedule> {
    Schedule::generate(
        instrument.settlement(),
        instrument.maturity(),
        instrument.frequency(),
    )
}

/// Year fraction from settlement to maturity under the money-market day
/// count of the instrument's conventions.
fn money_market_fraction(instrument: &Instrument) -> BondResult<f64> {
    let day_count = instrument
        .conventions()
        .money_market_day_count
        .to_day_count(instrument.frequency());
    let t = day_count.year_fraction(instrument.settlement(), instrument.maturity());
    decimal_to_f64(t, "money-market year fraction")
}

/// Single redemption payment discounted at simple interest.
fn bill_flow(instrument: &Instrument) -> BondResult<CashFlow> {
    let face = decimal_to_f64(instrument.face_value(), "face_value")?;
    let day_count = instrument.day_count().to_day_count(instrument.frequency());
    let t = money_market_fraction(instrument)?;
    let discount_factor = simple_discount_factor(instrument.yield_to_maturity(), t)?;

    log::debug!(
        "discount bill: {} days {}, t = {t:.10}",
        day_count.day_count(instrument.settlement(), instrument.maturity()),
        day_count.name()
    );
    Ok(CashFlow::new(instrument.maturity(), face, t, discount_factor))
}

/// Coupon flows for nominal and inflation-indexed bonds.
///
/// `ratio` scales every amount; `average_inflation` projects the index from
/// settlement to the next coupon date by `(1 + p)^(-a/b)`.
fn coupon_flows(
    instrument: &Instrument,
    ratio: f64,
    average_inflation: Option<f64>,
) -> BondResult<Vec<CashFlow>> {
    let settlement = instrument.settlement();
    let maturity = instrument.maturity();
    let conventions = instrument.conventions();
    let y = instrument.yield_to_maturity();

    let schedule = coupon_schedule(instrument)?;
    let fraction = schedule
        .current_period()
        .fraction_remaining(settlement, instrument.frequency())?;

    let coupon = instrument.coupon_per_period()? * ratio;
    let face = decimal_to_f64(instrument.face_value(), "face_value")? * ratio;
    let ex_interest = is_ex_interest(
        schedule.current_period(),
        settlement,
        conventions.ex_interest_days,
    );

    let projection = match average_inflation {
        Some(p) if 1.0 + p <= 0.0 => {
            return Err(BondError::invalid_spec(format!(
                "average_inflation must be greater than -1, got {p}"
            )));
        }
        Some(p) => (1.0 + p).powf(-fraction),
        None => 1.0,
    };

    let simple_final_period = schedule.in_final_period()
        && conventions.final_period == FinalPeriodDiscounting::SimpleInterest;
    if simple_final_period {
        let t = money_market_fraction(instrument)?;
        let discount_factor = simple_discount_factor(y, t)? * projection;
        let amount = if ex_interest { face } else { face + coupon };

        log::debug!(
            "final coupon period: simple interest over {} days (ex-interest: {ex_interest})",
            schedule.days_to_next_coupon()
        );
        return Ok(vec![CashFlow::new(maturity, amount, fraction, discount_factor)]);
    }

    let periods_per_year = f64::from(instrument.frequency().periods_per_year());
    let base = 1.0 + y / periods_per_year;
    if base <= 0.0 {
        return Err(BondError::invalid_yield(
            y,
            format!("1 + y/f = {base} must be positive"),
        ));
    }

    log::debug!(
        "compounding {} coupon(s) at {y}, a/b = {}/{} (ex-interest: {ex_interest})",
        schedule.remaining_coupons(),
        schedule.days_to_next_coupon(),
        schedule.days_in_current_period()
    );

    let mut flows = Vec::with_capacity(schedule.remaining_coupons());
    for (k, period) in schedule.iter().enumerate() {
        if k == 0 && ex_interest && period.end != maturity {
            continue;
        }
        let amount = match (period.end == maturity, k == 0 && ex_interest) {
            (true, true) => face,
            (true, false) => face + coupon,
            (false, _) => coupon,
        };
        let exponent = k as f64 + fraction;
        let discount_factor = base.powf(-exponent) * projection;
        log::trace!(
            "flow {} on {}: amount {:.10} exponent {:.10} df {:.12}",
            k,
            period.end,
            amount,
            exponent,
            discount_factor
        );
        flows.push(CashFlow::new(period.end, amount, exponent, discount_factor));
    }

    Ok(flows)
}

fn simple_discount_factor(y: f64, t: f64) -> BondResult<f64> {
    let base = 1.0 + y * t;
    if base <= 0.0 {
        return Err(BondError::invalid_yield(
            y,
            format!("1 + y*t = {base} must be positive"),
        ));
    }
    Ok(1.0 / base)
}
