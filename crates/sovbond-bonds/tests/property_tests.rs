//! Property-based tests for pricing invariants.
//!
//! These tests verify properties that should hold for any valid instrument:
//! - Clean price = dirty price - accrued interest
//! - Accrued interest never decreases within a coupon period
//! - Dirty price is strictly decreasing in yield
//! - Discount bills carry no accrued interest
//! - A bond one day from maturity prices close to face plus coupon

use proptest::prelude::*;
use rust_decimal::Decimal;
use sovbond_bonds::prelude::*;
use sovbond_core::types::{Date, Frequency};

// =============================================================================
// STRATEGIES
// =============================================================================

fn settlement_strategy() -> impl Strategy<Value = Date> {
    (0i64..10_000).prop_map(|offset| Date::from_ymd(2000, 1, 1).unwrap().add_days(offset))
}

fn frequency_strategy() -> impl Strategy<Value = Frequency> {
    prop_oneof![
        Just(Frequency::Annual),
        Just(Frequency::SemiAnnual),
        Just(Frequency::Quarterly),
    ]
}

/// Coupon rate in basis points, 0% to 15%.
fn coupon_strategy() -> impl Strategy<Value = Decimal> {
    (0i64..1_500).prop_map(|bp| Decimal::new(bp, 4))
}

fn yield_strategy() -> impl Strategy<Value = f64> {
    -0.02f64..0.20
}

fn nominal_bond(
    settlement: Date,
    term_days: i64,
    coupon_rate: Decimal,
    yield_to_maturity: f64,
    frequency: Frequency,
) -> Instrument {
    Instrument::builder()
        .settlement(settlement)
        .maturity(settlement.add_days(term_days))
        .coupon_rate(coupon_rate)
        .yield_to_maturity(yield_to_maturity)
        .frequency(frequency)
        .build()
        .unwrap()
}

// =============================================================================
// PROPERTIES
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn prop_clean_is_dirty_minus_accrued(
        settlement in settlement_strategy(),
        term_days in 1i64..11_000,
        coupon_rate in coupon_strategy(),
        ytm in yield_strategy(),
        frequency in frequency_strategy(),
        ex_interest_days in prop::option::of(1u32..15),
    ) {
        let bond = Instrument::builder()
            .settlement(settlement)
            .maturity(settlement.add_days(term_days))
            .coupon_rate(coupon_rate)
            .yield_to_maturity(ytm)
            .frequency(frequency)
            .conventions(PricingConventions::default().with_ex_interest_days(ex_interest_days))
            .build()
            .unwrap();

        let result = bond.price().unwrap();
        prop_assert_eq!(result.clean_price, result.dirty_price - result.accrued_interest);
        prop_assert!(result.dirty_price.is_finite());
    }

    #[test]
    fn prop_accrued_monotonic_within_period(
        settlement in settlement_strategy(),
        term_days in 200i64..11_000,
        coupon_rate in coupon_strategy(),
        frequency in frequency_strategy(),
    ) {
        let bond = nominal_bond(settlement, term_days, coupon_rate, 0.04, frequency);
        let schedule = bond.schedule().unwrap().unwrap();
        let period = *schedule.current_period();

        let mut previous = f64::NEG_INFINITY;
        let mut date = period.start;
        while date < period.end && date < bond.maturity() {
            let accrued = bond
                .with_settlement(date)
                .unwrap()
                .calculate_accrued_interest()
                .unwrap();
            prop_assert!(
                accrued >= previous,
                "accrued fell from {} to {} on {}",
                previous,
                accrued,
                date
            );
            prop_assert!(accrued >= 0.0);
            previous = accrued;
            date = date.add_days(7);
        }
    }

    #[test]
    fn prop_dirty_price_decreasing_in_yield(
        settlement in settlement_strategy(),
        term_days in 1i64..11_000,
        coupon_rate in coupon_strategy(),
        ytm in yield_strategy(),
        bump_bp in 1u32..200,
        frequency in frequency_strategy(),
    ) {
        let low = nominal_bond(settlement, term_days, coupon_rate, ytm, frequency);
        let high = low.with_yield(ytm + f64::from(bump_bp) / 10_000.0);

        let p_low = low.calculate_dirty_price().unwrap();
        let p_high = high.calculate_dirty_price().unwrap();
        prop_assert!(p_high < p_low, "price rose from {} to {} as yield increased", p_low, p_high);
    }

    #[test]
    fn prop_bill_dirty_equals_clean(
        settlement in settlement_strategy(),
        term_days in 1i64..366,
        ytm in yield_strategy(),
    ) {
        let bill =
            Instrument::discount_bill(settlement, settlement.add_days(term_days), ytm).unwrap();
        let result = bill.price().unwrap();

        prop_assert_eq!(result.accrued_interest, 0.0);
        prop_assert_eq!(result.dirty_price, result.clean_price);
        prop_assert!(result.dirty_price > 0.0);
        if ytm > 1e-6 {
            prop_assert!(result.dirty_price < 100.0);
        }
    }

    #[test]
    fn prop_one_day_before_maturity_near_redemption(
        maturity in settlement_strategy(),
        coupon_rate in coupon_strategy(),
        ytm in 0.0f64..0.20,
        frequency in frequency_strategy(),
    ) {
        let settlement = maturity.add_days(-1);
        let bond = nominal_bond(settlement, 1, coupon_rate, ytm, frequency);
        let dirty = bond.calculate_dirty_price().unwrap();

        let coupon = bond.coupon_per_period().unwrap();
        let redemption = 100.0 + coupon;
        prop_assert!(dirty <= redemption + 1e-12);
        prop_assert!(
            redemption - dirty < 0.07,
            "dirty {} too far from redemption {}",
            dirty,
            redemption
        );
    }
}
