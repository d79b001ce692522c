//! Integration tests reconciled against issuer reference prices.
//!
//! The fixture holds the issuer's published worked examples: a semi-annual
//! nominal bond, a nominal bond in its final coupon period, a quarterly
//! capital indexed bond with and without an ex-interest settlement, and a
//! discount bill.

use std::str::FromStr;

use approx::assert_abs_diff_eq;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Deserialize;
use sovbond_bonds::prelude::*;
use sovbond_core::types::{Date, Frequency};

const REFERENCE_FIXTURE: &str = include_str!("fixtures/issuer_reference.json");

const TOLERANCE: f64 = 1e-9;

// ============================================================================
// Fixture structures
// ============================================================================

#[derive(Debug, Deserialize)]
struct Fixture {
    #[allow(dead_code)]
    source: String,
    cases: Vec<ReferenceCase>,
}

#[derive(Debug, Deserialize)]
struct ReferenceCase {
    name: String,
    kind: String,
    settlement: String,
    maturity: String,
    coupon_rate: String,
    #[serde(rename = "yield")]
    yield_to_maturity: f64,
    frequency: u32,
    current_index: Option<String>,
    base_index: Option<String>,
    average_inflation: Option<String>,
    ex_interest_days: Option<u32>,
    expected: Expected,
}

#[derive(Debug, Deserialize)]
struct Expected {
    dirty_price: f64,
    accrued_interest: f64,
    clean_price: f64,
}

fn decimal(value: &str) -> Decimal {
    Decimal::from_str(value).unwrap()
}

impl ReferenceCase {
    fn instrument(&self) -> Instrument {
        let mut builder = Instrument::builder()
            .settlement(Date::parse(&self.settlement).unwrap())
            .maturity(Date::parse(&self.maturity).unwrap())
            .coupon_rate(decimal(&self.coupon_rate))
            .yield_to_maturity(self.yield_to_maturity)
            .payments_per_year(self.frequency)
            .conventions(
                PricingConventions::default().with_ex_interest_days(self.ex_interest_days),
            );

        builder = match self.kind.as_str() {
            "nominal" => builder,
            "bill" => builder.discount_bill(),
            "indexed" => {
                let mut adjustment = InflationAdjustment::new(
                    decimal(self.current_index.as_deref().unwrap()),
                    decimal(self.base_index.as_deref().unwrap()),
                )
                .unwrap();
                if let Some(p) = &self.average_inflation {
                    adjustment = adjustment.with_average_inflation(decimal(p));
                }
                builder.inflation(adjustment)
            }
            other => panic!("unknown instrument kind in fixture: {other}"),
        };

        builder.build().unwrap()
    }
}

fn load_cases() -> Vec<ReferenceCase> {
    let fixture: Fixture = serde_json::from_str(REFERENCE_FIXTURE).unwrap();
    fixture.cases
}

// ============================================================================
// Reference prices
// ============================================================================

#[test]
fn test_issuer_reference_prices() {
    let cases = load_cases();
    assert_eq!(cases.len(), 5);

    for case in &cases {
        let result = case.instrument().price().unwrap();

        assert!(
            (result.dirty_price - case.expected.dirty_price).abs() < TOLERANCE,
            "{}: dirty {} vs expected {}",
            case.name,
            result.dirty_price,
            case.expected.dirty_price
        );
        assert!(
            (result.accrued_interest - case.expected.accrued_interest).abs() < TOLERANCE,
            "{}: accrued {} vs expected {}",
            case.name,
            result.accrued_interest,
            case.expected.accrued_interest
        );
        assert!(
            (result.clean_price - case.expected.clean_price).abs() < TOLERANCE,
            "{}: clean {} vs expected {}",
            case.name,
            result.clean_price,
            case.expected.clean_price
        );
    }
}

#[test]
fn test_convenience_accessors_agree_with_price() {
    for case in &load_cases() {
        let instrument = case.instrument();
        let result = instrument.price().unwrap();

        assert_eq!(instrument.calculate_dirty_price().unwrap(), result.dirty_price);
        assert_eq!(instrument.calculate_clean_price().unwrap(), result.clean_price);
        assert_eq!(
            instrument.calculate_accrued_interest().unwrap(),
            result.accrued_interest
        );
    }
}

#[test]
fn test_yield_round_trip_on_reference_cases() {
    for case in &load_cases() {
        let instrument = case.instrument();
        let solved = yield_from_dirty_price(&instrument, case.expected.dirty_price).unwrap();

        assert_abs_diff_eq!(
            solved.yield_to_maturity,
            case.yield_to_maturity,
            epsilon = 1e-8
        );
    }
}

#[test]
fn test_quoted_prices() {
    let cases = load_cases();
    let bill = cases.iter().find(|c| c.name == "discount_bill").unwrap();
    let quoted = bill.instrument().price().unwrap().rounded(3).unwrap();
    assert_eq!(quoted.dirty_price, dec!(95.939));

    let nominal = cases.iter().find(|c| c.name == "nominal_semiannual").unwrap();
    let quoted = nominal
        .instrument()
        .price()
        .unwrap()
        .rounded(PriceRounding::FourDecimals.decimal_places())
        .unwrap();
    assert_eq!(quoted.clean_price, dec!(99.0584));
}

// ============================================================================
// Invalid input
// ============================================================================

#[test]
fn test_maturity_before_settlement() {
    let result = Instrument::discount_bill(
        Date::from_ymd(2024, 7, 31).unwrap(),
        Date::from_ymd(2023, 9, 26).unwrap(),
        0.05,
    );
    assert!(matches!(result, Err(BondError::InvalidDateRange { .. })));
}

#[test]
fn test_unsupported_frequency() {
    let result = Instrument::builder()
        .settlement(Date::from_ymd(2022, 11, 22).unwrap())
        .maturity(Date::from_ymd(2034, 5, 15).unwrap())
        .coupon_rate(dec!(0.0425))
        .yield_to_maturity(0.04355)
        .payments_per_year(3)
        .build();
    assert_eq!(result, Err(BondError::UnsupportedFrequency { periods: 3 }));

    let schedule = build_schedule(
        Date::from_ymd(2034, 5, 15).unwrap(),
        Date::from_ymd(2022, 11, 22).unwrap(),
        Frequency::SemiAnnual,
    );
    assert!(matches!(schedule, Err(BondError::InvalidDateRange { .. })));
}
