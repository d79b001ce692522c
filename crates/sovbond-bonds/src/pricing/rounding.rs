//! Explicit price rounding.
//!
//! Prices are computed unrounded in `f64`. Quoting them at an issuer's
//! precision is a separate step producing `Decimal`, rounded half away
//! from zero.

use rust_decimal::prelude::FromPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::error::{BondError, BondResult};
use crate::pricing::PriceResult;

/// Quoted precision presets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum PriceRounding {
    /// Three decimal places (e.g. 99.141).
    #[default]
    ThreeDecimals,
    /// Four decimal places (e.g. 99.1406).
    FourDecimals,
}

impl PriceRounding {
    /// Returns the number of decimal places for this preset.
    #[must_use]
    pub const fn decimal_places(&self) -> u32 {
        match self {
            PriceRounding::ThreeDecimals => 3,
            PriceRounding::FourDecimals => 4,
        }
    }

    /// Returns the preset quoting `places` decimal places, if there is one.
    #[must_use]
    pub const fn from_places(places: u32) -> Option<Self> {
        match places {
            3 => Some(PriceRounding::ThreeDecimals),
            4 => Some(PriceRounding::FourDecimals),
            _ => None,
        }
    }
}

/// Rounds a price to `places` decimal places, midpoint away from zero.
///
/// # Errors
///
/// Returns `BondError::InvalidSpec` if `value` is not finite.
pub fn round_price(value: f64, places: u32) -> BondResult<Decimal> {
    let decimal = Decimal::from_f64(value)
        .ok_or_else(|| BondError::invalid_spec(format!("price {value} cannot be rounded")))?;
    Ok(decimal.round_dp_with_strategy(places, RoundingStrategy::MidpointAwayFromZero))
}

/// A [`PriceResult`] rounded for quotation.
///
/// Each amount is rounded independently, so the rounded clean price may
/// differ from rounded dirty minus rounded accrued in the last place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundedPrice {
    /// Dirty price.
    pub dirty_price: Decimal,
    /// Clean price.
    pub clean_price: Decimal,
    /// Accrued interest.
    pub accrued_interest: Decimal,
    /// Decimal places applied.
    pub places: u32,
}

impl RoundedPrice {
    /// Rounds every amount of `result` to `places` decimal places.
    pub fn from_result(result: &PriceResult, places: u32) -> BondResult<Self> {
        Ok(Self {
            dirty_price: round_price(result.dirty_price, places)?,
            clean_price: round_price(result.clean_price, places)?,
            accrued_interest: round_price(result.accrued_interest, places)?,
            places,
        })
    }
}
