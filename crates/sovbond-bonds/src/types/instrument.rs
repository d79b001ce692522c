//! The priced instrument.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use sovbond_core::daycounts::DayCountConvention;
use sovbond_core::types::{Date, Frequency};

use crate::cashflows::{CashFlow, Schedule};
use crate::error::{BondError, BondResult};
use crate::pricing::{BondPricer, PriceResult};
use crate::types::PricingConventions;

/// Inflation adjustment inputs for a capital indexed bond.
///
/// The index ratio `current_index / base_index` scales the real (unindexed)
/// price and accrued interest into nominal terms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InflationAdjustment {
    /// Current index value (Kt), e.g. 116.69.
    pub current_index: Decimal,
    /// Base index value, e.g. 100.
    pub base_index: Decimal,
    /// Average annual inflation over the last two quarters, as a decimal
    /// fraction. When present, the dirty price is additionally scaled by
    /// `(1 + p)^(-a/b)` to project the index to the next coupon date.
    pub average_inflation: Option<Decimal>,
}

impl InflationAdjustment {
    /// Creates an inflation adjustment from its index components.
    ///
    /// # Errors
    ///
    /// Returns `BondError::InvalidInflationFactor` if either component is not
    /// positive.
    pub fn new(current_index: Decimal, base_index: Decimal) -> BondResult<Self> {
        let adjustment = Self {
            current_index,
            base_index,
            average_inflation: None,
        };
        adjustment.validate()?;
        Ok(adjustment)
    }

    /// Sets the average inflation rate used to project the index.
    #[must_use]
    pub fn with_average_inflation(mut self, rate: Decimal) -> Self {
        self.average_inflation = Some(rate);
        self
    }

    /// Checks both index components are positive.
    pub fn validate(&self) -> BondResult<()> {
        if self.current_index <= Decimal::ZERO || self.base_index <= Decimal::ZERO {
            return Err(BondError::InvalidInflationFactor {
                current: self.current_index,
                base: self.base_index,
            });
        }
        Ok(())
    }

    /// Returns `current_index / base_index`.
    pub fn index_ratio(&self) -> BondResult<f64> {
        self.validate()?;
        Ok(decimal_to_f64(self.current_index, "current_index")?
            / decimal_to_f64(self.base_index, "base_index")?)
    }
}

/// What kind of instrument is being priced.
///
/// Selects the pricing path: periodic compounding on nominal flows,
/// periodic compounding scaled by the index ratio, or simple-interest
/// discounting of a single redemption payment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum InstrumentKind {
    /// Nominal coupon bond.
    #[default]
    Nominal,
    /// Inflation-indexed (capital indexed) coupon bond.
    InflationIndexed(InflationAdjustment),
    /// Zero-coupon discount bill.
    DiscountBill,
}

impl InstrumentKind {
    /// Returns a short display name.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            InstrumentKind::Nominal => "Nominal Bond",
            InstrumentKind::InflationIndexed(_) => "Inflation-Indexed Bond",
            InstrumentKind::DiscountBill => "Discount Bill",
        }
    }
}

/// A single instrument to price, immutable once built.
///
/// # Example
///
/// ```rust
/// use sovbond_bonds::types::Instrument;
/// use sovbond_core::types::Date;
/// use rust_decimal_macros::dec;
///
/// let bond = Instrument::builder()
///     .settlement(Date::from_ymd(2022, 11, 22).unwrap())
///     .maturity(Date::from_ymd(2034, 5, 15).unwrap())
///     .coupon_rate(dec!(0.0425))
///     .yield_to_maturity(0.04355)
///     .build()
///     .unwrap();
///
/// let dirty = bond.calculate_dirty_price().unwrap();
/// assert!((dirty - 99.1405640616).abs() < 1e-9);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Instrument {
    settlement: Date,
    maturity: Date,
    coupon_rate: Decimal,
    yield_to_maturity: f64,
    frequency: Frequency,
    face_value: Decimal,
    kind: InstrumentKind,
    conventions: PricingConventions,
}

impl Instrument {
    /// Creates a new builder.
    #[must_use]
    pub fn builder() -> InstrumentBuilder {
        InstrumentBuilder::new()
    }

    /// Creates a semi-annual nominal bond with face value 100.
    pub fn nominal(
        settlement: Date,
        maturity: Date,
        coupon_rate: Decimal,
        yield_to_maturity: f64,
    ) -> BondResult<Self> {
        Self::builder()
            .settlement(settlement)
            .maturity(maturity)
            .coupon_rate(coupon_rate)
            .yield_to_maturity(yield_to_maturity)
            .build()
    }

    /// Creates a discount bill with face value 100.
    pub fn discount_bill(
        settlement: Date,
        maturity: Date,
        yield_to_maturity: f64,
    ) -> BondResult<Self> {
        Self::builder()
            .settlement(settlement)
            .maturity(maturity)
            .yield_to_maturity(yield_to_maturity)
            .frequency(Frequency::Annual)
            .discount_bill()
            .build()
    }

    /// Settlement date.
    #[must_use]
    pub fn settlement(&self) -> Date {
        self.settlement
    }

    /// Maturity date.
    #[must_use]
    pub fn maturity(&self) -> Date {
        self.maturity
    }

    /// Annual coupon rate as a decimal fraction.
    #[must_use]
    pub fn coupon_rate(&self) -> Decimal {
        self.coupon_rate
    }

    /// Yield to maturity as a decimal fraction.
    #[must_use]
    pub fn yield_to_maturity(&self) -> f64 {
        self.yield_to_maturity
    }

    /// Coupon frequency.
    #[must_use]
    pub fn frequency(&self) -> Frequency {
        self.frequency
    }

    /// Face value.
    #[must_use]
    pub fn face_value(&self) -> Decimal {
        self.face_value
    }

    /// Instrument kind.
    #[must_use]
    pub fn kind(&self) -> &InstrumentKind {
        &self.kind
    }

    /// Pricing conventions.
    #[must_use]
    pub fn conventions(&self) -> &PricingConventions {
        &self.conventions
    }

    /// Returns true for discount bills.
    #[must_use]
    pub fn is_discount_bill(&self) -> bool {
        matches!(self.kind, InstrumentKind::DiscountBill)
    }

    /// Returns the inflation adjustment for indexed bonds.
    #[must_use]
    pub fn inflation(&self) -> Option<&InflationAdjustment> {
        match &self.kind {
            InstrumentKind::InflationIndexed(adjustment) => Some(adjustment),
            _ => None,
        }
    }

    /// Day count convention used for the instrument's main discounting.
    ///
    /// Bills follow the money-market day count of their conventions; coupon
    /// bonds discount on fractions of actual coupon periods.
    #[must_use]
    pub fn day_count(&self) -> DayCountConvention {
        if self.is_discount_bill() {
            self.conventions.money_market_day_count
        } else {
            DayCountConvention::ActActIcma
        }
    }

    /// Coupon paid each period per `face_value`.
    pub fn coupon_per_period(&self) -> BondResult<f64> {
        let rate = decimal_to_f64(self.coupon_rate, "coupon_rate")?;
        let face = decimal_to_f64(self.face_value, "face_value")?;
        Ok(rate / f64::from(self.frequency.periods_per_year()) * face)
    }

    /// Returns a copy priced at a different yield.
    #[must_use]
    pub fn with_yield(&self, yield_to_maturity: f64) -> Self {
        Self {
            yield_to_maturity,
            ..self.clone()
        }
    }

    /// Returns a copy settling on a different date.
    ///
    /// # Errors
    ///
    /// Returns `BondError::InvalidDateRange` if the new settlement is not
    /// before maturity.
    pub fn with_settlement(&self, settlement: Date) -> BondResult<Self> {
        validate_dates(settlement, self.maturity)?;
        Ok(Self {
            settlement,
            ..self.clone()
        })
    }

    /// Builds the coupon schedule. `None` for discount bills.
    pub fn schedule(&self) -> BondResult<Option<Schedule>> {
        if self.is_discount_bill() {
            return Ok(None);
        }
        Schedule::generate(self.settlement, self.maturity, self.frequency).map(Some)
    }

    /// Prices the instrument.
    pub fn price(&self) -> BondResult<PriceResult> {
        BondPricer::price(self)
    }

    /// Dirty (settlement) price including accrued interest.
    pub fn calculate_dirty_price(&self) -> BondResult<f64> {
        Ok(self.price()?.dirty_price)
    }

    /// Clean price: dirty price minus accrued interest.
    pub fn calculate_clean_price(&self) -> BondResult<f64> {
        Ok(self.price()?.clean_price)
    }

    /// Accrued interest at settlement.
    pub fn calculate_accrued_interest(&self) -> BondResult<f64> {
        BondPricer::accrued_interest(self)
    }

    /// Future cash flows with their discount exponents.
    pub fn cash_flows(&self) -> BondResult<Vec<CashFlow>> {
        BondPricer::cash_flows(self)
    }
}

/// Builder for [`Instrument`].
///
/// Coupon rate defaults to 0, frequency to semi-annual, face value to 100 and
/// the kind to [`InstrumentKind::Nominal`].
#[derive(Debug, Clone, Default)]
pub struct InstrumentBuilder {
    settlement: Option<Date>,
    maturity: Option<Date>,
    coupon_rate: Option<Decimal>,
    yield_to_maturity: Option<f64>,
    payments_per_year: Option<u32>,
    face_value: Option<Decimal>,
    kind: InstrumentKind,
    conventions: Option<PricingConventions>,
}

impl InstrumentBuilder {
    /// Creates a new builder with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the settlement date.
    #[must_use]
    pub fn settlement(mut self, date: Date) -> Self {
        self.settlement = Some(date);
        self
    }

    /// Sets the maturity date.
    #[must_use]
    pub fn maturity(mut self, date: Date) -> Self {
        self.maturity = Some(date);
        self
    }

    /// Sets the annual coupon rate (decimal, e.g. 0.0425 for 4.25%).
    #[must_use]
    pub fn coupon_rate(mut self, rate: Decimal) -> Self {
        self.coupon_rate = Some(rate);
        self
    }

    /// Sets the yield to maturity (decimal, e.g. 0.04355 for 4.355%).
    #[must_use]
    pub fn yield_to_maturity(mut self, ytm: f64) -> Self {
        self.yield_to_maturity = Some(ytm);
        self
    }

    /// Sets the coupon frequency.
    #[must_use]
    pub fn frequency(mut self, freq: Frequency) -> Self {
        self.payments_per_year = Some(freq.periods_per_year());
        self
    }

    /// Sets the coupon frequency as payments per year; validated by `build`.
    #[must_use]
    pub fn payments_per_year(mut self, periods: u32) -> Self {
        self.payments_per_year = Some(periods);
        self
    }

    /// Sets the face value.
    #[must_use]
    pub fn face_value(mut self, value: Decimal) -> Self {
        self.face_value = Some(value);
        self
    }

    /// Marks the instrument as inflation-indexed.
    #[must_use]
    pub fn inflation(mut self, adjustment: InflationAdjustment) -> Self {
        self.kind = InstrumentKind::InflationIndexed(adjustment);
        self
    }

    /// Marks the instrument as a zero-coupon discount bill.
    #[must_use]
    pub fn discount_bill(mut self) -> Self {
        self.kind = InstrumentKind::DiscountBill;
        self
    }

    /// Sets the instrument kind directly.
    #[must_use]
    pub fn kind(mut self, kind: InstrumentKind) -> Self {
        self.kind = kind;
        self
    }

    /// Sets the pricing conventions.
    #[must_use]
    pub fn conventions(mut self, conventions: PricingConventions) -> Self {
        self.conventions = Some(conventions);
        self
    }

    /// Builds the `Instrument`.
    ///
    /// # Errors
    ///
    /// Returns an error if required fields are missing or values are invalid.
    pub fn build(self) -> BondResult<Instrument> {
        let settlement = self
            .settlement
            .ok_or_else(|| BondError::missing_field("settlement"))?;
        let maturity = self
            .maturity
            .ok_or_else(|| BondError::missing_field("maturity"))?;
        let yield_to_maturity = self
            .yield_to_maturity
            .ok_or_else(|| BondError::missing_field("yield_to_maturity"))?;

        validate_dates(settlement, maturity)?;
        let frequency = Frequency::from_periods(self.payments_per_year.unwrap_or(2))?;

        let coupon_rate = self.coupon_rate.unwrap_or(Decimal::ZERO);
        if coupon_rate < Decimal::ZERO {
            return Err(BondError::invalid_spec("coupon_rate cannot be negative"));
        }
        let face_value = self.face_value.unwrap_or(Decimal::ONE_HUNDRED);
        if face_value <= Decimal::ZERO {
            return Err(BondError::invalid_spec("face_value must be positive"));
        }
        if !yield_to_maturity.is_finite() {
            return Err(BondError::invalid_yield(yield_to_maturity, "yield must be finite"));
        }

        match &self.kind {
            InstrumentKind::InflationIndexed(adjustment) => adjustment.validate()?,
            InstrumentKind::DiscountBill if !coupon_rate.is_zero() => {
                return Err(BondError::invalid_spec("discount bills pay no coupon"));
            }
            _ => {}
        }

        Ok(Instrument {
            settlement,
            maturity,
            coupon_rate,
            yield_to_maturity,
            frequency,
            face_value,
            kind: self.kind,
            conventions: self.conventions.unwrap_or_default(),
        })
    }
}

fn validate_dates(settlement: Date, maturity: Date) -> BondResult<()> {
    if maturity <= settlement {
        return Err(BondError::InvalidDateRange {
            settlement,
            maturity,
        });
    }
    Ok(())
}

/// Converts a term-sheet decimal into the `f64` used by the price formula.
pub(crate) fn decimal_to_f64(value: Decimal, field: &str) -> BondResult<f64> {
    value
        .to_f64()
        .ok_or_else(|| BondError::invalid_spec(format!("{field} is not representable: {value}")))
}
