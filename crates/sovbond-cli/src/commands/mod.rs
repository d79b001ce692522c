//! CLI command implementations.

pub mod config;
pub mod price;
pub mod yield_cmd;

pub use config::ConfigArgs;
pub use price::PriceArgs;
pub use yield_cmd::YieldArgs;

use std::str::FromStr;

use clap::Args;
use rust_decimal::Decimal;

use sovbond_bonds::pricing::PriceRounding;
use sovbond_bonds::types::{
    FinalPeriodDiscounting, InflationAdjustment, InstrumentBuilder, InstrumentKind,
};
use sovbond_core::types::{Date, Frequency};

use crate::config::Config;
use crate::error::{CliError, CliResult};

/// Instrument description shared by the `price` and `yield` commands.
#[derive(Args, Debug)]
pub struct InstrumentArgs {
    /// Settlement date (YYYY-MM-DD). Defaults to today.
    #[arg(short, long)]
    pub settle: Option<String>,

    /// Maturity date (YYYY-MM-DD)
    #[arg(short, long)]
    pub maturity: String,

    /// Annual coupon rate as a decimal fraction (e.g. 0.0425 for 4.25%)
    #[arg(short, long, default_value = "0")]
    pub coupon: String,

    /// Coupon payments per year: 1, 2 or 4. Defaults to the configured
    /// default_frequency.
    #[arg(long)]
    pub frequency: Option<u32>,

    /// Face value
    #[arg(long, default_value = "100")]
    pub face: String,

    /// Price as a zero-coupon discount bill
    #[arg(long, conflicts_with_all = ["index_ratio", "current_index", "average_inflation"])]
    pub bill: bool,

    /// Index ratio for a capital indexed bond: CURRENT/BASE (e.g. 116.69/100)
    /// or a plain ratio
    #[arg(long, conflicts_with = "current_index")]
    pub index_ratio: Option<String>,

    /// Current index value for a capital indexed bond
    #[arg(long, requires = "base_index")]
    pub current_index: Option<String>,

    /// Base index value for a capital indexed bond
    #[arg(long, requires = "current_index")]
    pub base_index: Option<String>,

    /// Average annual inflation as a decimal fraction, projecting the index to
    /// the next coupon
    #[arg(long)]
    pub average_inflation: Option<String>,

    /// Ex-interest days before each coupon date (0 disables the configured period)
    #[arg(long)]
    pub ex_interest_days: Option<u32>,

    /// Compound the final coupon period instead of using simple interest
    #[arg(long)]
    pub compound_final_period: bool,
}

impl InstrumentArgs {
    /// Validates the arguments into an instrument builder with no yield set.
    ///
    /// Flags override configured values.
    pub fn builder(&self, config: &Config) -> CliResult<InstrumentBuilder> {
        let settlement = match &self.settle {
            Some(s) => parse_date(s)?,
            None => today(),
        };
        let maturity = parse_date(&self.maturity)?;

        let mut conventions = config.conventions();
        if let Some(days) = self.ex_interest_days {
            conventions = conventions.with_ex_interest_days((days > 0).then_some(days));
        }
        if self.compound_final_period {
            conventions = conventions.with_final_period(FinalPeriodDiscounting::Compound);
        }

        let builder = InstrumentBuilder::new()
            .settlement(settlement)
            .maturity(maturity)
            .coupon_rate(parse_decimal("coupon", &self.coupon)?)
            .face_value(parse_decimal("face", &self.face)?)
            .conventions(conventions);

        if self.bill {
            return Ok(builder.frequency(Frequency::Annual).discount_bill());
        }

        let frequency = self.frequency.unwrap_or(config.default_frequency());
        Ok(builder.payments_per_year(frequency).kind(self.kind()?))
    }

    fn kind(&self) -> CliResult<InstrumentKind> {
        let (current, base) = match (&self.index_ratio, &self.current_index, &self.base_index) {
            (Some(ratio), _, _) => parse_index_ratio(ratio)?,
            (None, Some(current), Some(base)) => (
                parse_decimal("current index", current)?,
                parse_decimal("base index", base)?,
            ),
            (None, None, None) => {
                if self.average_inflation.is_some() {
                    return Err(CliError::MissingArgument(
                        "--index-ratio or --current-index/--base-index".into(),
                    ));
                }
                return Ok(InstrumentKind::Nominal);
            }
            _ => {
                return Err(CliError::MissingArgument(
                    "--current-index and --base-index".into(),
                ))
            }
        };

        let mut adjustment = InflationAdjustment {
            current_index: current,
            base_index: base,
            average_inflation: None,
        };
        if let Some(p) = &self.average_inflation {
            adjustment = adjustment.with_average_inflation(parse_decimal("average inflation", p)?);
        }
        Ok(InstrumentKind::InflationIndexed(adjustment))
    }
}

/// Parses a date string in YYYY-MM-DD format.
pub fn parse_date(s: &str) -> CliResult<Date> {
    Date::parse(s).map_err(|_| CliError::InvalidDate(s.to_string()))
}

/// Parses a decimal rate or amount.
pub fn parse_decimal(field: &'static str, value: &str) -> CliResult<Decimal> {
    Decimal::from_str(value.trim()).map_err(|_| CliError::InvalidNumber {
        field,
        value: value.to_string(),
    })
}

/// Parses `CURRENT/BASE` or a plain ratio (base 1).
pub fn parse_index_ratio(s: &str) -> CliResult<(Decimal, Decimal)> {
    let invalid = || CliError::InvalidIndexRatio(s.to_string());
    match s.split_once('/') {
        Some((current, base)) => Ok((
            Decimal::from_str(current.trim()).map_err(|_| invalid())?,
            Decimal::from_str(base.trim()).map_err(|_| invalid())?,
        )),
        None => Ok((Decimal::from_str(s.trim()).map_err(|_| invalid())?, Decimal::ONE)),
    }
}

/// Parses a quoted-precision preset: `3` or `4` decimal places.
pub fn parse_rounding(s: &str) -> Result<PriceRounding, String> {
    s.trim()
        .parse::<u32>()
        .ok()
        .and_then(PriceRounding::from_places)
        .ok_or_else(|| format!("expected 3 or 4 decimal places, got '{s}'"))
}

/// Validates a price value.
pub fn validate_price(price: f64) -> CliResult<f64> {
    if !price.is_finite() || price <= 0.0 {
        return Err(CliError::InvalidPrice(price));
    }
    Ok(price)
}

fn today() -> Date {
    Date::from(chrono::Local::now().date_naive())
}
