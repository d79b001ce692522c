//! Price command implementation.
//!
//! Prices a nominal bond, capital indexed bond or discount bill from its
//! yield to maturity.

use anyhow::Result;
use clap::Args;
use rust_decimal::Decimal;
use serde::Serialize;

use sovbond_bonds::pricing::PriceRounding;
use sovbond_bonds::types::Instrument;

use crate::cli::OutputFormat;
use crate::commands::{parse_rounding, InstrumentArgs};
use crate::config::Config;
use crate::output::{print_csv_record, print_header, print_json_record, print_output, KeyValue};

/// Arguments for the price command.
#[derive(Args, Debug)]
pub struct PriceArgs {
    #[command(flatten)]
    pub instrument: InstrumentArgs,

    /// Yield to maturity as a decimal fraction (e.g. 0.04355 for 4.355%)
    #[arg(short = 'y', long = "yield", allow_negative_numbers = true)]
    pub yield_to_maturity: f64,

    /// Decimal places for printed prices. Defaults to the configured
    /// decimal_precision.
    #[arg(long)]
    pub decimals: Option<u32>,

    /// Quoted precision preset: 3 or 4 decimal places
    #[arg(long, value_parser = parse_rounding, conflicts_with = "decimals")]
    pub rounding: Option<PriceRounding>,
}

/// Machine-readable price output.
#[derive(Debug, Serialize)]
pub struct PriceOutput {
    pub instrument: &'static str,
    pub settlement: String,
    pub maturity: String,
    pub coupon_rate: Decimal,
    pub frequency: u32,
    pub yield_to_maturity: f64,
    pub index_ratio: Option<f64>,
    pub dirty_price: Decimal,
    pub accrued_interest: Decimal,
    pub clean_price: Decimal,
}

/// Execute the price command.
pub fn execute(args: PriceArgs, format: OutputFormat, config: &Config) -> Result<()> {
    let bond: Instrument = args
        .instrument
        .builder(config)?
        .yield_to_maturity(args.yield_to_maturity)
        .build()?;
    let places = match (args.rounding, args.decimals) {
        (Some(preset), _) => preset.decimal_places(),
        (None, Some(places)) => places,
        (None, None) => config.decimal_precision(),
    };

    tracing::debug!(
        "pricing {} settling {} maturing {}",
        bond.kind().name(),
        bond.settlement(),
        bond.maturity()
    );
    let result = bond.price()?;
    let rounded = result.rounded(places)?;

    let output = PriceOutput {
        instrument: bond.kind().name(),
        settlement: bond.settlement().to_string(),
        maturity: bond.maturity().to_string(),
        coupon_rate: bond.coupon_rate(),
        frequency: bond.frequency().periods_per_year(),
        yield_to_maturity: bond.yield_to_maturity(),
        index_ratio: result.index_ratio,
        dirty_price: rounded.dirty_price,
        accrued_interest: rounded.accrued_interest,
        clean_price: rounded.clean_price,
    };

    match format {
        OutputFormat::Table => {
            let mut rows = vec![
                KeyValue::new("Instrument", output.instrument),
                KeyValue::new("Settlement", output.settlement.as_str()),
                KeyValue::new("Maturity", output.maturity.as_str()),
            ];
            if !bond.is_discount_bill() {
                rows.push(KeyValue::from_percent("Coupon", bond.coupon_rate()));
                rows.push(KeyValue::new("Frequency", bond.frequency().to_string()));
            }
            rows.push(KeyValue::from_rate("Yield", bond.yield_to_maturity()));
            if let Some(ratio) = result.index_ratio {
                rows.push(KeyValue::new("Index Ratio", format!("{ratio:.6}")));
            }
            rows.push(KeyValue::new("Dirty Price", output.dirty_price.to_string()));
            rows.push(KeyValue::new("Accrued Interest", output.accrued_interest.to_string()));
            rows.push(KeyValue::new("Clean Price", output.clean_price.to_string()));

            print_header("Bond Pricing Results");
            print_output(&rows, format)?;
        }
        OutputFormat::Json => print_json_record(&output)?,
        OutputFormat::Csv => print_csv_record(&output)?,
        OutputFormat::Minimal => println!("{}", output.dirty_price),
    }

    Ok(())
}
