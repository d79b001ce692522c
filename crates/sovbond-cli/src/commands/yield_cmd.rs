//! Yield command implementation.
//!
//! Solves for yield to maturity from a quoted dirty or clean price.

use anyhow::Result;
use clap::Args;
use serde::Serialize;

use sovbond_bonds::pricing::{round_price, yield_from_clean_price, yield_from_dirty_price};

use crate::cli::OutputFormat;
use crate::commands::{validate_price, InstrumentArgs};
use crate::config::Config;
use crate::output::{print_csv_record, print_header, print_json_record, print_output, KeyValue};

/// Arguments for the yield command.
#[derive(Args, Debug)]
pub struct YieldArgs {
    #[command(flatten)]
    pub instrument: InstrumentArgs,

    /// Dirty (settlement) price
    #[arg(long, group = "target_price", required_unless_present = "clean_price")]
    pub dirty_price: Option<f64>,

    /// Clean price; accrued interest is added to get the dirty price
    #[arg(long, group = "target_price")]
    pub clean_price: Option<f64>,
}

/// Machine-readable yield output.
#[derive(Debug, Serialize)]
pub struct YieldOutput {
    pub instrument: &'static str,
    pub settlement: String,
    pub maturity: String,
    pub yield_to_maturity: f64,
    pub dirty_price: f64,
    pub clean_price: f64,
    pub accrued_interest: f64,
    pub iterations: u32,
}

/// Execute the yield command.
pub fn execute(args: YieldArgs, format: OutputFormat, config: &Config) -> Result<()> {
    // The instrument's own yield is ignored by the search.
    let bond = args
        .instrument
        .builder(config)?
        .yield_to_maturity(0.0)
        .build()?;

    let solved = match (args.dirty_price, args.clean_price) {
        (Some(dirty), _) => yield_from_dirty_price(&bond, validate_price(dirty)?)?,
        (None, Some(clean)) => yield_from_clean_price(&bond, validate_price(clean)?)?,
        (None, None) => anyhow::bail!("either --dirty-price or --clean-price is required"),
    };

    let result = bond.with_yield(solved.yield_to_maturity).price()?;
    tracing::debug!(
        "solved yield {} in {} iteration(s)",
        solved.yield_to_maturity,
        solved.iterations
    );

    let output = YieldOutput {
        instrument: bond.kind().name(),
        settlement: bond.settlement().to_string(),
        maturity: bond.maturity().to_string(),
        yield_to_maturity: solved.yield_to_maturity,
        dirty_price: result.dirty_price,
        clean_price: result.clean_price,
        accrued_interest: result.accrued_interest,
        iterations: solved.iterations,
    };

    match format {
        OutputFormat::Table => {
            let places = config.decimal_precision();
            let rows = vec![
                KeyValue::new("Instrument", output.instrument),
                KeyValue::new("Settlement", output.settlement.as_str()),
                KeyValue::new("Maturity", output.maturity.as_str()),
                KeyValue::new(
                    "Dirty Price",
                    round_price(output.dirty_price, places)?.to_string(),
                ),
                KeyValue::new(
                    "Accrued Interest",
                    round_price(output.accrued_interest, places)?.to_string(),
                ),
                KeyValue::new(
                    "Clean Price",
                    round_price(output.clean_price, places)?.to_string(),
                ),
                KeyValue::from_rate("Yield to Maturity", output.yield_to_maturity),
                KeyValue::new("Iterations", output.iterations.to_string()),
            ];

            print_header("Yield Results");
            print_output(&rows, format)?;
        }
        OutputFormat::Json => print_json_record(&output)?,
        OutputFormat::Csv => print_csv_record(&output)?,
        OutputFormat::Minimal => println!("{:.10}", output.yield_to_maturity),
    }

    Ok(())
}
