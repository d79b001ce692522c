//! Sovbond CLI - sovereign bond price calculator.
//!
//! # Usage
//!
//! ```bash
//! # Price a nominal bond
//! sovbond price --settle 2022-11-22 --maturity 2034-05-15 --coupon 0.0425 --yield 0.04355
//!
//! # Price a capital indexed bond
//! sovbond price --settle 2022-08-31 --maturity 2035-09-20 --coupon 0.025 --yield 0.0219 \
//!     --frequency 4 --index-ratio 116.69/100 --average-inflation 0.0163
//!
//! # Price a discount bill
//! sovbond price --settle 2023-09-26 --maturity 2024-07-31 --yield 0.05 --bill
//!
//! # Yield from a clean price
//! sovbond yield --settle 2022-11-22 --maturity 2034-05-15 --coupon 0.0425 --clean-price 99.0584
//! ```

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod cli;
mod commands;
mod config;
mod error;
mod output;

use cli::{Cli, Commands};
use config::Config;

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let config = Config::load()?;
    let format = cli.format.unwrap_or_else(|| config.default_format());
    tracing::debug!("output format: {:?}", format);

    match cli.command {
        Commands::Price(args) => commands::price::execute(args, format, &config)?,
        Commands::Yield(args) => commands::yield_cmd::execute(args, format, &config)?,
        Commands::Config(args) => commands::config::execute(args, format, cli.quiet)?,
    }

    Ok(())
}

/// Installs the stderr subscriber. `RUST_LOG` wins over `--verbose`.
fn init_logging(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| default_filter.into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
