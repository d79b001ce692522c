//! Instrument and convention types.

mod conventions;
mod instrument;

pub use conventions::{FinalPeriodDiscounting, PricingConventions};
pub use instrument::{InflationAdjustment, Instrument, InstrumentBuilder, InstrumentKind};

pub(crate) use instrument::decimal_to_f64;
