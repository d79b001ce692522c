//! # Sovbond Bonds
//!
//! Sovereign bond pricing from yield to maturity.
//!
//! This crate provides:
//!
//! - **Instruments**: nominal coupon bonds, inflation-indexed (capital indexed)
//!   bonds and zero-coupon discount bills
//! - **Cash Flows**: coupon schedules stepped back from maturity, accrued
//!   interest with optional ex-interest periods
//! - **Pricing**: dirty price, clean price and accrued interest, explicit
//!   rounding, and the inverse yield search
//!
//! ## Example
//!
//! ```rust
//! use sovbond_bonds::prelude::*;
//! use sovbond_core::types::{Date, Frequency};
//! use rust_decimal_macros::dec;
//!
//! let bond = Instrument::builder()
//!     .settlement(Date::from_ymd(2022, 8, 31).unwrap())
//!     .maturity(Date::from_ymd(2035, 9, 20).unwrap())
//!     .coupon_rate(dec!(0.025))
//!     .yield_to_maturity(0.0219)
//!     .frequency(Frequency::Quarterly)
//!     .inflation(
//!         InflationAdjustment::new(dec!(116.69), dec!(100))
//!             .unwrap()
//!             .with_average_inflation(dec!(0.0163)),
//!     )
//!     .build()
//!     .unwrap();
//!
//! let price = bond.price().unwrap();
//! assert!((price.dirty_price - 120.932155367).abs() < 1e-8);
//! assert_eq!(price.rounded(3).unwrap().clean_price, dec!(120.361));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::similar_names)]
#![allow(clippy::unreadable_literal)]
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::return_self_not_must_use)]
#![allow(clippy::trivially_copy_pass_by_ref)]
#![allow(clippy::float_cmp)]

pub mod cashflows;
pub mod error;
pub mod pricing;
pub mod types;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::cashflows::{
        accrued_interest, build_schedule, AccruedInterestCalculator, CashFlow, CouponPeriod,
        Schedule,
    };
    pub use crate::error::{BondError, BondResult};
    pub use crate::pricing::{
        round_price, yield_from_clean_price, yield_from_dirty_price, BondPricer, PriceResult,
        PriceRounding, RoundedPrice, YieldResult, YieldSearch,
    };
    pub use crate::types::{
        FinalPeriodDiscounting, InflationAdjustment, Instrument, InstrumentBuilder,
        InstrumentKind, PricingConventions,
    };
}

pub use error::{BondError, BondResult};
pub use pricing::{BondPricer, PriceResult};
pub use types::{Instrument, InstrumentKind};
