//! # Sovbond Core
//!
//! Core types for the Sovbond sovereign bond price calculator.
//!
//! This crate provides the building blocks the pricing crate works on:
//!
//! - **Types**: [`Date`] (calendar date, no time of day) and [`Frequency`]
//!   (annual, semi-annual or quarterly coupons)
//! - **Day Count Conventions**: actual/actual within a coupon period and
//!   actual/365 fixed for money-market discounting
//! - **Errors**: [`CoreError`] for invalid dates and unsupported frequencies
//!
//! ## Example
//!
//! ```rust
//! use sovbond_core::prelude::*;
//!
//! let maturity = Date::from_ymd(2034, 5, 15).unwrap();
//! let frequency = Frequency::from_periods(2).unwrap();
//! let previous = maturity.add_months(-(frequency.months_per_period() as i32)).unwrap();
//! assert_eq!(previous, Date::from_ymd(2033, 11, 15).unwrap());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::return_self_not_must_use)]
#![allow(clippy::trivially_copy_pass_by_ref)]

pub mod daycounts;
pub mod error;
pub mod types;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::daycounts::{Act360, Act365Fixed, ActActIcma, DayCount, DayCountConvention};
    pub use crate::error::{CoreError, CoreResult};
    pub use crate::types::{Date, Frequency};
}

// Re-export commonly used types at crate root
pub use error::{CoreError, CoreResult};
pub use types::{Date, Frequency};
