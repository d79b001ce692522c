//! Actual/365 Fixed day count convention.

use rust_decimal::Decimal;

use super::DayCount;
use crate::types::Date;

/// Actual/365 Fixed day count convention.
///
/// The day count is the actual number of days between dates and the year
/// basis is always 365 days, leap years included.
///
/// # Formula
///
/// $$\text{Year Fraction} = \frac{\text{Actual Days}}{365}$$
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Act365Fixed;

impl Act365Fixed {
    /// Year basis of the convention.
    pub const BASIS: i64 = 365;
}

impl DayCount for Act365Fixed {
    fn name(&self) -> &'static str {
        "ACT/365F"
    }

    fn year_fraction(&self, start: Date, end: Date) -> Decimal {
        let days = start.days_between(&end);
        Decimal::from(days) / Decimal::from(Self::BASIS)
    }

    fn day_count(&self, start: Date, end: Date) -> i64 {
        start.days_between(&end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_act365f_full_year() {
        let dc = Act365Fixed;
        let start = Date::from_ymd(2025, 1, 1).unwrap();
        let end = Date::from_ymd(2026, 1, 1).unwrap();
        assert_eq!(dc.year_fraction(start, end), dec!(1));
    }

    #[test]
    fn test_act365f_leap_year_exceeds_one() {
        let dc = Act365Fixed;
        let start = Date::from_ymd(2024, 1, 1).unwrap();
        let end = Date::from_ymd(2025, 1, 1).unwrap();
        assert_eq!(dc.day_count(start, end), 366);
        assert_eq!(dc.year_fraction(start, end), dec!(366) / dec!(365));
    }

    #[test]
    fn test_act365f_bill_tenor() {
        let dc = Act365Fixed;
        let start = Date::from_ymd(2023, 9, 26).unwrap();
        let end = Date::from_ymd(2024, 7, 31).unwrap();
        assert_eq!(dc.day_count(start, end), 309);
    }

    #[test]
    fn test_act365f_same_day() {
        let dc = Act365Fixed;
        let date = Date::from_ymd(2025, 6, 15).unwrap();
        assert_eq!(dc.day_count(date, date), 0);
        assert_eq!(dc.year_fraction(date, date), dec!(0));
    }
}
