//! Calendar date type for coupon schedules.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Sub};
use std::str::FromStr;

use crate::error::{CoreError, CoreResult};

/// A calendar date with no time-of-day component.
///
/// Newtype around `chrono::NaiveDate` carrying the month arithmetic used by
/// coupon schedule construction.
///
/// # Example
///
/// ```rust
/// use sovbond_core::types::Date;
///
/// let date = Date::from_ymd(2034, 5, 31).unwrap();
/// let earlier = date.add_months(-6).unwrap();
/// assert_eq!(earlier, Date::from_ymd(2033, 11, 30).unwrap());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Date(NaiveDate);

impl Date {
    /// Creates a new date from year, month, and day.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidDate` if the date does not exist.
    pub fn from_ymd(year: i32, month: u32, day: u32) -> CoreResult<Self> {
        NaiveDate::from_ymd_opt(year, month, day)
            .map(Date)
            .ok_or_else(|| CoreError::invalid_date(format!("{year}-{month:02}-{day:02}")))
    }

    /// Creates a date from an ISO 8601 string (YYYY-MM-DD).
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidDate` if the string is not a valid date.
    pub fn parse(s: &str) -> CoreResult<Self> {
        NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
            .map(Date)
            .map_err(|_| CoreError::invalid_date(format!("Cannot parse: {s}")))
    }

    /// Returns the year component.
    #[must_use]
    pub fn year(&self) -> i32 {
        self.0.year()
    }

    /// Returns the month component (1-12).
    #[must_use]
    pub fn month(&self) -> u32 {
        self.0.month()
    }

    /// Returns the day component (1-31).
    #[must_use]
    pub fn day(&self) -> u32 {
        self.0.day()
    }

    /// Adds a number of days to the date.
    #[must_use]
    pub fn add_days(&self, days: i64) -> Self {
        Date(self.0 + chrono::Duration::days(days))
    }

    /// Adds a (possibly negative) number of months to the date.
    ///
    /// If the resulting day would be invalid (e.g., May 31 - 6 months),
    /// it rolls back to the last valid day of the month.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidDate` if the result is out of range.
    pub fn add_months(&self, months: i32) -> CoreResult<Self> {
        let total_months = self.year() * 12 + self.month() as i32 - 1 + months;
        let new_year = total_months.div_euclid(12);
        let new_month = (total_months.rem_euclid(12) + 1) as u32;

        let max_day = days_in_month(new_year, new_month);
        let new_day = self.day().min(max_day);

        Self::from_ymd(new_year, new_month, new_day)
    }

    /// Calculates the number of calendar days from `self` to `other`.
    #[must_use]
    pub fn days_between(&self, other: &Date) -> i64 {
        (other.0 - self.0).num_days()
    }

    /// Returns the whole number of calendar years from `self` to `other`
    /// (negative when `other` is earlier).
    #[must_use]
    pub fn years_between(&self, other: &Date) -> i32 {
        let mut years = other.year() - self.year();
        if years > 0 && (other.month(), other.day()) < (self.month(), self.day()) {
            years -= 1;
        } else if years < 0 && (other.month(), other.day()) > (self.month(), self.day()) {
            years += 1;
        }
        years
    }
}

impl fmt::Display for Date {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

impl FromStr for Date {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl From<NaiveDate> for Date {
    fn from(date: NaiveDate) -> Self {
        Date(date)
    }
}

impl From<Date> for NaiveDate {
    fn from(date: Date) -> Self {
        date.0
    }
}

impl Add<i64> for Date {
    type Output = Self;

    /// Adds days to a date.
    fn add(self, days: i64) -> Self::Output {
        self.add_days(days)
    }
}

impl Sub<i64> for Date {
    type Output = Self;

    /// Subtracts days from a date.
    fn sub(self, days: i64) -> Self::Output {
        self.add_days(-days)
    }
}

impl Sub<Date> for Date {
    type Output = i64;

    /// Returns the number of days between two dates.
    fn sub(self, other: Date) -> Self::Output {
        other.days_between(&self)
    }
}

/// Days in a month for a given year.
fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        _ if is_leap_year(year) => 29,
        _ => 28,
    }
}

fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || (year % 400 == 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_date_creation() {
        let date = Date::from_ymd(2034, 5, 15).unwrap();
        assert_eq!(date.year(), 2034);
        assert_eq!(date.month(), 5);
        assert_eq!(date.day(), 15);
    }

    #[test]
    fn test_invalid_date() {
        assert!(Date::from_ymd(2025, 2, 30).is_err());
        assert!(Date::from_ymd(2025, 13, 1).is_err());
    }

    #[test]
    fn test_add_months_backward_clamps() {
        let date = Date::from_ymd(2034, 5, 31).unwrap();
        assert_eq!(date.add_months(-6).unwrap(), Date::from_ymd(2033, 11, 30).unwrap());
        assert_eq!(date.add_months(-12).unwrap(), Date::from_ymd(2033, 5, 31).unwrap());
    }

    #[test]
    fn test_add_months_across_year_boundary() {
        let date = Date::from_ymd(2022, 2, 15).unwrap();
        assert_eq!(date.add_months(-3).unwrap(), Date::from_ymd(2021, 11, 15).unwrap());
        assert_eq!(date.add_months(11).unwrap(), Date::from_ymd(2023, 1, 15).unwrap());
    }

    #[test]
    fn test_add_months_leap_february() {
        let date = Date::from_ymd(2024, 8, 31).unwrap();
        assert_eq!(date.add_months(-6).unwrap(), Date::from_ymd(2024, 2, 29).unwrap());
    }

    #[test]
    fn test_leap_year() {
        assert!(is_leap_year(2024));
        assert!(!is_leap_year(2025));
        assert!(!is_leap_year(2100));
        assert!(is_leap_year(2000));
        assert_eq!(days_in_month(2024, 2), 29);
        assert_eq!(days_in_month(2100, 2), 28);
    }

    #[test]
    fn test_days_between() {
        let d1 = Date::from_ymd(2023, 9, 26).unwrap();
        let d2 = Date::from_ymd(2024, 7, 31).unwrap();
        assert_eq!(d1.days_between(&d2), 309);
        assert_eq!(d2.days_between(&d1), -309);
    }

    #[test]
    fn test_years_between() {
        let settle = Date::from_ymd(2022, 11, 22).unwrap();
        let maturity = Date::from_ymd(2034, 5, 15).unwrap();
        assert_eq!(settle.years_between(&maturity), 11);
        assert_eq!(maturity.years_between(&settle), -11);
    }

    #[test]
    fn test_parse() {
        let date: Date = "2022-11-22".parse().unwrap();
        assert_eq!(date, Date::from_ymd(2022, 11, 22).unwrap());
        assert!(Date::parse("22/11/2022").is_err());
    }

    #[test]
    fn test_date_arithmetic_operators() {
        let d1 = Date::from_ymd(2051, 5, 15).unwrap();
        let d2 = d1 - 10;
        assert_eq!(d2.day(), 5);
        assert_eq!(d1 - d2, 10);
        assert_eq!(d2 + 10, d1);
    }

    #[test]
    fn test_display() {
        let date = Date::from_ymd(2025, 6, 5).unwrap();
        assert_eq!(format!("{}", date), "2025-06-05");
    }

    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        fn date_strategy() -> impl Strategy<Value = Date> {
            (1990i32..2080i32, 1u32..13u32, 1u32..32u32)
                .prop_filter_map("valid date", |(year, month, day)| {
                    Date::from_ymd(year, month, day).ok()
                })
        }

        proptest! {
            #[test]
            fn test_add_months_keeps_day_or_clamps(
                date in date_strategy(),
                months in -480i32..480,
            ) {
                let shifted = date.add_months(months).unwrap();
                prop_assert!(shifted.day() <= date.day());
                if shifted.day() < date.day() {
                    prop_assert_eq!(shifted.day(), days_in_month(shifted.year(), shifted.month()));
                }
                let month_index = |d: &Date| d.year() * 12 + d.month() as i32;
                prop_assert_eq!(month_index(&shifted) - month_index(&date), months);
            }

            #[test]
            fn test_days_between_antisymmetric(a in date_strategy(), b in date_strategy()) {
                prop_assert_eq!(a.days_between(&b), -b.days_between(&a));
                prop_assert_eq!(a.add_days(a.days_between(&b)), b);
            }
        }
    }

    #[test]
    fn test_serde() {
        let date = Date::from_ymd(2025, 6, 15).unwrap();
        let json = serde_json::to_string(&date).unwrap();
        assert_eq!(json, "\"2025-06-15\"");
        let parsed: Date = serde_json::from_str(&json).unwrap();
        assert_eq!(date, parsed);
    }
}
