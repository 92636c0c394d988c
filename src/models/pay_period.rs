//! Pay period model.
//!
//! This module contains the [`PayPeriod`] type: an inclusive, half-month date
//! range that is the unit of timesheet submission. Periods travel between the
//! portal and its backend as `"DD/MM/YYYY - DD/MM/YYYY"` strings; each day of
//! the period is one 1-based column of the timesheet grid.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Days, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// Date format used on both sides of a period string.
pub const PERIOD_DATE_FORMAT: &str = "%d/%m/%Y";

/// Last day of the first half of a month.
pub const FIRST_HALF_LAST_DAY: u32 = 15;

/// Represents a pay period with its inclusive date range.
///
/// # Example
///
/// ```
/// use timesheet_engine::models::PayPeriod;
/// use chrono::NaiveDate;
///
/// let period = PayPeriod::parse("01/04/2025 - 15/04/2025").unwrap();
/// assert_eq!(period.start_date, NaiveDate::from_ymd_opt(2025, 4, 1).unwrap());
/// assert_eq!(period.end_date, NaiveDate::from_ymd_opt(2025, 4, 15).unwrap());
/// assert_eq!(period.column_count(), 15);
/// assert_eq!(period.to_string(), "01/04/2025 - 15/04/2025");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PayPeriod {
    /// The start date of the pay period (inclusive).
    pub start_date: NaiveDate,
    /// The end date of the pay period (inclusive).
    pub end_date: NaiveDate,
}

impl PayPeriod {
    /// Creates a pay period from its bounds.
    ///
    /// No ordering check is made: an inverted period is a valid value that
    /// simply contains no days.
    pub fn new(start_date: NaiveDate, end_date: NaiveDate) -> Self {
        Self {
            start_date,
            end_date,
        }
    }

    /// Parses a period in the literal `"DD/MM/YYYY - DD/MM/YYYY"` format.
    ///
    /// Whitespace around the separator and the dates is ignored.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidPeriod`] when the separator is missing or
    /// either side is not a calendar date.
    ///
    /// # Example
    ///
    /// ```
    /// use timesheet_engine::models::PayPeriod;
    ///
    /// assert!(PayPeriod::parse("16/04/2025 - 30/04/2025").is_ok());
    /// assert!(PayPeriod::parse("April, first half").is_err());
    /// assert!(PayPeriod::parse("31/02/2025 - 15/03/2025").is_err());
    /// ```
    pub fn parse(input: &str) -> EngineResult<Self> {
        let invalid = |message: &str| EngineError::InvalidPeriod {
            input: input.to_string(),
            message: message.to_string(),
        };

        // Dates use '/', so the first '-' is the range separator.
        let (start, end) = input
            .split_once('-')
            .ok_or_else(|| invalid("expected 'DD/MM/YYYY - DD/MM/YYYY'"))?;

        let start_date = NaiveDate::parse_from_str(start.trim(), PERIOD_DATE_FORMAT)
            .map_err(|e| invalid(&format!("start date: {}", e)))?;
        let end_date = NaiveDate::parse_from_str(end.trim(), PERIOD_DATE_FORMAT)
            .map_err(|e| invalid(&format!("end date: {}", e)))?;

        Ok(Self::new(start_date, end_date))
    }

    /// Returns the first half (1st to 15th) of the given month.
    ///
    /// # Example
    ///
    /// ```
    /// use timesheet_engine::models::PayPeriod;
    ///
    /// let period = PayPeriod::first_half(2025, 4).unwrap();
    /// assert_eq!(period.to_string(), "01/04/2025 - 15/04/2025");
    /// ```
    pub fn first_half(year: i32, month: u32) -> EngineResult<Self> {
        let (first, _) = month_bounds(year, month)?;
        let fifteenth = first
            .with_day(FIRST_HALF_LAST_DAY)
            .ok_or(EngineError::InvalidMonth { year, month })?;
        Ok(Self::new(first, fifteenth))
    }

    /// Returns the second half (16th to the last day) of the given month.
    ///
    /// # Example
    ///
    /// ```
    /// use timesheet_engine::models::PayPeriod;
    ///
    /// assert_eq!(PayPeriod::second_half(2025, 4).unwrap().to_string(), "16/04/2025 - 30/04/2025");
    /// assert_eq!(PayPeriod::second_half(2024, 2).unwrap().to_string(), "16/02/2024 - 29/02/2024");
    /// ```
    pub fn second_half(year: i32, month: u32) -> EngineResult<Self> {
        let (first, last) = month_bounds(year, month)?;
        let sixteenth = first
            .with_day(FIRST_HALF_LAST_DAY + 1)
            .ok_or(EngineError::InvalidMonth { year, month })?;
        Ok(Self::new(sixteenth, last))
    }

    /// Returns both halves of the given month, first half first.
    pub fn halves_of_month(year: i32, month: u32) -> EngineResult<(Self, Self)> {
        Ok((Self::first_half(year, month)?, Self::second_half(year, month)?))
    }

    /// Checks if a given date falls within this pay period (inclusive).
    pub fn contains_date(&self, date: NaiveDate) -> bool {
        date >= self.start_date && date <= self.end_date
    }

    /// Iterates over every calendar day of the period, in order.
    ///
    /// Yields nothing for an inverted period.
    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> {
        let end_date = self.end_date;
        self.start_date
            .iter_days()
            .take_while(move |date| *date <= end_date)
    }

    /// Number of grid columns (days) in the period.
    pub fn column_count(&self) -> u32 {
        if self.end_date < self.start_date {
            return 0;
        }
        (self.end_date - self.start_date).num_days() as u32 + 1
    }

    /// Maps a 1-based grid column to its calendar date.
    ///
    /// # Example
    ///
    /// ```
    /// use timesheet_engine::models::PayPeriod;
    /// use chrono::NaiveDate;
    ///
    /// let period = PayPeriod::parse("01/04/2025 - 15/04/2025").unwrap();
    /// assert_eq!(period.date_for_column(6), NaiveDate::from_ymd_opt(2025, 4, 6));
    /// assert_eq!(period.date_for_column(0), None);
    /// assert_eq!(period.date_for_column(16), None);
    /// ```
    pub fn date_for_column(&self, column: u32) -> Option<NaiveDate> {
        if column == 0 || column > self.column_count() {
            return None;
        }
        self.start_date
            .checked_add_days(Days::new(u64::from(column - 1)))
    }

    /// Maps a calendar date to its 1-based grid column.
    pub fn column_for_date(&self, date: NaiveDate) -> Option<u32> {
        if !self.contains_date(date) {
            return None;
        }
        Some((date - self.start_date).num_days() as u32 + 1)
    }

    /// Returns true if the period starts in the given calendar month.
    pub fn starts_in_month(&self, year: i32, month: u32) -> bool {
        self.start_date.year() == year && self.start_date.month() == month
    }
}

impl fmt::Display for PayPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} - {}",
            self.start_date.format(PERIOD_DATE_FORMAT),
            self.end_date.format(PERIOD_DATE_FORMAT)
        )
    }
}

impl FromStr for PayPeriod {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Returns the first and last day of a calendar month.
///
/// # Errors
///
/// Returns [`EngineError::InvalidMonth`] for a month outside 1..=12.
///
/// # Example
///
/// ```
/// use timesheet_engine::models::month_bounds;
/// use chrono::NaiveDate;
///
/// let (first, last) = month_bounds(2025, 12).unwrap();
/// assert_eq!(first, NaiveDate::from_ymd_opt(2025, 12, 1).unwrap());
/// assert_eq!(last, NaiveDate::from_ymd_opt(2025, 12, 31).unwrap());
/// ```
pub fn month_bounds(year: i32, month: u32) -> EngineResult<(NaiveDate, NaiveDate)> {
    let invalid = || EngineError::InvalidMonth { year, month };

    let first = NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(invalid)?;
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    let last = NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .and_then(|d| d.pred_opt())
        .ok_or_else(invalid)?;

    Ok((first, last))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_date(date_str: &str) -> NaiveDate {
        NaiveDate::parse_from_str(date_str, "%Y-%m-%d").unwrap()
    }

    fn april_first_half() -> PayPeriod {
        PayPeriod::new(make_date("2025-04-01"), make_date("2025-04-15"))
    }

    #[test]
    fn test_parse_first_half_period() {
        let period = PayPeriod::parse("01/04/2025 - 15/04/2025").unwrap();
        assert_eq!(period, april_first_half());
    }

    #[test]
    fn test_parse_tolerates_missing_spaces() {
        let period = PayPeriod::parse("01/04/2025-15/04/2025").unwrap();
        assert_eq!(period, april_first_half());
    }

    #[test]
    fn test_parse_rejects_missing_separator() {
        let result = PayPeriod::parse("01/04/2025");
        match result {
            Err(EngineError::InvalidPeriod { input, .. }) => assert_eq!(input, "01/04/2025"),
            other => panic!("Expected InvalidPeriod, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_rejects_iso_dates() {
        assert!(PayPeriod::parse("2025/04/01 - 2025/04/15").is_err());
    }

    #[test]
    fn test_parse_rejects_empty_string() {
        assert!(PayPeriod::parse("").is_err());
    }

    #[test]
    fn test_parse_accepts_inverted_period() {
        let period = PayPeriod::parse("15/04/2025 - 01/04/2025").unwrap();
        assert_eq!(period.column_count(), 0);
        assert_eq!(period.dates().count(), 0);
    }

    #[test]
    fn test_display_round_trips_literal_format() {
        let text = "16/02/2024 - 29/02/2024";
        assert_eq!(PayPeriod::parse(text).unwrap().to_string(), text);
    }

    #[test]
    fn test_from_str() {
        let period: PayPeriod = "01/04/2025 - 15/04/2025".parse().unwrap();
        assert_eq!(period, april_first_half());
    }

    #[test]
    fn test_second_half_of_thirty_one_day_month() {
        let period = PayPeriod::second_half(2025, 1).unwrap();
        assert_eq!(period.start_date, make_date("2025-01-16"));
        assert_eq!(period.end_date, make_date("2025-01-31"));
        assert_eq!(period.column_count(), 16);
    }

    #[test]
    fn test_second_half_of_february_non_leap() {
        let period = PayPeriod::second_half(2025, 2).unwrap();
        assert_eq!(period.end_date, make_date("2025-02-28"));
    }

    #[test]
    fn test_halves_of_december() {
        let (first, second) = PayPeriod::halves_of_month(2025, 12).unwrap();
        assert_eq!(first.to_string(), "01/12/2025 - 15/12/2025");
        assert_eq!(second.to_string(), "16/12/2025 - 31/12/2025");
    }

    #[test]
    fn test_halves_of_invalid_month() {
        assert!(matches!(
            PayPeriod::halves_of_month(2025, 13),
            Err(EngineError::InvalidMonth { year: 2025, month: 13 })
        ));
        assert!(PayPeriod::first_half(2025, 0).is_err());
    }

    #[test]
    fn test_dates_are_inclusive_and_ordered() {
        let dates: Vec<NaiveDate> = april_first_half().dates().collect();
        assert_eq!(dates.len(), 15);
        assert_eq!(dates[0], make_date("2025-04-01"));
        assert_eq!(dates[14], make_date("2025-04-15"));
        assert!(dates.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_single_day_period() {
        let day = make_date("2025-04-09");
        let period = PayPeriod::new(day, day);
        assert_eq!(period.column_count(), 1);
        assert_eq!(period.date_for_column(1), Some(day));
    }

    #[test]
    fn test_column_mapping_is_consistent() {
        let period = april_first_half();
        for column in 1..=period.column_count() {
            let date = period.date_for_column(column).unwrap();
            assert_eq!(period.column_for_date(date), Some(column));
        }
        assert_eq!(period.column_for_date(make_date("2025-04-16")), None);
        assert_eq!(period.column_for_date(make_date("2025-03-31")), None);
    }

    #[test]
    fn test_contains_date_on_bounds() {
        let period = april_first_half();
        assert!(period.contains_date(period.start_date));
        assert!(period.contains_date(period.end_date));
        assert!(!period.contains_date(make_date("2025-04-16")));
    }

    #[test]
    fn test_starts_in_month() {
        let period = april_first_half();
        assert!(period.starts_in_month(2025, 4));
        assert!(!period.starts_in_month(2025, 5));
        assert!(!period.starts_in_month(2024, 4));
    }

    #[test]
    fn test_month_bounds_leap_february() {
        let (first, last) = month_bounds(2024, 2).unwrap();
        assert_eq!(first, make_date("2024-02-01"));
        assert_eq!(last, make_date("2024-02-29"));
    }

    #[test]
    fn test_serialize_pay_period() {
        let json = serde_json::to_string(&april_first_half()).unwrap();
        assert!(json.contains("\"start_date\":\"2025-04-01\""));
        assert!(json.contains("\"end_date\":\"2025-04-15\""));
    }

    #[test]
    fn test_deserialize_pay_period() {
        let json = r#"{ "start_date": "2025-04-16", "end_date": "2025-04-30" }"#;
        let period: PayPeriod = serde_json::from_str(json).unwrap();
        assert_eq!(period.to_string(), "16/04/2025 - 30/04/2025");
    }
}
