//! Company holiday models.
//!
//! Holidays are owned by the backend's calendar. The engine only asks one
//! question of them, "is date D a company holiday", through the
//! [`HolidayCalendar`] trait, so callers can pass a loaded [`HolidayList`], a
//! plain set of dates, or a predicate.

use std::collections::{BTreeSet, HashSet};

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// Answers whether a calendar date is a company holiday.
pub trait HolidayCalendar {
    /// Returns true if `date` is a company holiday.
    fn is_holiday(&self, date: NaiveDate) -> bool;
}

/// A calendar with no holidays.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NoHolidays;

impl HolidayCalendar for NoHolidays {
    fn is_holiday(&self, _date: NaiveDate) -> bool {
        false
    }
}

/// Adapts a predicate closure into a [`HolidayCalendar`].
///
/// # Example
///
/// ```
/// use timesheet_engine::models::{HolidayCalendar, HolidayPredicate};
/// use chrono::{Datelike, NaiveDate};
///
/// let first_of_month = HolidayPredicate(|d: NaiveDate| d.day() == 1);
/// assert!(first_of_month.is_holiday(NaiveDate::from_ymd_opt(2025, 5, 1).unwrap()));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct HolidayPredicate<F>(pub F);

impl<F> HolidayCalendar for HolidayPredicate<F>
where
    F: Fn(NaiveDate) -> bool,
{
    fn is_holiday(&self, date: NaiveDate) -> bool {
        (self.0)(date)
    }
}

impl HolidayCalendar for HashSet<NaiveDate> {
    fn is_holiday(&self, date: NaiveDate) -> bool {
        self.contains(&date)
    }
}

impl HolidayCalendar for BTreeSet<NaiveDate> {
    fn is_holiday(&self, date: NaiveDate) -> bool {
        self.contains(&date)
    }
}

impl HolidayCalendar for [NaiveDate] {
    fn is_holiday(&self, date: NaiveDate) -> bool {
        self.contains(&date)
    }
}

impl HolidayCalendar for Vec<NaiveDate> {
    fn is_holiday(&self, date: NaiveDate) -> bool {
        self.as_slice().is_holiday(date)
    }
}

/// A named company holiday.
///
/// # Example
///
/// ```
/// use timesheet_engine::models::Holiday;
/// use chrono::NaiveDate;
///
/// let holiday = Holiday {
///     date: NaiveDate::from_ymd_opt(2025, 4, 14).unwrap(),
///     name: "Tamil New Year".to_string(),
/// };
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Holiday {
    /// The date of the holiday.
    pub date: NaiveDate,
    /// The name of the holiday.
    pub name: String,
}

/// An ordered list of company holidays, as published by the backend.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HolidayList {
    /// The holidays, in no particular order.
    #[serde(default)]
    pub holidays: Vec<Holiday>,
}

impl HolidayList {
    /// Creates a holiday list from its entries.
    pub fn new(holidays: Vec<Holiday>) -> Self {
        Self { holidays }
    }

    /// Appends the holidays from another list.
    pub fn extend(&mut self, other: HolidayList) {
        self.holidays.extend(other.holidays);
    }

    /// Returns the holidays that fall in the given calendar month, sorted by date.
    pub fn in_month(&self, year: i32, month: u32) -> Vec<&Holiday> {
        let mut found: Vec<&Holiday> = self
            .holidays
            .iter()
            .filter(|h| h.date.year() == year && h.date.month() == month)
            .collect();
        found.sort_by_key(|h| h.date);
        found
    }

    /// Number of holidays in the list.
    pub fn len(&self) -> usize {
        self.holidays.len()
    }

    /// Returns true if the list holds no holidays.
    pub fn is_empty(&self) -> bool {
        self.holidays.is_empty()
    }
}

impl HolidayCalendar for HolidayList {
    fn is_holiday(&self, date: NaiveDate) -> bool {
        self.holidays.iter().any(|h| h.date == date)
    }
}

impl HolidayCalendar for [Holiday] {
    fn is_holiday(&self, date: NaiveDate) -> bool {
        self.iter().any(|h| h.date == date)
    }
}
