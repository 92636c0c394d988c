//! Working day detection and standard allocated hours.
//!
//! This module classifies each day of a pay period (working day, Sunday,
//! company holiday, or before the employee joined) and derives the standard
//! allocated hours for the period: working days multiplied by the hours in
//! a standard day.

use std::collections::BTreeSet;

use chrono::{Datelike, NaiveDate, Weekday};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::DEFAULT_HOURS_PER_DAY;
use crate::models::{HolidayCalendar, PayPeriod};

use super::joining::is_before_joining;

/// Hours allocated to one working day.
pub const STANDARD_HOURS_PER_DAY: Decimal = DEFAULT_HOURS_PER_DAY;

/// Represents how a calendar day counts towards standard hours.
///
/// # Example
///
/// ```
/// use timesheet_engine::calculation::DayType;
///
/// assert!(DayType::Working.is_working());
/// assert!(!DayType::Holiday.is_working());
/// assert_eq!(DayType::BeforeJoining.to_string(), "Before joining");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DayType {
    /// An ordinary working day.
    Working,
    /// A Sunday.
    Sunday,
    /// A company holiday that is not a Sunday.
    Holiday,
    /// A day before the date of joining, within the onboarding month.
    BeforeJoining,
}

impl DayType {
    /// Returns true if the day counts towards standard hours.
    pub fn is_working(&self) -> bool {
        matches!(self, DayType::Working)
    }
}

impl std::fmt::Display for DayType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DayType::Working => write!(f, "Working"),
            DayType::Sunday => write!(f, "Sunday"),
            DayType::Holiday => write!(f, "Holiday"),
            DayType::BeforeJoining => write!(f, "Before joining"),
        }
    }
}

/// Classifies a calendar day.
///
/// Sundays take precedence over holidays, and both take precedence over
/// the date-of-joining exclusion.
///
/// # Example
///
/// ```
/// use timesheet_engine::calculation::{classify_day, DayType};
/// use timesheet_engine::models::NoHolidays;
/// use chrono::NaiveDate;
///
/// let doj = NaiveDate::from_ymd_opt(2025, 4, 10);
/// // 2025-04-06 is a Sunday
/// assert_eq!(classify_day(NaiveDate::from_ymd_opt(2025, 4, 6).unwrap(), doj, &NoHolidays), DayType::Sunday);
/// assert_eq!(classify_day(NaiveDate::from_ymd_opt(2025, 4, 7).unwrap(), doj, &NoHolidays), DayType::BeforeJoining);
/// assert_eq!(classify_day(NaiveDate::from_ymd_opt(2025, 4, 10).unwrap(), doj, &NoHolidays), DayType::Working);
/// ```
pub fn classify_day<H>(date: NaiveDate, doj: Option<NaiveDate>, holidays: &H) -> DayType
where
    H: HolidayCalendar + ?Sized,
{
    if date.weekday() == Weekday::Sun {
        DayType::Sunday
    } else if holidays.is_holiday(date) {
        DayType::Holiday
    } else if is_before_joining(date, doj) {
        DayType::BeforeJoining
    } else {
        DayType::Working
    }
}

/// Day counts for a pay period, by [`DayType`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkingDaysBreakdown {
    /// Calendar days in the period.
    pub total_days: u32,
    /// Days that count towards standard hours.
    pub working_days: u32,
    /// Sundays in the period.
    pub sundays: u32,
    /// Holidays (not on a Sunday) in the period.
    pub holidays: u32,
    /// Days excluded because they precede the date of joining.
    pub before_joining: u32,
}

impl WorkingDaysBreakdown {
    /// Standard allocated hours for these working days.
    pub fn expected_hours(&self, hours_per_day: Decimal) -> Decimal {
        Decimal::from(self.working_days) * hours_per_day
    }

    fn record(&mut self, day_type: DayType) {
        self.total_days += 1;
        match day_type {
            DayType::Working => self.working_days += 1,
            DayType::Sunday => self.sundays += 1,
            DayType::Holiday => self.holidays += 1,
            DayType::BeforeJoining => self.before_joining += 1,
        }
    }
}

/// Counts the days of a pay period by type.
///
/// # Example
///
/// ```
/// use timesheet_engine::calculation::count_working_days;
/// use timesheet_engine::models::{NoHolidays, PayPeriod};
///
/// let period = PayPeriod::parse("01/04/2025 - 15/04/2025").unwrap();
/// let breakdown = count_working_days(&period, None, &NoHolidays);
/// assert_eq!(breakdown.total_days, 15);
/// assert_eq!(breakdown.sundays, 2);
/// assert_eq!(breakdown.working_days, 13);
/// ```
pub fn count_working_days<H>(
    period: &PayPeriod,
    doj: Option<NaiveDate>,
    holidays: &H,
) -> WorkingDaysBreakdown
where
    H: HolidayCalendar + ?Sized,
{
    let mut breakdown = WorkingDaysBreakdown::default();
    for date in period.dates() {
        breakdown.record(classify_day(date, doj, holidays));
    }

    debug!(
        period = %period,
        working_days = breakdown.working_days,
        sundays = breakdown.sundays,
        holidays = breakdown.holidays,
        before_joining = breakdown.before_joining,
        "Counted working days"
    );

    breakdown
}

/// Calculates the standard allocated hours for a pay period.
///
/// Every calendar day from the start to the end of the period (inclusive)
/// is a working day unless it is a Sunday, a holiday, or a day before the
/// date of joining within the onboarding month. Each working day is worth
/// [`STANDARD_HOURS_PER_DAY`] hours. An inverted period yields zero.
///
/// # Example
///
/// ```
/// use timesheet_engine::calculation::calculate_standard_hours;
/// use timesheet_engine::models::{NoHolidays, PayPeriod};
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let period = PayPeriod::parse("01/04/2025 - 15/04/2025").unwrap();
/// assert_eq!(calculate_standard_hours(&period, None, &NoHolidays), Decimal::new(117, 0));
///
/// let doj = NaiveDate::from_ymd_opt(2025, 4, 10);
/// assert_eq!(calculate_standard_hours(&period, doj, &NoHolidays), Decimal::new(45, 0));
/// ```
pub fn calculate_standard_hours<H>(period: &PayPeriod, doj: Option<NaiveDate>, holidays: &H) -> Decimal
where
    H: HolidayCalendar + ?Sized,
{
    calculate_standard_hours_with(period, doj, holidays, STANDARD_HOURS_PER_DAY)
}

/// Calculates the standard allocated hours with a custom day length.
pub fn calculate_standard_hours_with<H>(
    period: &PayPeriod,
    doj: Option<NaiveDate>,
    holidays: &H,
    hours_per_day: Decimal,
) -> Decimal
where
    H: HolidayCalendar + ?Sized,
{
    count_working_days(period, doj, holidays).expected_hours(hours_per_day)
}

/// Calculates standard hours for a raw `"DD/MM/YYYY - DD/MM/YYYY"` period.
///
/// An unparsable period yields zero hours: the figure is a placeholder
/// target until a valid period is selected.
///
/// # Example
///
/// ```
/// use timesheet_engine::calculation::standard_hours_for_period_str;
/// use timesheet_engine::models::NoHolidays;
/// use rust_decimal::Decimal;
///
/// assert_eq!(standard_hours_for_period_str("16/04/2025 - 30/04/2025", None, &NoHolidays), Decimal::new(117, 0));
/// assert_eq!(standard_hours_for_period_str("Select a period", None, &NoHolidays), Decimal::ZERO);
/// ```
pub fn standard_hours_for_period_str<H>(period: &str, doj: Option<NaiveDate>, holidays: &H) -> Decimal
where
    H: HolidayCalendar + ?Sized,
{
    match PayPeriod::parse(period) {
        Ok(parsed) => calculate_standard_hours(&parsed, doj, holidays),
        Err(err) => {
            warn!(period = %period, error = %err, "Unparsable period, standard hours set to zero");
            Decimal::ZERO
        }
    }
}

/// Returns the grid columns that never need hours: Sundays and holidays.
///
/// # Example
///
/// ```
/// use timesheet_engine::calculation::non_working_columns;
/// use timesheet_engine::models::{NoHolidays, PayPeriod};
///
/// let period = PayPeriod::parse("01/04/2025 - 15/04/2025").unwrap();
/// let columns: Vec<u32> = non_working_columns(&period, &NoHolidays).into_iter().collect();
/// assert_eq!(columns, vec![6, 13]);
/// ```
pub fn non_working_columns<H>(period: &PayPeriod, holidays: &H) -> BTreeSet<u32>
where
    H: HolidayCalendar + ?Sized,
{
    period
        .dates()
        .zip(1u32..)
        .filter(|(date, _)| {
            matches!(
                classify_day(*date, None, holidays),
                DayType::Sunday | DayType::Holiday
            )
        })
        .map(|(_, column)| column)
        .collect()
}
