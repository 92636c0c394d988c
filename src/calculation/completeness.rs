//! Timesheet completeness validation.
//!
//! Before a timesheet is saved the grid must add up to the standard
//! allocated hours for the period, every required day column must carry at
//! least one value, and a late joiner may not book casual leave in their
//! onboarding month.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::TimesheetPolicy;
use crate::models::{HolidayCalendar, PayPeriod, TimesheetEntry};

use super::joining::{casual_leave_restricted, is_casual_leave_code, locked_columns};
use super::working_days::non_working_columns;

/// Decimal places used when comparing totals.
const TOTAL_PRECISION: u32 = 2;

/// The result of validating a timesheet grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ValidationOutcome {
    /// The timesheet may be saved.
    Ok,
    /// The grand total differs from the standard allocated hours.
    TotalMismatch {
        /// Hours logged across all non-metadata rows.
        actual: Decimal,
        /// Standard allocated hours for the period.
        expected: Decimal,
    },
    /// Required day columns hold no hours.
    EmptyColumns {
        /// The 1-based columns that are empty.
        columns: BTreeSet<u32>,
    },
    /// No hours were entered outside the metadata rows.
    NoData,
    /// Casual leave was booked in an onboarding month joined after the cutoff.
    CasualLeaveBlocked {
        /// The last day of the month a joiner may start on and still book casual leave.
        cutoff_day: u32,
    },
}

impl ValidationOutcome {
    /// Returns true if the timesheet passed every check.
    pub fn is_ok(&self) -> bool {
        matches!(self, ValidationOutcome::Ok)
    }

    /// Returns the message shown to the employee.
    ///
    /// # Example
    ///
    /// ```
    /// use timesheet_engine::calculation::ValidationOutcome;
    ///
    /// assert_eq!(
    ///     ValidationOutcome::NoData.message(),
    ///     "No valid data entered in dynamic rows!"
    /// );
    /// ```
    pub fn message(&self) -> String {
        match self {
            ValidationOutcome::Ok => "Timesheet is complete.".to_string(),
            ValidationOutcome::TotalMismatch { actual, expected } => format!(
                "Each day's total must equal the standard hours ({} of {} hours logged). Please review your entries.",
                actual.normalize(),
                expected.normalize()
            ),
            ValidationOutcome::EmptyColumns { columns } => {
                let list = columns
                    .iter()
                    .map(u32::to_string)
                    .collect::<Vec<_>>()
                    .join(", ");
                format!("Please fill all required fields! Empty day columns: {list}")
            }
            ValidationOutcome::NoData => "No valid data entered in dynamic rows!".to_string(),
            ValidationOutcome::CasualLeaveBlocked { cutoff_day } => format!(
                "Casual Leave is not allowed in your onboarding month because you joined after the {}.",
                ordinal(*cutoff_day)
            ),
        }
    }
}

/// Formats a day of the month as "1st", "2nd", "15th".
fn ordinal(day: u32) -> String {
    let suffix = match (day % 10, day % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    };
    format!("{day}{suffix}")
}

impl std::fmt::Display for ValidationOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message())
    }
}

/// Validates a timesheet grid before it is saved.
///
/// Checks run in order and the first failure wins: no data, blocked casual
/// leave, total mismatch, empty required columns. Casual leave is checked
/// before the total because a joiner after the cutoff may have every column
/// locked, leaving zero expected hours.
///
/// Rows whose charge code is a metadata label (see
/// [`TimesheetPolicy::is_metadata_row`]) or is not usable (see
/// [`clean_charge_code`]) take no part in any check, just as they are left
/// out of the save payload. Sunday, holiday, and pre-joining columns are not
/// required.
///
/// [`clean_charge_code`]: crate::models::clean_charge_code
///
/// # Example
///
/// ```
/// use timesheet_engine::calculation::{calculate_standard_hours, validate_timesheet, ValidationOutcome};
/// use timesheet_engine::config::TimesheetPolicy;
/// use timesheet_engine::models::{NoHolidays, PayPeriod, TimesheetEntry};
/// use rust_decimal::Decimal;
///
/// let period = PayPeriod::parse("01/04/2025 - 15/04/2025").unwrap();
/// let expected = calculate_standard_hours(&period, None, &NoHolidays);
///
/// let entries: Vec<TimesheetEntry> = period
///     .dates()
///     .zip(1u32..)
///     .filter(|(date, _)| date.format("%a").to_string() != "Sun")
///     .map(|(_, col)| TimesheetEntry::with_hours("PRJ-100", 0, col, Decimal::new(9, 0)))
///     .collect();
///
/// let outcome = validate_timesheet(&entries, &period, expected, &NoHolidays, None, &TimesheetPolicy::default());
/// assert_eq!(outcome, ValidationOutcome::Ok);
/// ```
pub fn validate_timesheet<H>(
    entries: &[TimesheetEntry],
    period: &PayPeriod,
    expected: Decimal,
    holidays: &H,
    doj: Option<NaiveDate>,
    policy: &TimesheetPolicy,
) -> ValidationOutcome
where
    H: HolidayCalendar + ?Sized,
{
    let working: Vec<&TimesheetEntry> = entries
        .iter()
        .filter(|entry| {
            entry
                .usable_charge_code()
                .is_some_and(|code| !policy.is_metadata_row(code))
        })
        .collect();

    let outcome = check_entries(&working, period, expected, holidays, doj, policy);

    debug!(
        period = %period,
        entries = entries.len(),
        outcome = ?outcome,
        "Validated timesheet"
    );

    outcome
}

fn check_entries<H>(
    working: &[&TimesheetEntry],
    period: &PayPeriod,
    expected: Decimal,
    holidays: &H,
    doj: Option<NaiveDate>,
    policy: &TimesheetPolicy,
) -> ValidationOutcome
where
    H: HolidayCalendar + ?Sized,
{
    if !working.iter().any(|entry| entry.hours.is_attempt()) {
        return ValidationOutcome::NoData;
    }

    if casual_leave_restricted(period, doj, policy.casual_leave_cutoff_day)
        && working.iter().any(|entry| books_casual_leave(entry))
    {
        return ValidationOutcome::CasualLeaveBlocked {
            cutoff_day: policy.casual_leave_cutoff_day,
        };
    }

    let actual = grand_total(working);
    if actual.round_dp(TOTAL_PRECISION) != expected.round_dp(TOTAL_PRECISION) {
        return ValidationOutcome::TotalMismatch { actual, expected };
    }

    let columns = empty_required_columns(working, period, holidays, doj);
    if !columns.is_empty() {
        return ValidationOutcome::EmptyColumns { columns };
    }

    ValidationOutcome::Ok
}

/// Sums every value in the given entries.
fn grand_total(entries: &[&TimesheetEntry]) -> Decimal {
    entries.iter().filter_map(|entry| entry.hours.value()).sum()
}

/// Returns the required columns that no entry fills with a value.
fn empty_required_columns<H>(
    entries: &[&TimesheetEntry],
    period: &PayPeriod,
    holidays: &H,
    doj: Option<NaiveDate>,
) -> BTreeSet<u32>
where
    H: HolidayCalendar + ?Sized,
{
    let skip = non_working_columns(period, holidays);
    let locked = locked_columns(period, doj);
    let filled: BTreeSet<u32> = entries
        .iter()
        .filter(|entry| entry.hours.value().is_some())
        .map(|entry| entry.column)
        .collect();

    (1..=period.column_count())
        .filter(|column| !skip.contains(column) && !locked.contains(column) && !filled.contains(column))
        .collect()
}

fn books_casual_leave(entry: &TimesheetEntry) -> bool {
    entry.usable_charge_code().is_some_and(is_casual_leave_code)
        && entry.hours.value().is_some_and(|hours| hours > Decimal::ZERO)
}
