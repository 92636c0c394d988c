//! Date-of-joining rules for the onboarding month.
//!
//! An employee cannot log hours for days before they joined, but only within
//! the month they joined: a later period that happens to contain earlier
//! day-numbers is unaffected. A joiner after the cutoff day (the 15th by
//! default) has not accrued casual leave for their onboarding month.

use std::collections::BTreeSet;

use chrono::{Datelike, NaiveDate};

use crate::models::PayPeriod;

/// Returns true if `date` is before `doj` within the onboarding month.
///
/// # Example
///
/// ```
/// use timesheet_engine::calculation::is_before_joining;
/// use chrono::NaiveDate;
///
/// let doj = NaiveDate::from_ymd_opt(2025, 4, 10);
/// assert!(is_before_joining(NaiveDate::from_ymd_opt(2025, 4, 9).unwrap(), doj));
/// assert!(!is_before_joining(NaiveDate::from_ymd_opt(2025, 4, 10).unwrap(), doj));
/// // March 20 is before the joining date but outside the onboarding month.
/// assert!(!is_before_joining(NaiveDate::from_ymd_opt(2025, 3, 20).unwrap(), doj));
/// assert!(!is_before_joining(NaiveDate::from_ymd_opt(2025, 4, 1).unwrap(), None));
/// ```
pub fn is_before_joining(date: NaiveDate, doj: Option<NaiveDate>) -> bool {
    doj.is_some_and(|doj| {
        date < doj && date.year() == doj.year() && date.month() == doj.month()
    })
}

/// Returns the grid columns locked because they fall before the date of joining.
///
/// Locked cells are disabled in the grid and hold zero hours.
///
/// # Example
///
/// ```
/// use timesheet_engine::calculation::locked_columns;
/// use timesheet_engine::models::PayPeriod;
/// use chrono::NaiveDate;
///
/// let period = PayPeriod::parse("01/04/2025 - 15/04/2025").unwrap();
/// let locked = locked_columns(&period, NaiveDate::from_ymd_opt(2025, 4, 4));
/// assert_eq!(locked.into_iter().collect::<Vec<_>>(), vec![1, 2, 3]);
/// ```
pub fn locked_columns(period: &PayPeriod, doj: Option<NaiveDate>) -> BTreeSet<u32> {
    period
        .dates()
        .zip(1u32..)
        .filter(|(date, _)| is_before_joining(*date, doj))
        .map(|(_, column)| column)
        .collect()
}

/// Returns true if casual leave may not be booked in this period.
///
/// The restriction applies when the employee joined in the month the period
/// starts in, after `cutoff_day`.
///
/// # Example
///
/// ```
/// use timesheet_engine::calculation::casual_leave_restricted;
/// use timesheet_engine::models::PayPeriod;
/// use chrono::NaiveDate;
///
/// let period = PayPeriod::parse("16/04/2025 - 30/04/2025").unwrap();
/// assert!(casual_leave_restricted(&period, NaiveDate::from_ymd_opt(2025, 4, 20), 15));
/// assert!(!casual_leave_restricted(&period, NaiveDate::from_ymd_opt(2025, 4, 15), 15));
/// ```
pub fn casual_leave_restricted(period: &PayPeriod, doj: Option<NaiveDate>, cutoff_day: u32) -> bool {
    doj.is_some_and(|doj| {
        period.starts_in_month(doj.year(), doj.month()) && doj.day() > cutoff_day
    })
}

/// Returns true if a charge code is a casual leave code.
///
/// Matches "casual", optional whitespace, then "leave", anywhere in the
/// label and ignoring case.
///
/// # Example
///
/// ```
/// use timesheet_engine::calculation::is_casual_leave_code;
///
/// assert!(is_casual_leave_code("Casual Leave"));
/// assert!(is_casual_leave_code("LV-01 casualleave"));
/// assert!(!is_casual_leave_code("Sick Leave"));
/// ```
pub fn is_casual_leave_code(charge_code: &str) -> bool {
    let lower = charge_code.to_lowercase();
    lower.match_indices("casual").any(|(idx, word)| {
        lower[idx + word.len()..]
            .trim_start()
            .starts_with("leave")
    })
}
