//! Employee model.
//!
//! The portal only needs three facts about the logged-in employee: who they
//! are, their designation (for payslips) and their date of joining, which
//! prorates the onboarding month. These are passed explicitly to every
//! calculation rather than read from a session.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// Date formats accepted for a stored date of joining.
const DATE_OF_JOINING_FORMATS: [&str; 2] = ["%Y-%m-%d", "%d/%m/%Y"];

/// Represents an employee submitting timesheets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    /// The login name, used as the key for timesheets and summaries.
    pub username: String,
    /// The employee's designation (e.g., "Software Engineer").
    #[serde(default)]
    pub designation: String,
    /// The employee's first working day, if known.
    #[serde(default)]
    pub date_of_joining: Option<NaiveDate>,
}

impl Employee {
    /// Creates an employee record.
    pub fn new(username: impl Into<String>, date_of_joining: Option<NaiveDate>) -> Self {
        Self {
            username: username.into(),
            designation: String::new(),
            date_of_joining,
        }
    }

    /// Returns true if the employee joined during the given calendar month.
    ///
    /// # Examples
    ///
    /// ```
    /// use timesheet_engine::models::Employee;
    /// use chrono::NaiveDate;
    ///
    /// let employee = Employee::new("asha", NaiveDate::from_ymd_opt(2025, 4, 10));
    /// assert!(employee.joined_in_month(2025, 4));
    /// assert!(!employee.joined_in_month(2025, 5));
    /// ```
    pub fn joined_in_month(&self, year: i32, month: u32) -> bool {
        self.date_of_joining
            .is_some_and(|doj| doj.year() == year && doj.month() == month)
    }
}

/// Parses a stored date of joining.
///
/// Accepts `yyyy-MM-dd` and `dd/MM/yyyy`. A blank value means the employee
/// has no date of joining on record and yields `Ok(None)`.
///
/// # Errors
///
/// Returns [`EngineError::InvalidDate`] for any other non-blank value.
///
/// # Examples
///
/// ```
/// use timesheet_engine::models::parse_date_of_joining;
/// use chrono::NaiveDate;
///
/// let expected = NaiveDate::from_ymd_opt(2025, 4, 10);
/// assert_eq!(parse_date_of_joining("2025-04-10").unwrap(), expected);
/// assert_eq!(parse_date_of_joining("10/04/2025").unwrap(), expected);
/// assert_eq!(parse_date_of_joining("  ").unwrap(), None);
/// assert!(parse_date_of_joining("April 10").is_err());
/// ```
pub fn parse_date_of_joining(raw: &str) -> EngineResult<Option<NaiveDate>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    DATE_OF_JOINING_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(trimmed, fmt).ok())
        .map(Some)
        .ok_or_else(|| EngineError::InvalidDate {
            field: "date_of_joining".to_string(),
            value: trimmed.to_string(),
        })
}
