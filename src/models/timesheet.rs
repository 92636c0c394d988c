//! Timesheet grid models.
//!
//! A timesheet is a grid: one row per charge code, one column per day of the
//! pay period. Each cell is modelled by [`HoursCell`], which distinguishes a
//! cell that was never filled from one the employee explicitly cleared. The
//! backend addresses cells by a `row_col` index ([`CellIndex`]) and receives
//! [`SaveRecord`]s.

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// Marker the grid appends to a row label for its delete button.
const DELETE_MARKER: char = '✖';

/// Label of a row whose charge code has not been chosen yet.
pub const PLACEHOLDER_CHARGE_CODE: &str = "Select Charge Code";

/// The state of a single hours cell.
///
/// # Example
///
/// ```
/// use timesheet_engine::models::HoursCell;
/// use rust_decimal::Decimal;
///
/// assert_eq!(HoursCell::from_edit("", "7.5").unwrap(), HoursCell::Value(Decimal::new(75, 1)));
/// assert_eq!(HoursCell::from_edit("4", "").unwrap(), HoursCell::Cleared);
/// assert_eq!(HoursCell::from_edit("", "").unwrap(), HoursCell::Unset);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "state", content = "hours", rename_all = "snake_case")]
pub enum HoursCell {
    /// The cell was never filled; nothing to send.
    #[default]
    Unset,
    /// The cell held a value that the employee removed; the backend must delete it.
    Cleared,
    /// The cell holds a number of hours.
    Value(Decimal),
}

impl HoursCell {
    /// Derives the cell state from its previously saved and current text.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidHours`] when the current text is not a
    /// decimal number.
    pub fn from_edit(previous: &str, current: &str) -> EngineResult<Self> {
        let current = current.trim();
        if !current.is_empty() {
            return parse_hours(current).map(HoursCell::Value);
        }
        if previous.trim().is_empty() {
            Ok(HoursCell::Unset)
        } else {
            Ok(HoursCell::Cleared)
        }
    }

    /// Returns the hours if the cell holds a value.
    pub fn value(&self) -> Option<Decimal> {
        match self {
            HoursCell::Value(hours) => Some(*hours),
            HoursCell::Unset | HoursCell::Cleared => None,
        }
    }

    /// Returns true if the cell is something the backend must hear about.
    pub fn is_attempt(&self) -> bool {
        !matches!(self, HoursCell::Unset)
    }
}

/// Parses the text of an hours cell.
fn parse_hours(text: &str) -> EngineResult<Decimal> {
    Decimal::from_str(text).map_err(|_| EngineError::InvalidHours {
        value: text.to_string(),
    })
}

/// A single cell of the timesheet grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimesheetEntry {
    /// The row's charge code label (project, leave type, or metadata label).
    pub charge_code: String,
    /// The 0-based grid row.
    pub row: usize,
    /// The 1-based grid column; column `n` is day `n` of the pay period.
    pub column: u32,
    /// The cell contents.
    pub hours: HoursCell,
}

impl TimesheetEntry {
    /// Creates a timesheet entry.
    pub fn new(charge_code: impl Into<String>, row: usize, column: u32, hours: HoursCell) -> Self {
        Self {
            charge_code: charge_code.into(),
            row,
            column,
            hours,
        }
    }

    /// Creates an entry holding a number of hours.
    pub fn with_hours(charge_code: impl Into<String>, row: usize, column: u32, hours: Decimal) -> Self {
        Self::new(charge_code, row, column, HoursCell::Value(hours))
    }

    /// The row's charge code without the delete marker, or `None` if the
    /// row has no usable charge code.
    pub fn usable_charge_code(&self) -> Option<&str> {
        clean_charge_code(&self.charge_code)
    }

    /// The backend index of this cell.
    pub fn cell_index(&self) -> CellIndex {
        CellIndex {
            row: self.row,
            column: self.column,
        }
    }
}

/// Strips the delete marker from a row label.
///
/// Returns `None` for an empty label or one still showing the
/// "Select Charge Code" placeholder. Such rows are neither validated nor saved.
///
/// # Example
///
/// ```
/// use timesheet_engine::models::clean_charge_code;
///
/// assert_eq!(clean_charge_code("PRJ-100 ✖"), Some("PRJ-100"));
/// assert_eq!(clean_charge_code("Select Charge Code"), None);
/// ```
pub fn clean_charge_code(label: &str) -> Option<&str> {
    let code = label
        .split_once(DELETE_MARKER)
        .map_or(label, |(code, _)| code)
        .trim();

    if code.is_empty() || code.contains(PLACEHOLDER_CHARGE_CODE) {
        None
    } else {
        Some(code)
    }
}

/// The backend's `row_col` address of a grid cell.
///
/// # Example
///
/// ```
/// use timesheet_engine::models::CellIndex;
///
/// let index: CellIndex = "2_11".parse().unwrap();
/// assert_eq!(index.row, 2);
/// assert_eq!(index.column, 11);
/// assert_eq!(index.to_string(), "2_11");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellIndex {
    /// The 0-based grid row.
    pub row: usize,
    /// The 1-based grid column.
    pub column: u32,
}

impl CellIndex {
    /// Parses a `row_col` cell index.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidCellIndex`] if either half is missing or
    /// not a non-negative integer.
    pub fn parse(value: &str) -> EngineResult<Self> {
        let invalid = || EngineError::InvalidCellIndex {
            value: value.to_string(),
        };
        let (row, column) = value.trim().split_once('_').ok_or_else(invalid)?;
        Ok(Self {
            row: row.parse().map_err(|_| invalid())?,
            column: column.parse().map_err(|_| invalid())?,
        })
    }
}

impl fmt::Display for CellIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}", self.row, self.column)
    }
}

impl FromStr for CellIndex {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// One record of the payload handed to the backend's save endpoint.
///
/// Serializes with the backend's camelCase field names; `hours: None`
/// serializes as `null`, the deletion marker for a cleared cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveRecord {
    /// The employee's username.
    pub username: String,
    /// The period in `"DD/MM/YYYY - DD/MM/YYYY"` form.
    pub period: String,
    /// The row's charge code.
    pub charge_code: String,
    /// The `row_col` cell index.
    pub cell_index: String,
    /// The hours as text, or `None` for a cleared cell.
    pub hours: Option<String>,
}
