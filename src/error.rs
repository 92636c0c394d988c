//! Error types for the Timesheet Engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for structural input problems. Validation outcomes that the UI has to
//! render (total mismatch, empty columns, ...) are not errors; see
//! [`crate::calculation::ValidationOutcome`].

use thiserror::Error;

/// The main error type for the Timesheet Engine.
///
/// # Example
///
/// ```
/// use timesheet_engine::error::EngineError;
///
/// let error = EngineError::InvalidPeriod {
///     input: "not a period".to_string(),
///     message: "expected 'DD/MM/YYYY - DD/MM/YYYY'".to_string(),
/// };
/// assert_eq!(
///     error.to_string(),
///     "Invalid pay period 'not a period': expected 'DD/MM/YYYY - DD/MM/YYYY'"
/// );
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// A pay period string could not be parsed.
    #[error("Invalid pay period '{input}': {message}")]
    InvalidPeriod {
        /// The raw period string.
        input: String,
        /// A description of what made the period invalid.
        message: String,
    },

    /// A date field could not be parsed.
    #[error("Invalid date for '{field}': {value}")]
    InvalidDate {
        /// The field holding the date (e.g. "date_of_joining").
        field: String,
        /// The raw value that failed to parse.
        value: String,
    },

    /// An hours cell held something other than a decimal number.
    #[error("Invalid hours value '{value}'")]
    InvalidHours {
        /// The raw cell value.
        value: String,
    },

    /// A backend cell index was not in `row_col` form.
    #[error("Invalid cell index '{value}': expected 'row_col'")]
    InvalidCellIndex {
        /// The raw cell index.
        value: String,
    },

    /// A month number outside 1..=12, or a year chrono cannot represent.
    #[error("Invalid month {year}-{month:02}")]
    InvalidMonth {
        /// The requested year.
        year: i32,
        /// The requested month.
        month: u32,
    },

    /// No salary revision is effective for the requested month.
    #[error("No valid salary for '{username}' in {year}-{month:02}")]
    SalaryNotFound {
        /// The employee's username.
        username: String,
        /// The payslip year.
        year: i32,
        /// The payslip month.
        month: u32,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
