//! Configuration types for the timesheet portal.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files.

use rust_decimal::Decimal;
use serde::Deserialize;

use crate::models::HolidayList;

/// Default hours in one standard working day.
pub const DEFAULT_HOURS_PER_DAY: Decimal = Decimal::from_parts(9, 0, 0, false, 0);

/// Default last day of the month on which a new joiner still accrues casual leave.
pub const DEFAULT_CASUAL_LEAVE_CUTOFF_DAY: u32 = 15;

/// Row labels that carry metadata rather than hours.
pub const DEFAULT_METADATA_ROWS: [&str; 2] = ["work location", "company code"];

/// Metadata identifying a configuration set.
#[derive(Debug, Clone, Deserialize)]
pub struct PortalMetadata {
    /// The organisation the configuration belongs to.
    pub organisation: String,
    /// The version or effective date of the configuration.
    pub version: String,
}

/// Timesheet rules applied by the calculators.
///
/// # Example
///
/// ```
/// use timesheet_engine::config::TimesheetPolicy;
/// use rust_decimal::Decimal;
///
/// let policy = TimesheetPolicy::default();
/// assert_eq!(policy.hours_per_day, Decimal::new(9, 0));
/// assert!(policy.is_metadata_row("Work Location"));
/// assert!(!policy.is_metadata_row("PRJ-100"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TimesheetPolicy {
    /// Hours expected for one working day.
    #[serde(default = "default_hours_per_day")]
    pub hours_per_day: Decimal,
    /// Joiners after this day of their onboarding month may not book casual leave.
    #[serde(default = "default_casual_leave_cutoff_day")]
    pub casual_leave_cutoff_day: u32,
    /// Lower-case labels of rows exempt from totals and coverage checks.
    #[serde(default = "default_metadata_rows")]
    pub metadata_rows: Vec<String>,
}

impl TimesheetPolicy {
    /// Returns true if a row label names a metadata row (case-insensitive).
    pub fn is_metadata_row(&self, label: &str) -> bool {
        let label = label.trim().to_lowercase();
        self.metadata_rows
            .iter()
            .any(|row| label.contains(row.to_lowercase().as_str()))
    }
}

impl Default for TimesheetPolicy {
    fn default() -> Self {
        Self {
            hours_per_day: DEFAULT_HOURS_PER_DAY,
            casual_leave_cutoff_day: DEFAULT_CASUAL_LEAVE_CUTOFF_DAY,
            metadata_rows: default_metadata_rows(),
        }
    }
}

fn default_hours_per_day() -> Decimal {
    DEFAULT_HOURS_PER_DAY
}

fn default_casual_leave_cutoff_day() -> u32 {
    DEFAULT_CASUAL_LEAVE_CUTOFF_DAY
}

fn default_metadata_rows() -> Vec<String> {
    DEFAULT_METADATA_ROWS.iter().map(|s| s.to_string()).collect()
}

/// Yearly leave allowances.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LeaveEntitlements {
    /// Casual leave days allowed per year.
    pub casual_allowed: Decimal,
    /// Sick leave days allowed per year.
    pub sick_allowed: Decimal,
    /// Floating holidays allowed per year.
    pub floating_allowed: Decimal,
}

impl Default for LeaveEntitlements {
    fn default() -> Self {
        Self {
            casual_allowed: Decimal::new(12, 0),
            sick_allowed: Decimal::new(6, 0),
            floating_allowed: Decimal::new(2, 0),
        }
    }
}

/// Structure of `policy.yaml`.
#[derive(Debug, Clone, Deserialize)]
pub struct PolicyFile {
    /// Configuration metadata.
    pub portal: PortalMetadata,
    /// Timesheet rules.
    #[serde(default)]
    pub timesheet: TimesheetPolicy,
    /// Leave allowances.
    #[serde(default)]
    pub leave: LeaveEntitlements,
}

/// The complete portal configuration loaded from YAML files.
#[derive(Debug, Clone)]
pub struct PortalConfig {
    metadata: PortalMetadata,
    policy: TimesheetPolicy,
    leave: LeaveEntitlements,
    holidays: HolidayList,
}

impl PortalConfig {
    /// Creates a new PortalConfig from its component parts.
    pub fn new(
        metadata: PortalMetadata,
        policy: TimesheetPolicy,
        leave: LeaveEntitlements,
        holidays: HolidayList,
    ) -> Self {
        let mut holidays = holidays;
        holidays.holidays.sort_by_key(|h| h.date);
        Self {
            metadata,
            policy,
            leave,
            holidays,
        }
    }

    /// Returns the configuration metadata.
    pub fn metadata(&self) -> &PortalMetadata {
        &self.metadata
    }

    /// Returns the timesheet policy.
    pub fn policy(&self) -> &TimesheetPolicy {
        &self.policy
    }

    /// Returns the leave allowances.
    pub fn leave(&self) -> &LeaveEntitlements {
        &self.leave
    }

    /// Returns all configured holidays, sorted by date.
    pub fn holidays(&self) -> &HolidayList {
        &self.holidays
    }
}
