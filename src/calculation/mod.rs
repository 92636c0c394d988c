//! Calculation logic for the Timesheet Engine.
//!
//! This module contains the timesheet calculations: working day detection
//! and standard allocated hours, date-of-joining rules for the onboarding
//! month, completeness validation before save, the save payload, submission
//! readiness, monthly summaries, payslips, and leave balances.

mod completeness;
mod joining;
mod leave_balance;
mod monthly_summary;
mod payslip;
mod readiness;
mod save_payload;
mod working_days;

pub use completeness::{ValidationOutcome, validate_timesheet};
pub use joining::{casual_leave_restricted, is_before_joining, is_casual_leave_code, locked_columns};
pub use leave_balance::{LeaveBalance, LeaveUsage, leave_balance};
pub use monthly_summary::{
    MonthlySummaryOutcome, generate_monthly_summary, is_single_period_month, required_periods,
};
pub use payslip::calculate_payslip;
pub use readiness::PeriodReadiness;
pub use save_payload::build_save_records;
pub use working_days::{
    DayType, STANDARD_HOURS_PER_DAY, WorkingDaysBreakdown, calculate_standard_hours,
    calculate_standard_hours_with, classify_day, count_working_days, non_working_columns,
    standard_hours_for_period_str,
};
