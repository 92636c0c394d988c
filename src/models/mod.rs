//! Core data models for the Timesheet Engine.
//!
//! This module contains all the domain models used throughout the engine.

mod employee;
mod holiday;
mod pay_period;
mod summary;
mod timesheet;

pub use employee::{Employee, parse_date_of_joining};
pub use holiday::{Holiday, HolidayCalendar, HolidayList, HolidayPredicate, NoHolidays};
pub use pay_period::{FIRST_HALF_LAST_DAY, PERIOD_DATE_FORMAT, PayPeriod, month_bounds};
pub use summary::{
    APPROVED_STATUS, AuditStep, MonthlySummary, Payslip, PeriodSummary, SalaryRevision,
};
pub use timesheet::{
    CellIndex, HoursCell, PLACEHOLDER_CHARGE_CODE, SaveRecord, TimesheetEntry, clean_charge_code,
};
