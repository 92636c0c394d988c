//! Timesheet Engine for half-month pay periods
//!
//! This crate computes the standard allocated hours for a pay period
//! (working days times the standard day, excluding Sundays, company holidays
//! and days before an employee joined), validates a timesheet grid for
//! completeness before it is saved, and derives the monthly summary and
//! payslip figures from approved periods.

#![warn(missing_docs)]

pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
