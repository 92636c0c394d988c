//! Payslip calculation.
//!
//! Turns an approved monthly summary into payslip figures. Sundays and
//! company holidays are paid days on top of the days worked; in the
//! onboarding month only those on or after the date of joining count.
//! Pay accrues at the monthly salary divided by the calendar days in the
//! month, and loss-of-pay days are deducted at the same rate.

use std::collections::BTreeSet;

use chrono::{Datelike, NaiveDate, Utc, Weekday};
use rust_decimal::Decimal;
use tracing::info;
use uuid::Uuid;

use crate::error::{EngineError, EngineResult};
use crate::models::{AuditStep, Employee, Holiday, MonthlySummary, Payslip, SalaryRevision, month_bounds};

/// Decimal places for monetary amounts.
const MONEY_PRECISION: u32 = 2;

/// Paid non-working days in a month.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct PaidDaysOff {
    sundays: u32,
    holidays: u32,
}

/// Calculates the payslip for an employee and month.
///
/// # Arguments
///
/// * `employee` - The employee being paid
/// * `year`, `month` - The payslip month
/// * `holidays` - Company holidays; only those in the payslip month are used
/// * `summary` - The employee's monthly summary for the payslip month
/// * `salaries` - The employee's salary revisions, in any order
///
/// # Errors
///
/// Returns [`EngineError::InvalidMonth`] for a month outside 1 to 12, or
/// [`EngineError::SalaryNotFound`] if no salary revision is effective by
/// the payslip month.
///
/// # Example
///
/// ```
/// use timesheet_engine::calculation::calculate_payslip;
/// use timesheet_engine::models::{Employee, MonthlySummary, SalaryRevision};
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let employee = Employee::new("asha", NaiveDate::from_ymd_opt(2024, 1, 8));
/// let summary = MonthlySummary {
///     username: "asha".to_string(),
///     month: "2025-04".to_string(),
///     casual_leave_days: Decimal::ZERO,
///     sick_leave_days: Decimal::ZERO,
///     total_absences: Decimal::ZERO,
///     total_lop_days: Decimal::ZERO,
///     total_working_days: Decimal::new(26, 0),
///     is_payslip_generated: false,
/// };
/// let salaries = vec![SalaryRevision {
///     effective_from: NaiveDate::from_ymd_opt(2024, 1, 8).unwrap(),
///     monthly_salary: Decimal::new(30000, 0),
/// }];
///
/// let payslip = calculate_payslip(&employee, 2025, 4, &[], &summary, &salaries).unwrap();
/// assert_eq!(payslip.sundays, 4);
/// assert_eq!(payslip.std_days, Decimal::new(30, 0));
/// assert_eq!(payslip.net_pay, Decimal::new(30000, 0));
/// ```
pub fn calculate_payslip(
    employee: &Employee,
    year: i32,
    month: u32,
    holidays: &[Holiday],
    summary: &MonthlySummary,
    salaries: &[SalaryRevision],
) -> EngineResult<Payslip> {
    let (month_start, month_end) = month_bounds(year, month)?;
    let mut audit_trail = Vec::new();

    // Step 1: paid Sundays and holidays
    let paid_from = if employee.joined_in_month(year, month) {
        employee.date_of_joining.unwrap_or(month_start)
    } else {
        month_start
    };
    let days_off = count_paid_days_off(month_start, month_end, paid_from, holidays);
    audit_trail.push(AuditStep {
        step_number: 1,
        rule_id: "paid_days_off".to_string(),
        rule_name: "Paid Sundays and Holidays".to_string(),
        input: serde_json::json!({
            "month_start": month_start.to_string(),
            "month_end": month_end.to_string(),
            "counted_from": paid_from.to_string()
        }),
        output: serde_json::json!({
            "sundays": days_off.sundays,
            "holidays": days_off.holidays
        }),
        reasoning: format!(
            "{} Sundays and {} holidays on or after {}",
            days_off.sundays, days_off.holidays, paid_from
        ),
    });

    // Step 2: standard and worked days
    let paid_off = Decimal::from(days_off.sundays + days_off.holidays);
    let std_days = summary.total_working_days + paid_off;
    let total_worked = summary.total_working_days - summary.total_absences + paid_off;
    audit_trail.push(AuditStep {
        step_number: 2,
        rule_id: "attendance_days".to_string(),
        rule_name: "Standard and Worked Days".to_string(),
        input: serde_json::json!({
            "working_days": summary.total_working_days.to_string(),
            "absences": summary.total_absences.to_string(),
            "paid_days_off": paid_off.to_string()
        }),
        output: serde_json::json!({
            "std_days": std_days.to_string(),
            "total_worked": total_worked.to_string()
        }),
        reasoning: format!(
            "Standard days {} = {} working + {} paid days off; worked days {}",
            std_days, summary.total_working_days, paid_off, total_worked
        ),
    });

    // Step 3: salary revision
    let revision = effective_salary(salaries, year, month).ok_or_else(|| EngineError::SalaryNotFound {
        username: employee.username.clone(),
        year,
        month,
    })?;
    audit_trail.push(AuditStep {
        step_number: 3,
        rule_id: "salary_lookup".to_string(),
        rule_name: "Salary Revision Lookup".to_string(),
        input: serde_json::json!({
            "month": format!("{year:04}-{month:02}"),
            "revisions": salaries.len()
        }),
        output: serde_json::json!({
            "effective_from": revision.effective_from.to_string(),
            "monthly_salary": revision.monthly_salary.to_string()
        }),
        reasoning: format!(
            "Using salary {} effective {}",
            revision.monthly_salary, revision.effective_from
        ),
    });

    // Step 4: pay
    let days_in_month = Decimal::from(month_end.day());
    let per_day = revision.monthly_salary / days_in_month;
    let gross_pay = (per_day * std_days).round_dp(MONEY_PRECISION);
    let deduction = (per_day * summary.total_lop_days).round_dp(MONEY_PRECISION);
    let net_pay = gross_pay - deduction;
    audit_trail.push(AuditStep {
        step_number: 4,
        rule_id: "pay_calculation".to_string(),
        rule_name: "Gross, Deduction and Net Pay".to_string(),
        input: serde_json::json!({
            "monthly_salary": revision.monthly_salary.to_string(),
            "days_in_month": days_in_month.to_string(),
            "std_days": std_days.to_string(),
            "lop_days": summary.total_lop_days.to_string()
        }),
        output: serde_json::json!({
            "gross_pay": gross_pay.to_string(),
            "deduction": deduction.to_string(),
            "net_pay": net_pay.to_string()
        }),
        reasoning: format!(
            "Daily rate {} x {} standard days = {}; less {} LOP days = {}",
            per_day.round_dp(MONEY_PRECISION),
            std_days,
            gross_pay,
            summary.total_lop_days,
            net_pay
        ),
    });

    let payslip = Payslip {
        calculation_id: Uuid::new_v4(),
        calculated_at: Utc::now(),
        engine_version: env!("CARGO_PKG_VERSION").to_string(),
        username: employee.username.clone(),
        designation: employee.designation.clone(),
        date_of_joining: employee.date_of_joining,
        month: format!("{year:04}-{month:02}"),
        std_days,
        total_worked,
        total_leaves: summary.total_absences,
        lop_days: summary.total_lop_days,
        sundays: days_off.sundays,
        holidays: days_off.holidays,
        basic_salary: revision.monthly_salary,
        gross_pay,
        deduction,
        net_pay,
        audit_trail,
    };

    info!(
        calculation_id = %payslip.calculation_id,
        username = %payslip.username,
        month = %payslip.month,
        net_pay = %payslip.net_pay,
        "Calculated payslip"
    );

    Ok(payslip)
}

/// Counts Sundays and holidays from `paid_from` to `month_end`.
///
/// A holiday on a Sunday counts once, as a Sunday, and is not also counted
/// as a holiday. The day is paid once, so `std_days` never includes it twice.
fn count_paid_days_off(
    month_start: NaiveDate,
    month_end: NaiveDate,
    paid_from: NaiveDate,
    holidays: &[Holiday],
) -> PaidDaysOff {
    let first = paid_from.max(month_start);
    let holiday_dates: BTreeSet<NaiveDate> = holidays
        .iter()
        .map(|holiday| holiday.date)
        .filter(|date| *date >= first && *date <= month_end)
        .collect();

    let mut days_off = PaidDaysOff { sundays: 0, holidays: 0 };
    for date in first.iter_days().take_while(|date| *date <= month_end) {
        if date.weekday() == Weekday::Sun {
            days_off.sundays += 1;
        } else if holiday_dates.contains(&date) {
            days_off.holidays += 1;
        }
    }
    days_off
}

/// Returns the latest salary revision effective by the given month.
fn effective_salary(salaries: &[SalaryRevision], year: i32, month: u32) -> Option<&SalaryRevision> {
    salaries
        .iter()
        .filter(|revision| {
            let from = revision.effective_from;
            (from.year(), from.month()) <= (year, month)
        })
        .max_by_key(|revision| revision.effective_from)
}
