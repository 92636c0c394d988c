//! Monthly summary generation.
//!
//! A month is summarised from its two half-month periods once both are
//! approved. An employee who joined after the 15th only has the second
//! half in their onboarding month, so the first half is not required.

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{EngineError, EngineResult};
use crate::models::{FIRST_HALF_LAST_DAY, MonthlySummary, PayPeriod, PeriodSummary};

/// The result of attempting to generate a monthly summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "summary", rename_all = "snake_case")]
pub enum MonthlySummaryOutcome {
    /// Every required period was approved and the summary was produced.
    Generated(MonthlySummary),
    /// A required period has not been submitted.
    PendingSubmission,
    /// A required period has not been approved.
    NotApproved,
}

impl MonthlySummaryOutcome {
    /// Returns the generated summary, if any.
    pub fn summary(&self) -> Option<&MonthlySummary> {
        match self {
            MonthlySummaryOutcome::Generated(summary) => Some(summary),
            MonthlySummaryOutcome::PendingSubmission | MonthlySummaryOutcome::NotApproved => None,
        }
    }

    /// Returns the status message shown to payroll.
    pub fn message(&self) -> &'static str {
        match self {
            MonthlySummaryOutcome::Generated(_) => "Monthly summary generated.",
            MonthlySummaryOutcome::PendingSubmission => "Pending submission of one or both periods.",
            MonthlySummaryOutcome::NotApproved => "One or both periods are not yet approved.",
        }
    }
}

/// Returns true if only the second half of the month counts for the employee.
///
/// # Example
///
/// ```
/// use timesheet_engine::calculation::is_single_period_month;
/// use chrono::NaiveDate;
///
/// assert!(is_single_period_month(2025, 4, NaiveDate::from_ymd_opt(2025, 4, 17)));
/// assert!(!is_single_period_month(2025, 4, NaiveDate::from_ymd_opt(2025, 4, 15)));
/// assert!(!is_single_period_month(2025, 5, NaiveDate::from_ymd_opt(2025, 4, 17)));
/// ```
pub fn is_single_period_month(year: i32, month: u32, doj: Option<NaiveDate>) -> bool {
    doj.is_some_and(|doj| {
        doj.year() == year && doj.month() == month && doj.day() > FIRST_HALF_LAST_DAY
    })
}

/// Returns the periods whose summaries a month needs, in order.
///
/// # Errors
///
/// Returns [`EngineError::InvalidMonth`] if `month` is not 1 to 12.
pub fn required_periods(year: i32, month: u32, doj: Option<NaiveDate>) -> EngineResult<Vec<PayPeriod>> {
    let (first, second) = PayPeriod::halves_of_month(year, month)?;
    if is_single_period_month(year, month, doj) {
        Ok(vec![second])
    } else {
        Ok(vec![first, second])
    }
}

/// Generates the monthly summary from the month's period summaries.
///
/// `first_half` and `second_half` are the summaries stored for the
/// 1st-15th and 16th-end periods, if any. In a single-period onboarding
/// month `first_half` is ignored.
///
/// # Errors
///
/// Returns [`EngineError::InvalidMonth`] if `month` is not 1 to 12.
///
/// # Example
///
/// ```
/// use timesheet_engine::calculation::{generate_monthly_summary, MonthlySummaryOutcome};
/// use timesheet_engine::models::PeriodSummary;
/// use rust_decimal::Decimal;
///
/// let approved = |hours: i64| PeriodSummary {
///     status: "Approved".to_string(),
///     total_hours: Decimal::new(hours, 0),
///     ..PeriodSummary::default()
/// };
///
/// let outcome = generate_monthly_summary(
///     "asha", 2025, 4, None,
///     Some(&approved(117)), Some(&approved(117)),
///     Decimal::new(9, 0),
/// ).unwrap();
///
/// let summary = outcome.summary().unwrap();
/// assert_eq!(summary.month, "2025-04");
/// assert_eq!(summary.total_working_days, Decimal::new(26, 0));
///
/// let pending = generate_monthly_summary("asha", 2025, 4, None, None, Some(&approved(117)), Decimal::new(9, 0)).unwrap();
/// assert_eq!(pending, MonthlySummaryOutcome::PendingSubmission);
/// ```
pub fn generate_monthly_summary(
    username: &str,
    year: i32,
    month: u32,
    doj: Option<NaiveDate>,
    first_half: Option<&PeriodSummary>,
    second_half: Option<&PeriodSummary>,
    hours_per_day: Decimal,
) -> EngineResult<MonthlySummaryOutcome> {
    if !(1..=12).contains(&month) {
        return Err(EngineError::InvalidMonth { year, month });
    }

    let required = if is_single_period_month(year, month, doj) {
        vec![second_half]
    } else {
        vec![first_half, second_half]
    };

    let Some(periods) = required.into_iter().collect::<Option<Vec<&PeriodSummary>>>() else {
        debug!(username = %username, year, month, "Monthly summary pending submission");
        return Ok(MonthlySummaryOutcome::PendingSubmission);
    };

    if !periods.iter().all(|period| period.is_approved()) {
        debug!(username = %username, year, month, "Monthly summary awaiting approval");
        return Ok(MonthlySummaryOutcome::NotApproved);
    }

    let total = |field: fn(&PeriodSummary) -> Decimal| -> Decimal {
        periods.iter().map(|period| field(*period)).sum()
    };

    let total_hours = total(|p| p.total_hours);
    let absence_hours = total(|p| p.total_absences);
    let (total_working_days, total_absences) = if hours_per_day.is_zero() {
        (Decimal::ZERO, Decimal::ZERO)
    } else {
        (total_hours / hours_per_day, absence_hours / hours_per_day)
    };

    let summary = MonthlySummary {
        username: username.to_string(),
        month: format!("{year:04}-{month:02}"),
        casual_leave_days: total(|p| p.casual_leave_days),
        sick_leave_days: total(|p| p.sick_leave_days),
        total_absences,
        total_lop_days: total(|p| p.paid_leave_days),
        total_working_days,
        is_payslip_generated: false,
    };

    info!(
        username = %username,
        month = %summary.month,
        working_days = %summary.total_working_days,
        lop_days = %summary.total_lop_days,
        "Generated monthly summary"
    );

    Ok(MonthlySummaryOutcome::Generated(summary))
}
