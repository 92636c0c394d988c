//! Summary and payslip models.
//!
//! This module contains the per-period summary reported by the backend, the
//! monthly summary aggregated from two half-month periods, salary revisions,
//! and the [`Payslip`] produced for a month together with its audit trail.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The approval status that unlocks monthly summaries.
pub const APPROVED_STATUS: &str = "Approved";

/// Totals for one submitted half-month period.
///
/// Leave figures are in days; `total_hours` and `total_absences` are in hours.
///
/// # Example
///
/// ```
/// use timesheet_engine::models::PeriodSummary;
/// use rust_decimal::Decimal;
///
/// let summary = PeriodSummary {
///     period: "01/04/2025 - 15/04/2025".to_string(),
///     status: "approved".to_string(),
///     total_hours: Decimal::new(117, 0),
///     ..PeriodSummary::default()
/// };
/// assert!(summary.is_approved());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodSummary {
    /// The period in `"DD/MM/YYYY - DD/MM/YYYY"` form.
    pub period: String,
    /// The workflow status (e.g., "Submitted", "Approved", "Rejected").
    pub status: String,
    /// Total hours logged in the period, including leave rows.
    #[serde(default)]
    pub total_hours: Decimal,
    /// Casual leave taken, in days.
    #[serde(default)]
    pub casual_leave_days: Decimal,
    /// Sick leave taken, in days.
    #[serde(default)]
    pub sick_leave_days: Decimal,
    /// Leave beyond entitlement, in days (becomes loss of pay).
    #[serde(default)]
    pub paid_leave_days: Decimal,
    /// Hours of absence in the period.
    #[serde(default)]
    pub total_absences: Decimal,
}

impl PeriodSummary {
    /// Returns true if the period has been approved (case-insensitive).
    pub fn is_approved(&self) -> bool {
        self.status.trim().eq_ignore_ascii_case(APPROVED_STATUS)
    }
}

/// Aggregated figures for one calendar month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlySummary {
    /// The employee's username.
    pub username: String,
    /// The month in `yyyy-MM` form.
    pub month: String,
    /// Casual leave taken in the month, in days.
    pub casual_leave_days: Decimal,
    /// Sick leave taken in the month, in days.
    pub sick_leave_days: Decimal,
    /// Absences in the month, in days.
    pub total_absences: Decimal,
    /// Loss-of-pay days in the month.
    pub total_lop_days: Decimal,
    /// Days worked in the month (logged hours divided by the standard day).
    pub total_working_days: Decimal,
    /// Whether a payslip has already been approved for this month.
    #[serde(default)]
    pub is_payslip_generated: bool,
}

/// A monthly salary effective from a given date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalaryRevision {
    /// The first day this salary applies.
    pub effective_from: NaiveDate,
    /// The gross monthly salary.
    pub monthly_salary: Decimal,
}

/// A single step in a payslip's audit trail.
///
/// Each step captures the input, output, and reasoning for one rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditStep {
    /// The sequential step number.
    pub step_number: u32,
    /// The unique identifier of the rule that was applied.
    pub rule_id: String,
    /// The human-readable name of the rule.
    pub rule_name: String,
    /// The input data for this step.
    pub input: serde_json::Value,
    /// The output data from this step.
    pub output: serde_json::Value,
    /// Human-readable explanation of the decision.
    pub reasoning: String,
}

/// Payslip figures for one employee and month.
///
/// Day counts are in days; monetary amounts are rounded to two places.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payslip {
    /// Unique identifier for this calculation.
    pub calculation_id: Uuid,
    /// When the calculation was performed.
    pub calculated_at: DateTime<Utc>,
    /// The version of the engine that performed the calculation.
    pub engine_version: String,
    /// The employee's username.
    pub username: String,
    /// The employee's designation.
    pub designation: String,
    /// The employee's date of joining, if known.
    pub date_of_joining: Option<NaiveDate>,
    /// The payslip month in `yyyy-MM` form.
    pub month: String,
    /// Standard days: working days plus Sundays and holidays on the rolls.
    pub std_days: Decimal,
    /// Days actually worked plus Sundays and holidays on the rolls.
    pub total_worked: Decimal,
    /// Absence days.
    pub total_leaves: Decimal,
    /// Loss-of-pay days.
    pub lop_days: Decimal,
    /// Sundays counted for the month.
    pub sundays: u32,
    /// Holidays counted for the month.
    pub holidays: u32,
    /// The monthly salary in effect.
    pub basic_salary: Decimal,
    /// Pay for the standard days.
    pub gross_pay: Decimal,
    /// Loss-of-pay deduction.
    pub deduction: Decimal,
    /// Gross pay less deductions.
    pub net_pay: Decimal,
    /// The ordered calculation steps.
    pub audit_trail: Vec<AuditStep>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_is_approved_ignores_case_and_whitespace() {
        let mut summary = PeriodSummary {
            status: " APPROVED ".to_string(),
            ..PeriodSummary::default()
        };
        assert!(summary.is_approved());

        summary.status = "Submitted".to_string();
        assert!(!summary.is_approved());
    }

    #[test]
    fn test_deserialize_period_summary_with_defaults() {
        let json = r#"{
            "period": "01/04/2025 - 15/04/2025",
            "status": "Approved",
            "total_hours": "117"
        }"#;
        let summary: PeriodSummary = serde_json::from_str(json).unwrap();
        assert_eq!(summary.total_hours, dec("117"));
        assert_eq!(summary.casual_leave_days, Decimal::ZERO);
        assert_eq!(summary.total_absences, Decimal::ZERO);
    }

    #[test]
    fn test_deserialize_salary_revision() {
        let json = r#"{ "effective_from": "2025-04-01", "monthly_salary": "30000" }"#;
        let revision: SalaryRevision = serde_json::from_str(json).unwrap();
        assert_eq!(
            revision.effective_from,
            NaiveDate::from_ymd_opt(2025, 4, 1).unwrap()
        );
        assert_eq!(revision.monthly_salary, dec("30000"));
    }

    #[test]
    fn test_monthly_summary_payslip_flag_defaults_false() {
        let json = r#"{
            "username": "asha",
            "month": "2025-04",
            "casual_leave_days": "1",
            "sick_leave_days": "0",
            "total_absences": "1",
            "total_lop_days": "0",
            "total_working_days": "25"
        }"#;
        let summary: MonthlySummary = serde_json::from_str(json).unwrap();
        assert!(!summary.is_payslip_generated);
        assert_eq!(summary.total_working_days, dec("25"));
    }

    #[test]
    fn test_audit_step_serialization() {
        let step = AuditStep {
            step_number: 1,
            rule_id: "salary_revision_lookup".to_string(),
            rule_name: "Salary Revision Lookup".to_string(),
            input: serde_json::json!({ "month": "2025-04" }),
            output: serde_json::json!({ "monthly_salary": "30000" }),
            reasoning: "Latest revision effective on or before 2025-04".to_string(),
        };
        let json = serde_json::to_string(&step).unwrap();
        assert!(json.contains("\"rule_id\":\"salary_revision_lookup\""));
        assert!(json.contains("\"month\":\"2025-04\""));
    }
}
