//! Integration tests for the Timesheet Engine.
//!
//! This test suite covers the portal flows end to end:
//! - Standard allocated hours with the shipped holiday calendar
//! - Completeness validation before save
//! - Save payload construction from grid edits
//! - Submission readiness
//! - Monthly summary and payslip generation
//! - Leave balances
//! - Error cases

use std::collections::BTreeSet;
use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;

use timesheet_engine::calculation::{
    MonthlySummaryOutcome, PeriodReadiness, ValidationOutcome, build_save_records,
    calculate_payslip, calculate_standard_hours, calculate_standard_hours_with,
    generate_monthly_summary, leave_balance, locked_columns, non_working_columns,
    required_periods, standard_hours_for_period_str, validate_timesheet, LeaveUsage,
};
use timesheet_engine::config::ConfigLoader;
use timesheet_engine::error::EngineError;
use timesheet_engine::models::{
    Employee, HolidayCalendar, HolidayPredicate, HoursCell, NoHolidays, PayPeriod, PeriodSummary,
    SalaryRevision, TimesheetEntry, parse_date_of_joining,
};

// =============================================================================
// Test Helpers
// =============================================================================

fn load_config() -> ConfigLoader {
    ConfigLoader::load("./config/default").expect("Failed to load config")
}

fn decimal(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn period(s: &str) -> PayPeriod {
    PayPeriod::parse(s).unwrap()
}

/// Builds a grid with `hours` on one project row for every required column.
fn fill_required<H: HolidayCalendar + ?Sized>(
    period: &PayPeriod,
    holidays: &H,
    doj: Option<NaiveDate>,
    hours: &str,
) -> Vec<TimesheetEntry> {
    let skip = non_working_columns(period, holidays);
    let locked = locked_columns(period, doj);
    (1..=period.column_count())
        .filter(|c| !skip.contains(c) && !locked.contains(c))
        .map(|c| TimesheetEntry::with_hours("PRJ-100", 2, c, decimal(hours)))
        .collect()
}

fn approved(period: &str, hours: &str) -> PeriodSummary {
    PeriodSummary {
        period: period.to_string(),
        status: "Approved".to_string(),
        total_hours: decimal(hours),
        ..PeriodSummary::default()
    }
}

// =============================================================================
// SECTION 1: Standard Allocated Hours
// =============================================================================

#[test]
fn test_standard_hours_april_first_half_no_holidays() {
    let hours = calculate_standard_hours(&period("01/04/2025 - 15/04/2025"), None, &NoHolidays);
    assert_eq!(hours, decimal("117"));
}

#[test]
fn test_standard_hours_mid_period_joiner() {
    let hours = calculate_standard_hours(
        &period("01/04/2025 - 15/04/2025"),
        Some(date("2025-04-10")),
        &NoHolidays,
    );
    assert_eq!(hours, decimal("45"));
}

#[test]
fn test_standard_hours_with_configured_holidays() {
    let config = load_config();
    let holidays = config.holidays();

    // 14 April is a configured holiday
    let first = calculate_standard_hours(&period("01/04/2025 - 15/04/2025"), None, holidays);
    assert_eq!(first, decimal("108"));

    // 18 April is a configured holiday
    let second = calculate_standard_hours(&period("16/04/2025 - 30/04/2025"), None, holidays);
    assert_eq!(second, decimal("108"));
}

#[test]
fn test_standard_hours_use_configured_day_length() {
    let config = load_config();
    let hours = calculate_standard_hours_with(
        &period("01/04/2025 - 15/04/2025"),
        None,
        &NoHolidays,
        config.policy().hours_per_day,
    );
    assert_eq!(hours, decimal("117"));
}

#[test]
fn test_standard_hours_with_closure_calendar() {
    let every_saturday = HolidayPredicate(|d: NaiveDate| d.format("%a").to_string() == "Sat");
    let hours = calculate_standard_hours(&period("01/04/2025 - 15/04/2025"), None, &every_saturday);
    // Saturdays 5 and 12 April
    assert_eq!(hours, decimal("99"));
}

#[test]
fn test_standard_hours_for_unparsable_period_is_zero() {
    assert_eq!(
        standard_hours_for_period_str("", None, &NoHolidays),
        Decimal::ZERO
    );
    assert_eq!(
        standard_hours_for_period_str("01/04/2025 to 15/04/2025", None, &NoHolidays),
        Decimal::ZERO
    );
}

#[test]
fn test_typed_parse_rejects_unparsable_period() {
    assert!(matches!(
        PayPeriod::parse("01/04/2025"),
        Err(EngineError::InvalidPeriod { .. })
    ));
}

// =============================================================================
// SECTION 2: Completeness Validation
// =============================================================================

#[test]
fn test_full_grid_with_configured_holidays_is_ok() {
    let config = load_config();
    let holidays = config.holidays();
    let p = period("01/04/2025 - 15/04/2025");
    let expected = calculate_standard_hours(&p, None, holidays);

    let mut entries = fill_required(&p, holidays, None, "9");
    entries.push(TimesheetEntry::with_hours("Work Location", 0, 1, decimal("1")));
    entries.push(TimesheetEntry::with_hours("Company Code", 1, 1, decimal("2")));

    let outcome = validate_timesheet(&entries, &p, expected, holidays, None, config.policy());
    assert_eq!(outcome, ValidationOutcome::Ok);
}

#[test]
fn test_matching_total_with_empty_column_three() {
    let p = period("01/04/2025 - 15/04/2025");
    let mut entries: Vec<TimesheetEntry> = fill_required(&p, &NoHolidays, None, "9")
        .into_iter()
        .filter(|e| e.column != 3)
        .collect();
    entries.push(TimesheetEntry::with_hours("PRJ-200", 3, 4, decimal("9")));

    let outcome = validate_timesheet(
        &entries,
        &p,
        decimal("117"),
        &NoHolidays,
        None,
        load_config().policy(),
    );

    assert_eq!(
        outcome,
        ValidationOutcome::EmptyColumns {
            columns: BTreeSet::from([3]),
        }
    );
}

#[test]
fn test_casual_leave_blocked_for_joiner_after_fifteenth() {
    let doj = Some(date("2025-04-20"));
    let p = period("01/04/2025 - 15/04/2025");
    let expected = calculate_standard_hours(&p, doj, &NoHolidays);
    assert_eq!(expected, Decimal::ZERO);

    let entries = vec![TimesheetEntry::with_hours("Casual Leave", 4, 2, decimal("4"))];

    let outcome = validate_timesheet(&entries, &p, expected, &NoHolidays, doj, load_config().policy());
    assert_eq!(outcome, ValidationOutcome::CasualLeaveBlocked { cutoff_day: 15 });
    assert!(outcome.message().contains("joined after the 15th"));
}

#[test]
fn test_late_joiner_flow_from_portal_inputs() {
    let config = load_config();
    let holidays = config.holidays();
    let doj = parse_date_of_joining("20/04/2025").unwrap();

    // First half: every day precedes joining, casual leave is refused.
    let first = "01/04/2025 - 15/04/2025";
    let expected = standard_hours_for_period_str(first, doj, holidays);
    assert_eq!(expected, Decimal::ZERO);

    let entries = vec![TimesheetEntry::with_hours("Casual Leave ✖", 0, 1, decimal("4"))];
    let outcome = validate_timesheet(&entries, &period(first), expected, holidays, doj, config.policy());
    assert_eq!(outcome, ValidationOutcome::CasualLeaveBlocked { cutoff_day: 15 });

    // Second half: the same rule still applies to the onboarding month.
    let second = period("16/04/2025 - 30/04/2025");
    let expected = calculate_standard_hours(&second, doj, holidays);
    let mut entries = fill_required(&second, holidays, doj, "9");
    assert!(validate_timesheet(&entries, &second, expected, holidays, doj, config.policy()).is_ok());

    entries[0].charge_code = "Casual Leave".to_string();
    let outcome = validate_timesheet(&entries, &second, expected, holidays, doj, config.policy());
    assert_eq!(outcome, ValidationOutcome::CasualLeaveBlocked { cutoff_day: 15 });

    // May is no longer the onboarding month.
    let may = period("01/05/2025 - 15/05/2025");
    let expected = calculate_standard_hours(&may, doj, holidays);
    let mut entries = fill_required(&may, holidays, doj, "9");
    entries[0].charge_code = "Casual Leave".to_string();
    assert!(validate_timesheet(&entries, &may, expected, holidays, doj, config.policy()).is_ok());
}

#[test]
fn test_placeholder_row_neither_fills_column_nor_saves() {
    let p = period("01/04/2025 - 15/04/2025");
    let skip = non_working_columns(&p, &NoHolidays);
    let mut entries: Vec<TimesheetEntry> = fill_required(&p, &NoHolidays, None, "9")
        .into_iter()
        .filter(|e| e.column != 3)
        .collect();
    entries.push(TimesheetEntry::with_hours("PRJ-200", 3, 4, decimal("9")));
    entries.push(TimesheetEntry::with_hours("Select Charge Code", 5, 3, decimal("9")));

    let outcome = validate_timesheet(
        &entries,
        &p,
        calculate_standard_hours(&p, None, &NoHolidays),
        &NoHolidays,
        None,
        load_config().policy(),
    );
    assert_eq!(
        outcome,
        ValidationOutcome::EmptyColumns {
            columns: BTreeSet::from([3]),
        }
    );

    let records = build_save_records(&entries, "asha", &p, &skip);
    assert_eq!(records.len(), entries.len() - 1);
    assert!(records.iter().all(|r| r.cell_index != "5_3"));
}

#[test]
fn test_total_mismatch_reports_both_figures() {
    let p = period("16/04/2025 - 30/04/2025");
    let entries = vec![TimesheetEntry::with_hours("PRJ-100", 2, 1, decimal("9"))];

    match validate_timesheet(&entries, &p, decimal("117"), &NoHolidays, None, load_config().policy()) {
        ValidationOutcome::TotalMismatch { actual, expected } => {
            assert_eq!(actual, decimal("9"));
            assert_eq!(expected, decimal("117"));
        }
        other => panic!("Expected TotalMismatch, got {:?}", other),
    }
}

#[test]
fn test_no_data_when_only_metadata_rows_filled() {
    let entries = vec![TimesheetEntry::with_hours("work location", 0, 1, decimal("9"))];
    let outcome = validate_timesheet(
        &entries,
        &period("01/04/2025 - 15/04/2025"),
        decimal("117"),
        &NoHolidays,
        None,
        load_config().policy(),
    );
    assert_eq!(outcome, ValidationOutcome::NoData);
}

// =============================================================================
// SECTION 3: Save Payload
// =============================================================================

#[test]
fn test_edit_cycle_produces_upserts_and_deletions() {
    let config = load_config();
    let holidays = config.holidays();
    let p = period("01/04/2025 - 15/04/2025");

    let edits = [
        // (row, column, previous, current)
        (2, 1, "", "9"),
        (2, 2, "9", ""),
        (2, 3, "", ""),
        (2, 14, "", "9"), // holiday
        (2, 6, "", "4"),  // Sunday
    ];
    let entries: Vec<TimesheetEntry> = edits
        .iter()
        .map(|(row, col, prev, cur)| {
            TimesheetEntry::new("PRJ-100", *row, *col, HoursCell::from_edit(prev, cur).unwrap())
        })
        .collect();

    let records = build_save_records(&entries, "asha", &p, &non_working_columns(&p, holidays));

    assert_eq!(records.len(), 2);
    assert_eq!(records[0].cell_index, "2_1");
    assert_eq!(records[0].hours.as_deref(), Some("9"));
    assert_eq!(records[1].cell_index, "2_2");
    assert_eq!(records[1].hours, None);

    let json = serde_json::to_value(&records).unwrap();
    assert_eq!(json[1]["period"], "01/04/2025 - 15/04/2025");
    assert!(json[1]["hours"].is_null());
}

#[test]
fn test_invalid_hours_text_is_rejected() {
    assert!(matches!(
        HoursCell::from_edit("", "9h"),
        Err(EngineError::InvalidHours { .. })
    ));
}

// =============================================================================
// SECTION 4: Readiness, Monthly Summary and Payslip
// =============================================================================

#[test]
fn test_period_readiness_after_save() {
    let standard = calculate_standard_hours(&period("16/04/2025 - 30/04/2025"), None, &NoHolidays);
    let ready = PeriodReadiness::evaluate(decimal("126"), decimal("9"), standard);
    assert!(ready.can_submit);

    let short = PeriodReadiness::evaluate(decimal("117"), decimal("9"), standard);
    assert!(!short.can_submit);
}

#[test]
fn test_month_to_payslip_flow() {
    let config = load_config();
    let employee = Employee {
        username: "asha".to_string(),
        designation: "Software Engineer".to_string(),
        date_of_joining: parse_date_of_joining("08/01/2024").unwrap(),
    };

    let periods = required_periods(2025, 4, employee.date_of_joining).unwrap();
    assert_eq!(periods.len(), 2);

    let first = PeriodSummary {
        paid_leave_days: decimal("1"),
        total_absences: decimal("9"),
        ..approved(&periods[0].to_string(), "108")
    };
    let second = approved(&periods[1].to_string(), "108");

    let outcome = generate_monthly_summary(
        &employee.username,
        2025,
        4,
        employee.date_of_joining,
        Some(&first),
        Some(&second),
        config.policy().hours_per_day,
    )
    .unwrap();
    let summary = outcome.summary().expect("summary generated");
    assert_eq!(summary.total_working_days, decimal("24"));
    assert_eq!(summary.total_absences, decimal("1"));
    assert_eq!(summary.total_lop_days, decimal("1"));

    let salaries = vec![SalaryRevision {
        effective_from: date("2024-01-08"),
        monthly_salary: decimal("30000"),
    }];
    let payslip = calculate_payslip(
        &employee,
        2025,
        4,
        &config.holidays_in_month(2025, 4),
        summary,
        &salaries,
    )
    .unwrap();

    assert_eq!(payslip.sundays, 4);
    assert_eq!(payslip.holidays, 2);
    assert_eq!(payslip.std_days, decimal("30"));
    assert_eq!(payslip.total_worked, decimal("29"));
    assert_eq!(payslip.gross_pay, decimal("30000"));
    assert_eq!(payslip.deduction, decimal("1000"));
    assert_eq!(payslip.net_pay, decimal("29000"));
    assert_eq!(payslip.audit_trail.len(), 4);
}

#[test]
fn test_monthly_summary_waits_for_approval() {
    let first = approved("01/04/2025 - 15/04/2025", "117");
    let second = PeriodSummary {
        status: "Submitted".to_string(),
        ..approved("16/04/2025 - 30/04/2025", "117")
    };

    let outcome =
        generate_monthly_summary("asha", 2025, 4, None, Some(&first), Some(&second), decimal("9"))
            .unwrap();
    assert_eq!(outcome, MonthlySummaryOutcome::NotApproved);
}

#[test]
fn test_payslip_without_salary_fails() {
    let config = load_config();
    let employee = Employee::new("ravi", Some(date("2025-04-17")));
    let second = approved("16/04/2025 - 30/04/2025", "90");

    let outcome = generate_monthly_summary(
        "ravi",
        2025,
        4,
        employee.date_of_joining,
        None,
        Some(&second),
        config.policy().hours_per_day,
    )
    .unwrap();
    let summary = outcome.summary().unwrap();

    let result = calculate_payslip(&employee, 2025, 4, &config.holidays_in_month(2025, 4), summary, &[]);
    assert!(matches!(result, Err(EngineError::SalaryNotFound { .. })));
}

// =============================================================================
// SECTION 5: Leave Balances
// =============================================================================

#[test]
fn test_leave_balance_from_configured_entitlements() {
    let config = load_config();
    let usage = LeaveUsage {
        casual_taken: decimal("2"),
        sick_taken: decimal("7"),
        floating_taken: decimal("1"),
    };

    let balance = leave_balance(config.leave_entitlements(), &usage);
    assert_eq!(balance.casual_remaining, decimal("10"));
    assert_eq!(balance.sick_remaining, Decimal::ZERO);
    assert_eq!(balance.floating_remaining, decimal("1"));
}
