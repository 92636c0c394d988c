//! Save payload construction.
//!
//! Turns grid entries into the records the backend's save endpoint expects.
//! Only cells the employee touched are sent: a value is upserted, a cleared
//! cell is sent with `null` hours so the backend deletes it.

use std::collections::BTreeSet;

use tracing::debug;

use crate::models::{HoursCell, PayPeriod, SaveRecord, TimesheetEntry};

/// Builds the save payload for a timesheet grid.
///
/// Entries in `skip_columns` (Sundays and holidays), unset cells, and rows
/// without a usable charge code (see [`clean_charge_code`]) are left out.
///
/// [`clean_charge_code`]: crate::models::clean_charge_code
///
/// # Example
///
/// ```
/// use timesheet_engine::calculation::{build_save_records, non_working_columns};
/// use timesheet_engine::models::{HoursCell, NoHolidays, PayPeriod, TimesheetEntry};
/// use rust_decimal::Decimal;
///
/// let period = PayPeriod::parse("01/04/2025 - 15/04/2025").unwrap();
/// let skip = non_working_columns(&period, &NoHolidays);
/// let entries = vec![
///     TimesheetEntry::with_hours("PRJ-100", 0, 1, Decimal::new(90, 1)),
///     TimesheetEntry::new("PRJ-100", 0, 2, HoursCell::Cleared),
///     TimesheetEntry::new("PRJ-100", 0, 3, HoursCell::Unset),
/// ];
///
/// let records = build_save_records(&entries, "asha", &period, &skip);
/// assert_eq!(records.len(), 2);
/// assert_eq!(records[0].hours.as_deref(), Some("9"));
/// assert_eq!(records[1].cell_index, "0_2");
/// assert_eq!(records[1].hours, None);
/// ```
pub fn build_save_records(
    entries: &[TimesheetEntry],
    username: &str,
    period: &PayPeriod,
    skip_columns: &BTreeSet<u32>,
) -> Vec<SaveRecord> {
    let period_label = period.to_string();

    let records: Vec<SaveRecord> = entries
        .iter()
        .filter(|entry| !skip_columns.contains(&entry.column))
        .filter_map(|entry| {
            let charge_code = entry.usable_charge_code()?.to_string();
            let hours = match entry.hours {
                HoursCell::Unset => return None,
                HoursCell::Cleared => None,
                HoursCell::Value(hours) => Some(hours.normalize().to_string()),
            };
            Some(SaveRecord {
                username: username.to_string(),
                period: period_label.clone(),
                charge_code,
                cell_index: entry.cell_index().to_string(),
                hours,
            })
        })
        .collect();

    debug!(
        username = %username,
        period = %period_label,
        records = records.len(),
        "Built save payload"
    );

    records
}
