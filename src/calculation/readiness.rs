//! Submission readiness for a saved period.
//!
//! A period can be submitted (or sent for approval) once the hours worked,
//! net of loss-of-pay leave, equal the standard allocated hours.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Readiness figures for a saved period.
///
/// # Example
///
/// ```
/// use timesheet_engine::calculation::PeriodReadiness;
/// use rust_decimal::Decimal;
///
/// let ready = PeriodReadiness::evaluate(Decimal::new(126, 0), Decimal::new(9, 0), Decimal::new(117, 0));
/// assert!(ready.can_submit);
/// assert_eq!(ready.chargeability_percent, Some(Decimal::new(100, 0)));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodReadiness {
    /// Logged hours less loss-of-pay hours.
    pub working_hours: Decimal,
    /// Standard allocated hours for the period.
    pub standard_hours: Decimal,
    /// Whether the period may be submitted or sent for approval.
    pub can_submit: bool,
    /// Working hours as a percentage of standard hours, to two places.
    pub chargeability_percent: Option<Decimal>,
}

impl PeriodReadiness {
    /// Evaluates readiness from the period's totals.
    pub fn evaluate(total_hours: Decimal, lop_hours: Decimal, standard_hours: Decimal) -> Self {
        let working_hours = total_hours - lop_hours;
        let can_submit = standard_hours > Decimal::ZERO && working_hours == standard_hours;
        let chargeability_percent = (!standard_hours.is_zero())
            .then(|| (working_hours / standard_hours * Decimal::ONE_HUNDRED).round_dp(2));

        Self {
            working_hours,
            standard_hours,
            can_submit,
            chargeability_percent,
        }
    }
}
