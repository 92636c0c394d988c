//! Yearly leave balances.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::LeaveEntitlements;

/// Leave taken so far in the year, in days.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaveUsage {
    /// Casual leave days taken.
    #[serde(default)]
    pub casual_taken: Decimal,
    /// Sick leave days taken.
    #[serde(default)]
    pub sick_taken: Decimal,
    /// Floating holidays taken.
    #[serde(default)]
    pub floating_taken: Decimal,
}

/// Leave remaining for the year, in days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaveBalance {
    /// Casual leave days remaining.
    pub casual_remaining: Decimal,
    /// Sick leave days remaining.
    pub sick_remaining: Decimal,
    /// Floating holidays remaining.
    pub floating_remaining: Decimal,
}

/// Calculates the remaining leave; overdrawn leave shows as zero.
///
/// # Example
///
/// ```
/// use timesheet_engine::calculation::{leave_balance, LeaveUsage};
/// use timesheet_engine::config::LeaveEntitlements;
/// use rust_decimal::Decimal;
///
/// let usage = LeaveUsage {
///     casual_taken: Decimal::new(3, 0),
///     sick_taken: Decimal::new(8, 0),
///     floating_taken: Decimal::ZERO,
/// };
/// let balance = leave_balance(&LeaveEntitlements::default(), &usage);
/// assert_eq!(balance.casual_remaining, Decimal::new(9, 0));
/// assert_eq!(balance.sick_remaining, Decimal::ZERO);
/// assert_eq!(balance.floating_remaining, Decimal::new(2, 0));
/// ```
pub fn leave_balance(entitlements: &LeaveEntitlements, usage: &LeaveUsage) -> LeaveBalance {
    let remaining = |allowed: Decimal, taken: Decimal| (allowed - taken).max(Decimal::ZERO);

    LeaveBalance {
        casual_remaining: remaining(entitlements.casual_allowed, usage.casual_taken),
        sick_remaining: remaining(entitlements.sick_allowed, usage.sick_taken),
        floating_remaining: remaining(entitlements.floating_allowed, usage.floating_taken),
    }
}
