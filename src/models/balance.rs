//! Derived leave balance model.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::Employee;

/// An employee's computed leave position as of one evaluation.
///
/// Never persisted; recomputed on every read. Annual availability is rounded
/// to two decimal places, sick availability is left unrounded and may be
/// negative when the current cycle is over-used.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaveBalance {
    /// The employee this balance belongs to.
    #[serde(flatten)]
    pub employee: Employee,
    /// Annual leave days still available.
    pub leave_available: Decimal,
    /// Sick leave days still available in the current 36-month cycle.
    pub sick_leave_available: Decimal,
}
