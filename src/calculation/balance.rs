//! Per-employee balance assembly.

use chrono::NaiveDate;

use crate::error::EngineResult;
use crate::models::{Employee, LeaveBalance, LeaveEntry};
use crate::policy::LeavePolicy;

use super::annual_leave::calculate_annual_leave;
use super::sick_leave::calculate_sick_leave;

/// Computes one employee's [`LeaveBalance`] as of `today`.
///
/// A pure function of its inputs: the employee record, the global annual and
/// sick entry collections (filtered by owner internally), the policy, and
/// the evaluation date. Each evaluation is independent, so batch callers can
/// scan employees sequentially and isolate per-employee failures without any
/// shared state.
pub fn calculate_balance(
    employee: &Employee,
    annual_entries: &[LeaveEntry],
    sick_entries: &[LeaveEntry],
    policy: &LeavePolicy,
    today: NaiveDate,
) -> EngineResult<LeaveBalance> {
    let annual = calculate_annual_leave(employee, annual_entries, policy, today)?;
    let sick = calculate_sick_leave(employee, sick_entries, policy, today)?;

    Ok(LeaveBalance {
        employee: employee.clone(),
        leave_available: annual.balance,
        sick_leave_available: sick.balance,
    })
}
