//! Annual leave accrual and balance calculation.
//!
//! Annual leave accrues at a monthly rate for the whole of an employee's
//! tenure, and every annual entry ever recorded is netted off, with no date
//! restriction. The accrual rate comes from the [`LeavePolicy`], which may
//! carry per-first-name overrides.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::error::EngineResult;
use crate::models::{Employee, LeaveEntry};
use crate::policy::LeavePolicy;

use super::dates::parse_date;
use super::tenure::months_employed;

/// The result of an annual leave calculation.
#[derive(Debug, Clone, PartialEq)]
pub struct AnnualLeaveResult {
    /// Gross days accrued over the employee's tenure, unrounded.
    pub entitlement: Decimal,
    /// Total days taken across all of the employee's annual entries.
    pub days_taken: Decimal,
    /// `entitlement - days_taken`, rounded to two decimal places.
    pub balance: Decimal,
}

/// Calculates an employee's annual leave balance as of `today`.
///
/// The entries slice may contain the whole system's annual leave records;
/// entries belonging to other employees (or to no employee) are filtered out
/// here, so callers are not required to pre-filter.
///
/// Note the entitlement is not clamped to the nominal 30-day annual ceiling
/// that user-facing documentation describes. The source system never
/// enforced it in the calculation path, and clamping here would silently
/// change long-tenured employees' balances.
///
/// # Errors
///
/// Returns [`EngineError::InvalidDate`](crate::error::EngineError) when the
/// employee's hire date does not parse as `DD/MM/YYYY`. Defaulting a bad
/// hire date to some arbitrary day would mask a data-entry error as a valid
/// balance.
///
/// # Examples
///
/// ```
/// use leave_engine::calculation::calculate_annual_leave;
/// use leave_engine::models::Employee;
/// use leave_engine::policy::LeavePolicy;
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let employee = Employee {
///     id: "EMP001".to_string(),
///     first_name: "Thandi".to_string(),
///     last_name: "Nkosi".to_string(),
///     hire_date: "01/06/2024".to_string(),
/// };
///
/// let today = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
/// let result =
///     calculate_annual_leave(&employee, &[], &LeavePolicy::default(), today).unwrap();
/// assert_eq!(result.balance, Decimal::from_str("15.00").unwrap());
/// ```
pub fn calculate_annual_leave(
    employee: &Employee,
    entries: &[LeaveEntry],
    policy: &LeavePolicy,
    today: NaiveDate,
) -> EngineResult<AnnualLeaveResult> {
    let hire_date = parse_date("hire_date", &employee.hire_date)?;
    let months = months_employed(hire_date, today);

    let rate = policy.accrual_rate_for(&employee.first_name);
    let entitlement = Decimal::from(months) * rate;

    let days_taken: Decimal = entries
        .iter()
        .filter(|entry| entry.belongs_to(&employee.id))
        .map(|entry| entry.days_taken)
        .sum();

    Ok(AnnualLeaveResult {
        entitlement,
        days_taken,
        balance: (entitlement - days_taken).round_dp(2),
    })
}
