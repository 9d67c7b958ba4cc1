//! Sick leave cycle matching and balance calculation.
//!
//! Sick leave is a replenishing resource: entitlement is granted per
//! non-overlapping 36-month cycle anchored to the hire date, and only the
//! entries whose start date falls inside the current cycle are deducted.
//! During the first six months of tenure the entitlement ramps at one day
//! per month employed instead of the full cycle allotment.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::error::EngineResult;
use crate::models::{Employee, LeaveEntry};
use crate::policy::LeavePolicy;

use super::dates::{add_months, parse_date};
use super::tenure::months_employed;

/// One 36-month sick leave cycle, anchored to an employee's hire date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SickCycle {
    /// Zero-based cycle index: `floor(months_employed / cycle length)`.
    pub index: i32,
    /// First day of the cycle: hire date plus `index` cycle lengths.
    pub start: NaiveDate,
    /// Last day of the cycle: hire date plus `index + 1` cycle lengths.
    pub end: NaiveDate,
}

impl SickCycle {
    /// Checks if a date falls within this cycle, inclusive of both ends.
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }
}

/// Determines which sick leave cycle `today` falls into for an employee
/// hired on `hire_date`.
///
/// # Examples
///
/// ```
/// use leave_engine::calculation::current_sick_cycle;
/// use leave_engine::policy::LeavePolicy;
/// use chrono::NaiveDate;
///
/// let hire = NaiveDate::from_ymd_opt(2020, 3, 1).unwrap();
/// let today = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
/// let cycle = current_sick_cycle(hire, today, &LeavePolicy::default()).unwrap();
/// assert_eq!(cycle.index, 1);
/// assert_eq!(cycle.start, NaiveDate::from_ymd_opt(2023, 3, 1).unwrap());
/// assert_eq!(cycle.end, NaiveDate::from_ymd_opt(2026, 3, 1).unwrap());
/// ```
pub fn current_sick_cycle(
    hire_date: NaiveDate,
    today: NaiveDate,
    policy: &LeavePolicy,
) -> EngineResult<SickCycle> {
    let cycle_months = policy.sick_cycle_months as i32;
    let index = months_employed(hire_date, today).div_euclid(cycle_months);

    Ok(SickCycle {
        index,
        start: add_months(hire_date, index * cycle_months)?,
        end: add_months(hire_date, (index + 1) * cycle_months)?,
    })
}

/// The result of a sick leave calculation.
#[derive(Debug, Clone, PartialEq)]
pub struct SickLeaveResult {
    /// Days granted for the current cycle (ramped during the first six
    /// months of tenure).
    pub entitlement: Decimal,
    /// Days taken within the current cycle.
    pub days_taken: Decimal,
    /// The cycle the deduction was evaluated against.
    pub cycle: SickCycle,
    /// `entitlement - days_taken`; unrounded, may be negative.
    pub balance: Decimal,
}

/// Calculates an employee's sick leave balance as of `today`.
///
/// The entries slice may contain the whole system's sick leave records;
/// filtering by owner happens here. Entries with no start date are skipped
/// rather than failing the computation. The balance is deliberately not
/// clamped to zero: an over-used cycle is real information, not an error.
///
/// # Errors
///
/// Returns [`EngineError::InvalidDate`](crate::error::EngineError) when the
/// hire date, or the start date of any entry belonging to this employee,
/// does not parse as `DD/MM/YYYY`.
pub fn calculate_sick_leave(
    employee: &Employee,
    entries: &[LeaveEntry],
    policy: &LeavePolicy,
    today: NaiveDate,
) -> EngineResult<SickLeaveResult> {
    let hire_date = parse_date("hire_date", &employee.hire_date)?;
    let months = months_employed(hire_date, today);

    // Ramp: one day per month employed until strictly past the threshold.
    let entitlement = if months <= policy.sick_ramp_months as i32 {
        Decimal::from(months)
    } else {
        policy.sick_cycle_days
    };

    let cycle = current_sick_cycle(hire_date, today, policy)?;

    let mut days_taken = Decimal::ZERO;
    for entry in entries.iter().filter(|entry| entry.belongs_to(&employee.id)) {
        let Some(raw_start) = entry.start_date.as_deref() else {
            continue;
        };
        let start = parse_date("start_date", raw_start)?;
        if cycle.contains(start) {
            days_taken += entry.days_taken;
        }
    }

    Ok(SickLeaveResult {
        entitlement,
        days_taken,
        cycle,
        balance: entitlement - days_taken,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn create_employee(hire_date: &str) -> Employee {
        Employee {
            id: "EMP001".to_string(),
            first_name: "Thandi".to_string(),
            last_name: "Nkosi".to_string(),
            hire_date: hire_date.to_string(),
        }
    }

    fn create_entry(seq: i64, employee_id: &str, days: &str, start: Option<&str>) -> LeaveEntry {
        LeaveEntry {
            seq,
            employee_id: Some(employee_id.to_string()),
            days_taken: dec(days),
            start_date: start.map(str::to_string),
            end_date: None,
            comment: String::new(),
        }
    }

    #[test]
    fn test_zero_tenure_has_zero_entitlement() {
        let employee = create_employee("10/06/2025");
        let result =
            calculate_sick_leave(&employee, &[], &LeavePolicy::default(), date(2025, 6, 28))
                .unwrap();
        assert_eq!(result.entitlement, Decimal::ZERO);
        assert_eq!(result.balance, Decimal::ZERO);
    }

    #[test]
    fn test_ramp_at_exactly_six_months() {
        let employee = create_employee("01/12/2024");
        let result =
            calculate_sick_leave(&employee, &[], &LeavePolicy::default(), date(2025, 6, 1))
                .unwrap();
        assert_eq!(result.entitlement, dec("6"));
    }

    #[test]
    fn test_flat_tier_at_seven_months() {
        // The ramp only applies at <= 6 months; at 7 the entitlement jumps
        // straight to the full allotment, not 7.
        let employee = create_employee("01/11/2024");
        let result =
            calculate_sick_leave(&employee, &[], &LeavePolicy::default(), date(2025, 6, 1))
                .unwrap();
        assert_eq!(result.entitlement, dec("30"));
    }

    #[test]
    fn test_cycle_window_for_first_cycle() {
        let cycle =
            current_sick_cycle(date(2024, 2, 1), date(2025, 6, 1), &LeavePolicy::default())
                .unwrap();
        assert_eq!(cycle.index, 0);
        assert_eq!(cycle.start, date(2024, 2, 1));
        assert_eq!(cycle.end, date(2027, 2, 1));
    }

    #[test]
    fn test_cycle_window_for_second_cycle() {
        let cycle =
            current_sick_cycle(date(2020, 2, 1), date(2023, 2, 15), &LeavePolicy::default())
                .unwrap();
        assert_eq!(cycle.index, 1);
        assert_eq!(cycle.start, date(2023, 2, 1));
        assert_eq!(cycle.end, date(2026, 2, 1));
    }

    #[test]
    fn test_cycle_contains_is_inclusive_of_both_ends() {
        let cycle = SickCycle {
            index: 0,
            start: date(2024, 2, 1),
            end: date(2027, 2, 1),
        };
        assert!(cycle.contains(date(2024, 2, 1)));
        assert!(cycle.contains(date(2027, 2, 1)));
        assert!(!cycle.contains(date(2024, 1, 31)));
        assert!(!cycle.contains(date(2027, 2, 2)));
    }

    #[test]
    fn test_prior_cycle_entries_do_not_deduct() {
        // Hired 36 months before evaluation: the current cycle starts at
        // hire + 36 months. An entry one day before that boundary belongs to
        // the previous cycle; one day after counts.
        let employee = create_employee("01/06/2022");
        let entries = vec![
            create_entry(1, "EMP001", "5", Some("31/05/2025")),
            create_entry(2, "EMP001", "3", Some("02/06/2025")),
        ];
        let result =
            calculate_sick_leave(&employee, &entries, &LeavePolicy::default(), date(2025, 6, 1))
                .unwrap();
        assert_eq!(result.cycle.start, date(2025, 6, 1));
        assert_eq!(result.days_taken, dec("3"));
        assert_eq!(result.balance, dec("27"));
    }

    #[test]
    fn test_balance_can_go_negative() {
        let employee = create_employee("01/06/2022");
        let entries = vec![create_entry(1, "EMP001", "35", Some("10/06/2025"))];
        let result =
            calculate_sick_leave(&employee, &entries, &LeavePolicy::default(), date(2025, 7, 1))
                .unwrap();
        assert_eq!(result.balance, dec("-5"));
    }

    #[test]
    fn test_entry_without_start_date_is_skipped() {
        let employee = create_employee("01/06/2022");
        let entries = vec![
            create_entry(1, "EMP001", "5", None),
            create_entry(2, "EMP001", "2", Some("10/06/2025")),
        ];
        let result =
            calculate_sick_leave(&employee, &entries, &LeavePolicy::default(), date(2025, 7, 1))
                .unwrap();
        assert_eq!(result.days_taken, dec("2"));
    }

    #[test]
    fn test_malformed_entry_start_date_fails_loudly() {
        let employee = create_employee("01/06/2022");
        let entries = vec![create_entry(1, "EMP001", "5", Some("June 10"))];
        let error =
            calculate_sick_leave(&employee, &entries, &LeavePolicy::default(), date(2025, 7, 1))
                .unwrap_err();
        assert!(error.to_string().contains("start_date"));
    }

    #[test]
    fn test_malformed_date_on_other_employees_entry_is_not_our_problem() {
        let employee = create_employee("01/06/2022");
        let entries = vec![create_entry(1, "EMP002", "5", Some("not a date"))];
        let result =
            calculate_sick_leave(&employee, &entries, &LeavePolicy::default(), date(2025, 7, 1));
        assert!(result.is_ok());
    }

    #[test]
    fn test_other_employees_entries_are_ignored() {
        let employee = create_employee("01/06/2022");
        let entries = vec![
            create_entry(1, "EMP002", "20", Some("10/06/2025")),
            create_entry(2, "EMP001", "1", Some("10/06/2025")),
        ];
        let result =
            calculate_sick_leave(&employee, &entries, &LeavePolicy::default(), date(2025, 7, 1))
                .unwrap();
        assert_eq!(result.days_taken, dec("1"));
    }
}
