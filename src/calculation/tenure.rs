//! Month-granular tenure arithmetic.

use chrono::{Datelike, NaiveDate};

/// Returns the number of whole calendar months between hire date and `today`.
///
/// Tenure is `(today.year - hire.year) * 12 + (today.month - hire.month)`,
/// with 1-based months on both sides of the subtraction. Day-of-month is
/// ignored entirely: an employee hired on the 30th of a month is treated
/// identically to one hired on the 1st once the month rolls over. Stored
/// balances depend on this coarseness, so it must not be "fixed" to
/// day-level precision.
///
/// The result is negative for a hire date in a future month; callers
/// propagate that into entitlements rather than clamping.
///
/// # Examples
///
/// ```
/// use leave_engine::calculation::months_employed;
/// use chrono::NaiveDate;
///
/// let hire = NaiveDate::from_ymd_opt(2023, 6, 30).unwrap();
/// let today = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
/// assert_eq!(months_employed(hire, today), 12);
/// ```
pub fn months_employed(hire_date: NaiveDate, today: NaiveDate) -> i32 {
    (today.year() - hire_date.year()) * 12 + (today.month() as i32 - hire_date.month() as i32)
}
