//! Boundary date parsing and calendar arithmetic.
//!
//! Every date crossing a boundary of this system (storage, API payloads, UI
//! fields) is literal `DD/MM/YYYY` text with no timezone component. Dates are
//! parsed here, exactly once, before any arithmetic; a malformed date is a
//! loud failure rather than a silent substitute.

use chrono::{Months, NaiveDate};

use crate::error::{EngineError, EngineResult};

/// The textual date format used at every boundary of the system.
pub const DATE_FORMAT: &str = "%d/%m/%Y";

/// Parses `DD/MM/YYYY` text into a calendar date.
///
/// The `field` name is carried into the error so callers can surface which
/// record field held the malformed text.
///
/// # Examples
///
/// ```
/// use leave_engine::calculation::parse_date;
/// use chrono::NaiveDate;
///
/// let date = parse_date("hire_date", "15/06/2023").unwrap();
/// assert_eq!(date, NaiveDate::from_ymd_opt(2023, 6, 15).unwrap());
/// assert!(parse_date("hire_date", "2023-06-15").is_err());
/// ```
pub fn parse_date(field: &str, value: &str) -> EngineResult<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).map_err(|_| EngineError::InvalidDate {
        field: field.to_string(),
        value: value.to_string(),
    })
}

/// Formats a calendar date back into its `DD/MM/YYYY` boundary form.
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Shifts a date by a signed number of calendar months.
///
/// Day-of-month is clamped to the target month's length, matching the
/// calendar-month semantics used everywhere else in the engine.
pub fn add_months(date: NaiveDate, months: i32) -> EngineResult<NaiveDate> {
    let shifted = if months >= 0 {
        date.checked_add_months(Months::new(months as u32))
    } else {
        date.checked_sub_months(Months::new(months.unsigned_abs()))
    };

    shifted.ok_or_else(|| EngineError::CalculationError {
        message: format!("date {date} out of range when shifted by {months} months"),
    })
}
