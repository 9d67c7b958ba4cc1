//! Leave entry models and related types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Distinguishes the two kinds of leave tracked by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeaveKind {
    /// Annual leave, accrued monthly and deducted cumulatively.
    Annual,
    /// Sick leave, replenished per 36-month cycle.
    Sick,
}

impl LeaveKind {
    /// Returns the lowercase name of this kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            LeaveKind::Annual => "annual",
            LeaveKind::Sick => "sick",
        }
    }
}

/// A recorded period of leave taken by an employee.
///
/// Leave entries have no identity beyond the storage-assigned sequence
/// number. Dates are `DD/MM/YYYY` text; a sick entry with no start date is
/// skipped during cycle matching rather than rejected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaveEntry {
    /// Storage-assigned sequence number.
    pub seq: i64,
    /// Identifier of the owning employee. Entries with no identifier never
    /// match any employee and contribute to no balance.
    #[serde(default)]
    pub employee_id: Option<String>,
    /// Days taken; fractional half-days are conventional but not enforced.
    pub days_taken: Decimal,
    /// First day of the leave period, as `DD/MM/YYYY` text.
    #[serde(default)]
    pub start_date: Option<String>,
    /// Last day of the leave period, as `DD/MM/YYYY` text.
    #[serde(default)]
    pub end_date: Option<String>,
    /// Free-text comment.
    #[serde(default)]
    pub comment: String,
}

impl LeaveEntry {
    /// Returns true if this entry belongs to the given employee.
    ///
    /// Identifiers are compared case-insensitively; an entry with no
    /// identifier matches nothing.
    pub fn belongs_to(&self, employee_id: &str) -> bool {
        self.employee_id
            .as_deref()
            .is_some_and(|id| id.eq_ignore_ascii_case(employee_id))
    }
}

/// The fields required to record a new leave entry.
#[derive(Debug, Clone)]
pub struct NewLeaveEntry {
    /// Identifier of the owning employee (uppercase).
    pub employee_id: String,
    /// Days taken.
    pub days_taken: Decimal,
    /// First day of the leave period.
    pub start_date: Option<String>,
    /// Last day of the leave period.
    pub end_date: Option<String>,
    /// Free-text comment.
    pub comment: String,
}

/// The mutable fields of an existing leave entry.
///
/// The owning employee identifier is immutable after creation and is
/// deliberately absent here.
#[derive(Debug, Clone)]
pub struct LeaveEntryUpdate {
    /// Days taken.
    pub days_taken: Decimal,
    /// First day of the leave period.
    pub start_date: Option<String>,
    /// Last day of the leave period.
    pub end_date: Option<String>,
    /// Free-text comment.
    pub comment: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn create_test_entry(employee_id: Option<&str>) -> LeaveEntry {
        LeaveEntry {
            seq: 1,
            employee_id: employee_id.map(str::to_string),
            days_taken: Decimal::from_str("2.5").unwrap(),
            start_date: Some("01/03/2025".to_string()),
            end_date: Some("03/03/2025".to_string()),
            comment: "family responsibility".to_string(),
        }
    }

    #[test]
    fn test_belongs_to_matches_exact_id() {
        let entry = create_test_entry(Some("EMP001"));
        assert!(entry.belongs_to("EMP001"));
    }

    #[test]
    fn test_belongs_to_is_case_insensitive() {
        let entry = create_test_entry(Some("emp001"));
        assert!(entry.belongs_to("EMP001"));
    }

    #[test]
    fn test_belongs_to_rejects_other_employee() {
        let entry = create_test_entry(Some("EMP001"));
        assert!(!entry.belongs_to("EMP002"));
    }

    #[test]
    fn test_belongs_to_without_id_never_matches() {
        let entry = create_test_entry(None);
        assert!(!entry.belongs_to("EMP001"));
        assert!(!entry.belongs_to(""));
    }

    #[test]
    fn test_leave_kind_as_str() {
        assert_eq!(LeaveKind::Annual.as_str(), "annual");
        assert_eq!(LeaveKind::Sick.as_str(), "sick");
    }

    #[test]
    fn test_deserialize_entry_with_missing_optional_fields() {
        let json = r#"{
            "seq": 5,
            "days_taken": "1.5"
        }"#;

        let entry: LeaveEntry = serde_json::from_str(json).unwrap();
        assert_eq!(entry.seq, 5);
        assert_eq!(entry.days_taken, Decimal::from_str("1.5").unwrap());
        assert!(entry.employee_id.is_none());
        assert!(entry.start_date.is_none());
        assert!(entry.comment.is_empty());
    }

    #[test]
    fn test_serialize_entry_round_trip() {
        let entry = create_test_entry(Some("EMP001"));
        let json = serde_json::to_string(&entry).unwrap();
        let deserialized: LeaveEntry = serde_json::from_str(&json).unwrap();
        assert_eq!(entry, deserialized);
    }
}
