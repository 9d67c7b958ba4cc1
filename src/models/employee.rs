//! Employee model.

use serde::{Deserialize, Serialize};

/// Represents an employee whose leave is tracked by the engine.
///
/// The identifier is the join key for all leave entries and is stored in
/// uppercase. The hire date is carried as `DD/MM/YYYY` text, the form used at
/// every boundary of the system, and is only parsed into a calendar date when
/// a balance is computed or a write is validated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    /// Unique identifier for the employee (uppercase).
    pub id: String,
    /// The employee's first name.
    pub first_name: String,
    /// The employee's last name.
    pub last_name: String,
    /// The date the employee was hired, as `DD/MM/YYYY` text.
    pub hire_date: String,
}

impl Employee {
    /// Normalizes a raw identifier to its stored form.
    ///
    /// # Examples
    ///
    /// ```
    /// use leave_engine::models::Employee;
    ///
    /// assert_eq!(Employee::normalize_id(" emp001 "), "EMP001");
    /// ```
    pub fn normalize_id(raw: &str) -> String {
        raw.trim().to_uppercase()
    }

    /// Returns the employee's display name, last name omitted when blank.
    pub fn full_name(&self) -> String {
        if self.last_name.trim().is_empty() {
            self.first_name.clone()
        } else {
            format!("{} {}", self.first_name, self.last_name)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_employee() -> Employee {
        Employee {
            id: "EMP001".to_string(),
            first_name: "Thandi".to_string(),
            last_name: "Nkosi".to_string(),
            hire_date: "15/06/2023".to_string(),
        }
    }

    #[test]
    fn test_normalize_id_uppercases_and_trims() {
        assert_eq!(Employee::normalize_id("emp001"), "EMP001");
        assert_eq!(Employee::normalize_id("  ab12  "), "AB12");
        assert_eq!(Employee::normalize_id("EMP001"), "EMP001");
    }

    #[test]
    fn test_full_name_joins_first_and_last() {
        let employee = create_test_employee();
        assert_eq!(employee.full_name(), "Thandi Nkosi");
    }

    #[test]
    fn test_full_name_omits_blank_last_name() {
        let mut employee = create_test_employee();
        employee.last_name = "".to_string();
        assert_eq!(employee.full_name(), "Thandi");
    }

    #[test]
    fn test_deserialize_employee() {
        let json = r#"{
            "id": "EMP001",
            "first_name": "Thandi",
            "last_name": "Nkosi",
            "hire_date": "15/06/2023"
        }"#;

        let employee: Employee = serde_json::from_str(json).unwrap();
        assert_eq!(employee.id, "EMP001");
        assert_eq!(employee.first_name, "Thandi");
        assert_eq!(employee.hire_date, "15/06/2023");
    }

    #[test]
    fn test_serialize_employee_round_trip() {
        let employee = create_test_employee();
        let json = serde_json::to_string(&employee).unwrap();
        let deserialized: Employee = serde_json::from_str(&json).unwrap();
        assert_eq!(employee, deserialized);
    }
}
