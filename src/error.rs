//! Error types for the Leave Balance Engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur while computing leave balances
//! or maintaining leave records.

use thiserror::Error;

/// The main error type for the Leave Balance Engine.
///
/// All operations in the engine return this error type, making it easy
/// to handle errors consistently throughout the application.
///
/// # Example
///
/// ```
/// use leave_engine::error::EngineError;
///
/// let error = EngineError::EmployeeNotFound {
///     id: "EMP042".to_string(),
/// };
/// assert_eq!(error.to_string(), "Employee not found: EMP042");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// A date field did not parse as a DD/MM/YYYY calendar date.
    #[error("Invalid date in field '{field}': expected DD/MM/YYYY, got '{value}'")]
    InvalidDate {
        /// The field that held the malformed date.
        field: String,
        /// The text that failed to parse.
        value: String,
    },

    /// An employee record was invalid or contained inconsistent data.
    #[error("Invalid employee field '{field}': {message}")]
    InvalidEmployee {
        /// The field that was invalid.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },

    /// A leave entry was invalid or contained inconsistent data.
    #[error("Invalid leave entry field '{field}': {message}")]
    InvalidLeaveEntry {
        /// The field that was invalid.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },

    /// No employee exists with the given identifier.
    #[error("Employee not found: {id}")]
    EmployeeNotFound {
        /// The identifier that was not found.
        id: String,
    },

    /// An employee with the given identifier already exists.
    #[error("Employee already exists: {id}")]
    DuplicateEmployee {
        /// The identifier that collided.
        id: String,
    },

    /// No leave entry exists with the given sequence number.
    #[error("Leave entry not found: {seq}")]
    LeaveEntryNotFound {
        /// The sequence number that was not found.
        seq: i64,
    },

    /// Policy file was not found at the specified path.
    #[error("Policy file not found: {path}")]
    PolicyNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Policy file could not be parsed.
    #[error("Failed to parse policy file '{path}': {message}")]
    PolicyParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// A general calculation error occurred.
    #[error("Calculation error: {message}")]
    CalculationError {
        /// A description of the calculation error.
        message: String,
    },

    /// The storage layer reported an error.
    #[error("Database error: {message}")]
    Database {
        /// A description of the storage error.
        message: String,
    },
}

impl From<rusqlite::Error> for EngineError {
    fn from(error: rusqlite::Error) -> Self {
        EngineError::Database {
            message: error.to_string(),
        }
    }
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_date_displays_field_and_value() {
        let error = EngineError::InvalidDate {
            field: "hire_date".to_string(),
            value: "31/13/2020".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Invalid date in field 'hire_date': expected DD/MM/YYYY, got '31/13/2020'"
        );
    }

    #[test]
    fn test_employee_not_found_displays_id() {
        let error = EngineError::EmployeeNotFound {
            id: "EMP001".to_string(),
        };
        assert_eq!(error.to_string(), "Employee not found: EMP001");
    }

    #[test]
    fn test_duplicate_employee_displays_id() {
        let error = EngineError::DuplicateEmployee {
            id: "EMP001".to_string(),
        };
        assert_eq!(error.to_string(), "Employee already exists: EMP001");
    }

    #[test]
    fn test_leave_entry_not_found_displays_seq() {
        let error = EngineError::LeaveEntryNotFound { seq: 17 };
        assert_eq!(error.to_string(), "Leave entry not found: 17");
    }

    #[test]
    fn test_invalid_employee_displays_field_and_message() {
        let error = EngineError::InvalidEmployee {
            field: "first_name".to_string(),
            message: "must not be blank".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Invalid employee field 'first_name': must not be blank"
        );
    }

    #[test]
    fn test_policy_parse_error_displays_path_and_message() {
        let error = EngineError::PolicyParseError {
            path: "/config/policy.yaml".to_string(),
            message: "invalid YAML syntax".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Failed to parse policy file '/config/policy.yaml': invalid YAML syntax"
        );
    }

    #[test]
    fn test_errors_implement_std_error() {
        fn assert_error<T: std::error::Error>() {}
        assert_error::<EngineError>();
    }

    #[test]
    fn test_error_propagation_with_question_mark() {
        fn returns_not_found() -> EngineResult<()> {
            Err(EngineError::EmployeeNotFound {
                id: "EMP001".to_string(),
            })
        }

        fn propagates_error() -> EngineResult<()> {
            returns_not_found()?;
            Ok(())
        }

        assert!(propagates_error().is_err());
    }
}
