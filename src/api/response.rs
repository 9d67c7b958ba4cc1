//! Response types for the Leave Balance Engine API.
//!
//! This module defines the outward-facing representations, the error
//! response structure and the mapping from engine errors to HTTP statuses.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::db::LeaveEntryWithName;
use crate::error::EngineError;
use crate::models::{Employee, LeaveBalance};

/// API error response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional details about the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Creates a new API error with details.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: Some(details.into()),
        }
    }

    /// Creates a validation error response.
    pub fn validation_error(message: impl Into<String>) -> Self {
        Self::new("VALIDATION_ERROR", message)
    }

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }
}

/// API error with HTTP status code.
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

impl From<EngineError> for ApiErrorResponse {
    fn from(error: EngineError) -> Self {
        match error {
            EngineError::InvalidDate { ref field, .. } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::with_details(
                    "INVALID_DATE",
                    error.to_string(),
                    format!("Field '{field}' must be a valid DD/MM/YYYY date"),
                ),
            },
            EngineError::InvalidEmployee { field, message } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::with_details(
                    "INVALID_EMPLOYEE",
                    format!("Invalid employee field '{field}': {message}"),
                    "The employee data contains invalid information",
                ),
            },
            EngineError::InvalidLeaveEntry { field, message } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::with_details(
                    "INVALID_LEAVE_ENTRY",
                    format!("Invalid leave entry field '{field}': {message}"),
                    "The leave entry data contains invalid information",
                ),
            },
            EngineError::EmployeeNotFound { id } => ApiErrorResponse {
                status: StatusCode::NOT_FOUND,
                error: ApiError::new("EMPLOYEE_NOT_FOUND", format!("Employee not found: {id}")),
            },
            EngineError::DuplicateEmployee { id } => ApiErrorResponse {
                status: StatusCode::CONFLICT,
                error: ApiError::new(
                    "DUPLICATE_EMPLOYEE",
                    format!("Employee already exists: {id}"),
                ),
            },
            EngineError::LeaveEntryNotFound { seq } => ApiErrorResponse {
                status: StatusCode::NOT_FOUND,
                error: ApiError::new(
                    "LEAVE_ENTRY_NOT_FOUND",
                    format!("Leave entry not found: {seq}"),
                ),
            },
            EngineError::PolicyNotFound { path } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "POLICY_ERROR",
                    "Policy configuration error",
                    format!("Policy file not found: {path}"),
                ),
            },
            EngineError::PolicyParseError { path, message } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "POLICY_ERROR",
                    "Policy configuration error",
                    format!("Failed to parse {path}: {message}"),
                ),
            },
            EngineError::CalculationError { message } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details("CALCULATION_ERROR", "Calculation failed", message),
            },
            EngineError::Database { message } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details("DATABASE_ERROR", "Storage error", message),
            },
        }
    }
}

/// An employee merged with its computed leave balances.
///
/// When the balance computation fails for this one employee, the balance
/// fields are null and `balance_error` carries the reason; the rest of the
/// batch is unaffected.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmployeeBalanceResponse {
    /// Unique identifier for the employee.
    pub id: String,
    /// The employee's first name.
    pub first_name: String,
    /// The employee's last name.
    pub last_name: String,
    /// The date the employee was hired, as `DD/MM/YYYY` text.
    pub hire_date: String,
    /// Annual leave days still available, rounded to two decimals.
    pub leave_available: Option<Decimal>,
    /// Sick leave days still available in the current cycle.
    pub sick_leave_available: Option<Decimal>,
    /// Why the balance could not be computed, when it could not.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub balance_error: Option<String>,
}

impl From<LeaveBalance> for EmployeeBalanceResponse {
    fn from(balance: LeaveBalance) -> Self {
        Self {
            id: balance.employee.id,
            first_name: balance.employee.first_name,
            last_name: balance.employee.last_name,
            hire_date: balance.employee.hire_date,
            leave_available: Some(balance.leave_available),
            sick_leave_available: Some(balance.sick_leave_available),
            balance_error: None,
        }
    }
}

impl EmployeeBalanceResponse {
    /// Builds the response for an employee whose balance computation failed.
    pub fn failed(employee: Employee, reason: String) -> Self {
        Self {
            id: employee.id,
            first_name: employee.first_name,
            last_name: employee.last_name,
            hire_date: employee.hire_date,
            leave_available: None,
            sick_leave_available: None,
            balance_error: Some(reason),
        }
    }
}

/// A leave entry in its outward-facing representation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeaveEntryResponse {
    /// Storage-assigned sequence number.
    pub seq: i64,
    /// Identifier of the owning employee.
    pub employee_id: Option<String>,
    /// The owning employee's display name, when the owner still exists.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub employee_name: Option<String>,
    /// Days taken.
    pub days_taken: Decimal,
    /// First day of the leave period, as `DD/MM/YYYY` text.
    pub start_date: Option<String>,
    /// Last day of the leave period, as `DD/MM/YYYY` text.
    pub end_date: Option<String>,
    /// Free-text comment.
    pub comment: String,
}

impl From<LeaveEntryWithName> for LeaveEntryResponse {
    fn from(row: LeaveEntryWithName) -> Self {
        Self {
            seq: row.entry.seq,
            employee_id: row.entry.employee_id,
            employee_name: row.employee_name,
            days_taken: row.entry.days_taken,
            start_date: row.entry.start_date,
            end_date: row.entry.end_date,
            comment: row.entry.comment,
        }
    }
}

/// The combined feed of all recorded leave, for the review screen.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeaveOverviewResponse {
    /// All annual leave entries, newest start first.
    pub annual: Vec<LeaveEntryResponse>,
    /// All sick leave entries, newest start first.
    pub sick: Vec<LeaveEntryResponse>,
}

/// Acknowledgement body for a newly recorded leave entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeaveEntryCreatedResponse {
    /// Sequence number assigned by storage.
    pub seq: i64,
    /// What happened.
    pub message: String,
}

/// A simple acknowledgement body for updates and deletes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    /// What happened.
    pub message: String,
}

impl MessageResponse {
    /// Creates a new acknowledgement.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_api_error_serialization() {
        let error = ApiError::new("TEST_ERROR", "Test message");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"code\":\"TEST_ERROR\""));
        assert!(json.contains("\"message\":\"Test message\""));
        assert!(!json.contains("details")); // Should be skipped when None
    }

    #[test]
    fn test_employee_not_found_maps_to_404() {
        let api_error: ApiErrorResponse = EngineError::EmployeeNotFound {
            id: "EMP001".to_string(),
        }
        .into();
        assert_eq!(api_error.status, StatusCode::NOT_FOUND);
        assert_eq!(api_error.error.code, "EMPLOYEE_NOT_FOUND");
    }

    #[test]
    fn test_duplicate_employee_maps_to_409() {
        let api_error: ApiErrorResponse = EngineError::DuplicateEmployee {
            id: "EMP001".to_string(),
        }
        .into();
        assert_eq!(api_error.status, StatusCode::CONFLICT);
    }

    #[test]
    fn test_invalid_date_maps_to_400() {
        let api_error: ApiErrorResponse = EngineError::InvalidDate {
            field: "hire_date".to_string(),
            value: "nope".to_string(),
        }
        .into();
        assert_eq!(api_error.status, StatusCode::BAD_REQUEST);
        assert_eq!(api_error.error.code, "INVALID_DATE");
    }

    #[test]
    fn test_database_error_maps_to_500() {
        let api_error: ApiErrorResponse = EngineError::Database {
            message: "disk on fire".to_string(),
        }
        .into();
        assert_eq!(api_error.status, StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_failed_balance_response_carries_reason() {
        let employee = Employee {
            id: "EMP001".to_string(),
            first_name: "Thandi".to_string(),
            last_name: "Nkosi".to_string(),
            hire_date: "bad date".to_string(),
        };
        let response = EmployeeBalanceResponse::failed(employee, "unparseable".to_string());
        let json = serde_json::to_value(&response).unwrap();
        assert!(json["leave_available"].is_null());
        assert_eq!(json["balance_error"], "unparseable");
    }

    #[test]
    fn test_balance_response_serializes_decimals_as_strings() {
        let balance = LeaveBalance {
            employee: Employee {
                id: "EMP001".to_string(),
                first_name: "Thandi".to_string(),
                last_name: "Nkosi".to_string(),
                hire_date: "01/06/2024".to_string(),
            },
            leave_available: Decimal::from_str("15.00").unwrap(),
            sick_leave_available: Decimal::from_str("30").unwrap(),
        };
        let response: EmployeeBalanceResponse = balance.into();
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["leave_available"], "15.00");
        assert_eq!(json["balance_error"], serde_json::Value::Null);
    }
}
