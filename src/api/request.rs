//! Request types for the Leave Balance Engine API.
//!
//! This module defines the JSON request structures for the employee and
//! leave-entry endpoints, along with the write-time validation the
//! presentation layer is responsible for: required fields, date syntax and
//! non-negative day counts. Stored data is still re-checked at calculation
//! time; validating here keeps obvious data-entry errors out of the store.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculation::parse_date;
use crate::error::{EngineError, EngineResult};
use crate::models::{Employee, LeaveEntryUpdate, NewLeaveEntry};

/// Request body for creating an employee.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateEmployeeRequest {
    /// Unique identifier for the employee; normalized to uppercase.
    pub id: String,
    /// The employee's first name.
    pub first_name: String,
    /// The employee's last name.
    #[serde(default)]
    pub last_name: String,
    /// The date the employee was hired, as `DD/MM/YYYY` text.
    pub hire_date: String,
}

impl CreateEmployeeRequest {
    /// Validates required fields and date syntax.
    pub fn validate(&self) -> EngineResult<()> {
        if self.id.trim().is_empty() {
            return Err(EngineError::InvalidEmployee {
                field: "id".to_string(),
                message: "must not be blank".to_string(),
            });
        }
        if self.first_name.trim().is_empty() {
            return Err(EngineError::InvalidEmployee {
                field: "first_name".to_string(),
                message: "must not be blank".to_string(),
            });
        }
        parse_date("hire_date", &self.hire_date)?;
        Ok(())
    }
}

impl From<CreateEmployeeRequest> for Employee {
    fn from(req: CreateEmployeeRequest) -> Self {
        Employee {
            id: Employee::normalize_id(&req.id),
            first_name: req.first_name.trim().to_string(),
            last_name: req.last_name.trim().to_string(),
            hire_date: req.hire_date.trim().to_string(),
        }
    }
}

/// Request body for updating an employee in place.
///
/// The identifier comes from the URL and cannot be changed here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateEmployeeRequest {
    /// The employee's first name.
    pub first_name: String,
    /// The employee's last name.
    #[serde(default)]
    pub last_name: String,
    /// The date the employee was hired, as `DD/MM/YYYY` text.
    pub hire_date: String,
}

impl UpdateEmployeeRequest {
    /// Validates required fields and date syntax.
    pub fn validate(&self) -> EngineResult<()> {
        if self.first_name.trim().is_empty() {
            return Err(EngineError::InvalidEmployee {
                field: "first_name".to_string(),
                message: "must not be blank".to_string(),
            });
        }
        parse_date("hire_date", &self.hire_date)?;
        Ok(())
    }
}

/// Request body for recording a leave entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateLeaveEntryRequest {
    /// Identifier of the owning employee.
    pub employee_id: String,
    /// Days taken.
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

fn validate_days(days_taken: Decimal) -> EngineResult<()> {
    if days_taken.is_sign_negative() {
        return Err(EngineError::InvalidLeaveEntry {
            field: "days_taken".to_string(),
            message: "must not be negative".to_string(),
        });
    }
    Ok(())
}

fn validate_optional_date(field: &str, value: Option<&str>) -> EngineResult<()> {
    if let Some(value) = value {
        parse_date(field, value)?;
    }
    Ok(())
}

impl CreateLeaveEntryRequest {
    /// Validates required fields, day counts and date syntax.
    pub fn validate(&self) -> EngineResult<()> {
        if self.employee_id.trim().is_empty() {
            return Err(EngineError::InvalidLeaveEntry {
                field: "employee_id".to_string(),
                message: "must not be blank".to_string(),
            });
        }
        validate_days(self.days_taken)?;
        validate_optional_date("start_date", self.start_date.as_deref())?;
        validate_optional_date("end_date", self.end_date.as_deref())?;
        Ok(())
    }
}

impl From<CreateLeaveEntryRequest> for NewLeaveEntry {
    fn from(req: CreateLeaveEntryRequest) -> Self {
        NewLeaveEntry {
            employee_id: Employee::normalize_id(&req.employee_id),
            days_taken: req.days_taken,
            start_date: req.start_date.map(|d| d.trim().to_string()),
            end_date: req.end_date.map(|d| d.trim().to_string()),
            comment: req.comment,
        }
    }
}

/// Request body for updating a leave entry.
///
/// Ownership is immutable post-creation, so no employee identifier appears.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateLeaveEntryRequest {
    /// Days taken.
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

impl UpdateLeaveEntryRequest {
    /// Validates day counts and date syntax.
    pub fn validate(&self) -> EngineResult<()> {
        validate_days(self.days_taken)?;
        validate_optional_date("start_date", self.start_date.as_deref())?;
        validate_optional_date("end_date", self.end_date.as_deref())?;
        Ok(())
    }
}

impl From<UpdateLeaveEntryRequest> for LeaveEntryUpdate {
    fn from(req: UpdateLeaveEntryRequest) -> Self {
        LeaveEntryUpdate {
            days_taken: req.days_taken,
            start_date: req.start_date.map(|d| d.trim().to_string()),
            end_date: req.end_date.map(|d| d.trim().to_string()),
            comment: req.comment,
        }
    }
}
