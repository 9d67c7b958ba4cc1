//! Employee table access.

use rusqlite::{OptionalExtension, Row, params};

use crate::error::{EngineError, EngineResult};
use crate::models::Employee;

use super::Database;

fn row_to_employee(row: &Row<'_>) -> rusqlite::Result<Employee> {
    Ok(Employee {
        id: row.get("id")?,
        first_name: row.get("first_name")?,
        last_name: row.get("last_name")?,
        hire_date: row.get("hire_date")?,
    })
}

impl Database {
    /// Inserts a new employee record.
    ///
    /// The identifier must already be in its normalized (uppercase) form.
    pub async fn insert_employee(&self, employee: &Employee) -> EngineResult<()> {
        let record = employee.clone();
        self.execute(move |conn| {
            let result = conn.execute(
                "INSERT INTO employees (id, first_name, last_name, hire_date)
                 VALUES (?1, ?2, ?3, ?4)",
                params![
                    record.id,
                    record.first_name,
                    record.last_name,
                    record.hire_date
                ],
            );

            match result {
                Ok(_) => Ok(()),
                Err(rusqlite::Error::SqliteFailure(err, _))
                    if err.code == rusqlite::ErrorCode::ConstraintViolation =>
                {
                    Err(EngineError::DuplicateEmployee {
                        id: record.id.clone(),
                    })
                }
                Err(err) => Err(err.into()),
            }
        })
        .await
    }

    /// Updates an employee's name and hire date in place.
    pub async fn update_employee(
        &self,
        id: &str,
        first_name: &str,
        last_name: &str,
        hire_date: &str,
    ) -> EngineResult<()> {
        let id = id.to_string();
        let first_name = first_name.to_string();
        let last_name = last_name.to_string();
        let hire_date = hire_date.to_string();
        self.execute(move |conn| {
            let updated = conn.execute(
                "UPDATE employees
                 SET first_name = ?1,
                     last_name = ?2,
                     hire_date = ?3
                 WHERE id = ?4",
                params![first_name, last_name, hire_date, id],
            )?;

            if updated == 0 {
                return Err(EngineError::EmployeeNotFound { id: id.clone() });
            }
            Ok(())
        })
        .await
    }

    /// Deletes an employee; its leave entries go with it via cascade.
    pub async fn delete_employee(&self, id: &str) -> EngineResult<()> {
        let id = id.to_string();
        self.execute(move |conn| {
            let deleted = conn.execute("DELETE FROM employees WHERE id = ?1", params![id])?;
            if deleted == 0 {
                return Err(EngineError::EmployeeNotFound { id: id.clone() });
            }
            Ok(())
        })
        .await
    }

    /// Fetches one employee by identifier.
    pub async fn get_employee(&self, id: &str) -> EngineResult<Option<Employee>> {
        let id = id.to_string();
        self.execute(move |conn| {
            let employee = conn
                .query_row(
                    "SELECT id, first_name, last_name, hire_date
                     FROM employees
                     WHERE id = ?1",
                    params![id],
                    row_to_employee,
                )
                .optional()?;
            Ok(employee)
        })
        .await
    }

    /// Lists all employees, ordered by name then identifier for display.
    pub async fn list_employees(&self) -> EngineResult<Vec<Employee>> {
        self.execute(move |conn| {
            let mut stmt = conn.prepare(
                "SELECT id, first_name, last_name, hire_date
                 FROM employees
                 ORDER BY last_name COLLATE NOCASE, first_name COLLATE NOCASE, id",
            )?;
            let rows = stmt.query_map([], row_to_employee)?;
            let employees = rows.collect::<rusqlite::Result<Vec<_>>>()?;
            Ok(employees)
        })
        .await
    }
}
