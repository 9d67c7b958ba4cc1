//! Leave entry table access and the combined balance-read snapshot.

use std::str::FromStr;

use rusqlite::{Connection, Row, params};
use rust_decimal::Decimal;

use crate::error::{EngineError, EngineResult};
use crate::models::{Employee, LeaveEntry, LeaveEntryUpdate, LeaveKind, NewLeaveEntry};

use super::Database;

fn table_for(kind: LeaveKind) -> &'static str {
    match kind {
        LeaveKind::Annual => "annual_leave",
        LeaveKind::Sick => "sick_leave",
    }
}

fn parse_days(value: &str) -> EngineResult<Decimal> {
    Decimal::from_str(value).map_err(|_| EngineError::Database {
        message: format!("invalid stored days value '{value}'"),
    })
}

fn row_to_entry(row: &Row<'_>) -> EngineResult<LeaveEntry> {
    let days_taken: String = row.get("days_taken")?;
    Ok(LeaveEntry {
        seq: row.get("seq")?,
        employee_id: row.get("employee_id")?,
        days_taken: parse_days(&days_taken)?,
        start_date: row.get("start_date")?,
        end_date: row.get("end_date")?,
        comment: row.get("comment")?,
    })
}

fn read_entries(conn: &Connection, kind: LeaveKind) -> EngineResult<Vec<LeaveEntry>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT seq, employee_id, days_taken, start_date, end_date, comment
         FROM {}
         ORDER BY seq",
        table_for(kind)
    ))?;
    let mut rows = stmt.query([])?;
    let mut entries = Vec::new();
    while let Some(row) = rows.next()? {
        entries.push(row_to_entry(row)?);
    }
    Ok(entries)
}

/// A leave entry joined with its owner's display name.
#[derive(Debug, Clone)]
pub struct LeaveEntryWithName {
    /// The stored entry.
    pub entry: LeaveEntry,
    /// The owning employee's name, when the owner still exists.
    pub employee_name: Option<String>,
}

/// A consistent point-in-time read of everything a balance evaluation needs.
///
/// All three tables are read inside a single worker-thread task, so the
/// snapshot can never interleave with a concurrent write.
#[derive(Debug, Clone)]
pub struct LeaveSnapshot {
    /// All employees, in display order.
    pub employees: Vec<Employee>,
    /// All annual leave entries, system-wide.
    pub annual: Vec<LeaveEntry>,
    /// All sick leave entries, system-wide.
    pub sick: Vec<LeaveEntry>,
}

impl Database {
    /// Records a new leave entry, returning its sequence number.
    pub async fn insert_leave_entry(
        &self,
        kind: LeaveKind,
        entry: NewLeaveEntry,
    ) -> EngineResult<i64> {
        self.execute(move |conn| {
            let result = conn.execute(
                &format!(
                    "INSERT INTO {} (employee_id, days_taken, start_date, end_date, comment)
                     VALUES (?1, ?2, ?3, ?4, ?5)",
                    table_for(kind)
                ),
                params![
                    entry.employee_id,
                    entry.days_taken.to_string(),
                    entry.start_date,
                    entry.end_date,
                    entry.comment
                ],
            );

            match result {
                Ok(_) => Ok(conn.last_insert_rowid()),
                Err(rusqlite::Error::SqliteFailure(err, _))
                    if err.code == rusqlite::ErrorCode::ConstraintViolation =>
                {
                    Err(EngineError::EmployeeNotFound {
                        id: entry.employee_id.clone(),
                    })
                }
                Err(err) => Err(err.into()),
            }
        })
        .await
    }

    /// Updates an entry's recorded days, dates and comment. Ownership is
    /// immutable and never touched.
    pub async fn update_leave_entry(
        &self,
        kind: LeaveKind,
        seq: i64,
        update: LeaveEntryUpdate,
    ) -> EngineResult<()> {
        self.execute(move |conn| {
            let updated = conn.execute(
                &format!(
                    "UPDATE {}
                     SET days_taken = ?1,
                         start_date = ?2,
                         end_date = ?3,
                         comment = ?4
                     WHERE seq = ?5",
                    table_for(kind)
                ),
                params![
                    update.days_taken.to_string(),
                    update.start_date,
                    update.end_date,
                    update.comment,
                    seq
                ],
            )?;

            if updated == 0 {
                return Err(EngineError::LeaveEntryNotFound { seq });
            }
            Ok(())
        })
        .await
    }

    /// Deletes one leave entry.
    pub async fn delete_leave_entry(&self, kind: LeaveKind, seq: i64) -> EngineResult<()> {
        self.execute(move |conn| {
            let deleted = conn.execute(
                &format!("DELETE FROM {} WHERE seq = ?1", table_for(kind)),
                params![seq],
            )?;
            if deleted == 0 {
                return Err(EngineError::LeaveEntryNotFound { seq });
            }
            Ok(())
        })
        .await
    }

    /// Lists leave entries of one kind, optionally restricted to a single
    /// employee, newest leave-start first.
    pub async fn list_leave_entries(
        &self,
        kind: LeaveKind,
        employee_id: Option<String>,
    ) -> EngineResult<Vec<LeaveEntryWithName>> {
        self.execute(move |conn| {
            // start_date is DD/MM/YYYY text, so ordering chronologically
            // means sorting year, then month, then day substrings.
            let base = format!(
                "SELECT l.seq, l.employee_id, l.days_taken, l.start_date, l.end_date, l.comment,
                        e.first_name, e.last_name
                 FROM {} l
                 LEFT JOIN employees e ON l.employee_id = e.id
                 {}
                 ORDER BY substr(l.start_date, 7, 4) DESC,
                          substr(l.start_date, 4, 2) DESC,
                          substr(l.start_date, 1, 2) DESC,
                          l.seq DESC",
                table_for(kind),
                if employee_id.is_some() {
                    "WHERE l.employee_id = ?1"
                } else {
                    ""
                }
            );

            let mut stmt = conn.prepare(&base)?;
            let mut rows = match &employee_id {
                Some(id) => stmt.query(params![id])?,
                None => stmt.query([])?,
            };

            let mut entries = Vec::new();
            while let Some(row) = rows.next()? {
                let entry = row_to_entry(row)?;
                let first_name: Option<String> = row.get("first_name")?;
                let last_name: Option<String> = row.get("last_name")?;
                let employee_name = first_name.map(|first| match last_name {
                    Some(last) if !last.trim().is_empty() => format!("{first} {last}"),
                    _ => first,
                });
                entries.push(LeaveEntryWithName {
                    entry,
                    employee_name,
                });
            }
            Ok(entries)
        })
        .await
    }

    /// Reads employees and both leave tables in one worker-thread task.
    pub async fn leave_snapshot(&self) -> EngineResult<LeaveSnapshot> {
        self.execute(move |conn| {
            let mut stmt = conn.prepare(
                "SELECT id, first_name, last_name, hire_date
                 FROM employees
                 ORDER BY last_name COLLATE NOCASE, first_name COLLATE NOCASE, id",
            )?;
            let mut rows = stmt.query([])?;
            let mut employees = Vec::new();
            while let Some(row) = rows.next()? {
                employees.push(Employee {
                    id: row.get("id")?,
                    first_name: row.get("first_name")?,
                    last_name: row.get("last_name")?,
                    hire_date: row.get("hire_date")?,
                });
            }
            drop(rows);
            drop(stmt);

            let annual = read_entries(conn, LeaveKind::Annual)?;
            let sick = read_entries(conn, LeaveKind::Sick)?;

            Ok(LeaveSnapshot {
                employees,
                annual,
                sick,
            })
        })
        .await
    }
}
