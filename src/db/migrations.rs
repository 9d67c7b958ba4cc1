//! Versioned schema migrations, tracked via SQLite's `user_version`.

use rusqlite::{Connection, Transaction};

use crate::error::{EngineError, EngineResult};

const CURRENT_SCHEMA_VERSION: i32 = 1;

const SCHEMA_V1: &str = "
CREATE TABLE IF NOT EXISTS employees (
    id TEXT PRIMARY KEY,
    first_name TEXT NOT NULL,
    last_name TEXT NOT NULL DEFAULT '',
    hire_date TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS annual_leave (
    seq INTEGER PRIMARY KEY AUTOINCREMENT,
    employee_id TEXT REFERENCES employees(id) ON DELETE CASCADE,
    days_taken TEXT NOT NULL,
    start_date TEXT,
    end_date TEXT,
    comment TEXT NOT NULL DEFAULT ''
);

CREATE TABLE IF NOT EXISTS sick_leave (
    seq INTEGER PRIMARY KEY AUTOINCREMENT,
    employee_id TEXT REFERENCES employees(id) ON DELETE CASCADE,
    days_taken TEXT NOT NULL,
    start_date TEXT,
    end_date TEXT,
    comment TEXT NOT NULL DEFAULT ''
);

CREATE INDEX IF NOT EXISTS idx_annual_leave_employee ON annual_leave(employee_id);
CREATE INDEX IF NOT EXISTS idx_sick_leave_employee ON sick_leave(employee_id);
";

pub(crate) fn run_migrations(conn: &mut Connection) -> EngineResult<()> {
    let mut version: i32 = conn.pragma_query_value(None, "user_version", |row| row.get(0))?;

    if version > CURRENT_SCHEMA_VERSION {
        return Err(EngineError::Database {
            message: format!(
                "database version ({version}) is newer than supported schema ({CURRENT_SCHEMA_VERSION})"
            ),
        });
    }

    if version == CURRENT_SCHEMA_VERSION {
        return Ok(());
    }

    let tx = conn.transaction()?;

    while version < CURRENT_SCHEMA_VERSION {
        let next_version = version + 1;
        apply_migration(&tx, next_version).map_err(|err| EngineError::Database {
            message: format!("migration to version {next_version} failed: {err}"),
        })?;
        version = next_version;
    }

    tx.pragma_update(None, "user_version", CURRENT_SCHEMA_VERSION)?;
    tx.commit()?;

    Ok(())
}

fn apply_migration(tx: &Transaction<'_>, version: i32) -> EngineResult<()> {
    match version {
        1 => {
            tx.execute_batch(SCHEMA_V1)?;
            Ok(())
        }
        other => Err(EngineError::Database {
            message: format!("no migration defined for schema version {other}"),
        }),
    }
}
