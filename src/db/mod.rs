//! Storage layer for the Leave Balance Engine.
//!
//! An embedded SQLite database behind an explicitly constructed [`Database`]
//! handle. A dedicated worker thread owns the connection; async callers
//! submit closures and await the result over a oneshot channel, so all
//! access is serialized and every multi-table read observes a consistent
//! snapshot. Referential integrity (cascade-deleting an employee's leave
//! entries) is delegated to SQLite foreign keys.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, mpsc};
use std::thread::{self, JoinHandle};

use rusqlite::Connection;
use tokio::sync::oneshot;
use tracing::{error, info};

use crate::error::{EngineError, EngineResult};

mod employees;
mod leave;
mod migrations;

pub use leave::{LeaveEntryWithName, LeaveSnapshot};

type DbTask = Box<dyn FnOnce(&mut Connection) + Send + 'static>;

enum DbCommand {
    Execute(DbTask),
    Shutdown,
}

struct DatabaseInner {
    sender: mpsc::Sender<DbCommand>,
    worker: Mutex<Option<JoinHandle<()>>>,
}

impl Drop for DatabaseInner {
    fn drop(&mut self) {
        let mut guard = match self.worker.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };

        if let Some(handle) = guard.take() {
            if let Err(err) = self.sender.send(DbCommand::Shutdown) {
                error!("Failed to send shutdown to DB thread: {err}");
            }
            if let Err(join_err) = handle.join() {
                error!("Failed to join DB thread: {join_err:?}");
            }
        }
    }
}

/// Handle to the embedded store.
///
/// Cheap to clone; all clones share one worker thread and connection.
#[derive(Clone)]
pub struct Database {
    inner: Arc<DatabaseInner>,
    db_path: Arc<PathBuf>,
}

impl Database {
    /// Opens (creating if necessary) the database at `db_path` and runs any
    /// pending migrations before returning.
    pub fn open(db_path: impl Into<PathBuf>) -> EngineResult<Self> {
        let db_path = db_path.into();

        if let Some(parent) = db_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|err| EngineError::Database {
                    message: format!(
                        "failed to create database directory {}: {err}",
                        parent.display()
                    ),
                })?;
            }
        }

        let (command_tx, command_rx) = mpsc::channel::<DbCommand>();
        let (ready_tx, ready_rx) = mpsc::channel::<EngineResult<()>>();
        let path_for_thread = db_path.clone();

        let worker = thread::Builder::new()
            .name("leave-engine-db".into())
            .spawn(move || {
                let mut conn = match Connection::open(&path_for_thread) {
                    Ok(connection) => connection,
                    Err(err) => {
                        let _ = ready_tx.send(Err(EngineError::Database {
                            message: format!("failed to open SQLite database: {err}"),
                        }));
                        return;
                    }
                };

                let init_result = initialize(&mut conn);
                if ready_tx.send(init_result).is_err() {
                    error!("DB initialization receiver dropped before ready signal");
                    return;
                }

                while let Ok(command) = command_rx.recv() {
                    match command {
                        DbCommand::Execute(task) => {
                            task(&mut conn);
                        }
                        DbCommand::Shutdown => break,
                    }
                }

                info!("Database thread shutting down");
            })
            .map_err(|err| EngineError::Database {
                message: format!("failed to spawn database worker thread: {err}"),
            })?;

        ready_rx.recv().map_err(|_| EngineError::Database {
            message: "database worker exited before signaling readiness".to_string(),
        })??;

        info!(path = %db_path.display(), "Database initialized");

        Ok(Self {
            inner: Arc::new(DatabaseInner {
                sender: command_tx,
                worker: Mutex::new(Some(worker)),
            }),
            db_path: Arc::new(db_path),
        })
    }

    /// The filesystem path this database was opened at.
    pub fn path(&self) -> &Path {
        self.db_path.as_path()
    }

    /// Runs a task on the connection-owning worker thread.
    pub(crate) async fn execute<F, T>(&self, task: F) -> EngineResult<T>
    where
        F: FnOnce(&mut Connection) -> EngineResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let sender = self.inner.sender.clone();
        let (reply_tx, reply_rx) = oneshot::channel();

        let command = DbCommand::Execute(Box::new(move |conn| {
            let result = task(conn);
            if reply_tx.send(result).is_err() {
                error!("DB caller dropped before receiving result");
            }
        }));

        sender.send(command).map_err(|err| EngineError::Database {
            message: format!("failed to send command to DB thread: {err}"),
        })?;

        reply_rx.await.map_err(|_| EngineError::Database {
            message: "database thread terminated unexpectedly".to_string(),
        })?
    }
}

fn initialize(conn: &mut Connection) -> EngineResult<()> {
    if let Err(err) = conn.pragma_update(None, "journal_mode", "WAL") {
        error!("Failed to enable WAL mode: {err}");
    }
    // Cascade deletes depend on this pragma; unlike WAL it is not optional.
    conn.pragma_update(None, "foreign_keys", "ON")?;

    migrations::run_migrations(conn)
}
