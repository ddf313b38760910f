//! SQLite record store: `user_data` and `logs` tables.

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use rusqlite::{params, Connection};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{StoreError, StoreResult};

const SCHEMA: &str = r#"
    CREATE TABLE IF NOT EXISTS user_data (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL,
        value TEXT NOT NULL,
        timestamp DATETIME DEFAULT CURRENT_TIMESTAMP
    );

    CREATE TABLE IF NOT EXISTS logs (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        level TEXT NOT NULL,
        message TEXT NOT NULL,
        timestamp DATETIME DEFAULT CURRENT_TIMESTAMP
    );
"#;

/// A persisted name/value pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub id: i64,
    pub name: String,
    pub value: String,
    pub timestamp: String,
}

/// An append-only audit line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    pub id: i64,
    pub level: String,
    pub message: String,
    pub timestamp: String,
}

/// Row counts of both tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StoreCounts {
    pub user_records: i64,
    pub log_records: i64,
}

/// File-backed record store.
///
/// Every operation opens its own connection and drops it before returning;
/// no transaction spans two calls. `lock` serializes callers so the store can
/// be shared across threads.
pub struct RecordStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl RecordStore {
    /// Open (or create) the store at `path` and make sure both tables exist.
    pub fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let store = Self {
            path,
            lock: Mutex::new(()),
        };
        store.with_conn(|conn| {
            conn.execute_batch(SCHEMA)?;
            Ok(())
        })?;
        debug!(path = %store.path.display(), "record store ready");
        Ok(store)
    }

    /// Location of the database file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Size of the database file in bytes, 0 if it does not exist.
    pub fn file_size(&self) -> u64 {
        std::fs::metadata(&self.path).map(|m| m.len()).unwrap_or(0)
    }

    fn with_conn<T>(&self, f: impl FnOnce(&mut Connection) -> StoreResult<T>) -> StoreResult<T> {
        let _guard = self.lock.lock().map_err(|_| StoreError::Poisoned)?;
        let mut conn = Connection::open(&self.path)?;
        f(&mut conn)
    }

    /// Insert a record and its `INFO` log line. Returns the new record id.
    pub fn save(&self, name: &str, value: &str) -> StoreResult<i64> {
        self.with_conn(|conn| {
            let tx = conn.transaction()?;
            tx.execute(
                "INSERT INTO user_data (name, value) VALUES (?1, ?2)",
                params![name, value],
            )?;
            let id = tx.last_insert_rowid();
            tx.execute(
                "INSERT INTO logs (level, message) VALUES (?1, ?2)",
                params!["INFO", format!("Data saved: {name} = {value}")],
            )?;
            tx.commit()?;
            Ok(id)
        })
    }

    /// All records, newest timestamp first. Records sharing a timestamp are
    /// ordered by descending id.
    pub fn all(&self) -> StoreResult<Vec<Record>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(
                "SELECT id, name, value, timestamp FROM user_data \
                 ORDER BY timestamp DESC, id DESC",
            )?;
            let rows = stmt.query_map([], |row| {
                Ok(Record {
                    id: row.get(0)?,
                    name: row.get(1)?,
                    value: row.get(2)?,
                    timestamp: row.get(3)?,
                })
            })?;
            Ok(rows.collect::<Result<Vec<_>, _>>()?)
        })
    }

    /// Delete one record by id. Returns `false` if no row matched; a log line
    /// is written only when a row was removed.
    pub fn delete(&self, id: i64) -> StoreResult<bool> {
        self.with_conn(|conn| {
            let tx = conn.transaction()?;
            let affected = tx.execute("DELETE FROM user_data WHERE id = ?1", params![id])?;
            if affected > 0 {
                tx.execute(
                    "INSERT INTO logs (level, message) VALUES (?1, ?2)",
                    params!["INFO", format!("Data deleted: ID {id}")],
                )?;
            }
            tx.commit()?;
            Ok(affected > 0)
        })
    }

    /// Append a log line. Returns its id.
    pub fn log(&self, level: &str, message: &str) -> StoreResult<i64> {
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO logs (level, message) VALUES (?1, ?2)",
                params![level, message],
            )?;
            Ok(conn.last_insert_rowid())
        })
    }

    /// All log lines in insertion order.
    pub fn logs(&self) -> StoreResult<Vec<LogEntry>> {
        self.with_conn(|conn| {
            let mut stmt =
                conn.prepare("SELECT id, level, message, timestamp FROM logs ORDER BY id")?;
            let rows = stmt.query_map([], |row| {
                Ok(LogEntry {
                    id: row.get(0)?,
                    level: row.get(1)?,
                    message: row.get(2)?,
                    timestamp: row.get(3)?,
                })
            })?;
            Ok(rows.collect::<Result<Vec<_>, _>>()?)
        })
    }

    pub fn counts(&self) -> StoreResult<StoreCounts> {
        self.with_conn(|conn| {
            let user_records = conn.query_row("SELECT COUNT(*) FROM user_data", [], |r| r.get(0))?;
            let log_records = conn.query_row("SELECT COUNT(*) FROM logs", [], |r| r.get(0))?;
            Ok(StoreCounts {
                user_records,
                log_records,
            })
        })
    }

    /// Remove every row from both tables. Tables and id sequences are kept,
    /// so ids issued afterwards keep increasing.
    pub fn clear(&self) -> StoreResult<()> {
        self.with_conn(|conn| {
            let tx = conn.transaction()?;
            tx.execute("DELETE FROM user_data", [])?;
            tx.execute("DELETE FROM logs", [])?;
            tx.commit()?;
            Ok(())
        })
    }
}

// =============================================================================
// TESTS
// =============================================================================
