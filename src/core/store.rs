//! Append-only audit log in SQLite
//!
//! Every call opens its own connection and transaction and drops both before
//! returning, so concurrent turns never share a handle.

use std::path::{Path, PathBuf};
use std::time::Duration;

use rusqlite::{params, Connection, TransactionBehavior};
use thiserror::Error;
use tracing::debug;

use crate::types::{LogRecord, StoredRecord};

/// How long a writer waits on a locked database before giving up
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS logs (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    timestamp TEXT,
    intent TEXT,
    user_message TEXT,
    department TEXT,
    date TEXT,
    time TEXT,
    doctor TEXT,
    symptom TEXT
)";

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("Audit log at {0} is not writable")]
    Unavailable(String),
}

/// Handle to the audit database file
#[derive(Debug, Clone)]
pub struct AuditStore {
    path: PathBuf,
}

impl AuditStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Create the `logs` table if missing. Safe to call on every start.
    pub fn ensure_schema(&self) -> Result<(), StoreError> {
        let conn = self.open()?;
        conn.execute_batch(SCHEMA)?;
        debug!(path = %self.path.display(), "audit schema ready");
        Ok(())
    }

    /// Write one row; returns its id
    pub fn append(&self, record: &LogRecord) -> Result<i64, StoreError> {
        let mut conn = self.open()?;
        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
        tx.execute(
            "INSERT INTO logs (timestamp, intent, user_message, department, date, time, doctor, symptom)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            params![
                record.timestamp,
                record.intent,
                record.user_message,
                record.department,
                record.date,
                record.time,
                record.doctor,
                record.symptom,
            ],
        )?;
        let id = tx.last_insert_rowid();
        tx.commit()?;
        Ok(id)
    }

    /// Most recent `limit` rows, oldest first
    pub fn recent(&self, limit: usize) -> Result<Vec<StoredRecord>, StoreError> {
        let conn = self.open()?;
        let mut stmt = conn.prepare(
            "SELECT id, timestamp, intent, user_message, department, date, time, doctor, symptom
             FROM logs ORDER BY id DESC LIMIT ?1",
        )?;
        let limit = i64::try_from(limit).unwrap_or(i64::MAX);
        let rows = stmt.query_map(params![limit], |row| {
            Ok(StoredRecord {
                id: row.get(0)?,
                record: LogRecord {
                    timestamp: row.get::<_, Option<String>>(1)?.unwrap_or_default(),
                    intent: row.get(2)?,
                    user_message: row.get(3)?,
                    department: row.get(4)?,
                    date: row.get(5)?,
                    time: row.get(6)?,
                    doctor: row.get(7)?,
                    symptom: row.get(8)?,
                },
            })
        })?;

        let mut records = rows.collect::<Result<Vec<_>, _>>()?;
        records.reverse();
        Ok(records)
    }

    /// Number of rows written so far
    pub fn count(&self) -> Result<i64, StoreError> {
        let conn = self.open()?;
        Ok(conn.query_row("SELECT COUNT(*) FROM logs", [], |row| row.get(0))?)
    }

    fn open(&self) -> Result<Connection, StoreError> {
        let conn = Connection::open(&self.path).map_err(|e| match e {
            rusqlite::Error::SqliteFailure(_, _) => StoreError::Unavailable(self.path.display().to_string()),
            other => StoreError::Sqlite(other),
        })?;
        conn.busy_timeout(BUSY_TIMEOUT)?;
        Ok(conn)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Turn;
    use tempfile::TempDir;

    fn store() -> (TempDir, AuditStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = AuditStore::new(dir.path().join("logs.db"));
        store.ensure_schema().unwrap();
        (dir, store)
    }

    #[test]
    fn test_append_and_read_back() {
        let (_dir, store) = store();
        let record = LogRecord::from_turn(
            &Turn::new("ask_symptom", "I have a fever").with_slot("symptom", "fever"),
        );

        let id = store.append(&record).unwrap();
        let rows = store.recent(10).unwrap();

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].id, id);
        assert_eq!(rows[0].record, record);
    }

    #[test]
    fn test_recent_returns_newest_oldest_first() {
        let (_dir, store) = store();
        for i in 0..5 {
            store.append(&LogRecord::from_turn(&Turn::new(format!("intent_{i}"), ""))).unwrap();
        }

        let rows = store.recent(2).unwrap();
        let intents: Vec<_> = rows.iter().map(|r| r.record.intent.clone().unwrap()).collect();
        assert_eq!(intents, vec!["intent_3", "intent_4"]);
    }

    #[test]
    fn test_append_without_schema_fails() {
        let dir = tempfile::tempdir().unwrap();
        let store = AuditStore::new(dir.path().join("fresh.db"));
        let result = store.append(&LogRecord::from_turn(&Turn::default()));
        assert!(result.is_err());
    }

    #[test]
    fn test_missing_directory_is_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let store = AuditStore::new(dir.path().join("no/such/dir/logs.db"));
        assert!(matches!(store.ensure_schema(), Err(StoreError::Unavailable(_))));
    }
}
