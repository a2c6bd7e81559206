//! SQLite-backed progress storage.
//!
//! Provides persistent storage for:
//! - The day-scoped progress record (as JSON under [`PROGRESS_KEY`])
//! - Key-value store for application state

use std::path::Path;

use rusqlite::{params, Connection};

use super::{data_dir, ProgressRecord, ProgressStore, PROGRESS_KEY};
use crate::error::PersistenceError;

/// SQLite database holding a small key-value table.
pub struct Database {
    conn: Connection,
    location: String,
}

impl Database {
    /// Open the database at `<data_dir>/hydroom.db`.
    ///
    /// Creates the database file and schema if they don't exist.
    ///
    /// # Errors
    /// Returns an error if the data directory or the database cannot be
    /// opened, or the schema cannot be created.
    pub fn open() -> Result<Self, PersistenceError> {
        let dir = data_dir().map_err(|e| PersistenceError::Read {
            location: "data directory".into(),
            message: e.to_string(),
        })?;
        Self::open_at(&dir.join("hydroom.db"))
    }

    /// Open (or create) a database file at an explicit path.
    pub fn open_at(path: &Path) -> Result<Self, PersistenceError> {
        let location = path.display().to_string();
        let conn = Connection::open(path).map_err(|e| PersistenceError::Read {
            location: location.clone(),
            message: e.to_string(),
        })?;
        let db = Self { conn, location };
        db.migrate()?;
        Ok(db)
    }

    /// Open an in-memory database (for tests).
    pub fn open_memory() -> Result<Self, PersistenceError> {
        let location = ":memory:".to_string();
        let conn = Connection::open_in_memory().map_err(|e| PersistenceError::Read {
            location: location.clone(),
            message: e.to_string(),
        })?;
        let db = Self { conn, location };
        db.migrate()?;
        Ok(db)
    }

    fn migrate(&self) -> Result<(), PersistenceError> {
        self.conn
            .execute_batch(
                "CREATE TABLE IF NOT EXISTS kv (
                    key   TEXT PRIMARY KEY,
                    value TEXT NOT NULL
                );",
            )
            .map_err(|e| self.write_error(e))
    }

    /// Get a value from the kv store.
    pub fn kv_get(&self, key: &str) -> Result<Option<String>, rusqlite::Error> {
        let mut stmt = self.conn.prepare("SELECT value FROM kv WHERE key = ?1")?;
        let result = stmt.query_row(params![key], |row| row.get::<_, String>(0));
        match result {
            Ok(v) => Ok(Some(v)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Set a value in the kv store.
    pub fn kv_set(&self, key: &str, value: &str) -> Result<(), rusqlite::Error> {
        self.conn.execute(
            "INSERT OR REPLACE INTO kv (key, value) VALUES (?1, ?2)",
            params![key, value],
        )?;
        Ok(())
    }

    fn read_error(&self, err: rusqlite::Error) -> PersistenceError {
        PersistenceError::Read {
            location: self.location.clone(),
            message: err.to_string(),
        }
    }

    fn write_error(&self, err: rusqlite::Error) -> PersistenceError {
        PersistenceError::Write {
            location: self.location.clone(),
            message: err.to_string(),
        }
    }
}

impl ProgressStore for Database {
    fn load(&self) -> Result<Option<ProgressRecord>, PersistenceError> {
        match self.kv_get(PROGRESS_KEY).map_err(|e| self.read_error(e))? {
            Some(json) => ProgressRecord::from_json(&json).map(Some),
            None => Ok(None),
        }
    }

    fn save(&mut self, record: &ProgressRecord) -> Result<(), PersistenceError> {
        let json = record.to_json()?;
        self.kv_set(PROGRESS_KEY, &json)
            .map_err(|e| self.write_error(e))
    }
}
