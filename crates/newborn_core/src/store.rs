//! Store facade over the named register database.
//!
//! # Responsibility
//! - Open the `newborn-register` store and hand out per-table repository
//!   handles.
//!
//! # Invariants
//! - Opening an already-established store is idempotent; schema objects are
//!   never duplicated.
//! - One `Store` wraps one connection; operations on it are sequential.
//!   Cross-connection contention is SQLite's behavior (busy timeout, then
//!   error), not reinterpreted here.

use crate::db::{open_db, open_db_in_memory, DbResult};
use crate::repo::activity_repo::SqliteActivityRepository;
use crate::repo::feeding_repo::SqliteFeedingRepository;
use crate::repo::sleep_repo::SqliteSleepRepository;
use rusqlite::Connection;
use std::path::Path;

/// Persisted name of the register store.
pub const STORE_NAME: &str = "newborn-register";

/// File name used when the store is opened by directory.
pub fn store_file_name() -> String {
    format!("{STORE_NAME}.db")
}

/// Handle to the opened register store.
pub struct Store {
    conn: Connection,
}

impl Store {
    /// Opens (and if needed establishes) the store at an explicit path.
    ///
    /// Any error here means the store is unavailable; dependent features
    /// should treat it as fatal until the open is retried.
    pub fn open(path: impl AsRef<Path>) -> DbResult<Self> {
        Ok(Self {
            conn: open_db(path)?,
        })
    }

    /// Opens the store under its persisted name inside `dir`.
    pub fn open_in_dir(dir: impl AsRef<Path>) -> DbResult<Self> {
        Self::open(dir.as_ref().join(store_file_name()))
    }

    /// Opens a throwaway in-memory store, mainly for tests.
    pub fn open_in_memory() -> DbResult<Self> {
        Ok(Self {
            conn: open_db_in_memory()?,
        })
    }

    /// Repository over the `activities` table.
    pub fn activities(&self) -> SqliteActivityRepository<'_> {
        SqliteActivityRepository::new(&self.conn)
    }

    /// Repository over the `feedings` table.
    pub fn feedings(&self) -> SqliteFeedingRepository<'_> {
        SqliteFeedingRepository::new(&self.conn)
    }

    /// Repository over the `sleeps` table.
    pub fn sleeps(&self) -> SqliteSleepRepository<'_> {
        SqliteSleepRepository::new(&self.conn)
    }

    /// Underlying connection, for callers that need raw access.
    pub fn connection(&self) -> &Connection {
        &self.conn
    }
}
