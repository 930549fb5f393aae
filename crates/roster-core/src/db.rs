//! Database connection management.

use std::{
    path::Path,
    sync::{Arc, Mutex},
};

use rusqlite::Connection;

use crate::error::{RosterError, RosterResult};

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS teams (
    id INTEGER PRIMARY KEY,
    name TEXT NOT NULL
);
CREATE TABLE IF NOT EXISTS members (
    id INTEGER PRIMARY KEY,
    username TEXT NOT NULL,
    age INTEGER NOT NULL,
    team_id INTEGER REFERENCES teams (id)
);
";

/// Shared handle to the roster database.
///
/// Statements execute eagerly against the connection; there is no session
/// cache between a write and a subsequent read, so no flush step exists.
pub struct Database {
    pub conn: Arc<Mutex<Connection>>,
}

impl Database {
    pub fn new<P: AsRef<Path>>(path: P) -> RosterResult<Self> {
        let conn = Connection::open(path.as_ref())?;
        Self::from_connection(conn)
    }

    /// In-memory database, mainly for tests.
    pub fn open_in_memory() -> RosterResult<Self> {
        let conn = Connection::open_in_memory()?;
        Self::from_connection(conn)
    }

    fn from_connection(conn: Connection) -> RosterResult<Self> {
        conn.pragma_update(None, "foreign_keys", true)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Creates the `teams` and `members` tables if they do not exist.
    pub fn init_schema(&self) -> RosterResult<()> {
        let conn = self.conn.lock().map_err(|_| RosterError::PoisonError)?;
        conn.execute_batch(SCHEMA)?;
        Ok(())
    }
}
