//! SQLite-backed anti-replay counter. One row, one value, behind a
//! `parking_lot::Mutex` so a process can share a single instance across
//! threads — the core still requires callers to serialize the logical
//! authorize-then-persist sequence themselves.

use acf_core::{AcfError, ReplayStore};
use parking_lot::Mutex;
use rusqlite::{params, Connection};
use std::path::Path;

pub struct SqliteReplayStore {
    conn: Mutex<Connection>,
}

impl SqliteReplayStore {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, AcfError> {
        let conn = Connection::open(path)
            .map_err(|err| AcfError::SystemError(format!("opening replay store: {err}")))?;
        let store = Self {
            conn: Mutex::new(conn),
        };
        store.migrate()?;
        Ok(store)
    }

    pub fn open_memory() -> Result<Self, AcfError> {
        let conn = Connection::open_in_memory()
            .map_err(|err| AcfError::SystemError(format!("opening replay store: {err}")))?;
        let store = Self {
            conn: Mutex::new(conn),
        };
        store.migrate()?;
        Ok(store)
    }

    fn migrate(&self) -> Result<(), AcfError> {
        let conn = self.conn.lock();
        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS replay_state (
                id    INTEGER PRIMARY KEY CHECK (id = 0),
                value INTEGER NOT NULL
            );
            INSERT OR IGNORE INTO replay_state (id, value) VALUES (0, 0);",
        )
        .map_err(|err| AcfError::SystemError(format!("migrating replay store: {err}")))
    }
}

impl ReplayStore for SqliteReplayStore {
    fn retrieve_replay_id(&self) -> Result<u64, AcfError> {
        let conn = self.conn.lock();
        conn.query_row(
            "SELECT value FROM replay_state WHERE id = 0",
            [],
            |row| row.get::<_, i64>(0),
        )
        .map(|v| v as u64)
        .map_err(|err| AcfError::SystemError(format!("reading replay id: {err}")))
    }

    fn store_replay_id(&self, id: u64) -> Result<(), AcfError> {
        let conn = self.conn.lock();
        conn.execute(
            "UPDATE replay_state SET value = ?1 WHERE id = 0",
            params![id as i64],
        )
        .map_err(|err| AcfError::SystemError(format!("storing replay id: {err}")))?;
        Ok(())
    }
}
