//! Owned store handle.
//!
//! A `Store` is opened once at process start, lent to repositories for the
//! duration of each operation, and closed explicitly at shutdown.

use super::{open_db, open_db_in_memory, DbError, DbResult};
use log::{error, info};
use rusqlite::Connection;
use std::path::Path;

/// Migrated SQLite connection with an explicit lifecycle.
#[derive(Debug)]
pub struct Store {
    conn: Connection,
}

impl Store {
    /// Opens (or creates) the database file at `path`.
    pub fn open(path: impl AsRef<Path>) -> DbResult<Self> {
        Ok(Self {
            conn: open_db(path)?,
        })
    }

    /// Opens a private in-memory database.
    pub fn open_in_memory() -> DbResult<Self> {
        Ok(Self {
            conn: open_db_in_memory()?,
        })
    }

    /// Connection borrowed by repository constructors.
    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Closes the underlying connection, flushing pending state.
    pub fn close(self) -> DbResult<()> {
        match self.conn.close() {
            Ok(()) => {
                info!("event=db_close module=db status=ok");
                Ok(())
            }
            Err((_conn, err)) => {
                error!("event=db_close module=db status=error error={err}");
                Err(DbError::Sqlite(err))
            }
        }
    }
}
