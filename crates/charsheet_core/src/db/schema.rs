//! Character sheet schema bootstrap.
//!
//! A store file is stamped with [`APPLICATION_ID`] and [`SCHEMA_VERSION`]
//! in its header. Blank files are stamped on first open; any other stamp is
//! refused, so a foreign SQLite file is never written to.

use crate::db::{DbError, DbResult};
use log::info;
use rusqlite::{Connection, Transaction, TransactionBehavior};

/// `PRAGMA application_id` of a character sheet store ("CSHT").
pub const APPLICATION_ID: i32 = 0x4353_4854;

/// Layout version written to `PRAGMA user_version`.
pub const SCHEMA_VERSION: u32 = 1;

const SCHEMA_SQL: &str = include_str!("schema.sql");

/// Header stamp of an SQLite file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SchemaStamp {
    pub application_id: i32,
    pub version: u32,
}

impl SchemaStamp {
    pub const CURRENT: Self = Self {
        application_id: APPLICATION_ID,
        version: SCHEMA_VERSION,
    };

    const BLANK: Self = Self {
        application_id: 0,
        version: 0,
    };

    /// Reads the stamp from the connection's main database.
    pub fn read(conn: &Connection) -> DbResult<Self> {
        let application_id = conn.query_row("PRAGMA application_id;", [], |row| row.get(0))?;
        let version = conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?;
        Ok(Self {
            application_id,
            version,
        })
    }
}

/// Creates the tables on a blank database, or checks the stamp of an
/// existing store.
///
/// Concurrent first opens are serialized by an `IMMEDIATE` transaction;
/// the loser sees the winner's stamp and returns without writing.
pub fn ensure_schema(conn: &Connection) -> DbResult<()> {
    if SchemaStamp::read(conn)? == SchemaStamp::CURRENT {
        return Ok(());
    }

    let tx = Transaction::new_unchecked(conn, TransactionBehavior::Immediate)?;
    match SchemaStamp::read(&tx)? {
        SchemaStamp::CURRENT => return Ok(()),
        SchemaStamp::BLANK => {}
        found => return Err(DbError::UnrecognizedSchema(found)),
    }

    tx.execute_batch(SCHEMA_SQL)?;
    tx.execute_batch(&format!(
        "PRAGMA application_id = {APPLICATION_ID}; PRAGMA user_version = {SCHEMA_VERSION};"
    ))?;
    tx.commit()?;

    info!("event=schema_create module=db status=ok version={SCHEMA_VERSION}");
    Ok(())
}
