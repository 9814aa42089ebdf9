//! Skill/item repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Provide owner-scoped CRUD APIs over `skills` and `items` storage.
//! - Detect entries fetched under the wrong owner.
//!
//! # Invariants
//! - Creation requires an existing owning character.
//! - `character_id` and `date_created` are never written after insert.
//! - Listing order is `date_created DESC`, newest insert first on ties.
//! - Ownership mismatch is reported as `RepoError::Consistency` and logged.

use crate::model::character::CharacterId;
use crate::model::entry::{Entry, EntryFields, EntryId, EntryKind};
use crate::model::now_epoch_ms;
use crate::repo::character_repo::ensure_character_exists;
use crate::repo::{ensure_connection_ready, parse_uuid, RepoError, RepoResult};
use log::{error, info, warn};
use rusqlite::{params, Connection, OptionalExtension, Row, Transaction, TransactionBehavior};
use std::marker::PhantomData;

const ENTRY_COLUMNS: [&str; 5] = ["id", "name", "content", "date_created", "character_id"];

/// Repository interface for entries of kind `K` owned by characters.
pub trait EntryRepository<K: EntryKind> {
    /// Entries owned by `character_id`, newest first.
    fn list_for_character(&self, character_id: CharacterId) -> RepoResult<Vec<Entry<K>>>;
    fn create(&self, character_id: CharacterId, fields: EntryFields) -> RepoResult<Entry<K>>;
    /// Overwrites `name` and `content`; the owner is untouched.
    fn update(&self, entry_id: EntryId, fields: EntryFields) -> RepoResult<Entry<K>>;
    fn delete(&self, entry_id: EntryId) -> RepoResult<Entry<K>>;
    /// Loads one entry regardless of owner.
    fn get(&self, entry_id: EntryId) -> RepoResult<Entry<K>>;
    /// Loads one entry and asserts it belongs to `character_id`.
    fn get_scoped(&self, character_id: CharacterId, entry_id: EntryId) -> RepoResult<Entry<K>>;
}

/// SQLite-backed entry repository for one entry kind.
pub struct SqliteEntryRepository<'conn, K: EntryKind> {
    conn: &'conn Connection,
    kind: PhantomData<K>,
}

impl<'conn, K: EntryKind> SqliteEntryRepository<'conn, K> {
    /// Creates a repository over a connection opened by the store.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn, K::TABLE, &ENTRY_COLUMNS)?;
        Ok(Self {
            conn,
            kind: PhantomData,
        })
    }
}

impl<K: EntryKind> EntryRepository<K> for SqliteEntryRepository<'_, K> {
    fn list_for_character(&self, character_id: CharacterId) -> RepoResult<Vec<Entry<K>>> {
        let tx = Transaction::new_unchecked(self.conn, TransactionBehavior::Deferred)?;
        ensure_character_exists(&tx, character_id)?;

        let entries = {
            let mut stmt = tx.prepare(&format!(
                "{} WHERE character_id = ?1 ORDER BY date_created DESC, rowid DESC;",
                select_sql::<K>()
            ))?;
            let mut rows = stmt.query([character_id.to_string()])?;
            let mut entries = Vec::new();
            while let Some(row) = rows.next()? {
                entries.push(parse_entry_row::<K>(row)?);
            }
            entries
        };
        tx.commit()?;
        Ok(entries)
    }

    fn create(&self, character_id: CharacterId, fields: EntryFields) -> RepoResult<Entry<K>> {
        fields.validate::<K>()?;
        let entry = Entry::<K>::new(character_id, fields, now_epoch_ms());

        let result = (|| -> RepoResult<()> {
            let tx = Transaction::new_unchecked(self.conn, TransactionBehavior::Immediate)?;
            ensure_character_exists(&tx, character_id)?;
            tx.execute(
                &format!(
                    "INSERT INTO {} (id, name, content, date_created, character_id)
                     VALUES (?1, ?2, ?3, ?4, ?5);",
                    K::TABLE
                ),
                params![
                    entry.id.to_string(),
                    entry.name,
                    entry.content,
                    entry.date_created,
                    entry.character_id.to_string(),
                ],
            )?;
            tx.commit()?;
            Ok(())
        })();

        let kind = K::ENTITY;
        match result {
            Ok(()) => {
                info!(
                    "event={kind}_create module=repo status=ok id={} character_id={}",
                    entry.id, character_id
                );
                Ok(entry)
            }
            Err(err) => {
                error!(
                    "event={kind}_create module=repo status=error character_id={character_id} error={err}"
                );
                Err(err)
            }
        }
    }

    fn update(&self, entry_id: EntryId, fields: EntryFields) -> RepoResult<Entry<K>> {
        fields.validate::<K>()?;

        let result = (|| -> RepoResult<Entry<K>> {
            let tx = Transaction::new_unchecked(self.conn, TransactionBehavior::Immediate)?;
            let mut entry = load_entry::<K>(&tx, entry_id)?;
            entry.apply_fields(fields);
            tx.execute(
                &format!(
                    "UPDATE {} SET name = ?2, content = ?3 WHERE id = ?1;",
                    K::TABLE
                ),
                params![entry_id.to_string(), entry.name, entry.content],
            )?;
            tx.commit()?;
            Ok(entry)
        })();

        log_write::<K, _>("update", entry_id, &result);
        result
    }

    fn delete(&self, entry_id: EntryId) -> RepoResult<Entry<K>> {
        let result = (|| -> RepoResult<Entry<K>> {
            let tx = Transaction::new_unchecked(self.conn, TransactionBehavior::Immediate)?;
            let entry = load_entry::<K>(&tx, entry_id)?;
            tx.execute(
                &format!("DELETE FROM {} WHERE id = ?1;", K::TABLE),
                [entry_id.to_string()],
            )?;
            tx.commit()?;
            Ok(entry)
        })();

        log_write::<K, _>("delete", entry_id, &result);
        result
    }

    fn get(&self, entry_id: EntryId) -> RepoResult<Entry<K>> {
        load_entry::<K>(self.conn, entry_id)
    }

    fn get_scoped(&self, character_id: CharacterId, entry_id: EntryId) -> RepoResult<Entry<K>> {
        let entry = load_entry::<K>(self.conn, entry_id)?;
        ensure_character_exists(self.conn, character_id)?;

        if entry.character_id != character_id {
            warn!(
                "event=ownership_mismatch module=repo kind={} id={} expected_owner={} actual_owner={}",
                K::ENTITY,
                entry_id,
                character_id,
                entry.character_id
            );
            return Err(RepoError::Consistency {
                kind: K::ENTITY,
                id: entry_id,
                expected_owner: character_id,
                actual_owner: entry.character_id,
            });
        }

        Ok(entry)
    }
}

fn select_sql<K: EntryKind>() -> String {
    format!(
        "SELECT id, name, content, date_created, character_id FROM {}",
        K::TABLE
    )
}

fn load_entry<K: EntryKind>(conn: &Connection, entry_id: EntryId) -> RepoResult<Entry<K>> {
    let mut stmt = conn.prepare(&format!("{} WHERE id = ?1;", select_sql::<K>()))?;
    let entry = stmt
        .query_row([entry_id.to_string()], |row| Ok(parse_entry_row::<K>(row)))
        .optional()?;

    match entry {
        Some(parsed) => parsed,
        None => Err(RepoError::NotFound {
            kind: K::ENTITY,
            id: entry_id,
        }),
    }
}

fn parse_entry_row<K: EntryKind>(row: &Row<'_>) -> RepoResult<Entry<K>> {
    let id_text: String = row.get("id")?;
    let owner_text: String = row.get("character_id")?;
    Ok(Entry::with_id(
        parse_uuid(&id_text, "entry id")?,
        parse_uuid(&owner_text, "entry character_id")?,
        EntryFields::new(
            row.get::<_, String>("name")?,
            row.get::<_, String>("content")?,
        ),
        row.get("date_created")?,
    ))
}

fn log_write<K: EntryKind, T>(action: &str, entry_id: EntryId, result: &RepoResult<T>) {
    let kind = K::ENTITY;
    match result {
        Ok(_) => info!("event={kind}_{action} module=repo status=ok id={entry_id}"),
        Err(err) => {
            error!("event={kind}_{action} module=repo status=error id={entry_id} error={err}")
        }
    }
}
