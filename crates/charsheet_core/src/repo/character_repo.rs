//! Character repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Provide CRUD APIs over `characters` storage.
//! - Own the cascading delete of skills and items.
//!
//! # Invariants
//! - `create`/`update` validate field lengths before opening a transaction.
//! - `update` overwrites mutable columns only; `id` and `date_created` stay.
//! - `delete` removes owned skills, owned items and the character in one
//!   transaction. No orphan survives a committed delete.
//! - Listing order is `date_created DESC`, newest insert first on ties.

use crate::model::character::{Character, CharacterFields, CharacterId};
use crate::model::{now_epoch_ms, EntityKind};
use crate::repo::{ensure_connection_ready, parse_uuid, RepoError, RepoResult};
use log::{error, info};
use rusqlite::{params, Connection, OptionalExtension, Row, Transaction, TransactionBehavior};

const CHARACTER_COLUMNS: [&str; 18] = [
    "id",
    "last_name",
    "name",
    "age",
    "race",
    "social_class",
    "talent",
    "adventurer_rank",
    "strength",
    "speed",
    "resistance",
    "sword_style",
    "smith_rank",
    "alchemy_rank",
    "mana_reserve",
    "mana_zone",
    "magic_mastery",
    "date_created",
];

const CHARACTER_SELECT_SQL: &str = "SELECT
    id,
    last_name,
    name,
    age,
    race,
    social_class,
    talent,
    adventurer_rank,
    strength,
    speed,
    resistance,
    sword_style,
    smith_rank,
    alchemy_rank,
    mana_reserve,
    mana_zone,
    magic_mastery,
    date_created
FROM characters";

/// Result of a cascading character delete.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeletedCharacter {
    /// Record as it was right before deletion.
    pub character: Character,
    pub skills_deleted: usize,
    pub items_deleted: usize,
}

/// Repository interface for character CRUD operations.
pub trait CharacterRepository {
    /// All characters, newest first.
    fn list_all(&self) -> RepoResult<Vec<Character>>;
    fn create(&self, fields: CharacterFields) -> RepoResult<Character>;
    fn get(&self, id: CharacterId) -> RepoResult<Character>;
    fn update(&self, id: CharacterId, fields: CharacterFields) -> RepoResult<Character>;
    /// Deletes the character together with its skills and items.
    fn delete(&self, id: CharacterId) -> RepoResult<DeletedCharacter>;
}

/// SQLite-backed character repository.
pub struct SqliteCharacterRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteCharacterRepository<'conn> {
    /// Creates a repository over a connection opened by the store.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn, "characters", &CHARACTER_COLUMNS)?;
        Ok(Self { conn })
    }
}

impl CharacterRepository for SqliteCharacterRepository<'_> {
    fn list_all(&self) -> RepoResult<Vec<Character>> {
        let mut stmt = self.conn.prepare(&format!(
            "{CHARACTER_SELECT_SQL} ORDER BY date_created DESC, rowid DESC;"
        ))?;
        let mut rows = stmt.query([])?;
        let mut characters = Vec::new();
        while let Some(row) = rows.next()? {
            characters.push(parse_character_row(row)?);
        }
        Ok(characters)
    }

    fn create(&self, fields: CharacterFields) -> RepoResult<Character> {
        fields.validate()?;
        let character = Character::new(fields, now_epoch_ms());

        let result = (|| -> RepoResult<()> {
            let tx = Transaction::new_unchecked(self.conn, TransactionBehavior::Immediate)?;
            insert_character(&tx, &character)?;
            tx.commit()?;
            Ok(())
        })();

        match result {
            Ok(()) => {
                info!(
                    "event=character_create module=repo status=ok id={}",
                    character.id
                );
                Ok(character)
            }
            Err(err) => {
                error!(
                    "event=character_create module=repo status=error id={} error={}",
                    character.id, err
                );
                Err(err)
            }
        }
    }

    fn get(&self, id: CharacterId) -> RepoResult<Character> {
        load_character(self.conn, id)
    }

    fn update(&self, id: CharacterId, fields: CharacterFields) -> RepoResult<Character> {
        fields.validate()?;

        let result = (|| -> RepoResult<Character> {
            let tx = Transaction::new_unchecked(self.conn, TransactionBehavior::Immediate)?;
            let mut character = load_character(&tx, id)?;
            character.apply_fields(fields);
            update_character(&tx, &character)?;
            tx.commit()?;
            Ok(character)
        })();

        match &result {
            Ok(_) => info!("event=character_update module=repo status=ok id={id}"),
            Err(err) => {
                error!("event=character_update module=repo status=error id={id} error={err}")
            }
        }
        result
    }

    fn delete(&self, id: CharacterId) -> RepoResult<DeletedCharacter> {
        let result = (|| -> RepoResult<DeletedCharacter> {
            let tx = Transaction::new_unchecked(self.conn, TransactionBehavior::Immediate)?;
            let character = load_character(&tx, id)?;
            let id_text = id.to_string();

            let skills_deleted = tx.execute(
                "DELETE FROM skills WHERE character_id = ?1;",
                [id_text.as_str()],
            )?;
            let items_deleted = tx.execute(
                "DELETE FROM items WHERE character_id = ?1;",
                [id_text.as_str()],
            )?;
            tx.execute("DELETE FROM characters WHERE id = ?1;", [id_text.as_str()])?;
            tx.commit()?;

            Ok(DeletedCharacter {
                character,
                skills_deleted,
                items_deleted,
            })
        })();

        match &result {
            Ok(deleted) => info!(
                "event=character_delete module=repo status=ok id={} skills_deleted={} items_deleted={}",
                id, deleted.skills_deleted, deleted.items_deleted
            ),
            Err(err) => {
                error!("event=character_delete module=repo status=error id={id} error={err}")
            }
        }
        result
    }
}

/// Returns whether a character row with `id` exists.
pub(crate) fn character_exists(conn: &Connection, id: CharacterId) -> RepoResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM characters WHERE id = ?1);",
        [id.to_string()],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}

/// Fails with `NotFound` unless the character exists.
pub(crate) fn ensure_character_exists(conn: &Connection, id: CharacterId) -> RepoResult<()> {
    if character_exists(conn, id)? {
        Ok(())
    } else {
        Err(RepoError::NotFound {
            kind: EntityKind::Character,
            id,
        })
    }
}

fn load_character(conn: &Connection, id: CharacterId) -> RepoResult<Character> {
    let mut stmt = conn.prepare(&format!("{CHARACTER_SELECT_SQL} WHERE id = ?1;"))?;
    let character = stmt
        .query_row([id.to_string()], |row| Ok(parse_character_row(row)))
        .optional()?;

    match character {
        Some(parsed) => parsed,
        None => Err(RepoError::NotFound {
            kind: EntityKind::Character,
            id,
        }),
    }
}

fn insert_character(conn: &Connection, character: &Character) -> RepoResult<()> {
    conn.execute(
        "INSERT INTO characters (
            id,
            last_name,
            name,
            age,
            race,
            social_class,
            talent,
            adventurer_rank,
            strength,
            speed,
            resistance,
            sword_style,
            smith_rank,
            alchemy_rank,
            mana_reserve,
            mana_zone,
            magic_mastery,
            date_created
        ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16, ?17, ?18);",
        params![
            character.id.to_string(),
            character.last_name,
            character.name,
            character.age,
            character.race,
            character.social_class,
            character.talent,
            character.adventurer_rank,
            character.strength,
            character.speed,
            character.resistance,
            character.sword_style,
            character.smith_rank,
            character.alchemy_rank,
            character.mana_reserve,
            character.mana_zone,
            character.magic_mastery,
            character.date_created,
        ],
    )?;
    Ok(())
}

fn update_character(conn: &Connection, character: &Character) -> RepoResult<()> {
    let changed = conn.execute(
        "UPDATE characters
         SET
            last_name = ?2,
            name = ?3,
            age = ?4,
            race = ?5,
            social_class = ?6,
            talent = ?7,
            adventurer_rank = ?8,
            strength = ?9,
            speed = ?10,
            resistance = ?11,
            sword_style = ?12,
            smith_rank = ?13,
            alchemy_rank = ?14,
            mana_reserve = ?15,
            mana_zone = ?16,
            magic_mastery = ?17
         WHERE id = ?1;",
        params![
            character.id.to_string(),
            character.last_name,
            character.name,
            character.age,
            character.race,
            character.social_class,
            character.talent,
            character.adventurer_rank,
            character.strength,
            character.speed,
            character.resistance,
            character.sword_style,
            character.smith_rank,
            character.alchemy_rank,
            character.mana_reserve,
            character.mana_zone,
            character.magic_mastery,
        ],
    )?;

    if changed == 0 {
        return Err(RepoError::NotFound {
            kind: EntityKind::Character,
            id: character.id,
        });
    }
    Ok(())
}

fn parse_character_row(row: &Row<'_>) -> RepoResult<Character> {
    let id_text: String = row.get("id")?;
    Ok(Character {
        id: parse_uuid(&id_text, "characters.id")?,
        last_name: row.get("last_name")?,
        name: row.get("name")?,
        age: row.get("age")?,
        race: row.get("race")?,
        social_class: row.get("social_class")?,
        talent: row.get("talent")?,
        adventurer_rank: row.get("adventurer_rank")?,
        strength: row.get("strength")?,
        speed: row.get("speed")?,
        resistance: row.get("resistance")?,
        sword_style: row.get("sword_style")?,
        smith_rank: row.get("smith_rank")?,
        alchemy_rank: row.get("alchemy_rank")?,
        mana_reserve: row.get("mana_reserve")?,
        mana_zone: row.get("mana_zone")?,
        magic_mastery: row.get("magic_mastery")?,
        date_created: row.get("date_created")?,
    })
}
