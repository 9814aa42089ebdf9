//! Core data layer for the character sheet manager.
//! This crate owns the data model, its CRUD lifecycle and integrity rules.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use db::{open_db, open_db_in_memory, DbError, DbResult, Store};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::character::{Character, CharacterFields, CharacterId};
pub use model::entry::{Entry, EntryFields, EntryId, EntryKind, Item, ItemKind, Skill, SkillKind};
pub use model::validation::ValidationError;
pub use model::EntityKind;
pub use repo::character_repo::{CharacterRepository, DeletedCharacter, SqliteCharacterRepository};
pub use repo::entry_repo::{EntryRepository, SqliteEntryRepository};
pub use repo::{ErrorClass, RepoError, RepoResult};
pub use service::character_service::CharacterService;
pub use service::entry_service::EntryService;
pub use service::form::{parse_character_form, parse_entry_form, RawForm};

/// SQLite-backed skill repository.
pub type SqliteSkillRepository<'conn> = SqliteEntryRepository<'conn, SkillKind>;
/// SQLite-backed item repository.
pub type SqliteItemRepository<'conn> = SqliteEntryRepository<'conn, ItemKind>;
