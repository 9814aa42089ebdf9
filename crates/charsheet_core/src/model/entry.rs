//! Skills and inventory items owned by a character.
//!
//! Both share one shape; the [`EntryKind`] marker picks the backing table and
//! the content length limit.
//!
//! # Invariants
//! - `character_id` references an existing character at creation time and is
//!   never changed afterwards.
//! - Updates only touch `name` and `content`.

use crate::model::character::CharacterId;
use crate::model::validation::{check_len, ValidationError};
use crate::model::EntityKind;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use std::marker::PhantomData;
use uuid::Uuid;

/// Stable identifier for a skill or an item.
pub type EntryId = Uuid;

pub const ENTRY_NAME_MAX_CHARS: usize = 200;

/// Static description of one owned-entry family.
pub trait EntryKind: Debug + Clone + Copy + PartialEq + Eq + Send + Sync + 'static {
    /// Backing table.
    const TABLE: &'static str;
    const ENTITY: EntityKind;
    const CONTENT_MAX_CHARS: usize;
}

/// Marker for skills.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SkillKind;

/// Marker for inventory items.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ItemKind;

impl EntryKind for SkillKind {
    const TABLE: &'static str = "skills";
    const ENTITY: EntityKind = EntityKind::Skill;
    const CONTENT_MAX_CHARS: usize = 20_000;
}

impl EntryKind for ItemKind {
    const TABLE: &'static str = "items";
    const ENTITY: EntityKind = EntityKind::Item;
    const CONTENT_MAX_CHARS: usize = 2_000;
}

/// Mutable part of an entry: the create/update payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryFields {
    pub name: String,
    pub content: String,
}

impl Default for EntryFields {
    fn default() -> Self {
        Self {
            name: ". . .".to_string(),
            content: ". . .".to_string(),
        }
    }
}

impl EntryFields {
    pub fn new(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
        }
    }

    /// Checks column length limits for entries of kind `K`.
    pub fn validate<K: EntryKind>(&self) -> Result<(), ValidationError> {
        check_len("name", &self.name, ENTRY_NAME_MAX_CHARS)?;
        check_len("content", &self.content, K::CONTENT_MAX_CHARS)
    }
}

/// Persisted skill or item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry<K: EntryKind> {
    pub id: EntryId,
    pub name: String,
    pub content: String,
    /// Unix epoch milliseconds.
    pub date_created: i64,
    pub character_id: CharacterId,
    #[serde(skip)]
    kind: PhantomData<K>,
}

pub type Skill = Entry<SkillKind>;
pub type Item = Entry<ItemKind>;

impl<K: EntryKind> Entry<K> {
    /// Builds a not-yet-persisted entry with a fresh id.
    pub fn new(character_id: CharacterId, fields: EntryFields, date_created: i64) -> Self {
        Self::with_id(Uuid::new_v4(), character_id, fields, date_created)
    }

    /// Rebuilds an entry whose identity already exists (storage read path).
    pub fn with_id(
        id: EntryId,
        character_id: CharacterId,
        fields: EntryFields,
        date_created: i64,
    ) -> Self {
        Self {
            id,
            name: fields.name,
            content: fields.content,
            date_created,
            character_id,
            kind: PhantomData,
        }
    }

    /// Overwrites `name` and `content` in place.
    pub fn apply_fields(&mut self, fields: EntryFields) {
        self.name = fields.name;
        self.content = fields.content;
    }

    pub fn fields(&self) -> EntryFields {
        EntryFields::new(self.name.clone(), self.content.clone())
    }

    pub fn entity_kind(&self) -> EntityKind {
        K::ENTITY
    }
}
