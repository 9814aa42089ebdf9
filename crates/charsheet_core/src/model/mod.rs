//! Character sheet domain model.
//!
//! # Responsibility
//! - Define the typed records persisted by the store: characters and the
//!   skills/items they own.
//! - Hold default placeholders and field length limits.
//!
//! # Invariants
//! - Every record is identified by a stable generated UUID.
//! - A skill or item belongs to exactly one character for its whole lifetime.
//! - `date_created` is set once at creation and never changes.

pub mod character;
pub mod entry;
pub mod validation;

use std::fmt::{Display, Formatter};
use std::time::{SystemTime, UNIX_EPOCH};

/// Entity family, used to give errors and log events precise context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Character,
    Skill,
    Item,
}

impl EntityKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Character => "character",
            Self::Skill => "skill",
            Self::Item => "item",
        }
    }
}

impl Display for EntityKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Current wall clock in Unix epoch milliseconds.
pub(crate) fn now_epoch_ms() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| i64::try_from(elapsed.as_millis()).unwrap_or(i64::MAX))
        .unwrap_or(0)
}
