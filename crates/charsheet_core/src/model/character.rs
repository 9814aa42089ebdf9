//! Character aggregate.
//!
//! # Responsibility
//! - Define the root record of a character sheet.
//! - Provide the default placeholder values used by programmatic construction.
//!
//! # Invariants
//! - `id` is stable once assigned.
//! - Updates overwrite the mutable fields in place; `id` and `date_created`
//!   are never touched.
//! - Defaults apply to `CharacterFields::default()` only. The form path
//!   requires every field explicitly.

use crate::model::validation::{check_len, ValidationError};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier for a character.
pub type CharacterId = Uuid;

/// Limit shared by every short text column of `characters`.
pub const CHARACTER_TEXT_MAX_CHARS: usize = 200;
/// Limit of the long-form `magic_mastery` column.
pub const MAGIC_MASTERY_MAX_CHARS: usize = 2000;

/// Every mutable attribute of a character.
///
/// Used as input for create/update and as the in-place update payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacterFields {
    pub last_name: String,
    pub name: String,
    pub age: i64,
    pub race: String,
    pub social_class: String,
    pub talent: String,
    pub adventurer_rank: String,
    /// Tiered rank, `E` (weakest) to `S`.
    pub strength: String,
    pub speed: String,
    pub resistance: String,
    pub sword_style: String,
    pub smith_rank: String,
    pub alchemy_rank: String,
    pub mana_reserve: String,
    pub mana_zone: String,
    /// Long-form free text.
    pub magic_mastery: String,
}

impl Default for CharacterFields {
    fn default() -> Self {
        Self {
            last_name: "Doe".to_string(),
            name: "John".to_string(),
            age: 20,
            race: "Humain".to_string(),
            social_class: "Plébien".to_string(),
            talent: "Aucun".to_string(),
            adventurer_rank: "Aucun".to_string(),
            strength: "E".to_string(),
            speed: "E".to_string(),
            resistance: "E".to_string(),
            sword_style: "Aucun".to_string(),
            smith_rank: "/".to_string(),
            alchemy_rank: "/".to_string(),
            mana_reserve: "Très faible".to_string(),
            mana_zone: "/".to_string(),
            magic_mastery: "/".to_string(),
        }
    }
}

impl CharacterFields {
    /// Checks column length limits.
    ///
    /// Must pass before any stored state is touched.
    pub fn validate(&self) -> Result<(), ValidationError> {
        for (field, value) in self.short_text_fields() {
            check_len(field, value, CHARACTER_TEXT_MAX_CHARS)?;
        }
        check_len(
            "magic_mastery",
            &self.magic_mastery,
            MAGIC_MASTERY_MAX_CHARS,
        )
    }

    fn short_text_fields(&self) -> [(&'static str, &str); 14] {
        [
            ("last_name", &self.last_name),
            ("name", &self.name),
            ("race", &self.race),
            ("social_class", &self.social_class),
            ("talent", &self.talent),
            ("adventurer_rank", &self.adventurer_rank),
            ("strength", &self.strength),
            ("speed", &self.speed),
            ("resistance", &self.resistance),
            ("sword_style", &self.sword_style),
            ("smith_rank", &self.smith_rank),
            ("alchemy_rank", &self.alchemy_rank),
            ("mana_reserve", &self.mana_reserve),
            ("mana_zone", &self.mana_zone),
        ]
    }
}

/// Persisted character record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Character {
    pub id: CharacterId,
    pub last_name: String,
    pub name: String,
    pub age: i64,
    pub race: String,
    pub social_class: String,
    pub talent: String,
    pub adventurer_rank: String,
    pub strength: String,
    pub speed: String,
    pub resistance: String,
    pub sword_style: String,
    pub smith_rank: String,
    pub alchemy_rank: String,
    pub mana_reserve: String,
    pub mana_zone: String,
    pub magic_mastery: String,
    /// Unix epoch milliseconds.
    pub date_created: i64,
}

impl Character {
    /// Builds a not-yet-persisted character with a fresh id.
    pub fn new(fields: CharacterFields, date_created: i64) -> Self {
        let mut character = Self {
            id: Uuid::new_v4(),
            last_name: String::new(),
            name: String::new(),
            age: 0,
            race: String::new(),
            social_class: String::new(),
            talent: String::new(),
            adventurer_rank: String::new(),
            strength: String::new(),
            speed: String::new(),
            resistance: String::new(),
            sword_style: String::new(),
            smith_rank: String::new(),
            alchemy_rank: String::new(),
            mana_reserve: String::new(),
            mana_zone: String::new(),
            magic_mastery: String::new(),
            date_created,
        };
        character.apply_fields(fields);
        character
    }

    /// Overwrites every mutable field in place.
    pub fn apply_fields(&mut self, fields: CharacterFields) {
        let CharacterFields {
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
        } = fields;

        self.last_name = last_name;
        self.name = name;
        self.age = age;
        self.race = race;
        self.social_class = social_class;
        self.talent = talent;
        self.adventurer_rank = adventurer_rank;
        self.strength = strength;
        self.speed = speed;
        self.resistance = resistance;
        self.sword_style = sword_style;
        self.smith_rank = smith_rank;
        self.alchemy_rank = alchemy_rank;
        self.mana_reserve = mana_reserve;
        self.mana_zone = mana_zone;
        self.magic_mastery = magic_mastery;
    }

    /// Projects the mutable fields back out of the record.
    pub fn fields(&self) -> CharacterFields {
        CharacterFields {
            last_name: self.last_name.clone(),
            name: self.name.clone(),
            age: self.age,
            race: self.race.clone(),
            social_class: self.social_class.clone(),
            talent: self.talent.clone(),
            adventurer_rank: self.adventurer_rank.clone(),
            strength: self.strength.clone(),
            speed: self.speed.clone(),
            resistance: self.resistance.clone(),
            sword_style: self.sword_style.clone(),
            smith_rank: self.smith_rank.clone(),
            alchemy_rank: self.alchemy_rank.clone(),
            mana_reserve: self.mana_reserve.clone(),
            mana_zone: self.mana_zone.clone(),
            magic_mastery: self.magic_mastery.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Character, CharacterFields, CHARACTER_TEXT_MAX_CHARS};
    use crate::model::validation::ValidationError;

    #[test]
    fn defaults_match_placeholder_values() {
        let fields = CharacterFields::default();
        assert_eq!(fields.last_name, "Doe");
        assert_eq!(fields.name, "John");
        assert_eq!(fields.age, 20);
        assert_eq!(fields.social_class, "Plébien");
        assert_eq!(fields.strength, "E");
        assert_eq!(fields.smith_rank, "/");
        assert_eq!(fields.mana_reserve, "Très faible");
        assert!(fields.validate().is_ok());
    }

    #[test]
    fn apply_fields_keeps_identity() {
        let mut character = Character::new(CharacterFields::default(), 1_000);
        let id = character.id;

        let mut fields = CharacterFields::default();
        fields.name = "Aria".to_string();
        fields.age = 17;
        character.apply_fields(fields.clone());

        assert_eq!(character.id, id);
        assert_eq!(character.date_created, 1_000);
        assert_eq!(character.fields(), fields);
    }

    #[test]
    fn validate_rejects_oversized_short_field() {
        let fields = CharacterFields {
            talent: "x".repeat(CHARACTER_TEXT_MAX_CHARS + 1),
            ..CharacterFields::default()
        };
        assert!(matches!(
            fields.validate(),
            Err(ValidationError::FieldTooLong {
                field: "talent",
                ..
            })
        ));
    }

    #[test]
    fn magic_mastery_allows_long_form_text() {
        let fields = CharacterFields {
            magic_mastery: "m".repeat(1_500),
            ..CharacterFields::default()
        };
        assert!(fields.validate().is_ok());
    }
}
