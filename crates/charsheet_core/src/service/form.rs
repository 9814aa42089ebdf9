//! Request validation layer.
//!
//! Turns raw form submissions (string key/value pairs) into typed field sets.
//!
//! # Invariants
//! - Every required key must be present; nothing is defaulted here.
//! - Values are trimmed of surrounding whitespace.
//! - `age` is parsed before any other value is accepted, so an invalid age
//!   never reaches a repository.

use crate::model::character::CharacterFields;
use crate::model::entry::{EntryFields, EntryKind};
use crate::model::validation::ValidationError;
use std::collections::HashMap;

/// Raw submitted form values keyed by field name.
pub type RawForm = HashMap<String, String>;

/// Keys a character form must carry.
pub const CHARACTER_FORM_KEYS: [&str; 16] = [
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
];

/// Parses and validates a character create/update submission.
pub fn parse_character_form(form: &RawForm) -> Result<CharacterFields, ValidationError> {
    let age = parse_age(required(form, "age")?)?;

    let fields = CharacterFields {
        last_name: trimmed(form, "last_name")?,
        name: trimmed(form, "name")?,
        age,
        race: trimmed(form, "race")?,
        social_class: trimmed(form, "social_class")?,
        talent: trimmed(form, "talent")?,
        adventurer_rank: trimmed(form, "adventurer_rank")?,
        strength: trimmed(form, "strength")?,
        speed: trimmed(form, "speed")?,
        resistance: trimmed(form, "resistance")?,
        sword_style: trimmed(form, "sword_style")?,
        smith_rank: trimmed(form, "smith_rank")?,
        alchemy_rank: trimmed(form, "alchemy_rank")?,
        mana_reserve: trimmed(form, "mana_reserve")?,
        mana_zone: trimmed(form, "mana_zone")?,
        magic_mastery: trimmed(form, "magic_mastery")?,
    };
    fields.validate()?;
    Ok(fields)
}

/// Parses and validates a skill or item create/update submission.
pub fn parse_entry_form<K: EntryKind>(form: &RawForm) -> Result<EntryFields, ValidationError> {
    let fields = EntryFields::new(trimmed(form, "name")?, trimmed(form, "content")?);
    fields.validate::<K>()?;
    Ok(fields)
}

/// Parses a base-10 integer age, tolerating surrounding whitespace.
pub fn parse_age(raw: &str) -> Result<i64, ValidationError> {
    raw.trim()
        .parse::<i64>()
        .map_err(|_| ValidationError::InvalidAge(raw.to_string()))
}

fn required<'a>(form: &'a RawForm, key: &'static str) -> Result<&'a str, ValidationError> {
    form.get(key)
        .map(String::as_str)
        .ok_or(ValidationError::MissingField(key))
}

fn trimmed(form: &RawForm, key: &'static str) -> Result<String, ValidationError> {
    required(form, key).map(|value| value.trim().to_string())
}
