//! Character use-case service.
//!
//! # Responsibility
//! - Accept raw form submissions for create/update and run them through the
//!   validation layer.
//! - Delegate persistence to a `CharacterRepository`.
//!
//! # Invariants
//! - Nothing reaches the repository unless the whole form validated.

use crate::model::character::{Character, CharacterFields, CharacterId};
use crate::repo::character_repo::{CharacterRepository, DeletedCharacter};
use crate::repo::RepoResult;
use crate::service::form::{parse_character_form, RawForm};
use log::warn;

/// Use-case service wrapper for character operations.
pub struct CharacterService<R: CharacterRepository> {
    repo: R,
}

impl<R: CharacterRepository> CharacterService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub fn list_all(&self) -> RepoResult<Vec<Character>> {
        self.repo.list_all()
    }

    /// Creates a character from a typed field set, bypassing the form path.
    ///
    /// Use `CharacterFields::default()` to start from placeholder values.
    pub fn create(&self, fields: CharacterFields) -> RepoResult<Character> {
        self.repo.create(fields)
    }

    /// Creates a character from a raw form submission.
    pub fn create_from_form(&self, form: &RawForm) -> RepoResult<Character> {
        let fields = parse_character_form(form).inspect_err(|err| {
            warn!("event=character_create module=service status=rejected error={err}")
        })?;
        self.repo.create(fields)
    }

    pub fn get(&self, id: CharacterId) -> RepoResult<Character> {
        self.repo.get(id)
    }

    pub fn update(&self, id: CharacterId, fields: CharacterFields) -> RepoResult<Character> {
        self.repo.update(id, fields)
    }

    /// Overwrites every field of `id` from a raw form submission.
    ///
    /// The stored character is left untouched when the form is rejected.
    pub fn update_from_form(&self, id: CharacterId, form: &RawForm) -> RepoResult<Character> {
        let fields = parse_character_form(form).inspect_err(|err| {
            warn!("event=character_update module=service status=rejected id={id} error={err}")
        })?;
        self.repo.update(id, fields)
    }

    pub fn delete(&self, id: CharacterId) -> RepoResult<DeletedCharacter> {
        self.repo.delete(id)
    }
}
