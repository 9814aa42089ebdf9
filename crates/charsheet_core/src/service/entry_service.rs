//! Skill/item use-case service.
//!
//! # Responsibility
//! - Accept raw form submissions for skills and items.
//! - Delegate owner-scoped persistence to an `EntryRepository`.

use crate::model::character::CharacterId;
use crate::model::entry::{Entry, EntryFields, EntryId, EntryKind};
use crate::repo::entry_repo::EntryRepository;
use crate::repo::RepoResult;
use crate::service::form::{parse_entry_form, RawForm};
use log::warn;
use std::marker::PhantomData;

/// Use-case service wrapper for entries of kind `K`.
pub struct EntryService<K: EntryKind, R: EntryRepository<K>> {
    repo: R,
    kind: PhantomData<K>,
}

impl<K: EntryKind, R: EntryRepository<K>> EntryService<K, R> {
    pub fn new(repo: R) -> Self {
        Self {
            repo,
            kind: PhantomData,
        }
    }

    pub fn list_for_character(&self, character_id: CharacterId) -> RepoResult<Vec<Entry<K>>> {
        self.repo.list_for_character(character_id)
    }

    pub fn create(&self, character_id: CharacterId, fields: EntryFields) -> RepoResult<Entry<K>> {
        self.repo.create(character_id, fields)
    }

    pub fn create_from_form(
        &self,
        character_id: CharacterId,
        form: &RawForm,
    ) -> RepoResult<Entry<K>> {
        let fields = parse_entry_form::<K>(form).inspect_err(|err| {
            warn!(
                "event={}_create module=service status=rejected character_id={} error={}",
                K::ENTITY,
                character_id,
                err
            )
        })?;
        self.repo.create(character_id, fields)
    }

    pub fn update(&self, entry_id: EntryId, fields: EntryFields) -> RepoResult<Entry<K>> {
        self.repo.update(entry_id, fields)
    }

    pub fn update_from_form(&self, entry_id: EntryId, form: &RawForm) -> RepoResult<Entry<K>> {
        let fields = parse_entry_form::<K>(form).inspect_err(|err| {
            warn!(
                "event={}_update module=service status=rejected id={} error={}",
                K::ENTITY,
                entry_id,
                err
            )
        })?;
        self.repo.update(entry_id, fields)
    }

    pub fn delete(&self, entry_id: EntryId) -> RepoResult<Entry<K>> {
        self.repo.delete(entry_id)
    }

    pub fn get(&self, entry_id: EntryId) -> RepoResult<Entry<K>> {
        self.repo.get(entry_id)
    }

    pub fn get_scoped(&self, character_id: CharacterId, entry_id: EntryId) -> RepoResult<Entry<K>> {
        self.repo.get_scoped(character_id, entry_id)
    }
}
