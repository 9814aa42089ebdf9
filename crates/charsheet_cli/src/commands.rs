//! Request handling: raw command input in, core calls, rendered output.
//!
//! Every failure is mapped to an HTTP-style status so scripts can branch on
//! the error class: validation 400, not-found 404, ownership mismatch 409,
//! storage 500.

use crate::cli::{Command, EntryAction, FormArgs};
use crate::output;
use charsheet_core::{
    CharacterId, CharacterService, DbError, EntryKind, EntryService, ErrorClass, ItemKind, RawForm,
    RepoError, SkillKind, SqliteCharacterRepository, SqliteEntryRepository, Store,
};
use std::fmt::{Display, Formatter};

/// Failure surfaced to the terminal.
#[derive(Debug)]
pub enum CliError {
    /// An id argument is not a valid UUID.
    BadId(String),
    Repo(RepoError),
    Store(DbError),
    Output(String),
}

impl CliError {
    pub fn status(&self) -> u16 {
        match self {
            Self::BadId(_) => 400,
            Self::Repo(err) => status_for(err.class()),
            Self::Store(_) | Self::Output(_) => 500,
        }
    }
}

impl Display for CliError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BadId(raw) => write!(f, "invalid id `{raw}`"),
            Self::Repo(err) => write!(f, "{err}"),
            Self::Store(err) => write!(f, "store unavailable: {err}"),
            Self::Output(message) => write!(f, "output failed: {message}"),
        }
    }
}

impl std::error::Error for CliError {}

impl From<RepoError> for CliError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

impl From<DbError> for CliError {
    fn from(value: DbError) -> Self {
        Self::Store(value)
    }
}

pub fn status_for(class: ErrorClass) -> u16 {
    match class {
        ErrorClass::Validation => 400,
        ErrorClass::NotFound => 404,
        ErrorClass::Consistency => 409,
        ErrorClass::Persistence => 500,
    }
}

/// Runs one command against an open store.
pub fn run(store: &Store, command: Command, json: bool) -> Result<(), CliError> {
    let conn = store.connection();
    let characters = CharacterService::new(SqliteCharacterRepository::try_new(conn)?);

    match command {
        Command::List => {
            let all = characters.list_all()?;
            if json {
                output::print_json(&all).map_err(CliError::Output)?;
            } else {
                println!("{}", output::character_table(&all));
            }
        }
        Command::Show { id } => {
            let character = characters.get(parse_id(&id)?)?;
            if json {
                output::print_json(&character).map_err(CliError::Output)?;
            } else {
                println!("{}", output::character_sheet(&character));
            }
        }
        Command::Create { form } => {
            let created = characters.create_from_form(&raw_form(form))?;
            report(json, &created, format!("Character created: {}", created.id))?;
        }
        Command::Update { id, form } => {
            let updated = characters.update_from_form(parse_id(&id)?, &raw_form(form))?;
            report(json, &updated, format!("Character updated: {}", updated.id))?;
        }
        Command::Delete { id } => {
            let deleted = characters.delete(parse_id(&id)?)?;
            report(
                json,
                &deleted.character,
                format!(
                    "Character deleted: {} ({} skill(s), {} item(s))",
                    deleted.character.id, deleted.skills_deleted, deleted.items_deleted
                ),
            )?;
        }
        Command::Skills { action } => run_entry_action::<SkillKind>(store, action, json)?,
        Command::Items { action } => run_entry_action::<ItemKind>(store, action, json)?,
    }
    Ok(())
}

fn run_entry_action<K: EntryKind>(
    store: &Store,
    action: EntryAction,
    json: bool,
) -> Result<(), CliError> {
    let service: EntryService<K, _> =
        EntryService::new(SqliteEntryRepository::<K>::try_new(store.connection())?);
    let label = K::ENTITY;

    match action {
        EntryAction::List { character } => {
            let entries = service.list_for_character(parse_id(&character)?)?;
            if json {
                output::print_json(&entries).map_err(CliError::Output)?;
            } else {
                println!("{}", output::entry_table(&entries));
            }
        }
        EntryAction::Show { character, entry } => {
            let found = service.get_scoped(parse_id(&character)?, parse_id(&entry)?)?;
            if json {
                output::print_json(&found).map_err(CliError::Output)?;
            } else {
                println!("{}", output::entry_table(std::slice::from_ref(&found)));
            }
        }
        EntryAction::Add { character, form } => {
            let created = service.create_from_form(parse_id(&character)?, &raw_form(form))?;
            report(json, &created, format!("{label} created: {}", created.id))?;
        }
        EntryAction::Edit { entry, form } => {
            let updated = service.update_from_form(parse_id(&entry)?, &raw_form(form))?;
            report(json, &updated, format!("{label} updated: {}", updated.id))?;
        }
        EntryAction::Remove { entry } => {
            let removed = service.delete(parse_id(&entry)?)?;
            report(json, &removed, format!("{label} deleted: {}", removed.id))?;
        }
    }
    Ok(())
}

fn report<T: serde::Serialize>(json: bool, value: &T, message: String) -> Result<(), CliError> {
    if json {
        output::print_json(value).map_err(CliError::Output)
    } else {
        println!("{message}");
        Ok(())
    }
}

/// Parses a character or entry id given on the command line.
fn parse_id(raw: &str) -> Result<CharacterId, CliError> {
    CharacterId::parse_str(raw.trim()).map_err(|_| CliError::BadId(raw.to_string()))
}

/// Later occurrences of a key win, like a resubmitted form field.
fn raw_form(args: FormArgs) -> RawForm {
    args.fields.into_iter().collect()
}
