use charsheet_core::db::open_db_in_memory;
use charsheet_core::{
    CharacterFields, CharacterRepository, EntityKind, EntryFields, EntryRepository, ErrorClass,
    RepoError, SqliteCharacterRepository, SqliteItemRepository, SqliteSkillRepository,
};
use rusqlite::Connection;
use uuid::Uuid;

fn count(conn: &Connection, table: &str) -> i64 {
    conn.query_row(&format!("SELECT COUNT(*) FROM {table};"), [], |row| row.get(0))
        .unwrap()
}

#[test]
fn delete_cascades_to_skills_and_items() {
    let conn = open_db_in_memory().unwrap();
    let characters = SqliteCharacterRepository::try_new(&conn).unwrap();
    let skills = SqliteSkillRepository::try_new(&conn).unwrap();
    let items = SqliteItemRepository::try_new(&conn).unwrap();

    let c1 = characters.create(CharacterFields::default()).unwrap();
    let c2 = characters.create(CharacterFields::default()).unwrap();
    skills
        .create(c1.id, EntryFields::new("Fireball", "..."))
        .unwrap();
    skills.create(c1.id, EntryFields::new("Heal", "...")).unwrap();
    items.create(c1.id, EntryFields::new("Rope", "...")).unwrap();
    let other_skill = skills.create(c2.id, EntryFields::new("Dash", "...")).unwrap();

    let deleted = characters.delete(c1.id).unwrap();
    assert_eq!(deleted.character, c1);
    assert_eq!(deleted.skills_deleted, 2);
    assert_eq!(deleted.items_deleted, 1);

    let err = characters.get(c1.id).unwrap_err();
    assert_eq!(err.class(), ErrorClass::NotFound);
    assert!(matches!(
        skills.list_for_character(c1.id),
        Err(RepoError::NotFound {
            kind: EntityKind::Character,
            ..
        })
    ));

    let orphans: i64 = conn
        .query_row(
            "SELECT
                (SELECT COUNT(*) FROM skills WHERE character_id = ?1)
              + (SELECT COUNT(*) FROM items WHERE character_id = ?1);",
            [c1.id.to_string()],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(orphans, 0);

    assert_eq!(skills.list_for_character(c2.id).unwrap(), vec![other_skill]);
    assert_eq!(characters.list_all().unwrap(), vec![c2]);
}

#[test]
fn delete_without_children_succeeds() {
    let conn = open_db_in_memory().unwrap();
    let characters = SqliteCharacterRepository::try_new(&conn).unwrap();
    let lonely = characters.create(CharacterFields::default()).unwrap();

    let deleted = characters.delete(lonely.id).unwrap();
    assert_eq!(deleted.skills_deleted, 0);
    assert_eq!(deleted.items_deleted, 0);
    assert!(characters.list_all().unwrap().is_empty());
}

#[test]
fn delete_missing_character_returns_not_found() {
    let conn = open_db_in_memory().unwrap();
    let characters = SqliteCharacterRepository::try_new(&conn).unwrap();

    let err = characters.delete(Uuid::new_v4()).unwrap_err();
    assert!(matches!(err, RepoError::NotFound { .. }));
}

#[test]
fn failed_cascade_applies_nothing() {
    let conn = open_db_in_memory().unwrap();
    let characters = SqliteCharacterRepository::try_new(&conn).unwrap();
    let skills = SqliteSkillRepository::try_new(&conn).unwrap();
    let items = SqliteItemRepository::try_new(&conn).unwrap();

    let doomed = characters.create(CharacterFields::default()).unwrap();
    skills.create(doomed.id, EntryFields::default()).unwrap();
    items.create(doomed.id, EntryFields::default()).unwrap();

    // Fails the last step, after skills and items were already deleted.
    conn.execute_batch(
        "CREATE TRIGGER block_character_delete BEFORE DELETE ON characters
         BEGIN SELECT RAISE(ABORT, 'delete blocked'); END;",
    )
    .unwrap();

    let err = characters.delete(doomed.id).unwrap_err();
    assert_eq!(err.class(), ErrorClass::Persistence);

    assert_eq!(count(&conn, "characters"), 1);
    assert_eq!(count(&conn, "skills"), 1);
    assert_eq!(count(&conn, "items"), 1);
    assert_eq!(characters.get(doomed.id).unwrap(), doomed);
}
