use charsheet_core::db::SCHEMA_VERSION;
use charsheet_core::db::open_db_in_memory;
use charsheet_core::{
    CharacterFields, CharacterRepository, EntityKind, ErrorClass, RepoError,
    SqliteCharacterRepository, ValidationError,
};
use rusqlite::{params, Connection};
use uuid::Uuid;

fn aria() -> CharacterFields {
    CharacterFields {
        last_name: "Valen".to_string(),
        name: "Aria".to_string(),
        age: 17,
        race: "Elfe".to_string(),
        social_class: "Noble".to_string(),
        talent: "Arcane".to_string(),
        adventurer_rank: "C".to_string(),
        strength: "D".to_string(),
        speed: "B".to_string(),
        resistance: "E".to_string(),
        sword_style: "Rapière".to_string(),
        smith_rank: "/".to_string(),
        alchemy_rank: "Apprentie".to_string(),
        mana_reserve: "Élevée".to_string(),
        mana_zone: "Cœur".to_string(),
        magic_mastery: "Feu, vent et une longue liste de sorts mineurs.".to_string(),
    }
}

#[test]
fn create_and_get_roundtrip() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteCharacterRepository::try_new(&conn).unwrap();

    let created = repo.create(aria()).unwrap();
    assert!(created.date_created > 0);

    let loaded = repo.get(created.id).unwrap();
    assert_eq!(loaded, created);
    assert_eq!(loaded.fields(), aria());
    assert_eq!(loaded.age, 17);
}

#[test]
fn default_fields_persist_placeholders() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteCharacterRepository::try_new(&conn).unwrap();

    let created = repo.create(CharacterFields::default()).unwrap();
    let loaded = repo.get(created.id).unwrap();
    assert_eq!(loaded.last_name, "Doe");
    assert_eq!(loaded.name, "John");
    assert_eq!(loaded.age, 20);
    assert_eq!(loaded.mana_reserve, "Très faible");
}

#[test]
fn get_missing_returns_not_found() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteCharacterRepository::try_new(&conn).unwrap();

    let missing = Uuid::new_v4();
    let err = repo.get(missing).unwrap_err();
    assert!(matches!(
        err,
        RepoError::NotFound { kind: EntityKind::Character, id } if id == missing
    ));
    assert_eq!(err.class(), ErrorClass::NotFound);
}

#[test]
fn update_overwrites_fields_in_place() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteCharacterRepository::try_new(&conn).unwrap();
    let created = repo.create(aria()).unwrap();

    let mut changed = aria();
    changed.age = 18;
    changed.adventurer_rank = "B".to_string();
    let updated = repo.update(created.id, changed.clone()).unwrap();

    assert_eq!(updated.id, created.id);
    assert_eq!(updated.date_created, created.date_created);
    assert_eq!(updated.fields(), changed);
    assert_eq!(repo.get(created.id).unwrap(), updated);
}

#[test]
fn update_missing_returns_not_found() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteCharacterRepository::try_new(&conn).unwrap();

    let err = repo.update(Uuid::new_v4(), aria()).unwrap_err();
    assert!(matches!(err, RepoError::NotFound { .. }));
}

#[test]
fn rejected_update_leaves_row_unchanged() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteCharacterRepository::try_new(&conn).unwrap();
    let created = repo.create(aria()).unwrap();

    let mut oversized = aria();
    oversized.name = "Aria the Renamed".to_string();
    oversized.race = "x".repeat(201);
    let err = repo.update(created.id, oversized).unwrap_err();

    assert!(matches!(
        err,
        RepoError::Validation(ValidationError::FieldTooLong { field: "race", .. })
    ));
    assert_eq!(repo.get(created.id).unwrap(), created);
}

#[test]
fn rejected_create_persists_nothing() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteCharacterRepository::try_new(&conn).unwrap();

    let mut oversized = aria();
    oversized.magic_mastery = "m".repeat(2_001);
    assert!(repo.create(oversized).is_err());
    assert!(repo.list_all().unwrap().is_empty());
}

#[test]
fn failed_write_is_rolled_back() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteCharacterRepository::try_new(&conn).unwrap();
    let kept = repo.create(aria()).unwrap();

    conn.execute_batch(
        "CREATE TRIGGER reject_inserts BEFORE INSERT ON characters
         BEGIN SELECT RAISE(ABORT, 'storage fault'); END;",
    )
    .unwrap();

    let err = repo.create(aria()).unwrap_err();
    assert_eq!(err.class(), ErrorClass::Persistence);
    assert!(err.to_string().contains("storage fault"));
    assert!(conn.is_autocommit(), "no transaction may stay open");

    let listed = repo.list_all().unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].id, kept.id);
}

#[test]
fn list_all_orders_newest_first() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteCharacterRepository::try_new(&conn).unwrap();

    let first = repo.create(aria()).unwrap();
    let second = repo.create(CharacterFields::default()).unwrap();
    let third = repo.create(aria()).unwrap();

    let ids: Vec<_> = repo.list_all().unwrap().into_iter().map(|c| c.id).collect();
    assert_eq!(ids, vec![third.id, second.id, first.id]);
}

#[test]
fn list_all_follows_date_created_over_insert_order() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteCharacterRepository::try_new(&conn).unwrap();

    let older = repo.create(aria()).unwrap();
    let newer = repo.create(aria()).unwrap();
    set_date_created(&conn, older.id, 2_000);
    set_date_created(&conn, newer.id, 1_000);

    let ids: Vec<_> = repo.list_all().unwrap().into_iter().map(|c| c.id).collect();
    assert_eq!(ids, vec![older.id, newer.id]);
}

#[test]
fn repository_rejects_uninitialized_connection() {
    let conn = Connection::open_in_memory().unwrap();

    match SqliteCharacterRepository::try_new(&conn) {
        Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version: 0,
        }) => assert!(expected_version > 0),
        Err(other) => panic!("unexpected error: {other}"),
        Ok(_) => panic!("expected uninitialized connection error"),
    }
}

#[test]
fn repository_rejects_connection_missing_required_column() {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch(
        "CREATE TABLE characters (
            id TEXT PRIMARY KEY NOT NULL,
            name TEXT NOT NULL
        );",
    )
    .unwrap();
    conn.execute_batch(&format!("PRAGMA user_version = {SCHEMA_VERSION};"))
        .unwrap();

    assert!(matches!(
        SqliteCharacterRepository::try_new(&conn),
        Err(RepoError::MissingRequiredColumn {
            table: "characters",
            column: "last_name"
        })
    ));
}

fn set_date_created(conn: &Connection, id: Uuid, value: i64) {
    conn.execute_batch("DROP TRIGGER IF EXISTS characters_date_created_immutable;")
        .unwrap();
    conn.execute(
        "UPDATE characters SET date_created = ?2 WHERE id = ?1;",
        params![id.to_string(), value],
    )
    .unwrap();
}
