use ossaca_db::schema::{create_schema, get_schema_version, ENTITY_TABLES};
use ossaca_db::*;
use ossaca_model::State;

#[test]
fn create_schema_in_memory() {
    let conn = open_memory().unwrap();
    assert_eq!(get_schema_version(&conn).unwrap(), CURRENT_VERSION);
}

#[test]
fn schema_is_idempotent() {
    let conn = open_memory().unwrap();
    create_schema(&conn).unwrap();
    let rows: i64 = conn
        .query_row("SELECT COUNT(*) FROM schema_version", [], |row| row.get(0))
        .unwrap();
    assert_eq!(rows, 1);
}

#[test]
fn all_tables_exist() {
    let conn = open_memory().unwrap();
    let tables = ENTITY_TABLES
        .iter()
        .copied()
        .chain(["schema_version", "plugin", "plugin_config"]);
    for table in tables {
        let exists: bool = conn
            .query_row(
                "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type='table' AND name=?1)",
                [table],
                |row| row.get(0),
            )
            .unwrap();
        assert!(exists, "Table {table} should exist");
    }
}

#[test]
fn connect_creates_missing_database() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("shelter.sqlite");
    assert!(!path.exists());

    let storage = Storage::connect(&path).unwrap();
    assert!(path.exists());
    assert_eq!(storage.count_rows("animal").unwrap(), 0);
    storage.close().unwrap();
}

#[test]
fn connect_reopens_existing_database() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("shelter.sqlite");

    let storage = Storage::connect(&path).unwrap();
    storage.add(&mut State::new("Adopted", "")).unwrap();
    storage.close().unwrap();

    let storage = Storage::connect(&path).unwrap();
    let states = storage.states().unwrap();
    assert_eq!(states.len(), 1);
    assert_eq!(states[0].label, "Adopted");
}

#[test]
fn newer_schema_is_refused() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("shelter.sqlite");

    let storage = Storage::connect(&path).unwrap();
    storage
        .connection()
        .execute("INSERT INTO schema_version (version) VALUES (99)", [])
        .unwrap();
    drop(storage);

    match Storage::connect(&path) {
        Err(SchemaError::VersionMismatch { expected, found }) => {
            assert_eq!(expected, CURRENT_VERSION);
            assert_eq!(found, 99);
        }
        other => panic!("expected a version mismatch, got {:?}", other.map(|_| ())),
    }
}

#[test]
fn count_rows_rejects_unknown_tables() {
    let storage = Storage::open_memory().unwrap();
    assert!(matches!(
        storage.count_rows("sqlite_master; DROP TABLE animal"),
        Err(OperationError::UnknownTable(_))
    ));
}
