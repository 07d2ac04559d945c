//! SQLite schema creation.

use std::path::Path;

use rusqlite::Connection;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("Unsupported schema: expected version {expected}, found {found}")]
    VersionMismatch { expected: i32, found: i32 },
}

/// Current schema version. There are no migrations: a database written by a
/// newer version is refused.
pub const CURRENT_VERSION: i32 = 1;

/// Tables holding shelter entities, in creation order.
pub const ENTITY_TABLES: &[&str] = &[
    "animal",
    "dog",
    "cat",
    "state",
    "food",
    "bowl",
    "care",
    "caresheet",
    "foodhabit",
    "location",
    "sheet",
    "box",
];

/// Create all tables if they don't exist.
///
/// Idempotent: safe to call on an existing database.
pub fn create_schema(conn: &Connection) -> Result<(), SchemaError> {
    conn.execute_batch(SCHEMA_SQL)?;
    if get_schema_version(conn)? == 0 {
        set_schema_version(conn, CURRENT_VERSION)?;
    }
    Ok(())
}

/// Open a shelter database, creating the file and schema if it is absent.
pub fn open_database(path: &Path) -> Result<Connection, SchemaError> {
    let existed = path.is_file();
    if !existed {
        log::info!(
            "Database {} doesn't exist, creating a new one",
            path.display()
        );
    }

    let conn = Connection::open(path)?;
    conn.execute_batch("PRAGMA journal_mode=WAL;")?;

    let version = get_schema_version(&conn)?;
    if version == 0 {
        create_schema(&conn)?;
    } else if version > CURRENT_VERSION {
        return Err(SchemaError::VersionMismatch {
            expected: CURRENT_VERSION,
            found: version,
        });
    }

    Ok(conn)
}

/// Open an in-memory database with the full schema. Useful for testing.
pub fn open_memory() -> Result<Connection, SchemaError> {
    let conn = Connection::open_in_memory()?;
    create_schema(&conn)?;
    Ok(conn)
}

/// Get the current schema version, or 0 if no schema exists.
pub fn get_schema_version(conn: &Connection) -> Result<i32, SchemaError> {
    let exists: bool = conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type='table' AND name='schema_version')",
        [],
        |row| row.get(0),
    )?;

    if !exists {
        return Ok(0);
    }

    let version: i32 = conn.query_row(
        "SELECT COALESCE(MAX(version), 0) FROM schema_version",
        [],
        |row| row.get(0),
    )?;
    Ok(version)
}

fn set_schema_version(conn: &Connection, version: i32) -> Result<(), SchemaError> {
    conn.execute(
        "INSERT INTO schema_version (version) VALUES (?1)",
        [version],
    )?;
    Ok(())
}

// Relations are plain integers with -1 for "unset", so no REFERENCES clauses:
// a sheet may name an animal that was never saved.
const SCHEMA_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS schema_version (
    version INTEGER NOT NULL,
    applied_at TEXT NOT NULL DEFAULT (datetime('now'))
);

-- Fields shared by every animal
CREATE TABLE IF NOT EXISTS animal (
    id INTEGER NOT NULL PRIMARY KEY,
    name TEXT,
    birth_date TEXT,
    arrival_date TEXT,
    arrival_sheet_id INTEGER,
    latest_sheet_id INTEGER,
    gender INTEGER,
    breed TEXT,
    character TEXT,
    color TEXT,
    pictures TEXT,
    implant TEXT,
    neutered INTEGER,
    history TEXT,
    food_habit_id INTEGER
);

-- Species rows, keyed by animal.id
CREATE TABLE IF NOT EXISTS dog (
    id INTEGER NOT NULL PRIMARY KEY,
    animal_id INTEGER,
    ok_cats INTEGER,
    category INTEGER
);
CREATE INDEX IF NOT EXISTS idx_dog_animal ON dog(animal_id);

CREATE TABLE IF NOT EXISTS cat (
    id INTEGER NOT NULL PRIMARY KEY,
    animal_id INTEGER,
    has_fiv INTEGER,
    has_felv INTEGER
);
CREATE INDEX IF NOT EXISTS idx_cat_animal ON cat(animal_id);

-- Label tables
CREATE TABLE IF NOT EXISTS state (
    id INTEGER NOT NULL PRIMARY KEY,
    label TEXT,
    description TEXT
);

CREATE TABLE IF NOT EXISTS food (
    id INTEGER NOT NULL PRIMARY KEY,
    label TEXT,
    description TEXT
);

CREATE TABLE IF NOT EXISTS bowl (
    id INTEGER NOT NULL PRIMARY KEY,
    label TEXT,
    description TEXT
);

-- Cares and their administration
CREATE TABLE IF NOT EXISTS care (
    id INTEGER NOT NULL PRIMARY KEY,
    type TEXT,
    dose TEXT,
    way TEXT,
    medecine_name TEXT,
    description TEXT
);

CREATE TABLE IF NOT EXISTS caresheet (
    id INTEGER NOT NULL PRIMARY KEY,
    animal_id INTEGER,
    care_id INTEGER,
    date TEXT,
    time TEXT,
    frequency TEXT,
    given_by INTEGER,
    prescription_number TEXT,
    dosage TEXT
);
CREATE INDEX IF NOT EXISTS idx_caresheet_animal ON caresheet(animal_id);

CREATE TABLE IF NOT EXISTS foodhabit (
    id INTEGER NOT NULL PRIMARY KEY,
    food_id INTEGER,
    bowl_id INTEGER
);

-- Whereabouts
CREATE TABLE IF NOT EXISTS location (
    id INTEGER NOT NULL PRIMARY KEY,
    location_type INTEGER,
    box_id INTEGER,
    person_id INTEGER
);

CREATE TABLE IF NOT EXISTS sheet (
    id INTEGER NOT NULL PRIMARY KEY,
    date TEXT,
    animal_id INTEGER,
    state_id INTEGER,
    location_id INTEGER
);
CREATE INDEX IF NOT EXISTS idx_sheet_animal ON sheet(animal_id);

CREATE TABLE IF NOT EXISTS box (
    id INTEGER NOT NULL PRIMARY KEY,
    label TEXT,
    description TEXT,
    surface_area INTEGER,
    position TEXT,
    condition TEXT,
    particularity TEXT
);

-- Plugins
CREATE TABLE IF NOT EXISTS plugin (
    name TEXT PRIMARY KEY,
    type INTEGER NOT NULL,
    registered_at TEXT NOT NULL DEFAULT (datetime('now'))
);

CREATE TABLE IF NOT EXISTS plugin_config (
    plugin TEXT NOT NULL,
    key TEXT NOT NULL,
    value TEXT,
    PRIMARY KEY (plugin, key)
);
"#;
