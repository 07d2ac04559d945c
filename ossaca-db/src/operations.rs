//! Add, update and delete for every entity type.
//!
//! Each entity describes the rows it is stored as through [`Persist`]; the
//! dispatcher on [`Storage`] turns that layout into statements. Animals with
//! a species are written as a generic `animal` row plus a `dog`/`cat` row
//! whose `animal_id` holds the generic row's id. The two writes are separate
//! statements, not one transaction.

use rusqlite::params_from_iter;
use rusqlite::types::Value;
use thiserror::Error;

use ossaca_model::*;

use crate::mapper::{self, Mapped, Params, ANIMAL_TABLE, SPECIES_FOREIGN_KEY};

const SHEET_POINTER_COLUMNS: [&str; 2] = ["arrival_sheet_id", "latest_sheet_id"];
use crate::schema::SchemaError;
use crate::storage::Storage;

#[derive(Debug, Error)]
pub enum OperationError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("Schema error: {0}")]
    Schema(#[from] SchemaError),
    #[error("Can't {action} {entity} with id {id}: it was never persisted")]
    InvalidOperation {
        action: &'static str,
        entity: &'static str,
        id: Id,
    },
    #[error("Entity not found: {entity_type} with id '{id}'")]
    NotFound { entity_type: String, id: Id },
    #[error("Unknown table: {0}")]
    UnknownTable(String),
}

// ── Layout ──────────────────────────────────────────────────────────────────

/// Values for one table.
#[derive(Debug, Clone)]
pub struct TableWrite {
    pub table: &'static str,
    pub params: Params,
}

/// Row in a child table, located by a column holding the primary row's id.
#[derive(Debug, Clone)]
pub struct ChildWrite {
    pub foreign_key: &'static str,
    pub write: TableWrite,
}

/// Every row an entity is stored as. The primary row owns the entity id.
#[derive(Debug, Clone)]
pub struct Layout {
    pub primary: TableWrite,
    pub child: Option<ChildWrite>,
}

impl Layout {
    fn single<T: Mapped>(entity: &T) -> Self {
        Self {
            primary: TableWrite {
                table: T::TABLE,
                params: entity.to_params(),
            },
            child: None,
        }
    }
}

/// An entity the dispatcher can store.
pub trait Persist: Identified {
    /// Name used in log lines and errors.
    const ENTITY: &'static str;

    fn layout(&self) -> Layout;

    /// Rows rewritten by `update`. Defaults to the full layout.
    fn update_layout(&self) -> Layout {
        self.layout()
    }

    /// Runs once the new id has been assigned.
    fn after_insert(&mut self, _storage: &Storage) -> Result<(), OperationError> {
        Ok(())
    }
}

macro_rules! persist_single {
    ($($ty:ty => $name:literal),* $(,)?) => {
        $(
            impl Persist for $ty {
                const ENTITY: &'static str = $name;

                fn layout(&self) -> Layout {
                    Layout::single(self)
                }
            }
        )*
    };
}

persist_single!(
    State => "state",
    Food => "food",
    Bowl => "bowl",
    Care => "care",
    CareSheet => "care sheet",
    FoodHabit => "food habit",
    Location => "location",
    ShelterBox => "box",
);

impl Persist for Animal {
    const ENTITY: &'static str = "animal";

    fn layout(&self) -> Layout {
        Layout {
            primary: TableWrite {
                table: ANIMAL_TABLE,
                params: mapper::animal_params(self),
            },
            child: mapper::species_params(&self.species).map(|(table, params)| ChildWrite {
                foreign_key: SPECIES_FOREIGN_KEY,
                write: TableWrite { table, params },
            }),
        }
    }

    /// Sheet pointers are only ever moved by adding a sheet, so a stale copy
    /// of the animal can't roll them back.
    fn update_layout(&self) -> Layout {
        let mut layout = self.layout();
        layout
            .primary
            .params
            .retain(|(column, _)| !SHEET_POINTER_COLUMNS.contains(column));
        layout
    }
}

impl Persist for Sheet {
    const ENTITY: &'static str = "sheet";

    fn layout(&self) -> Layout {
        Layout::single(self)
    }

    /// A new sheet becomes the animal's latest one, and its arrival sheet if
    /// it had none.
    fn after_insert(&mut self, storage: &Storage) -> Result<(), OperationError> {
        let Some(animal_id) = self.animal.id() else {
            return Ok(());
        };
        let Some((arrival, latest)) = storage.record_new_sheet(animal_id, self.id)? else {
            return Ok(());
        };
        if let Some(animal) = self.animal.get_mut() {
            if animal.arrival_sheet.id() != Some(arrival) {
                animal.arrival_sheet = Link::from_id(arrival);
            }
            animal.latest_sheet = Link::from_id(latest);
        }
        Ok(())
    }
}

// ── SQL construction ────────────────────────────────────────────────────────

/// `INSERT INTO t (a, b) VALUES (?1, ?2)`
pub fn insert_sql(table: &str, params: &Params) -> String {
    let columns: Vec<&str> = params.iter().map(|(column, _)| *column).collect();
    let placeholders: Vec<String> = (1..=params.len()).map(|i| format!("?{i}")).collect();
    format!(
        "INSERT INTO {table} ({}) VALUES ({})",
        columns.join(", "),
        placeholders.join(", ")
    )
}

/// `UPDATE t SET a = ?1, b = ?2 WHERE key = ?3`
pub fn update_sql(table: &str, params: &Params, key: &str) -> String {
    let assignments: Vec<String> = params
        .iter()
        .enumerate()
        .map(|(i, (column, _))| format!("{column} = ?{}", i + 1))
        .collect();
    format!(
        "UPDATE {table} SET {} WHERE {key} = ?{}",
        assignments.join(", "),
        params.len() + 1
    )
}

fn values(params: &Params) -> impl Iterator<Item = &Value> {
    params.iter().map(|(_, value)| value)
}

fn ensure_persisted<E: Persist>(entity: &E, action: &'static str) -> Result<Id, OperationError> {
    let id = entity.id();
    if !is_persisted_id(id) {
        return Err(OperationError::InvalidOperation {
            action,
            entity: E::ENTITY,
            id,
        });
    }
    Ok(id)
}

fn not_found(entity_type: &str, id: Id) -> OperationError {
    OperationError::NotFound {
        entity_type: entity_type.to_string(),
        id,
    }
}

// ── Dispatcher ──────────────────────────────────────────────────────────────

impl Storage {
    /// Insert an entity and store the generated id on it.
    ///
    /// The entity's current id is ignored: adding the same instance twice
    /// creates two rows.
    pub fn add<E: Persist>(&self, entity: &mut E) -> Result<Id, OperationError> {
        let layout = entity.layout();

        let sql = insert_sql(layout.primary.table, &layout.primary.params);
        log::debug!("{sql}");
        self.connection()
            .execute(&sql, params_from_iter(values(&layout.primary.params)))?;
        let id = self.connection().last_insert_rowid();

        if let Some(child) = layout.child {
            let mut params = child.write.params;
            params.insert(0, (child.foreign_key, Value::Integer(id)));
            let sql = insert_sql(child.write.table, &params);
            log::debug!("{sql}");
            self.connection()
                .execute(&sql, params_from_iter(values(&params)))?;
        }

        entity.set_id(id);
        entity.after_insert(self)?;
        Ok(id)
    }

    /// Rewrite the rows of a persisted entity. Row counts never change.
    ///
    /// The species row is written first: an animal whose stored row belongs
    /// to another species is not found, and nothing is written.
    pub fn update<E: Persist>(&self, entity: &E) -> Result<(), OperationError> {
        let id = ensure_persisted(entity, "update")?;
        let layout = entity.update_layout();

        if let Some(child) = layout.child {
            let mut params = child.write.params;
            let sql = update_sql(child.write.table, &params, child.foreign_key);
            params.push((child.foreign_key, Value::Integer(id)));
            log::debug!("{sql}");
            let changed = self
                .connection()
                .execute(&sql, params_from_iter(values(&params)))?;
            if changed == 0 {
                return Err(not_found(child.write.table, id));
            }
        }

        let mut params = layout.primary.params;
        let sql = update_sql(layout.primary.table, &params, "id");
        params.push(("id", Value::Integer(id)));
        log::debug!("{sql}");
        let changed = self
            .connection()
            .execute(&sql, params_from_iter(values(&params)))?;
        if changed == 0 {
            return Err(not_found(E::ENTITY, id));
        }

        Ok(())
    }

    /// Remove the rows of a persisted entity, child row first. The instance
    /// goes back to the unset id so it can't be updated or deleted again.
    ///
    /// A missing species row is `NotFound` and leaves the generic row alone.
    pub fn delete<E: Persist>(&self, entity: &mut E) -> Result<(), OperationError> {
        let id = ensure_persisted(entity, "delete")?;
        let layout = entity.layout();

        if let Some(child) = layout.child {
            let sql = format!(
                "DELETE FROM {} WHERE {} = ?1",
                child.write.table, child.foreign_key
            );
            log::debug!("{sql}");
            if self.connection().execute(&sql, [id])? == 0 {
                return Err(not_found(child.write.table, id));
            }
        }

        let sql = format!("DELETE FROM {} WHERE id = ?1", layout.primary.table);
        log::debug!("{sql}");
        let removed = self.connection().execute(&sql, [id])?;
        if removed == 0 {
            log::debug!("No {} row with id {id} to delete", E::ENTITY);
        }

        entity.set_id(UNSET_ID);
        Ok(())
    }

    /// Point an animal at a newly added sheet: always as its latest sheet,
    /// and as its arrival sheet when it has none yet.
    ///
    /// Returns the animal's resulting (arrival, latest) sheet ids, or `None`
    /// if no such animal row exists.
    pub fn record_new_sheet(
        &self,
        animal_id: Id,
        sheet_id: Id,
    ) -> Result<Option<(Id, Id)>, OperationError> {
        let changed = self.connection().execute(
            "UPDATE animal SET
                 arrival_sheet_id = CASE
                     WHEN arrival_sheet_id IS NULL OR arrival_sheet_id < 1 THEN ?1
                     ELSE arrival_sheet_id
                 END,
                 latest_sheet_id = ?1
             WHERE id = ?2",
            [sheet_id, animal_id],
        )?;
        if changed == 0 {
            log::debug!("Sheet {sheet_id} names missing animal {animal_id}");
            return Ok(None);
        }

        let pointers = self.connection().query_row(
            "SELECT arrival_sheet_id, latest_sheet_id FROM animal WHERE id = ?1",
            [animal_id],
            |row| Ok((row.get(0)?, row.get(1)?)),
        )?;
        Ok(Some(pointers))
    }
}
