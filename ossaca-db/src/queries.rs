//! Read queries.
//!
//! Getters return entities with their relations resolved the way the
//! request layer displays them. Missing rows are `Ok(None)`, never errors.

use rusqlite::{params, Row};

use ossaca_model::*;

use crate::mapper::{self, select_list, Mapped, ANIMAL_COLUMNS, CAT_COLUMNS, DOG_COLUMNS};
use crate::operations::OperationError;
use crate::storage::Storage;

fn dog_select() -> String {
    format!(
        "SELECT {}, {} FROM animal a JOIN dog d ON d.animal_id = a.id",
        select_list("a", ANIMAL_COLUMNS),
        select_list("d", DOG_COLUMNS)
    )
}

fn cat_select() -> String {
    format!(
        "SELECT {}, {} FROM animal a JOIN cat c ON c.animal_id = a.id",
        select_list("a", ANIMAL_COLUMNS),
        select_list("c", CAT_COLUMNS)
    )
}

fn any_animal_select() -> String {
    format!(
        "SELECT {}, d.id AS dog_row, {}, c.id AS cat_row, {}
         FROM animal a
         LEFT JOIN dog d ON d.animal_id = a.id
         LEFT JOIN cat c ON c.animal_id = a.id",
        select_list("a", ANIMAL_COLUMNS),
        select_list("d", DOG_COLUMNS),
        select_list("c", CAT_COLUMNS)
    )
}

fn generic_animal_row(row: &Row<'_>) -> rusqlite::Result<Animal> {
    mapper::animal_from_row(row, Species::Unspecified)
}

impl Storage {
    // ── Generic fetches ─────────────────────────────────────────────────────

    /// One row of a single-table entity, unresolved.
    pub fn fetch_by_id<T: Mapped>(&self, id: Id) -> Result<Option<T>, OperationError> {
        if !is_persisted_id(id) {
            return Ok(None);
        }
        let sql = format!(
            "SELECT {} FROM {} WHERE id = ?1",
            T::COLUMNS.join(", "),
            T::TABLE
        );
        let result = self.connection().query_row(&sql, params![id], T::from_row);
        match result {
            Ok(entity) => Ok(Some(entity)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Every row of a single-table entity, unresolved, ordered by id.
    pub fn fetch_all<T: Mapped>(&self) -> Result<Vec<T>, OperationError> {
        let sql = format!(
            "SELECT {} FROM {} ORDER BY id",
            T::COLUMNS.join(", "),
            T::TABLE
        );
        let mut stmt = self.connection().prepare(&sql)?;
        let rows = stmt.query_map([], T::from_row)?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }

    /// Rows of a single-table entity whose `animal_id` matches.
    fn fetch_by_animal<T: Mapped>(&self, animal_id: Id) -> Result<Vec<T>, OperationError> {
        let sql = format!(
            "SELECT {} FROM {} WHERE animal_id = ?1 ORDER BY id",
            T::COLUMNS.join(", "),
            T::TABLE
        );
        let mut stmt = self.connection().prepare(&sql)?;
        let rows = stmt.query_map(params![animal_id], T::from_row)?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }

    fn query_animal(
        &self,
        sql: &str,
        id: Id,
        build: fn(&Row<'_>) -> rusqlite::Result<Animal>,
    ) -> Result<Option<Animal>, OperationError> {
        let result = self.connection().query_row(sql, params![id], build);
        match result {
            Ok(animal) => Ok(Some(animal)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn query_animals(
        &self,
        sql: &str,
        build: fn(&Row<'_>) -> rusqlite::Result<Animal>,
    ) -> Result<Vec<Animal>, OperationError> {
        let mut stmt = self.connection().prepare(sql)?;
        let rows = stmt.query_map([], build)?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }

    // ── Simple (unresolved) animals ─────────────────────────────────────────

    pub(crate) fn simple_dog_by_id(&self, id: Id) -> Result<Option<Animal>, OperationError> {
        let sql = format!("{} WHERE a.id = ?1", dog_select());
        self.query_animal(&sql, id, mapper::dog_from_row)
    }

    pub(crate) fn simple_cat_by_id(&self, id: Id) -> Result<Option<Animal>, OperationError> {
        let sql = format!("{} WHERE a.id = ?1", cat_select());
        self.query_animal(&sql, id, mapper::cat_from_row)
    }

    /// An animal with its own fields only: sheets and food habit are left as
    /// ids. Tries the dog join, then the cat join, then the bare row.
    pub fn simple_animal_by_id(&self, id: Id) -> Result<Option<Animal>, OperationError> {
        if !is_persisted_id(id) {
            return Ok(None);
        }
        if let Some(dog) = self.simple_dog_by_id(id)? {
            return Ok(Some(dog));
        }
        if let Some(cat) = self.simple_cat_by_id(id)? {
            return Ok(Some(cat));
        }
        let sql = format!(
            "SELECT {} FROM animal a WHERE a.id = ?1",
            select_list("a", ANIMAL_COLUMNS)
        );
        self.query_animal(&sql, id, generic_animal_row)
    }

    // ── Animals ─────────────────────────────────────────────────────────────

    /// Fill in the food habit and attach the arrival and latest sheets.
    fn complete_animal(&self, animal: &mut Animal) -> Result<(), OperationError> {
        self.resolve_food_habit_link(&mut animal.food_habit)?;
        self.resolve_animal_relations(animal)
    }

    fn complete_animals(&self, mut animals: Vec<Animal>) -> Result<Vec<Animal>, OperationError> {
        for animal in &mut animals {
            self.complete_animal(animal)?;
        }
        Ok(animals)
    }

    /// Any animal by id, with the concrete species it was stored as.
    pub fn animal_by_id(&self, id: Id) -> Result<Option<Animal>, OperationError> {
        let Some(mut animal) = self.simple_animal_by_id(id)? else {
            return Ok(None);
        };
        self.complete_animal(&mut animal)?;
        Ok(Some(animal))
    }

    /// Every animal, whatever its species.
    pub fn animals(&self) -> Result<Vec<Animal>, OperationError> {
        let sql = format!("{} ORDER BY a.id", any_animal_select());
        let animals = self.query_animals(&sql, mapper::any_animal_from_row)?;
        self.complete_animals(animals)
    }

    pub fn dogs(&self) -> Result<Vec<Animal>, OperationError> {
        let sql = format!("{} ORDER BY a.id", dog_select());
        let dogs = self.query_animals(&sql, mapper::dog_from_row)?;
        self.complete_animals(dogs)
    }

    /// A dog by id; `None` if the id belongs to another species.
    pub fn dog_by_id(&self, id: Id) -> Result<Option<Animal>, OperationError> {
        let Some(mut dog) = self.simple_dog_by_id(id)? else {
            return Ok(None);
        };
        self.complete_animal(&mut dog)?;
        Ok(Some(dog))
    }

    pub fn cats(&self) -> Result<Vec<Animal>, OperationError> {
        let sql = format!("{} ORDER BY a.id", cat_select());
        let cats = self.query_animals(&sql, mapper::cat_from_row)?;
        self.complete_animals(cats)
    }

    /// A cat by id; `None` if the id belongs to another species.
    pub fn cat_by_id(&self, id: Id) -> Result<Option<Animal>, OperationError> {
        let Some(mut cat) = self.simple_cat_by_id(id)? else {
            return Ok(None);
        };
        self.complete_animal(&mut cat)?;
        Ok(Some(cat))
    }

    // ── Label types ─────────────────────────────────────────────────────────

    pub fn states(&self) -> Result<Vec<State>, OperationError> {
        self.fetch_all()
    }

    pub fn state_by_id(&self, id: Id) -> Result<Option<State>, OperationError> {
        self.fetch_by_id(id)
    }

    pub fn foods(&self) -> Result<Vec<Food>, OperationError> {
        self.fetch_all()
    }

    pub fn food_by_id(&self, id: Id) -> Result<Option<Food>, OperationError> {
        self.fetch_by_id(id)
    }

    pub fn bowls(&self) -> Result<Vec<Bowl>, OperationError> {
        self.fetch_all()
    }

    pub fn bowl_by_id(&self, id: Id) -> Result<Option<Bowl>, OperationError> {
        self.fetch_by_id(id)
    }

    // ── Cares ───────────────────────────────────────────────────────────────

    pub fn cares(&self) -> Result<Vec<Care>, OperationError> {
        self.fetch_all()
    }

    pub fn care_by_id(&self, id: Id) -> Result<Option<Care>, OperationError> {
        self.fetch_by_id(id)
    }

    /// Care sheets come back with their care resolved and their animal in
    /// simple form. `given_by` stays an id.
    pub fn care_sheets(&self) -> Result<Vec<CareSheet>, OperationError> {
        let mut sheets: Vec<CareSheet> = self.fetch_all()?;
        for sheet in &mut sheets {
            self.resolve_care_sheet(sheet)?;
        }
        Ok(sheets)
    }

    pub fn care_sheet_by_id(&self, id: Id) -> Result<Option<CareSheet>, OperationError> {
        let Some(mut sheet) = self.fetch_by_id::<CareSheet>(id)? else {
            return Ok(None);
        };
        self.resolve_care_sheet(&mut sheet)?;
        Ok(Some(sheet))
    }

    pub fn care_sheets_by_animal_id(&self, animal_id: Id) -> Result<Vec<CareSheet>, OperationError> {
        let mut sheets: Vec<CareSheet> = self.fetch_by_animal(animal_id)?;
        for sheet in &mut sheets {
            self.resolve_care_sheet(sheet)?;
        }
        Ok(sheets)
    }

    // ── Food habits ─────────────────────────────────────────────────────────

    pub fn food_habits(&self) -> Result<Vec<FoodHabit>, OperationError> {
        let mut habits: Vec<FoodHabit> = self.fetch_all()?;
        for habit in &mut habits {
            self.resolve_food_habit(habit)?;
        }
        Ok(habits)
    }

    pub fn food_habit_by_id(&self, id: Id) -> Result<Option<FoodHabit>, OperationError> {
        let Some(mut habit) = self.fetch_by_id::<FoodHabit>(id)? else {
            return Ok(None);
        };
        self.resolve_food_habit(&mut habit)?;
        Ok(Some(habit))
    }

    // ── Locations and boxes ─────────────────────────────────────────────────

    /// Locations come back with their box resolved. Persons stay ids: they
    /// belong to a person-provider plugin.
    pub fn locations(&self) -> Result<Vec<Location>, OperationError> {
        let mut locations: Vec<Location> = self.fetch_all()?;
        for location in &mut locations {
            self.resolve_location(location)?;
        }
        Ok(locations)
    }

    pub fn location_by_id(&self, id: Id) -> Result<Option<Location>, OperationError> {
        let Some(mut location) = self.fetch_by_id::<Location>(id)? else {
            return Ok(None);
        };
        self.resolve_location(&mut location)?;
        Ok(Some(location))
    }

    pub fn boxes(&self) -> Result<Vec<ShelterBox>, OperationError> {
        self.fetch_all()
    }

    pub fn box_by_id(&self, id: Id) -> Result<Option<ShelterBox>, OperationError> {
        self.fetch_by_id(id)
    }

    // ── Sheets ──────────────────────────────────────────────────────────────

    fn complete_sheet(&self, sheet: &mut Sheet) -> Result<(), OperationError> {
        self.resolve_sheet_links(sheet)?;
        self.resolve_sheet_animal(sheet)
    }

    /// Sheets come back with state, location and animal resolved; the
    /// animal's own sheets are attached in simple form.
    pub fn sheets(&self) -> Result<Vec<Sheet>, OperationError> {
        let mut sheets: Vec<Sheet> = self.fetch_all()?;
        for sheet in &mut sheets {
            self.complete_sheet(sheet)?;
        }
        Ok(sheets)
    }

    pub fn sheet_by_id(&self, id: Id) -> Result<Option<Sheet>, OperationError> {
        let Some(mut sheet) = self.fetch_by_id::<Sheet>(id)? else {
            return Ok(None);
        };
        self.complete_sheet(&mut sheet)?;
        Ok(Some(sheet))
    }

    /// Every sheet recorded for one animal, oldest first.
    pub fn sheets_by_animal_id(&self, animal_id: Id) -> Result<Vec<Sheet>, OperationError> {
        let mut sheets: Vec<Sheet> = self.fetch_by_animal(animal_id)?;
        for sheet in &mut sheets {
            self.complete_sheet(sheet)?;
        }
        Ok(sheets)
    }
}
