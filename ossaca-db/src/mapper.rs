//! Translation between table rows and entities.
//!
//! Every "how is this value stored" decision lives here: dates and times as
//! ISO-8601 text, booleans and enums as integers, pictures joined by a
//! separator, relations as the related id or `-1`. Rows are read by column
//! name, so the same conversions serve plain and joined queries.

use chrono::{NaiveDate, NaiveTime};
use rusqlite::types::{Type, Value};
use rusqlite::Row;

use ossaca_model::format::{format_date, format_time, join_pictures, parse_date, parse_time, split_pictures};
use ossaca_model::*;

/// Ordered column → value mapping for an insert or update (id excluded).
pub type Params = Vec<(&'static str, Value)>;

/// An entity stored in exactly one table.
pub trait Mapped: Sized {
    const TABLE: &'static str;
    /// Columns read back by [`Mapped::from_row`], id first.
    const COLUMNS: &'static [&'static str];

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self>;
    fn to_params(&self) -> Params;
}

/// `a.id, a.name, ...` for a select list.
pub fn select_list(alias: &str, columns: &[&str]) -> String {
    columns
        .iter()
        .map(|c| format!("{alias}.{c}"))
        .collect::<Vec<_>>()
        .join(", ")
}

// ── Value helpers ───────────────────────────────────────────────────────────

fn text(value: &str) -> Value {
    Value::Text(value.to_string())
}

fn int(value: i64) -> Value {
    Value::Integer(value)
}

fn flag(value: bool) -> Value {
    Value::Integer(value as i64)
}

fn conversion_error(row: &Row<'_>, column: &str, err: ModelError) -> rusqlite::Error {
    let index = row.as_ref().column_index(column).unwrap_or_default();
    rusqlite::Error::FromSqlConversionFailure(index, Type::Text, Box::new(err))
}

fn get_text(row: &Row<'_>, column: &str) -> rusqlite::Result<String> {
    Ok(row.get::<_, Option<String>>(column)?.unwrap_or_default())
}

fn get_int(row: &Row<'_>, column: &str) -> rusqlite::Result<i64> {
    Ok(row.get::<_, Option<i64>>(column)?.unwrap_or_default())
}

fn get_flag(row: &Row<'_>, column: &str) -> rusqlite::Result<bool> {
    Ok(get_int(row, column)? != 0)
}

/// Foreign-key column; NULL reads as the sentinel.
fn get_link_id(row: &Row<'_>, column: &str) -> rusqlite::Result<Id> {
    Ok(row.get::<_, Option<i64>>(column)?.unwrap_or(UNSET_ID))
}

fn get_link<T>(row: &Row<'_>, column: &str) -> rusqlite::Result<Link<T>> {
    Ok(Link::from_id(get_link_id(row, column)?))
}

fn get_date(row: &Row<'_>, column: &str) -> rusqlite::Result<NaiveDate> {
    let stored = get_text(row, column)?;
    parse_date(&stored).map_err(|e| conversion_error(row, column, e))
}

fn get_time(row: &Row<'_>, column: &str) -> rusqlite::Result<NaiveTime> {
    let stored = get_text(row, column)?;
    parse_time(&stored).map_err(|e| conversion_error(row, column, e))
}

// ── Label types ─────────────────────────────────────────────────────────────

const LABEL_COLUMNS: &[&str] = &["id", "label", "description"];

macro_rules! mapped_label {
    ($ty:ty, $table:literal) => {
        impl Mapped for $ty {
            const TABLE: &'static str = $table;
            const COLUMNS: &'static [&'static str] = LABEL_COLUMNS;

            fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
                Ok(Self {
                    id: row.get("id")?,
                    label: get_text(row, "label")?,
                    description: get_text(row, "description")?,
                })
            }

            fn to_params(&self) -> Params {
                vec![
                    ("label", text(&self.label)),
                    ("description", text(&self.description)),
                ]
            }
        }
    };
}

mapped_label!(State, "state");
mapped_label!(Food, "food");
mapped_label!(Bowl, "bowl");

// ── Care ────────────────────────────────────────────────────────────────────

impl Mapped for Care {
    const TABLE: &'static str = "care";
    const COLUMNS: &'static [&'static str] =
        &["id", "type", "dose", "way", "medecine_name", "description"];

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Care {
            id: row.get("id")?,
            care_type: get_text(row, "type")?,
            dose: get_text(row, "dose")?,
            way: get_text(row, "way")?,
            medecine_name: get_text(row, "medecine_name")?,
            description: get_text(row, "description")?,
        })
    }

    fn to_params(&self) -> Params {
        vec![
            ("type", text(&self.care_type)),
            ("dose", text(&self.dose)),
            ("way", text(&self.way)),
            ("medecine_name", text(&self.medecine_name)),
            ("description", text(&self.description)),
        ]
    }
}

impl Mapped for CareSheet {
    const TABLE: &'static str = "caresheet";
    const COLUMNS: &'static [&'static str] = &[
        "id",
        "animal_id",
        "care_id",
        "date",
        "time",
        "frequency",
        "given_by",
        "prescription_number",
        "dosage",
    ];

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(CareSheet {
            id: row.get("id")?,
            animal: get_link(row, "animal_id")?,
            care: get_link(row, "care_id")?,
            date: get_date(row, "date")?,
            time: get_time(row, "time")?,
            frequency: get_text(row, "frequency")?,
            given_by: get_link(row, "given_by")?,
            prescription_number: get_text(row, "prescription_number")?,
            dosage: get_text(row, "dosage")?,
        })
    }

    fn to_params(&self) -> Params {
        vec![
            ("animal_id", int(self.animal.storage_id())),
            ("care_id", int(self.care.storage_id())),
            ("date", text(&format_date(self.date))),
            ("time", text(&format_time(self.time))),
            ("frequency", text(&self.frequency)),
            ("given_by", int(self.given_by.storage_id())),
            ("prescription_number", text(&self.prescription_number)),
            ("dosage", text(&self.dosage)),
        ]
    }
}

// ── Food habit ──────────────────────────────────────────────────────────────

impl Mapped for FoodHabit {
    const TABLE: &'static str = "foodhabit";
    const COLUMNS: &'static [&'static str] = &["id", "food_id", "bowl_id"];

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(FoodHabit {
            id: row.get("id")?,
            food: get_link(row, "food_id")?,
            bowl: get_link(row, "bowl_id")?,
        })
    }

    fn to_params(&self) -> Params {
        vec![
            ("food_id", int(self.food.storage_id())),
            ("bowl_id", int(self.bowl.storage_id())),
        ]
    }
}

// ── Location, box, sheet ────────────────────────────────────────────────────

impl Mapped for Location {
    const TABLE: &'static str = "location";
    const COLUMNS: &'static [&'static str] = &["id", "location_type", "box_id", "person_id"];

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Location {
            id: row.get("id")?,
            location_type: LocationType::from_i64(get_int(row, "location_type")?),
            shelter_box: get_link(row, "box_id")?,
            person: get_link(row, "person_id")?,
        })
    }

    fn to_params(&self) -> Params {
        vec![
            ("location_type", int(self.location_type.as_i64())),
            ("box_id", int(self.shelter_box.storage_id())),
            ("person_id", int(self.person.storage_id())),
        ]
    }
}

impl Mapped for ShelterBox {
    const TABLE: &'static str = "box";
    const COLUMNS: &'static [&'static str] = &[
        "id",
        "label",
        "description",
        "surface_area",
        "position",
        "condition",
        "particularity",
    ];

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(ShelterBox {
            id: row.get("id")?,
            label: get_text(row, "label")?,
            description: get_text(row, "description")?,
            surface_area: get_int(row, "surface_area")?,
            position: get_text(row, "position")?,
            condition: get_text(row, "condition")?,
            particularity: get_text(row, "particularity")?,
        })
    }

    fn to_params(&self) -> Params {
        vec![
            ("label", text(&self.label)),
            ("description", text(&self.description)),
            ("surface_area", int(self.surface_area)),
            ("position", text(&self.position)),
            ("condition", text(&self.condition)),
            ("particularity", text(&self.particularity)),
        ]
    }
}

impl Mapped for Sheet {
    const TABLE: &'static str = "sheet";
    const COLUMNS: &'static [&'static str] =
        &["id", "date", "animal_id", "state_id", "location_id"];

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Sheet {
            id: row.get("id")?,
            date: get_date(row, "date")?,
            animal: get_link(row, "animal_id")?,
            state: get_link(row, "state_id")?,
            location: get_link(row, "location_id")?,
        })
    }

    fn to_params(&self) -> Params {
        vec![
            ("date", text(&format_date(self.date))),
            ("animal_id", int(self.animal.storage_id())),
            ("state_id", int(self.state.storage_id())),
            ("location_id", int(self.location.storage_id())),
        ]
    }
}

// ── Animal ──────────────────────────────────────────────────────────────────
//
// Animals span two tables, so they don't implement `Mapped`: the generic row
// and the species row are converted separately.

pub const ANIMAL_TABLE: &str = "animal";
pub const DOG_TABLE: &str = "dog";
pub const CAT_TABLE: &str = "cat";
/// Column of a species row holding `animal.id`.
pub const SPECIES_FOREIGN_KEY: &str = "animal_id";

pub const ANIMAL_COLUMNS: &[&str] = &[
    "id",
    "name",
    "birth_date",
    "arrival_date",
    "arrival_sheet_id",
    "latest_sheet_id",
    "gender",
    "breed",
    "character",
    "color",
    "pictures",
    "implant",
    "neutered",
    "history",
    "food_habit_id",
];
pub const DOG_COLUMNS: &[&str] = &["ok_cats", "category"];
pub const CAT_COLUMNS: &[&str] = &["has_fiv", "has_felv"];

/// Build an animal from a row carrying the `animal` columns. Sheets and food
/// habit stay unresolved.
pub fn animal_from_row(row: &Row<'_>, species: Species) -> rusqlite::Result<Animal> {
    Ok(Animal {
        id: row.get("id")?,
        species,
        name: get_text(row, "name")?,
        birth_date: get_date(row, "birth_date")?,
        arrival_date: get_date(row, "arrival_date")?,
        arrival_sheet: get_link(row, "arrival_sheet_id")?,
        latest_sheet: get_link(row, "latest_sheet_id")?,
        gender: Gender::from_i64(get_int(row, "gender")?),
        breed: get_text(row, "breed")?,
        character: get_text(row, "character")?,
        color: get_text(row, "color")?,
        pictures: split_pictures(&get_text(row, "pictures")?),
        implant: get_text(row, "implant")?,
        neutered: get_flag(row, "neutered")?,
        history: get_text(row, "history")?,
        food_habit: get_link(row, "food_habit_id")?,
    })
}

/// Row joined with `dog`.
pub fn dog_from_row(row: &Row<'_>) -> rusqlite::Result<Animal> {
    let traits = DogTraits {
        ok_cats: get_flag(row, "ok_cats")?,
        category: DogCategory::from_i64(get_int(row, "category")?),
    };
    animal_from_row(row, Species::Dog(traits))
}

/// Row joined with `cat`.
pub fn cat_from_row(row: &Row<'_>) -> rusqlite::Result<Animal> {
    let traits = CatTraits {
        has_fiv: get_flag(row, "has_fiv")?,
        has_felv: get_flag(row, "has_felv")?,
    };
    animal_from_row(row, Species::Cat(traits))
}

/// Row from the all-species listing: `animal` left-joined with both species
/// tables, with `dog_row` / `cat_row` naming the matching species row id.
pub fn any_animal_from_row(row: &Row<'_>) -> rusqlite::Result<Animal> {
    if row.get::<_, Option<i64>>("dog_row")?.is_some() {
        dog_from_row(row)
    } else if row.get::<_, Option<i64>>("cat_row")?.is_some() {
        cat_from_row(row)
    } else {
        animal_from_row(row, Species::Unspecified)
    }
}

pub fn animal_params(animal: &Animal) -> Params {
    vec![
        ("name", text(&animal.name)),
        ("birth_date", text(&format_date(animal.birth_date))),
        ("arrival_date", text(&format_date(animal.arrival_date))),
        ("arrival_sheet_id", int(animal.arrival_sheet.storage_id())),
        ("latest_sheet_id", int(animal.latest_sheet.storage_id())),
        ("gender", int(animal.gender.as_i64())),
        ("breed", text(&animal.breed)),
        ("character", text(&animal.character)),
        ("color", text(&animal.color)),
        ("pictures", text(&join_pictures(&animal.pictures))),
        ("implant", text(&animal.implant)),
        ("neutered", flag(animal.neutered)),
        ("history", text(&animal.history)),
        ("food_habit_id", int(animal.food_habit.storage_id())),
    ]
}

/// Species table and its columns, without the foreign key.
pub fn species_params(species: &Species) -> Option<(&'static str, Params)> {
    match species {
        Species::Dog(dog) => Some((
            DOG_TABLE,
            vec![
                ("ok_cats", flag(dog.ok_cats)),
                ("category", int(dog.category.as_i64())),
            ],
        )),
        Species::Cat(cat) => Some((
            CAT_TABLE,
            vec![
                ("has_fiv", flag(cat.has_fiv)),
                ("has_felv", flag(cat.has_felv)),
            ],
        )),
        Species::Unspecified => None,
    }
}
