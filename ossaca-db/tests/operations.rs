use chrono::Local;
use rusqlite::types::Value;

use ossaca_db::*;
use ossaca_model::format::{format_date, parse_date, parse_time};
use ossaca_model::*;

fn t(s: &str) -> Value {
    Value::Text(s.to_string())
}

fn i(n: i64) -> Value {
    Value::Integer(n)
}

fn today() -> String {
    format_date(Local::now().date_naive())
}

/// Every column of one row, in table order.
fn row(storage: &Storage, table: &str, id: i64) -> Vec<Value> {
    let mut stmt = storage
        .connection()
        .prepare(&format!("SELECT * FROM {table} WHERE id = ?1"))
        .unwrap();
    let n = stmt.column_count();
    stmt.query_row([id], |row| {
        (0..n).map(|c| row.get::<_, Value>(c)).collect()
    })
    .unwrap()
}

fn louloute() -> Animal {
    let mut dog = Animal::dog("Louloute");
    dog.birth_date = parse_date("2004-12-25").unwrap();
    dog.arrival_date = parse_date("2016-06-17").unwrap();
    dog.gender = Gender::Female;
    dog.breed = "Malinois croisé sharpei".to_string();
    dog.character = "gentille avec du poil au nez".to_string();
    dog.color = "verte".to_string();
    dog.implant = "1223446035OJCOJSDC".to_string();
    dog.history = "Née au refuge".to_string();
    dog.species = Species::Dog(DogTraits {
        ok_cats: true,
        category: DogCategory::Category1,
    });
    dog
}

fn louloute_row(arrival: i64, latest: i64, food_habit: i64) -> Vec<Value> {
    vec![
        i(1),
        t("Louloute"),
        t("2004-12-25"),
        t("2016-06-17"),
        i(arrival),
        i(latest),
        i(1),
        t("Malinois croisé sharpei"),
        t("gentille avec du poil au nez"),
        t("verte"),
        t(""),
        t("1223446035OJCOJSDC"),
        i(0),
        t("Née au refuge"),
        i(food_habit),
    ]
}

// ── Add ─────────────────────────────────────────────────────────────────────

#[test]
fn add_default_state() {
    let storage = Storage::open_memory().unwrap();
    let mut state = State::default();
    let id = storage.add(&mut state).unwrap();

    assert_eq!(id, 1);
    assert_eq!(state.id, 1);
    assert_eq!(row(&storage, "state", 1), vec![i(1), t(""), t("")]);
}

#[test]
fn add_state_then_list() {
    let storage = Storage::open_memory().unwrap();
    storage
        .add(&mut State::new("Adopted", "The animal has a family"))
        .unwrap();

    let states = storage.states().unwrap();
    assert_eq!(states.len(), 1);
    assert_eq!(states[0].label, "Adopted");
    assert_eq!(states[0].description, "The animal has a family");
}

#[test]
fn add_default_dog_writes_both_tables() {
    let storage = Storage::open_memory().unwrap();
    let mut dog = Animal::dog("");
    storage.add(&mut dog).unwrap();

    assert_eq!(dog.id, 1);
    assert_eq!(
        row(&storage, "animal", 1),
        vec![
            i(1),
            t(""),
            t(&today()),
            t(&today()),
            i(-1),
            i(-1),
            i(0),
            t(""),
            t(""),
            t(""),
            t(""),
            t(""),
            i(0),
            t(""),
            i(-1),
        ]
    );
    assert_eq!(row(&storage, "dog", 1), vec![i(1), i(1), i(0), i(0)]);
    assert_eq!(storage.count_rows("cat").unwrap(), 0);
}

#[test]
fn add_dog_with_links() {
    let storage = Storage::open_memory().unwrap();
    let mut dog = louloute();
    dog.species = Species::Dog(DogTraits {
        ok_cats: true,
        category: DogCategory::Category2,
    });
    dog.arrival_sheet = Link::Id(2);
    dog.latest_sheet = Link::Id(4);
    dog.food_habit = Link::Id(6);
    storage.add(&mut dog).unwrap();

    assert_eq!(row(&storage, "animal", 1), louloute_row(2, 4, 6));
    assert_eq!(row(&storage, "dog", 1), vec![i(1), i(1), i(1), i(2)]);
}

#[test]
fn add_cat_writes_both_tables() {
    let storage = Storage::open_memory().unwrap();
    let mut cat = Animal::cat("Minette");
    cat.species = Species::Cat(CatTraits {
        has_fiv: true,
        has_felv: false,
    });
    storage.add(&mut cat).unwrap();

    assert_eq!(storage.count_rows("animal").unwrap(), 1);
    assert_eq!(row(&storage, "cat", 1), vec![i(1), i(1), i(1), i(0)]);
    assert_eq!(storage.count_rows("dog").unwrap(), 0);
}

#[test]
fn species_row_carries_generic_id() {
    let storage = Storage::open_memory().unwrap();
    storage.add(&mut State::default()).unwrap();
    storage.add(&mut Animal::cat("Minette")).unwrap();
    let mut dog = Animal::dog("Ichi");
    storage.add(&mut dog).unwrap();

    assert_eq!(dog.id, 2);
    let animal_id: i64 = storage
        .connection()
        .query_row("SELECT animal_id FROM dog WHERE id = 1", [], |row| row.get(0))
        .unwrap();
    assert_eq!(animal_id, 2);
}

#[test]
fn generic_animal_has_no_species_row() {
    let storage = Storage::open_memory().unwrap();
    storage.add(&mut Animal::new("Nobody")).unwrap();
    assert_eq!(storage.count_rows("animal").unwrap(), 1);
    assert_eq!(storage.count_rows("dog").unwrap(), 0);
    assert_eq!(storage.count_rows("cat").unwrap(), 0);
}

#[test]
fn adding_same_instance_twice_creates_two_rows() {
    let storage = Storage::open_memory().unwrap();
    let mut ichi = Animal::dog("Ichi");
    ichi.birth_date = parse_date("2019-02-14").unwrap();
    ichi.gender = Gender::Male;
    storage.add(&mut ichi).unwrap();
    assert_eq!(ichi.id, 1);

    ichi.name = "Ichie".to_string();
    ichi.gender = Gender::Female;
    storage.add(&mut ichi).unwrap();
    assert_eq!(ichi.id, 2);

    let first = storage.dog_by_id(1).unwrap().unwrap();
    let second = storage.dog_by_id(2).unwrap().unwrap();
    assert_eq!(first.name, "Ichi");
    assert_eq!(first.gender, Gender::Male);
    assert_eq!(second.name, "Ichie");
    assert_eq!(second.gender, Gender::Female);
    assert_eq!(storage.count_rows("dog").unwrap(), 2);
}

#[test]
fn add_care_and_care_sheet() {
    let storage = Storage::open_memory().unwrap();
    let mut care = Care {
        care_type: "vaccin".to_string(),
        dose: "15mg".to_string(),
        way: "piqure".to_string(),
        medecine_name: "vaccinator".to_string(),
        description: "Vaccin annuel".to_string(),
        ..Care::default()
    };
    storage.add(&mut care).unwrap();
    assert_eq!(
        row(&storage, "care", 1),
        vec![i(1), t("vaccin"), t("15mg"), t("piqure"), t("vaccinator"), t("Vaccin annuel")]
    );

    storage.add(&mut CareSheet::default()).unwrap();
    assert_eq!(
        row(&storage, "caresheet", 1),
        vec![i(1), i(-1), i(-1), t(&today()), t("00:00:00"), t(""), i(-1), t(""), t("")]
    );

    let mut sheet = CareSheet {
        animal: Link::Id(4),
        care: Link::Resolved(care),
        date: parse_date("2019-08-09").unwrap(),
        time: parse_time("12:04:34").unwrap(),
        frequency: "3 fois par jour".to_string(),
        given_by: Link::Id(12),
        prescription_number: "P1234".to_string(),
        dosage: "2 gelules".to_string(),
        ..CareSheet::default()
    };
    storage.add(&mut sheet).unwrap();
    assert_eq!(
        row(&storage, "caresheet", 2),
        vec![
            i(2),
            i(4),
            i(1),
            t("2019-08-09"),
            t("12:04:34"),
            t("3 fois par jour"),
            i(12),
            t("P1234"),
            t("2 gelules"),
        ]
    );
}

#[test]
fn add_food_habit_with_one_side_unset() {
    let storage = Storage::open_memory().unwrap();
    let mut food = Food::new("Croquettes", "");
    storage.add(&mut food).unwrap();

    let mut habit = FoodHabit {
        food: Link::Resolved(food),
        ..FoodHabit::default()
    };
    storage.add(&mut habit).unwrap();
    assert_eq!(row(&storage, "foodhabit", 1), vec![i(1), i(1), i(-1)]);
}

#[test]
fn add_location_box_and_sheet() {
    let storage = Storage::open_memory().unwrap();

    let mut location = Location {
        location_type: LocationType::Box,
        shelter_box: Link::Id(3),
        ..Location::default()
    };
    storage.add(&mut location).unwrap();
    assert_eq!(row(&storage, "location", 1), vec![i(1), i(0), i(3), i(-1)]);

    let mut shelter_box = ShelterBox {
        label: "Box 1".to_string(),
        description: "Box 1 de l'allée centrale".to_string(),
        surface_area: 2,
        position: "Allée centrale".to_string(),
        ..ShelterBox::default()
    };
    storage.add(&mut shelter_box).unwrap();
    assert_eq!(
        row(&storage, "box", 1),
        vec![
            i(1),
            t("Box 1"),
            t("Box 1 de l'allée centrale"),
            i(2),
            t("Allée centrale"),
            t(""),
            t(""),
        ]
    );

    let mut sheet = Sheet {
        date: parse_date("2017-11-11").unwrap(),
        ..Sheet::default()
    };
    storage.add(&mut sheet).unwrap();
    assert_eq!(
        row(&storage, "sheet", 1),
        vec![i(1), t("2017-11-11"), i(-1), i(-1), i(-1)]
    );
}

#[test]
fn adding_sheets_moves_animal_pointers() {
    let storage = Storage::open_memory().unwrap();
    let mut cat = Animal::cat("");
    storage.add(&mut cat).unwrap();
    assert_eq!(cat.id, 1);
    assert_eq!(cat.arrival_sheet, Link::Unset);

    let mut first = Sheet {
        date: parse_date("2017-11-11").unwrap(),
        animal: Link::Resolved(Box::new(cat.clone())),
        state: Link::Id(2),
        location: Link::Id(8),
        ..Sheet::default()
    };
    storage.add(&mut first).unwrap();
    assert_eq!(
        row(&storage, "sheet", 1),
        vec![i(1), t("2017-11-11"), i(1), i(2), i(8)]
    );
    let pointers = &row(&storage, "animal", 1)[4..6];
    assert_eq!(pointers, &[i(1), i(1)]);

    let attached = first.animal.get().unwrap();
    assert_eq!(attached.arrival_sheet.id(), Some(1));
    assert_eq!(attached.latest_sheet.id(), Some(1));

    let mut second = Sheet::for_animal(cat);
    storage.add(&mut second).unwrap();
    let pointers = &row(&storage, "animal", 1)[4..6];
    assert_eq!(pointers, &[i(1), i(2)]);

    let attached = second.animal.get().unwrap();
    assert_eq!(attached.arrival_sheet.id(), Some(1));
    assert_eq!(attached.latest_sheet.id(), Some(2));
}

#[test]
fn sheet_for_missing_animal_is_still_added() {
    let storage = Storage::open_memory().unwrap();
    let mut sheet = Sheet {
        animal: Link::Id(9),
        ..Sheet::default()
    };
    storage.add(&mut sheet).unwrap();
    assert_eq!(sheet.id, 1);
    assert_eq!(storage.count_rows("animal").unwrap(), 0);
}

// ── Update ──────────────────────────────────────────────────────────────────

#[test]
fn update_state_keeps_row_count() {
    let storage = Storage::open_memory().unwrap();
    let mut state = State::default();
    storage.add(&mut state).unwrap();

    state.label = "Adopté".to_string();
    state.description = "L'animal est adopté".to_string();
    storage.update(&state).unwrap();

    assert_eq!(storage.count_rows("state").unwrap(), 1);
    assert_eq!(
        row(&storage, "state", 1),
        vec![i(1), t("Adopté"), t("L'animal est adopté")]
    );
}

#[test]
fn update_dog_rewrites_both_rows_but_not_sheet_pointers() {
    let storage = Storage::open_memory().unwrap();
    storage.add(&mut Animal::dog("")).unwrap();

    let mut dog = louloute();
    dog.id = 1;
    dog.species = Species::Dog(DogTraits {
        ok_cats: true,
        category: DogCategory::Category2,
    });
    dog.arrival_sheet = Link::Id(2);
    dog.latest_sheet = Link::Id(4);
    dog.food_habit = Link::Id(6);
    storage.update(&dog).unwrap();

    assert_eq!(storage.count_rows("animal").unwrap(), 1);
    assert_eq!(storage.count_rows("dog").unwrap(), 1);
    assert_eq!(row(&storage, "animal", 1), louloute_row(-1, -1, 6));
    assert_eq!(row(&storage, "dog", 1), vec![i(1), i(1), i(1), i(2)]);
}

#[test]
fn update_stale_animal_keeps_sheet_history() {
    let storage = Storage::open_memory().unwrap();
    let mut dog = Animal::dog("Ichi");
    storage.add(&mut dog).unwrap();
    for _ in 0..2 {
        let mut sheet = Sheet {
            animal: Link::Id(dog.id),
            ..Sheet::default()
        };
        storage.add(&mut sheet).unwrap();
    }

    dog.name = "Ichi le grand".to_string();
    storage.update(&dog).unwrap();

    let stored = storage.animal_by_id(dog.id).unwrap().unwrap();
    assert_eq!(stored.name, "Ichi le grand");
    assert_eq!(stored.arrival_sheet.id(), Some(1));
    assert_eq!(stored.latest_sheet.id(), Some(2));
}

#[test]
fn update_animal_of_other_species_is_not_found() {
    let storage = Storage::open_memory().unwrap();
    storage.add(&mut Animal::cat("Minette")).unwrap();

    let mut dog = Animal::dog("Minette");
    dog.id = 1;
    dog.color = "rousse".to_string();
    assert!(matches!(
        storage.update(&dog),
        Err(OperationError::NotFound { id: 1, .. })
    ));
    assert_eq!(storage.count_rows("dog").unwrap(), 0);
    assert_eq!(row(&storage, "animal", 1)[9], t(""));
    assert!(storage.cat_by_id(1).unwrap().is_some());
}

#[test]
fn update_cat_rewrites_species_row() {
    let storage = Storage::open_memory().unwrap();
    let mut cat = Animal::cat("Minette");
    storage.add(&mut cat).unwrap();

    cat.color = "violette".to_string();
    if let Some(traits) = cat.cat_traits_mut() {
        traits.has_fiv = true;
    }
    storage.update(&cat).unwrap();

    assert_eq!(row(&storage, "cat", 1), vec![i(1), i(1), i(1), i(0)]);
    assert_eq!(storage.cat_by_id(1).unwrap().unwrap().color, "violette");
}

#[test]
fn update_location_and_food_habit() {
    let storage = Storage::open_memory().unwrap();
    storage.add(&mut Location::default()).unwrap();
    storage.add(&mut FoodHabit::default()).unwrap();

    let location = Location {
        id: 1,
        location_type: LocationType::Box,
        shelter_box: Link::Id(3),
        person: Link::Unset,
    };
    storage.update(&location).unwrap();
    assert_eq!(row(&storage, "location", 1), vec![i(1), i(0), i(3), i(-1)]);

    let habit = FoodHabit {
        id: 1,
        food: Link::Id(6),
        bowl: Link::Id(7),
    };
    storage.update(&habit).unwrap();
    assert_eq!(row(&storage, "foodhabit", 1), vec![i(1), i(6), i(7)]);
    assert_eq!(storage.count_rows("foodhabit").unwrap(), 1);
}

#[test]
fn update_transient_entity_fails() {
    let storage = Storage::open_memory().unwrap();
    let result = storage.update(&Care::default());
    assert!(matches!(
        result,
        Err(OperationError::InvalidOperation { action: "update", .. })
    ));
}

#[test]
fn update_missing_row_is_not_found() {
    let storage = Storage::open_memory().unwrap();
    let bowl = Bowl {
        id: 5,
        ..Bowl::default()
    };
    assert!(matches!(
        storage.update(&bowl),
        Err(OperationError::NotFound { id: 5, .. })
    ));
}

// ── Delete ──────────────────────────────────────────────────────────────────

#[test]
fn delete_state() {
    let storage = Storage::open_memory().unwrap();
    let mut state = State::default();
    storage.add(&mut state).unwrap();
    storage.delete(&mut state).unwrap();

    assert_eq!(storage.count_rows("state").unwrap(), 0);
    assert_eq!(state.id, UNSET_ID);
}

#[test]
fn delete_dog_removes_both_rows() {
    let storage = Storage::open_memory().unwrap();
    let mut keep = Animal::cat("Minette");
    storage.add(&mut keep).unwrap();
    let mut dog = Animal::dog("Ichi");
    storage.add(&mut dog).unwrap();

    storage.delete(&mut dog).unwrap();
    assert_eq!(storage.count_rows("dog").unwrap(), 0);
    assert_eq!(storage.count_rows("animal").unwrap(), 1);
    assert_eq!(storage.count_rows("cat").unwrap(), 1);
    assert!(storage.animal_by_id(2).unwrap().is_none());
}

#[test]
fn delete_cat_by_id_only() {
    let storage = Storage::open_memory().unwrap();
    storage.add(&mut Animal::cat("Minette")).unwrap();

    let mut cat = Animal::cat("");
    cat.id = 1;
    storage.delete(&mut cat).unwrap();
    assert_eq!(storage.count_rows("cat").unwrap(), 0);
    assert_eq!(storage.count_rows("animal").unwrap(), 0);
}

#[test]
fn delete_animal_of_other_species_keeps_both_rows() {
    let storage = Storage::open_memory().unwrap();
    storage.add(&mut Animal::cat("Minette")).unwrap();

    let mut dog = Animal::dog("Minette");
    dog.id = 1;
    assert!(matches!(
        storage.delete(&mut dog),
        Err(OperationError::NotFound { id: 1, .. })
    ));
    assert_eq!(dog.id, 1);
    assert_eq!(storage.count_rows("animal").unwrap(), 1);
    assert_eq!(storage.count_rows("cat").unwrap(), 1);
}

#[test]
fn delete_unpersisted_entity_fails_without_deleting() {
    let storage = Storage::open_memory().unwrap();
    storage.add(&mut ShelterBox::default()).unwrap();

    for id in [0, -1, -7] {
        let mut shelter_box = ShelterBox {
            id,
            ..ShelterBox::default()
        };
        let result = storage.delete(&mut shelter_box);
        assert!(matches!(
            result,
            Err(OperationError::InvalidOperation { action: "delete", .. })
        ));
    }
    assert_eq!(storage.count_rows("box").unwrap(), 1);
}

#[test]
fn deleted_instance_cannot_be_deleted_again() {
    let storage = Storage::open_memory().unwrap();
    let mut food = Food::new("Pâtée", "");
    storage.add(&mut food).unwrap();
    storage.delete(&mut food).unwrap();

    assert!(storage.delete(&mut food).is_err());
    assert!(storage.update(&food).is_err());
}

// ── SQL construction ────────────────────────────────────────────────────────

#[test]
fn statements_follow_parameter_order() {
    let params: Params = vec![("label", t("a")), ("description", t("b"))];
    assert_eq!(
        insert_sql("state", &params),
        "INSERT INTO state (label, description) VALUES (?1, ?2)"
    );
    assert_eq!(
        update_sql("dog", &params, "animal_id"),
        "UPDATE dog SET label = ?1, description = ?2 WHERE animal_id = ?3"
    );
}
