use ossaca_db::*;
use ossaca_model::*;

/// A dog with two sheets, the second in an "Adopted" state at a box.
fn shelter_with_history() -> Storage {
    let storage = Storage::open_memory().unwrap();

    let mut adopted = State::new("Adopted", "");
    storage.add(&mut adopted).unwrap();
    let mut shelter_box = ShelterBox::new("Box 1", 6);
    storage.add(&mut shelter_box).unwrap();
    let mut location = Location {
        location_type: LocationType::Box,
        shelter_box: Link::Resolved(shelter_box),
        ..Location::default()
    };
    storage.add(&mut location).unwrap();

    let mut dog = Animal::dog("Rex");
    storage.add(&mut dog).unwrap();

    storage.add(&mut Sheet::for_animal(dog.clone())).unwrap();
    let mut latest = Sheet::for_animal(dog);
    latest.state = Link::Resolved(adopted);
    latest.location = Link::Resolved(location);
    storage.add(&mut latest).unwrap();

    storage
}

#[test]
fn animal_sheets_point_back_by_id() {
    let storage = shelter_with_history();
    let dog = storage.dog_by_id(1).unwrap().unwrap();

    let arrival = dog.arrival_sheet.get().unwrap();
    let latest = dog.latest_sheet.get().unwrap();
    assert_eq!(arrival.id, 1);
    assert_eq!(latest.id, 2);
    assert_eq!(arrival.animal, Link::Id(dog.id));
    assert_eq!(latest.animal, Link::Id(dog.id));
}

#[test]
fn attached_sheets_carry_state_and_location() {
    let storage = shelter_with_history();
    let dog = storage.animal_by_id(1).unwrap().unwrap();

    let latest = dog.latest_sheet.get().unwrap();
    assert_eq!(latest.state.get().map(|s| s.label.as_str()), Some("Adopted"));
    let location = latest.location.get().unwrap();
    assert_eq!(
        location.shelter_box.get().map(|b| b.label.as_str()),
        Some("Box 1")
    );
}

#[test]
fn sheet_animal_is_one_level_deep() {
    let storage = shelter_with_history();
    let sheet = storage.sheet_by_id(2).unwrap().unwrap();

    let animal = sheet.animal.get().unwrap();
    assert_eq!(animal.id, 1);
    let latest = animal.latest_sheet.get().unwrap();
    assert_eq!(latest.id, 2);
    assert!(!latest.animal.is_resolved());
    assert_eq!(latest.animal.id(), Some(1));
}

#[test]
fn single_sheet_is_both_arrival_and_latest() {
    let storage = Storage::open_memory().unwrap();
    let mut cat = Animal::cat("Minette");
    storage.add(&mut cat).unwrap();
    storage.add(&mut Sheet::for_animal(cat)).unwrap();

    let cat = storage.cat_by_id(1).unwrap().unwrap();
    assert_eq!(cat.arrival_sheet, cat.latest_sheet);
    assert_eq!(cat.arrival_sheet.id(), Some(1));
}

#[test]
fn sheet_of_deleted_animal_has_no_animal() {
    let storage = Storage::open_memory().unwrap();
    let mut dog = Animal::dog("Rex");
    storage.add(&mut dog).unwrap();
    storage.add(&mut Sheet::for_animal(dog.clone())).unwrap();
    storage.delete(&mut dog).unwrap();

    let sheet = storage.sheet_by_id(1).unwrap().unwrap();
    assert_eq!(sheet.animal, Link::Unset);
}

#[test]
fn resolve_link_leaves_resolved_values() {
    let storage = Storage::open_memory().unwrap();
    let transient = State::new("Not stored", "");
    let mut link = Link::Resolved(transient.clone());
    storage.resolve_link(&mut link).unwrap();
    assert_eq!(link, Link::Resolved(transient));

    let mut stored = State::new("Stored", "");
    storage.add(&mut stored).unwrap();
    let mut link: Link<State> = Link::Id(stored.id);
    storage.resolve_link(&mut link).unwrap();
    assert_eq!(link.get(), Some(&stored));
}
