use chrono::NaiveDate;
use ossaca_model::format::{join_pictures, parse_date, parse_time, split_pictures};
use ossaca_model::*;

fn date(s: &str) -> NaiveDate {
    parse_date(s).unwrap()
}

#[test]
fn defaults_are_transient() {
    let dog = Animal::dog("Ichi");
    assert_eq!(dog.id, UNSET_ID);
    assert!(!dog.is_persisted());
    assert_eq!(dog.name, "Ichi");
    assert_eq!(dog.gender, Gender::Unknown);
    assert!(dog.pictures.is_empty());
    assert_eq!(dog.arrival_sheet, Link::Unset);
    assert_eq!(dog.dog_traits(), Some(&DogTraits::default()));
    assert!(dog.cat_traits().is_none());

    assert_eq!(State::default().id, UNSET_ID);
    assert_eq!(Sheet::default().location, Link::Unset);
    assert_eq!(CareSheet::default().time, chrono::NaiveTime::MIN);
    assert_eq!(Location::default().location_type, LocationType::Other);
}

#[test]
fn link_from_sentinel_is_unset() {
    let link: Link<State> = Link::from_id(UNSET_ID);
    assert!(!link.is_set());
    assert_eq!(link.storage_id(), -1);

    let link: Link<State> = Link::from_id(0);
    assert_eq!(link, Link::Unset);

    let link: Link<State> = Link::from_id(4);
    assert_eq!(link.id(), Some(4));
    assert!(!link.is_resolved());
}

#[test]
fn resolved_link_uses_entity_id() {
    let mut state = State::new("Adopted", "Found a family");
    let link = Link::Resolved(state.clone());
    // Never persisted: nothing usable to store.
    assert_eq!(link.storage_id(), UNSET_ID);

    state.id = 7;
    let link = Link::from(state);
    assert_eq!(link.storage_id(), 7);
    assert_eq!(link.get().map(|s| s.label.as_str()), Some("Adopted"));
}

#[test]
fn boxed_animal_link() {
    let mut cat = Animal::cat("Minette");
    cat.id = 3;
    let sheet = Sheet::for_animal(cat);
    assert_eq!(sheet.animal.id(), Some(3));
}

#[test]
fn pictures_round_trip() {
    let pictures = vec!["a.jpg".to_string(), "b.jpg".to_string()];
    let stored = join_pictures(&pictures);
    assert_eq!(stored, "a.jpg,b.jpg");
    assert_eq!(split_pictures(&stored), pictures);

    assert_eq!(join_pictures(&[]), "");
    assert!(split_pictures("").is_empty());
}

#[test]
fn age_counts_whole_years() {
    let mut dog = Animal::dog("Louloute");
    dog.birth_date = date("2004-12-25");
    assert_eq!(dog.age_on(date("2016-06-17")), 11);
    assert_eq!(dog.age_on(date("2016-12-25")), 12);
    assert_eq!(dog.age_on(date("2000-01-01")), 0);
}

#[test]
fn box_capacity_depends_on_species() {
    let cattery = ShelterBox::new("Chatterie", 20);
    assert_eq!(cattery.capacity(&Species::Cat(CatTraits::default())), 10);
    assert_eq!(cattery.capacity(&Species::Dog(DogTraits::default())), 6);

    let small = ShelterBox::new("Box 1", 2);
    assert_eq!(small.capacity(&Species::Dog(DogTraits::default())), 0);
    assert_eq!(ShelterBox::new("Broken", -4).capacity(&Species::Unspecified), 0);
}

#[test]
fn box_capacity_saturates_for_huge_areas() {
    let field = ShelterBox::new("Field", i64::MAX);
    assert_eq!(field.capacity(&Species::Cat(CatTraits::default())), u32::MAX);
    assert_eq!(field.capacity(&Species::Dog(DogTraits::default())), u32::MAX);
}

#[test]
fn enum_storage_values() {
    assert_eq!(Gender::from_i64(Gender::Male.as_i64()), Gender::Male);
    assert_eq!(Gender::from_i64(42), Gender::Unknown);
    assert_eq!(LocationType::from_i64(0), LocationType::Box);
    assert_eq!(LocationType::FosterFamily.as_i64(), 2);
    assert_eq!(DogCategory::from_i64(2), DogCategory::Category2);
    assert_eq!("f".parse::<Gender>().unwrap(), Gender::Female);
    assert_eq!("foster-family".parse::<LocationType>().unwrap(), LocationType::FosterFamily);
    assert!("lion".parse::<Gender>().is_err());
}

#[test]
fn text_formats() {
    assert!(parse_date("2019-02-30").is_err());
    assert_eq!(parse_time("12:04").unwrap().to_string(), "12:04:00");
    assert!(matches!(parse_time("noon"), Err(ModelError::InvalidTime(_))));
}
