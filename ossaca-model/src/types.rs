//! Entity types for the shelter.
//!
//! These are plain value holders. Construction always yields safe defaults
//! (empty strings, `UNSET_ID`, today's date) so callers can fill an entity in
//! before persisting it. Nothing here validates its own fields.

use chrono::{Datelike, Local, NaiveDate, NaiveTime};

use crate::link::{Id, Identified, Link, UNSET_ID};

fn today() -> NaiveDate {
    Local::now().date_naive()
}

macro_rules! impl_identified {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Identified for $ty {
                fn id(&self) -> Id {
                    self.id
                }

                fn set_id(&mut self, id: Id) {
                    self.id = id;
                }
            }
        )*
    };
}

// ── Enumerations ────────────────────────────────────────────────────────────

/// Gender of an animal, stored as an integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Gender {
    #[default]
    Unknown,
    Female,
    Male,
}

impl Gender {
    pub fn as_i64(self) -> i64 {
        match self {
            Gender::Unknown => 0,
            Gender::Female => 1,
            Gender::Male => 2,
        }
    }

    /// Unknown stored values read back as `Unknown`.
    pub fn from_i64(value: i64) -> Self {
        match value {
            1 => Gender::Female,
            2 => Gender::Male,
            _ => Gender::Unknown,
        }
    }
}

impl std::fmt::Display for Gender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Gender::Unknown => write!(f, "unknown"),
            Gender::Female => write!(f, "female"),
            Gender::Male => write!(f, "male"),
        }
    }
}

impl std::str::FromStr for Gender {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "unknown" | "u" | "0" => Ok(Gender::Unknown),
            "female" | "f" | "1" => Ok(Gender::Female),
            "male" | "m" | "2" => Ok(Gender::Male),
            _ => Err(format!("unknown gender: {s}")),
        }
    }
}

/// Legal category of a dog (French classification of potentially
/// dangerous dogs).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DogCategory {
    #[default]
    Unclassified,
    /// Attack dogs.
    Category1,
    /// Guard and defence dogs.
    Category2,
}

impl DogCategory {
    pub fn as_i64(self) -> i64 {
        match self {
            DogCategory::Unclassified => 0,
            DogCategory::Category1 => 1,
            DogCategory::Category2 => 2,
        }
    }

    pub fn from_i64(value: i64) -> Self {
        match value {
            1 => DogCategory::Category1,
            2 => DogCategory::Category2,
            _ => DogCategory::Unclassified,
        }
    }
}

/// Where an animal currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LocationType {
    Box,
    Vet,
    FosterFamily,
    #[default]
    Other,
}

impl LocationType {
    pub fn as_i64(self) -> i64 {
        match self {
            LocationType::Box => 0,
            LocationType::Vet => 1,
            LocationType::FosterFamily => 2,
            LocationType::Other => 3,
        }
    }

    pub fn from_i64(value: i64) -> Self {
        match value {
            0 => LocationType::Box,
            1 => LocationType::Vet,
            2 => LocationType::FosterFamily,
            _ => LocationType::Other,
        }
    }
}

impl std::fmt::Display for LocationType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LocationType::Box => write!(f, "box"),
            LocationType::Vet => write!(f, "vet"),
            LocationType::FosterFamily => write!(f, "foster family"),
            LocationType::Other => write!(f, "other"),
        }
    }
}

impl std::str::FromStr for LocationType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace(['-', '_', ' '], "").as_str() {
            "box" => Ok(LocationType::Box),
            "vet" => Ok(LocationType::Vet),
            "fosterfamily" | "foster" => Ok(LocationType::FosterFamily),
            "other" => Ok(LocationType::Other),
            _ => Err(format!("unknown location type: {s}")),
        }
    }
}

// ── Label types ─────────────────────────────────────────────────────────────

/// An enumerable entity made of a label and a description.
pub trait LabelType: Identified + Default {
    fn label(&self) -> &str;
    fn description(&self) -> &str;
    fn with_label(label: impl Into<String>, description: impl Into<String>) -> Self;
}

macro_rules! label_type {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq)]
        pub struct $name {
            pub id: Id,
            pub label: String,
            pub description: String,
        }

        impl Default for $name {
            fn default() -> Self {
                Self {
                    id: UNSET_ID,
                    label: String::new(),
                    description: String::new(),
                }
            }
        }

        impl $name {
            pub fn new(label: impl Into<String>, description: impl Into<String>) -> Self {
                Self {
                    label: label.into(),
                    description: description.into(),
                    ..Self::default()
                }
            }
        }

        impl LabelType for $name {
            fn label(&self) -> &str {
                &self.label
            }

            fn description(&self) -> &str {
                &self.description
            }

            fn with_label(label: impl Into<String>, description: impl Into<String>) -> Self {
                Self::new(label, description)
            }
        }

        impl_identified!($name);
    };
}

label_type!(
    /// Shelter status of an animal ("available for adoption", "adopted", ...).
    State
);
label_type!(
    /// A kind of food.
    Food
);
label_type!(
    /// A way of serving food, in terms of quantity.
    Bowl
);

// ── Animal ──────────────────────────────────────────────────────────────────

/// Dog-only attributes, stored in the `dog` table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DogTraits {
    /// Whether the dog can live with cats.
    pub ok_cats: bool,
    pub category: DogCategory,
}

/// Cat-only attributes, stored in the `cat` table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CatTraits {
    /// Diagnosed with feline immunodeficiency virus.
    pub has_fiv: bool,
    /// Diagnosed with feline leukemia virus.
    pub has_felv: bool,
}

/// Species of an animal, with the attributes that only that species has.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Species {
    Dog(DogTraits),
    Cat(CatTraits),
    /// Only the generic `animal` row exists.
    #[default]
    Unspecified,
}

impl Species {
    pub fn name(&self) -> &'static str {
        match self {
            Species::Dog(_) => "dog",
            Species::Cat(_) => "cat",
            Species::Unspecified => "animal",
        }
    }

    pub fn is_dog(&self) -> bool {
        matches!(self, Species::Dog(_))
    }

    pub fn is_cat(&self) -> bool {
        matches!(self, Species::Cat(_))
    }
}

/// A sheltered animal.
#[derive(Debug, Clone, PartialEq)]
pub struct Animal {
    pub id: Id,
    pub species: Species,
    pub name: String,
    pub birth_date: NaiveDate,
    pub arrival_date: NaiveDate,
    /// Sheet recording the animal's arrival.
    pub arrival_sheet: Link<Sheet>,
    /// Most recent sheet recorded for the animal.
    pub latest_sheet: Link<Sheet>,
    pub gender: Gender,
    pub breed: String,
    pub character: String,
    pub color: String,
    /// Stored paths of the animal's pictures, in display order.
    pub pictures: Vec<String>,
    /// Microchip number.
    pub implant: String,
    pub neutered: bool,
    pub history: String,
    pub food_habit: Link<FoodHabit>,
}

impl Default for Animal {
    fn default() -> Self {
        Self {
            id: UNSET_ID,
            species: Species::Unspecified,
            name: String::new(),
            birth_date: today(),
            arrival_date: today(),
            arrival_sheet: Link::Unset,
            latest_sheet: Link::Unset,
            gender: Gender::Unknown,
            breed: String::new(),
            character: String::new(),
            color: String::new(),
            pictures: Vec::new(),
            implant: String::new(),
            neutered: false,
            history: String::new(),
            food_habit: Link::Unset,
        }
    }
}

impl Animal {
    /// A generic animal with no species row.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn dog(name: impl Into<String>) -> Self {
        Self {
            species: Species::Dog(DogTraits::default()),
            ..Self::new(name)
        }
    }

    pub fn cat(name: impl Into<String>) -> Self {
        Self {
            species: Species::Cat(CatTraits::default()),
            ..Self::new(name)
        }
    }

    pub fn dog_traits(&self) -> Option<&DogTraits> {
        match &self.species {
            Species::Dog(traits) => Some(traits),
            _ => None,
        }
    }

    pub fn dog_traits_mut(&mut self) -> Option<&mut DogTraits> {
        match &mut self.species {
            Species::Dog(traits) => Some(traits),
            _ => None,
        }
    }

    pub fn cat_traits(&self) -> Option<&CatTraits> {
        match &self.species {
            Species::Cat(traits) => Some(traits),
            _ => None,
        }
    }

    pub fn cat_traits_mut(&mut self) -> Option<&mut CatTraits> {
        match &mut self.species {
            Species::Cat(traits) => Some(traits),
            _ => None,
        }
    }

    /// Age in whole years on the given date. Zero if born after `on`.
    pub fn age_on(&self, on: NaiveDate) -> u32 {
        let mut years = on.year() - self.birth_date.year();
        if (on.month(), on.day()) < (self.birth_date.month(), self.birth_date.day()) {
            years -= 1;
        }
        years.max(0) as u32
    }

    pub fn age(&self) -> u32 {
        self.age_on(today())
    }
}

// ── Care ────────────────────────────────────────────────────────────────────

/// A reusable treatment definition.
#[derive(Debug, Clone, PartialEq)]
pub struct Care {
    pub id: Id,
    pub care_type: String,
    /// Dosage, if this is a medicine.
    pub dose: String,
    /// How the care is administered.
    pub way: String,
    pub medecine_name: String,
    pub description: String,
}

impl Default for Care {
    fn default() -> Self {
        Self {
            id: UNSET_ID,
            care_type: String::new(),
            dose: String::new(),
            way: String::new(),
            medecine_name: String::new(),
            description: String::new(),
        }
    }
}

/// A care given to one animal at a given date.
#[derive(Debug, Clone, PartialEq)]
pub struct CareSheet {
    pub id: Id,
    pub animal: Link<Box<Animal>>,
    pub care: Link<Care>,
    pub date: NaiveDate,
    pub time: NaiveTime,
    /// How often the care must be given.
    pub frequency: String,
    /// Person who administered the care. Never resolved by the storage layer.
    pub given_by: Link<Person>,
    pub prescription_number: String,
    /// Dose administered to the animal.
    pub dosage: String,
}

impl Default for CareSheet {
    fn default() -> Self {
        Self {
            id: UNSET_ID,
            animal: Link::Unset,
            care: Link::Unset,
            date: today(),
            time: NaiveTime::MIN,
            frequency: String::new(),
            given_by: Link::Unset,
            prescription_number: String::new(),
            dosage: String::new(),
        }
    }
}

// ── Food ────────────────────────────────────────────────────────────────────

/// How an animal is used to being fed. Either half may be absent.
#[derive(Debug, Clone, PartialEq)]
pub struct FoodHabit {
    pub id: Id,
    pub food: Link<Food>,
    pub bowl: Link<Bowl>,
}

impl Default for FoodHabit {
    fn default() -> Self {
        Self {
            id: UNSET_ID,
            food: Link::Unset,
            bowl: Link::Unset,
        }
    }
}

// ── Location ────────────────────────────────────────────────────────────────

/// Where an animal is. `shelter_box` is relevant for `LocationType::Box`,
/// `person` for vets and foster families.
#[derive(Debug, Clone, PartialEq)]
pub struct Location {
    pub id: Id,
    pub location_type: LocationType,
    pub shelter_box: Link<ShelterBox>,
    pub person: Link<Person>,
}

impl Default for Location {
    fn default() -> Self {
        Self {
            id: UNSET_ID,
            location_type: LocationType::Other,
            shelter_box: Link::Unset,
            person: Link::Unset,
        }
    }
}

/// A physical enclosure in the shelter.
#[derive(Debug, Clone, PartialEq)]
pub struct ShelterBox {
    pub id: Id,
    pub label: String,
    pub description: String,
    /// Surface area in square meters.
    pub surface_area: i64,
    pub position: String,
    pub condition: String,
    pub particularity: String,
}

impl Default for ShelterBox {
    fn default() -> Self {
        Self {
            id: UNSET_ID,
            label: String::new(),
            description: String::new(),
            surface_area: 0,
            position: String::new(),
            condition: String::new(),
            particularity: String::new(),
        }
    }
}

/// Square meters required per dog.
pub const DOG_AREA_PER_ANIMAL: i64 = 3;
/// Square meters required per cat.
pub const CAT_AREA_PER_ANIMAL: i64 = 2;

impl ShelterBox {
    pub fn new(label: impl Into<String>, surface_area: i64) -> Self {
        Self {
            label: label.into(),
            surface_area,
            ..Self::default()
        }
    }

    /// How many animals of the given species fit in the box.
    pub fn capacity(&self, species: &Species) -> u32 {
        let per_animal = match species {
            Species::Cat(_) => CAT_AREA_PER_ANIMAL,
            Species::Dog(_) | Species::Unspecified => DOG_AREA_PER_ANIMAL,
        };
        u32::try_from(self.surface_area.max(0) / per_animal).unwrap_or(u32::MAX)
    }
}

// ── Sheet ───────────────────────────────────────────────────────────────────

/// A state or location change for an animal.
#[derive(Debug, Clone, PartialEq)]
pub struct Sheet {
    pub id: Id,
    pub date: NaiveDate,
    pub animal: Link<Box<Animal>>,
    pub state: Link<State>,
    pub location: Link<Location>,
}

impl Default for Sheet {
    fn default() -> Self {
        Self {
            id: UNSET_ID,
            date: today(),
            animal: Link::Unset,
            state: Link::Unset,
            location: Link::Unset,
        }
    }
}

impl Sheet {
    /// A new sheet for the given animal, keeping the animal attached.
    pub fn for_animal(animal: Animal) -> Self {
        Self {
            animal: Link::Resolved(Box::new(animal)),
            ..Self::default()
        }
    }
}

// ── Person ──────────────────────────────────────────────────────────────────

/// Postal address of a person.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Address {
    pub street: String,
    pub postal_code: String,
    pub city: String,
    pub country: String,
}

/// Someone outside the shelter staff: adopter, vet, foster family.
///
/// Persons come from a person-provider plugin, never from the shelter
/// database itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Person {
    pub id: Id,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: Address,
}

impl Default for Person {
    fn default() -> Self {
        Self {
            id: UNSET_ID,
            name: String::new(),
            email: String::new(),
            phone: String::new(),
            address: Address::default(),
        }
    }
}

impl_identified!(Animal, Care, CareSheet, FoodHabit, Location, ShelterBox, Sheet, Person);
