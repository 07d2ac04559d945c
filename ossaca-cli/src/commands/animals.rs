use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use ossaca_db::Storage;
use ossaca_model::format::format_date;
use ossaca_model::{Animal, DogCategory, Id, Link, Species};

use crate::cli_types::{AnimalAction, AnimalFields};
use crate::upload::upload_images;
use crate::CliError;

use super::{link_arg, or_dash, truncate_str, AppContext};

/// Which species table a command works on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SpeciesKind {
    Dog,
    Cat,
}

impl SpeciesKind {
    fn name(self) -> &'static str {
        match self {
            SpeciesKind::Dog => "dog",
            SpeciesKind::Cat => "cat",
        }
    }

    fn new_animal(self, name: String) -> Animal {
        match self {
            SpeciesKind::Dog => Animal::dog(name),
            SpeciesKind::Cat => Animal::cat(name),
        }
    }

    fn all(self, storage: &Storage) -> Result<Vec<Animal>, CliError> {
        Ok(match self {
            SpeciesKind::Dog => storage.dogs()?,
            SpeciesKind::Cat => storage.cats()?,
        })
    }

    fn by_id(self, storage: &Storage, id: Id) -> Result<Animal, CliError> {
        let found = match self {
            SpeciesKind::Dog => storage.dog_by_id(id)?,
            SpeciesKind::Cat => storage.cat_by_id(id)?,
        };
        found.ok_or_else(|| CliError::not_found(self.name(), id))
    }
}

pub(crate) fn run_animals(
    ctx: &AppContext,
    kind: SpeciesKind,
    action: AnimalAction,
) -> Result<(), CliError> {
    let storage = ctx.open_storage()?;
    match action {
        AnimalAction::List => run_list(&storage, kind),
        AnimalAction::Show { id } => run_show(&storage, kind, id),
        AnimalAction::Add { name, fields } => {
            let mut animal = kind.new_animal(name);
            apply_fields(&mut animal, &fields);
            let id = storage.add(&mut animal)?;
            attach_pictures(ctx, &storage, &mut animal, &fields)?;
            log::info!(
                "{} Added {} '{}' with id {}",
                "\u{2714}".if_supports_color(Stdout, |t| t.green()),
                kind.name(),
                animal.name,
                id,
            );
            Ok(())
        }
        AnimalAction::Update { id, name, fields } => {
            let mut animal = kind.by_id(&storage, id)?;
            if let Some(name) = name {
                animal.name = name;
            }
            apply_fields(&mut animal, &fields);
            storage.update(&animal)?;
            attach_pictures(ctx, &storage, &mut animal, &fields)?;
            log::info!(
                "{} Updated {} {}",
                "\u{2714}".if_supports_color(Stdout, |t| t.green()),
                kind.name(),
                id,
            );
            Ok(())
        }
        AnimalAction::Delete { id } => {
            let mut animal = kind.by_id(&storage, id)?;
            storage.delete(&mut animal)?;
            log::info!("Deleted {} {} ({})", kind.name(), id, animal.name);
            Ok(())
        }
    }
}

fn apply_fields(animal: &mut Animal, fields: &AnimalFields) {
    if let Some(date) = fields.birth_date {
        animal.birth_date = date;
    }
    if let Some(date) = fields.arrival_date {
        animal.arrival_date = date;
    }
    if let Some(gender) = fields.gender {
        animal.gender = gender;
    }
    if let Some(breed) = &fields.breed {
        animal.breed = breed.clone();
    }
    if let Some(character) = &fields.character {
        animal.character = character.clone();
    }
    if let Some(color) = &fields.color {
        animal.color = color.clone();
    }
    if let Some(implant) = &fields.implant {
        animal.implant = implant.clone();
    }
    if let Some(neutered) = fields.neutered {
        animal.neutered = neutered;
    }
    if let Some(history) = &fields.history {
        animal.history = history.clone();
    }
    if let Some(food_habit) = fields.food_habit {
        animal.food_habit = link_arg(Some(food_habit));
    }

    match &mut animal.species {
        Species::Dog(traits) => {
            if let Some(ok_cats) = fields.ok_cats {
                traits.ok_cats = ok_cats;
            }
            if let Some(category) = fields.category {
                traits.category = DogCategory::from_i64(category);
            }
            if fields.fiv.is_some() || fields.felv.is_some() {
                log::warn!("--fiv and --felv only apply to cats, ignored");
            }
        }
        Species::Cat(traits) => {
            if let Some(fiv) = fields.fiv {
                traits.has_fiv = fiv;
            }
            if let Some(felv) = fields.felv {
                traits.has_felv = felv;
            }
            if fields.ok_cats.is_some() || fields.category.is_some() {
                log::warn!("--ok-cats and --category only apply to dogs, ignored");
            }
        }
        Species::Unspecified => {}
    }
}

/// Upload any `--picture` files and store their paths on the animal.
fn attach_pictures(
    ctx: &AppContext,
    storage: &Storage,
    animal: &mut Animal,
    fields: &AnimalFields,
) -> Result<(), CliError> {
    if fields.pictures.is_empty() {
        return Ok(());
    }
    let stored = upload_images(&ctx.uploads, animal, &fields.pictures)?;
    log::info!("Uploaded {} picture(s) to {}", stored.len(), ctx.uploads.display());
    animal.pictures.extend(stored);
    storage.update(animal)?;
    Ok(())
}

fn latest_state(animal: &Animal) -> &str {
    animal
        .latest_sheet
        .get()
        .and_then(|sheet| sheet.state.get())
        .map_or("-", |state| state.label.as_str())
}

fn run_list(storage: &Storage, kind: SpeciesKind) -> Result<(), CliError> {
    let animals = kind.all(storage)?;
    if animals.is_empty() {
        log::info!("No {}s recorded.", kind.name());
        return Ok(());
    }

    log::info!(
        "{}",
        format!("{:>5}  {:<20} {:<8} {:>4}  {:<20} {}", "ID", "Name", "Gender", "Age", "Breed", "State")
            .if_supports_color(Stdout, |t| t.bold()),
    );
    for animal in &animals {
        log::info!(
            "{:>5}  {:<20} {:<8} {:>4}  {:<20} {}",
            animal.id,
            truncate_str(&animal.name, 20),
            animal.gender.to_string(),
            animal.age(),
            truncate_str(&animal.breed, 20),
            latest_state(animal).if_supports_color(Stdout, |t| t.cyan()),
        );
    }
    crate::log_blank();
    log::info!("{} {}(s)", animals.len(), kind.name());
    Ok(())
}

fn run_show(storage: &Storage, kind: SpeciesKind, id: Id) -> Result<(), CliError> {
    let animal = kind.by_id(storage, id)?;

    log::info!(
        "{} {}",
        animal.name.if_supports_color(Stdout, |t| t.bold()),
        format!("({} #{})", kind.name(), animal.id).if_supports_color(Stdout, |t| t.dimmed()),
    );
    log::info!("  Born:       {} ({} years)", format_date(animal.birth_date), animal.age());
    log::info!("  Arrived:    {}", format_date(animal.arrival_date));
    log::info!("  Gender:     {}", animal.gender);
    log::info!("  Breed:      {}", or_dash(&animal.breed));
    log::info!("  Color:      {}", or_dash(&animal.color));
    log::info!("  Character:  {}", or_dash(&animal.character));
    log::info!("  Implant:    {}", or_dash(&animal.implant));
    log::info!("  Neutered:   {}", if animal.neutered { "yes" } else { "no" });
    log::info!("  History:    {}", or_dash(&animal.history));

    match &animal.species {
        Species::Dog(traits) => {
            log::info!("  Cats OK:    {}", if traits.ok_cats { "yes" } else { "no" });
            log::info!("  Category:   {}", traits.category.as_i64());
        }
        Species::Cat(traits) => {
            log::info!("  FIV:        {}", if traits.has_fiv { "positive" } else { "negative" });
            log::info!("  FeLV:       {}", if traits.has_felv { "positive" } else { "negative" });
        }
        Species::Unspecified => {}
    }

    if let Some(habit) = animal.food_habit.get() {
        let food = habit.food.get().map_or("-", |f| f.label.as_str());
        let bowl = habit.bowl.get().map_or("-", |b| b.label.as_str());
        log::info!("  Food:       {} in {}", food, bowl);
    }

    for (label, link) in [("Arrival", &animal.arrival_sheet), ("Latest", &animal.latest_sheet)] {
        if let Link::Resolved(sheet) = link {
            let state = sheet.state.get().map_or("-", |s| s.label.as_str());
            let location = sheet
                .location
                .get()
                .map_or("-".to_string(), |l| l.location_type.to_string());
            log::info!(
                "  {:<11} {} sheet #{} {} at {}",
                format!("{label}:"),
                format_date(sheet.date),
                sheet.id,
                state.if_supports_color(Stdout, |t| t.cyan()),
                location,
            );
        }
    }

    if !animal.pictures.is_empty() {
        log::info!("  Pictures:");
        for picture in &animal.pictures {
            log::info!("    {picture}");
        }
    }

    let cares = storage.care_sheets_by_animal_id(animal.id)?;
    if !cares.is_empty() {
        crate::log_blank();
        log::info!("{}", "Cares".if_supports_color(Stdout, |t| t.bold()));
        for sheet in &cares {
            let care = sheet.care.get().map_or("-", |c| c.care_type.as_str());
            log::info!(
                "  {} {}  {}  {}",
                format_date(sheet.date),
                sheet.time.format("%H:%M"),
                care,
                or_dash(&sheet.dosage),
            );
        }
    }
    Ok(())
}
