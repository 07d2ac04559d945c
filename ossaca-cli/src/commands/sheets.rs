use chrono::Local;
use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use ossaca_model::format::format_date;
use ossaca_model::Sheet;

use crate::cli_types::SheetAction;
use crate::CliError;

use super::{link_arg, AppContext};

pub(crate) fn run_sheets(ctx: &AppContext, action: SheetAction) -> Result<(), CliError> {
    let storage = ctx.open_storage()?;
    match action {
        SheetAction::List { animal } => {
            let sheets = match animal {
                Some(id) => storage.sheets_by_animal_id(id)?,
                None => storage.sheets()?,
            };
            if sheets.is_empty() {
                log::info!("No sheets recorded.");
                return Ok(());
            }
            for sheet in &sheets {
                let animal = sheet
                    .animal
                    .get()
                    .map_or("-".to_string(), |a| format!("{} (#{})", a.name, a.id));
                let state = sheet.state.get().map_or("-", |s| s.label.as_str());
                let location = sheet
                    .location
                    .get()
                    .map_or("-".to_string(), |l| match l.shelter_box.get() {
                        Some(b) => format!("{} {}", l.location_type, b.label),
                        None => l.location_type.to_string(),
                    });
                log::info!(
                    "{:>5}  {}  {:<24} {:<16} {}",
                    sheet.id,
                    format_date(sheet.date),
                    animal,
                    state.if_supports_color(Stdout, |t| t.cyan()),
                    location,
                );
            }
        }
        SheetAction::Add {
            animal,
            state,
            location,
            date,
        } => {
            let owner = storage
                .simple_animal_by_id(animal)?
                .ok_or_else(|| CliError::not_found("animal", animal))?;
            if let Some(id) = state {
                storage
                    .state_by_id(id)?
                    .ok_or_else(|| CliError::not_found("state", id))?;
            }
            if let Some(id) = location {
                storage
                    .location_by_id(id)?
                    .ok_or_else(|| CliError::not_found("location", id))?;
            }

            let mut sheet = Sheet {
                date: date.unwrap_or_else(|| Local::now().date_naive()),
                state: link_arg(state),
                location: link_arg(location),
                ..Sheet::for_animal(owner)
            };
            let id = storage.add(&mut sheet)?;
            let name = sheet.animal.get().map_or("", |a| a.name.as_str());
            log::info!("Recorded sheet {id}; it is now {name}'s latest sheet");
        }
    }
    Ok(())
}
