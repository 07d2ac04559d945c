use chrono::{Local, NaiveTime};
use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use ossaca_model::format::{format_date, format_time};
use ossaca_model::{CareSheet, Link};

use crate::cli_types::CareSheetAction;
use crate::CliError;

use super::plugins::{load_plugins, person_label};
use super::{link_arg, or_dash, AppContext};

pub(crate) fn run_care_sheets(ctx: &AppContext, action: CareSheetAction) -> Result<(), CliError> {
    let storage = ctx.open_storage()?;
    match action {
        CareSheetAction::List { animal } => {
            let sheets = match animal {
                Some(id) => storage.care_sheets_by_animal_id(id)?,
                None => storage.care_sheets()?,
            };
            if sheets.is_empty() {
                log::info!("No care sheets recorded.");
                return Ok(());
            }
            let mut host = load_plugins(&storage)?;
            for sheet in &sheets {
                let animal = sheet.animal.get().map_or("-", |a| a.name.as_str());
                let care = sheet.care.get().map_or("-", |c| c.care_type.as_str());
                log::info!(
                    "{:>5}  {} {}  {:<16} {:<16} {}  by {}",
                    sheet.id,
                    format_date(sheet.date),
                    format_time(sheet.time),
                    animal.if_supports_color(Stdout, |t| t.bold()),
                    care.if_supports_color(Stdout, |t| t.cyan()),
                    or_dash(&sheet.dosage),
                    person_label(&host, &sheet.given_by),
                );
                if !sheet.frequency.is_empty() || !sheet.prescription_number.is_empty() {
                    log::info!(
                        "       {}  prescription {}",
                        or_dash(&sheet.frequency),
                        or_dash(&sheet.prescription_number),
                    );
                }
            }
            host.destroy_all();
        }
        CareSheetAction::Add {
            animal,
            care,
            date,
            time,
            frequency,
            given_by,
            prescription,
            dosage,
        } => {
            let owner = storage
                .simple_animal_by_id(animal)?
                .ok_or_else(|| CliError::not_found("animal", animal))?;
            let care = storage
                .care_by_id(care)?
                .ok_or_else(|| CliError::not_found("care", care))?;

            let mut sheet = CareSheet {
                animal: Link::Resolved(Box::new(owner)),
                care: Link::Resolved(care),
                date: date.unwrap_or_else(|| Local::now().date_naive()),
                time: time.unwrap_or(NaiveTime::MIN),
                frequency,
                given_by: link_arg(given_by),
                prescription_number: prescription,
                dosage,
                ..CareSheet::default()
            };
            let id = storage.add(&mut sheet)?;
            log::info!("Recorded care sheet {id}");
        }
    }
    Ok(())
}
