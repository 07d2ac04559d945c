use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use ossaca_model::Care;

use crate::cli_types::{CareAction, CareFields};
use crate::CliError;

use super::{or_dash, truncate_str, AppContext};

fn apply_fields(care: &mut Care, fields: CareFields) {
    if let Some(dose) = fields.dose {
        care.dose = dose;
    }
    if let Some(way) = fields.way {
        care.way = way;
    }
    if let Some(medecine) = fields.medecine {
        care.medecine_name = medecine;
    }
    if let Some(description) = fields.description {
        care.description = description;
    }
}

pub(crate) fn run_cares(ctx: &AppContext, action: CareAction) -> Result<(), CliError> {
    let storage = ctx.open_storage()?;
    match action {
        CareAction::List => {
            let cares = storage.cares()?;
            if cares.is_empty() {
                log::info!("No cares recorded.");
                return Ok(());
            }
            log::info!(
                "{}",
                format!(
                    "{:>5}  {:<16} {:<10} {:<12} {:<16} {}",
                    "ID", "Type", "Dose", "Way", "Medecine", "Description"
                )
                .if_supports_color(Stdout, |t| t.bold()),
            );
            for care in &cares {
                log::info!(
                    "{:>5}  {:<16} {:<10} {:<12} {:<16} {}",
                    care.id,
                    truncate_str(&care.care_type, 16),
                    truncate_str(or_dash(&care.dose), 10),
                    truncate_str(or_dash(&care.way), 12),
                    truncate_str(or_dash(&care.medecine_name), 16),
                    care.description,
                );
            }
        }
        CareAction::Add { care_type, fields } => {
            let mut care = Care {
                care_type,
                ..Care::default()
            };
            apply_fields(&mut care, fields);
            let id = storage.add(&mut care)?;
            log::info!("Added care '{}' with id {id}", care.care_type);
        }
        CareAction::Update {
            id,
            care_type,
            fields,
        } => {
            let mut care = storage
                .care_by_id(id)?
                .ok_or_else(|| CliError::not_found("care", id))?;
            if let Some(care_type) = care_type {
                care.care_type = care_type;
            }
            apply_fields(&mut care, fields);
            storage.update(&care)?;
            log::info!("Updated care {id}");
        }
        CareAction::Delete { id } => {
            let mut care = storage
                .care_by_id(id)?
                .ok_or_else(|| CliError::not_found("care", id))?;
            storage.delete(&mut care)?;
            log::info!("Deleted care {id}");
        }
    }
    Ok(())
}
