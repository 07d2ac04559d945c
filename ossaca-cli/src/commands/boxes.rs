use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use ossaca_model::{CatTraits, DogTraits, ShelterBox, Species};

use crate::cli_types::BoxAction;
use crate::CliError;

use super::{or_dash, truncate_str, AppContext};

pub(crate) fn run_boxes(ctx: &AppContext, action: BoxAction) -> Result<(), CliError> {
    let storage = ctx.open_storage()?;
    match action {
        BoxAction::List => {
            let boxes = storage.boxes()?;
            if boxes.is_empty() {
                log::info!("No boxes recorded.");
                return Ok(());
            }
            let dog = Species::Dog(DogTraits::default());
            let cat = Species::Cat(CatTraits::default());

            log::info!(
                "{}",
                format!(
                    "{:>5}  {:<16} {:>6} {:>5} {:>5}  {:<20} {}",
                    "ID", "Label", "m\u{b2}", "Dogs", "Cats", "Position", "Condition"
                )
                .if_supports_color(Stdout, |t| t.bold()),
            );
            for shelter_box in &boxes {
                log::info!(
                    "{:>5}  {:<16} {:>6} {:>5} {:>5}  {:<20} {}",
                    shelter_box.id,
                    truncate_str(&shelter_box.label, 16),
                    shelter_box.surface_area,
                    shelter_box.capacity(&dog),
                    shelter_box.capacity(&cat),
                    truncate_str(or_dash(&shelter_box.position), 20),
                    or_dash(&shelter_box.condition),
                );
            }
        }
        BoxAction::Add {
            label,
            surface,
            description,
            position,
            condition,
            particularity,
        } => {
            if surface < 0 {
                return Err(CliError::other("surface can't be negative"));
            }
            let mut shelter_box = ShelterBox {
                description,
                position,
                condition,
                particularity,
                ..ShelterBox::new(label, surface)
            };
            let id = storage.add(&mut shelter_box)?;
            log::info!(
                "Added box '{}' with id {id} (room for {} dogs or {} cats)",
                shelter_box.label,
                shelter_box.capacity(&Species::Dog(DogTraits::default())),
                shelter_box.capacity(&Species::Cat(CatTraits::default())),
            );
        }
        BoxAction::Delete { id } => {
            let mut shelter_box = storage
                .box_by_id(id)?
                .ok_or_else(|| CliError::not_found("box", id))?;
            storage.delete(&mut shelter_box)?;
            log::info!("Deleted box {id}");
        }
    }
    Ok(())
}
