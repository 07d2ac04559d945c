use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use ossaca_model::{Location, LocationType};

use crate::cli_types::LocationAction;
use crate::CliError;

use super::plugins::{load_plugins, person_label};
use super::{link_arg, AppContext};

pub(crate) fn run_locations(ctx: &AppContext, action: LocationAction) -> Result<(), CliError> {
    let storage = ctx.open_storage()?;
    match action {
        LocationAction::List => {
            let locations = storage.locations()?;
            if locations.is_empty() {
                log::info!("No locations recorded.");
                return Ok(());
            }
            let mut host = load_plugins(&storage)?;
            for location in &locations {
                let shelter_box = location
                    .shelter_box
                    .get()
                    .map_or("-".to_string(), |b| format!("{} ({} m\u{b2})", b.label, b.surface_area));
                log::info!(
                    "{:>5}  {:<14} box: {}  person: {}",
                    location.id,
                    location
                        .location_type
                        .to_string()
                        .if_supports_color(Stdout, |t| t.cyan()),
                    shelter_box,
                    person_label(&host, &location.person),
                );
            }
            host.destroy_all();
        }
        LocationAction::Add {
            location_type,
            box_id,
            person,
        } => {
            if let Some(box_id) = box_id {
                if storage.box_by_id(box_id)?.is_none() {
                    return Err(CliError::not_found("box", box_id));
                }
            } else if location_type == LocationType::Box {
                log::warn!("Box location added without --box");
            }
            let mut location = Location {
                location_type,
                shelter_box: link_arg(box_id),
                person: link_arg(person),
                ..Location::default()
            };
            let id = storage.add(&mut location)?;
            log::info!("Added {} location with id {id}", location.location_type);
        }
    }
    Ok(())
}
