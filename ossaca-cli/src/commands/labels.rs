use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use ossaca_db::{Mapped, Persist};
use ossaca_model::{Identified, LabelType};

use crate::cli_types::LabelAction;
use crate::CliError;

use super::{or_dash, AppContext};

/// States, foods and bowls share one set of commands.
pub(crate) fn run_labels<T>(ctx: &AppContext, kind: &str, action: LabelAction) -> Result<(), CliError>
where
    T: LabelType + Mapped + Persist,
{
    let storage = ctx.open_storage()?;
    match action {
        LabelAction::List => {
            let items: Vec<T> = storage.fetch_all()?;
            if items.is_empty() {
                log::info!("No {kind}s recorded.");
                return Ok(());
            }
            for item in &items {
                log::info!(
                    "{:>5}  {}  {}",
                    item.id(),
                    item.label().if_supports_color(Stdout, |t| t.bold()),
                    or_dash(item.description()).if_supports_color(Stdout, |t| t.dimmed()),
                );
            }
        }
        LabelAction::Add { label, description } => {
            let mut item = T::with_label(label, description);
            let id = storage.add(&mut item)?;
            log::info!("Added {kind} '{}' with id {id}", item.label());
        }
        LabelAction::Update {
            id,
            label,
            description,
        } => {
            let existing: T = storage
                .fetch_by_id(id)?
                .ok_or_else(|| CliError::not_found(kind, id))?;
            let mut updated = T::with_label(
                label.unwrap_or_else(|| existing.label().to_string()),
                description.unwrap_or_else(|| existing.description().to_string()),
            );
            updated.set_id(id);
            storage.update(&updated)?;
            log::info!("Updated {kind} {id}");
        }
        LabelAction::Delete { id } => {
            let mut item: T = storage
                .fetch_by_id(id)?
                .ok_or_else(|| CliError::not_found(kind, id))?;
            storage.delete(&mut item)?;
            log::info!("Deleted {kind} {id}");
        }
    }
    Ok(())
}
