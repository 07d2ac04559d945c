use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use ossaca_db::Storage;
use ossaca_model::{Link, Person};
use ossaca_plugin::{PluginHost, PluginKind, PluginState};

use crate::cli_types::PluginAction;
use crate::CliError;

use super::{or_dash, AppContext};

/// Attach and load the bundled plugins against this database.
pub(crate) fn load_plugins(storage: &Storage) -> Result<PluginHost, CliError> {
    let mut host = PluginHost::with_bundled();
    host.load_all(storage)?;
    Ok(host)
}

/// A person link as shown in listings: the name when the directory knows
/// it, the id otherwise.
pub(crate) fn person_label(host: &PluginHost, link: &Link<Person>) -> String {
    let mut link = link.clone();
    if let Err(e) = host.resolve_person(&mut link) {
        log::warn!("Couldn't look up person: {e}");
    }
    match link {
        Link::Resolved(person) => person.name,
        Link::Id(id) => format!("#{id}"),
        Link::Unset => "-".to_string(),
    }
}

pub(crate) fn run_plugins(ctx: &AppContext, action: PluginAction) -> Result<(), CliError> {
    let storage = ctx.open_storage()?;
    let mut host = load_plugins(&storage)?;
    let result = match action {
        PluginAction::List => run_list(&storage, &host),
        PluginAction::Persons => run_persons(&host),
    };
    host.destroy_all();
    result
}

fn run_list(storage: &Storage, host: &PluginHost) -> Result<(), CliError> {
    let registered = storage.registered_plugins()?;

    for plugin in host.plugins() {
        let state = match plugin.state() {
            PluginState::Loaded => plugin.state().to_string().if_supports_color(Stdout, |t| t.green()).to_string(),
            PluginState::Failed => plugin.state().to_string().if_supports_color(Stdout, |t| t.red()).to_string(),
            _ => plugin.state().to_string(),
        };
        log::info!(
            "{} ({}) {}",
            plugin.name().if_supports_color(Stdout, |t| t.bold()),
            plugin.kind(),
            state,
        );
        if let Some(reason) = plugin.failure() {
            log::info!("  {}", reason.if_supports_color(Stdout, |t| t.red()));
        }
        if let Some(row) = registered.iter().find(|r| r.name == plugin.name()) {
            log::info!(
                "  Registered: {} as {}",
                row.registered_at,
                PluginKind::from_i64(row.kind)
            );
        }
        for (key, value) in storage.plugin_config_entries(plugin.name())? {
            log::info!("  {key} = {}", value.if_supports_color(Stdout, |t| t.cyan()));
        }
    }
    Ok(())
}

fn run_persons(host: &PluginHost) -> Result<(), CliError> {
    let Some(provider) = host.person_provider() else {
        log::warn!("No person directory plugin is loaded");
        return Ok(());
    };
    let persons = provider.get_all_persons()?;
    if persons.is_empty() {
        log::info!("The person directory is empty.");
        return Ok(());
    }
    for person in &persons {
        log::info!(
            "{:>5}  {}  {}  {}  {} {}",
            person.id,
            person.name.if_supports_color(Stdout, |t| t.bold()),
            or_dash(&person.email),
            or_dash(&person.phone),
            person.address.postal_code,
            person.address.city,
        );
    }
    Ok(())
}
