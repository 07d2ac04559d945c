//! ossaca CLI
//!
//! Command-line front end for the shelter database.

mod cli_types;
mod commands;
mod error;
mod settings;
mod upload;

use std::io::Write;

use clap::Parser;

use cli_types::{Cli, Commands};
use commands::AppContext;
use commands::animals::SpeciesKind;
pub(crate) use error::CliError;
use ossaca_model::{Bowl, Food, State};
use settings::Settings;

/// Log an empty line (used for visual separation in CLI output).
pub(crate) fn log_blank() {
    log::info!("");
}

fn init_logging(quiet: bool, verbose: bool) {
    let level = if verbose {
        "debug"
    } else if quiet {
        "warn"
    } else {
        "info"
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format(|buf, record| match record.level() {
            log::Level::Info => writeln!(buf, "{}", record.args()),
            level => writeln!(buf, "[{}] {}", level, record.args()),
        })
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.quiet, cli.verbose);

    let settings = Settings::load().unwrap_or_else(|e| {
        log::warn!("{e}; using default settings");
        Settings::default()
    });
    let ctx = AppContext::new(&settings, cli.database, cli.uploads);

    let result = match cli.command {
        Commands::Dogs { action } => commands::animals::run_animals(&ctx, SpeciesKind::Dog, action),
        Commands::Cats { action } => commands::animals::run_animals(&ctx, SpeciesKind::Cat, action),
        Commands::Cares { action } => commands::cares::run_cares(&ctx, action),
        Commands::States { action } => commands::labels::run_labels::<State>(&ctx, "state", action),
        Commands::Foods { action } => commands::labels::run_labels::<Food>(&ctx, "food", action),
        Commands::Bowls { action } => commands::labels::run_labels::<Bowl>(&ctx, "bowl", action),
        Commands::Boxes { action } => commands::boxes::run_boxes(&ctx, action),
        Commands::Locations { action } => commands::locations::run_locations(&ctx, action),
        Commands::Sheets { action } => commands::sheets::run_sheets(&ctx, action),
        Commands::Caresheets { action } => commands::caresheets::run_care_sheets(&ctx, action),
        Commands::Plugins { action } => commands::plugins::run_plugins(&ctx, action),
        Commands::Config { action } => commands::config::run_config(&ctx, action),
    };

    if let Err(e) = result {
        log::error!("{e}");
        std::process::exit(1);
    }
}
