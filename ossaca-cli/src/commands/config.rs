use std::path::Path;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use crate::cli_types::ConfigAction;
use crate::settings::{settings_path, PathSource};
use crate::CliError;

use super::AppContext;

pub(crate) fn run_config(ctx: &AppContext, action: ConfigAction) -> Result<(), CliError> {
    match action {
        ConfigAction::Show => run_config_show(ctx),
        ConfigAction::Path => {
            log::info!("{}", settings_path().display());
            Ok(())
        }
    }
}

fn log_path(label: &str, path: &Path, source: PathSource) {
    let status = if path.exists() { "(exists)" } else { "(not found)" };
    log::info!(
        "  {:<14} {} {} {}",
        label,
        path.display().if_supports_color(Stdout, |t| t.cyan()),
        status.if_supports_color(Stdout, |t| t.dimmed()),
        format!("[{source}]").if_supports_color(Stdout, |t| t.dimmed()),
    );
}

/// Show the resolved paths and where each one came from.
fn run_config_show(ctx: &AppContext) -> Result<(), CliError> {
    log::info!(
        "{}",
        "ossaca Configuration".if_supports_color(Stdout, |t| t.bold()),
    );
    crate::log_blank();

    let settings = settings_path();
    if settings.exists() {
        log::info!(
            "  Settings file: {} {}",
            settings.display().if_supports_color(Stdout, |t| t.cyan()),
            "(exists)".if_supports_color(Stdout, |t| t.green()),
        );
    } else {
        log::info!(
            "  Settings file: {} {}",
            settings.display().if_supports_color(Stdout, |t| t.cyan()),
            "(not found)".if_supports_color(Stdout, |t| t.dimmed()),
        );
    }
    crate::log_blank();

    log_path("Database:", &ctx.database, ctx.database_source);
    log_path("Uploads:", &ctx.uploads, ctx.uploads_source);
    Ok(())
}
