use super::args::{Cli, Commands, ProfileCommand};
use super::handlers::{self, RunOptions};
use crate::logging;
use crate::settings::{Settings, resolve_settings_path};
use anyhow::Result;
use std::path::Path;
use tmcheck_engine::MarkerPattern;

pub fn run(cli: Cli) -> Result<()> {
    logging::init(cli.log_level);

    let options = RunOptions::new(cli.format);
    let settings_arg = cli.settings.as_deref();

    match cli.command {
        Commands::Range {
            config,
            expected,
            log,
            output,
        } => handlers::range::handle(&config, &expected, &log, output.as_deref(), &options),

        Commands::Reference {
            config,
            log,
            reference,
            marker,
            output,
        } => {
            let marker = match marker {
                Some(marker) => MarkerPattern::new(marker),
                None => load_settings(settings_arg)?.marker_pattern(),
            };
            handlers::reference::handle(
                &config,
                &log,
                &reference,
                marker,
                output.as_deref(),
                &options,
            )
        }

        Commands::Run { profile, output } => {
            let settings = load_settings(settings_arg)?;
            handlers::profile::run(&settings, &profile, output.as_deref(), &options)
        }

        Commands::Profile { command } => match command {
            ProfileCommand::List => handlers::profile::list(&load_settings(settings_arg)?, &options),
        },
    }
}

// Only commands that read profiles or the marker touch the settings file
fn load_settings(explicit: Option<&Path>) -> Result<Settings> {
    let path = resolve_settings_path(explicit);
    let settings = Settings::load_from(&path)?;
    tracing::debug!(
        path = %path.display(),
        profiles = settings.profiles.len(),
        "loaded settings"
    );
    Ok(settings)
}
