use super::{RunOptions, log_start};
use crate::settings::{ProfileMode, Settings, default_output};
use crate::types::OutputFormat;
use anyhow::{Context, Result};
use serde::Serialize;
use std::path::Path;

/// Run a named subsystem profile. The report always goes to a file: the
/// `--output` override, the profile's `output`, or `<name>_result.csv`.
pub fn run(
    settings: &Settings,
    name: &str,
    output_override: Option<&Path>,
    options: &RunOptions,
) -> Result<()> {
    let profile = settings.profile(name)?;
    let mode = profile
        .mode()
        .with_context(|| format!("Invalid profile '{}'", name))?;

    log_start(name);

    let config = settings.resolve(&profile.config);
    let log = settings.resolve(&profile.log);
    let output = match (output_override, &profile.output) {
        (Some(path), _) => path.to_path_buf(),
        (None, Some(path)) => settings.resolve(path),
        (None, None) => default_output(name),
    };

    match mode {
        ProfileMode::Range { expected } => super::range::run(
            &config,
            &settings.resolve(expected),
            &log,
            Some(&output),
            options,
        ),
        ProfileMode::Reference { reference } => super::reference::run(
            &config,
            &log,
            &settings.resolve(reference),
            settings.marker_pattern(),
            Some(&output),
            options,
        ),
    }
}

#[derive(Serialize)]
struct ProfileSummary<'a> {
    name: &'a str,
    mode: &'a str,
    config: String,
    log: String,
}

pub fn list(settings: &Settings, options: &RunOptions) -> Result<()> {
    let summaries: Vec<ProfileSummary<'_>> = settings
        .profiles
        .iter()
        .map(|(name, profile)| ProfileSummary {
            name,
            mode: match profile.mode() {
                Ok(ProfileMode::Range { .. }) => "range",
                Ok(ProfileMode::Reference { .. }) => "reference",
                Err(_) => "invalid",
            },
            config: settings.resolve(&profile.config).display().to_string(),
            log: settings.resolve(&profile.log).display().to_string(),
        })
        .collect();

    match options.format {
        OutputFormat::Json => {
            let json = serde_json::json!({ "content": { "profiles": summaries } });
            println!("{}", serde_json::to_string_pretty(&json)?);
        }
        OutputFormat::Plain | OutputFormat::Csv => {
            if summaries.is_empty() {
                println!("No profiles configured.");
            }
            for summary in &summaries {
                println!(
                    "{:<12} {:<10} config={} log={}",
                    summary.name, summary.mode, summary.config, summary.log
                );
            }
        }
    }

    Ok(())
}
