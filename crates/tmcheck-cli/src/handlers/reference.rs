use super::{RunOptions, emit, log_start};
use anyhow::Result;
use std::path::Path;
use tmcheck_engine::{MarkerPattern, assemble, validate_against_reference};
use tmcheck_types::{LogDocument, Mode, TelemetryConfig};

pub fn handle(
    config_path: &Path,
    log_path: &Path,
    reference_path: &Path,
    marker: MarkerPattern,
    output: Option<&Path>,
    options: &RunOptions,
) -> Result<()> {
    log_start("reference");
    run(config_path, log_path, reference_path, marker, output, options)
}

pub(super) fn run(
    config_path: &Path,
    log_path: &Path,
    reference_path: &Path,
    marker: MarkerPattern,
    output: Option<&Path>,
    options: &RunOptions,
) -> Result<()> {
    let config = TelemetryConfig::load_from(config_path)?;
    let log = LogDocument::load_from(log_path)?;
    let reference = LogDocument::load_from(reference_path)?;
    tracing::debug!(
        tm_ids = config.len(),
        log_lines = log.line_count(),
        reference_lines = reference.line_count(),
        marker = marker.marker(),
        "inputs loaded"
    );

    let records = validate_against_reference(&config, &log, reference, marker);
    let report = assemble(Mode::Reference, &records);
    emit(&report, &records, output, options)
}
