use super::{RunOptions, emit, log_start};
use anyhow::Result;
use std::path::Path;
use tmcheck_engine::{assemble, validate_ranges};
use tmcheck_types::{LogDocument, Mode, RangeSpec, TelemetryConfig};

pub fn handle(
    config_path: &Path,
    expected_path: &Path,
    log_path: &Path,
    output: Option<&Path>,
    options: &RunOptions,
) -> Result<()> {
    log_start("range");
    run(config_path, expected_path, log_path, output, options)
}

pub(super) fn run(
    config_path: &Path,
    expected_path: &Path,
    log_path: &Path,
    output: Option<&Path>,
    options: &RunOptions,
) -> Result<()> {
    // All inputs are loaded before anything is validated
    let config = TelemetryConfig::load_from(config_path)?;
    let spec = RangeSpec::load_from(expected_path)?;
    let log = LogDocument::load_from(log_path)?;
    tracing::debug!(
        tm_ids = config.len(),
        expectations = spec.len(),
        log_lines = log.line_count(),
        "inputs loaded"
    );

    let records = validate_ranges(&config, spec, &log);
    let report = assemble(Mode::Range, &records);
    emit(&report, &records, output, options)
}
