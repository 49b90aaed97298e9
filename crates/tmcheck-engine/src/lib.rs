// Engine module - log segmentation, parameter extraction and validation
// Sits between the loaded inputs (types) and the CLI report writers

pub mod extract;
pub mod report;
pub mod segment;
pub mod validate;

pub use extract::{extract_field, extract_numeric};
pub use report::{REFERENCE_COLUMNS, RANGE_COLUMNS, Report, ReportSummary, assemble};
pub use segment::{DEFAULT_MARKER, MarkerPattern, latest_block};
pub use validate::{BlockPair, ComparisonPolicy, RangePolicy, ReferencePolicy, Target, Validator};

use tmcheck_types::{LogDocument, RangeSpec, TelemetryConfig, ValidationRecord};

// Façade API - Stable public interface for CLI layer

/// Validate measured parameters in `log` against declared ranges.
pub fn validate_ranges(
    config: &TelemetryConfig,
    spec: RangeSpec,
    log: &LogDocument,
) -> Vec<ValidationRecord> {
    Validator::new(config, RangePolicy::new(spec)).validate(log)
}

/// Validate the latest telemetry blocks of `log` against a golden log.
pub fn validate_against_reference(
    config: &TelemetryConfig,
    log: &LogDocument,
    reference: LogDocument,
    marker: MarkerPattern,
) -> Vec<ValidationRecord> {
    Validator::new(config, ReferencePolicy::with_marker(reference, marker)).validate(log)
}
