//! Custom assertions for tmcheck report validation.
//!
//! Provides high-level assertions that make tests more readable:
//! - Record count validation
//! - Per-parameter status checks
//! - CSV report header checks

use anyhow::{Context, Result};
use serde_json::Value;
use std::path::Path;

fn records(json: &Value) -> Result<&Vec<Value>> {
    json["content"]["records"]
        .as_array()
        .context("Expected 'content.records' array in JSON")
}

/// Assert that a JSON report contains the expected number of records.
pub fn assert_record_count(json: &Value, expected: usize) -> Result<()> {
    let records = records(json)?;

    if records.len() != expected {
        anyhow::bail!("Expected {} records, got {}", expected, records.len());
    }

    Ok(())
}

/// Assert the status of the first record for `parameter`.
pub fn assert_parameter_status(json: &Value, parameter: &str, expected: &str) -> Result<()> {
    let record = records(json)?
        .iter()
        .find(|r| r["parameter"] == parameter)
        .with_context(|| format!("No record for parameter {}", parameter))?;

    let status = record["status"]
        .as_str()
        .with_context(|| format!("Record for {} has no status", parameter))?;

    if status != expected {
        anyhow::bail!(
            "Parameter {} has status {} but expected {}",
            parameter,
            status,
            expected
        );
    }

    Ok(())
}

/// Assert that a CSV report starts with the given header and has
/// `rows` data rows.
pub fn assert_csv_report(path: &Path, header: &[&str], rows: usize) -> Result<()> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read report {}", path.display()))?;
    let mut lines = content.lines();

    let first = lines.next().context("Report is empty")?;
    let expected_header = header.join(",");
    if first != expected_header {
        anyhow::bail!("Expected header {:?}, got {:?}", expected_header, first);
    }

    let count = lines.count();
    if count != rows {
        anyhow::bail!("Expected {} data rows, got {}", rows, count);
    }

    Ok(())
}
