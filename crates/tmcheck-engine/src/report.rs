use serde::Serialize;
use tmcheck_types::{Mode, Observation, ValidationRecord};

pub const RANGE_COLUMNS: [&str; 7] = [
    "Parameter",
    "TM_ID",
    "Present",
    "Actual Value",
    "Expected Min",
    "Expected Max",
    "Status",
];

pub const REFERENCE_COLUMNS: [&str; 5] = [
    "TM Id",
    "Parameter",
    "Test Value",
    "Reference Value",
    "Status",
];

const UNKNOWN_ID: &str = "Unknown";

/// Flat tabular view of a run: header plus one row per record.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub mode: Mode,
    pub header: Vec<String>,
    pub rows: Vec<Vec<String>>,
    pub summary: ReportSummary,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct ReportSummary {
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
}

impl ReportSummary {
    pub fn all_passed(&self) -> bool {
        self.failed == 0
    }
}

impl std::fmt::Display for ReportSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} rows: {} passed, {} failed",
            self.total, self.passed, self.failed
        )
    }
}

/// Assemble records into a report. The column set follows `mode`.
pub fn assemble(mode: Mode, records: &[ValidationRecord]) -> Report {
    let columns: &[&str] = match mode {
        Mode::Range => &RANGE_COLUMNS,
        Mode::Reference => &REFERENCE_COLUMNS,
    };
    let header = columns.iter().map(|column| column.to_string()).collect();

    let rows = records.iter().map(row).collect();

    let passed = records.iter().filter(|r| r.status.is_pass()).count();
    let summary = ReportSummary {
        total: records.len(),
        passed,
        failed: records.len() - passed,
    };

    Report {
        mode,
        header,
        rows,
        summary,
    }
}

fn row(record: &ValidationRecord) -> Vec<String> {
    let tm_id = record.tm_id.as_deref().unwrap_or(UNKNOWN_ID).to_string();
    let status = record.status.to_string();

    match &record.observation {
        Observation::Range { actual, expected } => vec![
            record.parameter.clone(),
            tm_id,
            if record.present { "Yes" } else { "No" }.to_string(),
            actual.map(|v| v.to_string()).unwrap_or_default(),
            expected.min.to_string(),
            expected.max.to_string(),
            status,
        ],
        Observation::Reference {
            test_value,
            reference_value,
        } => vec![
            tm_id,
            record.parameter.clone(),
            test_value.clone().unwrap_or_default(),
            reference_value.clone().unwrap_or_default(),
            status,
        ],
    }
}
