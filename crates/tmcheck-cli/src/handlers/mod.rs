pub mod profile;
pub mod range;
pub mod reference;

use crate::output;
use crate::types::OutputFormat;
use anyhow::Result;
use is_terminal::IsTerminal;
use std::path::Path;
use tmcheck_engine::Report;
use tmcheck_types::ValidationRecord;

/// Presentation choices shared by every handler.
#[derive(Debug, Clone, Copy)]
pub struct RunOptions {
    pub format: OutputFormat,
    pub color: bool,
}

impl RunOptions {
    pub fn new(format: OutputFormat) -> Self {
        Self {
            format,
            color: std::io::stdout().is_terminal(),
        }
    }
}

/// Write the report to `output` if given, otherwise render it to stdout.
fn emit(
    report: &Report,
    records: &[ValidationRecord],
    output: Option<&Path>,
    options: &RunOptions,
) -> Result<()> {
    tracing::info!(
        mode = %report.mode,
        total = report.summary.total,
        passed = report.summary.passed,
        failed = report.summary.failed,
        "validation complete"
    );

    match output {
        Some(path) => {
            output::write_report(path, report, records)?;
            println!(
                "Validation complete ({}). Results saved to {}",
                report.summary,
                path.display()
            );
        }
        None => {
            let stdout = std::io::stdout();
            let mut out = stdout.lock();
            output::render(&mut out, report, records, options.format, options.color)?;
        }
    }

    Ok(())
}

fn log_start(subsystem: &str) {
    let now = chrono::Local::now().format("%Y-%m-%d %H:%M:%S");
    tracing::info!(started_at = %now, subsystem, "validation run started");
}
