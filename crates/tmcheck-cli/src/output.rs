use crate::types::OutputFormat;
use anyhow::{Context, Result};
use owo_colors::OwoColorize;
use serde::Serialize;
use std::io::Write;
use std::path::Path;
use tmcheck_engine::{Report, ReportSummary};
use tmcheck_types::{Mode, ValidationRecord};

#[derive(Serialize)]
struct ReportEnvelope<'a> {
    content: ReportContent<'a>,
}

#[derive(Serialize)]
struct ReportContent<'a> {
    mode: Mode,
    summary: ReportSummary,
    records: &'a [ValidationRecord],
}

fn envelope<'a>(report: &Report, records: &'a [ValidationRecord]) -> ReportEnvelope<'a> {
    ReportEnvelope {
        content: ReportContent {
            mode: report.mode,
            summary: report.summary,
            records,
        },
    }
}

/// Write the report to `path`: JSON when the extension is `.json`,
/// CSV otherwise.
pub fn write_report(path: &Path, report: &Report, records: &[ValidationRecord]) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }

    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

    if is_json {
        let file = std::fs::File::create(path)
            .with_context(|| format!("Failed to create {}", path.display()))?;
        serde_json::to_writer_pretty(file, &envelope(report, records))?;
    } else {
        let mut wtr = csv::Writer::from_path(path)
            .with_context(|| format!("Failed to create {}", path.display()))?;
        write_csv_rows(&mut wtr, report)?;
    }

    Ok(())
}

fn write_csv_rows<W: Write>(wtr: &mut csv::Writer<W>, report: &Report) -> Result<()> {
    wtr.write_record(&report.header)?;
    for row in &report.rows {
        wtr.write_record(row)?;
    }
    wtr.flush()?;
    Ok(())
}

/// Render the report to `out` in the requested format.
pub fn render<W: Write>(
    out: &mut W,
    report: &Report,
    records: &[ValidationRecord],
    format: OutputFormat,
    color: bool,
) -> Result<()> {
    match format {
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, &envelope(report, records))?;
            writeln!(out)?;
        }
        OutputFormat::Csv => {
            let mut wtr = csv::Writer::from_writer(&mut *out);
            write_csv_rows(&mut wtr, report)?;
        }
        OutputFormat::Plain => render_table(out, report, color)?,
    }
    Ok(())
}

fn render_table<W: Write>(out: &mut W, report: &Report, color: bool) -> Result<()> {
    let mut widths: Vec<usize> = report.header.iter().map(|h| h.chars().count()).collect();
    for row in &report.rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let status_column = report.header.len().saturating_sub(1);
    let line = |cells: &[String], header: bool| -> String {
        cells
            .iter()
            .zip(&widths)
            .enumerate()
            .map(|(i, (cell, width))| {
                let padded = format!("{:<width$}", cell, width = *width);
                if !color {
                    padded
                } else if header {
                    padded.bold().to_string()
                } else if i == status_column {
                    paint_status(&padded, cell)
                } else {
                    padded
                }
            })
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };

    writeln!(out, "{}", line(&report.header, true))?;
    for row in &report.rows {
        writeln!(out, "{}", line(row, false))?;
    }
    writeln!(out)?;
    let summary = report.summary.to_string();
    if !color {
        writeln!(out, "{}", summary)?;
    } else if report.summary.all_passed() {
        writeln!(out, "{}", summary.green())?;
    } else {
        writeln!(out, "{}", summary.red())?;
    }
    Ok(())
}

fn paint_status(padded: &str, status: &str) -> String {
    match status {
        "MATCHED" | "Success" => padded.green().to_string(),
        "NOT PRESENT" => padded.yellow().to_string(),
        _ => padded.red().to_string(),
    }
}
