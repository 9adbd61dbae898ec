//! Output formatting and persistence for summaries.
//!
//! Supports the labeled text report, pretty-printing, JSON serialization,
//! and CSV append.

use anyhow::Result;
use tracing::debug;

use crate::summary::Summary;
use csv::WriterBuilder;
use std::fs::OpenOptions;
use std::path::Path;

fn push_line(out: &mut String, label: &str, value: Option<f64>) {
    let line = match value {
        Some(v) => format!("{label}: {v:.6}\n"),
        None => format!("{label}: n/a\n"),
    };
    out.push_str(&line);
}

/// Renders the five labeled report lines in the order Mean, Mode, Median,
/// Percentile, Deviation.
pub fn format_report(summary: &Summary) -> String {
    let mut out = String::new();
    push_line(&mut out, "Mean", summary.mean);
    push_line(&mut out, "Mode", summary.mode);
    push_line(&mut out, "Median", summary.median);
    push_line(&mut out, "Percentile", summary.percentile);

    match (summary.deviation, &summary.error_message) {
        (None, Some(msg)) => out.push_str(&format!("Deviation: n/a ({msg})\n")),
        (deviation, _) => push_line(&mut out, "Deviation", deviation),
    }
    out
}

/// Logs a summary using Rust's debug pretty-print format.
pub fn print_pretty(summary: &Summary) {
    debug!("{:#?}", summary);
}

/// Serializes a summary as pretty-printed JSON.
pub fn to_json(summary: &Summary) -> Result<String> {
    Ok(serde_json::to_string_pretty(summary)?)
}

/// Appends a [`Summary`] record as a row to a CSV file.
///
/// Creates the file with headers if it does not already exist.
pub fn append_record(path: &str, summary: &Summary) -> Result<()> {
    let file_exists = Path::new(path).exists();
    debug!(path, file_exists, "Appending CSV record");

    let file = OpenOptions::new().append(true).create(true).open(path)?;

    let mut writer = WriterBuilder::new()
        .has_headers(!file_exists)
        .from_writer(file);

    writer.serialize(summary)?;
    writer.flush()?;

    Ok(())
}

/// Appends an error row for a run that produced no statistics.
///
/// The full `anyhow` context chain ends up in `error_message`.
pub fn append_error(
    path: &str,
    error_type: &str,
    error: &anyhow::Error,
    label: Option<&str>,
) -> Result<()> {
    let mut summary = Summary::from_error(error_type, &format!("{error:#}"));
    if let Some(label) = label {
        summary = summary.with_label(label);
    }
    append_record(path, &summary)
}
