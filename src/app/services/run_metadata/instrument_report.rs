//! Best-effort metric extraction from MinKNOW run reports
//!
//! Two report shapes are understood: the HTML report MinKNOW produces, which
//! embeds its data as a `const reportData=` JSON payload, and plain labelled
//! text/CSV exports (`Flow cell ID,FBA38845` or `Run limit: 72 hrs`). A label
//! that is not found simply yields no metric; only bytes that cannot be
//! decoded as text at all are an error.

use crate::app::models::RunMetadata;
use crate::constants::{INSTRUMENT_LABELS, REPORT_DATA_MARKER};
use crate::{Error, Result};
use serde_json::Value;
use tracing::{debug, warn};

/// Extract the recognized run metrics from an instrument report.
///
/// Fails only with [`Error::UnreadableReport`] when the bytes are not text.
pub fn extract(bytes: &[u8]) -> Result<RunMetadata> {
    let text = std::str::from_utf8(bytes)
        .map_err(|_| Error::unreadable_report("not valid UTF-8 text"))?;

    let mut metadata = RunMetadata::new();

    if let Some(payload) = embedded_json(text) {
        match serde_json::from_str::<Value>(payload) {
            Ok(report) => extract_from_json(&report, &mut metadata)?,
            Err(e) => warn!("embedded report data did not parse as JSON: {}", e),
        }
    } else {
        extract_from_labels(text, &mut metadata)?;
    }

    debug!("extracted {} instrument metrics", metadata.len());
    Ok(metadata)
}

/// The JSON payload embedded in a MinKNOW HTML report, if present
fn embedded_json(text: &str) -> Option<&str> {
    text.split(REPORT_DATA_MARKER)
        .nth(1)?
        .split(';')
        .next()
        .map(str::trim)
}

fn extract_from_json(report: &Value, metadata: &mut RunMetadata) -> Result<()> {
    if let Some(versions) = report.get("software_versions").and_then(Value::as_array) {
        for entry in versions {
            if entry.get("title").and_then(Value::as_str) == Some("MinKNOW") {
                if let Some(value) = entry.get("value").and_then(Value::as_str) {
                    metadata.set_instrument("MinKNOWSoftwareVersion", value)?;
                }
            }
        }
    }

    if let Some(setup) = report.get("run_setup").and_then(Value::as_array) {
        for entry in setup {
            let value = entry.get("value").and_then(Value::as_str);
            match entry.get("title").and_then(Value::as_str) {
                Some("Flow cell ID") => {
                    if let Some(value) = value {
                        metadata.set_instrument("FlowCellID", value)?;
                    }
                }
                Some("Kit type") => {
                    if let Some(value) = value {
                        metadata.set_instrument("LibraryPreparationKit", value)?;
                    }
                }
                _ => {}
            }
        }
    }

    if let Some(settings) = report.get("run_settings").and_then(Value::as_array) {
        for entry in settings {
            if entry.get("title").and_then(Value::as_str) == Some("Run limit") {
                if let Some(value) = entry.get("value").and_then(Value::as_str) {
                    metadata.set_instrument("RunHoursDuration", value)?;
                }
            }
        }
    }

    if let Some(end_time) = report.get("run_end_time").and_then(Value::as_str) {
        metadata.set_instrument("DateSeqRunLoaded", date_part(end_time))?;
    }

    if let Some(series) = report
        .get("pore_scan")
        .and_then(|scan| scan.get("series_data"))
        .and_then(Value::as_array)
    {
        let available = series
            .iter()
            .find(|entry| entry.get("name").and_then(Value::as_str) == Some("Pore available"));
        if let Some(count) = available
            .and_then(|entry| entry.get("data"))
            .and_then(Value::as_array)
            .and_then(|data| data.first())
            .and_then(|pair| pair.get(1))
            .and_then(Value::as_i64)
        {
            metadata.set_instrument("PoresAvilableAtFlowCellCheck", count.to_string())?;
        }
    }

    Ok(())
}

fn extract_from_labels(text: &str, metadata: &mut RunMetadata) -> Result<()> {
    for line in text.lines() {
        let Some((label, value)) = split_labelled_line(line) else {
            continue;
        };
        let normalized = normalize_label(label);
        let Some(mapping) = INSTRUMENT_LABELS.iter().find(|l| l.label == normalized) else {
            continue;
        };

        let value = value.trim();
        if value.is_empty() {
            continue;
        }
        if mapping.column == "DateSeqRunLoaded" {
            metadata.set_instrument(mapping.column, date_part(value))?;
        } else {
            metadata.set_instrument(mapping.column, value)?;
        }
    }
    Ok(())
}

/// Split a `label,value` / `label\tvalue` / `label: value` line
fn split_labelled_line(line: &str) -> Option<(&str, &str)> {
    for separator in [',', '\t', ':'] {
        if let Some((label, value)) = line.split_once(separator) {
            return Some((label, value));
        }
    }
    None
}

/// Lowercase and collapse whitespace so labels match despite formatting drift
fn normalize_label(label: &str) -> String {
    label
        .split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(" ")
}

/// The calendar date part of an ISO timestamp
fn date_part(value: &str) -> &str {
    value.trim().split('T').next().unwrap_or(value).trim()
}
