//! Delimited text parsing and required-column validation

use crate::app::models::{Table, TableKind};
use crate::app::services::schema_registry::SchemaRegistry;
use crate::config::MergeConfig;
use crate::{Error, Result};
use std::borrow::Cow;
use tracing::debug;

/// Parse a byte buffer as delimited text with a header row.
///
/// Rows whose field count differs from the header fail with
/// [`Error::MalformedRow`] carrying the 1-based data row index. Rows whose
/// every cell is blank are skipped: hand-edited sheets routinely carry
/// leftover empty lines. Input bytes are decoded as UTF-8 with replacement of
/// invalid sequences, matching how the historical tool read exports.
pub fn read_table(bytes: &[u8], delimiter: u8) -> Result<Table> {
    let text = decode(bytes);

    let mut csv_reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(true)
        .flexible(true)
        .from_reader(text.as_bytes());

    let headers = csv_reader
        .headers()
        .map_err(|e| Error::csv_parsing("failed to read CSV header", Some(e)))?;

    if headers.iter().all(|c| c.trim().is_empty()) {
        return Err(Error::csv_parsing("input has no header row", None));
    }

    let header: Vec<String> = headers.iter().map(|c| c.to_string()).collect();
    let width = header.len();
    let mut table = Table::new(header)?;
    let mut blank_rows = 0usize;

    for (index, result) in csv_reader.records().enumerate() {
        let row_number = index + 1;
        let record = result.map_err(|e| {
            Error::csv_parsing(format!("failed to parse data row {row_number}"), Some(e))
        })?;

        if record.iter().all(|c| c.trim().is_empty()) {
            blank_rows += 1;
            continue;
        }

        if record.len() != width {
            return Err(Error::malformed_row(row_number, width, record.len()));
        }

        table.push_row(record.iter().map(|c| c.to_string()).collect())?;
    }

    if blank_rows > 0 {
        debug!("skipped {} blank rows", blank_rows);
    }

    Ok(table)
}

/// Check that every registry-required column for `kind` is present.
///
/// Missing columns fail with [`Error::SchemaMismatch`] listing exactly which
/// columns are absent. Unexpected extra columns are tolerated and only logged.
pub fn validate_schema(table: &Table, kind: TableKind, config: &MergeConfig) -> Result<()> {
    let required = SchemaRegistry::required_columns(kind, config);

    let missing: Vec<String> = required
        .iter()
        .filter(|column| !table.has_column(column))
        .cloned()
        .collect();

    if !missing.is_empty() {
        return Err(Error::schema_mismatch(kind, missing));
    }

    let unexpected: Vec<&str> = table
        .header()
        .iter()
        .filter(|column| !required.contains(column))
        .map(String::as_str)
        .collect();

    if !unexpected.is_empty() {
        debug!(
            "{} file has {} unexpected columns: {}",
            kind,
            unexpected.len(),
            unexpected.join(", ")
        );
    }

    Ok(())
}

/// Decode input bytes as UTF-8 text, stripping a leading BOM if present
fn decode(bytes: &[u8]) -> Cow<'_, str> {
    let bytes = bytes.strip_prefix(b"\xef\xbb\xbf").unwrap_or(bytes);
    String::from_utf8_lossy(bytes)
}
