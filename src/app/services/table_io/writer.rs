//! Deterministic CSV serialization

use crate::app::models::Table;
use crate::{Error, Result};

/// Serialize a table to UTF-8 CSV bytes.
///
/// Fields are quoted only when they contain the delimiter, a quote character
/// or a line break; the header keeps the table's column order; the output
/// ends with a trailing newline.
pub fn write_table(table: &Table, delimiter: u8) -> Result<Vec<u8>> {
    let mut csv_writer = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .from_writer(Vec::new());

    csv_writer
        .write_record(table.header())
        .map_err(|e| Error::csv_parsing("failed to write CSV header", Some(e)))?;

    for (index, row) in table.rows().iter().enumerate() {
        csv_writer.write_record(row).map_err(|e| {
            Error::csv_parsing(format!("failed to write data row {}", index + 1), Some(e))
        })?;
    }

    csv_writer
        .into_inner()
        .map_err(|e| Error::csv_parsing("failed to flush CSV output", Some(e.into_error().into())))
}
