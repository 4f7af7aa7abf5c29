//! New-report and template composition

use crate::app::models::{Table, TableKind};
use crate::app::services::schema_registry::SchemaRegistry;
use crate::app::services::table_io::write_table;
use crate::config::MergeConfig;
use crate::constants::{BARCODE_COUNT, RESERVED_COLUMNS};
use crate::{Error, Result};
use std::collections::HashSet;

/// Serialize an enriched table as a detailed run report.
///
/// Columns are emitted in the registry's output layout; columns the enriched
/// table does not carry, and every reserved column regardless of input,
/// render blank.
pub fn compose_new(enriched: &Table, config: &MergeConfig) -> Result<Vec<u8>> {
    let layout = SchemaRegistry::output_layout(config);
    let reserved: HashSet<&str> = RESERVED_COLUMNS.iter().copied().collect();

    let positions: Vec<Option<usize>> = layout
        .iter()
        .map(|column| {
            if reserved.contains(column.as_str()) {
                None
            } else {
                enriched.column_index(column)
            }
        })
        .collect();

    let mut report = Table::new(layout)?;
    for cells in enriched.rows() {
        let row: Vec<String> = positions
            .iter()
            .map(|position| position.map(|i| cells[i].clone()).unwrap_or_default())
            .collect();
        report.push_row(row)?;
    }

    write_table(&report, config.delimiter)
}

/// Emit a template for the given kind: its registry header and, optionally
/// for the sample sheet, the 96 standard barcode rows with the sample column
/// left for the operator to fill in.
pub fn compose_template(
    kind: TableKind,
    config: &MergeConfig,
    prefill_barcodes: bool,
) -> Result<Vec<u8>> {
    let columns = SchemaRegistry::required_columns(kind, config);
    if columns.is_empty() {
        return Err(Error::configuration(format!(
            "no template exists for the {kind} kind"
        )));
    }

    let barcode_position = columns.iter().position(|c| c == "barcode");
    let width = columns.len();
    let mut template = Table::new(columns)?;

    if prefill_barcodes && kind == TableKind::SampleSheet {
        if let Some(position) = barcode_position {
            for n in 1..=BARCODE_COUNT {
                let mut row = vec![String::new(); width];
                row[position] = format!("barcode{n:02}");
                template.push_row(row)?;
            }
        }
    }

    write_table(&template, config.delimiter)
}
