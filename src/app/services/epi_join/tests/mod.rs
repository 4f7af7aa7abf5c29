//! Tests for the Epi join engine

mod join_tests;

use crate::app::models::Table;

/// Build a table from string literals
pub fn table_from(header: &[&str], rows: &[&[&str]]) -> Table {
    let mut table = Table::new(header.iter().map(|c| c.to_string()).collect()).unwrap();
    for row in rows {
        table
            .push_row(row.iter().map(|c| c.to_string()).collect())
            .unwrap();
    }
    table
}

/// A minimal Epi table covering the full required schema, keyed by the
/// given identifiers
pub fn epi_table(keys: &[&str]) -> Table {
    let header: Vec<String> = crate::constants::EPI_COLUMNS
        .iter()
        .map(|c| c.to_string())
        .collect();
    let width = header.len();
    let mut table = Table::new(header).unwrap();
    for (row, key) in keys.iter().enumerate() {
        let mut cells = vec![key.to_string()];
        cells.extend((1..width).map(|col| format!("{key}-v{col}-r{row}")));
        table.push_row(cells).unwrap();
    }
    table
}
