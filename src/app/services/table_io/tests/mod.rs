//! Tests for CSV loading, validation and serialization

mod reader_tests;

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
