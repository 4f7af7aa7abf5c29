//! Tests for report composition and updating

mod composer_tests;

use crate::app::models::{RunMetadata, Table};
use crate::app::services::epi_join::join;
use crate::app::services::run_metadata::apply_run_metadata;
use crate::app::services::table_io::read_table;
use crate::config::MergeConfig;

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

/// A minimal Epi table covering the full required schema
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

/// Run the real pipeline (join, metadata merge, compose) and re-parse the
/// produced report
pub fn composed_report(keys: &[&str], config: &MergeConfig) -> Table {
    let rows: Vec<Vec<String>> = keys
        .iter()
        .enumerate()
        .map(|(i, key)| vec![key.to_string(), format!("barcode{:02}", i + 1)])
        .collect();
    let mut sample = Table::new(vec!["sample".to_string(), "barcode".to_string()]).unwrap();
    for row in rows {
        sample.push_row(row).unwrap();
    }

    let mut enriched = join(&sample, &epi_table(keys), config).unwrap();
    let mut metadata = RunMetadata::new();
    metadata.set_operator("RunNumber", "20250206_005").unwrap();
    apply_run_metadata(&mut enriched, &metadata);

    let bytes = super::compose_new(&enriched, config).unwrap();
    read_table(&bytes, config.delimiter).unwrap()
}
