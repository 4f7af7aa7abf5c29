//! The join operation itself

use super::index::EpiIndex;
use super::normalize::fold_ascii;
use crate::app::models::Table;
use crate::app::services::schema_registry::SchemaRegistry;
use crate::config::MergeConfig;
use crate::{Error, Result};
use std::collections::HashSet;
use tracing::{debug, info};

/// Join every sample-sheet row against its EpiInfo row.
///
/// The result keeps the sample sheet's row order and carries the sample
/// sheet's columns followed by the Epi enrichment columns. Columns the Epi
/// export owns are dropped from the sample side first: Epi data is the
/// authoritative source for them. Epi cell values are folded to ASCII on the
/// way in.
///
/// Fails with [`Error::UnmatchedSampleKey`] on the first sample key absent
/// from the export; the whole operation fails rather than emitting a
/// partial report.
pub fn join(sample: &Table, epi: &Table, config: &MergeConfig) -> Result<Table> {
    let key_index = sample_key_index(sample, config)?;
    check_unique_sample_keys(sample, key_index, &config.sample_key_column)?;

    let epi_index = EpiIndex::build(epi, &config.epi_key_column)?;
    let enrichment = SchemaRegistry::epi_enrichment_columns(config);

    let epi_positions: Vec<usize> = enrichment
        .iter()
        .map(|column| {
            epi.column_index(column).ok_or_else(|| {
                Error::configuration(format!("Epi table has no column '{column}'"))
            })
        })
        .collect::<Result<_>>()?;

    let (kept_positions, header) = joined_header(sample, &enrichment);
    let mut joined = Table::new(header)?;

    for cells in sample.rows() {
        let key = cells[key_index].trim();
        let epi_row = epi_index
            .lookup(key)?
            .ok_or_else(|| Error::unmatched_sample_key(key))?;

        let mut out_cells: Vec<String> =
            kept_positions.iter().map(|&i| cells[i].clone()).collect();
        for &position in &epi_positions {
            out_cells.push(fold_ascii(&epi.rows()[epi_row][position]));
        }
        joined.push_row(out_cells)?;
    }

    let dropped = epi_index.len().saturating_sub(joined.row_count());
    if dropped > 0 {
        debug!("{} Epi rows had no sample-sheet counterpart", dropped);
    }
    info!(
        "joined {} sample rows against {} Epi rows",
        joined.row_count(),
        epi.row_count()
    );

    Ok(joined)
}

/// Produce the joined shape with every Epi enrichment column blank, for
/// merges run without an EpiInfo export.
pub fn with_blank_epi(sample: &Table, config: &MergeConfig) -> Result<Table> {
    let key_index = sample_key_index(sample, config)?;
    check_unique_sample_keys(sample, key_index, &config.sample_key_column)?;

    let enrichment = SchemaRegistry::epi_enrichment_columns(config);
    let (kept_positions, header) = joined_header(sample, &enrichment);
    let mut joined = Table::new(header)?;

    for cells in sample.rows() {
        let mut out_cells: Vec<String> =
            kept_positions.iter().map(|&i| cells[i].clone()).collect();
        out_cells.extend(std::iter::repeat_n(String::new(), enrichment.len()));
        joined.push_row(out_cells)?;
    }

    Ok(joined)
}

fn sample_key_index(sample: &Table, config: &MergeConfig) -> Result<usize> {
    sample
        .column_index(&config.sample_key_column)
        .ok_or_else(|| {
            Error::configuration(format!(
                "sample table has no key column '{}'",
                config.sample_key_column
            ))
        })
}

/// Sample columns to carry over (everything the Epi side does not own),
/// followed by the enrichment columns
fn joined_header(sample: &Table, enrichment: &[String]) -> (Vec<usize>, Vec<String>) {
    let mut kept_positions = Vec::new();
    let mut header = Vec::new();
    for (position, column) in sample.header().iter().enumerate() {
        if !enrichment.contains(column) {
            kept_positions.push(position);
            header.push(column.clone());
        }
    }
    header.extend(enrichment.iter().cloned());
    (kept_positions, header)
}

fn check_unique_sample_keys(sample: &Table, key_index: usize, key_column: &str) -> Result<()> {
    let mut seen = HashSet::with_capacity(sample.row_count());
    for (row, cells) in sample.rows().iter().enumerate() {
        let key = cells[key_index].trim();
        if key.is_empty() {
            return Err(Error::missing_key(key_column, row + 1));
        }
        if !seen.insert(key.to_string()) {
            return Err(Error::duplicate_key(key_column, key));
        }
    }
    Ok(())
}
