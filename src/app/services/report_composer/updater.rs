//! Re-applying Epi enrichment to a previously produced report

use crate::app::models::Table;
use crate::app::services::epi_join::{EpiIndex, fold_ascii};
use crate::app::services::schema_registry::SchemaRegistry;
use crate::config::MergeConfig;
use crate::{Error, Result};
use tracing::info;

/// Overwrite the Epi-sourced columns of an existing report with values from a
/// refreshed EpiInfo export.
///
/// Every other column — run constants, QC review fields, any extra columns
/// the operator added by hand — is preserved byte for byte, as is the
/// report's row and column order. Fails with [`Error::UnmatchedSampleKey`]
/// when a report row's key is no longer present in the export.
pub fn update_report(report: &Table, epi: &Table, config: &MergeConfig) -> Result<Table> {
    let key_index = report
        .column_index(&config.sample_key_column)
        .ok_or_else(|| {
            Error::configuration(format!(
                "report has no key column '{}'",
                config.sample_key_column
            ))
        })?;

    let epi_index = EpiIndex::build(epi, &config.epi_key_column)?;

    let targets: Vec<(usize, usize)> = SchemaRegistry::epi_enrichment_columns(config)
        .iter()
        .map(|column| {
            let report_position = report.column_index(column).ok_or_else(|| {
                Error::configuration(format!("report has no column '{column}'"))
            })?;
            let epi_position = epi.column_index(column).ok_or_else(|| {
                Error::configuration(format!("Epi table has no column '{column}'"))
            })?;
            Ok((report_position, epi_position))
        })
        .collect::<Result<_>>()?;

    let mut updated = report.clone();
    for row in 0..updated.row_count() {
        let key = updated.rows()[row][key_index].trim().to_string();
        if key.is_empty() {
            return Err(Error::missing_key(&config.sample_key_column, row + 1));
        }
        let epi_row = epi_index
            .lookup(&key)?
            .ok_or_else(|| Error::unmatched_sample_key(&key))?;

        for &(report_position, epi_position) in &targets {
            updated.rows_mut()[row][report_position] =
                fold_ascii(&epi.rows()[epi_row][epi_position]);
        }
    }

    info!(
        "refreshed {} Epi columns across {} report rows",
        targets.len(),
        updated.row_count()
    );

    Ok(updated)
}
