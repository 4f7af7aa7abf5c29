//! The engine facade: pure bytes-in/bytes-out operations
//!
//! One entry point per operation the shell can request. Every function takes
//! already-read byte buffers and returns the bytes to write; no function here
//! opens a file. All validation happens before any output bytes exist, so a
//! failed operation never leaves a partially-correct report behind.

use crate::app::models::{RunMetadata, TableKind};
use crate::app::services::epi_join;
use crate::app::services::report_composer;
use crate::app::services::run_metadata;
use crate::app::services::table_io::{read_table, validate_schema, write_table};
use crate::config::MergeConfig;
use crate::{Error, Result};
use tracing::{info, warn};

/// Input byte buffers for a merge. Only the sample sheet is mandatory: a
/// merge without an Epi export leaves the epidemiological columns blank, and
/// the instrument report is best-effort.
#[derive(Debug, Clone, Copy, Default)]
pub struct MergeInputs<'a> {
    pub sample_sheet: &'a [u8],
    pub epi_export: Option<&'a [u8]>,
    pub instrument_report: Option<&'a [u8]>,
}

/// A composed artifact ready to be written by the shell
#[derive(Debug, Clone)]
pub struct ReportOutput {
    pub bytes: Vec<u8>,
    pub row_count: usize,
}

/// Merge a run into a new detailed run report.
///
/// Pipeline: load and validate the sample sheet, join it against the Epi
/// export (or attach blank Epi columns), fold in instrument metrics, apply
/// the run-constant metadata under its declared precedence, compose.
pub fn new_report(
    inputs: MergeInputs<'_>,
    mut metadata: RunMetadata,
    config: &MergeConfig,
) -> Result<ReportOutput> {
    config.validate()?;

    let sample = read_table(inputs.sample_sheet, config.delimiter)?;
    validate_schema(&sample, TableKind::SampleSheet, config)?;

    let mut enriched = match inputs.epi_export {
        Some(bytes) => {
            let epi = read_table(bytes, config.delimiter)?;
            validate_schema(&epi, TableKind::EpiInfo, config)?;
            epi_join::join(&sample, &epi, config)?
        }
        None => {
            warn!("no Epi export supplied; epidemiological columns will be blank");
            epi_join::with_blank_epi(&sample, config)?
        }
    };

    if let Some(bytes) = inputs.instrument_report {
        match run_metadata::extract(bytes) {
            Ok(extracted) => metadata.absorb_instrument(extracted)?,
            Err(Error::UnreadableReport { message }) => {
                warn!("ignoring instrument report: {}", message);
            }
            Err(e) => return Err(e),
        }
    }

    run_metadata::apply_run_metadata(&mut enriched, &metadata);

    let row_count = enriched.row_count();
    let bytes = report_composer::compose_new(&enriched, config)?;
    info!("composed detailed run report with {} rows", row_count);

    Ok(ReportOutput { bytes, row_count })
}

/// Re-apply Epi enrichment to a previously produced report.
pub fn update_report(
    existing_report: &[u8],
    epi_export: &[u8],
    config: &MergeConfig,
) -> Result<ReportOutput> {
    config.validate()?;

    let report = read_table(existing_report, config.delimiter)?;
    validate_schema(&report, TableKind::OutputReport, config)?;

    let epi = read_table(epi_export, config.delimiter)?;
    validate_schema(&epi, TableKind::EpiInfo, config)?;

    let updated = report_composer::update_report(&report, &epi, config)?;
    let row_count = updated.row_count();
    let bytes = write_table(&updated, config.delimiter)?;
    info!("updated detailed run report with {} rows", row_count);

    Ok(ReportOutput { bytes, row_count })
}

/// Emit a header-only template for the given kind.
pub fn template(
    kind: TableKind,
    config: &MergeConfig,
    prefill_barcodes: bool,
) -> Result<ReportOutput> {
    config.validate()?;

    let bytes = report_composer::compose_template(kind, config, prefill_barcodes)?;
    let row_count = if prefill_barcodes && kind == TableKind::SampleSheet {
        crate::constants::BARCODE_COUNT
    } else {
        0
    };

    Ok(ReportOutput { bytes, row_count })
}

/// Parse a previously produced report far enough to recover its run number,
/// used by the shell to derive the output file name in update mode.
pub fn run_number_of(report_bytes: &[u8], config: &MergeConfig) -> Result<Option<String>> {
    let report = read_table(report_bytes, config.delimiter)?;
    if !report.has_column("RunNumber") {
        return Ok(None);
    }
    for row in 0..report.row_count() {
        if let Some(value) = report.value(row, "RunNumber") {
            if !value.trim().is_empty() {
                return Ok(Some(value.trim().to_string()));
            }
        }
    }
    Ok(None)
}
