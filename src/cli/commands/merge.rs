//! Merge command implementation

use super::shared::{self, RunSummary};
use crate::app::engine::{self, MergeInputs};
use crate::cli::args::{MergeArgs, delimiter_byte};
use crate::config::MergeConfig;
use crate::constants::detailed_report_file_name;
use crate::{Error, Result};
use std::collections::HashMap;
use std::time::Instant;
use tracing::{debug, info};

/// Merge a run's inputs into a new detailed run report
pub fn run_merge(args: MergeArgs) -> Result<RunSummary> {
    shared::setup_logging(args.log_level());
    let start = Instant::now();
    debug!("merge arguments: {:?}", args);

    let config = MergeConfig::with_delimiter(delimiter_byte(args.delimiter)?);

    // Operator metadata is validated before any file is parsed so format
    // mistakes surface immediately
    let file_values = read_metadata_file(&args)?;
    let metadata = args.run_metadata(file_values)?;
    metadata.validate_formats()?;

    let sample_sheet = shared::read_input(&args.samples)?;
    let epi_export = args.epi.as_deref().map(shared::read_input).transpose()?;
    let instrument_report = args.minknow.as_deref().map(shared::read_input).transpose()?;

    let output = engine::new_report(
        MergeInputs {
            sample_sheet: &sample_sheet,
            epi_export: epi_export.as_deref(),
            instrument_report: instrument_report.as_deref(),
        },
        metadata,
        &config,
    )?;

    let destination = shared::resolve_destination(args.destination);
    let file_name = detailed_report_file_name(&args.run_number);
    let output_path = shared::write_output(&destination, &file_name, &output.bytes)?;

    info!(
        "merged {} samples into {}",
        output.row_count,
        output_path.display()
    );

    Ok(RunSummary {
        output_path,
        rows: output.row_count,
        duration: start.elapsed(),
    })
}

/// Load the optional JSON metadata file as a field/value map
fn read_metadata_file(args: &MergeArgs) -> Result<Option<HashMap<String, String>>> {
    let Some(path) = &args.metadata_file else {
        return Ok(None);
    };
    let bytes = shared::read_input(path)?;
    let values: HashMap<String, String> = serde_json::from_slice(&bytes).map_err(|e| {
        Error::configuration(format!(
            "metadata file '{}' is not a JSON map of strings: {e}",
            path.display()
        ))
    })?;
    Ok(Some(values))
}
