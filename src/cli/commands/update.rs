//! Update command implementation

use super::shared::{self, RunSummary};
use crate::app::engine;
use crate::cli::args::{UpdateArgs, delimiter_byte};
use crate::config::MergeConfig;
use crate::constants::detailed_report_file_name;
use crate::{Error, Result};
use std::time::Instant;
use tracing::{debug, info};

/// Refresh the Epi columns of a previously produced report
pub fn run_update(args: UpdateArgs) -> Result<RunSummary> {
    shared::setup_logging(args.log_level());
    let start = Instant::now();
    debug!("update arguments: {:?}", args);

    let config = MergeConfig::with_delimiter(delimiter_byte(args.delimiter)?);

    let report = shared::read_input(&args.report)?;
    let epi_export = shared::read_input(&args.epi)?;

    let output = engine::update_report(&report, &epi_export, &config)?;

    // The output keeps the run's naming convention; recover the run number
    // from the report itself when it was not passed explicitly
    let run_number = match args.run_number {
        Some(run_number) => run_number,
        None => engine::run_number_of(&report, &config)?.ok_or_else(|| {
            Error::configuration(
                "the report has no RunNumber value; pass --run-number to name the output",
            )
        })?,
    };

    let destination = shared::resolve_destination(args.destination);
    let file_name = detailed_report_file_name(&run_number);
    let output_path = shared::write_output(&destination, &file_name, &output.bytes)?;

    info!(
        "updated {} report rows in {}",
        output.row_count,
        output_path.display()
    );

    Ok(RunSummary {
        output_path,
        rows: output.row_count,
        duration: start.elapsed(),
    })
}
