//! Template command implementation

use super::shared::{self, RunSummary};
use crate::app::engine;
use crate::cli::args::{TemplateArgs, TemplateKind, delimiter_byte};
use crate::config::MergeConfig;
use crate::constants::{
    TEMPLATE_BARCODES_FILE_NAME, TEMPLATE_EPI_FILE_NAME, TEMPLATE_REPORT_FILE_NAME,
    barcodes_file_name,
};
use crate::Result;
use std::time::Instant;
use tracing::{debug, info};

/// Generate a fill-in template for one of the input kinds
pub fn run_template(args: TemplateArgs) -> Result<RunSummary> {
    shared::setup_logging(args.log_level());
    let start = Instant::now();
    debug!("template arguments: {:?}", args);

    let config = MergeConfig::with_delimiter(delimiter_byte(args.delimiter)?);

    let output = engine::template(args.kind.table_kind(), &config, args.prefill_barcodes)?;

    let file_name = match (args.kind, &args.run_number) {
        // A samples template for a specific run is that run's barcodes sheet
        (TemplateKind::Samples, Some(run_number)) => barcodes_file_name(run_number),
        (TemplateKind::Samples, None) => TEMPLATE_BARCODES_FILE_NAME.to_string(),
        (TemplateKind::Epi, _) => TEMPLATE_EPI_FILE_NAME.to_string(),
        (TemplateKind::Report, _) => TEMPLATE_REPORT_FILE_NAME.to_string(),
    };

    let destination = shared::resolve_template_destination(args.destination);
    let output_path = shared::write_output(&destination, &file_name, &output.bytes)?;

    info!("template saved to {}", output_path.display());

    Ok(RunSummary {
        output_path,
        rows: output.row_count,
        duration: start.elapsed(),
    })
}
