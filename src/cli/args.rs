//! Command-line argument definitions for the run report merger
//!
//! The CLI mirrors the historical desktop form: one invocation per run, with
//! the run-constant values the operator used to type into the form supplied
//! as options. All argument structs are plain data; file reading and engine
//! calls live in [`crate::cli::commands`].

use crate::app::models::{RunMetadata, TableKind};
use crate::{Error, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::collections::HashMap;
use std::path::PathBuf;

/// CLI arguments for the run report merger
#[derive(Debug, Clone, Parser)]
#[command(
    name = "run-report-merger",
    version,
    about = "Merge DDNS sequencing sample sheets with EpiInfo exports into detailed run reports",
    long_about = "Reconciles a laboratory sample/barcode sheet with an EpiInfo database export \
                  into one detailed run report, enriched with run-level metadata and metrics \
                  parsed from the MinKNOW sequencing report. Also refreshes the Epi columns of \
                  previously produced reports and generates fill-in templates."
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands
#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Merge a sequencing run into a new detailed run report
    Merge(MergeArgs),
    /// Refresh the Epi columns of an existing detailed run report
    Update(UpdateArgs),
    /// Generate a fill-in template for one of the input kinds
    Template(TemplateArgs),
}

/// Arguments for the merge command
#[derive(Debug, Clone, Parser)]
pub struct MergeArgs {
    /// Sample/barcode sheet CSV (columns: sample, barcode)
    #[arg(short = 's', long = "samples", value_name = "FILE")]
    pub samples: PathBuf,

    /// EpiInfo export CSV; omit to leave the epidemiological columns blank
    #[arg(short = 'e', long = "epi", value_name = "FILE")]
    pub epi: Option<PathBuf>,

    /// MinKNOW run report (HTML or labelled text); metrics are extracted
    /// best-effort
    #[arg(short = 'm', long = "minknow", value_name = "FILE")]
    pub minknow: Option<PathBuf>,

    /// Directory the report is written to (defaults to the current directory)
    #[arg(short = 'd', long = "destination", value_name = "DIR")]
    pub destination: Option<PathBuf>,

    /// Run number in yyyymmdd_NNN form; also names the output file
    #[arg(short = 'r', long = "run-number", value_name = "RUN")]
    pub run_number: String,

    /// Field delimiter of the input and output files
    #[arg(long = "delimiter", value_name = "CHAR", default_value = ",")]
    pub delimiter: char,

    /// Sequencing laboratory name
    #[arg(long = "lab", value_name = "NAME")]
    pub lab: Option<String>,

    /// RT-PCR date (yyyy-mm-dd)
    #[arg(long = "rt-pcr-date", value_name = "DATE")]
    pub rt_pcr_date: Option<String>,

    /// VP1 PCR date (yyyy-mm-dd)
    #[arg(long = "vp1-pcr-date", value_name = "DATE")]
    pub vp1_pcr_date: Option<String>,

    /// PCR machine used for the RT and VP1 reactions
    #[arg(long = "pcr-machine", value_name = "NAME")]
    pub pcr_machine: Option<String>,

    /// Positive control PCR outcome
    #[arg(long = "positive-control", value_enum, value_name = "RESULT")]
    pub positive_control: Option<ControlResult>,

    /// Negative control PCR outcome
    #[arg(long = "negative-control", value_enum, value_name = "RESULT")]
    pub negative_control: Option<ControlResult>,

    /// Library preparation kit (overrides the kit in the MinKNOW report)
    #[arg(long = "library-kit", value_name = "KIT")]
    pub library_kit: Option<String>,

    /// Date the sequencing run was loaded (yyyy-mm-dd)
    #[arg(long = "seq-date", value_name = "DATE")]
    pub seq_date: Option<String>,

    /// Sequencer device used
    #[arg(long = "sequencer", value_name = "NAME")]
    pub sequencer: Option<String>,

    /// Flow cell version
    #[arg(long = "flow-cell-version", value_name = "VERSION")]
    pub flow_cell_version: Option<String>,

    /// Flow cell ID (overrides the ID in the MinKNOW report)
    #[arg(long = "flow-cell-id", value_name = "ID")]
    pub flow_cell_id: Option<String>,

    /// Number of prior uses of the flow cell
    #[arg(long = "flow-cell-uses", value_name = "COUNT")]
    pub flow_cell_uses: Option<String>,

    /// Pores available at the flow cell check
    #[arg(long = "pores-available", value_name = "COUNT")]
    pub pores_available: Option<String>,

    /// Run duration in hours
    #[arg(long = "run-hours", value_name = "HOURS")]
    pub run_hours: Option<String>,

    /// MinKNOW software version (overrides the version in the report)
    #[arg(long = "minknow-version", value_name = "VERSION")]
    pub minknow_version: Option<String>,

    /// Analysis pipeline (Piranha) version
    #[arg(long = "pipeline-version", value_name = "VERSION")]
    pub pipeline_version: Option<String>,

    /// Date the consensus fasta was generated (yyyy-mm-dd)
    #[arg(long = "fasta-date", value_name = "DATE")]
    pub fasta_date: Option<String>,

    /// JSON file of run metadata values ({"FieldName": "value", ...});
    /// explicit options take precedence over the file
    #[arg(long = "metadata-file", value_name = "FILE")]
    pub metadata_file: Option<PathBuf>,

    /// Increase logging verbosity (-v: info, -vv: debug, -vvv: trace)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Only show errors
    #[arg(short = 'q', long = "quiet")]
    pub quiet: bool,
}

impl MergeArgs {
    /// Logging level derived from the verbosity flags
    pub fn log_level(&self) -> &'static str {
        log_level(self.verbose, self.quiet)
    }

    /// Assemble the operator-entered run metadata. Values from a metadata
    /// file are applied first so explicit options override them; the run
    /// number always comes from `--run-number`.
    pub fn run_metadata(&self, file_values: Option<HashMap<String, String>>) -> Result<RunMetadata> {
        let mut metadata = RunMetadata::new();

        if let Some(values) = file_values {
            for (field, value) in values {
                metadata.set_operator(&field, value)?;
            }
        }

        let options: [(&str, Option<String>); 17] = [
            ("SequencingLab", self.lab.clone()),
            ("DateRTPCR", self.rt_pcr_date.clone()),
            ("DateVP1PCR", self.vp1_pcr_date.clone()),
            ("RTPCRMachine", self.pcr_machine.clone()),
            ("VP1PCRMachine", self.pcr_machine.clone()),
            (
                "PositiveControlPCRCheck",
                self.positive_control.map(|c| c.report_value().to_string()),
            ),
            (
                "NegativeControlPCRCheck",
                self.negative_control.map(|c| c.report_value().to_string()),
            ),
            ("LibraryPreparationKit", self.library_kit.clone()),
            ("DateSeqRunLoaded", self.seq_date.clone()),
            ("SequencerUsed", self.sequencer.clone()),
            ("FlowCellVersion", self.flow_cell_version.clone()),
            ("FlowCellID", self.flow_cell_id.clone()),
            ("FlowCellPriorUses", self.flow_cell_uses.clone()),
            ("PoresAvilableAtFlowCellCheck", self.pores_available.clone()),
            ("RunHoursDuration", self.run_hours.clone()),
            ("MinKNOWSoftwareVersion", self.minknow_version.clone()),
            ("AnalysisPipelineVersion", self.pipeline_version.clone()),
        ];
        for (field, value) in options {
            if let Some(value) = value {
                metadata.set_operator(field, value)?;
            }
        }
        metadata.set_operator("RunNumber", self.run_number.clone())?;

        Ok(metadata)
    }
}

/// Arguments for the update command
#[derive(Debug, Clone, Parser)]
pub struct UpdateArgs {
    /// Previously produced detailed run report CSV
    #[arg(short = 'p', long = "report", value_name = "FILE")]
    pub report: PathBuf,

    /// Refreshed EpiInfo export CSV
    #[arg(short = 'e', long = "epi", value_name = "FILE")]
    pub epi: PathBuf,

    /// Directory the updated report is written to (defaults to the current
    /// directory)
    #[arg(short = 'd', long = "destination", value_name = "DIR")]
    pub destination: Option<PathBuf>,

    /// Run number used to name the output; derived from the report's
    /// RunNumber column when omitted
    #[arg(short = 'r', long = "run-number", value_name = "RUN")]
    pub run_number: Option<String>,

    /// Field delimiter of the input and output files
    #[arg(long = "delimiter", value_name = "CHAR", default_value = ",")]
    pub delimiter: char,

    /// Increase logging verbosity (-v: info, -vv: debug, -vvv: trace)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Only show errors
    #[arg(short = 'q', long = "quiet")]
    pub quiet: bool,
}

impl UpdateArgs {
    /// Logging level derived from the verbosity flags
    pub fn log_level(&self) -> &'static str {
        log_level(self.verbose, self.quiet)
    }
}

/// Arguments for the template command
#[derive(Debug, Clone, Parser)]
pub struct TemplateArgs {
    /// Which template to generate
    #[arg(short = 'k', long = "kind", value_enum, value_name = "KIND")]
    pub kind: TemplateKind,

    /// Directory the template is written to (defaults to the Downloads
    /// folder, falling back to the current directory)
    #[arg(short = 'd', long = "destination", value_name = "DIR")]
    pub destination: Option<PathBuf>,

    /// Prefill the samples template with the 96 standard barcode rows
    #[arg(long = "prefill-barcodes")]
    pub prefill_barcodes: bool,

    /// Run number used to name a samples template as a run's barcodes sheet
    #[arg(short = 'r', long = "run-number", value_name = "RUN")]
    pub run_number: Option<String>,

    /// Field delimiter of the output file
    #[arg(long = "delimiter", value_name = "CHAR", default_value = ",")]
    pub delimiter: char,

    /// Increase logging verbosity (-v: info, -vv: debug, -vvv: trace)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Only show errors
    #[arg(short = 'q', long = "quiet")]
    pub quiet: bool,
}

impl TemplateArgs {
    /// Logging level derived from the verbosity flags
    pub fn log_level(&self) -> &'static str {
        log_level(self.verbose, self.quiet)
    }
}

/// Template kinds selectable on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum TemplateKind {
    /// EpiInfo export columns
    Epi,
    /// Sample/barcode sheet columns
    Samples,
    /// Full detailed run report columns
    Report,
}

impl TemplateKind {
    /// The registry kind this template maps to
    pub fn table_kind(self) -> TableKind {
        match self {
            TemplateKind::Epi => TableKind::EpiInfo,
            TemplateKind::Samples => TableKind::SampleSheet,
            TemplateKind::Report => TableKind::OutputReport,
        }
    }
}

/// PCR control outcomes, normalized to the report's Pass/Fail vocabulary
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ControlResult {
    /// Control behaved as expected
    #[value(alias = "passed", alias = "true")]
    Pass,
    /// Control failed
    #[value(alias = "failed", alias = "false")]
    Fail,
}

impl ControlResult {
    /// The value written into the report
    pub fn report_value(self) -> &'static str {
        match self {
            ControlResult::Pass => "Pass",
            ControlResult::Fail => "Fail",
        }
    }
}

/// Map verbosity flags to a tracing level name
fn log_level(verbose: u8, quiet: bool) -> &'static str {
    if quiet {
        return "error";
    }
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Parse a delimiter option into its single byte
pub fn delimiter_byte(delimiter: char) -> Result<u8> {
    if delimiter.is_ascii() {
        Ok(delimiter as u8)
    } else {
        Err(Error::configuration(format!(
            "delimiter '{delimiter}' is not a single ASCII character"
        )))
    }
}
