//! Application constants for the run report merger
//!
//! This module holds the canonical schema data: required column sets for each
//! input kind, the run-constant field table with its declared source
//! precedence, the instrument report label mappings, output file naming, and
//! the operator input format patterns. Adding or removing a column anywhere in
//! the report is a data change here, not a code change elsewhere.

use regex::Regex;
use std::sync::OnceLock;

// =============================================================================
// Required Columns per Input Kind
// =============================================================================

/// Required columns of an EpiInfo database export. The first entry is the
/// default sample-identifier (join key) column.
pub const EPI_COLUMNS: &[&str] = &[
    "ICLabID",
    "EpidNumber",
    "CaseOrContact",
    "Country",
    "Province",
    "District",
    "StoolCondition",
    "SpecimenNumber",
    "DateOfOnset",
    "DateStoolCollected",
    "DateStoolSentfromField",
    "DateStoolReceivedNatLevel",
    "DateStoolSentToLab",
    "DateStoolReceivedinLab",
    "FinalCellCultureResult",
    "DateFinalCellCultureResults",
    "FinalITDResult",
    "DateFinalrRTPCRResults",
    "DateIsolateSentforSeq",
    "SequenceName",
    "DateSeqResult",
];

/// Required columns of the operator-filled sample/barcode sheet. The first
/// entry is the default sample-identifier (join key) column.
pub const SAMPLE_COLUMNS: &[&str] = &["sample", "barcode"];

/// Default join key column names
pub const DEFAULT_SAMPLE_KEY: &str = "sample";
pub const DEFAULT_EPI_KEY: &str = "ICLabID";

// =============================================================================
// Run-Constant Field Table
// =============================================================================

/// Where a run-constant value may come from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldSource {
    /// Entered by the operator in the shell
    Operator,
    /// Already present in the sample sheet row
    Sheet,
    /// Extracted from the instrument report
    Instrument,
}

/// One run-constant output column and its declared source precedence
#[derive(Debug, Clone, Copy)]
pub struct RunField {
    /// Output column name (also the recognized metadata key)
    pub column: &'static str,
    /// Sources to consult, highest priority first; the first non-empty value
    /// wins, otherwise the field renders blank
    pub priority: &'static [FieldSource],
    /// Whether the value must be a `yyyy-mm-dd` calendar date
    pub date_valued: bool,
}

/// Source precedence for fields the instrument report never provides
const OPERATOR_THEN_SHEET: &[FieldSource] = &[FieldSource::Operator, FieldSource::Sheet];

/// Source precedence for fields the instrument report can provide
const OPERATOR_SHEET_INSTRUMENT: &[FieldSource] = &[
    FieldSource::Operator,
    FieldSource::Sheet,
    FieldSource::Instrument,
];

/// All run-constant fields, in output column order.
///
/// An operator-entered value always beats an instrument-extracted one; a
/// value already present in the sample sheet sits between the two so that an
/// instrument metric never overwrites hand-filled sheet data.
pub const RUN_FIELDS: &[RunField] = &[
    RunField {
        column: "SequencingLab",
        priority: OPERATOR_THEN_SHEET,
        date_valued: false,
    },
    RunField {
        column: "RunNumber",
        priority: OPERATOR_THEN_SHEET,
        date_valued: false,
    },
    RunField {
        column: "DateRTPCR",
        priority: OPERATOR_THEN_SHEET,
        date_valued: true,
    },
    RunField {
        column: "RTPCRMachine",
        priority: OPERATOR_THEN_SHEET,
        date_valued: false,
    },
    RunField {
        column: "DateVP1PCR",
        priority: OPERATOR_THEN_SHEET,
        date_valued: true,
    },
    RunField {
        column: "VP1PCRMachine",
        priority: OPERATOR_THEN_SHEET,
        date_valued: false,
    },
    RunField {
        column: "PositiveControlPCRCheck",
        priority: OPERATOR_THEN_SHEET,
        date_valued: false,
    },
    RunField {
        column: "NegativeControlPCRCheck",
        priority: OPERATOR_THEN_SHEET,
        date_valued: false,
    },
    RunField {
        column: "LibraryPreparationKit",
        priority: OPERATOR_SHEET_INSTRUMENT,
        date_valued: false,
    },
    RunField {
        column: "DateSeqRunLoaded",
        priority: OPERATOR_SHEET_INSTRUMENT,
        date_valued: true,
    },
    RunField {
        column: "SequencerUsed",
        priority: OPERATOR_THEN_SHEET,
        date_valued: false,
    },
    RunField {
        column: "FlowCellVersion",
        priority: OPERATOR_THEN_SHEET,
        date_valued: false,
    },
    RunField {
        column: "FlowCellID",
        priority: OPERATOR_SHEET_INSTRUMENT,
        date_valued: false,
    },
    RunField {
        column: "FlowCellPriorUses",
        priority: OPERATOR_THEN_SHEET,
        date_valued: false,
    },
    RunField {
        column: "PoresAvilableAtFlowCellCheck",
        priority: OPERATOR_SHEET_INSTRUMENT,
        date_valued: false,
    },
    RunField {
        column: "MinKNOWSoftwareVersion",
        priority: OPERATOR_SHEET_INSTRUMENT,
        date_valued: false,
    },
    RunField {
        column: "RunHoursDuration",
        priority: OPERATOR_SHEET_INSTRUMENT,
        date_valued: false,
    },
    RunField {
        column: "DateFastaGenerated",
        priority: OPERATOR_THEN_SHEET,
        date_valued: true,
    },
    RunField {
        column: "AnalysisPipelineVersion",
        priority: OPERATOR_THEN_SHEET,
        date_valued: false,
    },
];

/// Look up a run field by its column name
pub fn run_field(column: &str) -> Option<&'static RunField> {
    RUN_FIELDS.iter().find(|f| f.column == column)
}

// =============================================================================
// Reserved Columns
// =============================================================================

/// Output columns intentionally left blank for later manual completion
/// (QC review, classification, VDPV emergence-group assignment).
pub const RESERVED_COLUMNS: &[&str] = &[
    "RunQC",
    "DDNSclassification",
    "SampleQC",
    "SampleQCChecksComplete",
    "QCComments",
    "ToReport",
    "DateReported",
    "EmergenceGroupVDPV1",
    "EmergenceGroupVDPV2",
    "EmergenceGroupVDPV3",
];

// =============================================================================
// Instrument Report Extraction
// =============================================================================

/// Marker preceding the embedded JSON payload in a MinKNOW HTML report
pub const REPORT_DATA_MARKER: &str = "const reportData=";

/// A labelled metric recognized in text-form instrument reports.
/// Labels are matched after lowercasing and whitespace collapsing.
#[derive(Debug, Clone, Copy)]
pub struct InstrumentLabel {
    pub label: &'static str,
    pub column: &'static str,
}

/// Labels extracted from text-form instrument reports, including the aliases
/// seen across MinKNOW versions
pub const INSTRUMENT_LABELS: &[InstrumentLabel] = &[
    InstrumentLabel {
        label: "minknow version",
        column: "MinKNOWSoftwareVersion",
    },
    InstrumentLabel {
        label: "minknow software version",
        column: "MinKNOWSoftwareVersion",
    },
    InstrumentLabel {
        label: "flow cell id",
        column: "FlowCellID",
    },
    InstrumentLabel {
        label: "kit type",
        column: "LibraryPreparationKit",
    },
    InstrumentLabel {
        label: "library preparation kit",
        column: "LibraryPreparationKit",
    },
    InstrumentLabel {
        label: "run limit",
        column: "RunHoursDuration",
    },
    InstrumentLabel {
        label: "run hours",
        column: "RunHoursDuration",
    },
    InstrumentLabel {
        label: "pore available",
        column: "PoresAvilableAtFlowCellCheck",
    },
    InstrumentLabel {
        label: "pores available",
        column: "PoresAvilableAtFlowCellCheck",
    },
    InstrumentLabel {
        label: "run end time",
        column: "DateSeqRunLoaded",
    },
];

// =============================================================================
// Output File Naming
// =============================================================================

/// Number of barcodes on a 96-well nanopore barcoding kit
pub const BARCODE_COUNT: usize = 96;

/// File name for a merged or updated detailed run report
pub fn detailed_report_file_name(run_number: &str) -> String {
    format!("{run_number}_detailed_run_report.csv")
}

/// File name for a run-numbered barcodes sheet
pub fn barcodes_file_name(run_number: &str) -> String {
    format!("{run_number}_barcodes.csv")
}

/// Default file names for the template outputs
pub const TEMPLATE_BARCODES_FILE_NAME: &str = "template_barcodes.csv";
pub const TEMPLATE_EPI_FILE_NAME: &str = "template_epi.csv";
pub const TEMPLATE_REPORT_FILE_NAME: &str = "template_report.csv";

// =============================================================================
// Operator Input Formats
// =============================================================================

/// Run numbers follow the `yyyymmdd_NNN` convention used by MinKNOW run folders
pub fn run_number_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\d{8}_\d{3}$").expect("valid run number regex"))
}

/// Date-valued metadata fields use ISO `yyyy-mm-dd`
pub fn date_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("valid date regex"))
}
