//! Run Report Merger Library
//!
//! A Rust library for reconciling poliovirus DDNS sequencing run data into a
//! single detailed run report ready for downstream pipeline analysis.
//!
//! This library provides tools for:
//! - Parsing delimited sample/barcode sheets and EpiInfo database exports
//! - Validating required columns against the canonical schema registry
//! - Joining lab samples against epidemiological case data by sample identifier
//! - Broadcasting run-constant metadata with a declared per-field precedence
//! - Extracting run metrics from MinKNOW sequencing reports
//! - Composing, updating and templating the detailed run report CSV
//!
//! The engine itself is pure: it receives byte buffers and returns byte
//! buffers. All file I/O lives in the CLI shell under [`cli`].

pub mod config;
pub mod constants;

// Core application modules
pub mod app {
    pub mod engine;
    pub mod models;
    pub mod services {
        pub mod epi_join;
        pub mod report_composer;
        pub mod run_metadata;
        pub mod schema_registry;
        pub mod table_io;
    }
}

// CLI modules
pub mod cli {
    pub mod args;
    pub mod commands;
}

// Re-export commonly used types
pub use app::models::{RunMetadata, Table, TableKind};
pub use config::MergeConfig;

/// Result type alias for run report merging operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for run report merging operations
///
/// Every validation failure carries enough structured context for a shell to
/// render a user-facing diagnostic (which columns, which row, which key)
/// without string parsing.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// Required columns are absent from an input file
    #[error("missing required columns in {kind} file: {}", missing.join(", "))]
    SchemaMismatch {
        kind: TableKind,
        missing: Vec<String>,
    },

    /// A data row's field count does not match the header
    #[error("malformed row {row}: expected {expected} fields, found {found}")]
    MalformedRow {
        row: usize,
        expected: usize,
        found: usize,
    },

    /// A key column contains the same value twice where uniqueness is required
    #[error("duplicate value '{value}' in key column '{column}'")]
    DuplicateKey { column: String, value: String },

    /// A key column contains an empty value
    #[error("empty value in key column '{column}' at row {row}")]
    MissingKey { column: String, row: usize },

    /// A sample identifier has no matching row in the Epi Info export
    #[error("sample '{value}' has no matching row in the Epi Info export")]
    UnmatchedSampleKey { value: String },

    /// The instrument report bytes cannot be decoded as text
    #[error("instrument report is unreadable: {message}")]
    UnreadableReport { message: String },

    /// Operator-entered run metadata failed format validation
    #[error("invalid run metadata: {}", problems.join("; "))]
    InvalidMetadata { problems: Vec<String> },

    /// Configuration error
    #[error("configuration error: {message}")]
    Configuration { message: String },

    /// I/O operation failed
    #[error("I/O error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// CSV parsing error
    #[error("CSV parsing error: {message}")]
    CsvParsing {
        message: String,
        #[source]
        source: Option<csv::Error>,
    },
}

impl Error {
    /// Create a schema mismatch error listing the missing columns
    pub fn schema_mismatch(kind: TableKind, missing: Vec<String>) -> Self {
        Self::SchemaMismatch { kind, missing }
    }

    /// Create a malformed row error for a 1-based data row index
    pub fn malformed_row(row: usize, expected: usize, found: usize) -> Self {
        Self::MalformedRow {
            row,
            expected,
            found,
        }
    }

    /// Create a duplicate key error
    pub fn duplicate_key(column: impl Into<String>, value: impl Into<String>) -> Self {
        Self::DuplicateKey {
            column: column.into(),
            value: value.into(),
        }
    }

    /// Create a missing key error for a 1-based data row index
    pub fn missing_key(column: impl Into<String>, row: usize) -> Self {
        Self::MissingKey {
            column: column.into(),
            row,
        }
    }

    /// Create an unmatched sample key error
    pub fn unmatched_sample_key(value: impl Into<String>) -> Self {
        Self::UnmatchedSampleKey {
            value: value.into(),
        }
    }

    /// Create an unreadable instrument report error
    pub fn unreadable_report(message: impl Into<String>) -> Self {
        Self::UnreadableReport {
            message: message.into(),
        }
    }

    /// Create an invalid metadata error from a list of problems
    pub fn invalid_metadata(problems: Vec<String>) -> Self {
        Self::InvalidMetadata { problems }
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create an I/O error with context
    pub fn io(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source,
        }
    }

    /// Create a CSV parsing error with context
    pub fn csv_parsing(message: impl Into<String>, source: Option<csv::Error>) -> Self {
        Self::CsvParsing {
            message: message.into(),
            source,
        }
    }
}

// Automatic conversions from common error types
impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        Self::Io {
            message: "I/O operation failed".to_string(),
            source: error,
        }
    }
}

impl From<csv::Error> for Error {
    fn from(error: csv::Error) -> Self {
        Self::CsvParsing {
            message: "CSV parsing failed".to_string(),
            source: Some(error),
        }
    }
}
