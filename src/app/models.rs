//! Data models for run report merging
//!
//! This module contains the core data structures: the in-memory [`Table`]
//! every operation works over, the [`TableKind`] discriminator used by schema
//! validation, and the [`RunMetadata`] map of run-constant values.

use crate::constants::{self, FieldSource};
use crate::{Error, Result};
use chrono::NaiveDate;
use std::collections::{HashMap, HashSet};
use std::fmt;

// =============================================================================
// Table Kind
// =============================================================================

/// The input/output kinds known to the schema registry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TableKind {
    /// EpiInfo database export: authoritative demographic/case data
    EpiInfo,
    /// Operator-filled sample/barcode sheet
    SampleSheet,
    /// Semi-structured MinKNOW instrument report (schema-free)
    InstrumentReport,
    /// The composed detailed run report
    OutputReport,
}

impl fmt::Display for TableKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TableKind::EpiInfo => "Epi Info",
            TableKind::SampleSheet => "sample sheet",
            TableKind::InstrumentReport => "instrument report",
            TableKind::OutputReport => "detailed run report",
        };
        write!(f, "{name}")
    }
}

// =============================================================================
// Table
// =============================================================================

/// An ordered, header-indexed table of string values
///
/// Invariants, enforced on every mutation path:
/// - no two header entries are equal (case-sensitive comparison)
/// - every row has exactly as many cells as the header has columns
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    header: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    /// Create an empty table with the given header
    pub fn new(header: Vec<String>) -> Result<Self> {
        let mut seen = HashSet::new();
        for name in &header {
            if !seen.insert(name.as_str()) {
                return Err(Error::csv_parsing(
                    format!("duplicate column '{name}' in header"),
                    None,
                ));
            }
        }
        Ok(Self {
            header,
            rows: Vec::new(),
        })
    }

    /// Append a data row; its cell count must match the header width
    pub fn push_row(&mut self, cells: Vec<String>) -> Result<()> {
        if cells.len() != self.header.len() {
            return Err(Error::malformed_row(
                self.rows.len() + 1,
                self.header.len(),
                cells.len(),
            ));
        }
        self.rows.push(cells);
        Ok(())
    }

    /// Column names in order
    pub fn header(&self) -> &[String] {
        &self.header
    }

    /// Data rows in order
    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    /// Mutable access to data rows; callers must not change row widths
    pub(crate) fn rows_mut(&mut self) -> &mut [Vec<String>] {
        &mut self.rows
    }

    /// Number of data rows
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table has no data rows
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Position of a column by exact name
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.header.iter().position(|c| c == name)
    }

    /// Whether a column exists by exact name
    pub fn has_column(&self, name: &str) -> bool {
        self.column_index(name).is_some()
    }

    /// Value of a cell by row index and column name
    pub fn value(&self, row: usize, column: &str) -> Option<&str> {
        let index = self.column_index(column)?;
        self.rows.get(row).map(|cells| cells[index].as_str())
    }

    /// Overwrite a cell by row index and column name
    pub fn set_value(&mut self, row: usize, column: &str, value: impl Into<String>) -> Result<()> {
        let index = self.column_index(column).ok_or_else(|| {
            Error::configuration(format!("cannot set value: no column named '{column}'"))
        })?;
        let cells = self.rows.get_mut(row).ok_or_else(|| {
            Error::configuration(format!("cannot set value: no row at index {row}"))
        })?;
        cells[index] = value.into();
        Ok(())
    }

    /// Add a column with empty values in every row, unless it already exists
    pub fn ensure_column(&mut self, name: &str) {
        if self.has_column(name) {
            return;
        }
        self.header.push(name.to_string());
        for cells in &mut self.rows {
            cells.push(String::new());
        }
    }

    /// Remove a column and its values; no-op if the column does not exist
    pub fn drop_column(&mut self, name: &str) {
        if let Some(index) = self.column_index(name) {
            self.header.remove(index);
            for cells in &mut self.rows {
                cells.remove(index);
            }
        }
    }

    /// Rename a column, preserving its position
    pub fn rename_column(&mut self, from: &str, to: &str) -> Result<()> {
        if from != to && self.has_column(to) {
            return Err(Error::csv_parsing(
                format!("cannot rename '{from}' to '{to}': column already exists"),
                None,
            ));
        }
        let index = self.column_index(from).ok_or_else(|| {
            Error::configuration(format!("cannot rename: no column named '{from}'"))
        })?;
        self.header[index] = to.to_string();
        Ok(())
    }
}

// =============================================================================
// Run Metadata
// =============================================================================

/// A single run-constant value with its declared origin
#[derive(Debug, Clone, PartialEq)]
pub struct MetadataValue {
    pub value: String,
    pub source: FieldSource,
}

/// Run-constant field values, keyed by output column name
///
/// Only the fields enumerated in [`constants::RUN_FIELDS`] are accepted.
/// Absent fields are valid and render as empty cells, never an error.
/// An operator-entered value is never displaced by an instrument value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunMetadata {
    values: HashMap<String, MetadataValue>,
}

impl RunMetadata {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an operator-entered value. Blank values are ignored;
    /// unrecognized field names are a configuration error.
    pub fn set_operator(&mut self, field: &str, value: impl Into<String>) -> Result<()> {
        self.set(field, value.into(), FieldSource::Operator)
    }

    /// Record an instrument-extracted value. Blank values are ignored;
    /// an existing operator entry for the field is kept untouched.
    pub fn set_instrument(&mut self, field: &str, value: impl Into<String>) -> Result<()> {
        if matches!(
            self.values.get(field),
            Some(MetadataValue {
                source: FieldSource::Operator,
                ..
            })
        ) {
            return Ok(());
        }
        self.set(field, value.into(), FieldSource::Instrument)
    }

    fn set(&mut self, field: &str, value: String, source: FieldSource) -> Result<()> {
        let definition = constants::run_field(field).ok_or_else(|| {
            Error::configuration(format!("unrecognized run metadata field '{field}'"))
        })?;
        if value.trim().is_empty() {
            return Ok(());
        }
        self.values
            .insert(definition.column.to_string(), MetadataValue { value, source });
        Ok(())
    }

    /// Look up a field's value regardless of source
    pub fn get(&self, field: &str) -> Option<&MetadataValue> {
        self.values.get(field)
    }

    /// Look up a field's value only if it came from the given source
    pub fn value_from(&self, field: &str, source: FieldSource) -> Option<&str> {
        self.values
            .get(field)
            .filter(|entry| entry.source == source)
            .map(|entry| entry.value.as_str())
    }

    /// Number of populated fields
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether no field is populated
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Fold another metadata set's instrument values into this one.
    /// Operator entries here always win over incoming instrument values.
    pub fn absorb_instrument(&mut self, other: RunMetadata) -> Result<()> {
        for (field, entry) in other.values {
            if entry.source == FieldSource::Instrument {
                self.set_instrument(&field, entry.value)?;
            }
        }
        Ok(())
    }

    /// Validate operator input formats, collecting every problem.
    ///
    /// Run numbers must match `yyyymmdd_NNN`; date-valued fields must match
    /// `yyyy-mm-dd` and be a real calendar date. Instrument-extracted values
    /// are not checked: the report is best-effort and its values pass through.
    pub fn validate_formats(&self) -> Result<()> {
        let mut problems = Vec::new();

        for (field, entry) in &self.values {
            if entry.source != FieldSource::Operator {
                continue;
            }

            if field == "RunNumber" && !constants::run_number_pattern().is_match(&entry.value) {
                problems.push(format!(
                    "invalid run number '{}': expected yyyymmdd_NNN",
                    entry.value
                ));
                continue;
            }

            let date_valued =
                constants::run_field(field).is_some_and(|definition| definition.date_valued);
            if date_valued {
                let well_formed = constants::date_pattern().is_match(&entry.value)
                    && NaiveDate::parse_from_str(&entry.value, "%Y-%m-%d").is_ok();
                if !well_formed {
                    problems.push(format!(
                        "invalid date '{}' for field {}: expected yyyy-mm-dd",
                        entry.value, field
                    ));
                }
            }
        }

        if problems.is_empty() {
            Ok(())
        } else {
            problems.sort();
            Err(Error::invalid_metadata(problems))
        }
    }
}
