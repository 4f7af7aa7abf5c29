//! Canonical column schemas for every table kind
//!
//! The registry is a pure lookup over the column data in [`crate::constants`].
//! It resolves the configured key-column names into the required sets and owns
//! the output report layout: sample columns, then Epi columns (minus the join
//! key), then run-constant columns, then the reserved blank columns.

use crate::app::models::TableKind;
use crate::config::MergeConfig;
use crate::constants::{
    DEFAULT_EPI_KEY, DEFAULT_SAMPLE_KEY, EPI_COLUMNS, RESERVED_COLUMNS, RUN_FIELDS, SAMPLE_COLUMNS,
};

/// Pure lookup service for required columns and the output layout
pub struct SchemaRegistry;

impl SchemaRegistry {
    /// Required columns for an input/output kind, in canonical order.
    /// Never fails; the instrument report is schema-free and yields an
    /// empty set.
    pub fn required_columns(kind: TableKind, config: &MergeConfig) -> Vec<String> {
        match kind {
            TableKind::EpiInfo => {
                substitute_key(EPI_COLUMNS, DEFAULT_EPI_KEY, &config.epi_key_column)
            }
            TableKind::SampleSheet => {
                substitute_key(SAMPLE_COLUMNS, DEFAULT_SAMPLE_KEY, &config.sample_key_column)
            }
            TableKind::InstrumentReport => Vec::new(),
            TableKind::OutputReport => Self::output_layout(config),
        }
    }

    /// Epi columns copied onto each joined row (everything except the join key)
    pub fn epi_enrichment_columns(config: &MergeConfig) -> Vec<String> {
        substitute_key(EPI_COLUMNS, DEFAULT_EPI_KEY, &config.epi_key_column)
            .into_iter()
            .filter(|column| *column != config.epi_key_column)
            .collect()
    }

    /// Full column order of the detailed run report
    pub fn output_layout(config: &MergeConfig) -> Vec<String> {
        let mut layout =
            substitute_key(SAMPLE_COLUMNS, DEFAULT_SAMPLE_KEY, &config.sample_key_column);
        layout.extend(Self::epi_enrichment_columns(config));
        layout.extend(RUN_FIELDS.iter().map(|field| field.column.to_string()));
        layout.extend(RESERVED_COLUMNS.iter().map(|column| column.to_string()));
        layout.dedup();
        layout
    }
}

/// Replace the default key column name with the configured one. If the
/// configured key is already one of the columns, the set is kept as-is.
fn substitute_key(columns: &[&str], default_key: &str, key: &str) -> Vec<String> {
    if columns.contains(&key) {
        return columns.iter().map(|c| c.to_string()).collect();
    }
    columns
        .iter()
        .map(|c| {
            if *c == default_key {
                key.to_string()
            } else {
                c.to_string()
            }
        })
        .collect()
}
