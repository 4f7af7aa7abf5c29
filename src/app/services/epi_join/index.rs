//! Key index over the EpiInfo export

use crate::app::models::Table;
use crate::{Error, Result};
use std::collections::{HashMap, HashSet};
use tracing::debug;

/// Index from sample-identifier value to Epi row position
///
/// Duplicate keys are recorded rather than rejected at build time: a
/// duplicate only becomes an error when a lookup actually references it.
/// Rows with an empty key are ignored; EpiInfo exports routinely carry
/// placeholder rows.
#[derive(Debug)]
pub struct EpiIndex {
    key_column: String,
    by_key: HashMap<String, usize>,
    duplicate_keys: HashSet<String>,
}

impl EpiIndex {
    /// Build an index over the Epi table's key column
    pub fn build(epi: &Table, key_column: &str) -> Result<Self> {
        let key_index = epi.column_index(key_column).ok_or_else(|| {
            Error::configuration(format!("Epi table has no key column '{key_column}'"))
        })?;

        let mut by_key = HashMap::with_capacity(epi.row_count());
        let mut duplicate_keys = HashSet::new();

        for (row, cells) in epi.rows().iter().enumerate() {
            let key = cells[key_index].trim();
            if key.is_empty() {
                debug!("ignoring Epi row {} with empty key", row + 1);
                continue;
            }
            if by_key.insert(key.to_string(), row).is_some() {
                duplicate_keys.insert(key.to_string());
            }
        }

        if !duplicate_keys.is_empty() {
            debug!(
                "Epi table has {} duplicated keys; they error only if referenced",
                duplicate_keys.len()
            );
        }

        Ok(Self {
            key_column: key_column.to_string(),
            by_key,
            duplicate_keys,
        })
    }

    /// Resolve a key to an Epi row position.
    ///
    /// Returns `Ok(None)` for an unknown key and [`Error::DuplicateKey`] for
    /// a key that appears more than once in the export.
    pub fn lookup(&self, key: &str) -> Result<Option<usize>> {
        if self.duplicate_keys.contains(key) {
            return Err(Error::duplicate_key(&self.key_column, key));
        }
        Ok(self.by_key.get(key).copied())
    }

    /// Number of uniquely keyed rows
    pub fn len(&self) -> usize {
        self.by_key.len()
    }

    /// Whether the index holds no keys
    pub fn is_empty(&self) -> bool {
        self.by_key.is_empty()
    }
}
