//! Configuration for merge, update and template operations.
//!
//! The engine is parameterized by a small, serializable configuration value:
//! the CSV delimiter and the names of the sample-identifier columns on each
//! side of the join. Everything else (schemas, field precedence, reserved
//! columns) is registry data in [`crate::constants`].

use crate::constants::{DEFAULT_EPI_KEY, DEFAULT_SAMPLE_KEY};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};

/// Options applied to every engine operation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MergeConfig {
    /// Field delimiter of all delimited inputs and outputs
    pub delimiter: u8,

    /// Sample-identifier column in the sample/barcode sheet (and in any
    /// previously produced report being updated)
    pub sample_key_column: String,

    /// Sample-identifier column in the EpiInfo export
    pub epi_key_column: String,
}

impl Default for MergeConfig {
    fn default() -> Self {
        Self {
            delimiter: b',',
            sample_key_column: DEFAULT_SAMPLE_KEY.to_string(),
            epi_key_column: DEFAULT_EPI_KEY.to_string(),
        }
    }
}

impl MergeConfig {
    /// Create a configuration with a non-default delimiter
    pub fn with_delimiter(delimiter: u8) -> Self {
        Self {
            delimiter,
            ..Self::default()
        }
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.delimiter == b'"' || self.delimiter == b'\n' || self.delimiter == b'\r' {
            return Err(Error::configuration(format!(
                "invalid delimiter byte {:#04x}: must not be a quote or line break",
                self.delimiter
            )));
        }

        if self.sample_key_column.trim().is_empty() {
            return Err(Error::configuration(
                "sample key column name cannot be empty",
            ));
        }

        if self.epi_key_column.trim().is_empty() {
            return Err(Error::configuration("epi key column name cannot be empty"));
        }

        Ok(())
    }
}
