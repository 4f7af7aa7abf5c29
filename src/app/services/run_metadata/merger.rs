//! Broadcasting run-constant fields onto every joined row

use crate::app::models::{RunMetadata, Table};
use crate::constants::{FieldSource, RUN_FIELDS, RunField};

/// Append and fill every run-constant column on the table.
///
/// Each field resolves per row by walking its declared priority list and
/// taking the first non-blank value; rows end up identical for a field
/// unless the sheet itself carried per-row values. Infallible by design:
/// absent metadata leaves the field blank.
pub fn apply_run_metadata(table: &mut Table, metadata: &RunMetadata) {
    for field in RUN_FIELDS {
        table.ensure_column(field.column);
        let Some(index) = table.column_index(field.column) else {
            continue;
        };
        for cells in table.rows_mut() {
            let resolved = resolve(field, &cells[index], metadata);
            if cells[index] != resolved {
                cells[index] = resolved;
            }
        }
    }
}

/// First non-blank value in the field's priority order, else empty
fn resolve(field: &RunField, sheet_value: &str, metadata: &RunMetadata) -> String {
    for source in field.priority {
        let candidate = match source {
            FieldSource::Operator => metadata.value_from(field.column, FieldSource::Operator),
            FieldSource::Instrument => metadata.value_from(field.column, FieldSource::Instrument),
            FieldSource::Sheet => {
                if sheet_value.trim().is_empty() {
                    None
                } else {
                    Some(sheet_value)
                }
            }
        };
        if let Some(value) = candidate {
            if !value.trim().is_empty() {
                return value.to_string();
            }
        }
    }
    String::new()
}
