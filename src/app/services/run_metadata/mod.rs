//! Run-constant metadata: broadcast merging and instrument report extraction
//!
//! Every run-constant column is filled by consulting its declared source
//! priority from [`crate::constants::RUN_FIELDS`]: an operator-entered value
//! first, then whatever the sample sheet already carries, then a metric
//! extracted from the MinKNOW report. The merge never fails; a field with no
//! value anywhere renders blank.

pub mod instrument_report;
pub mod merger;

#[cfg(test)]
mod tests;

pub use instrument_report::extract;
pub use merger::apply_run_metadata;
