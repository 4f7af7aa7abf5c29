//! Key-based joining of the sample sheet against the EpiInfo export
//!
//! The join is asymmetric by design: every sample-sheet key must resolve to
//! exactly one Epi row (an incomplete report is worse than no report), while
//! the Epi export may carry any number of extra rows that are silently
//! dropped. Duplicate keys are a hard error on the sample side always, and on
//! the Epi side only when a sample row actually references them.

pub mod index;
pub mod join;
pub mod normalize;

#[cfg(test)]
mod tests;

pub use index::EpiIndex;
pub use join::{join, with_blank_epi};
pub use normalize::fold_ascii;
