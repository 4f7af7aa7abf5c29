//! Detailed run report composition
//!
//! Assembles the final column order (sample columns, Epi columns, run-constant
//! columns, reserved blank columns) and serializes it; re-applies fresh Epi
//! data onto a previously produced report without touching manually completed
//! columns; emits header-only templates straight from the schema registry.

pub mod composer;
pub mod updater;

#[cfg(test)]
mod tests;

pub use composer::{compose_new, compose_template};
pub use updater::update_report;
