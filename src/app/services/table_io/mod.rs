//! CSV loading, schema validation and serialization
//!
//! This module is the only place CSV bytes are parsed or produced. Parsing
//! yields a header-indexed [`crate::app::models::Table`]; serialization is
//! deterministic (stable header order, fields quoted only when they contain
//! the delimiter, a quote or a line break, UTF-8 output with a trailing
//! newline). The module never touches the filesystem: callers own all I/O.

pub mod reader;
pub mod writer;

#[cfg(test)]
mod tests;

pub use reader::{read_table, validate_schema};
pub use writer::write_table;
