//! Tests for delimited text parsing and schema validation

use crate::app::models::TableKind;
use crate::app::services::table_io::{read_table, validate_schema};
use crate::config::MergeConfig;
use crate::Error;

#[test]
fn test_read_simple_csv() {
    let table = read_table(b"sample,barcode\nS1,barcode01\nS2,barcode02\n", b',').unwrap();
    assert_eq!(table.header(), &["sample", "barcode"]);
    assert_eq!(table.row_count(), 2);
    assert_eq!(table.value(0, "sample"), Some("S1"));
    assert_eq!(table.value(1, "barcode"), Some("barcode02"));
}

#[test]
fn test_read_strips_utf8_bom() {
    let table = read_table(b"\xef\xbb\xbfsample,barcode\nS1,barcode01\n", b',').unwrap();
    assert_eq!(table.header()[0], "sample");
}

#[test]
fn test_read_semicolon_delimited() {
    let table = read_table(b"sample;barcode\nS1;barcode01\n", b';').unwrap();
    assert_eq!(table.value(0, "barcode"), Some("barcode01"));
}

#[test]
fn test_read_quoted_fields() {
    let table = read_table(
        b"sample,QCComments\nS1,\"retest, low pores\"\nS2,\"line\nbreak\"\n",
        b',',
    )
    .unwrap();
    assert_eq!(table.value(0, "QCComments"), Some("retest, low pores"));
    assert_eq!(table.value(1, "QCComments"), Some("line\nbreak"));
}

#[test]
fn test_read_reports_malformed_row() {
    let result = read_table(b"sample,barcode\nS1,barcode01\nS2\n", b',');
    match result {
        Err(Error::MalformedRow {
            row,
            expected,
            found,
        }) => {
            assert_eq!(row, 2);
            assert_eq!(expected, 2);
            assert_eq!(found, 1);
        }
        other => panic!("expected MalformedRow, got {other:?}"),
    }
}

#[test]
fn test_read_skips_blank_rows() {
    let table = read_table(b"sample,barcode\nS1,barcode01\n,\n\nS2,barcode02\n", b',').unwrap();
    assert_eq!(table.row_count(), 2);
    assert_eq!(table.value(1, "sample"), Some("S2"));
}

#[test]
fn test_read_empty_input_fails() {
    assert!(read_table(b"", b',').is_err());
    assert!(read_table(b"\n\n", b',').is_err());
}

#[test]
fn test_read_duplicate_header_fails() {
    let result = read_table(b"sample,sample\nS1,S1\n", b',');
    assert!(matches!(result, Err(Error::CsvParsing { .. })));
}

#[test]
fn test_read_replaces_invalid_utf8() {
    // A stray Latin-1 byte must not abort the load
    let table = read_table(b"sample,barcode\nS\xe9,barcode01\n", b',').unwrap();
    assert_eq!(table.row_count(), 1);
}

#[test]
fn test_validate_schema_passes_complete_sheet() {
    let config = MergeConfig::default();
    let table = read_table(b"sample,barcode\nS1,barcode01\n", b',').unwrap();
    assert!(validate_schema(&table, TableKind::SampleSheet, &config).is_ok());
}

#[test]
fn test_validate_schema_lists_missing_columns() {
    let config = MergeConfig::default();
    let table = read_table(b"sample\nS1\n", b',').unwrap();
    match validate_schema(&table, TableKind::SampleSheet, &config) {
        Err(Error::SchemaMismatch { kind, missing }) => {
            assert_eq!(kind, TableKind::SampleSheet);
            assert_eq!(missing, vec!["barcode".to_string()]);
        }
        other => panic!("expected SchemaMismatch, got {other:?}"),
    }
}

#[test]
fn test_validate_schema_tolerates_unexpected_columns() {
    let config = MergeConfig::default();
    let table = read_table(b"sample,barcode,Well\nS1,barcode01,A01\n", b',').unwrap();
    assert!(validate_schema(&table, TableKind::SampleSheet, &config).is_ok());
}

#[test]
fn test_validate_schema_is_case_sensitive() {
    let config = MergeConfig::default();
    let table = read_table(b"Sample,Barcode\nS1,barcode01\n", b',').unwrap();
    match validate_schema(&table, TableKind::SampleSheet, &config) {
        Err(Error::SchemaMismatch { missing, .. }) => {
            assert_eq!(missing, vec!["sample".to_string(), "barcode".to_string()]);
        }
        other => panic!("expected SchemaMismatch, got {other:?}"),
    }
}

#[test]
fn test_validate_schema_instrument_report_is_schema_free() {
    let config = MergeConfig::default();
    let table = read_table(b"anything\ngoes\n", b',').unwrap();
    assert!(validate_schema(&table, TableKind::InstrumentReport, &config).is_ok());
}
