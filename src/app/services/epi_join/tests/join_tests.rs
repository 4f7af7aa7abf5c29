//! Tests for the join operation

use super::{epi_table, table_from};
use crate::app::services::epi_join::{join, with_blank_epi};
use crate::config::MergeConfig;
use crate::Error;

fn sample_sheet(keys: &[&str]) -> crate::app::models::Table {
    let rows: Vec<Vec<String>> = keys
        .iter()
        .enumerate()
        .map(|(i, key)| vec![key.to_string(), format!("barcode{:02}", i + 1)])
        .collect();
    let borrowed: Vec<Vec<&str>> = rows
        .iter()
        .map(|row| row.iter().map(String::as_str).collect())
        .collect();
    let slices: Vec<&[&str]> = borrowed.iter().map(Vec::as_slice).collect();
    table_from(&["sample", "barcode"], &slices)
}

#[test]
fn test_join_preserves_sample_order_and_count() {
    let config = MergeConfig::default();
    let sample = sample_sheet(&["S3", "S1", "S2"]);
    let epi = epi_table(&["S1", "S2", "S3"]);

    let joined = join(&sample, &epi, &config).unwrap();
    assert_eq!(joined.row_count(), 3);
    assert_eq!(joined.value(0, "sample"), Some("S3"));
    assert_eq!(joined.value(1, "sample"), Some("S1"));
    assert_eq!(joined.value(2, "sample"), Some("S2"));
    // Epi values landed on the right rows
    assert_eq!(joined.value(0, "EpidNumber"), Some("S3-v1-r2"));
    assert_eq!(joined.value(1, "EpidNumber"), Some("S1-v1-r0"));
}

#[test]
fn test_join_header_shape() {
    let config = MergeConfig::default();
    let sample = sample_sheet(&["S1"]);
    let epi = epi_table(&["S1"]);

    let joined = join(&sample, &epi, &config).unwrap();
    assert_eq!(&joined.header()[..2], &["sample", "barcode"]);
    assert!(joined.has_column("EpidNumber"));
    assert!(joined.has_column("DateSeqResult"));
    // The Epi key column does not reappear beside the sample key
    assert!(!joined.has_column("ICLabID"));
}

#[test]
fn test_join_extra_epi_rows_are_dropped() {
    let config = MergeConfig::default();
    let sample = sample_sheet(&["S2"]);
    let epi = epi_table(&["S1", "S2", "S3"]);

    let joined = join(&sample, &epi, &config).unwrap();
    assert_eq!(joined.row_count(), 1);
    assert_eq!(joined.value(0, "sample"), Some("S2"));
}

#[test]
fn test_join_unmatched_sample_key_is_fatal() {
    let config = MergeConfig::default();
    let sample = sample_sheet(&["S1", "S9"]);
    let epi = epi_table(&["S1", "S2"]);

    match join(&sample, &epi, &config) {
        Err(Error::UnmatchedSampleKey { value }) => assert_eq!(value, "S9"),
        other => panic!("expected UnmatchedSampleKey, got {other:?}"),
    }
}

#[test]
fn test_join_duplicate_sample_key_is_fatal() {
    let config = MergeConfig::default();
    let sample = sample_sheet(&["S1", "S1"]);
    let epi = epi_table(&["S1"]);

    match join(&sample, &epi, &config) {
        Err(Error::DuplicateKey { column, value }) => {
            assert_eq!(column, "sample");
            assert_eq!(value, "S1");
        }
        other => panic!("expected DuplicateKey, got {other:?}"),
    }
}

#[test]
fn test_join_empty_sample_key_is_fatal() {
    let config = MergeConfig::default();
    let sample = table_from(&["sample", "barcode"], &[&["S1", "barcode01"], &["", "barcode02"]]);
    let epi = epi_table(&["S1"]);

    match join(&sample, &epi, &config) {
        Err(Error::MissingKey { column, row }) => {
            assert_eq!(column, "sample");
            assert_eq!(row, 2);
        }
        other => panic!("expected MissingKey, got {other:?}"),
    }
}

#[test]
fn test_join_referenced_epi_duplicate_is_fatal() {
    let config = MergeConfig::default();
    let sample = sample_sheet(&["S1"]);
    let mut epi = epi_table(&["S1", "S2"]);
    let duplicate: Vec<String> = epi.rows()[0].clone();
    epi.push_row(duplicate).unwrap();

    assert!(matches!(
        join(&sample, &epi, &config),
        Err(Error::DuplicateKey { .. })
    ));
}

#[test]
fn test_join_epi_values_are_ascii_folded() {
    let config = MergeConfig::default();
    let sample = sample_sheet(&["S1"]);
    let mut epi = epi_table(&["S1"]);
    epi.set_value(0, "Province", "Kinshasa-Est, prélèvement").unwrap();

    let joined = join(&sample, &epi, &config).unwrap();
    assert_eq!(joined.value(0, "Province"), Some("Kinshasa-Est, prelevement"));
}

#[test]
fn test_join_epi_owns_shared_columns() {
    let config = MergeConfig::default();
    // Sheet carries a stale Country column; the Epi export must win
    let sample = table_from(
        &["sample", "barcode", "Country"],
        &[&["S1", "barcode01", "WRONG"]],
    );
    let epi = epi_table(&["S1"]);

    let joined = join(&sample, &epi, &config).unwrap();
    assert_eq!(joined.value(0, "Country"), Some("S1-v3-r0"));
    assert_eq!(
        joined.header().iter().filter(|c| *c == "Country").count(),
        1
    );
}

#[test]
fn test_join_keys_match_after_trimming() {
    let config = MergeConfig::default();
    let sample = table_from(&["sample", "barcode"], &[&[" S1 ", "barcode01"]]);
    let epi = epi_table(&["S1"]);

    let joined = join(&sample, &epi, &config).unwrap();
    assert_eq!(joined.row_count(), 1);
}

#[test]
fn test_with_blank_epi_fills_enrichment_columns() {
    let config = MergeConfig::default();
    let sample = sample_sheet(&["S1", "S2"]);

    let joined = with_blank_epi(&sample, &config).unwrap();
    assert_eq!(joined.row_count(), 2);
    assert!(joined.has_column("EpidNumber"));
    assert_eq!(joined.value(0, "EpidNumber"), Some(""));
    assert_eq!(joined.value(1, "Country"), Some(""));
    assert_eq!(joined.value(0, "barcode"), Some("barcode01"));
}

#[test]
fn test_with_blank_epi_still_requires_unique_keys() {
    let config = MergeConfig::default();
    let sample = sample_sheet(&["S1", "S1"]);
    assert!(matches!(
        with_blank_epi(&sample, &config),
        Err(Error::DuplicateKey { .. })
    ));
}

#[test]
fn test_join_with_configured_key_columns() {
    let config = MergeConfig {
        sample_key_column: "SampleID".to_string(),
        epi_key_column: "LabID".to_string(),
        ..MergeConfig::default()
    };
    let sample = table_from(&["SampleID", "barcode"], &[&["S1", "barcode01"]]);
    let mut epi = epi_table(&["S1"]);
    epi.rename_column("ICLabID", "LabID").unwrap();

    let joined = join(&sample, &epi, &config).unwrap();
    assert_eq!(joined.value(0, "SampleID"), Some("S1"));
    assert_eq!(joined.value(0, "EpidNumber"), Some("S1-v1-r0"));
}
