//! Tests for new-report and template composition

use super::{composed_report, table_from};
use crate::app::models::TableKind;
use crate::app::services::report_composer::{compose_new, compose_template};
use crate::app::services::schema_registry::SchemaRegistry;
use crate::app::services::table_io::{read_table, validate_schema};
use crate::config::MergeConfig;
use crate::constants::RESERVED_COLUMNS;

#[test]
fn test_composed_header_matches_layout_exactly() {
    let config = MergeConfig::default();
    let report = composed_report(&["S1", "S2"], &config);

    let layout = SchemaRegistry::output_layout(&config);
    assert_eq!(report.header(), layout.as_slice());
    assert_eq!(report.row_count(), 2);
}

#[test]
fn test_composed_report_carries_joined_values() {
    let config = MergeConfig::default();
    let report = composed_report(&["S1"], &config);

    assert_eq!(report.value(0, "sample"), Some("S1"));
    assert_eq!(report.value(0, "barcode"), Some("barcode01"));
    assert_eq!(report.value(0, "EpidNumber"), Some("S1-v1-r0"));
    assert_eq!(report.value(0, "RunNumber"), Some("20250206_005"));
}

#[test]
fn test_reserved_columns_are_present_and_blank() {
    let config = MergeConfig::default();
    let report = composed_report(&["S1"], &config);

    for column in RESERVED_COLUMNS {
        assert_eq!(report.value(0, column), Some(""), "column {column}");
    }
}

#[test]
fn test_reserved_columns_blank_even_when_input_has_values() {
    let config = MergeConfig::default();
    // A sheet that smuggles in a RunQC value must not leak it into a new report
    let enriched = table_from(&["sample", "barcode", "RunQC"], &[&["S1", "barcode01", "PASS"]]);
    let bytes = compose_new(&enriched, &config).unwrap();
    let report = read_table(&bytes, config.delimiter).unwrap();
    assert_eq!(report.value(0, "RunQC"), Some(""));
}

#[test]
fn test_missing_columns_render_blank() {
    let config = MergeConfig::default();
    let enriched = table_from(&["sample", "barcode"], &[&["S1", "barcode01"]]);
    let bytes = compose_new(&enriched, &config).unwrap();
    let report = read_table(&bytes, config.delimiter).unwrap();
    assert_eq!(report.value(0, "EpidNumber"), Some(""));
    assert_eq!(report.value(0, "RunNumber"), Some(""));
}

#[test]
fn test_extra_input_columns_are_dropped() {
    let config = MergeConfig::default();
    let enriched = table_from(&["sample", "barcode", "Well"], &[&["S1", "barcode01", "A01"]]);
    let bytes = compose_new(&enriched, &config).unwrap();
    let report = read_table(&bytes, config.delimiter).unwrap();
    assert!(!report.has_column("Well"));
}

#[test]
fn test_composed_report_validates_as_output_kind() {
    let config = MergeConfig::default();
    let report = composed_report(&["S1"], &config);
    assert!(validate_schema(&report, TableKind::OutputReport, &config).is_ok());
}

#[test]
fn test_template_round_trips_schema_validation() {
    let config = MergeConfig::default();
    for kind in [
        TableKind::EpiInfo,
        TableKind::SampleSheet,
        TableKind::OutputReport,
    ] {
        let bytes = compose_template(kind, &config, false).unwrap();
        let template = read_table(&bytes, config.delimiter).unwrap();
        assert!(
            validate_schema(&template, kind, &config).is_ok(),
            "template for {kind} failed its own schema"
        );
        assert!(template.is_empty());
    }
}

#[test]
fn test_instrument_report_has_no_template() {
    let config = MergeConfig::default();
    assert!(compose_template(TableKind::InstrumentReport, &config, false).is_err());
}

#[test]
fn test_prefilled_barcode_template() {
    let config = MergeConfig::default();
    let bytes = compose_template(TableKind::SampleSheet, &config, true).unwrap();
    let template = read_table(&bytes, config.delimiter).unwrap();

    assert_eq!(template.row_count(), 96);
    assert_eq!(template.value(0, "barcode"), Some("barcode01"));
    assert_eq!(template.value(95, "barcode"), Some("barcode96"));
    assert_eq!(template.value(0, "sample"), Some(""));
}

#[test]
fn test_prefill_only_applies_to_sample_sheet() {
    let config = MergeConfig::default();
    let bytes = compose_template(TableKind::EpiInfo, &config, true).unwrap();
    let template = read_table(&bytes, config.delimiter).unwrap();
    assert!(template.is_empty());
}
