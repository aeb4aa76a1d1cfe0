//! Tests for single-file parsing

use super::*;
use crate::app::services::eis_reader::parse_str;
use crate::Error;

#[test]
fn test_parse_metadata_and_points() {
    let content = build_export("UCT_AST9AH_B07_-20", &sample_rows());

    let result = parse_str(&content, "fixture.csv").unwrap();
    let series = result.series;

    assert_eq!(series.raw_label(), Some("UCT_AST9AH_B07_-20"));
    assert_eq!(series.metadata_value("Field19"), Some("value19"));
    assert_eq!(series.metadata.len(), 23);
    assert!(series.start_time().is_some());

    assert_eq!(series.len(), 5);
    assert_eq!(series.frequencies(), vec![1000.0, 500.0, 100.0, 10.0, 1.0]);
    assert_eq!(series.points[0].z_real, -0.5);
    assert_eq!(series.points[4].z_imag, -1.2);
    assert_eq!(result.stats.points_parsed, 5);
    assert_eq!(result.stats.rows_skipped, 0);
}

#[test]
fn test_parse_keeps_auxiliary_channels() {
    let content = build_export("A01_RT1", &sample_rows());

    let series = parse_str(&content, "fixture.csv").unwrap().series;

    // Voltage and the unnamed trailing column are dropped
    assert_eq!(series.channel_names, vec!["Time", "Temperature"]);
    assert_eq!(series.points[2].channels, vec![2.0, 21.5]);
}

#[test]
fn test_parse_skips_rows_with_non_numeric_impedance() {
    let mut content = build_export("A01_RT1", &sample_rows());
    content.push_str("5,3.71,0.5,n/a,-1.0,21.5,\n");

    let result = parse_str(&content, "fixture.csv").unwrap();

    assert_eq!(result.series.len(), 5);
    assert_eq!(result.stats.total_rows, 6);
    assert_eq!(result.stats.rows_skipped, 1);
    assert_eq!(result.stats.errors.len(), 1);
}

#[test]
fn test_parse_non_numeric_channel_becomes_nan() {
    let mut content = build_export("A01_RT1", &[]);
    content.push_str("0,3.71,10.0,1.0,-1.0,--,\n");

    let series = parse_str(&content, "fixture.csv").unwrap().series;

    assert_eq!(series.len(), 1);
    assert!(series.points[0].channels[1].is_nan());
}

#[test]
fn test_parse_without_data_rows() {
    let content = build_export("A01_RT1", &[]);

    let result = parse_str(&content, "fixture.csv").unwrap();

    assert!(result.series.is_empty());
    assert_eq!(result.stats.success_rate(), 0.0);
}

#[test]
fn test_parse_truncated_file_has_no_header() {
    let content: String = build_export("A01_RT1", &sample_rows())
        .lines()
        .take(20)
        .map(|line| format!("{}\n", line))
        .collect();

    let err = parse_str(&content, "short.csv").unwrap_err();

    assert!(matches!(err, Error::EisFormat { ref file, .. } if file == "short.csv"));
}

#[test]
fn test_parse_missing_required_column() {
    let content = build_export("A01_RT1", &sample_rows()).replace("Zimg1", "Zimg2");

    let err = parse_str(&content, "fixture.csv").unwrap_err();

    assert!(err.to_string().contains("Zimg1"));
}
