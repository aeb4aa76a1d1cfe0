//! Tests for concurrent loading

use super::*;
use crate::app::services::eis_reader::{EisLoader, RunSelection};
use crate::constants::EIS_FILE_PATTERN;
use crate::Error;
use tempfile::TempDir;

#[tokio::test]
async fn test_load_directory_keys_by_comment() {
    let root = TempDir::new().unwrap();
    write_export(&root.path().join("a"), "a_EIS00001.csv", "UCT_AST9AH_A01_RT1", &sample_rows());
    write_export(&root.path().join("b"), "b_EIS00001.csv", " eis B07_-20 ", &sample_rows());

    let result = EisLoader::new(2)
        .load_directory(root.path(), EIS_FILE_PATTERN, RunSelection::Main)
        .await
        .unwrap();

    assert_eq!(
        result.dataset.labels().collect::<Vec<_>>(),
        vec!["UCT_AST9AH_A01_RT1", "eis B07_-20"]
    );
    assert_eq!(result.stats.files_loaded, 2);
    assert_eq!(result.stats.points_loaded, 10);
    assert_eq!(result.dataset.total_points(), 10);
}

#[tokio::test]
async fn test_load_rejects_duplicate_raw_label() {
    let root = TempDir::new().unwrap();
    let first = write_export(root.path(), "x_EIS00001.csv", "A01_RT1", &sample_rows());
    let second = write_export(root.path(), "y_EIS00001.csv", "A01_RT1", &sample_rows());

    let err = EisLoader::new(4).load_files(&[first, second]).await.unwrap_err();

    match err {
        Error::DuplicateRawLabel { label, first, second } => {
            assert_eq!(label, "A01_RT1");
            assert!(first.ends_with("x_EIS00001.csv"));
            assert!(second.ends_with("y_EIS00001.csv"));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn test_load_rejects_missing_comment() {
    let root = TempDir::new().unwrap();
    let path = write_export(root.path(), "x_EIS00001.csv", "", &sample_rows());

    let err = EisLoader::new(1).load_files(&[path]).await.unwrap_err();

    assert!(matches!(err, Error::EisFormat { .. }));
}

#[tokio::test]
async fn test_load_propagates_unreadable_file() {
    let root = TempDir::new().unwrap();

    let err = EisLoader::new(1)
        .load_files(&[root.path().join("missing_EIS00001.csv")])
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Io { .. }));
}

#[tokio::test]
async fn test_load_no_files() {
    let result = EisLoader::new(0).load_files(&[]).await.unwrap();

    assert!(result.dataset.is_empty());
    assert_eq!(result.stats.summary(), "Loaded 0 files with 0 points (0 rows skipped)");
}
