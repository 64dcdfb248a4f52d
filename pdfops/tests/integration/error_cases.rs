//! Integration tests for error handling and edge cases.

use pdfops::config::{MergeRequest, OverwriteMode, SplitRequest};
use pdfops::error::{ErrorKind, PdfOpsError};
use pdfops::ops::{merge_pdfs, split_pdf};
use std::path::PathBuf;
use tempfile::TempDir;

use crate::common::write_sample_pdf;

#[tokio::test]
async fn test_merge_nonexistent_source_is_io_error() {
    let temp_dir = TempDir::new().unwrap();
    let output = temp_dir.path().join("out.pdf");

    let request = MergeRequest::new(vec![PathBuf::from("/nonexistent/file.pdf")], output.clone());
    let err = merge_pdfs(&request).await.unwrap_err();

    assert!(matches!(err, PdfOpsError::FileNotFound { .. }));
    assert_eq!(err.kind(), ErrorKind::Io);
    assert!(!output.exists(), "failed merge must not claim success");
}

#[tokio::test]
async fn test_merge_empty_source_list_is_validation_error() {
    let temp_dir = TempDir::new().unwrap();

    let request = MergeRequest::new(vec![], temp_dir.path().join("out.pdf"));
    let err = merge_pdfs(&request).await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Validation);
}

#[tokio::test]
async fn test_merge_corrupted_source_is_format_error() {
    let temp_dir = TempDir::new().unwrap();
    let corrupted = temp_dir.path().join("corrupted.pdf");
    std::fs::write(&corrupted, b"definitely not a pdf").unwrap();

    let request = MergeRequest::new(vec![corrupted], temp_dir.path().join("out.pdf"));
    let err = merge_pdfs(&request).await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Format);
}

#[tokio::test]
async fn test_merge_continue_on_error_skips_bad_sources() {
    let temp_dir = TempDir::new().unwrap();
    let good1 = write_sample_pdf(temp_dir.path(), "good1.pdf", 1, 100);
    let corrupted = temp_dir.path().join("corrupted.pdf");
    std::fs::write(&corrupted, b"garbage").unwrap();
    let good2 = write_sample_pdf(temp_dir.path(), "good2.pdf", 2, 200);
    let output = temp_dir.path().join("out.pdf");

    let mut request = MergeRequest::new(vec![good1, corrupted, good2], output);
    request.continue_on_error = true;

    let outcome = merge_pdfs(&request).await.unwrap();
    assert_eq!(outcome.statistics.files_merged, 2);
    assert_eq!(outcome.statistics.total_pages, 3);
}

#[tokio::test]
async fn test_merge_all_sources_invalid_with_continue() {
    let temp_dir = TempDir::new().unwrap();
    let bad1 = temp_dir.path().join("bad1.pdf");
    let bad2 = temp_dir.path().join("bad2.pdf");
    std::fs::write(&bad1, b"nope").unwrap();
    std::fs::write(&bad2, b"nope").unwrap();

    let mut request = MergeRequest::new(vec![bad1, bad2], temp_dir.path().join("out.pdf"));
    request.continue_on_error = true;

    let err = merge_pdfs(&request).await.unwrap_err();
    assert!(matches!(err, PdfOpsError::NoSourceFiles));
    assert_eq!(err.kind(), ErrorKind::Validation);
}

#[tokio::test]
async fn test_merge_output_same_as_source_is_rejected() {
    let temp_dir = TempDir::new().unwrap();
    let source = write_sample_pdf(temp_dir.path(), "doc.pdf", 1, 100);

    let request = MergeRequest::new(vec![source.clone()], source);
    let err = merge_pdfs(&request).await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Validation);
}

#[tokio::test]
async fn test_merge_no_clobber_keeps_existing_output() {
    let temp_dir = TempDir::new().unwrap();
    let source = write_sample_pdf(temp_dir.path(), "doc.pdf", 1, 100);
    let output = temp_dir.path().join("out.pdf");
    std::fs::write(&output, b"keep me").unwrap();

    let mut request = MergeRequest::new(vec![source], output.clone());
    request.overwrite_mode = OverwriteMode::NoClobber;

    let err = merge_pdfs(&request).await.unwrap_err();
    assert!(matches!(err, PdfOpsError::OutputExists { .. }));
    assert_eq!(std::fs::read(&output).unwrap(), b"keep me");
}

#[tokio::test]
async fn test_merge_unwritable_output_directory() {
    let temp_dir = TempDir::new().unwrap();
    let source = write_sample_pdf(temp_dir.path(), "doc.pdf", 1, 100);

    let request = MergeRequest::new(
        vec![source],
        PathBuf::from("/nonexistent/directory/out.pdf"),
    );
    let result = merge_pdfs(&request).await;

    assert!(result.is_err());
}

#[tokio::test]
async fn test_split_missing_output_dir_leaves_nothing_behind() {
    let temp_dir = TempDir::new().unwrap();
    let source = write_sample_pdf(temp_dir.path(), "doc.pdf", 2, 100);
    let missing = temp_dir.path().join("pages");

    let request = SplitRequest::new(source, missing.clone());
    let err = split_pdf(&request).await.unwrap_err();

    assert!(matches!(err, PdfOpsError::OutputDirMissing { .. }));
    assert_eq!(err.kind(), ErrorKind::Io);
    assert!(!missing.exists(), "the engine must not create directories");
}

#[tokio::test]
async fn test_split_corrupted_source_is_format_error() {
    let temp_dir = TempDir::new().unwrap();
    let corrupted = temp_dir.path().join("corrupted.pdf");
    std::fs::write(&corrupted, b"garbage").unwrap();
    let out_dir = temp_dir.path().join("pages");
    std::fs::create_dir(&out_dir).unwrap();

    let request = SplitRequest::new(corrupted, out_dir.clone());
    let err = split_pdf(&request).await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Format);

    // Nothing was written for a source that never parsed.
    assert_eq!(std::fs::read_dir(&out_dir).unwrap().count(), 0);
}

#[tokio::test]
async fn test_failed_operation_leaves_engine_usable() {
    let temp_dir = TempDir::new().unwrap();
    let source = write_sample_pdf(temp_dir.path(), "doc.pdf", 2, 100);
    let output = temp_dir.path().join("out.pdf");

    // First request fails on a missing source.
    let bad_request = MergeRequest::new(vec![temp_dir.path().join("gone.pdf")], output.clone());
    assert!(merge_pdfs(&bad_request).await.is_err());

    // The next request on the same engine surface succeeds.
    let good_request = MergeRequest::new(vec![source], output.clone());
    let outcome = merge_pdfs(&good_request).await.unwrap();
    assert_eq!(outcome.statistics.total_pages, 2);
    assert!(output.exists());
}
