//! Integration tests for the protect operation.

use lopdf::Document;
use pdfops::config::ProtectRequest;
use pdfops::error::{ErrorKind, PdfOpsError};
use pdfops::ops::protect_pdf;
use tempfile::TempDir;

use crate::common::write_sample_pdf;

#[tokio::test]
async fn test_protect_produces_encrypted_output() {
    let temp_dir = TempDir::new().unwrap();
    let source = write_sample_pdf(temp_dir.path(), "doc.pdf", 3, 100);
    let output = temp_dir.path().join("locked.pdf");

    let request = ProtectRequest::new(source, output.clone(), "hunter2".to_string());
    let outcome = protect_pdf(&request).await.unwrap();

    assert_eq!(outcome.statistics.page_count, 3);
    assert_eq!(outcome.output_path, output);
    assert!(output.exists());

    // The serialized document must carry an encryption dictionary.
    let bytes = std::fs::read(&output).unwrap();
    assert!(bytes.windows(8).any(|w| w == b"/Encrypt"));

    // Opening without the password must not yield a readable document.
    match Document::load(&output) {
        Ok(doc) => assert!(doc.is_encrypted()),
        Err(_) => {}
    }
}

#[tokio::test]
async fn test_protect_empty_password_is_validation_error() {
    let temp_dir = TempDir::new().unwrap();
    let source = write_sample_pdf(temp_dir.path(), "doc.pdf", 1, 100);
    let output = temp_dir.path().join("locked.pdf");

    let request = ProtectRequest::new(source, output.clone(), String::new());
    let err = protect_pdf(&request).await.unwrap_err();

    assert!(matches!(err, PdfOpsError::EmptyPassword));
    assert_eq!(err.kind(), ErrorKind::Validation);
    assert!(!output.exists(), "no output file may be written");
}

#[tokio::test]
async fn test_protect_appends_missing_extension() {
    let temp_dir = TempDir::new().unwrap();
    let source = write_sample_pdf(temp_dir.path(), "doc.pdf", 1, 100);
    let output = temp_dir.path().join("locked");

    let request = ProtectRequest::new(source, output, "pw".to_string());
    let outcome = protect_pdf(&request).await.unwrap();

    assert_eq!(outcome.output_path, temp_dir.path().join("locked.pdf"));
    assert!(temp_dir.path().join("locked.pdf").exists());
}

#[tokio::test]
async fn test_protected_output_is_rejected_as_source() {
    let temp_dir = TempDir::new().unwrap();
    let source = write_sample_pdf(temp_dir.path(), "doc.pdf", 2, 100);
    let locked = temp_dir.path().join("locked.pdf");

    let request = ProtectRequest::new(source, locked.clone(), "pw".to_string());
    protect_pdf(&request).await.unwrap();

    // An already-protected document cannot be protected again; the engine
    // only accepts unencrypted sources.
    let request = ProtectRequest::new(
        locked,
        temp_dir.path().join("double.pdf"),
        "pw2".to_string(),
    );
    let err = protect_pdf(&request).await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Format);
}

#[tokio::test]
async fn test_protect_missing_source_fails_with_io_error() {
    let temp_dir = TempDir::new().unwrap();

    let request = ProtectRequest::new(
        temp_dir.path().join("gone.pdf"),
        temp_dir.path().join("locked.pdf"),
        "pw".to_string(),
    );
    let err = protect_pdf(&request).await.unwrap_err();

    assert!(matches!(err, PdfOpsError::FileNotFound { .. }));
    assert_eq!(err.kind(), ErrorKind::Io);
}
