//! Integration tests for the split operation.

use pdfops::config::SplitRequest;
use pdfops::ops::split_pdf;
use tempfile::TempDir;

use crate::common::{page_count, page_widths, write_sample_pdf};

#[tokio::test]
async fn test_split_three_page_document() {
    let temp_dir = TempDir::new().unwrap();
    let source = write_sample_pdf(temp_dir.path(), "doc.pdf", 3, 400);
    let out_dir = temp_dir.path().join("pages");
    std::fs::create_dir(&out_dir).unwrap();

    let request = SplitRequest::new(source, out_dir.clone());
    let outcome = split_pdf(&request).await.unwrap();

    assert_eq!(outcome.statistics.page_count, 3);
    assert_eq!(
        outcome.page_files,
        vec![
            out_dir.join("page_1.pdf"),
            out_dir.join("page_2.pdf"),
            out_dir.join("page_3.pdf"),
        ]
    );

    // File i holds exactly page i of the source, nothing else.
    for i in 1..=3i64 {
        let path = out_dir.join(format!("page_{i}.pdf"));
        assert_eq!(page_widths(&path), vec![400 + i]);
    }
}

#[tokio::test]
async fn test_split_single_page_document() {
    let temp_dir = TempDir::new().unwrap();
    let source = write_sample_pdf(temp_dir.path(), "doc.pdf", 1, 500);
    let out_dir = temp_dir.path().join("pages");
    std::fs::create_dir(&out_dir).unwrap();

    let request = SplitRequest::new(source, out_dir.clone());
    let outcome = split_pdf(&request).await.unwrap();

    assert_eq!(outcome.page_files, vec![out_dir.join("page_1.pdf")]);
    assert_eq!(page_count(&out_dir.join("page_1.pdf")), 1);

    let entries: Vec<_> = std::fs::read_dir(&out_dir).unwrap().collect();
    assert_eq!(entries.len(), 1);
}

#[tokio::test]
async fn test_split_page_numbering_is_unpadded_decimal() {
    let temp_dir = TempDir::new().unwrap();
    let source = write_sample_pdf(temp_dir.path(), "doc.pdf", 11, 0);
    let out_dir = temp_dir.path().join("pages");
    std::fs::create_dir(&out_dir).unwrap();

    let request = SplitRequest::new(source, out_dir.clone());
    let outcome = split_pdf(&request).await.unwrap();

    assert_eq!(outcome.statistics.page_count, 11);
    assert!(out_dir.join("page_1.pdf").exists());
    assert!(out_dir.join("page_10.pdf").exists());
    assert!(out_dir.join("page_11.pdf").exists());
    assert!(!out_dir.join("page_01.pdf").exists());
}

#[tokio::test]
async fn test_split_then_merge_round_trip() {
    let temp_dir = TempDir::new().unwrap();
    let source = write_sample_pdf(temp_dir.path(), "doc.pdf", 4, 600);
    let out_dir = temp_dir.path().join("pages");
    std::fs::create_dir(&out_dir).unwrap();

    let request = SplitRequest::new(source.clone(), out_dir.clone());
    let outcome = split_pdf(&request).await.unwrap();

    // Re-merging the page files in order restores the original sequence.
    let merge_request = pdfops::config::MergeRequest::new(
        outcome.page_files,
        temp_dir.path().join("rebuilt.pdf"),
    );
    pdfops::ops::merge_pdfs(&merge_request).await.unwrap();

    assert_eq!(
        page_widths(&temp_dir.path().join("rebuilt.pdf")),
        page_widths(&source)
    );
}
