//! Integration tests for the merge operation.

use pdfops::config::MergeRequest;
use pdfops::ops::merge_pdfs;
use tempfile::TempDir;

use crate::common::{page_count, page_widths, write_sample_pdf};

#[tokio::test]
async fn test_merge_concatenates_pages_in_order() {
    let temp_dir = TempDir::new().unwrap();
    // a.pdf pages carry widths 101, 102; b.pdf pages carry 201, 202, 203.
    let a = write_sample_pdf(temp_dir.path(), "a.pdf", 2, 100);
    let b = write_sample_pdf(temp_dir.path(), "b.pdf", 3, 200);
    let output = temp_dir.path().join("out.pdf");

    let request = MergeRequest::new(vec![a, b], output.clone());
    let outcome = merge_pdfs(&request).await.unwrap();

    assert_eq!(outcome.statistics.files_merged, 2);
    assert_eq!(outcome.statistics.total_pages, 5);
    assert_eq!(page_widths(&output), vec![101, 102, 201, 202, 203]);
}

#[tokio::test]
async fn test_merge_single_source_preserves_sequence() {
    let temp_dir = TempDir::new().unwrap();
    let a = write_sample_pdf(temp_dir.path(), "a.pdf", 3, 300);
    let output = temp_dir.path().join("out.pdf");

    let request = MergeRequest::new(vec![a.clone()], output.clone());
    let outcome = merge_pdfs(&request).await.unwrap();

    assert_eq!(outcome.statistics.files_merged, 1);
    assert_eq!(page_widths(&output), page_widths(&a));
}

#[tokio::test]
async fn test_merge_appends_missing_extension() {
    let temp_dir = TempDir::new().unwrap();
    let a = write_sample_pdf(temp_dir.path(), "a.pdf", 2, 100);
    let output = temp_dir.path().join("out");

    let request = MergeRequest::new(vec![a], output);
    let outcome = merge_pdfs(&request).await.unwrap();

    let expected = temp_dir.path().join("out.pdf");
    assert_eq!(outcome.output_path, expected);
    assert!(expected.exists());
    assert_eq!(page_count(&expected), 2);
}

#[tokio::test]
async fn test_merge_three_sources() {
    let temp_dir = TempDir::new().unwrap();
    let a = write_sample_pdf(temp_dir.path(), "a.pdf", 1, 100);
    let b = write_sample_pdf(temp_dir.path(), "b.pdf", 1, 200);
    let c = write_sample_pdf(temp_dir.path(), "c.pdf", 2, 300);
    let output = temp_dir.path().join("out.pdf");

    let request = MergeRequest::new(vec![a, b, c], output.clone());
    let outcome = merge_pdfs(&request).await.unwrap();

    assert_eq!(outcome.statistics.files_merged, 3);
    assert_eq!(page_widths(&output), vec![101, 201, 301, 302]);
    assert_eq!(outcome.merged_files.len(), 3);
}

#[tokio::test]
async fn test_merge_is_repeatable() {
    let temp_dir = TempDir::new().unwrap();
    let a = write_sample_pdf(temp_dir.path(), "a.pdf", 2, 100);
    let b = write_sample_pdf(temp_dir.path(), "b.pdf", 1, 200);
    let output = temp_dir.path().join("out.pdf");

    let request = MergeRequest::new(vec![a, b], output.clone());

    let first = merge_pdfs(&request).await.unwrap();
    let first_widths = page_widths(&output);

    // Running the identical request again must produce the same page count
    // and the same page order.
    let second = merge_pdfs(&request).await.unwrap();
    let second_widths = page_widths(&output);

    assert_eq!(
        first.statistics.total_pages,
        second.statistics.total_pages
    );
    assert_eq!(first_widths, second_widths);
}

#[tokio::test]
async fn test_merged_output_is_a_loadable_pdf() {
    let temp_dir = TempDir::new().unwrap();
    let a = write_sample_pdf(temp_dir.path(), "a.pdf", 2, 100);
    let b = write_sample_pdf(temp_dir.path(), "b.pdf", 2, 200);
    let output = temp_dir.path().join("out.pdf");

    let request = MergeRequest::new(vec![a, b], output.clone());
    merge_pdfs(&request).await.unwrap();

    // A merged output must itself be usable as a merge source.
    let chained = temp_dir.path().join("chained.pdf");
    let request = MergeRequest::new(vec![output], chained.clone());
    let outcome = merge_pdfs(&request).await.unwrap();

    assert_eq!(outcome.statistics.total_pages, 4);
    assert_eq!(page_widths(&chained), vec![101, 102, 201, 202]);
}
