//! PDF reading and loading operations.
//!
//! This module provides PDF loading with support for:
//! - Sequential multi-document loading that preserves input order
//! - Detailed load statistics
//! - Mapping of codec failures onto the engine's error taxonomy
//!
//! # Examples
//!
//! ```no_run
//! use pdfops::io::reader::PdfReader;
//! use std::path::PathBuf;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let reader = PdfReader::new();
//! let paths = vec![PathBuf::from("a.pdf"), PathBuf::from("b.pdf")];
//! let (results, stats) = reader.load_all(&paths).await;
//! println!("Loaded {} of {} files", stats.success_count, paths.len());
//! # Ok(())
//! # }
//! ```

use lopdf::Document;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tokio::task;

use crate::error::{PdfOpsError, Result};
use crate::utils::format_file_size;

/// A loaded PDF document with metadata.
#[derive(Debug)]
pub struct LoadedPdf {
    /// The PDF document.
    pub document: Document,

    /// Path to the source file.
    pub path: PathBuf,

    /// Number of pages in the document.
    pub page_count: usize,

    /// Time taken to load the document.
    pub load_time: Duration,

    /// File size in bytes.
    pub file_size: u64,
}

/// Result of a load operation (success or failure).
pub type LoadResult = Result<LoadedPdf>;

/// Statistics for a batch load operation.
#[derive(Debug, Clone)]
pub struct LoadStatistics {
    /// Number of PDFs successfully loaded.
    pub success_count: usize,

    /// Number of PDFs that failed to load.
    pub failure_count: usize,

    /// Total time taken for all loads.
    pub total_time: Duration,

    /// Total size of successfully loaded files.
    pub total_size: u64,

    /// Total number of pages loaded.
    pub total_pages: usize,
}

impl LoadStatistics {
    /// Create statistics from load results.
    fn from_results(results: &[LoadResult], total_time: Duration) -> Self {
        let mut success_count = 0;
        let mut failure_count = 0;
        let mut total_size = 0;
        let mut total_pages = 0;

        for result in results {
            match result {
                Ok(loaded) => {
                    success_count += 1;
                    total_size += loaded.file_size;
                    total_pages += loaded.page_count;
                }
                Err(_) => {
                    failure_count += 1;
                }
            }
        }

        Self {
            success_count,
            failure_count,
            total_time,
            total_size,
            total_pages,
        }
    }

    /// Format total size as human-readable string.
    pub fn format_total_size(&self) -> String {
        format_file_size(self.total_size)
    }
}

/// PDF reader with configurable loading behavior.
#[derive(Debug, Clone)]
pub struct PdfReader {
    /// Whether to verify the page tree after loading.
    verify: bool,
}

impl PdfReader {
    /// Create a new PDF reader with default settings.
    pub fn new() -> Self {
        Self { verify: true }
    }

    /// Create a reader that skips verification (faster but less safe).
    pub fn without_verification() -> Self {
        Self { verify: false }
    }

    /// Load a single PDF document.
    ///
    /// The blocking codec call runs on a `spawn_blocking` task.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the PDF file
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - File does not exist or is not a regular file
    /// - File is not a valid PDF
    /// - PDF is encrypted
    /// - PDF structure is corrupted or has no pages
    pub async fn load(&self, path: &Path) -> Result<LoadedPdf> {
        let path_buf = path.to_path_buf();
        let verify = self.verify;

        task::spawn_blocking(move || Self::load_blocking(&path_buf, verify))
            .await
            .map_err(|e| PdfOpsError::other(format!("Load task failed: {e}")))?
    }

    /// Blocking load implementation shared by the async entry points.
    fn load_blocking(path: &Path, verify: bool) -> Result<LoadedPdf> {
        let start = Instant::now();

        if !path.exists() {
            return Err(PdfOpsError::file_not_found(path.to_path_buf()));
        }

        if !path.is_file() {
            return Err(PdfOpsError::not_a_file(path.to_path_buf()));
        }

        let document = Document::load(path).map_err(|e| {
            let err_msg = e.to_string();
            if err_msg.contains("encrypt") || err_msg.contains("password") {
                PdfOpsError::encrypted_pdf(path.to_path_buf())
            } else {
                PdfOpsError::failed_to_load_pdf(path.to_path_buf(), err_msg)
            }
        })?;

        // Some codec versions load encrypted documents without error and
        // leave the content encrypted in place.
        if document.is_encrypted() {
            return Err(PdfOpsError::encrypted_pdf(path.to_path_buf()));
        }

        let page_count = document.get_pages().len();
        if verify && page_count == 0 {
            return Err(PdfOpsError::corrupted_pdf(
                path.to_path_buf(),
                "PDF has no pages",
            ));
        }

        let load_time = start.elapsed();
        let file_size = std::fs::metadata(path).map(|m| m.len()).unwrap_or(0);

        Ok(LoadedPdf {
            document,
            path: path.to_path_buf(),
            page_count,
            load_time,
            file_size,
        })
    }

    /// Load multiple PDF documents sequentially.
    ///
    /// Documents are loaded one at a time in the order provided; the result
    /// vector mirrors the input order, which downstream merge code relies on.
    ///
    /// # Arguments
    ///
    /// * `paths` - Paths to PDF files
    ///
    /// # Returns
    ///
    /// A vector of results, one for each input file. Each result is either
    /// a successfully loaded PDF or an error.
    pub async fn load_sequential(&self, paths: &[PathBuf]) -> Vec<LoadResult> {
        let mut results = Vec::with_capacity(paths.len());

        for path in paths {
            let result = self.load(path).await;
            results.push(result);
        }

        results
    }

    /// Load all PDFs and gather aggregate statistics.
    ///
    /// # Arguments
    ///
    /// * `paths` - Paths to PDF files
    ///
    /// # Returns
    ///
    /// A tuple of (results, statistics) where results contains the load
    /// outcome for each file in input order and statistics provides
    /// aggregate metrics.
    pub async fn load_all(&self, paths: &[PathBuf]) -> (Vec<LoadResult>, LoadStatistics) {
        let start = Instant::now();

        let results = self.load_sequential(paths).await;

        let total_time = start.elapsed();
        let stats = LoadStatistics::from_results(&results, total_time);

        (results, stats)
    }
}

impl Default for PdfReader {
    fn default() -> Self {
        Self::new()
    }
}
