//! Input validation for pdfops.
//!
//! This module provides validation of PDF files and request targets before
//! an operation runs. It performs:
//! - File existence and accessibility checks
//! - PDF format validation
//! - Encryption detection
//! - Page count extraction
//! - Output file and directory checks
//!
//! # Examples
//!
//! ```no_run
//! use pdfops::validation::Validator;
//! use std::path::PathBuf;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let validator = Validator::new();
//! let result = validator.validate_file(&PathBuf::from("test.pdf")).await?;
//! println!("PDF has {} pages", result.page_count);
//! # Ok(())
//! # }
//! ```

use lopdf::Document;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::task;

use crate::config::OverwriteMode;
use crate::error::{PdfOpsError, Result};
use crate::utils::format_file_size;

/// Result of validating a single PDF file.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    /// Path to the validated file.
    pub path: PathBuf,

    /// Number of pages in the PDF.
    pub page_count: usize,

    /// PDF version (major, minor).
    pub version: Option<(u8, u8)>,

    /// Size of the file in bytes.
    pub file_size: u64,

    /// Number of objects in the PDF.
    pub object_count: usize,
}

impl ValidationResult {
    /// Create a validation result from a loaded PDF document.
    fn from_document(path: PathBuf, doc: &Document) -> Self {
        let page_count = doc.get_pages().len();

        let version = doc.version.split_once('.').map(|(major, minor)| {
            (
                major.parse::<u8>().unwrap_or_default(),
                minor.parse::<u8>().unwrap_or_default(),
            )
        });

        let object_count = doc.objects.len();
        let file_size = std::fs::metadata(&path).map(|m| m.len()).unwrap_or(0);

        Self {
            path,
            page_count,
            version,
            file_size,
            object_count,
        }
    }
}

/// Summary of validation results for multiple files.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationSummary {
    /// Individual validation results for each file.
    pub results: Vec<ValidationResult>,

    /// Total number of pages across all files.
    pub total_pages: usize,

    /// Total file size in bytes.
    pub total_size: u64,

    /// Number of files that passed validation.
    pub files_validated: usize,

    /// Number of files that failed validation.
    pub files_failed: usize,
}

impl ValidationSummary {
    /// Create a summary from validation results.
    pub fn from_results(results: Vec<ValidationResult>) -> Self {
        let total_pages = results.iter().map(|r| r.page_count).sum();
        let total_size = results.iter().map(|r| r.file_size).sum();
        let files_validated = results.len();

        Self {
            results,
            total_pages,
            total_size,
            files_validated,
            files_failed: 0,
        }
    }

    /// Format the total file size as a human-readable string.
    pub fn format_total_size(&self) -> String {
        format_file_size(self.total_size)
    }
}

/// Validator for PDF files and operation targets.
pub struct Validator;

impl Validator {
    /// Create a new validator.
    pub fn new() -> Self {
        Self
    }

    /// Validate a single PDF file.
    ///
    /// Performs comprehensive validation including:
    /// - File existence and accessibility
    /// - PDF format validation
    /// - Encryption detection
    /// - Page count extraction
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the PDF file to validate
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - File does not exist or is not a regular file
    /// - File is empty or not a valid PDF
    /// - File is encrypted
    /// - PDF has no pages
    pub async fn validate_file(&self, path: &Path) -> Result<ValidationResult> {
        let path_buf = path.to_path_buf();

        task::spawn_blocking(move || Self::validate_file_blocking(&path_buf))
            .await
            .map_err(|e| PdfOpsError::other(format!("Validation task failed: {e}")))?
    }

    /// Blocking validation implementation.
    fn validate_file_blocking(path: &Path) -> Result<ValidationResult> {
        if !path.exists() {
            return Err(PdfOpsError::file_not_found(path.to_path_buf()));
        }

        if !path.is_file() {
            return Err(PdfOpsError::NotAFile {
                path: path.to_path_buf(),
            });
        }

        let metadata =
            std::fs::metadata(path).map_err(|e| PdfOpsError::FileNotAccessible {
                path: path.to_path_buf(),
                source: e,
            })?;

        if metadata.len() == 0 {
            return Err(PdfOpsError::corrupted_pdf(
                path.to_path_buf(),
                "File is empty",
            ));
        }

        let doc = Document::load(path).map_err(|e| {
            let err_msg = e.to_string();
            if err_msg.contains("encrypt") || err_msg.contains("password") {
                PdfOpsError::encrypted_pdf(path.to_path_buf())
            } else {
                PdfOpsError::failed_to_load_pdf(path.to_path_buf(), err_msg)
            }
        })?;

        if doc.is_encrypted() {
            return Err(PdfOpsError::encrypted_pdf(path.to_path_buf()));
        }

        if doc.get_pages().is_empty() {
            return Err(PdfOpsError::corrupted_pdf(
                path.to_path_buf(),
                "PDF has no pages",
            ));
        }

        Ok(ValidationResult::from_document(path.to_path_buf(), &doc))
    }

    /// Validate multiple source files.
    ///
    /// Validates all input files and returns a summary of results. Can
    /// continue past individual failures if requested.
    ///
    /// # Arguments
    ///
    /// * `paths` - Paths to PDF files to validate
    /// * `continue_on_error` - Whether to continue validating after errors
    ///
    /// # Errors
    ///
    /// Returns an error if any file fails validation and `continue_on_error`
    /// is false, or if no file passes at all.
    pub async fn validate_sources(
        &self,
        paths: &[PathBuf],
        continue_on_error: bool,
    ) -> Result<ValidationSummary> {
        let mut results = Vec::new();
        let mut failed_count = 0;

        for path in paths {
            match self.validate_file(path).await {
                Ok(result) => {
                    results.push(result);
                }
                Err(e) => {
                    if continue_on_error {
                        eprintln!("Warning: Skipping {}: {}", path.display(), e);
                        failed_count += 1;
                    } else {
                        return Err(e);
                    }
                }
            }
        }

        if results.is_empty() {
            return Err(PdfOpsError::NoSourceFiles);
        }

        let mut summary = ValidationSummary::from_results(results);
        summary.files_failed = failed_count;

        Ok(summary)
    }

    /// Validate an output file target.
    ///
    /// # Arguments
    ///
    /// * `path` - Output file path (already normalized)
    /// * `mode` - Overwrite behavior for an existing file
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The file exists and the mode is `NoClobber`
    /// - The parent directory doesn't exist or is not writable
    pub async fn validate_output_file(&self, path: &Path, mode: OverwriteMode) -> Result<()> {
        if path.exists() && mode == OverwriteMode::NoClobber {
            return Err(PdfOpsError::output_exists(path.to_path_buf()));
        }

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            if !parent.exists() {
                return Err(PdfOpsError::invalid_config(format!(
                    "Output directory does not exist: {}",
                    parent.display()
                )));
            }

            let metadata = tokio::fs::metadata(parent).await.map_err(|e| {
                PdfOpsError::FileNotAccessible {
                    path: parent.to_path_buf(),
                    source: e,
                }
            })?;

            if metadata.permissions().readonly() {
                return Err(PdfOpsError::invalid_config(format!(
                    "Output directory is not writable: {}",
                    parent.display()
                )));
            }
        }

        Ok(())
    }

    /// Validate an output directory target for split.
    ///
    /// The directory must already exist; the engine never creates it.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory is missing, is not a directory, or
    /// is not writable.
    pub async fn validate_output_dir(&self, dir: &Path) -> Result<()> {
        if !dir.exists() {
            return Err(PdfOpsError::OutputDirMissing {
                path: dir.to_path_buf(),
            });
        }

        if !dir.is_dir() {
            return Err(PdfOpsError::NotADirectory {
                path: dir.to_path_buf(),
            });
        }

        let metadata =
            tokio::fs::metadata(dir)
                .await
                .map_err(|e| PdfOpsError::FileNotAccessible {
                    path: dir.to_path_buf(),
                    source: e,
                })?;

        if metadata.permissions().readonly() {
            return Err(PdfOpsError::invalid_config(format!(
                "Output directory is not writable: {}",
                dir.display()
            )));
        }

        Ok(())
    }
}

impl Default for Validator {
    fn default() -> Self {
        Self::new()
    }
}
