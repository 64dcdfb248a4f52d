//! Error types for pdfops.
//!
//! This module defines all error types that can occur during document
//! assembly. Errors are designed to be informative and actionable, providing
//! clear context about what went wrong and how to fix it.
//!
//! # Error Categories
//!
//! - **Validation Errors**: Empty password, empty source list, bad requests
//! - **I/O Errors**: File not found, permission denied, unwritable output
//! - **Format Errors**: Invalid PDF structure, corrupted or encrypted files
//! - **Operation Errors**: Problems during merge, split, or protect

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Result type alias for pdfops operations.
pub type Result<T> = std::result::Result<T, PdfOpsError>;

/// Coarse classification of an error, following the engine's taxonomy.
///
/// Every [`PdfOpsError`] variant maps onto exactly one kind, so callers that
/// need programmatic handling can branch on the kind while still showing the
/// detailed message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A required argument was missing or malformed before any I/O happened.
    Validation,
    /// A path could not be opened for reading or writing.
    Io,
    /// Input bytes were rejected by the PDF codec.
    Format,
    /// The codec-level assembly or encryption step itself failed.
    Operation,
}

/// Main error type for pdfops operations.
///
/// All errors in pdfops use this type, which provides detailed context
/// about what went wrong and where.
#[derive(Debug)]
pub enum PdfOpsError {
    /// Input file was not found.
    FileNotFound {
        /// Path to the file that was not found.
        path: PathBuf,
    },

    /// Input file is not accessible (permission denied, etc.).
    FileNotAccessible {
        /// Path to the inaccessible file.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// Input path exists but is not a regular file.
    NotAFile {
        /// Path that is not a file.
        path: PathBuf,
    },

    /// Failed to load a PDF file.
    FailedToLoadPdf {
        /// Path to the PDF file.
        path: PathBuf,
        /// Reason for the failure.
        reason: String,
    },

    /// PDF file is corrupted or has invalid structure.
    CorruptedPdf {
        /// Path to the corrupted PDF.
        path: PathBuf,
        /// Details about the corruption.
        details: String,
    },

    /// PDF file is already encrypted and cannot be used as a source.
    EncryptedPdf {
        /// Path to the encrypted PDF.
        path: PathBuf,
    },

    /// An empty password was supplied to the protect operation.
    EmptyPassword,

    /// No source files were provided for an operation.
    NoSourceFiles,

    /// Output file already exists and overwrite is not allowed.
    OutputExists {
        /// Path to the existing output file.
        path: PathBuf,
    },

    /// Output directory for split pages does not exist.
    OutputDirMissing {
        /// The missing directory path.
        path: PathBuf,
    },

    /// Output directory path exists but is not a directory.
    NotADirectory {
        /// Path that is not a directory.
        path: PathBuf,
    },

    /// Failed to create an output file.
    FailedToCreateOutput {
        /// Path where output should be created.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// Failed to write to an output file.
    FailedToWrite {
        /// Path being written to.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// Merge operation failed.
    MergeFailed {
        /// Description of what went wrong.
        reason: String,
    },

    /// Split operation failed.
    SplitFailed {
        /// Description of what went wrong.
        reason: String,
    },

    /// Applying password protection failed.
    EncryptionFailed {
        /// Description of what went wrong.
        reason: String,
    },

    /// Invalid request or configuration.
    InvalidConfig {
        /// Description of what's wrong with the request.
        message: String,
    },

    /// User cancelled the operation.
    Cancelled,

    /// Generic I/O error.
    Io {
        /// Underlying I/O error.
        source: io::Error,
    },

    /// Generic error with a custom message.
    Other {
        /// Error message.
        message: String,
    },
}

impl fmt::Display for PdfOpsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FileNotFound { path } => {
                write!(f, "File not found: {}", path.display())
            }
            Self::FileNotAccessible { path, source } => {
                write!(
                    f,
                    "Cannot access file: {}\n  Reason: {}",
                    path.display(),
                    source
                )
            }
            Self::NotAFile { path } => {
                write!(f, "Not a file: {}", path.display())
            }
            Self::FailedToLoadPdf { path, reason } => {
                write!(
                    f,
                    "Failed to load PDF: {}\n  Reason: {}",
                    path.display(),
                    reason
                )
            }
            Self::CorruptedPdf { path, details } => {
                write!(
                    f,
                    "Corrupted or invalid PDF: {}\n  Details: {}",
                    path.display(),
                    details
                )
            }
            Self::EncryptedPdf { path } => {
                write!(
                    f,
                    "PDF is already encrypted and cannot be used as a source: {}\n  \
                     Hint: Decrypt the PDF first using 'qpdf --decrypt' or similar tools",
                    path.display()
                )
            }
            Self::EmptyPassword => {
                write!(f, "Password must not be empty")
            }
            Self::NoSourceFiles => {
                write!(f, "No source files specified")
            }
            Self::OutputExists { path } => {
                write!(
                    f,
                    "Output file already exists: {}\n  \
                     Use --force to overwrite or choose a different output path",
                    path.display()
                )
            }
            Self::OutputDirMissing { path } => {
                write!(
                    f,
                    "Output directory does not exist: {}\n  \
                     Create the directory first; pdfops does not create it for you",
                    path.display()
                )
            }
            Self::NotADirectory { path } => {
                write!(f, "Not a directory: {}", path.display())
            }
            Self::FailedToCreateOutput { path, source } => {
                write!(
                    f,
                    "Failed to create output file: {}\n  Reason: {}",
                    path.display(),
                    source
                )
            }
            Self::FailedToWrite { path, source } => {
                write!(
                    f,
                    "Failed to write to output file: {}\n  Reason: {}",
                    path.display(),
                    source
                )
            }
            Self::MergeFailed { reason } => {
                write!(f, "Merge operation failed: {reason}")
            }
            Self::SplitFailed { reason } => {
                write!(f, "Split operation failed: {reason}")
            }
            Self::EncryptionFailed { reason } => {
                write!(f, "Failed to apply password protection: {reason}")
            }
            Self::InvalidConfig { message } => {
                write!(f, "Invalid request: {message}")
            }
            Self::Cancelled => {
                write!(f, "Operation cancelled by user")
            }
            Self::Io { source } => {
                write!(f, "I/O error: {source}")
            }
            Self::Other { message } => {
                write!(f, "{message}")
            }
        }
    }
}

impl std::error::Error for PdfOpsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::FileNotAccessible { source, .. } => Some(source),
            Self::FailedToCreateOutput { source, .. } => Some(source),
            Self::FailedToWrite { source, .. } => Some(source),
            Self::Io { source } => Some(source),
            _ => None,
        }
    }
}

impl From<io::Error> for PdfOpsError {
    fn from(err: io::Error) -> Self {
        Self::Io { source: err }
    }
}

impl From<lopdf::Error> for PdfOpsError {
    fn from(err: lopdf::Error) -> Self {
        Self::other(err.to_string())
    }
}

impl From<anyhow::Error> for PdfOpsError {
    fn from(err: anyhow::Error) -> Self {
        Self::other(err.to_string())
    }
}

impl PdfOpsError {
    /// Create a FileNotFound error.
    pub fn file_not_found(path: PathBuf) -> Self {
        Self::FileNotFound { path }
    }

    /// Create a NotAFile error.
    pub fn not_a_file(path: PathBuf) -> Self {
        Self::NotAFile { path }
    }

    /// Create a FailedToLoadPdf error.
    pub fn failed_to_load_pdf(path: PathBuf, reason: impl Into<String>) -> Self {
        Self::FailedToLoadPdf {
            path,
            reason: reason.into(),
        }
    }

    /// Create a CorruptedPdf error.
    pub fn corrupted_pdf(path: PathBuf, details: impl Into<String>) -> Self {
        Self::CorruptedPdf {
            path,
            details: details.into(),
        }
    }

    /// Create an EncryptedPdf error.
    pub fn encrypted_pdf(path: PathBuf) -> Self {
        Self::EncryptedPdf { path }
    }

    /// Create an OutputExists error.
    pub fn output_exists(path: PathBuf) -> Self {
        Self::OutputExists { path }
    }

    /// Create a MergeFailed error.
    pub fn merge_failed(reason: impl Into<String>) -> Self {
        Self::MergeFailed {
            reason: reason.into(),
        }
    }

    /// Create a SplitFailed error.
    pub fn split_failed(reason: impl Into<String>) -> Self {
        Self::SplitFailed {
            reason: reason.into(),
        }
    }

    /// Create an EncryptionFailed error.
    pub fn encryption_failed(reason: impl Into<String>) -> Self {
        Self::EncryptionFailed {
            reason: reason.into(),
        }
    }

    /// Create an InvalidConfig error.
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }

    /// Create an Other error with a custom message.
    pub fn other(message: impl Into<String>) -> Self {
        Self::Other {
            message: message.into(),
        }
    }

    /// Classify this error under the engine's error taxonomy.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::EmptyPassword | Self::NoSourceFiles | Self::InvalidConfig { .. } => {
                ErrorKind::Validation
            }
            Self::FileNotFound { .. }
            | Self::FileNotAccessible { .. }
            | Self::NotAFile { .. }
            | Self::OutputExists { .. }
            | Self::OutputDirMissing { .. }
            | Self::NotADirectory { .. }
            | Self::FailedToCreateOutput { .. }
            | Self::FailedToWrite { .. }
            | Self::Io { .. } => ErrorKind::Io,
            Self::FailedToLoadPdf { .. }
            | Self::CorruptedPdf { .. }
            | Self::EncryptedPdf { .. } => ErrorKind::Format,
            Self::MergeFailed { .. }
            | Self::SplitFailed { .. }
            | Self::EncryptionFailed { .. }
            | Self::Cancelled
            | Self::Other { .. } => ErrorKind::Operation,
        }
    }

    /// Check if this error is recoverable (operation can continue).
    ///
    /// Returns true for per-source errors that may be skipped in
    /// continue-on-error mode during a merge.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::FileNotFound { .. }
                | Self::FailedToLoadPdf { .. }
                | Self::CorruptedPdf { .. }
                | Self::EncryptedPdf { .. }
        )
    }

    /// Check if this error should stop all processing immediately.
    ///
    /// Returns true for fatal errors that should always terminate.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Self::NoSourceFiles
                | Self::EmptyPassword
                | Self::FailedToCreateOutput { .. }
                | Self::FailedToWrite { .. }
                | Self::Cancelled
        )
    }

    /// Get the exit code for this error.
    ///
    /// Returns the appropriate process exit code based on error type.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::FileNotFound { .. } => 2,
            Self::FileNotAccessible { .. } => 2,
            Self::NotAFile { .. } => 2,
            Self::OutputDirMissing { .. } => 2,
            Self::NotADirectory { .. } => 2,
            Self::FailedToLoadPdf { .. } => 3,
            Self::CorruptedPdf { .. } => 3,
            Self::EncryptedPdf { .. } => 3,
            Self::EmptyPassword => 1,
            Self::NoSourceFiles => 1,
            Self::OutputExists { .. } => 4,
            Self::FailedToCreateOutput { .. } => 5,
            Self::FailedToWrite { .. } => 5,
            Self::MergeFailed { .. } => 6,
            Self::SplitFailed { .. } => 6,
            Self::EncryptionFailed { .. } => 6,
            Self::InvalidConfig { .. } => 1,
            Self::Cancelled => 130, // Standard exit code for SIGINT
            Self::Io { .. } => 5,
            Self::Other { .. } => 1,
        }
    }
}
