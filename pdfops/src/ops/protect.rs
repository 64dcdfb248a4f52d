//! Core PDF password protection implementation.
//!
//! Copies all pages of a document, in original order, into a new output
//! document and applies the codec's standard password-based encryption
//! before serializing it.

use lopdf::Document;
use lopdf::encryption::{EncryptionState, EncryptionVersion, Permissions};
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::path::PathBuf;
use std::time::{Duration, Instant};
use tokio::task;

use crate::config::{OverwriteMode, ProtectRequest};
use crate::error::{PdfOpsError, Result};
use crate::io::{PdfReader, PdfWriter};
use crate::utils::format_file_size;

/// Statistics about a protect operation.
#[derive(Debug, Clone)]
pub struct ProtectStatistics {
    /// Number of pages carried over into the protected output.
    pub page_count: usize,

    /// Total time taken, including loading, encryption, and writing.
    pub protect_time: Duration,

    /// Size of the written output file in bytes.
    pub output_size: u64,
}

impl ProtectStatistics {
    /// Format output size as human-readable string.
    pub fn format_output_size(&self) -> String {
        format_file_size(self.output_size)
    }
}

/// Result of a completed protect operation.
#[derive(Debug)]
pub struct ProtectOutcome {
    /// Path of the written output file (with the `.pdf` suffix applied).
    pub output_path: PathBuf,

    /// Statistics about the operation.
    pub statistics: ProtectStatistics,
}

/// Applies password protection to a document.
pub struct Protector {
    /// Reader for loading the source.
    reader: PdfReader,

    /// Writer for the protected output. Must not restructure the document:
    /// object numbers feed the per-object encryption keys.
    writer: PdfWriter,
}

impl Protector {
    /// Create a new protector with default settings.
    pub fn new() -> Self {
        Self {
            reader: PdfReader::new(),
            writer: PdfWriter::preserving_structure(),
        }
    }

    /// Re-serialize the request's source with password protection applied.
    ///
    /// The output document contains the same pages, in the same order, as
    /// the source and requires the supplied password to open. The password
    /// is used as both user and owner password under the codec's standard
    /// RC4-128 security handler, with all permissions retained.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The password is empty (no file is touched in that case)
    /// - The source cannot be opened, is not a valid PDF, or is already
    ///   encrypted
    /// - The output exists and the overwrite mode is `NoClobber`
    /// - Encryption or the output write fails
    ///
    /// # Examples
    ///
    /// ```no_run
    /// # use pdfops::ops::Protector;
    /// # use pdfops::config::ProtectRequest;
    /// # use std::path::PathBuf;
    /// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
    /// let request = ProtectRequest::new(
    ///     PathBuf::from("doc.pdf"),
    ///     PathBuf::from("locked.pdf"),
    ///     "s3cret".to_string(),
    /// );
    /// let outcome = Protector::new().protect(&request).await?;
    /// println!("Protected copy at {}", outcome.output_path.display());
    /// # Ok(())
    /// # }
    /// ```
    pub async fn protect(&self, request: &ProtectRequest) -> Result<ProtectOutcome> {
        if request.password.is_empty() {
            return Err(PdfOpsError::EmptyPassword);
        }

        request
            .validate()
            .map_err(|e| PdfOpsError::invalid_config(e.to_string()))?;

        let output = request.resolved_output();

        if output.exists() && request.overwrite_mode == OverwriteMode::NoClobber {
            return Err(PdfOpsError::output_exists(output));
        }
        self.writer.can_write(&output).await?;

        let protect_start = Instant::now();

        let loaded = self.reader.load(&request.source).await?;
        let page_count = loaded.page_count;

        let password = request.password.clone();
        let document = task::spawn_blocking(move || encrypt_document(loaded.document, &password))
            .await
            .map_err(|e| PdfOpsError::other(format!("Encryption task failed: {e}")))??;

        let write_stats = self.writer.save_with_stats(&document, &output).await?;

        let statistics = ProtectStatistics {
            page_count,
            protect_time: protect_start.elapsed(),
            output_size: write_stats.file_size,
        };

        Ok(ProtectOutcome {
            output_path: write_stats.output_path,
            statistics,
        })
    }
}

impl Default for Protector {
    fn default() -> Self {
        Self::new()
    }
}

/// Encrypt a document in place with the given password.
fn encrypt_document(mut doc: Document, password: &str) -> Result<Document> {
    // Normalize the structure now; after encryption the object numbers are
    // load-bearing and must not change.
    doc.compress();
    doc.renumber_objects();
    ensure_document_id(&mut doc);

    let version = EncryptionVersion::V2 {
        document: &doc,
        owner_password: password,
        user_password: password,
        key_length: 128,
        permissions: Permissions::all(),
    };

    let state = EncryptionState::try_from(version)
        .map_err(|e| PdfOpsError::encryption_failed(e.to_string()))?;

    doc.encrypt(&state)
        .map_err(|e| PdfOpsError::encryption_failed(e.to_string()))?;

    Ok(doc)
}

/// Make sure the trailer carries a file identifier.
///
/// The standard security handler folds the first file identifier into its
/// key derivation; documents assembled in memory may not have one yet.
fn ensure_document_id(doc: &mut Document) {
    use lopdf::{Object, StringFormat};

    if doc.trailer.get(b"ID").is_ok() {
        return;
    }

    let mut hasher = DefaultHasher::new();
    doc.max_id.hash(&mut hasher);
    doc.objects.len().hash(&mut hasher);
    for id in doc.objects.keys() {
        id.hash(&mut hasher);
    }
    let seed = hasher.finish().to_be_bytes();

    let mut id = Vec::with_capacity(16);
    id.extend_from_slice(&seed);
    id.extend_from_slice(&seed);

    doc.trailer.set(
        "ID",
        Object::Array(vec![
            Object::String(id.clone(), StringFormat::Hexadecimal),
            Object::String(id, StringFormat::Hexadecimal),
        ]),
    );
}

/// Re-serialize the request's source with password protection applied.
///
/// Convenience wrapper around [`Protector::protect`].
pub async fn protect_pdf(request: &ProtectRequest) -> Result<ProtectOutcome> {
    Protector::new().protect(request).await
}
