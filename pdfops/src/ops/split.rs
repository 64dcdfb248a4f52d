//! Core PDF splitting implementation.
//!
//! Decomposes one document into one single-page document per page. Output
//! files are named `page_<i>.pdf` with `<i>` the 1-based page index in
//! decimal, no padding, placed directly in the requested directory.

use lopdf::{Document, Object, ObjectId};
use std::path::PathBuf;
use std::time::{Duration, Instant};

use crate::config::SplitRequest;
use crate::error::{PdfOpsError, Result};
use crate::io::{PdfReader, PdfWriter};
use crate::utils::format_file_size;

/// Statistics about a split operation.
#[derive(Debug, Clone)]
pub struct SplitStatistics {
    /// Number of pages in the source, equal to the number of files written.
    pub page_count: usize,

    /// Total time taken for the split, including loading and writing.
    pub split_time: Duration,

    /// Combined size of the written page files in bytes.
    pub output_size: u64,
}

impl SplitStatistics {
    /// Format output size as human-readable string.
    pub fn format_output_size(&self) -> String {
        format_file_size(self.output_size)
    }
}

/// Result of a completed split operation.
#[derive(Debug)]
pub struct SplitOutcome {
    /// Paths of the written page files, in page order.
    pub page_files: Vec<PathBuf>,

    /// Statistics about the split.
    pub statistics: SplitStatistics,
}

/// PDF splitter that writes one single-page document per source page.
pub struct Splitter {
    /// Reader for loading the source.
    reader: PdfReader,

    /// Writer for the per-page outputs.
    writer: PdfWriter,
}

impl Splitter {
    /// Create a new splitter with default settings.
    pub fn new() -> Self {
        Self {
            reader: PdfReader::new(),
            writer: PdfWriter::new(),
        }
    }

    /// Split the request's source into per-page files.
    ///
    /// For each page at 1-based index *i* in the source's original order, a
    /// single-page document is written to `output_dir/page_<i>.pdf`. The
    /// number of output files equals the source page count.
    ///
    /// Page files are written one at a time; if a write fails midway,
    /// already-written pages from earlier indices remain on disk. Callers
    /// that need a clean directory after a failure must remove them.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The output directory does not exist or is not a directory (the
    ///   engine never creates it)
    /// - The source cannot be opened or is not a valid PDF
    /// - Any individual page write fails
    ///
    /// # Examples
    ///
    /// ```no_run
    /// # use pdfops::ops::Splitter;
    /// # use pdfops::config::SplitRequest;
    /// # use std::path::PathBuf;
    /// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
    /// let request = SplitRequest::new(PathBuf::from("doc.pdf"), PathBuf::from("pages"));
    /// let outcome = Splitter::new().split(&request).await?;
    /// println!("Wrote {} page files", outcome.page_files.len());
    /// # Ok(())
    /// # }
    /// ```
    pub async fn split(&self, request: &SplitRequest) -> Result<SplitOutcome> {
        request
            .validate()
            .map_err(|e| PdfOpsError::invalid_config(e.to_string()))?;

        let dir = &request.output_dir;
        if !dir.exists() {
            return Err(PdfOpsError::OutputDirMissing { path: dir.clone() });
        }
        if !dir.is_dir() {
            return Err(PdfOpsError::NotADirectory { path: dir.clone() });
        }

        let split_start = Instant::now();

        let loaded = self.reader.load(&request.source).await?;

        // 1-based page numbers in original order
        let pages: Vec<(u32, ObjectId)> = loaded.document.get_pages().into_iter().collect();

        let mut page_files = Vec::with_capacity(pages.len());
        let mut output_size = 0;

        for (number, page_id) in pages {
            let page_doc = extract_page(&loaded.document, page_id)?;
            let file_path = dir.join(page_file_name(number));

            let write_stats = self.writer.save_with_stats(&page_doc, &file_path).await?;
            output_size += write_stats.file_size;
            page_files.push(file_path);
        }

        let statistics = SplitStatistics {
            page_count: page_files.len(),
            split_time: split_start.elapsed(),
            output_size,
        };

        Ok(SplitOutcome {
            page_files,
            statistics,
        })
    }
}

impl Default for Splitter {
    fn default() -> Self {
        Self::new()
    }
}

/// File name for the page at the given 1-based index.
fn page_file_name(number: u32) -> String {
    format!("page_{number}.pdf")
}

/// Build a single-page document containing only the given page.
///
/// Clones the source, rewrites the root page tree to reference just the one
/// page, then prunes every object no longer reachable from the catalog.
fn extract_page(doc: &Document, page_id: ObjectId) -> Result<Document> {
    let mut page_doc = doc.clone();

    let catalog = page_doc
        .catalog_mut()
        .map_err(|e| PdfOpsError::split_failed(format!("Failed to get catalog: {e}")))?;

    let pages_id = catalog
        .get(b"Pages")
        .and_then(|p| p.as_reference())
        .map_err(|e| PdfOpsError::split_failed(format!("Failed to get pages reference: {e}")))?;

    let pages_obj = page_doc
        .get_object_mut(pages_id)
        .map_err(|e| PdfOpsError::split_failed(format!("Failed to get pages object: {e}")))?;

    if let Object::Dictionary(dict) = pages_obj {
        dict.set("Kids", Object::Array(vec![Object::Reference(page_id)]));
        dict.set("Count", Object::Integer(1));
    } else {
        return Err(PdfOpsError::split_failed("Pages object is not a dictionary"));
    }

    // The kept page must hang off the root node it is now listed under.
    if let Ok(Object::Dictionary(page_dict)) = page_doc.get_object_mut(page_id) {
        page_dict.set("Parent", Object::Reference(pages_id));
    }

    // Drop the remaining pages and everything only they referenced.
    page_doc.prune_objects();

    Ok(page_doc)
}

/// Split the request's source into per-page files.
///
/// Convenience wrapper around [`Splitter::split`].
pub async fn split_pdf(request: &SplitRequest) -> Result<SplitOutcome> {
    Splitter::new().split(request).await
}
