//! Core PDF merging implementation.
//!
//! Concatenates the pages of multiple documents, in source order, into a
//! single output document. Sources are loaded sequentially so the output
//! page order is always the concatenation of the inputs' page orders.

use lopdf::{Document, Object, ObjectId};
use std::path::PathBuf;
use std::time::{Duration, Instant};

use crate::config::{MergeRequest, OverwriteMode};
use crate::error::{PdfOpsError, Result};
use crate::io::{LoadedPdf, PdfReader, PdfWriter};
use crate::utils::format_file_size;

/// Statistics about a merge operation.
#[derive(Debug, Clone)]
pub struct MergeStatistics {
    /// Number of source PDFs merged into the output.
    pub files_merged: usize,

    /// Total number of pages in the merged document.
    pub total_pages: usize,

    /// Total time taken for the merge, including loading and writing.
    pub merge_time: Duration,

    /// Time taken to load all sources.
    pub load_time: Duration,

    /// Total size of the source files in bytes.
    pub input_size: u64,

    /// Size of the written output file in bytes.
    pub output_size: u64,
}

impl MergeStatistics {
    /// Format input size as human-readable string.
    pub fn format_input_size(&self) -> String {
        format_file_size(self.input_size)
    }

    /// Format output size as human-readable string.
    pub fn format_output_size(&self) -> String {
        format_file_size(self.output_size)
    }
}

/// Result of a completed merge operation.
#[derive(Debug)]
pub struct MergeOutcome {
    /// Path of the written output file (with the `.pdf` suffix applied).
    pub output_path: PathBuf,

    /// Paths of the sources that were merged, in merge order.
    pub merged_files: Vec<PathBuf>,

    /// Statistics about the merge.
    pub statistics: MergeStatistics,
}

/// PDF merger that concatenates multiple documents.
pub struct Merger {
    /// Reader for loading sources.
    reader: PdfReader,

    /// Writer for the merged output.
    writer: PdfWriter,
}

impl Merger {
    /// Create a new merger with default settings.
    pub fn new() -> Self {
        Self {
            reader: PdfReader::new(),
            writer: PdfWriter::new(),
        }
    }

    /// Merge the request's sources into a single output document.
    ///
    /// Sources are opened in the given order and every page of each source,
    /// in that source's internal order, is appended to the output. The output
    /// page count equals the sum of the input page counts.
    ///
    /// The output file is written atomically; a failed merge leaves no final
    /// output file behind.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The request is invalid (no sources, conflicting flags)
    /// - A source cannot be opened or is not a valid PDF (unless
    ///   `continue_on_error` is set, in which case it is skipped)
    /// - The output exists and the overwrite mode is `NoClobber`
    /// - The output cannot be written
    ///
    /// # Examples
    ///
    /// ```no_run
    /// # use pdfops::ops::Merger;
    /// # use pdfops::config::MergeRequest;
    /// # use std::path::PathBuf;
    /// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
    /// let request = MergeRequest::new(
    ///     vec![PathBuf::from("a.pdf"), PathBuf::from("b.pdf")],
    ///     PathBuf::from("merged.pdf"),
    /// );
    /// let outcome = Merger::new().merge(&request).await?;
    /// println!("Created {} pages", outcome.statistics.total_pages);
    /// # Ok(())
    /// # }
    /// ```
    pub async fn merge(&self, request: &MergeRequest) -> Result<MergeOutcome> {
        request
            .validate()
            .map_err(|e| PdfOpsError::invalid_config(e.to_string()))?;

        let output = request.resolved_output();

        if output.exists() && request.overwrite_mode == OverwriteMode::NoClobber {
            return Err(PdfOpsError::output_exists(output));
        }
        self.writer.can_write(&output).await?;

        let merge_start = Instant::now();

        // Load all sources, sequentially and in order
        let load_start = Instant::now();
        let (load_results, _load_stats) = self.reader.load_all(&request.sources).await;
        let load_time = load_start.elapsed();

        let mut loaded_pdfs = Vec::new();
        for result in load_results {
            match result {
                Ok(loaded) => loaded_pdfs.push(loaded),
                Err(e) => {
                    if request.continue_on_error {
                        eprintln!("Warning: Skipping source due to error: {e}");
                    } else {
                        return Err(e);
                    }
                }
            }
        }

        if loaded_pdfs.is_empty() {
            return Err(PdfOpsError::NoSourceFiles);
        }

        let document = self.combine(&loaded_pdfs)?;
        let total_pages = document.get_pages().len();

        let write_stats = self.writer.save_with_stats(&document, &output).await?;

        let merge_time = merge_start.elapsed();

        let statistics = MergeStatistics {
            files_merged: loaded_pdfs.len(),
            total_pages,
            merge_time,
            load_time,
            input_size: loaded_pdfs.iter().map(|p| p.file_size).sum(),
            output_size: write_stats.file_size,
        };

        let merged_files: Vec<PathBuf> = loaded_pdfs.into_iter().map(|p| p.path).collect();

        Ok(MergeOutcome {
            output_path: write_stats.output_path,
            merged_files,
            statistics,
        })
    }

    /// Concatenate loaded documents into a single in-memory document.
    fn combine(&self, loaded_pdfs: &[LoadedPdf]) -> Result<Document> {
        if loaded_pdfs.is_empty() {
            return Err(PdfOpsError::NoSourceFiles);
        }

        // The first document becomes the base; its catalog and page tree
        // survive into the output.
        let mut merged = loaded_pdfs[0].document.clone();
        let mut max_id = merged.max_id;

        for loaded in &loaded_pdfs[1..] {
            let mut doc = loaded.document.clone();

            // Renumber objects to avoid ID conflicts
            doc.renumber_objects_with(max_id + 1);
            max_id = doc.max_id;

            // Page references in original order; get_pages is keyed by the
            // 1-based page number, so iteration order is page order.
            let doc_pages: Vec<ObjectId> = doc.get_pages().into_values().collect();

            merged.objects.extend(doc.objects);

            self.append_pages(&mut merged, &doc_pages)?;
        }

        Ok(merged)
    }

    /// Append page references to the merged document's page tree.
    fn append_pages(&self, merged: &mut Document, page_ids: &[ObjectId]) -> Result<()> {
        let catalog = merged
            .catalog_mut()
            .map_err(|e| PdfOpsError::merge_failed(format!("Failed to get catalog: {e}")))?;

        let pages_id = catalog
            .get(b"Pages")
            .and_then(|p| p.as_reference())
            .map_err(|e| {
                PdfOpsError::merge_failed(format!("Failed to get pages reference: {e}"))
            })?;

        let pages_dict = merged
            .get_object_mut(pages_id)
            .map_err(|e| PdfOpsError::merge_failed(format!("Failed to get pages object: {e}")))?;

        if let Object::Dictionary(dict) = pages_dict {
            let kids = dict
                .get_mut(b"Kids")
                .map_err(|_| PdfOpsError::merge_failed("Pages dictionary missing Kids array"))?;

            if let Object::Array(kids_array) = kids {
                for &page_id in page_ids {
                    kids_array.push(Object::Reference(page_id));
                }
            } else {
                return Err(PdfOpsError::merge_failed("Kids is not an array"));
            }

            let current_count = dict.get(b"Count").and_then(|c| c.as_i64()).unwrap_or(0);

            let new_count = current_count + page_ids.len() as i64;
            dict.set("Count", Object::Integer(new_count));
        } else {
            return Err(PdfOpsError::merge_failed(
                "Pages object is not a dictionary",
            ));
        }

        // Appended pages keep the root page tree as their parent so viewers
        // resolve inherited attributes from the right node.
        for &page_id in page_ids {
            if let Ok(Object::Dictionary(page_dict)) = merged.get_object_mut(page_id) {
                page_dict.set("Parent", Object::Reference(pages_id));
            }
        }

        Ok(())
    }
}

impl Default for Merger {
    fn default() -> Self {
        Self::new()
    }
}

/// Merge the request's sources into a single output document.
///
/// Convenience wrapper around [`Merger::merge`].
pub async fn merge_pdfs(request: &MergeRequest) -> Result<MergeOutcome> {
    Merger::new().merge(request).await
}
