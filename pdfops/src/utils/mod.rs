//! Utilities shared across operations: path normalization, glob expansion,
//! and human-readable size formatting.

use crate::{Result, error::PdfOpsError};
use std::path::{Path, PathBuf};

/// Append a `.pdf` suffix to a path that does not already carry one.
///
/// The extension check is case-insensitive, so `report.PDF` is left alone
/// while `report.v2` becomes `report.v2.pdf`.
pub fn ensure_pdf_extension(path: &Path) -> PathBuf {
    match path.extension() {
        Some(ext) if ext.eq_ignore_ascii_case("pdf") => path.to_path_buf(),
        _ => {
            let mut name = path.as_os_str().to_os_string();
            name.push(".pdf");
            PathBuf::from(name)
        }
    }
}

/// Expand multiple input patterns into filesystem paths.
///
/// Accepts anything iterable with items that convert to `&str`, e.g.:
/// `&[&str]`, `Vec<String>`, or `Vec<&str>`.
///
/// Patterns without glob metacharacters are passed through verbatim, even if
/// the path does not exist, so that a missing literal input still surfaces as
/// a file-not-found error downstream instead of silently vanishing.
///
/// Errors:
/// - Propagates `glob` parse errors.
/// - Propagates filesystem errors from the glob iterator.
/// - A glob pattern that matches nothing is an error.
pub fn collect_paths_for_patterns<T>(patterns: T) -> Result<Vec<PathBuf>>
where
    T: IntoIterator,
    T::Item: AsRef<str>,
{
    let mut resolved_paths = Vec::new();

    for pattern in patterns.into_iter() {
        let pattern = pattern.as_ref();

        if !pattern.contains(['*', '?', '[']) {
            resolved_paths.push(PathBuf::from(pattern));
            continue;
        }

        let paths = collect_paths_for_pattern(pattern)?;
        if paths.is_empty() {
            return Err(PdfOpsError::invalid_config(format!(
                "No files match pattern: {pattern}"
            )));
        }
        resolved_paths.extend(paths);
    }

    Ok(resolved_paths)
}

/// Expand a single glob pattern into filesystem paths.
///
/// Pattern examples:
/// - `"**/*.pdf"`
/// - `"./docs/*.pdf"`
fn collect_paths_for_pattern<P: AsRef<str>>(pattern: P) -> Result<Vec<PathBuf>> {
    let mut resolved_paths = Vec::new();

    let paths = glob::glob(pattern.as_ref()).map_err(|err| PdfOpsError::Other {
        message: err.to_string(),
    })?;

    for entry in paths {
        let path = entry.map_err(|err| PdfOpsError::Other {
            message: err.to_string(),
        })?;
        resolved_paths.push(path);
    }

    Ok(resolved_paths)
}

/// Format a file size as a human-readable string.
pub fn format_file_size(size: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if size >= GB {
        format!("{:.2} GB", size as f64 / GB as f64)
    } else if size >= MB {
        format!("{:.2} MB", size as f64 / MB as f64)
    } else if size >= KB {
        format!("{:.2} KB", size as f64 / KB as f64)
    } else {
        format!("{size} bytes")
    }
}
