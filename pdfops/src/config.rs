//! Request types for the document assembly engine.
//!
//! This module transforms presentation-layer arguments into validated request
//! objects that drive the three operations. Each request is constructed per
//! invocation, consumed immediately, and never retained; the engine holds no
//! state across requests.

use anyhow::{Result, bail};

use crate::utils::ensure_pdf_extension;
use std::path::PathBuf;

/// Output file overwrite behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OverwriteMode {
    /// Prompt the user before overwriting (default).
    ///
    /// Prompting itself happens in the presentation layer; by the time a
    /// request reaches the engine, `Prompt` means the caller has confirmed.
    #[default]
    Prompt,
    /// Always overwrite without prompting.
    Force,
    /// Never overwrite, error if file exists.
    NoClobber,
}

/// Request to concatenate multiple documents into one.
///
/// Pages are appended in source order; within each source, the source's own
/// page order is preserved.
#[derive(Debug, Clone)]
pub struct MergeRequest {
    /// Source PDF file paths (in merge order).
    pub sources: Vec<PathBuf>,

    /// Output PDF file path. A `.pdf` suffix is appended if missing.
    pub output: PathBuf,

    /// File overwrite behavior for the output.
    pub overwrite_mode: OverwriteMode,

    /// Dry run mode - validate without creating output.
    pub dry_run: bool,

    /// Quiet mode - suppress non-error output.
    pub quiet: bool,

    /// Verbose output mode.
    pub verbose: bool,

    /// Skip unreadable or invalid sources instead of stopping.
    pub continue_on_error: bool,
}

impl MergeRequest {
    /// Create a request with default ambient flags.
    pub fn new(sources: Vec<PathBuf>, output: PathBuf) -> Self {
        Self {
            sources,
            output,
            overwrite_mode: OverwriteMode::default(),
            dry_run: false,
            quiet: false,
            verbose: false,
            continue_on_error: false,
        }
    }

    /// The output path with the `.pdf` suffix guaranteed.
    pub fn resolved_output(&self) -> PathBuf {
        ensure_pdf_extension(&self.output)
    }

    /// Validate the request.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - No source files are specified
    /// - Verbose and quiet modes are both enabled
    /// - The output path is also one of the sources
    pub fn validate(&self) -> Result<()> {
        if self.sources.is_empty() {
            bail!("No source files specified");
        }

        if self.verbose && self.quiet {
            bail!("Cannot use both --verbose and --quiet");
        }

        let output = self.resolved_output();
        for source in &self.sources {
            if *source == output {
                bail!(
                    "Output file cannot be one of the source files: {}",
                    output.display()
                );
            }
        }

        Ok(())
    }
}

/// Request to decompose one document into per-page files.
///
/// Page *i* of the source (1-based, original order) is written to
/// `output_dir/page_<i>.pdf`.
#[derive(Debug, Clone)]
pub struct SplitRequest {
    /// Source PDF file path.
    pub source: PathBuf,

    /// Directory that receives the per-page files. Must already exist; the
    /// engine does not create directories.
    pub output_dir: PathBuf,

    /// Dry run mode - validate without creating output.
    pub dry_run: bool,

    /// Quiet mode - suppress non-error output.
    pub quiet: bool,

    /// Verbose output mode.
    pub verbose: bool,
}

impl SplitRequest {
    /// Create a request with default ambient flags.
    pub fn new(source: PathBuf, output_dir: PathBuf) -> Self {
        Self {
            source,
            output_dir,
            dry_run: false,
            quiet: false,
            verbose: false,
        }
    }

    /// Validate the request.
    ///
    /// # Errors
    ///
    /// Returns an error if verbose and quiet modes are both enabled or the
    /// output directory path is empty.
    pub fn validate(&self) -> Result<()> {
        if self.verbose && self.quiet {
            bail!("Cannot use both --verbose and --quiet");
        }

        if self.output_dir.as_os_str().is_empty() {
            bail!("Output directory must not be empty");
        }

        Ok(())
    }
}

/// Request to re-serialize a document with password protection applied.
#[derive(Debug, Clone)]
pub struct ProtectRequest {
    /// Source PDF file path.
    pub source: PathBuf,

    /// Output PDF file path. A `.pdf` suffix is appended if missing.
    pub output: PathBuf,

    /// Password required to open the protected output. Must be non-empty.
    pub password: String,

    /// File overwrite behavior for the output.
    pub overwrite_mode: OverwriteMode,

    /// Quiet mode - suppress non-error output.
    pub quiet: bool,

    /// Verbose output mode.
    pub verbose: bool,
}

impl ProtectRequest {
    /// Create a request with default ambient flags.
    pub fn new(source: PathBuf, output: PathBuf, password: String) -> Self {
        Self {
            source,
            output,
            password,
            overwrite_mode: OverwriteMode::default(),
            quiet: false,
            verbose: false,
        }
    }

    /// The output path with the `.pdf` suffix guaranteed.
    pub fn resolved_output(&self) -> PathBuf {
        ensure_pdf_extension(&self.output)
    }

    /// Validate the request.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The password is empty
    /// - Verbose and quiet modes are both enabled
    /// - The output path equals the source path
    pub fn validate(&self) -> Result<()> {
        if self.password.is_empty() {
            bail!("Password must not be empty");
        }

        if self.verbose && self.quiet {
            bail!("Cannot use both --verbose and --quiet");
        }

        if self.resolved_output() == self.source {
            bail!(
                "Output file cannot be the same as the source file: {}",
                self.source.display()
            );
        }

        Ok(())
    }
}
