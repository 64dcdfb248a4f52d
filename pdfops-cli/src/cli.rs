//! CLI argument parsing for pdfops.
//!
//! This module defines the command-line interface structure using `clap`.
//! Each subcommand maps onto one engine request type; conversion happens in
//! the `to_request` methods, which also expand glob patterns and run the
//! request-level validation.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use pdfops::config::{MergeRequest, OverwriteMode, ProtectRequest, SplitRequest};
use pdfops::error::{PdfOpsError, Result};
use pdfops::utils::collect_paths_for_patterns;

/// Merge, split, and password-protect PDF documents.
///
/// pdfops performs document assembly on local PDF files: concatenating
/// multiple documents into one, splitting one document into per-page files,
/// and applying password-based access protection.
#[derive(Parser, Debug)]
#[command(name = "pdfops")]
#[command(version)]
#[command(about = "Merge, split, and password-protect PDF documents", long_about = None)]
#[command(author)]
#[command(arg_required_else_help = true)]
pub struct Cli {
    /// Operation to perform.
    #[command(subcommand)]
    pub command: Command,
}

/// The available document assembly operations.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Concatenate multiple PDF files into a single document
    ///
    /// Sources are merged in the order given; every page of each source is
    /// appended in that source's own page order.
    Merge(MergeArgs),

    /// Split a PDF into one single-page file per page
    ///
    /// Page i of the source is written to <DIR>/page_<i>.pdf. The output
    /// directory must already exist.
    Split(SplitArgs),

    /// Password-protect a PDF
    ///
    /// Writes a copy of the source that requires the given password to open.
    Protect(ProtectArgs),
}

/// Arguments for the merge subcommand.
#[derive(Args, Debug)]
pub struct MergeArgs {
    /// Input PDF files to merge (in order)
    ///
    /// Specify multiple files or use glob patterns.
    /// Files are merged in the order provided.
    ///
    /// Examples:
    ///   pdfops merge file1.pdf file2.pdf -o output.pdf
    ///   pdfops merge 'chapter*.pdf' -o book.pdf
    #[arg(required = true, value_name = "FILE")]
    pub inputs: Vec<String>,

    /// Output PDF file path
    ///
    /// A .pdf suffix is appended if missing. Use --force to overwrite
    /// existing files without confirmation.
    #[arg(short, long, value_name = "FILE")]
    pub output: PathBuf,

    /// Dry run - validate inputs and preview the merge without writing
    #[arg(short = 'n', long)]
    pub dry_run: bool,

    /// Verbose output - show detailed information about each PDF
    #[arg(short, long)]
    pub verbose: bool,

    /// Force overwrite of an existing output file without confirmation
    #[arg(short, long)]
    pub force: bool,

    /// Never overwrite an existing output file
    #[arg(long, conflicts_with = "force")]
    pub no_clobber: bool,

    /// Suppress all non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Continue processing even if some PDFs fail to load
    ///
    /// By default, the merge stops on the first error. With this flag,
    /// problematic sources are skipped with a warning.
    #[arg(long)]
    pub continue_on_error: bool,

    /// Print the result as JSON on stdout
    #[arg(long)]
    pub json: bool,
}

impl MergeArgs {
    /// Build the engine request from the parsed arguments.
    ///
    /// # Errors
    ///
    /// Returns an error if glob expansion fails or the resulting request is
    /// invalid.
    pub fn to_request(&self) -> Result<MergeRequest> {
        let sources = collect_paths_for_patterns(&self.inputs)?;

        let request = MergeRequest {
            sources,
            output: self.output.clone(),
            overwrite_mode: overwrite_mode(self.force, self.no_clobber),
            dry_run: self.dry_run,
            quiet: self.quiet,
            verbose: self.verbose,
            continue_on_error: self.continue_on_error,
        };

        request
            .validate()
            .map_err(|e| PdfOpsError::invalid_config(e.to_string()))?;

        Ok(request)
    }
}

/// Arguments for the split subcommand.
#[derive(Args, Debug)]
pub struct SplitArgs {
    /// PDF file to split
    #[arg(value_name = "FILE")]
    pub input: PathBuf,

    /// Directory that receives the page files
    ///
    /// Must already exist; pdfops does not create it. Page i of the source
    /// is written as page_<i>.pdf directly into this directory.
    #[arg(short = 'd', long = "output-dir", value_name = "DIR")]
    pub output_dir: PathBuf,

    /// Dry run - validate the source and preview the split without writing
    #[arg(short = 'n', long)]
    pub dry_run: bool,

    /// Verbose output - show detailed information about the source PDF
    #[arg(short, long)]
    pub verbose: bool,

    /// Suppress all non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Print the result as JSON on stdout
    #[arg(long)]
    pub json: bool,
}

impl SplitArgs {
    /// Build the engine request from the parsed arguments.
    ///
    /// # Errors
    ///
    /// Returns an error if the resulting request is invalid.
    pub fn to_request(&self) -> Result<SplitRequest> {
        let request = SplitRequest {
            source: self.input.clone(),
            output_dir: self.output_dir.clone(),
            dry_run: self.dry_run,
            quiet: self.quiet,
            verbose: self.verbose,
        };

        request
            .validate()
            .map_err(|e| PdfOpsError::invalid_config(e.to_string()))?;

        Ok(request)
    }
}

/// Arguments for the protect subcommand.
#[derive(Args, Debug)]
pub struct ProtectArgs {
    /// PDF file to protect
    #[arg(value_name = "FILE")]
    pub input: PathBuf,

    /// Output PDF file path
    ///
    /// A .pdf suffix is appended if missing.
    #[arg(short, long, value_name = "FILE")]
    pub output: PathBuf,

    /// Password required to open the protected output
    ///
    /// Can also be supplied via the PDFOPS_PASSWORD environment variable to
    /// keep it out of the shell history.
    #[arg(
        short,
        long,
        value_name = "PASSWORD",
        env = "PDFOPS_PASSWORD",
        hide_env_values = true
    )]
    pub password: String,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Force overwrite of an existing output file without confirmation
    #[arg(short, long)]
    pub force: bool,

    /// Never overwrite an existing output file
    #[arg(long, conflicts_with = "force")]
    pub no_clobber: bool,

    /// Suppress all non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Print the result as JSON on stdout
    #[arg(long)]
    pub json: bool,
}

impl ProtectArgs {
    /// Build the engine request from the parsed arguments.
    ///
    /// # Errors
    ///
    /// Returns an error if the resulting request is invalid (for example an
    /// empty password).
    pub fn to_request(&self) -> Result<ProtectRequest> {
        let request = ProtectRequest {
            source: self.input.clone(),
            output: self.output.clone(),
            password: self.password.clone(),
            overwrite_mode: overwrite_mode(self.force, self.no_clobber),
            quiet: self.quiet,
            verbose: self.verbose,
        };

        // Surface an empty password as the dedicated validation error rather
        // than a generic message.
        if request.password.is_empty() {
            return Err(PdfOpsError::EmptyPassword);
        }

        request
            .validate()
            .map_err(|e| PdfOpsError::invalid_config(e.to_string()))?;

        Ok(request)
    }
}

/// Resolve the overwrite mode from the force/no-clobber flag pair.
fn overwrite_mode(force: bool, no_clobber: bool) -> OverwriteMode {
    if force {
        OverwriteMode::Force
    } else if no_clobber {
        OverwriteMode::NoClobber
    } else {
        OverwriteMode::Prompt
    }
}
