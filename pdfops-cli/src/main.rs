//! pdfops - Merge, split, and password-protect PDF documents.
//!
//! Presentation layer for the document assembly engine: parses one
//! subcommand, hands a request to the engine, and renders the outcome.

mod cli;

use clap::Parser;
use serde_json::json;
use std::path::Path;
use std::process;

use crate::cli::{Cli, Command, MergeArgs, ProtectArgs, SplitArgs};
use pdfops::config::OverwriteMode;
use pdfops::error::PdfOpsError;
use pdfops::ops::{merge_pdfs, protect_pdf, split_pdf};
use pdfops::output::{OutputFormatter, display_validation_summary};
use pdfops::validation::Validator;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(err) = run(cli).await {
        eprintln!("Error: {err}");
        process::exit(err.exit_code());
    }
}

/// Dispatch the parsed subcommand.
async fn run(cli: Cli) -> Result<(), PdfOpsError> {
    match cli.command {
        Command::Merge(args) => run_merge(&args).await,
        Command::Split(args) => run_split(&args).await,
        Command::Protect(args) => run_protect(&args).await,
    }
}

/// Run the merge subcommand.
async fn run_merge(args: &MergeArgs) -> Result<(), PdfOpsError> {
    let request = args.to_request()?;
    let formatter = OutputFormatter::new(request.quiet, request.verbose);

    print_header(&formatter);

    formatter.info("Validating source files...");
    let validator = Validator::new();
    let summary = validator
        .validate_sources(&request.sources, request.continue_on_error)
        .await?;

    if formatter.should_print() {
        display_validation_summary(&formatter, &summary);
        formatter.blank_line();
    }

    let output = request.resolved_output();
    validator
        .validate_output_file(&output, request.overwrite_mode)
        .await?;

    if request.dry_run {
        for (index, result) in summary.results.iter().enumerate() {
            formatter.list_item(
                index + 1,
                &format!("{} ({} pages)", result.path.display(), result.page_count),
            );
        }
        formatter.blank_line();
        formatter.success("Dry run completed successfully");
        formatter.info(&format!("  Output would be: {}", output.display()));
        formatter.info("  Run without --dry-run to create the merged PDF");

        if args.json {
            print_json(&json!({
                "operation": "merge",
                "dryRun": true,
                "output": output,
                "totalPages": summary.total_pages,
                "sources": summary.results,
            }))?;
        }
        return Ok(());
    }

    confirm_overwrite(&output, request.overwrite_mode, &formatter)?;

    formatter.info("Merging documents...");
    let outcome = merge_pdfs(&request).await?;

    formatter.blank_line();
    formatter.success(&format!(
        "Successfully created {} ({} pages, {})",
        outcome.output_path.display(),
        outcome.statistics.total_pages,
        outcome.statistics.format_output_size()
    ));

    if formatter.is_verbose() {
        formatter.blank_line();
        formatter.section("Statistics");
        formatter.detail("Source files", &outcome.statistics.files_merged.to_string());
        formatter.detail("Total pages", &outcome.statistics.total_pages.to_string());
        formatter.detail("Input size", &outcome.statistics.format_input_size());
        formatter.detail("Output size", &outcome.statistics.format_output_size());
        formatter.detail(
            "Load time",
            &format!("{:.2}s", outcome.statistics.load_time.as_secs_f64()),
        );
        formatter.detail(
            "Merge time",
            &format!("{:.2}s", outcome.statistics.merge_time.as_secs_f64()),
        );
    }

    if args.json {
        print_json(&json!({
            "operation": "merge",
            "output": outcome.output_path,
            "filesMerged": outcome.statistics.files_merged,
            "totalPages": outcome.statistics.total_pages,
            "inputBytes": outcome.statistics.input_size,
            "outputBytes": outcome.statistics.output_size,
            "elapsedMs": outcome.statistics.merge_time.as_millis() as u64,
        }))?;
    }

    Ok(())
}

/// Run the split subcommand.
async fn run_split(args: &SplitArgs) -> Result<(), PdfOpsError> {
    let request = args.to_request()?;
    let formatter = OutputFormatter::new(request.quiet, request.verbose);

    print_header(&formatter);

    formatter.info("Validating source file...");
    let validator = Validator::new();
    let validation = validator.validate_file(&request.source).await?;

    formatter.info(&format!(
        "Source has {} page(s), {}",
        validation.page_count,
        pdfops::utils::format_file_size(validation.file_size)
    ));

    validator.validate_output_dir(&request.output_dir).await?;

    if request.dry_run {
        formatter.blank_line();
        formatter.success("Dry run completed successfully");
        formatter.info(&format!(
            "  Would write page_1.pdf through page_{}.pdf to {}",
            validation.page_count,
            request.output_dir.display()
        ));
        formatter.info("  Run without --dry-run to write the page files");

        if args.json {
            print_json(&json!({
                "operation": "split",
                "dryRun": true,
                "source": request.source,
                "outputDir": request.output_dir,
                "pageCount": validation.page_count,
            }))?;
        }
        return Ok(());
    }

    formatter.info("Splitting document...");
    let outcome = split_pdf(&request).await?;

    formatter.blank_line();
    formatter.success(&format!(
        "Wrote {} page file(s) to {} ({})",
        outcome.statistics.page_count,
        request.output_dir.display(),
        outcome.statistics.format_output_size()
    ));

    if formatter.is_verbose() {
        formatter.blank_line();
        formatter.section("Page files");
        for (index, path) in outcome.page_files.iter().enumerate() {
            formatter.list_item(index + 1, &path.display().to_string());
        }
    }

    if args.json {
        print_json(&json!({
            "operation": "split",
            "outputDir": request.output_dir,
            "pageFiles": outcome.page_files,
            "pageCount": outcome.statistics.page_count,
            "outputBytes": outcome.statistics.output_size,
            "elapsedMs": outcome.statistics.split_time.as_millis() as u64,
        }))?;
    }

    Ok(())
}

/// Run the protect subcommand.
async fn run_protect(args: &ProtectArgs) -> Result<(), PdfOpsError> {
    let request = args.to_request()?;
    let formatter = OutputFormatter::new(request.quiet, request.verbose);

    print_header(&formatter);

    formatter.info("Validating source file...");
    let validator = Validator::new();
    let validation = validator.validate_file(&request.source).await?;

    formatter.info(&format!(
        "Source has {} page(s), {}",
        validation.page_count,
        pdfops::utils::format_file_size(validation.file_size)
    ));

    let output = request.resolved_output();
    validator
        .validate_output_file(&output, request.overwrite_mode)
        .await?;

    confirm_overwrite(&output, request.overwrite_mode, &formatter)?;

    formatter.info("Applying password protection...");
    let outcome = protect_pdf(&request).await?;

    formatter.blank_line();
    formatter.success(&format!(
        "Successfully created {} ({} pages, {})",
        outcome.output_path.display(),
        outcome.statistics.page_count,
        outcome.statistics.format_output_size()
    ));
    formatter.info("  The output requires the password to open");

    if args.json {
        print_json(&json!({
            "operation": "protect",
            "output": outcome.output_path,
            "pageCount": outcome.statistics.page_count,
            "outputBytes": outcome.statistics.output_size,
            "elapsedMs": outcome.statistics.protect_time.as_millis() as u64,
        }))?;
    }

    Ok(())
}

/// Print the program banner unless in quiet mode.
fn print_header(formatter: &OutputFormatter) {
    if formatter.should_print() {
        formatter.section(&format!("{} v{}", pdfops::NAME, pdfops::VERSION));
        formatter.blank_line();
    }
}

/// Print a JSON report on stdout.
fn print_json(value: &serde_json::Value) -> Result<(), PdfOpsError> {
    let rendered = serde_json::to_string_pretty(value)
        .map_err(|e| PdfOpsError::other(format!("Failed to render JSON report: {e}")))?;
    println!("{rendered}");
    Ok(())
}

/// Handle output file overwrite scenarios.
fn confirm_overwrite(
    path: &Path,
    mode: OverwriteMode,
    formatter: &OutputFormatter,
) -> Result<(), PdfOpsError> {
    if !path.exists() {
        return Ok(());
    }

    match mode {
        OverwriteMode::Force => Ok(()),
        OverwriteMode::NoClobber => Err(PdfOpsError::output_exists(path.to_path_buf())),
        OverwriteMode::Prompt => {
            // In quiet mode there is nobody to ask; treat as no-clobber.
            if formatter.is_quiet() {
                return Err(PdfOpsError::output_exists(path.to_path_buf()));
            }

            formatter.warning(&format!("Output file already exists: {}", path.display()));

            use std::io::{self, Write};
            print!("Overwrite? [y/N]: ");
            io::stdout().flush().ok();

            let mut response = String::new();
            io::stdin()
                .read_line(&mut response)
                .map_err(|err| PdfOpsError::other(format!("Failed to read input: {err}")))?;

            let response = response.trim().to_lowercase();
            if response == "y" || response == "yes" {
                Ok(())
            } else {
                Err(PdfOpsError::Cancelled)
            }
        }
    }
}
