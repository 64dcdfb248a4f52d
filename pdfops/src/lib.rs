//! pdfops - Merge, split, and password-protect PDF documents.
//!
//! This library implements a small document assembly engine on top of the
//! `lopdf` codec. It provides three operations that share one page model:
//!
//! - Merging multiple documents into one
//! - Splitting one document into per-page files
//! - Applying password-based access protection
//!
//! Pages are opaque to the engine: every operation only reorders or copies
//! page references and leaves page content to the codec. Page order is
//! preserved end-to-end through every operation.
//!
//! # Examples
//!
//! ## Merge
//!
//! ```no_run
//! use pdfops::config::MergeRequest;
//! use pdfops::ops::merge_pdfs;
//! use std::path::PathBuf;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let request = MergeRequest::new(
//!     vec![PathBuf::from("a.pdf"), PathBuf::from("b.pdf")],
//!     PathBuf::from("merged.pdf"),
//! );
//!
//! let outcome = merge_pdfs(&request).await?;
//! println!("Created {} page document", outcome.statistics.total_pages);
//! # Ok(())
//! # }
//! ```
//!
//! ## Split
//!
//! ```no_run
//! use pdfops::config::SplitRequest;
//! use pdfops::ops::split_pdf;
//! use std::path::PathBuf;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let request = SplitRequest::new(PathBuf::from("doc.pdf"), PathBuf::from("pages"));
//! let outcome = split_pdf(&request).await?;
//! println!("Wrote {} page files", outcome.page_files.len());
//! # Ok(())
//! # }
//! ```
//!
//! ## Protect
//!
//! ```no_run
//! use pdfops::config::ProtectRequest;
//! use pdfops::ops::protect_pdf;
//! use std::path::PathBuf;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let request = ProtectRequest::new(
//!     PathBuf::from("doc.pdf"),
//!     PathBuf::from("locked.pdf"),
//!     "s3cret".to_string(),
//! );
//! let outcome = protect_pdf(&request).await?;
//! println!("Protected copy at {}", outcome.output_path.display());
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod error;
pub mod io;
pub mod ops;
pub mod output;
pub mod utils;
pub mod validation;

// Re-export commonly used types
pub use config::{MergeRequest, OverwriteMode, ProtectRequest, SplitRequest};
pub use error::{ErrorKind, PdfOpsError, Result};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name.
pub const NAME: &str = env!("CARGO_PKG_NAME");
