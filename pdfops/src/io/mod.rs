//! PDF file input/output plumbing.
//!
//! The reader and writer wrap the blocking `lopdf` codec calls in
//! `spawn_blocking` tasks so that the async presentation layer stays
//! responsive while an operation runs to completion.

pub mod reader;
pub mod writer;

pub use reader::{LoadResult, LoadStatistics, LoadedPdf, PdfReader};
pub use writer::{PdfWriter, WriteOptions, WriteStatistics};
