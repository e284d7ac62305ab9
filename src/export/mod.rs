//! Export module for rendering reports to their output formats.
//!
//! Provides the `Exporter` trait and format-specific implementations.
//!
//! # Architecture
//!
//! The `Exporter` trait uses a builder pattern:
//! - `new()` creates an exporter with default configuration
//! - `with_config()` allows customization
//! - `export()` writes to any `Write` destination
//!
//! # Example
//!
//! ```
//! use docpress::Report;
//! use docpress::export::{Exporter, RequestsExporter};
//!
//! let report = Report::from_markdown("# Findings\n\n- one\n- two\n");
//! let mut out = Vec::new();
//! RequestsExporter::new().export(&report, &mut out)?;
//! # Ok::<(), docpress::Error>(())
//! ```

use std::io::Write;

use crate::Result;
use crate::report::Report;

mod pdf;
mod requests;

pub use pdf::{PdfConfig, PdfExporter};
pub use requests::{
    FontSize, InsertStrategy, Location, Range, Request, RequestTextStyle, RequestsExporter,
    build_requests,
};

/// Trait for exporting reports to specific formats.
///
/// Exporters hold their configuration and write to any `Write` destination:
/// a `std::fs::File`, a `Vec<u8>`, a socket.
pub trait Exporter {
    /// Export the report to the provided writer.
    fn export<W: Write>(&self, report: &Report, writer: &mut W) -> Result<()>;
}
