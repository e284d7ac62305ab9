//! # docpress
//!
//! A small library for publishing markdown reports: translate markdown into
//! the request batch a rich-text document API consumes, render a paginated
//! print-layout PDF, or keep a timestamped copy on disk.
//!
//! ## Features
//!
//! - Line-oriented markdown → styled block translation (headings, bold
//!   lines, bullets)
//! - Document API request assembly with the exact batch-update JSON shape
//! - Print-layout PDF export (A4, depth-styled headings, bulleted lists)
//! - Pluggable [`DocumentService`] seam with an in-memory implementation
//! - Timestamped local output via [`Store`]
//!
//! ## Quick Start
//!
//! ```
//! use docpress::export::{Exporter, PdfExporter, RequestsExporter};
//! use docpress::Report;
//!
//! let report = Report::from_markdown("# Findings\n\n- one\n- two\n");
//!
//! // The document API request batch, as JSON
//! let mut requests = Vec::new();
//! RequestsExporter::new().export(&report, &mut requests)?;
//!
//! // The print layout, as a binary PDF
//! let mut pdf = Vec::new();
//! PdfExporter::new().export(&report, &mut pdf)?;
//! assert!(pdf.starts_with(b"%PDF-"));
//! # Ok::<(), docpress::Error>(())
//! ```
//!
//! ## Working with Blocks
//!
//! The translator is a pure function from text to ordered styled blocks:
//!
//! ```
//! use docpress::translate::translate;
//!
//! let blocks = translate("# Title\nbody");
//! assert_eq!(blocks.len(), 2);
//! assert_eq!(blocks[0].text, "Title\n");
//! ```

pub mod docs;
pub mod error;
pub mod export;
pub mod outline;
pub mod report;
pub mod store;
pub mod translate;

pub use docs::{
    CredentialsProvider, DocumentId, DocumentService, MemoryService, PublishedDocument, publish,
};
pub use error::{Error, Result};
pub use export::{Exporter, InsertStrategy, PdfExporter, RequestsExporter, build_requests};
pub use outline::{Block, Outline};
pub use report::Report;
pub use store::Store;
pub use translate::{StyledBlock, TextStyle, translate};
