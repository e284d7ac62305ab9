//! Print-layout pipeline tests.
//!
//! The PDF exporter is exercised end to end: markdown in, binary PDF out,
//! checked structurally (magic bytes, trailer, page objects) rather than
//! pixel by pixel.

use docpress::export::{Exporter, PdfConfig, PdfExporter};
use docpress::{Report, Store};
use tempfile::TempDir;

const SAMPLE: &str = "\
# Migration Plan

## Context
The cluster runs two incompatible schema versions.

### Risks
Rolling back is lossy.

- freeze writes
- snapshot both replicas
- replay the delta

1. announce the window
2. run the migration

Closing remarks paragraph.
";

fn export_pdf(body: &str) -> Vec<u8> {
    let report = Report::from_markdown(body);
    let mut out = Vec::new();
    PdfExporter::new().export(&report, &mut out).unwrap();
    out
}

#[test]
fn test_pdf_magic_and_trailer() {
    let bytes = export_pdf(SAMPLE);
    assert!(bytes.starts_with(b"%PDF-"));
    let tail = &bytes[bytes.len().saturating_sub(16)..];
    assert!(
        tail.windows(5).any(|w| w == b"%%EOF"),
        "missing PDF trailer"
    );
}

#[test]
fn test_empty_report_still_renders_a_page() {
    let bytes = export_pdf("");
    assert!(bytes.starts_with(b"%PDF-"));
    let pages = bytes.windows(9).filter(|&w| w == b"/MediaBox").count();
    assert_eq!(pages, 1);
}

#[test]
fn test_single_page_for_short_report() {
    let bytes = export_pdf(SAMPLE);
    let pages = bytes.windows(9).filter(|&w| w == b"/MediaBox").count();
    assert_eq!(pages, 1);
}

#[test]
fn test_long_report_spans_pages() {
    let body = "## Section\n\nA paragraph of filler content for layout.\n\n".repeat(80);
    let bytes = export_pdf(&body);
    let pages = bytes.windows(9).filter(|&w| w == b"/MediaBox").count();
    assert!(pages > 1, "expected pagination, got {pages} page(s)");
}

#[test]
fn test_custom_page_size() {
    let report = Report::from_markdown(SAMPLE);
    let config = PdfConfig {
        page_width: 612.0,
        page_height: 792.0,
        ..PdfConfig::default()
    };
    let mut out = Vec::new();
    PdfExporter::with_config(config)
        .export(&report, &mut out)
        .unwrap();

    let text = String::from_utf8_lossy(&out);
    assert!(text.contains("612"), "letter width missing from MediaBox");
}

#[test]
fn test_pdf_saves_through_store() {
    let dir = TempDir::new().unwrap();
    let store = Store::with_dir(dir.path());

    let bytes = export_pdf(SAMPLE);
    let path = store.save(&bytes, "solution", "pdf").unwrap();

    let written = std::fs::read(&path).unwrap();
    assert_eq!(written, bytes);
    assert!(path.file_name().unwrap().to_str().unwrap().ends_with("_solution.pdf"));
}
