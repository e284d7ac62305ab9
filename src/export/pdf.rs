//! Print-layout PDF export.
//!
//! Walks the block outline in document order and emits paginated, fixed-size
//! pages: a styled heading paragraph followed by a vertical spacer, a
//! normal-style paragraph per paragraph element followed by a spacer, and one
//! bulleted line per list item with a single spacer after the whole list.
//! Inline formatting never reaches this layer — the outline already reduced
//! every block to its text content.
//!
//! Text is set in the base-14 Helvetica faces with WinAnsi encoding (the
//! bullet glyph lives at 0x95 there). Line breaks come from an estimated
//! per-glyph advance rather than real font metrics; for a text-only report
//! layout the estimate is well within the margins.

use std::io::Write;

use pdf_writer::{Content, Finish, Name, Pdf, Rect, Ref, Str};

use crate::Result;
use crate::outline::{Block, Outline};
use crate::report::Report;

use super::Exporter;

/// Resource keys for the two fonts every page carries.
const FONT_NORMAL: Name<'static> = Name(b"F1");
const FONT_BOLD: Name<'static> = Name(b"F2");

const NORMAL_SIZE: f32 = 10.0;

/// Page geometry and spacing for the print layout.
#[derive(Debug, Clone)]
pub struct PdfConfig {
    /// Page width in points (default A4).
    pub page_width: f32,
    /// Page height in points (default A4).
    pub page_height: f32,
    /// Uniform page margin in points.
    pub margin: f32,
    /// Vertical gap emitted after each block, in points.
    pub spacer: f32,
}

impl Default for PdfConfig {
    fn default() -> Self {
        PdfConfig {
            page_width: 595.28,
            page_height: 841.89,
            margin: 72.0,
            spacer: 12.0,
        }
    }
}

/// Exporter for paginated PDF output.
#[derive(Debug, Clone, Default)]
pub struct PdfExporter {
    config: PdfConfig,
}

impl PdfExporter {
    /// Create a new PdfExporter with default (A4) configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a PdfExporter with the specified configuration.
    pub fn with_config(config: PdfConfig) -> Self {
        PdfExporter { config }
    }
}

impl Exporter for PdfExporter {
    fn export<W: Write>(&self, report: &Report, writer: &mut W) -> Result<()> {
        let outline = Outline::parse(&report.body);
        let bytes = render(&outline, &self.config);
        writer.write_all(&bytes)?;
        Ok(())
    }
}

/// Heading point size by depth: title, then three heading tiers.
fn heading_size(depth: u8) -> f32 {
    match depth {
        1 => 18.0,
        2 => 16.0,
        3 => 14.0,
        _ => 12.0,
    }
}

fn render(outline: &Outline, config: &PdfConfig) -> Vec<u8> {
    let mut builder = PageBuilder::new(config);

    for block in &outline.blocks {
        match block {
            Block::Heading { depth, text } => {
                builder.paragraph(text, heading_size(*depth), true);
                builder.spacer();
            }
            Block::Paragraph { text } => {
                builder.paragraph(text, NORMAL_SIZE, false);
                builder.spacer();
            }
            Block::List { items, .. } => {
                for item in items {
                    builder.paragraph(&format!("\u{2022} {item}"), NORMAL_SIZE, false);
                }
                // One spacer after the whole list, not after each item.
                builder.spacer();
            }
        }
    }

    let (pages, mut alloc) = builder.finish();

    let mut pdf = Pdf::new();
    let catalog_id = alloc.bump();
    let page_tree_id = alloc.bump();
    let font_normal_id = alloc.bump();
    let font_bold_id = alloc.bump();

    pdf.catalog(catalog_id).pages(page_tree_id);
    pdf.pages(page_tree_id)
        .kids(pages.iter().map(|page| page.page_id))
        .count(pages.len() as i32);

    pdf.type1_font(font_normal_id)
        .base_font(Name(b"Helvetica"))
        .encoding_predefined(Name(b"WinAnsiEncoding"));
    pdf.type1_font(font_bold_id)
        .base_font(Name(b"Helvetica-Bold"))
        .encoding_predefined(Name(b"WinAnsiEncoding"));

    for page in &pages {
        let mut pdf_page = pdf.page(page.page_id);
        pdf_page.media_box(Rect::new(0.0, 0.0, config.page_width, config.page_height));
        pdf_page.parent(page_tree_id);
        pdf_page.contents(page.content_id);

        let mut resources = pdf_page.resources();
        let mut fonts = resources.fonts();
        fonts.pair(FONT_NORMAL, font_normal_id);
        fonts.pair(FONT_BOLD, font_bold_id);
        fonts.finish();
        resources.finish();
        pdf_page.finish();

        pdf.stream(page.content_id, &page.data);
    }

    pdf.finish()
}

struct FinishedPage {
    page_id: Ref,
    content_id: Ref,
    data: Vec<u8>,
}

/// Accumulates content streams page by page, breaking when the baseline
/// would cross the bottom margin.
struct PageBuilder<'a> {
    config: &'a PdfConfig,
    alloc: Ref,
    done: Vec<FinishedPage>,
    page_id: Ref,
    content_id: Ref,
    content: Content,
    y: f32,
}

impl<'a> PageBuilder<'a> {
    fn new(config: &'a PdfConfig) -> Self {
        let mut alloc = Ref::new(1);
        let page_id = alloc.bump();
        let content_id = alloc.bump();
        PageBuilder {
            config,
            alloc,
            done: Vec::new(),
            page_id,
            content_id,
            content: Content::new(),
            y: config.page_height - config.margin,
        }
    }

    fn break_page(&mut self) {
        let content = std::mem::replace(&mut self.content, Content::new());
        self.done.push(FinishedPage {
            page_id: self.page_id,
            content_id: self.content_id,
            data: content.finish().to_vec(),
        });
        self.page_id = self.alloc.bump();
        self.content_id = self.alloc.bump();
        self.y = self.config.page_height - self.config.margin;
    }

    /// Write one wrapped paragraph at the current position.
    fn paragraph(&mut self, text: &str, size: f32, bold: bool) {
        let leading = size * 1.2;
        let max_width = self.config.page_width - 2.0 * self.config.margin;
        let font = if bold { FONT_BOLD } else { FONT_NORMAL };

        for line in wrap(text, size, bold, max_width) {
            if self.y - leading < self.config.margin {
                self.break_page();
            }
            self.y -= leading;

            let encoded = encode_win_ansi(&line);
            self.content.begin_text();
            self.content.set_font(font, size);
            self.content.next_line(self.config.margin, self.y);
            self.content.show(Str(&encoded));
            self.content.end_text();
        }
    }

    fn spacer(&mut self) {
        self.y -= self.config.spacer;
    }

    fn finish(mut self) -> (Vec<FinishedPage>, Ref) {
        self.done.push(FinishedPage {
            page_id: self.page_id,
            content_id: self.content_id,
            data: self.content.finish().to_vec(),
        });
        (self.done, self.alloc)
    }
}

/// Greedy word wrap against the writable width.
///
/// A single word wider than the line gets a line of its own; there is no
/// hyphenation.
fn wrap(text: &str, size: f32, bold: bool, max_width: f32) -> Vec<String> {
    let space_width = glyph_em(' ') * size;
    let mut lines = Vec::new();
    let mut line = String::new();
    let mut line_width = 0.0;

    for word in text.split_whitespace() {
        let word_width = text_width(word, size, bold);
        if !line.is_empty() && line_width + space_width + word_width > max_width {
            lines.push(std::mem::take(&mut line));
            line_width = 0.0;
        }
        if !line.is_empty() {
            line.push(' ');
            line_width += space_width;
        }
        line.push_str(word);
        line_width += word_width;
    }
    if !line.is_empty() {
        lines.push(line);
    }
    lines
}

/// Estimated advance of a run of text, in points.
fn text_width(text: &str, size: f32, bold: bool) -> f32 {
    let factor = if bold { 1.05 } else { 1.0 };
    text.chars().map(glyph_em).sum::<f32>() * size * factor
}

/// Coarse Helvetica glyph widths in em units.
fn glyph_em(c: char) -> f32 {
    match c {
        'i' | 'j' | 'l' | '.' | ',' | ';' | ':' | '!' | '|' | '\'' => 0.28,
        'f' | 't' | 'r' | ' ' | '-' | '(' | ')' | '[' | ']' | '/' => 0.33,
        'm' | 'w' | 'M' | 'W' | '@' => 0.89,
        'A'..='Z' | '0'..='9' => 0.67,
        _ => 0.53,
    }
}

/// Encode text for a WinAnsi content stream. Unmappable characters come out
/// as numeric references, which is acceptable for a text-only layout.
fn encode_win_ansi(text: &str) -> Vec<u8> {
    let (bytes, _, _) = encoding_rs::WINDOWS_1252.encode(text);
    bytes.into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_heading_sizes_by_depth() {
        assert_eq!(heading_size(1), 18.0);
        assert_eq!(heading_size(2), 16.0);
        assert_eq!(heading_size(3), 14.0);
        assert_eq!(heading_size(4), 12.0);
        assert_eq!(heading_size(6), 12.0);
    }

    #[test]
    fn test_wrap_short_text_single_line() {
        let lines = wrap("short text", 10.0, false, 450.0);
        assert_eq!(lines, vec!["short text"]);
    }

    #[test]
    fn test_wrap_fills_lines_greedily() {
        let text = "one two three four five six seven eight nine ten";
        let lines = wrap(text, 10.0, false, 80.0);
        assert!(lines.len() > 1);
        // No line exceeds the width.
        for line in &lines {
            assert!(text_width(line, 10.0, false) <= 80.0 + 1e-3, "line: {line}");
        }
        // Reassembly loses nothing.
        assert_eq!(lines.join(" "), text);
    }

    #[test]
    fn test_wrap_oversized_word_gets_own_line() {
        let lines = wrap("a verylongunbreakableword b", 10.0, false, 40.0);
        assert!(lines.contains(&"verylongunbreakableword".to_string()));
    }

    #[test]
    fn test_wrap_empty_text() {
        assert!(wrap("", 10.0, false, 450.0).is_empty());
        assert!(wrap("   ", 10.0, false, 450.0).is_empty());
    }

    #[test]
    fn test_bullet_encodes_to_winansi() {
        let encoded = encode_win_ansi("\u{2022} item");
        assert_eq!(encoded[0], 0x95);
    }

    #[test]
    fn test_render_produces_pdf_magic() {
        let outline = Outline::parse("# Title\n\nBody paragraph.\n\n- a\n- b\n");
        let bytes = render(&outline, &PdfConfig::default());
        assert!(bytes.starts_with(b"%PDF-"));
    }

    #[test]
    fn test_long_document_paginates() {
        let body = "paragraph line\n\n".repeat(200);
        let outline = Outline::parse(&body);
        let config = PdfConfig::default();
        let bytes = render(&outline, &config);
        // More content than fits one page: every page carries a MediaBox.
        let pages = bytes.windows(9).filter(|&w| w == b"/MediaBox").count();
        assert!(pages >= 2, "expected pagination, got {pages} page(s)");
    }
}
