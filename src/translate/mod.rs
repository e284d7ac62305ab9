//! Markdown → styled block translation.
//!
//! This is the core of the crate: a pure, single-pass classifier that turns a
//! block of markdown text into an ordered sequence of [`StyledBlock`]s, one
//! per input line. The sequence is what the request assembly layer
//! ([`crate::export::requests`]) and the print layout ([`crate::export::pdf`])
//! consume.
//!
//! The classification is deliberately line-oriented and shallow: it recognizes
//! the handful of markdown forms that matter for a rich-text document API
//! (ATX headings up to level 3, fully bold-wrapped lines, bullets) and passes
//! everything else through untouched. Any line that matches no rule falls
//! through to plain text, so translation is total — there is no malformed
//! input.

use memchr::memchr;

/// Style applied to a contiguous run of inserted text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextStyle {
    pub bold: bool,
    /// Font size in points; `None` leaves the document default in place.
    pub font_size_pt: Option<u16>,
}

impl TextStyle {
    /// Bold with no size override (fully `**`-wrapped lines).
    pub const BOLD: TextStyle = TextStyle {
        bold: true,
        font_size_pt: None,
    };

    /// Bold heading at the given point size.
    pub const fn heading(pt: u16) -> Self {
        TextStyle {
            bold: true,
            font_size_pt: Some(pt),
        }
    }
}

/// One rendered unit of content: text plus an optional style.
///
/// Blocks are emitted in input order, and order is meaningful — it defines the
/// document layout top to bottom. The text always carries a trailing newline
/// (a bare `"\n"` for blank lines), so concatenating the `text` fields of a
/// translation yields one output line per input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyledBlock {
    pub text: String,
    pub style: Option<TextStyle>,
}

impl StyledBlock {
    fn plain(text: String) -> Self {
        StyledBlock { text, style: None }
    }

    fn styled(text: String, style: TextStyle) -> Self {
        StyledBlock {
            text,
            style: Some(style),
        }
    }
}

/// Translate markdown content into an ordered sequence of styled blocks.
///
/// Every input line maps to exactly one block; no lines are dropped or
/// merged. Empty input yields a single blank block. The function is pure:
/// the same input always produces the same output.
///
/// # Examples
///
/// ```
/// use docpress::translate::{translate, TextStyle};
///
/// let blocks = translate("# Title");
/// assert_eq!(blocks.len(), 1);
/// assert_eq!(blocks[0].text, "Title\n");
/// assert_eq!(blocks[0].style, Some(TextStyle::heading(20)));
///
/// let blocks = translate("- item");
/// assert_eq!(blocks[0].text, "\u{2022} item\n");
/// assert_eq!(blocks[0].style, None);
/// ```
pub fn translate(content: &str) -> Vec<StyledBlock> {
    split_lines(content).map(classify_line).collect()
}

/// Classify one line of markdown, first match wins.
fn classify_line(line: &str) -> StyledBlock {
    if let Some(rest) = line.strip_prefix("# ") {
        return StyledBlock::styled(format!("{rest}\n"), TextStyle::heading(20));
    }
    if let Some(rest) = line.strip_prefix("## ") {
        return StyledBlock::styled(format!("{rest}\n"), TextStyle::heading(16));
    }
    if let Some(rest) = line.strip_prefix("### ") {
        return StyledBlock::styled(format!("{rest}\n"), TextStyle::heading(14));
    }
    // The two markers must not overlap, so "**" and "***" are not bold lines.
    if line.len() >= 4 && line.starts_with("**") && line.ends_with("**") {
        let inner = &line[2..line.len() - 2];
        return StyledBlock::styled(format!("{inner}\n"), TextStyle::BOLD);
    }
    if let Some(rest) = line.strip_prefix("- ").or_else(|| line.strip_prefix("* ")) {
        return StyledBlock::plain(format!("\u{2022} {rest}\n"));
    }
    if line.trim().is_empty() {
        StyledBlock::plain("\n".to_string())
    } else {
        StyledBlock::plain(format!("{line}\n"))
    }
}

/// Split on `'\n'`, yielding every segment including a trailing empty one.
///
/// Equivalent to `str::split('\n')`, but scans with memchr. Content ending in
/// a newline therefore produces a final empty line, which translates to a
/// blank block — this preserves the trailing blank in round trips.
pub(crate) fn split_lines(content: &str) -> SplitLines<'_> {
    SplitLines {
        content,
        pos: 0,
        done: false,
    }
}

pub(crate) struct SplitLines<'a> {
    content: &'a str,
    pos: usize,
    done: bool,
}

impl<'a> Iterator for SplitLines<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        if self.done {
            return None;
        }
        let rest = &self.content[self.pos..];
        match memchr(b'\n', rest.as_bytes()) {
            Some(i) => {
                self.pos += i + 1;
                Some(&rest[..i])
            }
            None => {
                self.done = true;
                Some(rest)
            }
        }
    }
}
