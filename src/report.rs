//! The central report type: a titled block of markdown.

use crate::translate::split_lines;

/// A markdown report headed for publication.
///
/// Format-agnostic input to every exporter: the request assembly, the PDF
/// layout, and the local store all start from a `Report`.
#[derive(Debug, Clone, Default)]
pub struct Report {
    pub title: String,
    pub body: String,
}

impl Report {
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Report {
            title: title.into(),
            body: body.into(),
        }
    }

    /// Build a report from bare markdown, deriving the title from the first
    /// level-1 heading (or falling back to a generic one).
    pub fn from_markdown(body: impl Into<String>) -> Self {
        let body = body.into();
        let title = derive_title(&body).unwrap_or_else(|| "Untitled Report".to_string());
        Report { title, body }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Number of lines the body splits into (empty body → 1).
    pub fn line_count(&self) -> usize {
        split_lines(&self.body).count()
    }
}

fn derive_title(body: &str) -> Option<String> {
    split_lines(body)
        .filter_map(|line| line.strip_prefix("# "))
        .map(|rest| rest.trim().to_string())
        .find(|title| !title.is_empty())
}
