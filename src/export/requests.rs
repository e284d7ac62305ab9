//! Document API request assembly.
//!
//! Turns a translated [`StyledBlock`] sequence into the batch-update payload a
//! rich-text document API expects: one text insertion per block, followed by a
//! style update over the inserted range when the block carries a style. The
//! serialized shape matches the API's JSON schema (`insertText`,
//! `updateTextStyle`, camelCase fields, `{"magnitude": N, "unit": "PT"}` font
//! sizes).

use std::io::Write;

use serde::Serialize;

use crate::Result;
use crate::report::Report;
use crate::translate::{StyledBlock, TextStyle, translate};

use super::Exporter;

/// Where each block's insertion is anchored.
///
/// - `Start` inserts every block at the document head (index 1). Later blocks
///   push earlier ones down, so the finished document reads in reverse block
///   order. This is the behavior deployed publishers exhibit and is the
///   default for compatibility.
/// - `Append` advances a cursor past each insertion so blocks land in input
///   order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InsertStrategy {
    #[default]
    Start,
    Append,
}

/// A single document API request.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Request {
    #[serde(rename_all = "camelCase")]
    InsertText { location: Location, text: String },
    #[serde(rename_all = "camelCase")]
    UpdateTextStyle {
        range: Range,
        text_style: RequestTextStyle,
        fields: String,
    },
}

/// An insertion point. Index 1 is the start of the document body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Location {
    pub index: usize,
}

/// A half-open character range `[start_index, end_index)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Range {
    pub start_index: usize,
    pub end_index: usize,
}

/// The style payload of an `updateTextStyle` request.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestTextStyle {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bold: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_size: Option<FontSize>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FontSize {
    pub magnitude: u16,
    pub unit: String,
}

impl FontSize {
    pub fn pt(magnitude: u16) -> Self {
        FontSize {
            magnitude,
            unit: "PT".to_string(),
        }
    }
}

impl From<TextStyle> for RequestTextStyle {
    fn from(style: TextStyle) -> Self {
        RequestTextStyle {
            bold: style.bold.then_some(true),
            font_size: style.font_size_pt.map(FontSize::pt),
        }
    }
}

/// The API's field mask: a comma-joined list of the style keys being set.
fn style_fields(style: &TextStyle) -> String {
    let mut fields = Vec::with_capacity(2);
    if style.bold {
        fields.push("bold");
    }
    if style.font_size_pt.is_some() {
        fields.push("fontSize");
    }
    fields.join(",")
}

/// Assemble the request batch for a block sequence.
///
/// For each block in order: one insertion at the strategy's anchor, then — if
/// a style is present — one style update spanning exactly the inserted text,
/// anchored at the same point. Indices count Unicode scalar values, matching
/// the length of the inserted text.
pub fn build_requests(blocks: &[StyledBlock], strategy: InsertStrategy) -> Vec<Request> {
    let mut requests = Vec::with_capacity(blocks.len() * 2);
    let mut cursor = 1usize;

    for block in blocks {
        let at = match strategy {
            InsertStrategy::Start => 1,
            InsertStrategy::Append => cursor,
        };
        let len = block.text.chars().count();

        requests.push(Request::InsertText {
            location: Location { index: at },
            text: block.text.clone(),
        });

        if let Some(style) = block.style {
            requests.push(Request::UpdateTextStyle {
                range: Range {
                    start_index: at,
                    end_index: at + len,
                },
                text_style: style.into(),
                fields: style_fields(&style),
            });
        }

        cursor += len;
    }

    requests
}

/// Exporter that writes the request batch as a JSON array.
#[derive(Debug, Clone, Default)]
pub struct RequestsExporter {
    strategy: InsertStrategy,
}

impl RequestsExporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_strategy(strategy: InsertStrategy) -> Self {
        RequestsExporter { strategy }
    }
}

impl Exporter for RequestsExporter {
    fn export<W: Write>(&self, report: &Report, writer: &mut W) -> Result<()> {
        let blocks = translate(&report.body);
        let requests = build_requests(&blocks, self.strategy);
        serde_json::to_writer_pretty(&mut *writer, &requests)?;
        writer.write_all(b"\n")?;
        Ok(())
    }
}
