//! Markdown → block outline for the print-layout pipeline.
//!
//! The PDF exporter does not consume [`StyledBlock`](crate::translate::StyledBlock)
//! sequences directly; it works from a coarser block tree produced by a real
//! markdown parser. This module walks pulldown-cmark events and keeps only
//! block-level structure: headings (depth 1-6), paragraphs, and lists. Inline
//! formatting — bold and italic spans, links — is deliberately discarded;
//! only the text content survives.
//!
//! Nested lists flatten into the enclosing list's item sequence in document
//! order, so each list renders as a flat run of bulleted lines.

use pulldown_cmark::{Event, Parser, Tag, TagEnd};

/// A block-level element in document order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    Heading { depth: u8, text: String },
    Paragraph { text: String },
    List { ordered: bool, items: Vec<String> },
}

/// The flat block structure of a markdown document.
#[derive(Debug, Clone, Default)]
pub struct Outline {
    pub blocks: Vec<Block>,
}

/// What the current text events are feeding into.
enum Sink {
    None,
    Heading(u8),
    Paragraph,
}

impl Outline {
    /// Parse markdown into an ordered sequence of blocks.
    ///
    /// # Examples
    ///
    /// ```
    /// use docpress::outline::{Block, Outline};
    ///
    /// let outline = Outline::parse("# Title\n\nSome **bold** text.\n");
    /// assert_eq!(outline.blocks[0], Block::Heading { depth: 1, text: "Title".into() });
    /// assert_eq!(outline.blocks[1], Block::Paragraph { text: "Some bold text.".into() });
    /// ```
    pub fn parse(markdown: &str) -> Outline {
        let mut blocks = Vec::new();
        let mut sink = Sink::None;
        let mut text = String::new();

        // List state: depth tracks nesting, but items accumulate flat.
        let mut list_depth = 0usize;
        let mut list_ordered = false;
        let mut items: Vec<String> = Vec::new();
        let mut item_text = String::new();
        let mut item_open = false;

        for event in Parser::new(markdown) {
            match event {
                Event::Start(Tag::Heading { level, .. }) if list_depth == 0 => {
                    sink = Sink::Heading(level as u8);
                    text.clear();
                }
                Event::End(TagEnd::Heading(_)) => {
                    if let Sink::Heading(depth) = sink {
                        blocks.push(Block::Heading {
                            depth,
                            text: std::mem::take(&mut text).trim().to_string(),
                        });
                    }
                    sink = Sink::None;
                }
                Event::Start(Tag::Paragraph) => {
                    if list_depth == 0 {
                        sink = Sink::Paragraph;
                        text.clear();
                    } else if item_open && !item_text.is_empty() {
                        // Second paragraph inside a loose list item.
                        item_text.push(' ');
                    }
                }
                Event::End(TagEnd::Paragraph) => {
                    if list_depth == 0 {
                        if let Sink::Paragraph = sink {
                            blocks.push(Block::Paragraph {
                                text: std::mem::take(&mut text).trim().to_string(),
                            });
                        }
                        sink = Sink::None;
                    }
                }
                Event::Start(Tag::List(start)) => {
                    if list_depth == 0 {
                        list_ordered = start.is_some();
                        items.clear();
                    } else if item_open {
                        // A nested list begins: the enclosing item's own text
                        // precedes its children in document order.
                        flush_item(&mut items, &mut item_text);
                        item_open = false;
                    }
                    list_depth += 1;
                }
                Event::End(TagEnd::List(_)) => {
                    list_depth = list_depth.saturating_sub(1);
                    if list_depth == 0 {
                        blocks.push(Block::List {
                            ordered: list_ordered,
                            items: std::mem::take(&mut items),
                        });
                    }
                }
                Event::Start(Tag::Item) => {
                    item_open = true;
                    item_text.clear();
                }
                Event::End(TagEnd::Item) => {
                    if item_open {
                        flush_item(&mut items, &mut item_text);
                        item_open = false;
                    }
                }
                Event::Text(t) | Event::Code(t) => {
                    if list_depth > 0 {
                        if item_open {
                            item_text.push_str(&t);
                        }
                    } else if !matches!(sink, Sink::None) {
                        text.push_str(&t);
                    }
                }
                Event::SoftBreak | Event::HardBreak => {
                    if list_depth > 0 {
                        if item_open {
                            item_text.push(' ');
                        }
                    } else if !matches!(sink, Sink::None) {
                        text.push(' ');
                    }
                }
                _ => {}
            }
        }

        Outline { blocks }
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }
}

fn flush_item(items: &mut Vec<String>, item_text: &mut String) {
    items.push(std::mem::take(item_text).trim().to_string());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_heading_depths() {
        let outline = Outline::parse("# One\n\n## Two\n\n###### Six\n");
        assert_eq!(
            outline.blocks,
            vec![
                Block::Heading { depth: 1, text: "One".into() },
                Block::Heading { depth: 2, text: "Two".into() },
                Block::Heading { depth: 6, text: "Six".into() },
            ]
        );
    }

    #[test]
    fn test_inline_formatting_discarded() {
        let outline = Outline::parse("Some **bold** and *italic* and `code`.\n");
        assert_eq!(
            outline.blocks,
            vec![Block::Paragraph { text: "Some bold and italic and code.".into() }]
        );
    }

    #[test]
    fn test_unordered_list() {
        let outline = Outline::parse("- one\n- two\n- three\n");
        assert_eq!(
            outline.blocks,
            vec![Block::List {
                ordered: false,
                items: vec!["one".into(), "two".into(), "three".into()],
            }]
        );
    }

    #[test]
    fn test_ordered_list() {
        let outline = Outline::parse("1. first\n2. second\n");
        assert_eq!(
            outline.blocks,
            vec![Block::List {
                ordered: true,
                items: vec!["first".into(), "second".into()],
            }]
        );
    }

    #[test]
    fn test_nested_list_flattens_in_document_order() {
        let outline = Outline::parse("- a\n  - b\n  - c\n- d\n");
        assert_eq!(
            outline.blocks,
            vec![Block::List {
                ordered: false,
                items: vec!["a".into(), "b".into(), "c".into(), "d".into()],
            }]
        );
    }

    #[test]
    fn test_soft_break_becomes_space() {
        let outline = Outline::parse("line one\nline two\n");
        assert_eq!(
            outline.blocks,
            vec![Block::Paragraph { text: "line one line two".into() }]
        );
    }

    #[test]
    fn test_mixed_document_order() {
        let outline = Outline::parse("# Title\n\nIntro.\n\n- a\n- b\n\nOutro.\n");
        assert_eq!(outline.blocks.len(), 4);
        assert!(matches!(outline.blocks[0], Block::Heading { depth: 1, .. }));
        assert!(matches!(outline.blocks[1], Block::Paragraph { .. }));
        assert!(matches!(outline.blocks[2], Block::List { .. }));
        assert!(matches!(outline.blocks[3], Block::Paragraph { .. }));
    }

    #[test]
    fn test_empty_input() {
        assert!(Outline::parse("").is_empty());
    }
}
