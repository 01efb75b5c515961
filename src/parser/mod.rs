//! Markdown Front-End
//!
//! Builds the positioned syntax tree the validation passes consume. This is
//! deliberately a documented subset of markdown, not a conformance parser:
//! it recognizes exactly the structure the indentation rules need to see
//! (paragraphs, blockquotes, fenced and indented code, flattened lists with
//! marker tokens, ATX headings, footnote definitions, HTML blocks, and the
//! inline tokens that can start a physical line). Columns are 1-based byte
//! columns; indentation is expected to be spaces.
//!
//! Any other markdown parser can drive the engine instead by producing the
//! same `Node` shape.

pub mod ast;
mod blocks;
mod inline;

pub use ast::{Node, NodeKind};

use crate::core::Document;

/// Parse a document into its positioned syntax tree.
pub fn parse(doc: &Document) -> Vec<Node> {
    let lines: Vec<blocks::LineRef> = (1..=doc.line_count())
        .map(|number| blocks::LineRef { number, offset: 0 })
        .collect();
    blocks::parse_flow(doc, &lines)
}

/// Line terminator token for the given line, positioned past its last byte.
pub(crate) fn line_ending(doc: &Document, line: usize) -> Node {
    let width = doc.line(line).len();
    Node::leaf(NodeKind::LineEnding, line, width + 1, line, width + 2)
}
