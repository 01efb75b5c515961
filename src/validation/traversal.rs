//! Traversal Engine
//!
//! Generic iteration primitives over the positioned syntax tree, with the
//! skip-to suppression the alignment rules use to avoid flagging the same
//! physical line twice.

use crate::parser::{Node, NodeKind};

/// Depth-first visit of every node matching `filter` (all nodes when the
/// filter is empty), recursing into children afterwards.
///
/// HTML flow blocks are never recursed into: block-level HTML has no
/// portable parent/child structure to validate against, so anything inside
/// one is left alone.
pub fn traverse<'a, F>(nodes: &'a [Node], filter: &[NodeKind], visit: &mut F)
where
    F: FnMut(&'a Node),
{
    for node in nodes {
        if filter.is_empty() || filter.contains(&node.kind) {
            visit(node);
        }
        if node.kind != NodeKind::HtmlFlow && !node.children.is_empty() {
            traverse(&node.children, filter, visit);
        }
    }
}

/// Skip-to control handed to [`iterate`] visitors.
#[derive(Debug, Default)]
pub struct Skip {
    requested: Option<NodeKind>,
}

impl Skip {
    /// Ignore all subsequent siblings until one of `kind` is seen.
    pub fn to(&mut self, kind: NodeKind) {
        self.requested = Some(kind);
    }
}

/// Single linear pass over a sibling list.
///
/// A visitor may request skip-to via [`Skip::to`]; in addition, meeting an
/// inline HTML span automatically arms skip-to the next line ending, so
/// nothing else sharing a physical line with HTML is independently flagged.
/// An HTML tag spanning lines that failed the block-start heuristic is
/// parsed as paragraph content; without this suppression the text around it
/// would be flagged against columns the author never controlled.
pub fn iterate<'a, F>(nodes: &'a [Node], filter: &[NodeKind], visit: &mut F)
where
    F: FnMut(&'a Node, &mut Skip),
{
    let mut skip_to: Option<NodeKind> = None;

    for node in nodes {
        if skip_to == Some(node.kind) {
            skip_to = None;
        }
        if node.kind == NodeKind::HtmlText {
            skip_to = Some(NodeKind::LineEnding);
        }

        let visit_requested = filter.is_empty() || filter.contains(&node.kind);
        if skip_to.is_none() && visit_requested {
            let mut skip = Skip::default();
            visit(node, &mut skip);
            if let Some(requested) = skip.requested {
                skip_to = Some(requested);
            }
        }
    }
}

/// First child matching `filter` whose starting line has not been consumed
/// by an inline HTML span, tracked via the end line of the most recent HTML
/// span seen.
pub fn find_first_non_html_token_of_type<'a>(
    nodes: &'a [Node],
    filter: &[NodeKind],
) -> Option<&'a Node> {
    let mut skip_line = None;

    nodes.iter().find(|node| {
        if node.kind == NodeKind::HtmlText {
            skip_line = Some(node.end_line);
        }
        filter.contains(&node.kind) && Some(node.start_line) != skip_line
    })
}
