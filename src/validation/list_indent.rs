//! List Indent Calculator
//!
//! Walks the tree in document order maintaining an explicit stack of nesting
//! frames, one per open list, and validates that every item's marker line
//! sits at the indentation its ancestry dictates: the configured offset for
//! each unordered ancestor, the literal marker width of the most recently
//! opened item for each ordered ancestor.
//!
//! Lines that look like list items but were absorbed into a parent item's
//! paragraph (under-indented below what the grammar requires) are recovered
//! as synthetic pseudo-items so they are still flagged.

use std::collections::BTreeSet;

use crate::config::LintOptions;
use crate::core::Document;
use crate::parser::{Node, NodeKind};

use super::diagnostics::{Diagnostic, push_if_mismatch};
use super::markers::{
    indent_for, is_ordered_item_line, is_unordered_item_line, marker_width, quote_prefix_len,
};

pub const RULE_NAME: &str = "list-indentation";

/// One open (or finalized) list context.
#[derive(Debug)]
struct NestingFrame {
    ordered: bool,
    /// True when every enclosing list is unordered.
    parents_all_unordered: bool,
    /// Indentation inherited from the enclosing frames, computed at open.
    inherited_sub_indent: usize,
    /// Marker line numbers of the items recorded so far.
    items: Vec<usize>,
    /// Document-order position where the frame was opened, so diagnostics of
    /// nested lists stay ordered even though frames finalize at close.
    order: usize,
}

pub fn check(doc: &Document, tree: &[Node], options: &LintOptions) -> Vec<Diagnostic> {
    let mut stack: Vec<NestingFrame> = Vec::new();
    let mut finished: Vec<NestingFrame> = Vec::new();
    let mut order = 0;
    collect_frames(doc, tree, options, &mut stack, &mut finished, &mut order);
    finished.sort_by_key(|frame| frame.order);

    let base = if options.start_indented {
        options.effective_start_indent()
    } else {
        0
    };

    let mut diagnostics = Vec::new();
    for frame in &finished {
        // An unordered list nested only under unordered lists has no
        // absolute column to enforce; sibling consistency is the alignment
        // pass's concern.
        if !frame.ordered && frame.parents_all_unordered {
            continue;
        }
        let expected = base + frame.inherited_sub_indent;
        for &line in &frame.items {
            let raw = doc.line(line);
            let actual = indent_for(raw);
            let prefix = quote_prefix_len(raw);
            // range anchored to the marker match so multi-digit markers are
            // replaced atomically
            let range = actual + marker_width(raw, frame.ordered);
            push_if_mismatch(
                &mut diagnostics,
                RULE_NAME,
                line,
                expected,
                actual,
                format!("List items should be indented {expected} spaces"),
                prefix + 1,
                actual,
                0,
                range,
            );
        }
    }
    diagnostics.sort_by_key(|d| d.line);
    diagnostics
}

fn next_order(order: &mut usize) -> usize {
    let current = *order;
    *order += 1;
    current
}

fn enclosing_all_unordered(stack: &[NestingFrame]) -> bool {
    stack
        .last()
        .is_none_or(|frame| !frame.ordered && frame.parents_all_unordered)
}

/// Sum the enclosing frames' contributions, outermost first: the configured
/// sub-list offset for unordered ancestors with at least one item, the last
/// recorded item's marker width for ordered ancestors.
fn inherited_sub_indent(doc: &Document, stack: &[NestingFrame], options: &LintOptions) -> usize {
    stack
        .iter()
        .map(|frame| match frame.items.last() {
            None => 0,
            Some(_) if !frame.ordered => options.sub_list_offset(),
            Some(&line) => marker_width(doc.line(line), true),
        })
        .sum()
}

fn collect_frames(
    doc: &Document,
    nodes: &[Node],
    options: &LintOptions,
    stack: &mut Vec<NestingFrame>,
    finished: &mut Vec<NestingFrame>,
    order: &mut usize,
) {
    for node in nodes {
        match node.kind {
            NodeKind::ListOrdered | NodeKind::ListUnordered => {
                stack.push(NestingFrame {
                    ordered: node.kind == NodeKind::ListOrdered,
                    parents_all_unordered: enclosing_all_unordered(stack),
                    inherited_sub_indent: inherited_sub_indent(doc, stack, options),
                    items: Vec::new(),
                    order: next_order(order),
                });
                collect_frames(doc, &node.children, options, stack, finished, order);
                if let Some(frame) = stack.pop() {
                    finished.push(frame);
                }
            }
            NodeKind::ListItemMarker => {
                if let Some(frame) = stack.last_mut() {
                    frame.items.push(node.start_line);
                }
            }
            NodeKind::Content => {
                if let Some(frame) = pseudo_frame(doc, node, stack, options, order) {
                    finished.push(frame);
                }
            }
            NodeKind::BlockQuote | NodeKind::FootnoteDefinition => {
                collect_frames(doc, &node.children, options, stack, finished, order);
            }
            _ => {}
        }
    }
}

/// Detect marker-shaped lines absorbed into a paragraph and wrap them in a
/// synthetic frame. One pseudo-item per distinct line; the paragraph's first
/// line belongs to its real item and is never considered.
fn pseudo_frame(
    doc: &Document,
    content: &Node,
    stack: &[NestingFrame],
    options: &LintOptions,
    order: &mut usize,
) -> Option<NestingFrame> {
    let paragraph = content.children.first()?;
    let mut seen = BTreeSet::new();
    let mut items = Vec::new();
    let mut ordered = false;

    for child in &paragraph.children {
        if child.start_line == content.start_line || !seen.insert(child.start_line) {
            continue;
        }
        let raw = doc.line(child.start_line);
        let line_ordered = if is_ordered_item_line(raw) {
            true
        } else if is_unordered_item_line(raw) {
            false
        } else {
            continue;
        };
        if items.is_empty() {
            ordered = line_ordered;
        }
        items.push(child.start_line);
    }

    if items.is_empty() {
        return None;
    }
    Some(NestingFrame {
        ordered,
        parents_all_unordered: enclosing_all_unordered(stack),
        inherited_sub_indent: inherited_sub_indent(doc, stack, options),
        items,
        order: next_order(order),
    })
}
