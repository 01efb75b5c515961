//! Inline Scanner
//!
//! Tokenizes paragraph content into inline nodes with absolute positions.
//! Focus: extract the tokens the indentation rules care about - what starts
//! each physical line and where inline HTML spans sit - not full CommonMark
//! inline semantics.

use super::ast::{Node, NodeKind};
use super::line_ending;
use crate::core::Document;

/// Scan the lines of one paragraph into inline children.
///
/// `lines` holds `(line_number, content_start_col0)` pairs; the start column
/// points at the first non-whitespace character of the paragraph content on
/// that line. `LineEnding` tokens are emitted between physical lines, except
/// across lines swallowed by a multi-line inline HTML tag.
pub(crate) fn scan_paragraph(doc: &Document, lines: &[(usize, usize)]) -> Vec<Node> {
    let mut nodes = Vec::new();
    if lines.is_empty() {
        return nodes;
    }

    let mut li = 0;
    let (mut ln, start) = lines[0];
    let mut raw = doc.line(ln);
    let mut end = raw.trim_end().len();
    let mut pos = start.min(end);
    let mut data_start: Option<usize> = None;

    loop {
        if pos >= end {
            if let Some(ds) = data_start.take()
                && end > ds
            {
                nodes.push(Node::leaf(NodeKind::Text, ln, ds + 1, ln, end + 1));
            }
            li += 1;
            if li >= lines.len() {
                break;
            }
            nodes.push(line_ending(doc, ln));
            let (next_ln, next_start) = lines[li];
            ln = next_ln;
            raw = doc.line(ln);
            end = raw.trim_end().len();
            pos = next_start.min(end);
            continue;
        }

        let rest = &raw[pos..end];
        let token = scan_token(rest, ln, pos, data_start.is_none() || at_word_start(raw, pos));

        match token {
            Some(Scan::Token(node, advance)) => {
                if let Some(ds) = data_start.take()
                    && pos > ds
                {
                    nodes.push(Node::leaf(NodeKind::Text, ln, ds + 1, ln, pos + 1));
                }
                nodes.push(node);
                pos += advance;
            }
            Some(Scan::OpenTag) => {
                // The tag did not close on this line; if it closes on a later
                // paragraph line the whole span is one inline HTML token and
                // the swallowed line boundaries produce no LineEnding tokens.
                match find_tag_close(doc, lines, li) {
                    Some((close_li, close_pos)) => {
                        if let Some(ds) = data_start.take()
                            && pos > ds
                        {
                            nodes.push(Node::leaf(NodeKind::Text, ln, ds + 1, ln, pos + 1));
                        }
                        li = close_li;
                        let close_ln = lines[li].0;
                        nodes.push(Node {
                            kind: NodeKind::HtmlText,
                            start_line: ln,
                            start_column: pos + 1,
                            end_line: close_ln,
                            end_column: close_pos + 2,
                            children: Vec::new(),
                        });
                        ln = close_ln;
                        raw = doc.line(ln);
                        end = raw.trim_end().len();
                        pos = close_pos + 1;
                    }
                    None => {
                        if data_start.is_none() {
                            data_start = Some(pos);
                        }
                        pos += 1;
                    }
                }
            }
            None => {
                if data_start.is_none() {
                    data_start = Some(pos);
                }
                pos += rest.chars().next().map_or(1, char::len_utf8);
            }
        }
    }

    nodes
}

enum Scan {
    /// A complete token and how many bytes it consumed.
    Token(Node, usize),
    /// An inline HTML tag opener with no `>` on this line.
    OpenTag,
}

fn scan_token(rest: &str, ln: usize, pos: usize, word_start: bool) -> Option<Scan> {
    let bytes = rest.as_bytes();
    let single = |kind, width| {
        Scan::Token(
            Node::leaf(kind, ln, pos + 1, ln, pos + 1 + width),
            width,
        )
    };

    match bytes[0] {
        b'\\' if rest.len() >= 2 && bytes[1].is_ascii_punctuation() => {
            Some(single(NodeKind::CharEscape, 2))
        }
        b'`' => {
            let run = run_length(bytes, b'`');
            let close = find_backtick_close(&rest[run..], run)?;
            Some(single(NodeKind::CodeSpan, run + close + run))
        }
        b'<' => {
            if let Some(width) = scan_autolink(bytes) {
                return Some(single(NodeKind::Autolink, width));
            }
            let tag_start = matches!(bytes.get(1), Some(c) if c.is_ascii_alphabetic())
                || matches!(bytes.get(1), Some(b'/' | b'!' | b'?'));
            if !tag_start {
                return None;
            }
            match rest.find('>') {
                Some(gt) => Some(single(NodeKind::HtmlText, gt + 1)),
                None => Some(Scan::OpenTag),
            }
        }
        b'*' | b'_' => {
            let delim = bytes[0];
            let run = run_length(bytes, delim).min(2);
            if bytes.get(run).is_none_or(|c| c.is_ascii_whitespace()) {
                return None;
            }
            let marker = &rest[..run];
            let inner = rest[run..].find(marker).filter(|&q| q > 0)?;
            let kind = if run == 2 {
                NodeKind::Strong
            } else {
                NodeKind::Emphasis
            };
            let mut node = Node::leaf(kind, ln, pos + 1, ln, pos + 1 + run + inner + run);
            node.children.push(Node::leaf(
                NodeKind::Text,
                ln,
                pos + run + 1,
                ln,
                pos + run + inner + 1,
            ));
            Some(Scan::Token(node, run + inner + run))
        }
        b'[' => {
            let close = rest.find(']')?;
            if bytes.get(close + 1) != Some(&b'(') {
                return None;
            }
            let paren = rest[close + 2..].find(')')?;
            let width = close + 2 + paren + 1;
            let mut node = Node::leaf(NodeKind::Link, ln, pos + 1, ln, pos + 1 + width);
            if close > 1 {
                node.children.push(Node::leaf(
                    NodeKind::Text,
                    ln,
                    pos + 2,
                    ln,
                    pos + close + 1,
                ));
            }
            Some(Scan::Token(node, width))
        }
        _ if word_start && is_literal_autolink_start(rest) => {
            let width = rest
                .find(|c: char| c.is_ascii_whitespace())
                .unwrap_or(rest.len());
            Some(single(NodeKind::LiteralAutolink, width))
        }
        _ => None,
    }
}

fn at_word_start(raw: &str, pos: usize) -> bool {
    raw[..pos]
        .chars()
        .next_back()
        .is_none_or(|c| c.is_ascii_whitespace() || c == '(')
}

fn is_literal_autolink_start(rest: &str) -> bool {
    rest.starts_with("http://") || rest.starts_with("https://") || rest.starts_with("www.")
}

fn run_length(bytes: &[u8], ch: u8) -> usize {
    bytes.iter().take_while(|&&b| b == ch).count()
}

/// Find the start offset of a backtick run of exactly `n` in `s`.
fn find_backtick_close(s: &str, n: usize) -> Option<usize> {
    let bytes = s.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'`' {
            let run = run_length(&bytes[i..], b'`');
            if run == n {
                return Some(i);
            }
            i += run;
        } else {
            i += 1;
        }
    }
    None
}

/// `<scheme:...>` with no whitespace; returns the token width.
fn scan_autolink(bytes: &[u8]) -> Option<usize> {
    let mut i = 1;
    if !bytes.get(i)?.is_ascii_alphabetic() {
        return None;
    }
    i += 1;
    while i < bytes.len()
        && (bytes[i].is_ascii_alphanumeric() || matches!(bytes[i], b'+' | b'.' | b'-'))
    {
        i += 1;
    }
    if bytes.get(i) != Some(&b':') {
        return None;
    }
    i += 1;
    while i < bytes.len() && !matches!(bytes[i], b' ' | b'\t' | b'<' | b'>') {
        i += 1;
    }
    (bytes.get(i) == Some(&b'>')).then_some(i + 1)
}

/// Search later paragraph lines for the `>` closing a tag opened on
/// `lines[open_li]`. Returns the line index and byte offset of the `>`.
fn find_tag_close(doc: &Document, lines: &[(usize, usize)], open_li: usize) -> Option<(usize, usize)> {
    for (li, &(ln, start)) in lines.iter().enumerate().skip(open_li + 1) {
        let raw = doc.line(ln);
        let end = raw.trim_end().len();
        if let Some(gt) = raw[start.min(end)..end].find('>') {
            return Some((li, start.min(end) + gt));
        }
    }
    None
}
