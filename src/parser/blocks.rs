//! Block Scanner
//!
//! Line-oriented construction of the positioned block tree. Lists are
//! flattened the way the validation rules expect: a list node's children are
//! marker tokens interleaved with the item's block children and line-ending
//! separators, all carrying absolute document columns.

use super::ast::{Node, NodeKind};
use super::{inline, line_ending};
use crate::core::Document;

/// One physical line viewed through the current container: `offset` is the
/// byte column where the container's content begins on that line.
#[derive(Debug, Clone, Copy)]
pub(crate) struct LineRef {
    pub number: usize,
    pub offset: usize,
}

#[derive(Debug, Clone, Copy)]
pub(crate) struct MarkerScan {
    pub ordered: bool,
    /// Marker characters including the `.`/`)` punctuation, excluding spaces.
    pub len: usize,
    /// Literal spaces following the marker.
    pub trailing: usize,
}

pub(crate) fn parse_flow(doc: &Document, lines: &[LineRef]) -> Vec<Node> {
    let mut nodes = Vec::new();
    let mut i = 0;
    while i < lines.len() {
        let lr = lines[i];
        let rest = tail(doc, lr);
        if rest.trim().is_empty() {
            nodes.push(line_ending(doc, lr.number));
            i += 1;
            continue;
        }
        let ws = leading_spaces(rest);
        let col0 = lr.offset + ws;
        let content = &rest[ws..];

        if ws >= 4 {
            i = parse_indented_code(doc, lines, i, col0, lr.offset + 4, &mut nodes);
        } else if content.starts_with('>') {
            i = parse_quote(doc, lines, i, col0, &mut nodes);
        } else if let Some((fence, len)) = scan_fence(content) {
            i = parse_fenced(doc, lines, i, col0, fence, len, &mut nodes);
        } else if is_atx_heading(content) {
            let line = doc.line(lr.number);
            nodes.push(Node::leaf(
                NodeKind::Heading,
                lr.number,
                col0 + 1,
                lr.number,
                line.len() + 1,
            ));
            nodes.push(line_ending(doc, lr.number));
            i += 1;
        } else if let Some(marker_len) = scan_footnote(content) {
            i = parse_footnote(doc, lines, i, col0, marker_len, &mut nodes);
        } else if let Some(marker) = scan_marker(content) {
            i = parse_list(doc, lines, i, col0, marker, &mut nodes);
        } else if is_html_flow_start(content) {
            i = parse_html_flow(doc, lines, i, col0, &mut nodes);
        } else {
            i = parse_paragraph(doc, lines, i, col0, &mut nodes);
        }
    }
    nodes
}

fn tail<'a>(doc: &'a Document, lr: LineRef) -> &'a str {
    let line = doc.line(lr.number);
    &line[lr.offset.min(line.len())..]
}

fn leading_spaces(s: &str) -> usize {
    s.bytes().take_while(|&b| b == b' ').count()
}

fn scan_fence(s: &str) -> Option<(u8, usize)> {
    let first = *s.as_bytes().first()?;
    if first != b'`' && first != b'~' {
        return None;
    }
    let run = s.bytes().take_while(|&b| b == first).count();
    (run >= 3).then_some((first, run))
}

fn is_atx_heading(s: &str) -> bool {
    let hashes = s.bytes().take_while(|&b| b == b'#').count();
    (1..=6).contains(&hashes) && s.as_bytes().get(hashes).is_none_or(|&b| b == b' ')
}

fn is_html_flow_start(s: &str) -> bool {
    let tag_open = matches!(s.as_bytes().get(1), Some(c) if c.is_ascii_alphabetic())
        || matches!(s.as_bytes(), [b'<', b'/' | b'!' | b'?', ..]);
    // A tag left open at the end of the line fails the block-start condition
    // and stays paragraph content, where the inline scanner picks it up.
    s.starts_with('<') && tag_open && s.contains('>')
}

/// Footnote definition marker `[^id]:` plus trailing spaces; returns its width.
fn scan_footnote(s: &str) -> Option<usize> {
    let rest = s.strip_prefix("[^")?;
    let close = rest.find(']')?;
    if close == 0 || rest[..close].contains(char::is_whitespace) {
        return None;
    }
    let after = &rest[close + 1..];
    if !after.starts_with(':') {
        return None;
    }
    let trailing = after[1..].bytes().take_while(|&b| b == b' ').count();
    Some(2 + close + 2 + trailing)
}

/// List item marker at the start of `s`: a bullet or `digits[.)]`, which must
/// be followed by a space or the end of the line.
pub(crate) fn scan_marker(s: &str) -> Option<MarkerScan> {
    let bytes = s.as_bytes();
    let spaces_from = |idx: usize| bytes[idx..].iter().take_while(|&&b| b == b' ').count();

    match *bytes.first()? {
        b'*' | b'+' | b'-' => match bytes.get(1) {
            None => Some(MarkerScan {
                ordered: false,
                len: 1,
                trailing: 0,
            }),
            Some(b' ') => Some(MarkerScan {
                ordered: false,
                len: 1,
                trailing: spaces_from(1),
            }),
            _ => None,
        },
        b'0'..=b'9' => {
            let digits = bytes.iter().take_while(|b| b.is_ascii_digit()).count();
            if digits > 9 || !matches!(bytes.get(digits), Some(b'.' | b')')) {
                return None;
            }
            let len = digits + 1;
            match bytes.get(len) {
                None => Some(MarkerScan {
                    ordered: true,
                    len,
                    trailing: 0,
                }),
                Some(b' ') => Some(MarkerScan {
                    ordered: true,
                    len,
                    trailing: spaces_from(len),
                }),
                _ => None,
            }
        }
        _ => None,
    }
}

fn interrupts_paragraph(content: &str) -> bool {
    content.starts_with('>')
        || scan_fence(content).is_some()
        || is_atx_heading(content)
        || scan_marker(content).is_some()
}

/// Build a `Content` block (wrapping one `Paragraph`) from collected
/// `(line, content_col0)` pairs and append it plus its line terminator.
fn push_content(doc: &Document, para: &[(usize, usize)], nodes: &mut Vec<Node>) {
    let Some(&(first_line, first_col)) = para.first() else {
        return;
    };
    let last_line = para[para.len() - 1].0;
    let end_column = doc.line(last_line).trim_end().len() + 1;
    let paragraph = Node {
        kind: NodeKind::Paragraph,
        start_line: first_line,
        start_column: first_col + 1,
        end_line: last_line,
        end_column,
        children: inline::scan_paragraph(doc, para),
    };
    let mut content = paragraph.clone();
    content.kind = NodeKind::Content;
    content.children = vec![paragraph];
    nodes.push(content);
    nodes.push(line_ending(doc, last_line));
}

fn flush_para(doc: &Document, para: &mut Vec<(usize, usize)>, nodes: &mut Vec<Node>) {
    if !para.is_empty() {
        push_content(doc, para, nodes);
        para.clear();
    }
}

fn flush_blanks(doc: &Document, blanks: &mut Vec<usize>, nodes: &mut Vec<Node>) {
    for number in blanks.drain(..) {
        nodes.push(line_ending(doc, number));
    }
}

fn parse_paragraph(
    doc: &Document,
    lines: &[LineRef],
    i: usize,
    col0: usize,
    nodes: &mut Vec<Node>,
) -> usize {
    let mut para = vec![(lines[i].number, col0)];
    let mut j = i + 1;
    while j < lines.len() {
        let rest = tail(doc, lines[j]);
        if rest.trim().is_empty() {
            break;
        }
        let ws = leading_spaces(rest);
        if interrupts_paragraph(&rest[ws..]) {
            break;
        }
        para.push((lines[j].number, lines[j].offset + ws));
        j += 1;
    }
    push_content(doc, &para, nodes);
    j
}

/// Indented code: consecutive lines at or past `min_col`, blanks allowed
/// between them. Trailing blanks are left to the caller.
fn parse_indented_code(
    doc: &Document,
    lines: &[LineRef],
    i: usize,
    col0: usize,
    min_col: usize,
    nodes: &mut Vec<Node>,
) -> usize {
    let mut last = i;
    let mut j = i + 1;
    while j < lines.len() {
        let rest = tail(doc, lines[j]);
        if rest.trim().is_empty() {
            j += 1;
            continue;
        }
        if lines[j].offset + leading_spaces(rest) >= min_col {
            last = j;
            j += 1;
        } else {
            break;
        }
    }
    let end_number = lines[last].number;
    nodes.push(Node::leaf(
        NodeKind::CodeIndented,
        lines[i].number,
        col0 + 1,
        end_number,
        doc.line(end_number).len() + 1,
    ));
    nodes.push(line_ending(doc, end_number));
    last + 1
}

fn parse_fenced(
    doc: &Document,
    lines: &[LineRef],
    i: usize,
    col0: usize,
    fence: u8,
    min_len: usize,
    nodes: &mut Vec<Node>,
) -> usize {
    let mut close = None;
    let mut j = i + 1;
    while j < lines.len() {
        let trimmed = tail(doc, lines[j]).trim();
        if trimmed.len() >= min_len && trimmed.bytes().all(|b| b == fence) {
            close = Some(j);
            break;
        }
        j += 1;
    }
    let last = close.unwrap_or(lines.len() - 1);
    let end_number = lines[last].number;
    nodes.push(Node::leaf(
        NodeKind::CodeFenced,
        lines[i].number,
        col0 + 1,
        end_number,
        doc.line(end_number).len() + 1,
    ));
    nodes.push(line_ending(doc, end_number));
    last + 1
}

fn parse_html_flow(
    doc: &Document,
    lines: &[LineRef],
    i: usize,
    col0: usize,
    nodes: &mut Vec<Node>,
) -> usize {
    let mut j = i;
    while j < lines.len() && !tail(doc, lines[j]).trim().is_empty() {
        j += 1;
    }
    let end_number = lines[j - 1].number;
    nodes.push(Node::leaf(
        NodeKind::HtmlFlow,
        lines[i].number,
        col0 + 1,
        end_number,
        doc.line(end_number).len() + 1,
    ));
    nodes.push(line_ending(doc, end_number));
    j
}

/// Blockquote: the maximal run of lines whose first non-space character is
/// `>`. Children are parsed from the content after the `>` (and one optional
/// space), keeping absolute columns. Lazy continuation is not modeled.
fn parse_quote(
    doc: &Document,
    lines: &[LineRef],
    i: usize,
    col0: usize,
    nodes: &mut Vec<Node>,
) -> usize {
    let mut inner = Vec::new();
    let mut j = i;
    while j < lines.len() {
        let lr = lines[j];
        let rest = tail(doc, lr);
        let ws = leading_spaces(rest);
        if !rest[ws..].starts_with('>') {
            break;
        }
        let mut offset = lr.offset + ws + 1;
        if doc.line(lr.number).as_bytes().get(offset) == Some(&b' ') {
            offset += 1;
        }
        inner.push(LineRef {
            number: lr.number,
            offset,
        });
        j += 1;
    }
    let end_number = inner[inner.len() - 1].number;
    let children = parse_flow(doc, &inner);
    nodes.push(Node {
        kind: NodeKind::BlockQuote,
        start_line: lines[i].number,
        start_column: col0 + 1,
        end_line: end_number,
        end_column: doc.line(end_number).len() + 1,
        children,
    });
    nodes.push(line_ending(doc, end_number));
    j
}

/// Footnote definition: marker `[^id]:` then item-like content at
/// `col0 + marker_len`, with lazy continuation while a paragraph is open.
fn parse_footnote(
    doc: &Document,
    lines: &[LineRef],
    i: usize,
    col0: usize,
    marker_len: usize,
    nodes: &mut Vec<Node>,
) -> usize {
    let first = lines[i];
    let content_col = col0 + marker_len;
    let mut inner = vec![LineRef {
        number: first.number,
        offset: content_col,
    }];
    let mut para_open = doc.line(first.number).trim_end().len() > content_col;
    let mut blanks: Vec<LineRef> = Vec::new();
    let mut j = i + 1;
    let mut consumed = j;

    while j < lines.len() {
        let lr = lines[j];
        let rest = tail(doc, lr);
        if rest.trim().is_empty() {
            blanks.push(lr);
            para_open = false;
            j += 1;
            continue;
        }
        let ws = leading_spaces(rest);
        let w0 = lr.offset + ws;
        let include =
            w0 >= content_col || (blanks.is_empty() && para_open && !interrupts_paragraph(&rest[ws..]));
        if !include {
            break;
        }
        inner.append(&mut blanks);
        inner.push(LineRef {
            number: lr.number,
            offset: w0.min(content_col),
        });
        para_open = !interrupts_paragraph(&rest[ws..]);
        j += 1;
        consumed = j;
    }

    let end_number = inner[inner.len() - 1].number;
    let children = parse_flow(doc, &inner);
    nodes.push(Node {
        kind: NodeKind::FootnoteDefinition,
        start_line: first.number,
        start_column: col0 + 1,
        end_line: end_number,
        end_column: doc.line(end_number).len() + 1,
        children,
    });
    nodes.push(line_ending(doc, end_number));
    consumed
}

/// Append a marker token for the item opening at `marker_col0` and seed the
/// item's paragraph with the remainder of the marker line. Returns the item's
/// content column.
fn push_item_marker(
    doc: &Document,
    lr: LineRef,
    marker_col0: usize,
    marker: MarkerScan,
    children: &mut Vec<Node>,
    para: &mut Vec<(usize, usize)>,
) -> usize {
    let width = marker.len + marker.trailing;
    children.push(Node::leaf(
        NodeKind::ListItemMarker,
        lr.number,
        marker_col0 + 1,
        lr.number,
        marker_col0 + 1 + width,
    ));
    let content_col = marker_col0 + width;
    if doc.line(lr.number).trim_end().len() > content_col {
        para.push((lr.number, content_col));
    }
    content_col
}

/// A list with markers at `marker_col0`. Children are flattened: marker
/// tokens, item block children, and line-ending separators as siblings.
///
/// A same-type marker within three columns of the list's own marker column
/// stays a sibling item even when misaligned (the alignment pass flags it);
/// a marker at or past the item's content column opens a nested list; any
/// other marker line met while a paragraph is open is absorbed into that
/// paragraph - the under-indented sub-list mis-parse the list-indent pass
/// later recovers.
fn parse_list(
    doc: &Document,
    lines: &[LineRef],
    start: usize,
    marker_col0: usize,
    first_marker: MarkerScan,
    nodes: &mut Vec<Node>,
) -> usize {
    let ordered = first_marker.ordered;
    let start_number = lines[start].number;
    let mut children: Vec<Node> = Vec::new();
    let mut para: Vec<(usize, usize)> = Vec::new();
    let mut blanks: Vec<usize> = Vec::new();

    let mut content_col =
        push_item_marker(doc, lines[start], marker_col0, first_marker, &mut children, &mut para);

    let mut i = start + 1;
    let mut consumed = i;
    while i < lines.len() {
        let lr = lines[i];
        let rest = tail(doc, lr);
        if rest.trim().is_empty() {
            flush_para(doc, &mut para, &mut children);
            blanks.push(lr.number);
            i += 1;
            continue;
        }
        let ws = leading_spaces(rest);
        let w0 = lr.offset + ws;
        let content = &rest[ws..];

        if let Some(marker) = scan_marker(content) {
            if w0 >= content_col {
                flush_para(doc, &mut para, &mut children);
                flush_blanks(doc, &mut blanks, &mut children);
                i = parse_list(doc, lines, i, w0, marker, &mut children);
                consumed = i;
                continue;
            }
            if marker.ordered == ordered && (marker_col0..=marker_col0 + 3).contains(&w0) {
                flush_para(doc, &mut para, &mut children);
                flush_blanks(doc, &mut blanks, &mut children);
                content_col = push_item_marker(doc, lr, w0, marker, &mut children, &mut para);
                i += 1;
                consumed = i;
                continue;
            }
            if w0 > marker_col0 && !para.is_empty() {
                para.push((lr.number, w0));
                i += 1;
                consumed = i;
                continue;
            }
            break;
        }

        if content.starts_with('>') {
            if w0 >= content_col {
                flush_para(doc, &mut para, &mut children);
                flush_blanks(doc, &mut blanks, &mut children);
                i = parse_quote(doc, lines, i, w0, &mut children);
                consumed = i;
                continue;
            }
            break;
        }

        if let Some((fence, len)) = scan_fence(content) {
            if w0 >= content_col {
                flush_para(doc, &mut para, &mut children);
                flush_blanks(doc, &mut blanks, &mut children);
                i = parse_fenced(doc, lines, i, w0, fence, len, &mut children);
                consumed = i;
                continue;
            }
            break;
        }

        if is_atx_heading(content) {
            if w0 >= content_col {
                flush_para(doc, &mut para, &mut children);
                flush_blanks(doc, &mut blanks, &mut children);
                children.push(Node::leaf(
                    NodeKind::Heading,
                    lr.number,
                    w0 + 1,
                    lr.number,
                    doc.line(lr.number).len() + 1,
                ));
                children.push(line_ending(doc, lr.number));
                i += 1;
                consumed = i;
                continue;
            }
            break;
        }

        if !para.is_empty() {
            // Lazy continuation: any plain line extends the open paragraph.
            para.push((lr.number, w0));
            i += 1;
            consumed = i;
            continue;
        }

        if w0 >= content_col + 4 {
            flush_blanks(doc, &mut blanks, &mut children);
            i = parse_indented_code(doc, lines, i, w0, content_col + 4, &mut children);
            consumed = i;
            continue;
        }

        if w0 >= content_col {
            flush_blanks(doc, &mut blanks, &mut children);
            para.push((lr.number, w0));
            i += 1;
            consumed = i;
            continue;
        }

        break;
    }

    flush_para(doc, &mut para, &mut children);
    let end_number = children
        .iter()
        .map(|n| n.end_line)
        .max()
        .unwrap_or(start_number);
    nodes.push(Node {
        kind: if ordered {
            NodeKind::ListOrdered
        } else {
            NodeKind::ListUnordered
        },
        start_line: start_number,
        start_column: marker_col0 + 1,
        end_line: end_number,
        end_column: doc.line(end_number).len() + 1,
        children,
    });
    nodes.push(line_ending(doc, end_number));
    consumed
}
