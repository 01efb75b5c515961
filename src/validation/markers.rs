//! Marker And Indent Math
//!
//! Pure helpers over raw line text: marker widths, indentation measurement
//! with blockquote-prefix stripping, and the marker-line patterns used to
//! recover mis-parsed sub-list lines. Kept free of tree types so each can be
//! unit-tested against literal line fixtures.

use regex::Regex;
use std::sync::LazyLock;

static QUOTE_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[\s>]*(> |>)").expect("valid regex"));

static ORDERED_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[\s>]*(\d{1,9})([.)])( *)").expect("valid regex"));

static UNORDERED_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[\s>]*([*+-])( *)").expect("valid regex"));

static ORDERED_ITEM_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[\s>]*0*\d{1,9}[.)]( |$)").expect("valid regex"));

static UNORDERED_ITEM_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[\s>]*[*+-]( |$)").expect("valid regex"));

/// Width of the blockquote prefix on `raw_line` (`"> "`, `">"`, nested
/// combinations, and any indentation before them), or 0 without one.
pub fn quote_prefix_len(raw_line: &str) -> usize {
    QUOTE_PREFIX.find(raw_line).map_or(0, |m| m.end())
}

/// Leading space count of `raw_line`, measured after stripping a blockquote
/// prefix so quoted lists are measured relative to the quote's content.
pub fn indent_for(raw_line: &str) -> usize {
    raw_line[quote_prefix_len(raw_line)..]
        .bytes()
        .take_while(|&b| b == b' ')
        .count()
}

/// Columns consumed by the list item marker on `raw_line`, trailing spaces
/// included as literally written: `"1. li"` is 3, `"10. li"` is 4,
/// `"10.  li"` is 5, `"* li"` is 2. Returns 0 when the line carries no
/// marker of the requested kind.
///
/// Ordered widths must be recomputed per item: numbering width varies within
/// one list (`9.` is 3 wide, `10.` is 4), so no constant can stand in.
pub fn marker_width(raw_line: &str, ordered: bool) -> usize {
    if ordered {
        ORDERED_MARKER
            .captures(raw_line)
            .map_or(0, |c| c[1].len() + 1 + c[3].len())
    } else {
        UNORDERED_MARKER.captures(raw_line).map_or(0, |c| 1 + c[2].len())
    }
}

/// Does this raw line look like an ordered list item?
pub fn is_ordered_item_line(raw_line: &str) -> bool {
    ORDERED_ITEM_LINE.is_match(raw_line)
}

/// Does this raw line look like an unordered list item?
pub fn is_unordered_item_line(raw_line: &str) -> bool {
    UNORDERED_ITEM_LINE.is_match(raw_line)
}

/// Start index of the contiguous space run ending at byte column `col0`.
///
/// Fix edits anchor here so rewriting indentation inside a blockquote never
/// touches the `>` prefix itself.
pub fn space_run_start(raw_line: &str, col0: usize) -> usize {
    let bytes = raw_line.as_bytes();
    let mut start = col0.min(bytes.len());
    while start > 0 && bytes[start - 1] == b' ' {
        start -= 1;
    }
    start
}
