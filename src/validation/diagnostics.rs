//! Diagnostics
//!
//! The record the validation passes emit and the mismatch-gated push helper
//! they share. Rendering is left to the caller; fixes are plain text edits a
//! `Document` can apply.

use serde::Serialize;

/// A deterministic text replacement resolving one diagnostic.
///
/// `column` is the 1-based column where the edit starts; `delete_count` bytes
/// are removed there and `insert_text` takes their place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FixEdit {
    pub column: usize,
    pub delete_count: usize,
    pub insert_text: String,
}

/// One indentation finding. Emitted only when `expected_indent` and
/// `actual_indent` differ.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    /// Name of the rule that produced this finding.
    pub rule: &'static str,
    /// 1-based line the finding is on.
    pub line: usize,
    /// Indent the rule wanted, in columns.
    pub expected_indent: usize,
    /// Indent actually present, in columns.
    pub actual_indent: usize,
    pub message: String,
    /// 1-based column and length of the flagged span.
    pub fix_range: (usize, usize),
    pub fix: FixEdit,
}

/// Push a diagnostic when the expected and actual indents differ.
///
/// The fix replaces `delete_count` bytes at `fix_column` with
/// `expected_indent - pad_base` spaces, where `pad_base` is the column the
/// edit starts at relative to the indent being rebuilt (zero for edits at the
/// line start, the prefix width for edits inside a blockquote).
#[allow(clippy::too_many_arguments)]
pub(crate) fn push_if_mismatch(
    diagnostics: &mut Vec<Diagnostic>,
    rule: &'static str,
    line: usize,
    expected_indent: usize,
    actual_indent: usize,
    message: String,
    fix_column: usize,
    delete_count: usize,
    pad_base: usize,
    range_length: usize,
) {
    if expected_indent == actual_indent {
        return;
    }
    let insert_text = " ".repeat(expected_indent.saturating_sub(pad_base));
    diagnostics.push(Diagnostic {
        rule,
        line,
        expected_indent,
        actual_indent,
        message,
        fix_range: (fix_column, range_length.max(1)),
        fix: FixEdit {
            column: fix_column,
            delete_count,
            insert_text,
        },
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_diagnostic_when_aligned() {
        let mut out = Vec::new();
        push_if_mismatch(&mut out, "r", 1, 2, 2, "m".into(), 1, 2, 0, 2);
        assert!(out.is_empty());
    }

    #[test]
    fn test_mismatch_builds_fix() {
        let mut out = Vec::new();
        push_if_mismatch(&mut out, "r", 3, 2, 4, "m".into(), 1, 4, 0, 4);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].line, 3);
        assert_eq!(out[0].fix.delete_count, 4);
        assert_eq!(out[0].fix.insert_text, "  ");
        assert_eq!(out[0].fix_range, (1, 4));
    }

    #[test]
    fn test_pad_base_offsets_insert_width() {
        // edit starting after a two-column quote prefix, target column 4
        let mut out = Vec::new();
        push_if_mismatch(&mut out, "r", 1, 4, 3, "m".into(), 3, 1, 2, 1);
        assert_eq!(out[0].fix.insert_text, "  ");
    }
}
