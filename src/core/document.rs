//! Document Management
//!
//! Owns the source text of one markdown document and provides the verbatim
//! raw-line access the validation passes need for marker-width extraction.

use crate::validation::Diagnostic;

/// A markdown document split into raw lines.
///
/// Lines are addressed 1-based to match node positions. Line terminators are
/// not part of the stored lines; whether the source ended with a final
/// newline is remembered so fixed output round-trips byte-for-byte on
/// untouched lines.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    lines: Vec<String>,
    trailing_newline: bool,
}

impl Document {
    pub fn new(source: &str) -> Self {
        Self {
            lines: source.lines().map(str::to_string).collect(),
            trailing_newline: source.ends_with('\n'),
        }
    }

    /// Raw text of the 1-based line `number`, or `""` when out of range.
    pub fn line(&self, number: usize) -> &str {
        number
            .checked_sub(1)
            .and_then(|idx| self.lines.get(idx))
            .map_or("", String::as_str)
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Apply fix edits and return the corrected source text.
    ///
    /// At most one fix is applied per physical line: later diagnostics on the
    /// same line were computed against the unfixed text and would double-edit
    /// it. Callers wanting a fixed point re-lint and apply again until no
    /// diagnostics remain.
    pub fn apply_fixes(&self, diagnostics: &[Diagnostic]) -> String {
        let mut fixed = self.lines.clone();
        let mut touched = vec![false; self.lines.len()];

        for diagnostic in diagnostics {
            let Some(idx) = diagnostic.line.checked_sub(1) else {
                continue;
            };
            if idx >= fixed.len() || touched[idx] {
                continue;
            }
            touched[idx] = true;

            let line = &fixed[idx];
            let start = (diagnostic.fix.column - 1).min(line.len());
            let end = (start + diagnostic.fix.delete_count).min(line.len());
            let mut replacement = String::with_capacity(line.len());
            replacement.push_str(&line[..start]);
            replacement.push_str(&diagnostic.fix.insert_text);
            replacement.push_str(&line[end..]);
            fixed[idx] = replacement;
        }

        let mut out = fixed.join("\n");
        if self.trailing_newline {
            out.push('\n');
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::{Diagnostic, FixEdit};

    fn fix_diag(line: usize, column: usize, delete: usize, insert: &str) -> Diagnostic {
        Diagnostic {
            rule: "test",
            line,
            expected_indent: 0,
            actual_indent: 0,
            message: String::new(),
            fix_range: (column, delete.max(1)),
            fix: FixEdit {
                column,
                delete_count: delete,
                insert_text: insert.to_string(),
            },
        }
    }

    #[test]
    fn test_line_access_is_one_based() {
        let doc = Document::new("first\nsecond\n");
        assert_eq!(doc.line(1), "first");
        assert_eq!(doc.line(2), "second");
        assert_eq!(doc.line(3), "");
        assert_eq!(doc.line_count(), 2);
    }

    #[test]
    fn test_apply_fix_replaces_leading_whitespace() {
        let doc = Document::new("   indented\n");
        let fixed = doc.apply_fixes(&[fix_diag(1, 1, 3, "")]);
        assert_eq!(fixed, "indented\n");
    }

    #[test]
    fn test_apply_fix_inside_quote_prefix() {
        let doc = Document::new(">   wrapped\n");
        let fixed = doc.apply_fixes(&[fix_diag(1, 3, 2, " ")]);
        assert_eq!(fixed, ">  wrapped\n");
    }

    #[test]
    fn test_only_first_fix_per_line_applies() {
        let doc = Document::new("    text");
        let fixed = doc.apply_fixes(&[fix_diag(1, 1, 4, ""), fix_diag(1, 1, 4, "  ")]);
        assert_eq!(fixed, "text");
    }

    #[test]
    fn test_missing_trailing_newline_preserved() {
        let doc = Document::new("a\nb");
        assert_eq!(doc.apply_fixes(&[]), "a\nb");
    }
}
