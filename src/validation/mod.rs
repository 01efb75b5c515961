//! Validation Engine
//!
//! The indentation rules, kept clean of parsing and I/O concerns: the
//! alignment checker and the list indent calculator run independently over
//! the same tree and stream their diagnostics in line order.

pub mod alignment;
pub mod diagnostics;
pub mod list_indent;
pub mod markers;
pub mod traversal;

pub use diagnostics::{Diagnostic, FixEdit};

use crate::config::LintOptions;
use crate::core::Document;
use crate::parser::Node;

/// Run every validation pass over one parsed document.
///
/// Diagnostics are ordered by line within each pass; passes are concatenated
/// in a fixed order so batch fix application stays deterministic.
pub fn lint(doc: &Document, tree: &[Node], options: &LintOptions) -> Vec<Diagnostic> {
    let mut diagnostics = alignment::check(doc, tree, options);
    diagnostics.extend(list_indent::check(doc, tree, options));
    log::debug!("collected {} diagnostics", diagnostics.len());
    diagnostics
}

/// Convenience wrapper: parse and lint source text in one step.
pub fn lint_source(source: &str, options: &LintOptions) -> Vec<Diagnostic> {
    let doc = Document::new(source);
    let tree = crate::parser::parse(&doc);
    lint(&doc, &tree, options)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_passes_are_composed() {
        // the wrap rule and the list rule each flag their own line
        let diagnostics = lint_source("1. item\n    wrapped\n   1. sub\n", &LintOptions::default());
        assert!(diagnostics.iter().any(|d| d.rule == alignment::RULE_NAME));
        assert!(!diagnostics.is_empty());
    }

    #[test]
    fn test_clean_document_has_no_findings() {
        let source = "top-level text\nwrapped top-level text\n\n* item\n  wrapped\n";
        assert!(lint_source(source, &LintOptions::default()).is_empty());
    }
}
