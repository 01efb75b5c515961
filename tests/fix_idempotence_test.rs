//! Fix-point property: applying every emitted fix and re-running the engine
//! converges to a document with zero diagnostics.

use mdindent::{Document, LintOptions, lint_source};

/// Apply fixes round by round (one fix per line per round) until clean,
/// returning the fixed text. Panics if the engine does not converge.
fn fix_until_clean(source: &str, options: &LintOptions) -> String {
    let mut text = source.to_string();
    for _ in 0..8 {
        let diagnostics = lint_source(&text, options);
        if diagnostics.is_empty() {
            return text;
        }
        let next = Document::new(&text).apply_fixes(&diagnostics);
        assert_ne!(next, text, "fixes made no progress on:\n{text}");
        text = next;
    }
    panic!("did not reach a fixed point for:\n{source}");
}

fn assert_fixed_point(source: &str, options: &LintOptions) -> String {
    let fixed = fix_until_clean(source, options);
    assert!(
        lint_source(&fixed, options).is_empty(),
        "fixed output still has diagnostics:\n{fixed}"
    );
    fixed
}

#[test]
fn test_wrapped_line_fix() {
    let fixed = assert_fixed_point("* item\n   wrapped\n", &LintOptions::default());
    assert_eq!(fixed, "* item\n  wrapped\n");
}

#[test]
fn test_indented_top_level_paragraph_fix() {
    let fixed = assert_fixed_point(
        "  two space paragraph\n  line two\n",
        &LintOptions::default(),
    );
    assert_eq!(fixed, "two space paragraph\nline two\n");
}

#[test]
fn test_indented_top_level_quote_fix() {
    let fixed = assert_fixed_point(" > indented top-level quote\n", &LintOptions::default());
    assert_eq!(fixed, "> indented top-level quote\n");
}

#[test]
fn test_indented_top_level_ordered_list_fix() {
    let fixed = assert_fixed_point("   1. first\n   1. second\n", &LintOptions::default());
    assert_eq!(fixed, "1. first\n1. second\n");
}

#[test]
fn test_absorbed_sub_list_is_promoted() {
    let fixed = assert_fixed_point("100. item\n    1. sub\n", &LintOptions::default());
    assert_eq!(fixed, "100. item\n     1. sub\n");
}

#[test]
fn test_nested_list_over_indent_fix() {
    let fixed = assert_fixed_point("9. nine\n    1. sub\n", &LintOptions::default());
    assert_eq!(fixed, "9. nine\n   1. sub\n");
}

#[test]
fn test_fence_inside_item_fix() {
    let fixed = assert_fixed_point("* item\n\n   ```\n   code\n   ```\n", &LintOptions::default());
    assert!(fixed.starts_with("* item\n\n  ```\n"));
}

#[test]
fn test_quoted_wrap_fix_preserves_prefix() {
    let fixed = assert_fixed_point("> text\n>  misaligned\n", &LintOptions::default());
    assert_eq!(fixed, "> text\n> misaligned\n");
}

#[test]
fn test_start_indent_fix_with_start_indented() {
    let options = LintOptions {
        start_indent: Some(3),
        start_indented: true,
        ..LintOptions::default()
    };
    let fixed = assert_fixed_point("1. first\n", &options);
    assert_eq!(fixed, "   1. first\n");
}

#[test]
fn test_messy_document_converges() {
    let source = "\
  indented paragraph
  second line

* item
    over-indented wrap

9. nine
    1. deep sub
";
    assert_fixed_point(source, &LintOptions::default());
}
