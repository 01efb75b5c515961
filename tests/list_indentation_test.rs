//! End-to-end list indentation scenarios.

use mdindent::{LintOptions, lint_source};
use mdindent::validation::list_indent;

fn defaults() -> LintOptions {
    LintOptions::default()
}

#[test]
fn test_two_space_ordered_sub_list_under_bullet_is_clean() {
    assert!(lint_source("* first-level list item\n  1. second-level list item\n     second-level wrapped line\n", &defaults()).is_empty());
}

#[test]
fn test_three_space_sub_lists_with_ul_indent() {
    let options = LintOptions {
        ul_indent: Some(3),
        ..defaults()
    };
    let source = "\
* first-level list item
   * second-level list item
     second-level wrapped line
* first-level list item
   1. second-level list item
      second-level wrapped line
";
    assert!(lint_source(source, &options).is_empty());
}

#[test]
fn test_long_ordered_prefix_sub_items() {
    let mut source = String::new();
    for n in 1..=10 {
        source.push_str(&format!("{n}. item {n}\n"));
    }

    let nested_ok = format!("{source}    1. sub-item\n");
    assert!(lint_source(&nested_ok, &defaults()).is_empty());

    let bullet_ok = format!("{source}    * sub-item\n");
    assert!(lint_source(&bullet_ok, &defaults()).is_empty());

    let nested_deep = format!("{source}     1. sub-item\n");
    let diagnostics = lint_source(&nested_deep, &defaults());
    assert!(
        diagnostics
            .iter()
            .any(|d| d.rule == list_indent::RULE_NAME
                && d.expected_indent == 4
                && d.actual_indent == 5)
    );
}

#[test]
fn test_under_indented_sub_item_under_wide_marker_is_recovered() {
    let diagnostics = lint_source("100. item\n    1. sub\n", &defaults());
    assert!(
        diagnostics
            .iter()
            .any(|d| d.rule == list_indent::RULE_NAME
                && d.line == 2
                && d.expected_indent == 5
                && d.actual_indent == 4)
    );
}

#[test]
fn test_quoted_nested_lists_are_clean() {
    let source = "\
> 1. first list item
> 1. second list item
>    1. second-level list item
>    * second-level bullet
";
    assert!(lint_source(source, &defaults()).is_empty());
}

#[test]
fn test_blockquote_under_wide_marker() {
    let mut source = String::new();
    for n in 1..=10 {
        source.push_str(&format!("{n}. item {n}\n"));
    }
    let clean = format!("{source}\n    > blockquote under item ten\n");
    assert!(lint_source(&clean, &defaults()).is_empty());

    let shallow = format!("{source}\n   > blockquote under item ten\n");
    assert!(!lint_source(&shallow, &defaults()).is_empty());
}

#[test]
fn test_start_indented_lists() {
    let options = LintOptions {
        start_indent: Some(3),
        start_indented: true,
        ..defaults()
    };
    let source = "   1. first list item\n   1. second list item\n      1. sub-list item\n";
    assert!(lint_source(source, &options).is_empty());

    let flat = "1. first list item\n";
    let diagnostics = lint_source(flat, &options);
    assert!(diagnostics.iter().any(|d| d.expected_indent == 3));
}

#[test]
fn test_deeply_mixed_nesting_sums_widths() {
    let source = "\
* level one
  1. level two
     1. level three
        * level four
";
    assert!(lint_source(source, &defaults()).is_empty());
}
