//! End-to-end alignment scenarios over realistic documents.

use mdindent::{LintOptions, lint_source};

fn assert_clean(source: &str) {
    let diagnostics = lint_source(source, &LintOptions::default());
    assert!(
        diagnostics.is_empty(),
        "expected no diagnostics, got: {diagnostics:#?}"
    );
}

#[test]
fn test_grab_bag_document_is_clean() {
    let source = "\
top-level text
wrapped top-level text

* first-level list item
  first-level wrapped line
  1. second-level list item
     second-level wrapped line

> * first item
>   wrapped line
>   1. second-level item
>      wrapped line

    top-level four-space code block
    wrapped code line

* item
  wrapped

  > blockquote

  another paragraph

  ```
  code block
  ```

  more text

Are not footnotes[^1] cool?

[^1]: first footnote paragraph
      first paragraph wrapped line

      second paragraph line
";
    assert_clean(source);
}

#[test]
fn test_formatted_list_items_are_clean() {
    assert_clean(
        "\
* `code list item`
* list item ending with `code`
* `code` starting list item
* _italic list item_
* **bold** starting list item
* placeholder text
  `code` starting wrapped item
* placeholder text
  **bold wrapped item**
* placeholder text
  wrapped item ending with _italic_
",
    );
}

#[test]
fn test_escaped_marker_starts_are_clean() {
    assert_clean("\\* Lorem ipsum dolor sit amet\nconsectetur adipiscing elit.\n");
    assert_clean("* \\* Lorem ipsum dolor sit amet\n  consectetur adipiscing elit.\n");
}

#[test]
fn test_links_and_autolinks_are_clean() {
    assert_clean("Lorem ipsum dolor sit amet\n[consectetur adipiscing elit](https://example.com).\n");
    assert_clean("Lorem ipsum dolor sit amet\n<https://example.com>.\n");
    assert_clean("* [Lorem ipsum](https://example.com) dolor sit amet\n  consectetur adipiscing elit.\n");
    assert_clean("1. [This is a multiline link\n   to test](#test-link)\n2. [another link](#another-link)\n");
}

#[test]
fn test_wrapped_line_over_indent_detail() {
    let diagnostics = lint_source("* item\n   wrapped\n", &LintOptions::default());
    assert_eq!(diagnostics.len(), 1);
    let d = &diagnostics[0];
    assert_eq!(d.line, 2);
    assert_eq!(d.expected_indent, 2);
    assert_eq!(d.actual_indent, 3);
    assert_eq!(d.fix.column, 1);
    assert_eq!(d.fix.delete_count, 3);
    assert_eq!(d.fix.insert_text, "  ");
}

#[test]
fn test_fixed_sub_list_offset_accepts_three_spaces() {
    let options = LintOptions {
        ul_indent: Some(3),
        ..LintOptions::default()
    };
    assert!(lint_source("* item\n   * sub\n", &options).is_empty());
}

#[test]
fn test_indented_top_level_quote_detail() {
    let diagnostics = lint_source(" > indented top-level quote\n", &LintOptions::default());
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].line, 1);
    assert_eq!(diagnostics[0].expected_indent, 0);
    assert_eq!(diagnostics[0].actual_indent, 1);
}

#[test]
fn test_quoted_item_wrap_is_clean() {
    assert_clean("> * item\n>   wrap\n");
}

#[test]
fn test_sub_content_follows_double_digit_marker_width() {
    let mut source = String::new();
    for n in 1..=10 {
        source.push_str(&format!("{n}. item {n}\n"));
    }
    let clean = format!("{source}    sub\n");
    assert_clean(&clean);

    let short = format!("{source}   sub\n");
    let diagnostics = lint_source(&short, &LintOptions::default());
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].expected_indent, 4);
    assert_eq!(diagnostics[0].actual_indent, 3);
}

#[test]
fn test_misaligned_paragraphs_are_flagged() {
    let diagnostics = lint_source(
        "Lorem ipsum dolor sit amet, consectetur adipiscing elit.\n   Pellentesque vestibulum lectus non tellus congue,\n   eu ultricies metus ultrices.\n",
        &LintOptions::default(),
    );
    // only the first offending token per physical line is reported
    assert_eq!(diagnostics.len(), 2);
    assert!(diagnostics.iter().all(|d| d.expected_indent == 0));
    assert_eq!(diagnostics[0].line, 2);
    assert_eq!(diagnostics[1].line, 3);
}

#[test]
fn test_misaligned_quoted_blocks_are_flagged() {
    let diagnostics = lint_source("> top-level blockquote\n>   indented line\n", &LintOptions::default());
    assert!(!diagnostics.is_empty());
}

#[test]
fn test_inline_html_lines_are_left_alone() {
    assert_clean("<a\nhref=\"\">this text is inside a paragraph.</a>\n");
    assert_clean("<a href=\"\">this text is inside a block of HTML.</a>\n");
}
