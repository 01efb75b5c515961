use criterion::{Criterion, black_box, criterion_group, criterion_main};

use mdindent::{Document, LintOptions, lint, parse};

/// Generate markdown content of different shapes for benchmarking
fn generate_markdown_content(blocks: usize, pattern: &str) -> String {
    let mut content = String::new();

    match pattern {
        "paragraph_heavy" => {
            for i in 0..blocks {
                content.push_str(&format!(
                    "Paragraph {i} line one with some inline `code` and *emphasis*.\nParagraph {i} wrapped line two.\n\n"
                ));
            }
        }
        "list_heavy" => {
            for i in 0..blocks {
                content.push_str(&format!(
                    "{n}. ordered item {n}\n    wrapped line for item {n}\n    * nested bullet\n",
                    n = i + 1
                ));
            }
        }
        "quote_heavy" => {
            for i in 0..blocks {
                content.push_str(&format!(
                    "> * quoted item {i}\n>   quoted wrapped line {i}\n\n"
                ));
            }
        }
        _ => unreachable!("unknown pattern"),
    }

    content
}

fn bench_parse(c: &mut Criterion) {
    let source = generate_markdown_content(200, "list_heavy");
    c.bench_function("parse_list_heavy", |b| {
        b.iter(|| {
            let doc = Document::new(black_box(&source));
            parse(&doc)
        })
    });
}

fn bench_lint(c: &mut Criterion) {
    let options = LintOptions::default();
    for pattern in ["paragraph_heavy", "list_heavy", "quote_heavy"] {
        let source = generate_markdown_content(200, pattern);
        let doc = Document::new(&source);
        let tree = parse(&doc);
        c.bench_function(&format!("lint_{pattern}"), |b| {
            b.iter(|| lint(black_box(&doc), black_box(&tree), &options))
        });
    }
}

criterion_group!(benches, bench_parse, bench_lint);
criterion_main!(benches);
