use std::path::Path;
use std::process::ExitCode;

use anyhow::{Context, Result};

use mdindent::config::{Config, LintOptions};
use mdindent::core::Document;
use mdindent::validation::{Diagnostic, lint_source};

fn main() -> ExitCode {
    let config = match Config::from_args_and_env() {
        Ok(config) => config,
        Err(error) => {
            eprintln!("mdindent: {error:#}");
            return ExitCode::from(2);
        }
    };

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(&config.log_level),
    )
    .init();

    match run(&config) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(error) => {
            eprintln!("mdindent: {error:#}");
            ExitCode::from(2)
        }
    }
}

fn run(config: &Config) -> Result<bool> {
    let mut findings: Vec<(&Path, Vec<Diagnostic>)> = Vec::new();

    for path in &config.paths {
        let source = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;

        let diagnostics = if config.fix {
            let (fixed, remaining) = fix_to_fixed_point(&source, &config.options);
            if fixed != source {
                std::fs::write(path, &fixed)
                    .with_context(|| format!("failed to write {}", path.display()))?;
                log::info!("rewrote {}", path.display());
            }
            remaining
        } else {
            lint_source(&source, &config.options)
        };

        if !diagnostics.is_empty() {
            findings.push((path.as_path(), diagnostics));
        }
    }

    if config.json_output {
        print_json(&findings)?;
    } else {
        print_text(&findings);
    }
    Ok(findings.is_empty())
}

/// Re-lint and re-apply until no diagnostics remain. Each round applies at
/// most one fix per line, so the round count is bounded by the deepest stack
/// of findings on a single line; the cap is a backstop for conflicting
/// configurations.
fn fix_to_fixed_point(source: &str, options: &LintOptions) -> (String, Vec<Diagnostic>) {
    let mut text = source.to_string();
    for _ in 0..8 {
        let diagnostics = lint_source(&text, options);
        if diagnostics.is_empty() {
            return (text, diagnostics);
        }
        let next = Document::new(&text).apply_fixes(&diagnostics);
        if next == text {
            return (text, diagnostics);
        }
        text = next;
    }
    let remaining = lint_source(&text, options);
    (text, remaining)
}

fn print_text(findings: &[(&Path, Vec<Diagnostic>)]) {
    for (path, diagnostics) in findings {
        for d in diagnostics {
            println!(
                "{}:{}: {} [expected {}, actual {}] ({})",
                path.display(),
                d.line,
                d.message,
                d.expected_indent,
                d.actual_indent,
                d.rule
            );
        }
    }
}

fn print_json(findings: &[(&Path, Vec<Diagnostic>)]) -> Result<()> {
    let records: Vec<serde_json::Value> = findings
        .iter()
        .flat_map(|(path, diagnostics)| {
            diagnostics.iter().map(|d| {
                serde_json::json!({
                    "path": path.display().to_string(),
                    "rule": d.rule,
                    "line": d.line,
                    "expected_indent": d.expected_indent,
                    "actual_indent": d.actual_indent,
                    "message": d.message,
                    "fix_range": d.fix_range,
                    "fix": d.fix,
                })
            })
        })
        .collect();
    println!("{}", serde_json::to_string_pretty(&records)?);
    Ok(())
}
