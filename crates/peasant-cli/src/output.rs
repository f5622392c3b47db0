//! Terminal output

use crate::tools::{CoverageMetric, CoverageReport, LintReport};
use colored::*;
use std::fmt::Write as _;
use std::path::Path;

/// Print a status line
pub fn status(message: &str) {
    println!("{}", format!("🔎  {message}").as_str().magenta());
}

/// `path` relative to `root` when it lies below it
pub fn relative(root: &Path, path: &Path) -> String {
    path.strip_prefix(root)
        .unwrap_or(path)
        .display()
        .to_string()
}

/// Print the chain of an error to stderr
pub fn error(err: &anyhow::Error) {
    eprintln!("{} {}", "error:".red().bold(), err);
    for cause in err.chain().skip(1) {
        eprintln!("  {} {}", "caused by:".red(), cause);
    }
}

/// Render lint results the way ESLint's stylish formatter does.
///
/// Returns an empty string when there is nothing to report.
pub fn render_lint(report: &LintReport, root: &Path) -> String {
    let mut out = String::new();

    for file in report.files.iter().filter(|f| !f.messages.is_empty()) {
        let _ = writeln!(out, "{}", relative(root, &file.file_path).as_str().underline());
        for message in &file.messages {
            let severity = if message.is_error() {
                "error".red()
            } else {
                "warning".yellow()
            };
            let _ = writeln!(
                out,
                "  {}  {}  {}  {}",
                format!("{}:{}", message.line, message.column).as_str().dimmed(),
                severity,
                message.message,
                message.rule_id.as_deref().unwrap_or("").dimmed()
            );
        }
        out.push('\n');
    }

    let errors = report.error_count();
    let warnings = report.warning_count();
    let problems = errors + warnings;
    if problems > 0 {
        let summary = format!(
            "✖ {} {} ({} {}, {} {})",
            problems,
            plural(problems, "problem"),
            errors,
            plural(errors, "error"),
            warnings,
            plural(warnings, "warning")
        );
        let summary = if errors > 0 {
            summary.as_str().red().bold()
        } else {
            summary.as_str().yellow().bold()
        };
        let _ = writeln!(out, "{summary}");
    }

    out
}

/// Render the coverage totals
pub fn render_coverage(report: &CoverageReport) -> String {
    if report.is_empty() {
        return "No coverage information collected.".to_string();
    }

    let rows = [
        ("Statements", &report.statements),
        ("Branches", &report.branches),
        ("Functions", &report.functions),
        ("Lines", &report.lines),
    ];

    let mut out = String::new();
    for (name, metric) in rows {
        let _ = writeln!(
            out,
            "{:<12}: {} ( {}/{} )",
            name,
            colored_pct(metric),
            metric.covered,
            metric.total
        );
    }
    out
}

fn colored_pct(metric: &CoverageMetric) -> ColoredString {
    let text = format!("{:.2}%", metric.pct);
    if metric.pct >= 80.0 {
        text.as_str().green()
    } else if metric.pct >= 50.0 {
        text.as_str().yellow()
    } else {
        text.as_str().red()
    }
}

fn plural(count: usize, word: &str) -> String {
    if count == 1 {
        word.to_string()
    } else {
        format!("{word}s")
    }
}
