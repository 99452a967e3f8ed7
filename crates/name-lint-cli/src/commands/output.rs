//! Shared output formatting for lint results.

use anyhow::Result;
use miette::GraphicalReportHandler;
use name_lint_core::{LintResult, Violation, ViolationDiagnostic};
use std::path::Path;

use crate::OutputFormat;

/// Prints lint results in the specified format.
///
/// `root` is the analyzed directory or file; violation paths are relative
/// to it, or to its parent when it is a file.
pub fn print(result: &LintResult, format: OutputFormat, root: &Path) -> Result<()> {
    match format {
        OutputFormat::Text => print_text(result),
        OutputFormat::Json => return print_json(result),
        OutputFormat::Compact => print_compact(result),
        OutputFormat::Pretty => print_pretty(result, root),
    }
    Ok(())
}

fn summary_line(result: &LintResult) -> String {
    let color = if result.has_warnings() {
        "\x1b[33m"
    } else {
        "\x1b[32m"
    };
    format!("{color}{}\x1b[0m", result.summary())
}

fn print_text(result: &LintResult) {
    for violation in &result.violations {
        println!("{}", violation.format());
    }

    println!("{}", summary_line(result));
}

fn print_json(result: &LintResult) -> Result<()> {
    let json = serde_json::to_string_pretty(result)?;
    println!("{json}");
    Ok(())
}

fn print_compact(result: &LintResult) {
    for violation in &result.violations {
        println!("{violation}");
    }
}

fn print_pretty(result: &LintResult, root: &Path) {
    let handler = GraphicalReportHandler::new();
    for violation in &result.violations {
        match render(&handler, violation, root) {
            Some(report) => println!("{report}"),
            None => println!("{violation}\n"),
        }
    }
    println!("{}", summary_line(result));
}

/// Renders one violation with its source snippet, or `None` if the file
/// can no longer be read.
fn render(handler: &GraphicalReportHandler, violation: &Violation, root: &Path) -> Option<String> {
    let base = if root.is_file() {
        root.parent().unwrap_or(root)
    } else {
        root
    };
    let source = match std::fs::read_to_string(base.join(&violation.location.file)) {
        Ok(source) => source,
        Err(e) => {
            tracing::debug!(
                "Cannot read {} for rendering: {}",
                violation.location.file.display(),
                e
            );
            return None;
        }
    };

    let diagnostic = ViolationDiagnostic::new(violation, source);
    let mut out = String::new();
    handler.render_report(&mut out, &diagnostic).ok()?;
    Some(out)
}
