//! Core types for naming violations and results.

use miette::{Diagnostic, NamedSource, SourceSpan};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Severity level for naming violations.
///
/// Naming findings are advisory, so there is no build-breaking level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Informational message.
    Info,
    /// Warning that should be addressed.
    Warning,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Info => write!(f, "info"),
            Self::Warning => write!(f, "warning"),
        }
    }
}

/// Source code location.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Location {
    /// File path relative to project root.
    pub file: PathBuf,
    /// Line number (1-indexed).
    pub line: usize,
    /// Column number (1-indexed).
    pub column: usize,
    /// Byte offset in file (for miette integration).
    pub offset: usize,
    /// Length of the span in bytes.
    pub length: usize,
}

impl Location {
    /// Creates a new location with explicit values.
    #[must_use]
    pub fn new(file: PathBuf, line: usize, column: usize) -> Self {
        Self {
            file,
            line,
            column,
            offset: 0,
            length: 0,
        }
    }

    /// Sets the byte offset and length for this location.
    #[must_use]
    pub fn with_span(mut self, offset: usize, length: usize) -> Self {
        self.offset = offset;
        self.length = length;
        self
    }
}

/// A suggested fix for a violation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Suggestion {
    /// Human-readable description of the fix.
    pub message: String,
}

impl Suggestion {
    /// Creates a new suggestion.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// A naming violation found during analysis.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Violation {
    /// Check code (e.g., "NL001").
    pub code: String,
    /// Check name (e.g., "type-name").
    pub check: String,
    /// Severity of this violation.
    pub severity: Severity,
    /// Location of the offending identifier.
    pub location: Location,
    /// Human-readable message.
    pub message: String,
    /// Optional suggestion for fixing.
    pub suggestion: Option<Suggestion>,
}

impl Violation {
    /// Creates a new violation.
    #[must_use]
    pub fn new(
        code: impl Into<String>,
        check: impl Into<String>,
        severity: Severity,
        location: Location,
        message: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            check: check.into(),
            severity,
            location,
            message: message.into(),
            suggestion: None,
        }
    }

    /// Adds a suggestion to this violation.
    #[must_use]
    pub fn with_suggestion(mut self, suggestion: Suggestion) -> Self {
        self.suggestion = Some(suggestion);
        self
    }

    /// Formats the violation for terminal output.
    #[must_use]
    pub fn format(&self) -> String {
        use std::fmt::Write;
        let mut output = format!(
            "{} {} at {}:{}:{}\n",
            self.code,
            self.check,
            self.location.file.display(),
            self.location.line,
            self.location.column,
        );
        let _ = writeln!(output, "  {}: {}", self.severity, self.message);
        if let Some(suggestion) = &self.suggestion {
            let _ = writeln!(output, "  = help: {}", suggestion.message);
        }
        output
    }
}

impl std::fmt::Display for Violation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}:{}:{}: {} [{}] {}",
            self.location.file.display(),
            self.location.line,
            self.location.column,
            self.severity,
            self.code,
            self.message
        )
    }
}

/// A violation paired with its source text, renderable by miette's report handlers.
#[derive(Debug, thiserror::Error, Diagnostic)]
#[error("{message}")]
pub struct ViolationDiagnostic {
    message: String,
    #[source_code]
    src: NamedSource<String>,
    #[help]
    help: Option<String>,
    #[label("{label_message}")]
    span: SourceSpan,
    label_message: String,
}

impl ViolationDiagnostic {
    /// Builds a diagnostic for `violation` over the full text of its file.
    #[must_use]
    pub fn new(violation: &Violation, source: String) -> Self {
        Self {
            message: format!("[{}] {}", violation.code, violation.message),
            src: NamedSource::new(violation.location.file.display().to_string(), source),
            help: violation.suggestion.as_ref().map(|s| s.message.clone()),
            span: SourceSpan::from((violation.location.offset, violation.location.length)),
            label_message: violation.check.clone(),
        }
    }
}

/// Result of running naming analysis.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct LintResult {
    /// All violations found.
    pub violations: Vec<Violation>,
    /// Number of files checked.
    pub files_checked: usize,
}

impl LintResult {
    /// Creates a new empty result.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if there are any warnings.
    #[must_use]
    pub fn has_warnings(&self) -> bool {
        self.violations
            .iter()
            .any(|v| v.severity == Severity::Warning)
    }

    /// Counts violations by severity as `(warnings, infos)`.
    #[must_use]
    pub fn count_by_severity(&self) -> (usize, usize) {
        let warnings = self
            .violations
            .iter()
            .filter(|v| v.severity == Severity::Warning)
            .count();
        (warnings, self.violations.len() - warnings)
    }

    /// Returns the one-line summary printed after a report.
    #[must_use]
    pub fn summary(&self) -> String {
        let (warnings, infos) = self.count_by_severity();
        format!(
            "Found {} warning(s), {} info(s) in {} file(s)",
            warnings, infos, self.files_checked
        )
    }

    /// Sorts violations by file, then line, then column.
    ///
    /// The sort is stable, so two reports on the same identifier keep
    /// the order in which they were emitted.
    pub fn sort(&mut self) {
        self.violations.sort_by(|a, b| {
            a.location
                .file
                .cmp(&b.location.file)
                .then(a.location.line.cmp(&b.location.line))
                .then(a.location.column.cmp(&b.location.column))
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_violation(severity: Severity, line: usize) -> Violation {
        Violation::new(
            "NL001",
            "type-name",
            severity,
            Location::new(PathBuf::from("src/Foo.java"), line, 14),
            "Name `fooBar` should start with an uppercase letter",
        )
    }

    #[test]
    fn violation_display_is_compact_line() {
        let v = make_violation(Severity::Warning, 3);
        insta::assert_snapshot!(
            v.to_string(),
            @"src/Foo.java:3:14: warning [NL001] Name `fooBar` should start with an uppercase letter"
        );
    }

    #[test]
    fn violation_format_includes_suggestion() {
        let v = make_violation(Severity::Warning, 3)
            .with_suggestion(Suggestion::new("Start the name with an uppercase letter"));
        let formatted = v.format();
        assert!(formatted.starts_with("NL001 type-name at src/Foo.java:3:14"));
        assert!(formatted.contains("= help: Start the name with an uppercase letter"));
    }

    #[test]
    fn violation_format_omits_help_without_suggestion() {
        let formatted = make_violation(Severity::Info, 1).format();
        assert!(formatted.contains("info: Name `fooBar`"));
        assert!(!formatted.contains("help:"));
    }

    #[test]
    fn count_by_severity_splits_levels() {
        let mut result = LintResult::new();
        result.violations.push(make_violation(Severity::Warning, 1));
        result.violations.push(make_violation(Severity::Info, 2));
        result.violations.push(make_violation(Severity::Warning, 3));
        assert_eq!(result.count_by_severity(), (2, 1));
        assert!(result.has_warnings());
    }

    #[test]
    fn summary_counts_files() {
        let mut result = LintResult::new();
        result.files_checked = 4;
        result.violations.push(make_violation(Severity::Warning, 1));
        assert_eq!(
            result.summary(),
            "Found 1 warning(s), 0 info(s) in 4 file(s)"
        );
    }

    #[test]
    fn sort_keeps_emission_order_on_same_location() {
        let mut result = LintResult::new();
        result.violations.push(make_violation(Severity::Warning, 9));
        let mut first = make_violation(Severity::Warning, 2);
        first.code = "NL003".into();
        let mut second = make_violation(Severity::Warning, 2);
        second.code = "NL002".into();
        result.violations.push(first);
        result.violations.push(second);

        result.sort();
        let codes: Vec<&str> = result.violations.iter().map(|v| v.code.as_str()).collect();
        assert_eq!(codes, ["NL003", "NL002", "NL001"]);
    }

    #[test]
    fn severity_rejects_error_level() {
        #[derive(Deserialize)]
        struct Wrapper {
            #[allow(dead_code)]
            severity: Severity,
        }
        assert!(toml::from_str::<Wrapper>("severity = \"error\"").is_err());
        assert!(toml::from_str::<Wrapper>("severity = \"info\"").is_ok());
    }
}
