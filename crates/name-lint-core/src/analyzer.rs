//! Core analyzer for orchestrating naming checks over a project.

use crate::checks::Check;
use crate::config::Config;
use crate::frontend::{Frontend, FrontendBox, FrontendError};
use crate::sink::CollectingSink;
use crate::types::{LintResult, Violation};
use crate::walker::NameChecker;

use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Errors that can occur during analysis.
#[derive(Debug, Error)]
pub enum AnalyzerError {
    /// IO error reading files.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Error walking the directory tree.
    #[error("Walk error: {0}")]
    Walk(#[from] ignore::Error),

    /// Error parsing a source file.
    #[error("Parse error in {path}: {source}")]
    Parse {
        /// Path to the file that failed to parse.
        path: PathBuf,
        /// Front-end error.
        source: FrontendError,
    },

    /// No registered front-end handles the file.
    #[error("No front-end handles {0}")]
    Unsupported(PathBuf),

    /// Glob pattern error.
    #[error("Invalid glob pattern: {0}")]
    Glob(#[from] glob::PatternError),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(#[from] crate::config::ConfigError),
}

/// Builder for configuring an [`Analyzer`].
#[derive(Default)]
pub struct AnalyzerBuilder {
    root: Option<PathBuf>,
    frontends: Vec<FrontendBox>,
    exclude_patterns: Vec<String>,
    config: Option<Config>,
    fail_on_parse_error: Option<bool>,
}

impl AnalyzerBuilder {
    /// Creates a new builder with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the root directory to analyze.
    #[must_use]
    pub fn root(mut self, path: impl Into<PathBuf>) -> Self {
        self.root = Some(path.into());
        self
    }

    /// Registers a front-end.
    #[must_use]
    pub fn frontend<F: Frontend + 'static>(mut self, frontend: F) -> Self {
        self.frontends.push(Box::new(frontend));
        self
    }

    /// Registers a boxed front-end.
    #[must_use]
    pub fn frontend_box(mut self, frontend: FrontendBox) -> Self {
        self.frontends.push(frontend);
        self
    }

    /// Adds an exclude glob pattern.
    #[must_use]
    pub fn exclude(mut self, pattern: impl Into<String>) -> Self {
        self.exclude_patterns.push(pattern.into());
        self
    }

    /// Adds multiple exclude glob patterns.
    #[must_use]
    pub fn excludes<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exclude_patterns
            .extend(patterns.into_iter().map(Into::into));
        self
    }

    /// Sets the configuration.
    #[must_use]
    pub fn config(mut self, config: Config) -> Self {
        self.config = Some(config);
        self
    }

    /// Sets whether to fail on parse errors (default: from config, else false).
    #[must_use]
    pub fn fail_on_parse_error(mut self, fail: bool) -> Self {
        self.fail_on_parse_error = Some(fail);
        self
    }

    /// Builds the analyzer.
    ///
    /// # Errors
    ///
    /// Returns an error if the current directory cannot be resolved or an
    /// exclude pattern is not a valid glob.
    pub fn build(self) -> Result<Analyzer, AnalyzerError> {
        let config = self.config.unwrap_or_default();
        config.validate()?;

        let root = self.root.unwrap_or_else(|| config.analyzer.root.clone());
        let root = if root.is_absolute() {
            root
        } else {
            std::env::current_dir()?.join(&root)
        };

        // Merge exclude patterns from config
        let mut exclude_patterns = self.exclude_patterns;
        exclude_patterns.extend(config.analyzer.exclude.iter().cloned());

        let excludes = exclude_patterns
            .iter()
            .map(String::as_str)
            .map(glob::Pattern::new)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Analyzer {
            root,
            frontends: self.frontends,
            exclude_patterns,
            excludes,
            fail_on_parse_error: self
                .fail_on_parse_error
                .unwrap_or(config.analyzer.fail_on_parse_error),
            config,
        })
    }
}

/// The main analyzer that orchestrates naming checks.
///
/// Use [`Analyzer::builder()`] to construct an instance.
pub struct Analyzer {
    root: PathBuf,
    frontends: Vec<FrontendBox>,
    exclude_patterns: Vec<String>,
    excludes: Vec<glob::Pattern>,
    config: Config,
    fail_on_parse_error: bool,
}

impl Analyzer {
    /// Creates a new builder for configuring an analyzer.
    #[must_use]
    pub fn builder() -> AnalyzerBuilder {
        AnalyzerBuilder::new()
    }

    /// Returns the root directory being analyzed.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Returns the number of enabled checks.
    #[must_use]
    pub fn check_count(&self) -> usize {
        Check::ALL
            .iter()
            .filter(|c| self.config.is_check_enabled(**c))
            .count()
    }

    /// Analyzes all files and returns the results.
    ///
    /// # Errors
    ///
    /// Returns an error if file discovery fails, a file cannot be read, or a
    /// file fails to parse while `fail_on_parse_error` is set.
    pub fn analyze(&self) -> Result<LintResult, AnalyzerError> {
        info!("Starting analysis at {:?}", self.root);

        let mut result = LintResult::new();
        let files = self.discover_files()?;

        info!("Found {} files to analyze", files.len());

        for file_path in &files {
            let source = read_source(file_path)?;
            let relative = self.relative_path(file_path);

            match self.analyze_source(&relative, &source) {
                Ok(violations) => {
                    result.violations.extend(violations);
                    result.files_checked += 1;
                }
                Err(AnalyzerError::Parse { path, source }) => {
                    warn!("Failed to parse {}: {}", path.display(), source);
                    if self.fail_on_parse_error {
                        return Err(AnalyzerError::Parse { path, source });
                    }
                }
                Err(e) => return Err(e),
            }
        }

        result.sort();

        info!(
            "Analysis complete: {} violations in {} files",
            result.violations.len(),
            result.files_checked
        );

        Ok(result)
    }

    /// Checks one compilation unit held in memory.
    ///
    /// `path` selects the front-end by extension and is used as the file of
    /// every reported location.
    ///
    /// # Errors
    ///
    /// Returns an error if no front-end handles `path` or the source fails to parse.
    pub fn analyze_source(&self, path: &Path, source: &str) -> Result<Vec<Violation>, AnalyzerError> {
        debug!("Analyzing: {}", path.display());

        let frontend = self
            .frontend_for(path)
            .ok_or_else(|| AnalyzerError::Unsupported(path.to_path_buf()))?;

        let tree = frontend
            .parse(path, source)
            .map_err(|source| AnalyzerError::Parse {
                path: path.to_path_buf(),
                source,
            })?;

        debug!(
            "{}: {} declarations via {}",
            path.display(),
            tree.len(),
            frontend.language_id()
        );

        let sink = CollectingSink::new();
        NameChecker::new(&sink).check_tree(&tree);
        Ok(self.apply_config(sink.into_violations()))
    }

    /// Drops violations of disabled checks and applies severity overrides.
    fn apply_config(&self, violations: Vec<Violation>) -> Vec<Violation> {
        violations
            .into_iter()
            .filter_map(|mut v| {
                let check = Check::from_name_or_code(&v.check)?;
                if !self.config.is_check_enabled(check) {
                    debug!("Skipping disabled check: {}", check);
                    return None;
                }
                if let Some(severity) = self.config.check_severity(check) {
                    v.severity = severity;
                }
                Some(v)
            })
            .collect()
    }

    fn frontend_for(&self, path: &Path) -> Option<&dyn Frontend> {
        self.frontends
            .iter()
            .find(|f| f.handles(path))
            .map(Box::as_ref)
    }

    /// Discovers all source files some front-end handles.
    fn discover_files(&self) -> Result<Vec<PathBuf>, AnalyzerError> {
        let mut builder = ignore::WalkBuilder::new(&self.root);
        builder
            .hidden(false)
            .git_ignore(self.config.analyzer.respect_gitignore)
            .require_git(false);

        let mut files = Vec::new();
        for entry in builder.build() {
            let entry = entry?;
            let path = entry.path();

            if !path.is_file() || self.frontend_for(path).is_none() {
                continue;
            }

            if self.should_exclude(path) {
                debug!("Excluding: {}", path.display());
                continue;
            }

            files.push(path.to_path_buf());
        }

        files.sort();
        Ok(files)
    }

    /// Path of `file` as reported in violations.
    ///
    /// Relative to the root, or just the file name when the root is the file.
    fn relative_path(&self, file: &Path) -> PathBuf {
        match file.strip_prefix(&self.root) {
            Ok(relative) if !relative.as_os_str().is_empty() => relative.to_path_buf(),
            Ok(_) => file
                .file_name()
                .map_or_else(|| file.to_path_buf(), PathBuf::from),
            Err(_) => file.to_path_buf(),
        }
    }

    /// Checks if a path should be excluded.
    fn should_exclude(&self, path: &Path) -> bool {
        let relative = path.strip_prefix(&self.root).unwrap_or(path);
        let rooted = format!("/{}", relative.to_string_lossy());

        for (pattern, raw) in self.excludes.iter().zip(&self.exclude_patterns) {
            if pattern.matches_path(relative) || pattern.matches_path(path) {
                return true;
            }

            // Also check as substring for patterns like "**/build/**"
            let normalized_pattern = raw.replace("**", "");
            if !normalized_pattern.is_empty()
                && normalized_pattern != "/"
                && rooted.contains(&normalized_pattern)
            {
                return true;
            }
        }

        false
    }
}

/// Reads a source file, replacing invalid UTF-8 sequences.
fn read_source(path: &Path) -> Result<String, AnalyzerError> {
    let bytes = std::fs::read(path)?;
    match String::from_utf8(bytes) {
        Ok(source) => Ok(source),
        Err(e) => {
            warn!(
                "{} is not valid UTF-8, invalid bytes are replaced",
                path.display()
            );
            Ok(String::from_utf8_lossy(e.as_bytes()).into_owned())
        }
    }
}
