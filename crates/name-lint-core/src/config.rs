//! Configuration types for name-lint.

use crate::checks::Check;
use crate::types::Severity;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

/// Top-level configuration for name-lint.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Analyzer configuration.
    #[serde(default)]
    pub analyzer: AnalyzerConfig,

    /// Per-check configurations, keyed by check name or code.
    #[serde(default)]
    pub checks: HashMap<String, CheckConfig>,
}

impl Config {
    /// Creates a new default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed or validated.
    pub fn from_file(path: &std::path::Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::parse(&content)
    }

    /// Parses configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid or names an unknown check.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content).map_err(|e| ConfigError::Parse {
            message: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Rejects check keys that match no known check.
    ///
    /// # Errors
    ///
    /// Returns the first unknown key found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut keys: Vec<&String> = self.checks.keys().collect();
        keys.sort();
        for key in keys {
            if Check::from_name_or_code(key).is_none() {
                return Err(ConfigError::Validation(format!("checks.{key}: unknown check")));
            }
        }
        Ok(())
    }

    fn check_config(&self, check: Check) -> Option<&CheckConfig> {
        self.checks
            .get(check.name())
            .or_else(|| self.checks.get(check.code()))
    }

    /// Checks if a check is enabled.
    #[must_use]
    pub fn is_check_enabled(&self, check: Check) -> bool {
        self.check_config(check)
            .map_or(true, |c| c.enabled.unwrap_or(true))
    }

    /// Gets the severity override for a check.
    #[must_use]
    pub fn check_severity(&self, check: Check) -> Option<Severity> {
        self.check_config(check).and_then(|c| c.severity)
    }
}

/// Analyzer-level configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzerConfig {
    /// Root directory to analyze (default: current directory).
    #[serde(default = "default_root")]
    pub root: PathBuf,

    /// Glob patterns to exclude from analysis.
    #[serde(default = "default_exclude")]
    pub exclude: Vec<String>,

    /// Whether to respect .gitignore files.
    #[serde(default = "default_true")]
    pub respect_gitignore: bool,

    /// Abort the run when a file fails to parse, instead of skipping it.
    #[serde(default)]
    pub fail_on_parse_error: bool,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            root: default_root(),
            exclude: default_exclude(),
            respect_gitignore: true,
            fail_on_parse_error: false,
        }
    }
}

fn default_root() -> PathBuf {
    PathBuf::from(".")
}

fn default_exclude() -> Vec<String> {
    vec!["**/build/**".to_string(), "**/target/**".to_string()]
}

fn default_true() -> bool {
    true
}

/// Per-check configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CheckConfig {
    /// Whether this check is enabled.
    #[serde(default)]
    pub enabled: Option<bool>,

    /// Severity override for this check (`info` or `warning`).
    #[serde(default)]
    pub severity: Option<Severity>,
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// IO error reading config file.
    #[error("Failed to read config file {path}: {source}")]
    Io {
        /// Path that failed to read.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// Parse error in config file.
    #[error("Failed to parse config: {message}")]
    Parse {
        /// Parse error message.
        message: String,
    },

    /// Config is structurally invalid.
    #[error("Invalid config: {0}")]
    Validation(String),
}
