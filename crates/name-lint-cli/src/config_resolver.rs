//! Locating and loading the configuration file.
//!
//! Candidates, first match wins:
//!
//! 1. `--config` / `$NAME_LINT_CONFIG`
//! 2. `name-lint.toml` or `.name-lint.toml` in the checked directory
//! 3. `config.toml` in `$NAME_LINT_CONFIG_DIR`, else `~/.name-lint/`
//! 4. built-in defaults

use name_lint_core::{Config, ConfigError};
use std::path::{Path, PathBuf};

/// File names looked up in the checked directory.
const PROJECT_FILES: [&str; 2] = ["name-lint.toml", ".name-lint.toml"];

/// File name looked up in the user-level directory.
const USER_FILE: &str = "config.toml";

/// Environment variable overriding the user-level directory.
const CONFIG_DIR_ENV: &str = "NAME_LINT_CONFIG_DIR";

/// Where the configuration comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// Named on the command line.
    Explicit(PathBuf),
    /// Found next to the sources being checked.
    Project(PathBuf),
    /// Found in the user-level directory.
    Global(PathBuf),
    /// Nothing found.
    Default,
}

impl ConfigSource {
    /// Path of the configuration file, if there is one.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Explicit(p) | Self::Project(p) | Self::Global(p) => Some(p),
            Self::Default => None,
        }
    }

    /// Loads the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not a valid config.
    pub fn load(&self) -> Result<Config, ConfigError> {
        match self {
            Self::Default => Ok(Config::default()),
            Self::Global(path) => {
                tracing::info!("Using global config: {}", path.display());
                Config::from_file(path)
            }
            Self::Explicit(path) | Self::Project(path) => Config::from_file(path),
        }
    }
}

/// Finds the configuration for a run over `project_dir`.
#[must_use]
pub fn resolve(project_dir: &Path, explicit: Option<&Path>) -> ConfigSource {
    resolve_in(project_dir, explicit, user_config_dir().as_deref())
}

fn resolve_in(project_dir: &Path, explicit: Option<&Path>, user_dir: Option<&Path>) -> ConfigSource {
    if let Some(path) = explicit {
        return ConfigSource::Explicit(path.to_path_buf());
    }

    if let Some(found) = PROJECT_FILES
        .iter()
        .map(|name| project_dir.join(name))
        .find(|candidate| candidate.is_file())
    {
        tracing::debug!("Found project config: {}", found.display());
        return ConfigSource::Project(found);
    }

    match user_dir.map(|dir| dir.join(USER_FILE)) {
        Some(candidate) if candidate.is_file() => {
            tracing::debug!("Found global config: {}", candidate.display());
            ConfigSource::Global(candidate)
        }
        _ => ConfigSource::Default,
    }
}

/// User-level configuration directory.
fn user_config_dir() -> Option<PathBuf> {
    std::env::var_os(CONFIG_DIR_ENV)
        .map(PathBuf::from)
        .or_else(|| home::home_dir().map(|home| home.join(".name-lint")))
}
