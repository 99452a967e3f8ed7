//! Init command implementation.

use anyhow::{bail, Result};
use std::path::Path;

const CONFIG_FILE: &str = "name-lint.toml";

const DEFAULT_CONFIG: &str = r#"# name-lint configuration

[analyzer]
# Root directory to analyze (default: current directory)
# root = "./src"

# Glob patterns to exclude from analysis
exclude = [
    "**/build/**",
    "**/target/**",
    "**/generated/**",
]

# Respect .gitignore files
respect_gitignore = true

# Abort instead of skipping files that fail to parse
fail_on_parse_error = false

# Per-check settings, keyed by name or code (see `name-lint list-checks`).
# Severity is "warning" (default) or "info".

[checks.method-shadows-type]
enabled = true
# severity = "info"

# [checks.constant-name]
# enabled = false
"#;

/// Runs the init command in the current directory.
pub fn run(force: bool) -> Result<()> {
    write_config(Path::new(CONFIG_FILE), force)?;

    println!("Created {CONFIG_FILE}");
    println!("\nNext steps:");
    println!("  1. Edit {CONFIG_FILE} to configure checks");
    println!("  2. Run: name-lint check");

    Ok(())
}

fn write_config(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        bail!(
            "Configuration file already exists at {}. Use --force to overwrite.",
            path.display()
        );
    }
    std::fs::write(path, DEFAULT_CONFIG)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use name_lint_core::{Check, Config};
    use tempfile::TempDir;

    #[test]
    fn default_config_parses() {
        let config = Config::parse(DEFAULT_CONFIG).expect("default config");
        assert!(config.analyzer.respect_gitignore);
        assert!(Check::ALL.iter().all(|c| config.is_check_enabled(*c)));
    }

    #[test]
    fn refuses_to_overwrite_without_force() {
        let dir = TempDir::new().expect("tempdir");
        let path = dir.path().join(CONFIG_FILE);
        std::fs::write(&path, "# mine\n").expect("write");

        assert!(write_config(&path, false).is_err());
        assert_eq!(std::fs::read_to_string(&path).expect("read"), "# mine\n");

        write_config(&path, true).expect("forced write");
        assert_eq!(std::fs::read_to_string(&path).expect("read"), DEFAULT_CONFIG);
    }
}
