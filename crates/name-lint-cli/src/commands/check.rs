//! Check command implementation.

use anyhow::{Context, Result};
use name_lint_core::{Analyzer, Check, CheckConfig, Config};
use name_lint_java::JavaFrontend;
use std::path::Path;

use crate::config_resolver::ConfigSource;
use crate::OutputFormat;

/// Runs the check command.
///
/// Violations are advisory: the command succeeds whenever analysis
/// completes, however many it finds.
pub fn run(
    path: &Path,
    format: OutputFormat,
    checks_filter: Option<&str>,
    exclude: Vec<String>,
    source: &ConfigSource,
) -> Result<()> {
    let mut config = source.load().with_context(|| match source.path() {
        Some(p) => format!("Failed to load config: {}", p.display()),
        None => "Failed to load default config".to_string(),
    })?;

    if let Some(filter) = checks_filter {
        let names: Vec<&str> = filter.split(',').map(str::trim).collect();
        only_checks(&mut config, &names);
    }

    let analyzer = Analyzer::builder()
        .root(path)
        .config(config)
        .frontend(JavaFrontend::new())
        .excludes(exclude)
        .build()
        .context("Failed to build analyzer")?;

    tracing::info!(
        "Checking {:?} with {} checks",
        path,
        analyzer.check_count()
    );

    let result = analyzer.analyze().context("Analysis failed")?;

    super::output::print(&result, format, analyzer.root())
}

/// Disables every check not named in `names`.
fn only_checks(config: &mut Config, names: &[&str]) {
    let selected: Vec<Check> = names
        .iter()
        .filter_map(|name| {
            let check = Check::from_name_or_code(name);
            if check.is_none() {
                tracing::warn!("Unknown check: {}", name);
            }
            check
        })
        .collect();

    for check in Check::ALL {
        if !selected.contains(&check) {
            config
                .checks
                .entry(check.name().to_string())
                .or_insert_with(CheckConfig::default)
                .enabled = Some(false);
        }
    }
}
