//! `autojoin check`: validate configuration without running anything.

use anyhow::{Result, bail};
use colored::Colorize;
use serde::Serialize;

use autojoin_config::{ConfigResult, ExtensionConfigStore, ResolvedConfig};

use crate::formatter::{OutputFormat, to_json};
use crate::theme::Theme;

#[derive(Debug, Serialize)]
struct CheckReport {
    ok: bool,
    config_files: Vec<String>,
    extensions_enabled: bool,
    enabled_units: Vec<String>,
    invalid_units: Vec<String>,
    error: Option<String>,
}

/// Validate the host config and the active profile.
///
/// # Errors
///
/// Fails (non-zero exit) when either file is invalid.
pub(crate) fn check_config(resolved: ConfigResult<ResolvedConfig>, format: OutputFormat) -> Result<()> {
    let report = build_report(resolved);
    match format {
        OutputFormat::Pretty => print_pretty(&report),
        OutputFormat::Json => println!("{}", to_json(&report)?),
    }

    if let Some(error) = report.error {
        bail!("configuration check failed: {error}");
    }
    Ok(())
}

fn build_report(resolved: ConfigResult<ResolvedConfig>) -> CheckReport {
    let mut report = CheckReport {
        ok: false,
        config_files: Vec::new(),
        extensions_enabled: false,
        enabled_units: Vec::new(),
        invalid_units: Vec::new(),
        error: None,
    };

    let resolved = match resolved {
        Ok(r) => r,
        Err(e) => {
            report.error = Some(e.to_string());
            return report;
        },
    };
    report.config_files = resolved
        .loaded_files
        .iter()
        .map(|p| p.display().to_string())
        .collect();
    report.extensions_enabled = resolved.config.extensions.enabled;

    match ExtensionConfigStore::from_section(&resolved.config.extensions) {
        Ok(store) => {
            report.enabled_units = store.enabled_units().iter().map(ToString::to_string).collect();
            report.invalid_units = store
                .enabled_units()
                .iter()
                .filter_map(|id| store.invalid_name(id).map(|reason| format!("{id}: {reason}")))
                .collect();
            report.ok = true;
        },
        Err(e) => report.error = Some(e.to_string()),
    }
    report
}

fn print_pretty(report: &CheckReport) {
    println!("{}", Theme::header("Configuration check"));
    if report.config_files.is_empty() {
        println!("  {}", Theme::dimmed("no config files, using defaults"));
    }
    for file in &report.config_files {
        println!("  {} {file}", "file".dimmed());
    }

    if let Some(error) = &report.error {
        println!("{}", Theme::error(error));
        return;
    }
    if report.extensions_enabled {
        println!(
            "{}",
            Theme::success(&format!("profile valid, {} extension(s) enabled", report.enabled_units.len()))
        );
        for invalid in &report.invalid_units {
            println!("{}", Theme::warning(&format!("will fail to load, invalid name {invalid}")));
        }
    } else {
        println!("{}", Theme::warning("extensions are disabled"));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use autojoin_config::{Config, ConfigError};
    use autojoin_test::TestExtensionDir;

    fn resolved(dir: &TestExtensionDir) -> ResolvedConfig {
        ResolvedConfig {
            config: Config {
                extensions: dir.section("default"),
                ..Config::default()
            },
            loaded_files: vec![dir.path().join("autojoin.toml")],
            base_dir: dir.path().to_path_buf(),
        }
    }

    #[test]
    fn valid_profile_passes() {
        let dir = TestExtensionDir::new();
        dir.write_profile("default", "[enabled]\nextensions = [\"a\", \"b\"]\n");

        let report = build_report(Ok(resolved(&dir)));
        assert!(report.ok);
        assert_eq!(report.enabled_units, ["a", "b"]);
        assert!(report.error.is_none());
    }

    #[test]
    fn invalid_name_is_a_warning() {
        let dir = TestExtensionDir::new();
        dir.write_profile("default", "[enabled]\nextensions = [\"a\", \"My.Ext\"]\n");

        let report = build_report(Ok(resolved(&dir)));
        assert!(report.ok);
        assert_eq!(report.enabled_units, ["a", "My.Ext"]);
        assert_eq!(report.invalid_units.len(), 1);
        assert!(report.invalid_units[0].starts_with("My.Ext: "));
    }

    #[test]
    fn duplicate_names_fail() {
        let dir = TestExtensionDir::new();
        dir.write_profile("default", "[enabled]\nextensions = [\"a\", \"a\"]\n");

        let report = build_report(Ok(resolved(&dir)));
        assert!(!report.ok);
        assert!(report.error.unwrap().contains("listed more than once"));
    }

    #[test]
    fn config_error_fails_command() {
        let err = check_config(Err(ConfigError::NoHomeDir), OutputFormat::Json).unwrap_err();
        assert!(err.to_string().contains("configuration check failed"));
    }
}
