//! `autojoin run`: drive every enabled extension through its lifecycle.

use anyhow::{Context, Result};
use tracing::info;

use autojoin_config::{ExtensionConfigStore, ResolvedConfig};
use autojoin_extensions::{ExtensionHost, HostObjects, LifecycleReport};

use crate::builtin::builtin_catalog;
use crate::formatter::{OutputFormat, render_lifecycle, to_json};
use crate::headless::headless_objects;

/// Run the lifecycle against headless host resources and print the report.
///
/// Extension failures do not fail the command; they are reported and
/// logged.
pub(crate) async fn run_extensions(resolved: ResolvedConfig, format: OutputFormat) -> Result<()> {
    let report = start_host(&resolved, &headless_objects()).await?;
    match format {
        OutputFormat::Pretty => print!("{}", render_lifecycle(&report)),
        OutputFormat::Json => println!("{}", to_json(&report)?),
    }
    Ok(())
}

pub(crate) async fn start_host(resolved: &ResolvedConfig, objects: &HostObjects) -> Result<LifecycleReport> {
    for file in &resolved.loaded_files {
        info!(path = %file.display(), "Loaded config file");
    }

    let store = ExtensionConfigStore::from_section(&resolved.config.extensions)
        .context("failed to load the extension profile")?;
    let catalog = builtin_catalog()?;

    let mut host = ExtensionHost::new(store, catalog);
    Ok(host.start(objects).await?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use autojoin_config::Config;
    use autojoin_test::{MockHost, TestExtensionDir, ext_id};

    fn resolved(dir: &TestExtensionDir) -> ResolvedConfig {
        ResolvedConfig {
            config: Config {
                extensions: dir.section("default"),
                ..Config::default()
            },
            loaded_files: Vec::new(),
            base_dir: dir.path().to_path_buf(),
        }
    }

    #[tokio::test]
    async fn runs_builtins_from_profile() {
        let dir = TestExtensionDir::new();
        dir.write_profile(
            "default",
            r#"
[enabled]
extensions = ["extension-father", "not-installed"]

[extension-father]
menu_bar = true
"#,
        );

        let mock = MockHost::new();
        let report = start_host(&resolved(&dir), &mock.objects()).await.unwrap();

        assert!(report.unit_summary(&ext_id("extension-father")).succeeded(autojoin_extensions::Phase::Run));
        assert!(!report.unit_summary(&ext_id("not-installed")).loaded());
        assert_eq!(mock.menu_bar.labels(), ["Extensions"]);
    }

    #[tokio::test]
    async fn missing_profile_is_an_error() {
        let dir = TestExtensionDir::new();
        let err = start_host(&resolved(&dir), &MockHost::new().objects())
            .await
            .unwrap_err();
        assert!(err.to_string().contains("extension profile"));
    }
}
