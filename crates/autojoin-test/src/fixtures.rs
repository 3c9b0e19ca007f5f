//! Test fixtures for profiles, stores and meetings.

use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono::{DateTime, Utc};
use tempfile::TempDir;

use autojoin_config::{ExtensionConfigStore, ExtensionId, ExtensionsSection, ProfileConfig, UnitConfig};
use autojoin_extensions::MeetingEntry;

/// Hook timeout used by [`test_store`].
pub const TEST_HOOK_TIMEOUT: Duration = Duration::from_millis(500);

/// A validated extension id.
///
/// # Panics
///
/// Panics if `name` is not a valid id.
#[must_use]
pub fn ext_id(name: &str) -> ExtensionId {
    match ExtensionId::new(name) {
        Ok(id) => id,
        Err(e) => panic!("invalid test extension id {name:?}: {e}"),
    }
}

/// A profile enabling `enabled` in order, with the given unit sections.
///
/// # Panics
///
/// Panics on invalid or duplicate names.
#[must_use]
pub fn test_profile(enabled: &[&str], units: impl IntoIterator<Item = UnitConfig>) -> ProfileConfig {
    let enabled = enabled.iter().map(|n| ext_id(n)).collect();
    match ProfileConfig::new(enabled, units) {
        Ok(profile) => profile,
        Err(e) => panic!("invalid test profile: {e}"),
    }
}

/// An enabled store over [`test_profile`] with [`TEST_HOOK_TIMEOUT`].
#[must_use]
pub fn test_store(enabled: &[&str], units: impl IntoIterator<Item = UnitConfig>) -> ExtensionConfigStore {
    ExtensionConfigStore::with_profile("/tmp/autojoin-extensions", test_profile(enabled, units))
        .with_hook_timeout(TEST_HOOK_TIMEOUT)
}

/// A meeting row scheduled at the Unix epoch plus `id` hours.
#[must_use]
pub fn test_meeting(id: u64, provider: &str) -> MeetingEntry {
    let offset = i64::try_from(id).unwrap_or(0).saturating_mul(3600);
    MeetingEntry {
        id,
        provider: provider.to_owned(),
        meeting_id: format!("{provider}-{id}"),
        scheduled_at: DateTime::<Utc>::from_timestamp(offset, 0).unwrap_or_default(),
    }
}

/// A temporary extension directory with a `config/` folder for profiles.
#[derive(Debug)]
pub struct TestExtensionDir {
    dir: TempDir,
}

impl TestExtensionDir {
    /// Create an empty extension directory.
    ///
    /// # Panics
    ///
    /// Panics if the temporary directory cannot be created.
    #[must_use]
    pub fn new() -> Self {
        match tempfile::tempdir() {
            Ok(dir) => Self { dir },
            Err(e) => panic!("failed to create temp dir: {e}"),
        }
    }

    /// The directory path.
    #[must_use]
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Write `config/<profile>.toml` and return its path.
    ///
    /// # Panics
    ///
    /// Panics if the file cannot be written.
    pub fn write_profile(&self, profile: &str, content: &str) -> PathBuf {
        let config_dir = self.dir.path().join("config");
        let path = config_dir.join(format!("{profile}.toml"));
        if let Err(e) = std::fs::create_dir_all(&config_dir).and_then(|()| std::fs::write(&path, content)) {
            panic!("failed to write profile {}: {e}", path.display());
        }
        path
    }

    /// An enabled `[extensions]` section pointing at this directory.
    #[must_use]
    pub fn section(&self, profile: &str) -> ExtensionsSection {
        ExtensionsSection {
            enabled: true,
            dir: self.dir.path().to_path_buf(),
            profile: profile.to_owned(),
            ..ExtensionsSection::default()
        }
    }
}

impl Default for TestExtensionDir {
    fn default() -> Self {
        Self::new()
    }
}

/// Install a test subscriber honoring `RUST_LOG`. Safe to call repeatedly.
pub fn init_test_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
