//! Read-only view of the extension configuration.
//!
//! [`ExtensionConfigStore`] combines the global `[extensions]` switch with
//! the active profile and answers the questions the extension host asks:
//! which units are enabled, in which order, with which permissions and
//! preferences.

use std::path::{Path, PathBuf};
use std::time::Duration;

use tracing::info;

use crate::capability::{Capability, CapabilitySet};
use crate::error::ConfigResult;
use crate::id::ExtensionId;
use crate::profile::{Preferences, ProfileConfig};
use crate::types::ExtensionsSection;

/// Extension configuration for one host session.
#[derive(Debug, Clone)]
pub struct ExtensionConfigStore {
    enabled: bool,
    search_root: PathBuf,
    hook_timeout: Duration,
    profile: ProfileConfig,
}

impl ExtensionConfigStore {
    /// Build the store from the `[extensions]` section, reading the active
    /// profile when extensions are enabled.
    ///
    /// When the switch is off the profile file is not touched and the store
    /// reports no enabled units.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`](crate::ConfigError) if extensions are
    /// enabled and the profile cannot be loaded.
    pub fn from_section(section: &ExtensionsSection) -> ConfigResult<Self> {
        let profile = if section.enabled {
            let path = section.profile_path();
            let profile = ProfileConfig::load(&path)?;
            info!(
                profile = %section.profile,
                path = %path.display(),
                enabled = profile.enabled_units().len(),
                "loaded extension profile"
            );
            profile
        } else {
            info!("extensions are disabled");
            ProfileConfig::default()
        };

        Ok(Self {
            enabled: section.enabled,
            search_root: section.dir.clone(),
            hook_timeout: Duration::from_secs(section.hook_timeout_secs),
            profile,
        })
    }

    /// Build an enabled store from an in-memory profile.
    #[must_use]
    pub fn with_profile(search_root: impl Into<PathBuf>, profile: ProfileConfig) -> Self {
        let defaults = ExtensionsSection::default();
        Self {
            enabled: true,
            search_root: search_root.into(),
            hook_timeout: Duration::from_secs(defaults.hook_timeout_secs),
            profile,
        }
    }

    /// Override the per-hook timeout.
    #[must_use]
    pub fn with_hook_timeout(mut self, timeout: Duration) -> Self {
        self.hook_timeout = timeout;
        self
    }

    /// Whether extensions are enabled at all.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Enabled extensions in declaration order; empty when disabled.
    #[must_use]
    pub fn enabled_units(&self) -> &[ExtensionId] {
        if self.enabled {
            self.profile.enabled_units()
        } else {
            &[]
        }
    }

    /// Why `name` cannot be loaded, when the profile lists it under an
    /// invalid name.
    #[must_use]
    pub fn invalid_name(&self, name: &ExtensionId) -> Option<&str> {
        self.profile.invalid_name(name)
    }

    /// Whether `name` was granted `capability`. False when the profile has
    /// no section for `name` or the section does not mention `capability`.
    #[must_use]
    pub fn permission(&self, name: &ExtensionId, capability: Capability) -> bool {
        self.permissions(name).grants(capability)
    }

    /// Every capability granted to `name`.
    #[must_use]
    pub fn permissions(&self, name: &ExtensionId) -> CapabilitySet {
        self.profile
            .unit(name)
            .map_or_else(CapabilitySet::empty, |u| u.permissions)
    }

    /// The preferences of `name`; empty when the profile has no section.
    #[must_use]
    pub fn preferences(&self, name: &ExtensionId) -> Preferences {
        self.profile
            .unit(name)
            .map(|u| u.preferences.clone())
            .unwrap_or_default()
    }

    /// Root directory for extension data, fixed for the session.
    #[must_use]
    pub fn search_root(&self) -> &Path {
        &self.search_root
    }

    /// Upper bound for a single hook invocation.
    #[must_use]
    pub fn hook_timeout(&self) -> Duration {
        self.hook_timeout
    }

    /// The underlying profile.
    #[must_use]
    pub fn profile(&self) -> &ProfileConfig {
        &self.profile
    }
}
