//! Extension profiles.
//!
//! A profile selects which extensions are enabled and carries one optional
//! section per extension with its permissions and preferences:
//!
//! ```toml
//! [enabled]
//! extensions = ["extension-father", "meeting-count"]
//!
//! [extension-father]
//! menu_bar = true
//! greeting = "hello"
//! ```
//!
//! The shape of the enabled list is strict: a missing `[enabled]` table, a
//! non-string entry or a duplicate name is a [`ConfigError`]. An entry that
//! is not a valid [`ExtensionId`] stays in the list and is remembered as
//! invalid, so only that extension fails to load. Unit sections are lenient:
//! anything malformed in them is logged and replaced by defaults.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::path::Path;

use tracing::{debug, warn};

use crate::capability::{Capability, CapabilitySet};
use crate::error::{ConfigError, ConfigResult};
use crate::id::{ExtensionId, RESERVED_SECTION};
use crate::loader::read_config_file;

/// Free-form preference data handed to an extension.
pub type Preferences = BTreeMap<String, String>;

/// Configuration of a single extension.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnitConfig {
    /// The extension this section belongs to.
    pub name: ExtensionId,
    /// Granted capabilities. Anything not listed is denied.
    pub permissions: CapabilitySet,
    /// Every non-capability key of the section, rendered as a string.
    pub preferences: Preferences,
}

impl UnitConfig {
    /// A section with no permissions and no preferences.
    #[must_use]
    pub fn new(name: ExtensionId) -> Self {
        Self {
            name,
            permissions: CapabilitySet::empty(),
            preferences: Preferences::new(),
        }
    }

    /// Grant a capability.
    #[must_use]
    pub fn with_permission(mut self, capability: Capability) -> Self {
        self.permissions |= capability.flag();
        self
    }

    /// Add a preference entry.
    #[must_use]
    pub fn with_preference(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.preferences.insert(key.into(), value.into());
        self
    }

    fn from_section(name: ExtensionId, section: &toml::Value) -> Self {
        let mut unit = Self::new(name);

        let Some(table) = section.as_table() else {
            warn!(
                extension = %unit.name,
                "Extension section is not a table; using default permissions and preferences"
            );
            return unit;
        };

        for (key, value) in table {
            if let Ok(capability) = key.parse::<Capability>() {
                match value.as_bool() {
                    Some(true) => unit.permissions |= capability.flag(),
                    Some(false) => {},
                    None => warn!(
                        extension = %unit.name,
                        capability = %capability,
                        "Permission value is not a boolean; treating as denied"
                    ),
                }
                continue;
            }

            match value {
                toml::Value::String(s) => {
                    unit.preferences.insert(key.clone(), s.clone());
                },
                toml::Value::Integer(_)
                | toml::Value::Float(_)
                | toml::Value::Boolean(_)
                | toml::Value::Datetime(_) => {
                    unit.preferences.insert(key.clone(), value.to_string());
                },
                toml::Value::Array(_) | toml::Value::Table(_) => {
                    warn!(
                        extension = %unit.name,
                        key = %key,
                        "Nested preference values are not supported; skipping"
                    );
                },
            }
        }

        unit
    }
}

/// A parsed extension profile.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileConfig {
    enabled: Vec<ExtensionId>,
    invalid: HashMap<ExtensionId, String>,
    units: HashMap<ExtensionId, UnitConfig>,
}

impl ProfileConfig {
    /// Build a profile from its parts.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::DuplicateExtension`] if a name appears twice in
    /// `enabled`.
    pub fn new(
        enabled: Vec<ExtensionId>,
        units: impl IntoIterator<Item = UnitConfig>,
    ) -> ConfigResult<Self> {
        check_unique(&enabled)?;
        let units = units.into_iter().map(|u| (u.name.clone(), u)).collect();
        Ok(Self {
            enabled,
            invalid: HashMap::new(),
            units,
        })
    }

    /// Load a profile file.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the file cannot be read or its enabled
    /// list is malformed.
    pub fn load(path: &Path) -> ConfigResult<Self> {
        let content = read_config_file(path)?;
        let profile = Self::parse(&content, &path.display().to_string())?;
        debug!(
            path = %path.display(),
            enabled = profile.enabled.len(),
            "loaded extension profile"
        );
        Ok(profile)
    }

    /// Parse profile TOML. `origin` names the source in error messages.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the TOML is invalid or the enabled list
    /// is malformed.
    pub fn parse(content: &str, origin: &str) -> ConfigResult<Self> {
        let root: toml::Table = toml::from_str(content).map_err(|e| ConfigError::ParseError {
            path: origin.to_owned(),
            source: e,
        })?;

        let (enabled, invalid) = parse_enabled(&root)?;

        let mut units = HashMap::new();
        for (key, section) in &root {
            if key == RESERVED_SECTION {
                continue;
            }
            let name = match ExtensionId::new(key.clone()) {
                Ok(name) => name,
                Err(e) => {
                    warn!(section = %key, error = %e, "Ignoring profile section with invalid name");
                    continue;
                },
            };
            if !enabled.contains(&name) {
                debug!(extension = %name, "Profile section for an extension that is not enabled");
            }
            units.insert(name.clone(), UnitConfig::from_section(name, section));
        }

        Ok(Self {
            enabled,
            invalid,
            units,
        })
    }

    /// Enabled extensions in declaration order, including entries whose
    /// name is invalid.
    #[must_use]
    pub fn enabled_units(&self) -> &[ExtensionId] {
        &self.enabled
    }

    /// Why `name` was rejected, if it is an enabled entry with an invalid
    /// name.
    #[must_use]
    pub fn invalid_name(&self, name: &ExtensionId) -> Option<&str> {
        self.invalid.get(name).map(String::as_str)
    }

    /// The section for `name`, if the profile has one.
    #[must_use]
    pub fn unit(&self, name: &ExtensionId) -> Option<&UnitConfig> {
        self.units.get(name)
    }
}

type EnabledList = (Vec<ExtensionId>, HashMap<ExtensionId, String>);

fn parse_enabled(root: &toml::Table) -> ConfigResult<EnabledList> {
    let field = "enabled.extensions";
    let invalid = |message: &str| ConfigError::ValidationError {
        field: field.to_owned(),
        message: message.to_owned(),
    };

    let section = root
        .get(RESERVED_SECTION)
        .and_then(toml::Value::as_table)
        .ok_or_else(|| invalid("profile must contain an [enabled] table"))?;

    let list = section
        .get("extensions")
        .and_then(toml::Value::as_array)
        .ok_or_else(|| invalid("[enabled] must contain an `extensions` array"))?;

    let mut names = Vec::with_capacity(list.len());
    let mut rejected = HashMap::new();
    for entry in list {
        let raw = entry
            .as_str()
            .ok_or_else(|| invalid("every entry of `extensions` must be a string"))?;
        match ExtensionId::new(raw) {
            Ok(name) => names.push(name),
            Err(e) => {
                warn!(extension = %raw, error = %e, "Enabled extension has an invalid name");
                let reason = match e {
                    ConfigError::InvalidExtensionName { reason, .. } => reason,
                    other => other.to_string(),
                };
                // Kept in order so the loader can record the failure.
                let name = ExtensionId::from_static(raw);
                rejected.insert(name.clone(), reason);
                names.push(name);
            },
        }
    }

    check_unique(&names)?;
    Ok((names, rejected))
}

fn check_unique(names: &[ExtensionId]) -> ConfigResult<()> {
    let mut seen = HashSet::with_capacity(names.len());
    for name in names {
        if !seen.insert(name) {
            return Err(ConfigError::DuplicateExtension(name.to_string()));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(s: &str) -> ExtensionId {
        ExtensionId::new(s).unwrap()
    }

    #[test]
    fn test_parse_preserves_declared_order() {
        let profile = ProfileConfig::parse(
            r#"
            [enabled]
            extensions = ["zeta", "alpha", "mid"]
            "#,
            "test",
        )
        .unwrap();
        assert_eq!(profile.enabled_units(), &[id("zeta"), id("alpha"), id("mid")]);
    }

    #[test]
    fn test_parse_unit_section() {
        let profile = ProfileConfig::parse(
            r#"
            [enabled]
            extensions = ["demo"]

            [demo]
            menu_bar = true
            host_window = false
            greeting = "hello"
            retries = 3
            verbose = true
            "#,
            "test",
        )
        .unwrap();

        let unit = profile.unit(&id("demo")).unwrap();
        assert_eq!(unit.permissions, CapabilitySet::MENU_BAR);
        assert_eq!(unit.preferences.get("greeting").map(String::as_str), Some("hello"));
        assert_eq!(unit.preferences.get("retries").map(String::as_str), Some("3"));
        assert_eq!(unit.preferences.get("verbose").map(String::as_str), Some("true"));
        assert!(!unit.preferences.contains_key("menu_bar"));
        assert!(!unit.preferences.contains_key("host_window"));
    }

    #[test]
    fn test_duplicate_names_rejected() {
        let err = ProfileConfig::parse(
            r#"
            [enabled]
            extensions = ["demo", "other", "demo"]
            "#,
            "test",
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::DuplicateExtension(ref n) if n == "demo"));
    }

    #[test]
    fn test_missing_enabled_table_rejected() {
        let err = ProfileConfig::parse("[demo]\nmenu_bar = true\n", "test").unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError { .. }));
    }

    #[test]
    fn test_non_array_extensions_rejected() {
        let err = ProfileConfig::parse("[enabled]\nextensions = \"demo\"\n", "test").unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError { .. }));
    }

    #[test]
    fn test_non_string_entry_rejected() {
        let err = ProfileConfig::parse("[enabled]\nextensions = [\"demo\", 4]\n", "test").unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError { .. }));
    }

    #[test]
    fn test_invalid_name_in_enabled_kept_as_invalid() {
        let profile = ProfileConfig::parse(
            "[enabled]\nextensions = [\"good\", \"LegacyExt\", \"enabled\", \"other\"]\n",
            "test",
        )
        .unwrap();

        let names: Vec<&str> = profile.enabled_units().iter().map(ExtensionId::as_str).collect();
        assert_eq!(names, ["good", "LegacyExt", "enabled", "other"]);
        assert!(profile.invalid_name(&id("good")).is_none());
        assert!(profile.invalid_name(&id("other")).is_none());
        assert!(profile.invalid_name(&ExtensionId::from_static("LegacyExt")).is_some());
        assert!(
            profile
                .invalid_name(&ExtensionId::from_static("enabled"))
                .is_some_and(|reason| reason.contains("reserved"))
        );
    }

    #[test]
    fn test_duplicate_invalid_names_rejected() {
        let err = ProfileConfig::parse("[enabled]\nextensions = [\"Bad\", \"Bad\"]\n", "test").unwrap_err();
        assert!(matches!(err, ConfigError::DuplicateExtension(ref n) if n == "Bad"));
    }

    #[test]
    fn test_non_boolean_permission_degrades_to_denied() {
        let profile = ProfileConfig::parse(
            r#"
            [enabled]
            extensions = ["demo"]

            [demo]
            menu_bar = "yes"
            meeting_list_view = true
            "#,
            "test",
        )
        .unwrap();
        let unit = profile.unit(&id("demo")).unwrap();
        assert_eq!(unit.permissions, CapabilitySet::MEETING_LIST_VIEW);
        assert!(!unit.preferences.contains_key("menu_bar"));
    }

    #[test]
    fn test_non_table_section_degrades_to_defaults() {
        let profile = ProfileConfig::parse(
            r#"
            demo = 5

            [enabled]
            extensions = ["demo"]
            "#,
            "test",
        )
        .unwrap();
        let unit = profile.unit(&id("demo")).unwrap();
        assert!(unit.permissions.is_empty());
        assert!(unit.preferences.is_empty());
    }

    #[test]
    fn test_nested_preference_skipped() {
        let profile = ProfileConfig::parse(
            r#"
            [enabled]
            extensions = ["demo"]

            [demo]
            list = [1, 2]
            name = "x"

            [demo.nested]
            key = "value"
            "#,
            "test",
        )
        .unwrap();
        let unit = profile.unit(&id("demo")).unwrap();
        assert_eq!(unit.preferences.len(), 1);
        assert_eq!(unit.preferences.get("name").map(String::as_str), Some("x"));
    }

    #[test]
    fn test_invalid_section_name_ignored() {
        let profile = ProfileConfig::parse(
            r#"
            [enabled]
            extensions = ["demo"]

            ["Not Valid"]
            menu_bar = true
            "#,
            "test",
        )
        .unwrap();
        assert_eq!(profile.enabled_units(), &[id("demo")]);
        assert!(profile.unit(&id("demo")).is_none());
    }

    #[test]
    fn test_new_rejects_duplicates() {
        let err = ProfileConfig::new(vec![id("a"), id("a")], []).unwrap_err();
        assert!(matches!(err, ConfigError::DuplicateExtension(_)));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("default.toml");
        std::fs::write(&path, "[enabled]\nextensions = [\"demo\"]\n").unwrap();

        let profile = ProfileConfig::load(&path).unwrap();
        assert_eq!(profile.enabled_units(), &[id("demo")]);
    }

    #[test]
    fn test_load_missing_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let err = ProfileConfig::load(&dir.path().join("missing.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::ReadError { .. }));
    }
}
