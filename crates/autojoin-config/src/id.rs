//! Extension identifiers.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ConfigResult};

/// Section name holding the enabled list; no extension may use it.
pub const RESERVED_SECTION: &str = "enabled";

/// Unique, stable, human-readable extension identifier.
///
/// Extension IDs are strings like `"extension-father"` or `"meeting_count"`.
/// They double as the profile section name and the catalog lookup key, so
/// they must be non-empty and contain only lowercase ASCII letters, digits,
/// hyphens and underscores.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct ExtensionId(String);

/// Deserialize with validation.
impl<'de> Deserialize<'de> for ExtensionId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::new(s).map_err(serde::de::Error::custom)
    }
}

impl ExtensionId {
    /// Create a new `ExtensionId`, validating the format.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidExtensionName`] if the ID is empty,
    /// reserved, or contains invalid characters.
    pub fn new(id: impl Into<String>) -> ConfigResult<Self> {
        let id = id.into();
        Self::validate(&id)?;
        Ok(Self(id))
    }

    /// Create an `ExtensionId` without validation (for tests and internal use).
    #[must_use]
    pub fn from_static(id: &str) -> Self {
        Self(id.to_owned())
    }

    /// Get the inner string value.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Check whether a string is a valid extension ID without constructing one.
    #[must_use]
    pub fn is_valid_id(id: &str) -> bool {
        Self::validate(id).is_ok()
    }

    fn validate(id: &str) -> ConfigResult<()> {
        let invalid = |reason: &str| ConfigError::InvalidExtensionName {
            name: id.to_owned(),
            reason: reason.to_owned(),
        };

        if id.is_empty() {
            return Err(invalid("extension name must not be empty"));
        }
        if id == RESERVED_SECTION {
            return Err(invalid("'enabled' is reserved for the enabled-list section"));
        }
        if !id
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' || c == '_')
        {
            return Err(invalid(
                "extension name must contain only lowercase alphanumeric characters, hyphens and underscores",
            ));
        }
        let is_sep = |c: char| c == '-' || c == '_';
        if id.starts_with(is_sep) || id.ends_with(is_sep) {
            return Err(invalid(
                "extension name must not start or end with a hyphen or underscore",
            ));
        }
        Ok(())
    }
}

impl fmt::Display for ExtensionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ExtensionId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_extension_ids() {
        assert!(ExtensionId::new("demo").is_ok());
        assert!(ExtensionId::new("extension-father").is_ok());
        assert!(ExtensionId::new("meeting_count").is_ok());
        assert!(ExtensionId::new("ext2").is_ok());
    }

    #[test]
    fn test_invalid_extension_ids() {
        assert!(ExtensionId::new("").is_err());
        assert!(ExtensionId::new("Demo").is_err());
        assert!(ExtensionId::new("my ext").is_err());
        assert!(ExtensionId::new("../evil").is_err());
        assert!(ExtensionId::new("-ext").is_err());
        assert!(ExtensionId::new("ext_").is_err());
        assert!(ExtensionId::new("enabled").is_err());
    }

    #[test]
    fn test_extension_id_display() {
        let id = ExtensionId::new("demo").unwrap();
        assert_eq!(id.to_string(), "demo");
        assert_eq!(id.as_str(), "demo");
    }

    #[test]
    fn test_extension_id_deserialize_rejects_invalid() {
        let ok: Result<ExtensionId, _> = serde_json::from_str("\"demo\"");
        assert!(ok.is_ok());
        let bad: Result<ExtensionId, _> = serde_json::from_str("\"Bad Name\"");
        assert!(bad.is_err());
    }
}
