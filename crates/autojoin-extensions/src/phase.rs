//! Lifecycle phases.

use std::fmt;

use serde::{Deserialize, Serialize};

/// One of the four lifecycle steps every enabled extension goes through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// Resolve the extension in the catalog and construct it.
    Load,
    /// Hand the extension its own preferences.
    Preferences,
    /// Hand the extension the host objects it was granted.
    Objects,
    /// Invoke the extension's entrypoint.
    Run,
}

impl Phase {
    /// All phases, in the order the host drives them.
    pub const ALL: [Self; 4] = [Self::Load, Self::Preferences, Self::Objects, Self::Run];

    /// Stable lowercase name used in logs and reports.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Load => "load",
            Self::Preferences => "preferences",
            Self::Objects => "objects",
            Self::Run => "run",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
