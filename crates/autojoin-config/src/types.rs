//! Configuration types for the Autojoin host.
//!
//! Every struct implements [`Default`] with the values shipped in
//! `defaults.toml`, so a bare `[section]` header in TOML produces a working
//! configuration.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Top-level Config
// ---------------------------------------------------------------------------

/// Root configuration for the Autojoin host.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Extension host switch and profile selection.
    pub extensions: ExtensionsSection,
    /// Logging level, format, and per-crate directives.
    pub logging: LoggingSection,
}

// ---------------------------------------------------------------------------
// ExtensionsSection
// ---------------------------------------------------------------------------

/// The global extension switch.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtensionsSection {
    /// Whether extensions are loaded at all.
    pub enabled: bool,
    /// Search root for extensions. Relative paths resolve against the
    /// directory of the config file that set them.
    pub dir: PathBuf,
    /// Name of the active profile (`<dir>/config/<profile>.toml`).
    pub profile: String,
    /// Upper bound for a single hook invocation, in seconds.
    pub hook_timeout_secs: u64,
}

impl Default for ExtensionsSection {
    fn default() -> Self {
        Self {
            enabled: false,
            dir: PathBuf::from("extensions"),
            profile: "default".to_owned(),
            hook_timeout_secs: 10,
        }
    }
}

impl ExtensionsSection {
    /// Path of the active profile file under the search root.
    #[must_use]
    pub fn profile_path(&self) -> PathBuf {
        self.dir
            .join("config")
            .join(format!("{}.toml", self.profile))
    }
}

// ---------------------------------------------------------------------------
// LoggingSection
// ---------------------------------------------------------------------------

/// Logging configuration mirrored from the telemetry crate.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    /// Default level filter (`trace`, `debug`, `info`, `warn`, `error`).
    pub level: String,
    /// Output format.
    pub format: LogFormatConfig,
    /// Extra `target=level` directives.
    pub directives: Vec<String>,
    /// Write logs to this directory instead of stderr.
    pub directory: Option<PathBuf>,
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            level: "info".to_owned(),
            format: LogFormatConfig::default(),
            directives: Vec::new(),
            directory: None,
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormatConfig {
    /// Human-readable multi-line output.
    #[default]
    Pretty,
    /// Compact single-line output.
    Compact,
    /// JSON lines.
    Json,
    /// Full single-line output.
    Full,
}
