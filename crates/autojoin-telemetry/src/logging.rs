//! Logging configuration and setup.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::filter::Directive;
use tracing_subscriber::fmt::{self, MakeWriter};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, Registry};

use crate::error::{TelemetryError, TelemetryResult};

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync + 'static>;

/// Log format options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable format with colors (default).
    #[default]
    Pretty,
    /// Compact single-line format.
    Compact,
    /// JSON format for structured logging.
    Json,
    /// Full format with all fields.
    Full,
}

/// Log output target.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogTarget {
    /// Log to stdout.
    Stdout,
    /// Log to stderr.
    #[default]
    Stderr,
    /// Log to daily-rotated files in a directory.
    File(PathBuf),
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogConfig {
    /// Log level filter (e.g., "info", "debug", "trace").
    #[serde(default = "default_level")]
    pub level: String,
    /// Log format.
    #[serde(default)]
    pub format: LogFormat,
    /// Log target.
    #[serde(default)]
    pub target: LogTarget,
    /// File name prefix for [`LogTarget::File`].
    #[serde(default = "default_file_prefix")]
    pub file_prefix: String,
    /// Whether to include timestamps.
    #[serde(default = "default_true")]
    pub timestamps: bool,
    /// Whether to include file/line info.
    #[serde(default)]
    pub file_info: bool,
    /// Whether to use ANSI colors.
    #[serde(default = "default_true")]
    pub ansi: bool,
    /// Directive overrides (e.g., `autojoin_extensions=debug`).
    #[serde(default)]
    pub directives: Vec<String>,
}

fn default_level() -> String {
    "info".to_owned()
}

fn default_file_prefix() -> String {
    "autojoin".to_owned()
}

fn default_true() -> bool {
    true
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            format: LogFormat::default(),
            target: LogTarget::default(),
            file_prefix: default_file_prefix(),
            timestamps: true,
            file_info: false,
            ansi: true,
            directives: Vec::new(),
        }
    }
}

impl LogConfig {
    /// Create a new log config with the specified level.
    #[must_use]
    pub fn new(level: impl Into<String>) -> Self {
        Self {
            level: level.into(),
            ..Default::default()
        }
    }

    /// Set the log format.
    #[must_use]
    pub fn with_format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }

    /// Set the log target.
    #[must_use]
    pub fn with_target(mut self, target: LogTarget) -> Self {
        self.target = target;
        self
    }

    /// Log to daily-rotated files in `directory`. Disables ANSI colors.
    #[must_use]
    pub fn with_file_logging(mut self, directory: impl Into<PathBuf>) -> Self {
        self.target = LogTarget::File(directory.into());
        self.ansi = false;
        self
    }

    /// Add a directive override.
    #[must_use]
    pub fn with_directive(mut self, directive: impl Into<String>) -> Self {
        self.directives.push(directive.into());
        self
    }

    /// Disable timestamps.
    #[must_use]
    pub fn without_timestamps(mut self) -> Self {
        self.timestamps = false;
        self
    }

    /// Enable file/line info.
    #[must_use]
    pub fn with_file_info(mut self) -> Self {
        self.file_info = true;
        self
    }

    /// Disable ANSI colors.
    #[must_use]
    pub fn without_ansi(mut self) -> Self {
        self.ansi = false;
        self
    }

    /// Build the env filter from config.
    fn build_filter(&self) -> TelemetryResult<EnvFilter> {
        let invalid = |directive: &str, e: &dyn std::fmt::Display| TelemetryError::InvalidFilter {
            directive: directive.to_owned(),
            message: e.to_string(),
        };

        let mut filter = EnvFilter::try_new(&self.level).map_err(|e| invalid(&self.level, &e))?;
        for directive in &self.directives {
            let parsed = directive
                .parse::<Directive>()
                .map_err(|e| invalid(directive, &e))?;
            filter = filter.add_directive(parsed);
        }
        Ok(filter)
    }

    /// Build the formatting layer for `writer`, with the filter attached.
    fn build_layer<W>(&self, filter: EnvFilter, writer: W) -> BoxedLayer
    where
        W: for<'a> MakeWriter<'a> + Send + Sync + 'static,
    {
        let base = fmt::layer()
            .with_writer(writer)
            .with_ansi(self.ansi)
            .with_file(self.file_info)
            .with_line_number(self.file_info);

        match (self.format, self.timestamps) {
            (LogFormat::Json, true) => base.json().with_filter(filter).boxed(),
            (LogFormat::Json, false) => base.json().without_time().with_filter(filter).boxed(),
            (LogFormat::Pretty, true) => base.pretty().with_filter(filter).boxed(),
            (LogFormat::Pretty, false) => base.pretty().without_time().with_filter(filter).boxed(),
            (LogFormat::Compact, true) => base.compact().with_filter(filter).boxed(),
            (LogFormat::Compact, false) => {
                base.compact().without_time().with_filter(filter).boxed()
            },
            (LogFormat::Full, true) => base.with_filter(filter).boxed(),
            (LogFormat::Full, false) => base.without_time().with_filter(filter).boxed(),
        }
    }
}

/// Set up logging with the given configuration.
///
/// # Errors
///
/// Returns an error if the filter is invalid, the log directory cannot be
/// created, or a global subscriber is already installed.
pub fn setup_logging(config: &LogConfig) -> TelemetryResult<()> {
    let filter = config.build_filter()?;

    let layer = match &config.target {
        LogTarget::Stdout => config.build_layer(filter, std::io::stdout),
        LogTarget::Stderr => config.build_layer(filter, std::io::stderr),
        LogTarget::File(dir) => {
            std::fs::create_dir_all(dir)?;
            let appender = RollingFileAppender::new(Rotation::DAILY, dir, &config.file_prefix);
            config.build_layer(filter, appender)
        },
    };

    tracing_subscriber::registry()
        .with(layer)
        .try_init()
        .map_err(|e| TelemetryError::InitError(e.to_string()))
}

#[cfg(feature = "config")]
impl From<&autojoin_config::LoggingSection> for LogConfig {
    fn from(section: &autojoin_config::LoggingSection) -> Self {
        use autojoin_config::LogFormatConfig;

        let format = match section.format {
            LogFormatConfig::Pretty => LogFormat::Pretty,
            LogFormatConfig::Compact => LogFormat::Compact,
            LogFormatConfig::Json => LogFormat::Json,
            LogFormatConfig::Full => LogFormat::Full,
        };

        let mut config = Self::new(section.level.clone()).with_format(format);
        config.directives.clone_from(&section.directives);
        if let Some(dir) = &section.directory {
            config = config.with_file_logging(dir.clone());
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_config_default() {
        let config = LogConfig::default();
        assert_eq!(config.level, "info");
        assert_eq!(config.format, LogFormat::Pretty);
        assert_eq!(config.target, LogTarget::Stderr);
        assert!(config.timestamps);
        assert!(config.ansi);
    }

    #[test]
    fn test_log_config_builder() {
        let config = LogConfig::new("debug")
            .with_format(LogFormat::Json)
            .without_timestamps()
            .with_file_info()
            .with_directive("autojoin_extensions=trace");

        assert_eq!(config.level, "debug");
        assert_eq!(config.format, LogFormat::Json);
        assert!(!config.timestamps);
        assert!(config.file_info);
        assert_eq!(config.directives, vec!["autojoin_extensions=trace"]);
    }

    #[test]
    fn test_file_logging_disables_ansi() {
        let config = LogConfig::new("info").with_file_logging("/var/log/autojoin");
        assert_eq!(config.target, LogTarget::File(PathBuf::from("/var/log/autojoin")));
        assert!(!config.ansi);
    }

    #[test]
    fn test_log_config_deserialize_defaults() {
        let parsed: LogConfig = serde_json::from_str(r#"{"format":"compact"}"#).unwrap();
        assert_eq!(parsed.level, "info");
        assert_eq!(parsed.format, LogFormat::Compact);
        assert_eq!(parsed.file_prefix, "autojoin");
    }

    #[test]
    fn test_build_filter() {
        let config = LogConfig::new("debug").with_directive("autojoin_extensions=trace");
        assert!(config.build_filter().is_ok());
    }

    #[test]
    fn test_build_filter_invalid() {
        // EnvFilter is permissive with unknown targets, so we test invalid syntax
        let config = LogConfig::new("debug").with_directive("[invalid=syntax");
        let err = config.build_filter().unwrap_err();
        assert!(matches!(err, TelemetryError::InvalidFilter { ref directive, .. } if directive == "[invalid=syntax"));
    }

    #[test]
    fn test_file_target_creates_directory() {
        let dir = tempfile::tempdir().unwrap();
        let log_dir = dir.path().join("logs");
        let config = LogConfig::new("info").with_file_logging(&log_dir);

        // The only test that installs the global subscriber.
        setup_logging(&config).unwrap();
        assert!(log_dir.is_dir());
        tracing::info!("written to the rolling file");
    }
}
