//! Post-merge configuration validation.
//!
//! Validates that deserialized [`Config`](crate::Config) values are within
//! acceptable ranges.

use crate::error::{ConfigError, ConfigResult};
use crate::types::Config;

/// Validate a fully-merged and deserialized configuration.
///
/// # Errors
///
/// Returns the first validation error found.
pub fn validate(config: &Config) -> ConfigResult<()> {
    validate_extensions(config)?;
    validate_logging(config)?;
    Ok(())
}

/// Upper bound for `extensions.hook_timeout_secs` (one hour).
const MAX_HOOK_TIMEOUT_SECS: u64 = 3600;

fn validate_extensions(config: &Config) -> ConfigResult<()> {
    let e = &config.extensions;

    if e.hook_timeout_secs == 0 || e.hook_timeout_secs > MAX_HOOK_TIMEOUT_SECS {
        return Err(ConfigError::ValidationError {
            field: "extensions.hook_timeout_secs".to_owned(),
            message: format!("hook_timeout_secs must be between 1 and {MAX_HOOK_TIMEOUT_SECS}"),
        });
    }

    // The profile name becomes a file stem, so it must not escape the
    // config directory.
    if e.profile.is_empty()
        || e.profile == "."
        || e.profile == ".."
        || e.profile.contains(['/', '\\'])
    {
        return Err(ConfigError::ValidationError {
            field: "extensions.profile".to_owned(),
            message: format!(
                "profile '{}' must be a plain file name without path separators",
                e.profile
            ),
        });
    }

    if e.dir.as_os_str().is_empty() {
        return Err(ConfigError::ValidationError {
            field: "extensions.dir".to_owned(),
            message: "dir must not be empty".to_owned(),
        });
    }

    Ok(())
}

const LOG_LEVELS: [&str; 6] = ["trace", "debug", "info", "warn", "error", "off"];

fn validate_logging(config: &Config) -> ConfigResult<()> {
    let level = config.logging.level.to_ascii_lowercase();
    if !LOG_LEVELS.contains(&level.as_str()) {
        return Err(ConfigError::ValidationError {
            field: "logging.level".to_owned(),
            message: format!(
                "unsupported level '{}'; expected one of: {}",
                config.logging.level,
                LOG_LEVELS.join(", ")
            ),
        });
    }

    if let Some(bad) = config.logging.directives.iter().find(|d| d.trim().is_empty()) {
        return Err(ConfigError::ValidationError {
            field: "logging.directives".to_owned(),
            message: format!("directive '{bad}' is empty"),
        });
    }

    Ok(())
}
