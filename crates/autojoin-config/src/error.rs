use std::io;
use thiserror::Error;

/// Configuration error type.
///
/// Every variant is fatal to the host: a configuration that cannot be read
/// or validated aborts startup.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read a configuration file.
    #[error("Failed to read config file at {path}: {source}")]
    ReadError {
        /// Path to the config file that could not be read.
        path: String,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// Failed to parse TOML configuration.
    #[error("Failed to parse config file at {path}: {source}")]
    ParseError {
        /// Path to the config file that failed to parse.
        path: String,
        /// Underlying TOML parse error.
        #[source]
        source: toml::de::Error,
    },

    /// Configuration validation failed.
    #[error("Validation error in field '{field}': {message}")]
    ValidationError {
        /// Field that failed validation.
        field: String,
        /// Validation failure description.
        message: String,
    },

    /// An extension name is not a valid identifier.
    #[error("Invalid extension name '{name}': {reason}")]
    InvalidExtensionName {
        /// The rejected name.
        name: String,
        /// Why the name was rejected.
        reason: String,
    },

    /// The same extension is listed more than once in the enabled list.
    #[error("Extension '{0}' is listed more than once in [enabled].extensions")]
    DuplicateExtension(String),

    /// Could not determine home directory.
    #[error("Could not determine home directory")]
    NoHomeDir,
}

/// Result type for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;
