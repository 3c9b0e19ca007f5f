//! Telemetry error types.

use thiserror::Error;

/// Errors that can occur while installing the log subscriber.
#[derive(Debug, Error)]
pub enum TelemetryError {
    /// The level or a directive could not be parsed as a filter.
    #[error("Invalid log filter '{directive}': {message}")]
    InvalidFilter {
        /// The offending level or directive.
        directive: String,
        /// Parser message.
        message: String,
    },

    /// A global subscriber is already installed.
    #[error("Initialization error: {0}")]
    InitError(String),

    /// The log directory could not be created.
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Result type for telemetry operations.
pub type TelemetryResult<T> = Result<T, TelemetryError>;
