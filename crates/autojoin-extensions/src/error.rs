//! Extension error types.
//!
//! Three kinds of failure exist, with different blast radii:
//!
//! - [`LoadError`]: one extension could not be constructed. It is recorded
//!   as `Failed` in the registry and skipped by every later phase.
//! - [`HookError`]: one hook of one extension failed. Only that phase is
//!   affected; the extension still takes part in the other phases.
//! - [`ExtensionError`]: the host itself was misused (duplicate catalog
//!   entry, loading twice). These are returned to the caller.

use serde::Serialize;

use autojoin_config::ExtensionId;

use crate::phase::Phase;

/// Failure to resolve or construct one extension.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, thiserror::Error)]
#[serde(rename_all = "snake_case")]
pub enum LoadError {
    /// The profile lists this extension under a name that is not a valid
    /// identifier.
    #[error("invalid extension name {id}: {reason}")]
    InvalidName {
        /// The name as written in the profile.
        id: ExtensionId,
        /// Why the name was rejected.
        reason: String,
    },

    /// No factory is registered under this name.
    #[error("extension not registered: {0}")]
    NotRegistered(ExtensionId),

    /// The factory returned an error.
    #[error("extension {id} failed to initialize: {message}")]
    InitFailed {
        /// The extension that failed.
        id: ExtensionId,
        /// Failure reason reported by the factory.
        message: String,
    },

    /// The factory panicked.
    #[error("extension {id} panicked during initialization: {message}")]
    Panicked {
        /// The extension that panicked.
        id: ExtensionId,
        /// Panic payload, when it was a string.
        message: String,
    },
}

/// Failure of a single hook invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, thiserror::Error)]
#[serde(rename_all = "snake_case")]
pub enum HookError {
    /// The extension does not implement the hook for this phase.
    #[error("extension does not implement the {0} hook")]
    Missing(Phase),

    /// The hook returned an error.
    #[error("hook failed: {0}")]
    Failed(String),

    /// The hook did not finish within the configured bound.
    #[error("hook timed out after {timeout_ms} ms")]
    TimedOut {
        /// The bound that was exceeded, in milliseconds.
        timeout_ms: u64,
    },

    /// The hook panicked.
    #[error("hook panicked: {0}")]
    Panicked(String),
}

impl HookError {
    /// Shorthand for [`HookError::Failed`].
    pub fn failed(message: impl Into<String>) -> Self {
        Self::Failed(message.into())
    }
}

/// Error returned by an [`ExtensionFactory`](crate::ExtensionFactory).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{0}")]
pub struct InitError(pub String);

impl InitError {
    /// Create an initialization error with a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

/// A per-unit failure recorded in a phase report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, thiserror::Error)]
#[serde(rename_all = "snake_case")]
pub enum UnitError {
    /// The extension could not be loaded.
    #[error(transparent)]
    Load(#[from] LoadError),
    /// A hook failed.
    #[error(transparent)]
    Hook(#[from] HookError),
}

/// Errors from host operations.
#[derive(Debug, thiserror::Error)]
pub enum ExtensionError {
    /// A factory with this name is already in the catalog.
    #[error("extension already registered: {0}")]
    AlreadyRegistered(ExtensionId),

    /// The registry already holds an entry for this name.
    #[error("extension already present in the registry: {0}")]
    DuplicateEntry(ExtensionId),

    /// `load_all` was already called on this host.
    #[error("extensions were already loaded in this session")]
    AlreadyLoaded,

    /// A catalog name is not a valid extension identifier.
    #[error("invalid extension id: {0}")]
    InvalidId(#[from] autojoin_config::ConfigError),
}

/// Result of a single hook invocation.
pub type HookResult = Result<(), HookError>;

/// Result type for host operations.
pub type ExtensionResult<T> = Result<T, ExtensionError>;
