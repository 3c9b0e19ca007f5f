#![deny(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]
//! Configuration for the Autojoin host and its extensions.
//!
//! Two files are involved:
//!
//! - the **host config** (`autojoin.toml`), whose `[extensions]` table is the
//!   global switch (`enabled`, `dir`, `profile`, `hook_timeout_secs`) and
//!   whose `[logging]` table configures telemetry;
//! - the **profile** (`<dir>/config/<profile>.toml`), which lists the enabled
//!   extensions in processing order and holds one optional section per
//!   extension with its permissions and preferences.
//!
//! # Usage
//!
//! ```rust,no_run
//! use autojoin_config::{Config, ExtensionConfigStore};
//!
//! let resolved = Config::load(Some(std::path::Path::new("autojoin.toml"))).unwrap();
//! let store = ExtensionConfigStore::from_section(&resolved.config.extensions).unwrap();
//! for name in store.enabled_units() {
//!     println!("{name}: {}", store.permissions(name));
//! }
//! ```
//!
//! # Configuration Precedence
//!
//! From highest to lowest priority:
//!
//! 1. **Explicit** file passed on the command line
//! 2. **User** (`~/.autojoin/config.toml`)
//! 3. **Embedded defaults** (`defaults.toml` compiled into binary)
//!
//! # Design
//!
//! This crate has **no dependencies on other internal autojoin crates**.
//! Capability names are checked while the profile is parsed, so the rest of
//! the host only ever sees the closed [`Capability`] enum.

/// Host capabilities and capability sets.
pub mod capability;
/// Configuration error types.
pub mod error;
/// Extension identifiers.
pub mod id;
/// Configuration file discovery and loading.
pub mod loader;
/// Extension profile parsing.
pub mod profile;
/// Read-only extension configuration view.
pub mod store;
/// Configuration struct definitions.
pub mod types;
/// Configuration validation rules.
pub mod validate;

// Re-export primary types at the crate root.
pub use capability::{Capability, CapabilitySet};
pub use error::{ConfigError, ConfigResult};
pub use id::ExtensionId;
pub use loader::ResolvedConfig;
pub use profile::{Preferences, ProfileConfig, UnitConfig};
pub use store::ExtensionConfigStore;
pub use types::*;

impl Config {
    /// Load configuration with full precedence chain.
    ///
    /// See [`loader::load`] for the full algorithm.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if any config file is malformed or the final
    /// configuration fails validation.
    pub fn load(explicit: Option<&std::path::Path>) -> ConfigResult<ResolvedConfig> {
        loader::load(explicit, None)
    }

    /// Load configuration with an explicit home directory override.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if any config file is malformed or the final
    /// configuration fails validation.
    pub fn load_with_home(
        explicit: Option<&std::path::Path>,
        home_dir: &std::path::Path,
    ) -> ConfigResult<ResolvedConfig> {
        loader::load(explicit, Some(home_dir))
    }

    /// Load configuration from a single file (no layering).
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the file cannot be read, parsed, or fails
    /// validation.
    pub fn load_file(path: &std::path::Path) -> ConfigResult<Self> {
        loader::load_file(path)
    }
}
