//! Config file discovery and layered loading.
//!
//! Implements the `Config::load()` algorithm:
//! 1. Parse `defaults.toml` → base
//! 2. Merge `~/.autojoin/config.toml` (user)
//! 3. Merge the explicitly requested file, if any
//! 4. Deserialize merged tree → `Config`
//! 5. Resolve a relative `extensions.dir` against the directory of the
//!    highest-precedence file that was loaded
//! 6. Validate
//! 7. Return `ResolvedConfig`

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::error::{ConfigError, ConfigResult};
use crate::types::Config;
use crate::validate;

/// Embedded default configuration.
const DEFAULTS_TOML: &str = include_str!("defaults.toml");

/// Maximum allowed config file size (1 MB).
const MAX_CONFIG_FILE_SIZE: u64 = 1_048_576;

/// A loaded configuration together with where it came from.
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    /// The merged and validated configuration.
    pub config: Config,
    /// Files that contributed to the configuration, lowest precedence first.
    pub loaded_files: Vec<PathBuf>,
    /// Directory that relative paths were resolved against.
    pub base_dir: PathBuf,
}

/// Load the configuration with layered file precedence.
///
/// `explicit` is a file requested by the user (e.g. `--config`); unlike the
/// user layer it must exist. `home_override` replaces the directory searched
/// for the user layer (the file is then `{home_override}/config.toml`).
///
/// # Errors
///
/// Returns a [`ConfigError`] if any config file is malformed, an explicit
/// file is missing, or the merged configuration fails validation.
pub fn load(explicit: Option<&Path>, home_override: Option<&Path>) -> ConfigResult<ResolvedConfig> {
    // 1. Parse embedded defaults.
    let mut merged: toml::Value =
        toml::from_str(DEFAULTS_TOML).map_err(|e| ConfigError::ParseError {
            path: "<embedded defaults>".to_owned(),
            source: e,
        })?;

    let mut loaded_files = Vec::new();

    // 2. User config.
    // Without a home directory the user layer is skipped.
    let user_path = match home_override {
        Some(home) => Some(home.join("config.toml")),
        None => home_directory()
            .ok()
            .map(|home| home.join(".autojoin").join("config.toml")),
    };
    if let Some(user_path) = user_path
        && let Some(overlay) = try_load_file(&user_path)?
    {
        deep_merge(&mut merged, &overlay);
        info!(path = %user_path.display(), "loaded user config");
        loaded_files.push(user_path);
    }

    // 3. Explicit config.
    if let Some(path) = explicit {
        let content = read_config_file(path)?;
        let overlay: toml::Value = parse_toml(&content, path)?;
        deep_merge(&mut merged, &overlay);
        info!(path = %path.display(), "loaded config");
        loaded_files.push(path.to_path_buf());
    }

    // 4. Deserialize.
    let mut config: Config =
        merged
            .try_into()
            .map_err(|e: toml::de::Error| ConfigError::ParseError {
                path: "<merged config>".to_owned(),
                source: e,
            })?;

    // 5. Resolve relative paths.
    let base_dir = loaded_files
        .last()
        .and_then(|p| p.parent())
        .map_or_else(|| PathBuf::from("."), Path::to_path_buf);
    if config.extensions.dir.is_relative() {
        config.extensions.dir = base_dir.join(&config.extensions.dir);
    }
    debug!(dir = %config.extensions.dir.display(), "resolved extension search root");

    // 6. Validate.
    validate::validate(&config)?;

    Ok(ResolvedConfig {
        config,
        loaded_files,
        base_dir,
    })
}

/// Load a config from a specific file path (no layering, no defaults merge).
///
/// A relative `extensions.dir` resolves against the file's directory.
///
/// # Errors
///
/// Returns a [`ConfigError`] if the file cannot be read, parsed, or fails
/// validation.
pub fn load_file(path: &Path) -> ConfigResult<Config> {
    let content = read_config_file(path)?;
    let mut config: Config = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
        path: path.display().to_string(),
        source: e,
    })?;

    if config.extensions.dir.is_relative()
        && let Some(parent) = path.parent()
    {
        config.extensions.dir = parent.join(&config.extensions.dir);
    }

    validate::validate(&config)?;
    Ok(config)
}

/// Read a config file, enforcing the size limit.
pub(crate) fn read_config_file(path: &Path) -> ConfigResult<String> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
        path: path.display().to_string(),
        source: e,
    })?;
    check_size(path, &content)?;
    Ok(content)
}

/// Try to load a file, returning `None` if the file doesn't exist.
///
/// Uses a single read operation to avoid TOCTOU races (no separate
/// exists/metadata checks before reading).
fn try_load_file(path: &Path) -> ConfigResult<Option<toml::Value>> {
    let content = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            debug!(path = %path.display(), "config file not found, skipping");
            return Ok(None);
        },
        Err(e) => {
            return Err(ConfigError::ReadError {
                path: path.display().to_string(),
                source: e,
            });
        },
    };

    check_size(path, &content)?;
    parse_toml(&content, path).map(Some)
}

fn check_size(path: &Path, content: &str) -> ConfigResult<()> {
    if content.len() as u64 > MAX_CONFIG_FILE_SIZE {
        return Err(ConfigError::ValidationError {
            field: path.display().to_string(),
            message: format!(
                "config file is {} bytes, exceeding the {} byte limit",
                content.len(),
                MAX_CONFIG_FILE_SIZE
            ),
        });
    }
    Ok(())
}

fn parse_toml(content: &str, path: &Path) -> ConfigResult<toml::Value> {
    toml::from_str(content).map_err(|e| ConfigError::ParseError {
        path: path.display().to_string(),
        source: e,
    })
}

/// Recursively deep-merge `overlay` into `base`.
///
/// - Tables merge recursively per-field.
/// - Scalars and arrays from the overlay **replace** the base value.
pub fn deep_merge(base: &mut toml::Value, overlay: &toml::Value) {
    match (base, overlay) {
        (toml::Value::Table(base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                if let Some(base_val) = base_table.get_mut(key) {
                    deep_merge(base_val, overlay_val);
                } else {
                    base_table.insert(key.clone(), overlay_val.clone());
                }
            }
        },
        (base, overlay) => {
            *base = overlay.clone();
        },
    }
}

/// Determine the user's home directory.
fn home_directory() -> ConfigResult<PathBuf> {
    directories::BaseDirs::new()
        .map(|d| d.home_dir().to_path_buf())
        .ok_or(ConfigError::NoHomeDir)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_deserialize_to_config() {
        let config: Config = toml::from_str(DEFAULTS_TOML).unwrap();
        assert!(!config.extensions.enabled);
        assert_eq!(config.extensions.profile, "default");
        assert_eq!(config.extensions.hook_timeout_secs, 10);
        assert_eq!(config.logging.level, "info");
        assert!(validate::validate(&config).is_ok());
    }

    #[test]
    fn test_load_with_empty_home_uses_defaults() {
        let home = tempfile::tempdir().unwrap();
        let resolved = load(None, Some(home.path())).unwrap();
        assert!(resolved.loaded_files.is_empty());
        assert!(!resolved.config.extensions.enabled);
        assert_eq!(resolved.config.extensions.dir, PathBuf::from(".").join("extensions"));
    }

    #[test]
    fn test_explicit_file_overrides_user_file() {
        let home = tempfile::tempdir().unwrap();
        std::fs::write(
            home.path().join("config.toml"),
            "[extensions]\nenabled = true\nprofile = \"user\"\n",
        )
        .unwrap();

        let work = tempfile::tempdir().unwrap();
        let explicit = work.path().join("autojoin.toml");
        std::fs::write(&explicit, "[extensions]\nprofile = \"work\"\n").unwrap();

        let resolved = load(Some(&explicit), Some(home.path())).unwrap();
        let ext = &resolved.config.extensions;
        assert!(ext.enabled, "user layer value must survive the merge");
        assert_eq!(ext.profile, "work");
        assert_eq!(ext.dir, work.path().join("extensions"));
        assert_eq!(resolved.loaded_files.len(), 2);
    }

    #[test]
    fn test_explicit_file_missing_is_fatal() {
        let home = tempfile::tempdir().unwrap();
        let result = load(Some(Path::new("/nonexistent/autojoin.toml")), Some(home.path()));
        assert!(matches!(result, Err(ConfigError::ReadError { .. })));
    }

    #[test]
    fn test_malformed_user_file_is_fatal() {
        let home = tempfile::tempdir().unwrap();
        std::fs::write(home.path().join("config.toml"), "[extensions\nenabled = ").unwrap();
        let result = load(None, Some(home.path()));
        assert!(matches!(result, Err(ConfigError::ParseError { .. })));
    }

    #[test]
    fn test_wrong_type_is_fatal() {
        let home = tempfile::tempdir().unwrap();
        std::fs::write(
            home.path().join("config.toml"),
            "[extensions]\nenabled = \"definitely\"\n",
        )
        .unwrap();
        let result = load(None, Some(home.path()));
        assert!(matches!(result, Err(ConfigError::ParseError { .. })));
    }

    #[test]
    fn test_absolute_dir_kept() {
        let home = tempfile::tempdir().unwrap();
        let abs = home.path().join("exts");
        std::fs::write(
            home.path().join("config.toml"),
            format!("[extensions]\ndir = {:?}\n", abs.display().to_string()),
        )
        .unwrap();
        let resolved = load(None, Some(home.path())).unwrap();
        assert_eq!(resolved.config.extensions.dir, abs);
    }

    #[test]
    fn test_load_file_resolves_relative_dir() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("autojoin.toml");
        std::fs::write(&path, "[extensions]\nenabled = true\ndir = \"plugins\"\n").unwrap();
        let config = load_file(&path).unwrap();
        assert_eq!(config.extensions.dir, dir.path().join("plugins"));
    }

    #[test]
    fn test_load_file_nonexistent() {
        let result = load_file(Path::new("/nonexistent/config.toml"));
        assert!(matches!(result, Err(ConfigError::ReadError { .. })));
    }

    #[test]
    fn test_try_load_file_missing() {
        let result = try_load_file(Path::new("/nonexistent/config.toml")).unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn test_oversized_config_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let file_path = dir.path().join("huge.toml");
        let data = "x = \"".to_owned() + &"a".repeat(1_100_000) + "\"";
        std::fs::write(&file_path, data).unwrap();

        let result = try_load_file(&file_path);
        assert!(
            matches!(result, Err(ConfigError::ValidationError { .. })),
            "Expected ValidationError for oversized config, got: {result:?}"
        );
    }

    #[test]
    fn test_deep_merge_replaces_scalars_and_merges_tables() {
        let mut base: toml::Value = toml::from_str("[a]\nx = 1\ny = 2\n").unwrap();
        let overlay: toml::Value = toml::from_str("[a]\ny = 3\nz = 4\n").unwrap();
        deep_merge(&mut base, &overlay);
        let a = base.get("a").unwrap();
        assert_eq!(a.get("x").and_then(toml::Value::as_integer), Some(1));
        assert_eq!(a.get("y").and_then(toml::Value::as_integer), Some(3));
        assert_eq!(a.get("z").and_then(toml::Value::as_integer), Some(4));
    }
}
