//! Bridge from `autojoin_config::Config` to telemetry settings.

use autojoin_config::Config;
use autojoin_telemetry::{LogConfig, LogFormat};

/// Build the logging setup from `[logging]`, raising the level to `debug`
/// when `verbose` is set.
pub(crate) fn to_log_config(cfg: &Config, verbose: bool) -> LogConfig {
    let mut config = LogConfig::from(&cfg.logging);
    if verbose {
        "debug".clone_into(&mut config.level);
    }
    config
}

/// Logging setup used when the configuration could not be loaded.
pub(crate) fn fallback_log_config(verbose: bool) -> LogConfig {
    let level = if verbose { "debug" } else { "warn" };
    LogConfig::new(level).with_format(LogFormat::Compact)
}
