//! Autojoin Telemetry - logging setup for the Autojoin host.
//!
//! Installs a global `tracing` subscriber with a configurable level, format
//! and target. Library crates only emit events through `tracing` macros; the
//! binary calls [`setup_logging`] once at startup.
//!
//! # Example
//!
//! ```rust,no_run
//! use autojoin_telemetry::{LogConfig, LogFormat, setup_logging};
//!
//! # fn main() -> Result<(), autojoin_telemetry::TelemetryError> {
//! let config = LogConfig::new("debug")
//!     .with_format(LogFormat::Compact)
//!     .with_directive("autojoin_extensions=trace");
//!
//! setup_logging(&config)?;
//! tracing::info!("host starting");
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]
#![deny(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

mod error;
mod logging;

pub use error::{TelemetryError, TelemetryResult};
pub use logging::{LogConfig, LogFormat, LogTarget, setup_logging};
