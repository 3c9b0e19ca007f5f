//! Autojoin Extensions - lifecycle host for optional extensions.
//!
//! Extensions are units of optional behavior enabled per profile. The
//! [`ExtensionHost`] takes every enabled extension through four phases:
//!
//! 1. **Load**: build it through its [`ExtensionFactory`] in the
//!    [`ExtensionCatalog`].
//! 2. **Preferences**: hand it its own key/value settings.
//! 3. **Objects**: hand it the [`HostObjects`] its permissions allow, as a
//!    [`GrantedObjects`] bundle.
//! 4. **Run**: call its entry point.
//!
//! Failures are isolated. An extension that fails to load is skipped by
//! the later phases, and a failed hook affects only that extension in that
//! phase. Every phase returns a [`PhaseReport`].
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use async_trait::async_trait;
//! use autojoin_extensions::prelude::*;
//!
//! struct Greeter;
//!
//! #[async_trait]
//! impl Extension for Greeter {
//!     async fn run(&self) -> HookResult {
//!         tracing::info!("hello from an extension");
//!         Ok(())
//!     }
//! }
//!
//! # async fn demo(config: ExtensionConfigStore, objects: HostObjects) -> Result<(), ExtensionError> {
//! let mut catalog = ExtensionCatalog::new();
//! catalog.register("greeter", |_: &ExtensionContext| -> Result<Arc<dyn Extension>, InitError> {
//!     Ok(Arc::new(Greeter))
//! })?;
//!
//! let mut host = ExtensionHost::new(config, catalog);
//! let report = host.start(&objects).await?;
//! assert!(report.run.is_success());
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]
#![deny(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

pub mod prelude;

mod broker;
mod catalog;
mod context;
mod error;
mod extension;
mod host;
mod invoke;
mod lifecycle;
mod phase;
mod registry;
mod report;

pub use autojoin_config::{Capability, CapabilitySet, ExtensionConfigStore, ExtensionId, Preferences};
pub use broker::{GrantedObjects, GrantedParts, ObjectBroker};
pub use catalog::{ExtensionCatalog, ExtensionFactory};
pub use context::ExtensionContext;
pub use error::{
    ExtensionError, ExtensionResult, HookError, HookResult, InitError, LoadError, UnitError,
};
pub use extension::Extension;
pub use host::{HostObjects, HostWindow, MeetingEntry, MeetingListView, Menu, MenuBar, MenuItem};
pub use lifecycle::ExtensionHost;
pub use phase::Phase;
pub use registry::{ExtensionRegistry, ExtensionStatus, LoadedExtension};
pub use report::{LifecycleReport, OutcomeStatus, PhaseReport, UnitOutcome, UnitSummary};
