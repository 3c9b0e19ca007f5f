//! Autojoin Test - shared test utilities for the extension host.
//!
//! Mock host resources, scripted extensions and profile fixtures used by
//! the integration tests of several Autojoin crates.
//!
//! # Usage
//!
//! ```toml
//! [dev-dependencies]
//! autojoin-test.workspace = true
//! ```
//!
//! ```rust,ignore
//! use autojoin_test::{MockHost, ScriptedExtension, test_store};
//!
//! #[tokio::test]
//! async fn runs_extension() {
//!     let ext = ScriptedExtension::new("clock");
//!     let mut catalog = ExtensionCatalog::new();
//!     catalog.register("clock", ext.factory()).unwrap();
//!
//!     let mut host = ExtensionHost::new(test_store(&["clock"], []), catalog);
//!     let report = host.start(&MockHost::new().objects()).await.unwrap();
//!     assert!(report.is_success());
//! }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]

pub mod fixtures;
pub mod mocks;
pub mod scripted;

pub use fixtures::*;
pub use mocks::*;
pub use scripted::*;
