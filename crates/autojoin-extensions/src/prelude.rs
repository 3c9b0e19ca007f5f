//! Common imports for writing and hosting extensions.
//!
//! `use autojoin_extensions::prelude::*;`

pub use crate::{Extension, ExtensionContext, GrantedObjects, HookError, HookResult, InitError, Preferences};

pub use crate::{ExtensionCatalog, ExtensionConfigStore, ExtensionError, ExtensionHost, HostObjects};

pub use crate::{HostWindow, MeetingEntry, MeetingListView, Menu, MenuBar, MenuItem};

pub use crate::{LifecycleReport, Phase, PhaseReport};
