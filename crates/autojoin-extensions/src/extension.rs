//! The extension trait.

use std::fmt;

use async_trait::async_trait;
use autojoin_config::Preferences;

use crate::broker::GrantedObjects;
use crate::error::{HookError, HookResult};
use crate::phase::Phase;

/// A unit of optional behavior driven by the [`ExtensionHost`](crate::ExtensionHost).
///
/// After construction the host calls, in order, [`deliver_preferences`],
/// [`deliver_objects`] and [`run`]. [`ExtensionHost::start`] calls each
/// once; a caller driving the phases by hand decides how often each runs.
/// Every hook is optional: the default implementation reports
/// [`HookError::Missing`], which the host records as a failure of that
/// phase only.
///
/// Hooks run on a spawned task under a timeout. A timed-out hook is aborted
/// and the host waits for it to stop before moving on. A hook that blocks
/// its thread without yielding cannot be interrupted and may keep running
/// while later hooks execute.
///
/// [`ExtensionHost::start`]: crate::ExtensionHost::start
///
/// [`deliver_preferences`]: Extension::deliver_preferences
/// [`deliver_objects`]: Extension::deliver_objects
/// [`run`]: Extension::run
#[async_trait]
pub trait Extension: Send + Sync + 'static {
    /// Human-readable type name for diagnostics.
    fn type_name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }

    /// Receive this extension's own preferences.
    async fn deliver_preferences(&self, _prefs: Preferences) -> HookResult {
        Err(HookError::Missing(Phase::Preferences))
    }

    /// Receive the host objects this extension was granted.
    async fn deliver_objects(&self, _objects: GrantedObjects) -> HookResult {
        Err(HookError::Missing(Phase::Objects))
    }

    /// Entry point, called after delivery.
    async fn run(&self) -> HookResult {
        Err(HookError::Missing(Phase::Run))
    }
}

impl fmt::Debug for dyn Extension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Extension")
            .field("type", &self.type_name())
            .finish_non_exhaustive()
    }
}
