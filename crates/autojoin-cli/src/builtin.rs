//! Extensions compiled into the `autojoin` binary.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use tracing::info;

use autojoin_extensions::ExtensionResult;
use autojoin_extensions::prelude::*;

/// Name of the menu added by [`ExtensionFather`] unless overridden.
pub(crate) const DEFAULT_MENU_LABEL: &str = "Extensions";

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Catalog of every built-in extension.
pub(crate) fn builtin_catalog() -> ExtensionResult<ExtensionCatalog> {
    let mut catalog = ExtensionCatalog::new();
    catalog.register_default::<ExtensionFather>("extension-father")?;
    catalog.register_default::<MeetingCount>("meeting-count")?;
    Ok(catalog)
}

/// Adds an `Extensions` menu listing itself.
///
/// Preferences: `menu_label` renames the menu, `accelerator` sets the
/// item's shortcut.
#[derive(Debug, Default)]
pub(crate) struct ExtensionFather {
    menu_bar: Mutex<Option<Arc<dyn MenuBar>>>,
    prefs: Mutex<Preferences>,
}

#[async_trait]
impl Extension for ExtensionFather {
    async fn deliver_preferences(&self, prefs: Preferences) -> HookResult {
        *lock(&self.prefs) = prefs;
        Ok(())
    }

    async fn deliver_objects(&self, objects: GrantedObjects) -> HookResult {
        *lock(&self.menu_bar) = objects.menu_bar;
        Ok(())
    }

    async fn run(&self) -> HookResult {
        let menu_bar = lock(&self.menu_bar)
            .clone()
            .ok_or_else(|| HookError::failed("menu_bar was not granted"))?;

        let (label, accelerator) = {
            let prefs = lock(&self.prefs);
            (
                prefs
                    .get("menu_label")
                    .cloned()
                    .unwrap_or_else(|| DEFAULT_MENU_LABEL.to_owned()),
                prefs.get("accelerator").cloned(),
            )
        };

        let mut item = MenuItem::new("Extension Father");
        if let Some(accelerator) = accelerator {
            item = item.with_accelerator(accelerator);
        }
        menu_bar.add_menu(Menu::new(label).with_item(item));
        Ok(())
    }
}

/// Logs how many meetings the list view shows.
#[derive(Debug, Default)]
pub(crate) struct MeetingCount {
    meetings: Mutex<Option<Arc<dyn MeetingListView>>>,
}

#[async_trait]
impl Extension for MeetingCount {
    async fn deliver_preferences(&self, _prefs: Preferences) -> HookResult {
        Ok(())
    }

    async fn deliver_objects(&self, objects: GrantedObjects) -> HookResult {
        *lock(&self.meetings) = objects.meeting_list_view;
        Ok(())
    }

    async fn run(&self) -> HookResult {
        let list = lock(&self.meetings)
            .clone()
            .ok_or_else(|| HookError::failed("meeting_list_view was not granted"))?;
        let meetings = list.meetings();
        info!(count = meetings.len(), "Meetings scheduled");
        Ok(())
    }
}
