//! Host resources for running without a GUI.
//!
//! Every change an extension makes is kept in memory and logged so a
//! headless run shows what the extensions would have done to the window.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::info;

use autojoin_extensions::{HostObjects, HostWindow, MeetingEntry, MeetingListView, Menu, MenuBar};

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

#[derive(Debug)]
pub(crate) struct HeadlessWindow {
    title: Mutex<String>,
}

impl HostWindow for HeadlessWindow {
    fn title(&self) -> String {
        lock(&self.title).clone()
    }

    fn set_title(&self, title: &str) {
        info!(title, "Window title changed");
        title.clone_into(&mut lock(&self.title));
    }

    fn request_close(&self) {
        info!("Window close requested");
    }
}

#[derive(Debug, Default)]
pub(crate) struct HeadlessMenuBar {
    menus: Mutex<Vec<Menu>>,
}

impl MenuBar for HeadlessMenuBar {
    fn add_menu(&self, menu: Menu) {
        info!(label = %menu.label, items = menu.items.len(), "Menu added");
        lock(&self.menus).push(menu);
    }

    fn menus(&self) -> Vec<Menu> {
        lock(&self.menus).clone()
    }
}

#[derive(Debug, Default)]
pub(crate) struct HeadlessMeetingList {
    meetings: Mutex<Vec<MeetingEntry>>,
}

impl MeetingListView for HeadlessMeetingList {
    fn meetings(&self) -> Vec<MeetingEntry> {
        lock(&self.meetings).clone()
    }

    fn refresh(&self) {
        info!(count = lock(&self.meetings).len(), "Meeting list refreshed");
    }
}

/// Fresh headless resources with an `Autojoin` window and no meetings.
pub(crate) fn headless_objects() -> HostObjects {
    HostObjects::new(
        Arc::new(HeadlessWindow {
            title: Mutex::new("Autojoin".to_owned()),
        }),
        Arc::new(HeadlessMenuBar::default()),
        Arc::new(HeadlessMeetingList::default()),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use autojoin_extensions::MenuItem;

    #[test]
    fn resources_keep_state() {
        let objects = headless_objects();
        objects.host_window.set_title("Meetings");
        assert_eq!(objects.host_window.title(), "Meetings");

        objects
            .menu_bar
            .add_menu(Menu::new("Extensions").with_item(MenuItem::new("Extension Father")));
        assert_eq!(objects.menu_bar.menus().len(), 1);
        assert!(objects.meeting_list_view.meetings().is_empty());
    }
}
