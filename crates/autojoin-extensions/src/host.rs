//! Host resources that extensions may be granted.
//!
//! The GUI owns the concrete window, menu bar and meeting list. It hands the
//! host one shared handle to each through [`HostObjects`]; the broker then
//! gives each extension clones of exactly the handles it was granted.
//!
//! All methods take `&self`. Implementations synchronize internally because
//! a handle may be held by several extensions at once.

use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The main application window.
pub trait HostWindow: Send + Sync {
    /// Current window title.
    fn title(&self) -> String;

    /// Replace the window title.
    fn set_title(&self, title: &str);

    /// Ask the window to close. The host decides whether to honor it.
    fn request_close(&self);
}

/// The application menu bar.
pub trait MenuBar: Send + Sync {
    /// Append a top-level menu.
    fn add_menu(&self, menu: Menu);

    /// Snapshot of the current menus, in insertion order.
    fn menus(&self) -> Vec<Menu>;
}

/// The list of upcoming meetings shown in the main window.
pub trait MeetingListView: Send + Sync {
    /// Snapshot of the meetings currently listed.
    fn meetings(&self) -> Vec<MeetingEntry>;

    /// Ask the view to reload its rows.
    fn refresh(&self);
}

impl fmt::Debug for dyn HostWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HostWindow").field("title", &self.title()).finish()
    }
}

impl fmt::Debug for dyn MenuBar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MenuBar").field("menus", &self.menus().len()).finish()
    }
}

impl fmt::Debug for dyn MeetingListView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MeetingListView")
            .field("meetings", &self.meetings().len())
            .finish()
    }
}

/// A top-level menu.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Menu {
    /// Text shown in the menu bar.
    pub label: String,
    /// Entries in display order.
    pub items: Vec<MenuItem>,
}

impl Menu {
    /// Create an empty menu.
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            items: Vec::new(),
        }
    }

    /// Append an item.
    #[must_use]
    pub fn with_item(mut self, item: MenuItem) -> Self {
        self.items.push(item);
        self
    }
}

/// A single menu entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuItem {
    /// Text shown for the entry.
    pub label: String,
    /// Optional keyboard shortcut, e.g. `Ctrl+E`.
    pub accelerator: Option<String>,
}

impl MenuItem {
    /// Create an item without a shortcut.
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            accelerator: None,
        }
    }

    /// Set the keyboard shortcut.
    #[must_use]
    pub fn with_accelerator(mut self, accelerator: impl Into<String>) -> Self {
        self.accelerator = Some(accelerator.into());
        self
    }
}

/// One row of the meeting list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeetingEntry {
    /// Row identifier assigned by the host.
    pub id: u64,
    /// Conferencing provider, e.g. `zoom`.
    pub provider: String,
    /// Provider-specific meeting identifier.
    pub meeting_id: String,
    /// When the host will join.
    pub scheduled_at: DateTime<Utc>,
}

/// The three live host resources, supplied once per session.
#[derive(Debug, Clone)]
pub struct HostObjects {
    /// Main window.
    pub host_window: Arc<dyn HostWindow>,
    /// Menu bar.
    pub menu_bar: Arc<dyn MenuBar>,
    /// Meeting list.
    pub meeting_list_view: Arc<dyn MeetingListView>,
}

impl HostObjects {
    /// Bundle the host resources.
    pub fn new(
        host_window: Arc<dyn HostWindow>,
        menu_bar: Arc<dyn MenuBar>,
        meeting_list_view: Arc<dyn MeetingListView>,
    ) -> Self {
        Self {
            host_window,
            menu_bar,
            meeting_list_view,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn menu_builder_keeps_item_order() {
        let menu = Menu::new("Extensions")
            .with_item(MenuItem::new("First"))
            .with_item(MenuItem::new("Second").with_accelerator("Ctrl+2"));

        assert_eq!(menu.label, "Extensions");
        let labels: Vec<&str> = menu.items.iter().map(|i| i.label.as_str()).collect();
        assert_eq!(labels, ["First", "Second"]);
        assert_eq!(menu.items[0].accelerator, None);
        assert_eq!(menu.items[1].accelerator.as_deref(), Some("Ctrl+2"));
    }

    #[test]
    fn meeting_entry_serializes_timestamp() {
        let entry = MeetingEntry {
            id: 7,
            provider: "zoom".into(),
            meeting_id: "123-456".into(),
            scheduled_at: DateTime::from_timestamp(0, 0).unwrap(),
        };
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["provider"], "zoom");
        assert_eq!(json["scheduled_at"], "1970-01-01T00:00:00Z");
    }
}
