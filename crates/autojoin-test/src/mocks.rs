//! In-memory host resources.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use autojoin_extensions::{HostObjects, HostWindow, MeetingEntry, MeetingListView, Menu, MenuBar};

pub(crate) fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// A window that remembers its title and close requests.
#[derive(Debug)]
pub struct MockHostWindow {
    title: Mutex<String>,
    close_requested: AtomicBool,
}

impl MockHostWindow {
    /// Create a window with `title`.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: Mutex::new(title.into()),
            close_requested: AtomicBool::new(false),
        }
    }

    /// Whether an extension asked the window to close.
    #[must_use]
    pub fn close_requested(&self) -> bool {
        self.close_requested.load(Ordering::SeqCst)
    }
}

impl HostWindow for MockHostWindow {
    fn title(&self) -> String {
        lock(&self.title).clone()
    }

    fn set_title(&self, title: &str) {
        title.clone_into(&mut lock(&self.title));
    }

    fn request_close(&self) {
        self.close_requested.store(true, Ordering::SeqCst);
    }
}

/// A menu bar that records added menus.
#[derive(Debug, Default)]
pub struct MockMenuBar {
    menus: Mutex<Vec<Menu>>,
}

impl MockMenuBar {
    /// Create an empty menu bar.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Labels of the added menus, in order.
    #[must_use]
    pub fn labels(&self) -> Vec<String> {
        lock(&self.menus).iter().map(|m| m.label.clone()).collect()
    }
}

impl MenuBar for MockMenuBar {
    fn add_menu(&self, menu: Menu) {
        lock(&self.menus).push(menu);
    }

    fn menus(&self) -> Vec<Menu> {
        lock(&self.menus).clone()
    }
}

/// A meeting list with fixed rows that counts refreshes.
#[derive(Debug, Default)]
pub struct MockMeetingList {
    meetings: Mutex<Vec<MeetingEntry>>,
    refreshes: AtomicUsize,
}

impl MockMeetingList {
    /// Create a list showing `meetings`.
    #[must_use]
    pub fn new(meetings: Vec<MeetingEntry>) -> Self {
        Self {
            meetings: Mutex::new(meetings),
            refreshes: AtomicUsize::new(0),
        }
    }

    /// How many times `refresh` was called.
    #[must_use]
    pub fn refresh_count(&self) -> usize {
        self.refreshes.load(Ordering::SeqCst)
    }
}

impl MeetingListView for MockMeetingList {
    fn meetings(&self) -> Vec<MeetingEntry> {
        lock(&self.meetings).clone()
    }

    fn refresh(&self) {
        self.refreshes.fetch_add(1, Ordering::SeqCst);
    }
}

/// The three mock resources, kept with their concrete types for inspection.
#[derive(Debug, Clone)]
pub struct MockHost {
    /// Window.
    pub window: Arc<MockHostWindow>,
    /// Menu bar.
    pub menu_bar: Arc<MockMenuBar>,
    /// Meeting list.
    pub meetings: Arc<MockMeetingList>,
}

impl MockHost {
    /// A host with an `Autojoin` window, no menus and no meetings.
    #[must_use]
    pub fn new() -> Self {
        Self::with_meetings(Vec::new())
    }

    /// A host whose meeting list shows `meetings`.
    #[must_use]
    pub fn with_meetings(meetings: Vec<MeetingEntry>) -> Self {
        Self {
            window: Arc::new(MockHostWindow::new("Autojoin")),
            menu_bar: Arc::new(MockMenuBar::new()),
            meetings: Arc::new(MockMeetingList::new(meetings)),
        }
    }

    /// Trait-object handles sharing the same underlying mocks.
    #[must_use]
    pub fn objects(&self) -> HostObjects {
        HostObjects::new(
            Arc::clone(&self.window) as Arc<dyn HostWindow>,
            Arc::clone(&self.menu_bar) as Arc<dyn MenuBar>,
            Arc::clone(&self.meetings) as Arc<dyn MeetingListView>,
        )
    }
}

impl Default for MockHost {
    fn default() -> Self {
        Self::new()
    }
}
