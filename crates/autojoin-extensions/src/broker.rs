//! Capability-filtered views over the host objects.

use std::fmt;
use std::sync::Arc;

use autojoin_config::{Capability, CapabilitySet};

use crate::host::{HostObjects, HostWindow, MeetingListView, MenuBar};

/// The host objects one extension is allowed to touch.
///
/// Each slot holds a clone of the host's own handle when the matching
/// capability was granted, and `None` otherwise. A granted slot always
/// points at the same object the host supplied.
#[derive(Clone, Default)]
pub struct GrantedObjects {
    /// Main window, if `host_window` was granted.
    pub host_window: Option<Arc<dyn HostWindow>>,
    /// Menu bar, if `menu_bar` was granted.
    pub menu_bar: Option<Arc<dyn MenuBar>>,
    /// Meeting list, if `meeting_list_view` was granted.
    pub meeting_list_view: Option<Arc<dyn MeetingListView>>,
}

/// Positional form of [`GrantedObjects`]:
/// `(host_window, menu_bar, meeting_list_view)`.
pub type GrantedParts = (
    Option<Arc<dyn HostWindow>>,
    Option<Arc<dyn MenuBar>>,
    Option<Arc<dyn MeetingListView>>,
);

impl GrantedObjects {
    /// A bundle with every slot empty.
    #[must_use]
    pub fn none() -> Self {
        Self::default()
    }

    /// Split into the fixed-order triple.
    #[must_use]
    pub fn into_parts(self) -> GrantedParts {
        (self.host_window, self.menu_bar, self.meeting_list_view)
    }

    /// Capabilities whose slot is filled.
    #[must_use]
    pub fn granted(&self) -> CapabilitySet {
        let mut set = CapabilitySet::empty();
        set.set(CapabilitySet::HOST_WINDOW, self.host_window.is_some());
        set.set(CapabilitySet::MENU_BAR, self.menu_bar.is_some());
        set.set(CapabilitySet::MEETING_LIST_VIEW, self.meeting_list_view.is_some());
        set
    }
}

impl fmt::Debug for GrantedObjects {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GrantedObjects")
            .field("granted", &self.granted())
            .finish()
    }
}

/// Hands out [`GrantedObjects`] for a fixed set of host objects.
#[derive(Debug)]
pub struct ObjectBroker<'a> {
    objects: &'a HostObjects,
}

impl<'a> ObjectBroker<'a> {
    /// Broker over the session's host objects.
    #[must_use]
    pub fn new(objects: &'a HostObjects) -> Self {
        Self { objects }
    }

    /// Build the bundle for an extension holding `permissions`.
    #[must_use]
    pub fn grant(&self, permissions: CapabilitySet) -> GrantedObjects {
        let o = self.objects;
        GrantedObjects {
            host_window: permissions
                .grants(Capability::HostWindow)
                .then(|| Arc::clone(&o.host_window)),
            menu_bar: permissions
                .grants(Capability::MenuBar)
                .then(|| Arc::clone(&o.menu_bar)),
            meeting_list_view: permissions
                .grants(Capability::MeetingListView)
                .then(|| Arc::clone(&o.meeting_list_view)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::{Menu, MeetingEntry};

    struct Window;
    impl HostWindow for Window {
        fn title(&self) -> String {
            "Autojoin".into()
        }
        fn set_title(&self, _title: &str) {}
        fn request_close(&self) {}
    }

    struct Bar;
    impl MenuBar for Bar {
        fn add_menu(&self, _menu: Menu) {}
        fn menus(&self) -> Vec<Menu> {
            Vec::new()
        }
    }

    struct List;
    impl MeetingListView for List {
        fn meetings(&self) -> Vec<MeetingEntry> {
            Vec::new()
        }
        fn refresh(&self) {}
    }

    fn objects() -> HostObjects {
        HostObjects::new(Arc::new(Window), Arc::new(Bar), Arc::new(List))
    }

    #[test]
    fn grant_nothing() {
        let objects = objects();
        let granted = ObjectBroker::new(&objects).grant(CapabilitySet::empty());
        let (w, m, l) = granted.into_parts();
        assert!(w.is_none() && m.is_none() && l.is_none());
    }

    #[test]
    fn grant_subset_keeps_identity() {
        let objects = objects();
        let granted = ObjectBroker::new(&objects)
            .grant(CapabilitySet::HOST_WINDOW | CapabilitySet::MEETING_LIST_VIEW);

        assert_eq!(
            granted.granted(),
            CapabilitySet::HOST_WINDOW | CapabilitySet::MEETING_LIST_VIEW
        );
        let (w, m, l) = granted.into_parts();
        assert!(Arc::ptr_eq(&w.unwrap(), &objects.host_window));
        assert!(m.is_none());
        assert!(Arc::ptr_eq(&l.unwrap(), &objects.meeting_list_view));
    }

    #[test]
    fn grant_all() {
        let objects = objects();
        let granted = ObjectBroker::new(&objects).grant(CapabilitySet::ALL);
        assert_eq!(granted.granted(), CapabilitySet::ALL);
        assert!(Arc::ptr_eq(granted.menu_bar.as_ref().unwrap(), &objects.menu_bar));
    }
}
