//! Host capabilities an extension may be granted.
//!
//! The set is closed: the host exposes exactly three shared resources and
//! extensions are granted access to each one individually in their profile
//! section.

use std::fmt;
use std::str::FromStr;

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

/// One of the three shared host resources.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Capability {
    /// The main application window.
    HostWindow,
    /// The application menu bar.
    MenuBar,
    /// The scheduled-meeting list view.
    MeetingListView,
}

impl Capability {
    /// All capabilities, in delivery order.
    pub const ALL: [Self; 3] = [Self::HostWindow, Self::MenuBar, Self::MeetingListView];

    /// The profile key naming this capability.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::HostWindow => "host_window",
            Self::MenuBar => "menu_bar",
            Self::MeetingListView => "meeting_list_view",
        }
    }

    /// The single-bit set for this capability.
    #[must_use]
    pub const fn flag(self) -> CapabilitySet {
        match self {
            Self::HostWindow => CapabilitySet::HOST_WINDOW,
            Self::MenuBar => CapabilitySet::MENU_BAR,
            Self::MeetingListView => CapabilitySet::MEETING_LIST_VIEW,
        }
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Capability {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "host_window" => Ok(Self::HostWindow),
            "menu_bar" => Ok(Self::MenuBar),
            "meeting_list_view" => Ok(Self::MeetingListView),
            other => Err(format!("unknown capability '{other}'")),
        }
    }
}

bitflags! {
    /// A set of granted capabilities.
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub struct CapabilitySet: u8 {
        const HOST_WINDOW = 1 << 0;
        const MENU_BAR = 1 << 1;
        const MEETING_LIST_VIEW = 1 << 2;

        const ALL = Self::HOST_WINDOW.bits() | Self::MENU_BAR.bits() | Self::MEETING_LIST_VIEW.bits();
    }
}

impl CapabilitySet {
    /// Whether `capability` is granted.
    #[must_use]
    pub const fn grants(self, capability: Capability) -> bool {
        self.contains(capability.flag())
    }

    /// Granted capabilities in delivery order.
    pub fn iter_capabilities(self) -> impl Iterator<Item = Capability> {
        Capability::ALL.into_iter().filter(move |c| self.grants(*c))
    }
}

impl From<Capability> for CapabilitySet {
    fn from(capability: Capability) -> Self {
        capability.flag()
    }
}

impl FromIterator<Capability> for CapabilitySet {
    fn from_iter<I: IntoIterator<Item = Capability>>(iter: I) -> Self {
        iter.into_iter()
            .fold(Self::empty(), |acc, c| acc | c.flag())
    }
}

impl fmt::Display for CapabilitySet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("none");
        }
        let names: Vec<&str> = self.iter_capabilities().map(Capability::as_str).collect();
        f.write_str(&names.join(", "))
    }
}
