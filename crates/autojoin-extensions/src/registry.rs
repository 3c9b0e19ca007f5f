//! Registry of load outcomes.
//!
//! Filled once by [`ExtensionHost::load_all`](crate::ExtensionHost::load_all)
//! in declaration order and read by every later phase. Entries are never
//! removed or replaced.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::info;

use autojoin_config::ExtensionId;

use crate::error::{ExtensionError, ExtensionResult, LoadError};
use crate::extension::Extension;

/// Load outcome of one extension.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtensionStatus {
    /// Constructed and taking part in later phases.
    Loaded,
    /// Excluded from every later phase.
    Failed(LoadError),
}

impl ExtensionStatus {
    /// Whether the extension loaded.
    #[must_use]
    pub fn is_loaded(&self) -> bool {
        matches!(self, Self::Loaded)
    }
}

/// A registry entry.
#[derive(Debug, Clone)]
pub struct LoadedExtension {
    id: ExtensionId,
    handle: Option<Arc<dyn Extension>>,
    status: ExtensionStatus,
}

impl LoadedExtension {
    pub(crate) fn loaded(id: ExtensionId, handle: Arc<dyn Extension>) -> Self {
        Self {
            id,
            handle: Some(handle),
            status: ExtensionStatus::Loaded,
        }
    }

    pub(crate) fn failed(id: ExtensionId, error: LoadError) -> Self {
        Self {
            id,
            handle: None,
            status: ExtensionStatus::Failed(error),
        }
    }

    /// The extension's name.
    #[must_use]
    pub fn id(&self) -> &ExtensionId {
        &self.id
    }

    /// The live instance; `None` when loading failed.
    #[must_use]
    pub fn handle(&self) -> Option<&Arc<dyn Extension>> {
        self.handle.as_ref()
    }

    /// Load outcome.
    #[must_use]
    pub fn status(&self) -> &ExtensionStatus {
        &self.status
    }
}

/// Ordered registry of extensions attempted in this session.
#[derive(Debug, Default)]
pub struct ExtensionRegistry {
    entries: Vec<LoadedExtension>,
    index: HashMap<ExtensionId, usize>,
}

impl ExtensionRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry.
    ///
    /// # Errors
    ///
    /// Returns [`ExtensionError::DuplicateEntry`] if the name is already
    /// present. The existing entry is kept.
    pub(crate) fn insert(&mut self, entry: LoadedExtension) -> ExtensionResult<()> {
        if self.index.contains_key(&entry.id) {
            return Err(ExtensionError::DuplicateEntry(entry.id));
        }
        info!(
            extension = %entry.id,
            loaded = entry.status.is_loaded(),
            "Recorded extension"
        );
        self.index.insert(entry.id.clone(), self.entries.len());
        self.entries.push(entry);
        Ok(())
    }

    /// The entry for `id`.
    #[must_use]
    pub fn get(&self, id: &ExtensionId) -> Option<&LoadedExtension> {
        self.index.get(id).and_then(|&i| self.entries.get(i))
    }

    /// The load outcome for `id`.
    #[must_use]
    pub fn status(&self, id: &ExtensionId) -> Option<&ExtensionStatus> {
        self.get(id).map(LoadedExtension::status)
    }

    /// All entries in declaration order.
    #[must_use]
    pub fn entries(&self) -> &[LoadedExtension] {
        &self.entries
    }

    /// Loaded extensions in declaration order.
    pub fn active(&self) -> impl Iterator<Item = (&ExtensionId, &Arc<dyn Extension>)> {
        self.entries
            .iter()
            .filter_map(|e| e.handle.as_ref().map(|h| (&e.id, h)))
    }

    /// Names of loaded extensions in declaration order.
    #[must_use]
    pub fn active_ids(&self) -> Vec<&ExtensionId> {
        self.active().map(|(id, _)| id).collect()
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
