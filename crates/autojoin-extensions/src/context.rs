use std::path::{Path, PathBuf};

use autojoin_config::ExtensionId;

/// What a factory knows about the extension it is building.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtensionContext {
    /// The extension's name.
    pub id: ExtensionId,
    /// The session-wide extension search root.
    pub search_root: PathBuf,
}

impl ExtensionContext {
    /// Create a context for `id` under `search_root`.
    pub fn new(id: ExtensionId, search_root: impl Into<PathBuf>) -> Self {
        Self {
            id,
            search_root: search_root.into(),
        }
    }

    /// Directory reserved for this extension's own files: `<search_root>/<id>`.
    ///
    /// The host does not create it.
    #[must_use]
    pub fn data_dir(&self) -> PathBuf {
        self.search_root.join(self.id.as_str())
    }

    /// The search root.
    #[must_use]
    pub fn search_root(&self) -> &Path {
        &self.search_root
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn data_dir_is_under_search_root() {
        let ctx = ExtensionContext::new(ExtensionId::from_static("clock"), "/opt/autojoin/extensions");
        assert_eq!(ctx.data_dir(), Path::new("/opt/autojoin/extensions/clock"));
        assert_eq!(ctx.search_root(), Path::new("/opt/autojoin/extensions"));
    }
}
