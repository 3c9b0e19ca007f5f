//! Extension catalog.
//!
//! Maps extension names to the factories that build them. The host only
//! loads names that are both enabled in the profile and present here.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use tracing::debug;

use autojoin_config::ExtensionId;

use crate::context::ExtensionContext;
use crate::error::{ExtensionError, ExtensionResult, InitError};
use crate::extension::Extension;

/// Builds one extension instance.
pub trait ExtensionFactory: Send + Sync {
    /// Construct the extension.
    ///
    /// # Errors
    ///
    /// Returns an [`InitError`] if the extension cannot start. The host
    /// records the unit as failed and moves on.
    fn create(&self, ctx: &ExtensionContext) -> Result<Arc<dyn Extension>, InitError>;
}

impl<F> ExtensionFactory for F
where
    F: Fn(&ExtensionContext) -> Result<Arc<dyn Extension>, InitError> + Send + Sync,
{
    fn create(&self, ctx: &ExtensionContext) -> Result<Arc<dyn Extension>, InitError> {
        self(ctx)
    }
}

/// Registration table of known extensions.
#[derive(Default)]
pub struct ExtensionCatalog {
    factories: BTreeMap<ExtensionId, Box<dyn ExtensionFactory>>,
}

impl ExtensionCatalog {
    /// Create an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a factory under `name`.
    ///
    /// # Errors
    ///
    /// Returns [`ExtensionError::InvalidId`] if `name` is not a valid
    /// extension name, or [`ExtensionError::AlreadyRegistered`] if the name
    /// is taken.
    pub fn register<F>(&mut self, name: &str, factory: F) -> ExtensionResult<()>
    where
        F: ExtensionFactory + 'static,
    {
        let id = ExtensionId::new(name)?;
        if self.factories.contains_key(&id) {
            return Err(ExtensionError::AlreadyRegistered(id));
        }
        debug!(extension = %id, "Registered extension factory");
        self.factories.insert(id, Box::new(factory));
        Ok(())
    }

    /// Register a type whose [`Default`] value is the extension.
    ///
    /// # Errors
    ///
    /// Same as [`register`](Self::register).
    pub fn register_default<E>(&mut self, name: &str) -> ExtensionResult<()>
    where
        E: Extension + Default,
    {
        self.register(
            name,
            |_: &ExtensionContext| -> Result<Arc<dyn Extension>, InitError> {
                Ok(Arc::new(E::default()))
            },
        )
    }

    /// The factory registered under `id`.
    #[must_use]
    pub fn get(&self, id: &ExtensionId) -> Option<&dyn ExtensionFactory> {
        self.factories.get(id).map(AsRef::as_ref)
    }

    /// Whether `id` has a factory.
    #[must_use]
    pub fn contains(&self, id: &ExtensionId) -> bool {
        self.factories.contains_key(id)
    }

    /// Registered names, sorted.
    pub fn ids(&self) -> impl Iterator<Item = &ExtensionId> {
        self.factories.keys()
    }

    /// Number of registered factories.
    #[must_use]
    pub fn len(&self) -> usize {
        self.factories.len()
    }

    /// Whether the catalog is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }
}

impl fmt::Debug for ExtensionCatalog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExtensionCatalog")
            .field("ids", &self.factories.keys().collect::<Vec<_>>())
            .finish()
    }
}
