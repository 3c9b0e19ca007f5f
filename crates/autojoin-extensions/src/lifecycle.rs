//! The extension host.
//!
//! [`ExtensionHost`] drives every enabled extension through load,
//! preference delivery, object delivery and run. Extensions and phases are
//! processed one at a time in declaration order. A failure is recorded for
//! that extension and phase and processing continues.

use std::sync::Arc;
use std::time::Instant;

use chrono::Utc;
use tracing::{Instrument, debug, error, info, info_span, warn};

use autojoin_config::{ExtensionConfigStore, ExtensionId};

use crate::broker::ObjectBroker;
use crate::catalog::ExtensionCatalog;
use crate::context::ExtensionContext;
use crate::error::{ExtensionError, ExtensionResult, HookResult, LoadError, UnitError};
use crate::extension::Extension;
use crate::host::HostObjects;
use crate::invoke::{catch_panic, run_hook};
use crate::phase::Phase;
use crate::registry::{ExtensionRegistry, ExtensionStatus, LoadedExtension};
use crate::report::{LifecycleReport, OutcomeStatus, PhaseReport, UnitOutcome};

/// Owns the configuration, catalog and registry for one session.
#[derive(Debug)]
pub struct ExtensionHost {
    config: ExtensionConfigStore,
    catalog: ExtensionCatalog,
    registry: ExtensionRegistry,
    loaded: bool,
}

impl ExtensionHost {
    /// Create a host. Nothing is loaded until [`load_all`](Self::load_all).
    #[must_use]
    pub fn new(config: ExtensionConfigStore, catalog: ExtensionCatalog) -> Self {
        Self {
            config,
            catalog,
            registry: ExtensionRegistry::new(),
            loaded: false,
        }
    }

    /// Session configuration.
    #[must_use]
    pub fn config(&self) -> &ExtensionConfigStore {
        &self.config
    }

    /// Registered factories.
    #[must_use]
    pub fn catalog(&self) -> &ExtensionCatalog {
        &self.catalog
    }

    /// Load outcomes.
    #[must_use]
    pub fn registry(&self) -> &ExtensionRegistry {
        &self.registry
    }

    /// Construct every enabled extension in declaration order.
    ///
    /// An invalid name, a name missing from the catalog, a factory error and
    /// a factory panic each mark that extension `Failed`; the remaining
    /// names still load.
    ///
    /// # Errors
    ///
    /// Returns [`ExtensionError::AlreadyLoaded`] on a second call. The
    /// registry is left as it was.
    pub fn load_all(&mut self) -> ExtensionResult<PhaseReport> {
        if self.loaded {
            return Err(ExtensionError::AlreadyLoaded);
        }
        self.loaded = true;

        let span = info_span!("extensions", phase = %Phase::Load);
        let _guard = span.enter();

        let mut report = PhaseReport::new(Phase::Load);
        let names = self.config.enabled_units().to_vec();
        info!(count = names.len(), "Loading extensions");

        for id in names {
            let started_at = Utc::now();
            let clock = Instant::now();
            let entry = match self.construct(&id) {
                Ok(handle) => {
                    debug!(extension = %id, kind = handle.type_name(), "Extension loaded");
                    LoadedExtension::loaded(id.clone(), handle)
                },
                Err(e) => {
                    error!(extension = %id, phase = %Phase::Load, error = %e, "Extension failed to load");
                    LoadedExtension::failed(id.clone(), e)
                },
            };

            let status = match entry.status() {
                ExtensionStatus::Loaded => OutcomeStatus::Succeeded,
                ExtensionStatus::Failed(e) => OutcomeStatus::Failed(e.clone().into()),
            };
            self.registry.insert(entry)?;
            report.push(UnitOutcome {
                extension: id,
                phase: Phase::Load,
                started_at,
                duration_ms: elapsed_ms(clock),
                status,
            });
        }

        log_phase(&report);
        Ok(report)
    }

    fn construct(&self, id: &ExtensionId) -> Result<Arc<dyn Extension>, LoadError> {
        if let Some(reason) = self.config.invalid_name(id) {
            return Err(LoadError::InvalidName {
                id: id.clone(),
                reason: reason.to_owned(),
            });
        }
        let factory = self
            .catalog
            .get(id)
            .ok_or_else(|| LoadError::NotRegistered(id.clone()))?;
        let ctx = ExtensionContext::new(id.clone(), self.config.search_root());

        match catch_panic(|| factory.create(&ctx)) {
            Ok(Ok(handle)) => Ok(handle),
            Ok(Err(e)) => Err(LoadError::InitFailed {
                id: id.clone(),
                message: e.to_string(),
            }),
            Err(message) => Err(LoadError::Panicked {
                id: id.clone(),
                message,
            }),
        }
    }

    /// Hand each loaded extension its own preferences.
    pub async fn deliver_preferences(&self) -> PhaseReport {
        self.each_active(Phase::Preferences, |id, ext| {
            let prefs = self.config.preferences(id);
            debug!(extension = %id, keys = prefs.len(), "Delivering preferences");
            async move { ext.deliver_preferences(prefs).await }
        })
        .await
    }

    /// Hand each loaded extension the host objects it was granted.
    pub async fn deliver_objects(&self, objects: &HostObjects) -> PhaseReport {
        let broker = ObjectBroker::new(objects);
        self.each_active(Phase::Objects, |id, ext| {
            let granted = broker.grant(self.config.permissions(id));
            debug!(extension = %id, granted = %granted.granted(), "Delivering host objects");
            async move { ext.deliver_objects(granted).await }
        })
        .await
    }

    /// Invoke each loaded extension's entry point.
    pub async fn run_all(&self) -> PhaseReport {
        self.each_active(Phase::Run, |_, ext| async move { ext.run().await })
            .await
    }

    /// Load, then deliver preferences, then deliver objects, then run.
    ///
    /// # Errors
    ///
    /// Returns [`ExtensionError::AlreadyLoaded`] if this host was already
    /// started or loaded.
    pub async fn start(&mut self, objects: &HostObjects) -> ExtensionResult<LifecycleReport> {
        let load = self.load_all()?;
        let preferences = self.deliver_preferences().await;
        let objects = self.deliver_objects(objects).await;
        let run = self.run_all().await;

        let report = LifecycleReport {
            load,
            preferences,
            objects,
            run,
        };
        info!(
            success = report.is_success(),
            failures = report.failure_count(),
            "Extension startup finished"
        );
        Ok(report)
    }

    /// Invoke one hook for every loaded extension, in order.
    async fn each_active<F, Fut>(&self, phase: Phase, mut make_call: F) -> PhaseReport
    where
        F: FnMut(&ExtensionId, Arc<dyn Extension>) -> Fut,
        Fut: Future<Output = HookResult> + Send + 'static,
    {
        let mut report = PhaseReport::new(phase);
        let limit = self.config.hook_timeout();

        for (id, ext) in self.registry.active() {
            let span = info_span!("extension_hook", extension = %id, phase = %phase);
            let started_at = Utc::now();
            let clock = Instant::now();

            let call = make_call(id, Arc::clone(ext)).instrument(span.clone());
            let status = match run_hook(limit, call).instrument(span).await {
                Ok(()) => OutcomeStatus::Succeeded,
                Err(e) => {
                    error!(extension = %id, phase = %phase, error = %e, "Extension hook failed");
                    OutcomeStatus::Failed(UnitError::Hook(e))
                },
            };

            report.push(UnitOutcome {
                extension: id.clone(),
                phase,
                started_at,
                duration_ms: elapsed_ms(clock),
                status,
            });
        }

        log_phase(&report);
        report
    }
}

fn elapsed_ms(clock: Instant) -> u64 {
    u64::try_from(clock.elapsed().as_millis()).unwrap_or(u64::MAX)
}

fn log_phase(report: &PhaseReport) {
    let failed = report.failures().count();
    if failed == 0 {
        info!(phase = %report.phase, attempted = report.outcomes.len(), "Phase complete");
    } else {
        warn!(
            phase = %report.phase,
            attempted = report.outcomes.len(),
            failed,
            "Phase complete with failures"
        );
    }
}
