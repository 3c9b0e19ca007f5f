//! Extensions with scripted hook behavior.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

use autojoin_config::Preferences;
use autojoin_extensions::{
    Extension, ExtensionContext, ExtensionFactory, GrantedObjects, HookError, HookResult,
    InitError, Phase,
};

use crate::mocks::lock;

/// What a scripted hook does when called.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HookBehavior {
    /// Return `Ok(())`.
    Succeed,
    /// Return [`HookError::Failed`] with this message.
    Fail(String),
    /// Panic with this message.
    Panic(String),
    /// Behave as if the hook were not implemented.
    Missing,
    /// Sleep for this long, then succeed.
    Sleep(Duration),
}

/// One observed hook call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HookCall {
    /// Extension that was called.
    pub extension: String,
    /// Hook that was called.
    pub phase: Phase,
}

/// Call log shared between several scripted extensions.
#[derive(Debug, Clone, Default)]
pub struct CallLog(Arc<Mutex<Vec<HookCall>>>);

impl CallLog {
    /// Create an empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn record(&self, extension: &str, phase: Phase) {
        lock(&self.0).push(HookCall {
            extension: extension.to_owned(),
            phase,
        });
    }

    /// Every call, in order.
    #[must_use]
    pub fn calls(&self) -> Vec<HookCall> {
        lock(&self.0).clone()
    }

    /// `(extension, phase)` pairs, in order.
    #[must_use]
    pub fn sequence(&self) -> Vec<(String, Phase)> {
        self.calls()
            .into_iter()
            .map(|c| (c.extension, c.phase))
            .collect()
    }

    /// Extensions called for `phase`, in order.
    #[must_use]
    pub fn called_in(&self, phase: Phase) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter(|c| c.phase == phase)
            .map(|c| c.extension)
            .collect()
    }
}

/// An extension that records every call and what it received.
///
/// Clones share state, so a test keeps one clone for inspection while the
/// host owns another.
#[derive(Debug, Clone)]
pub struct ScriptedExtension {
    name: String,
    log: CallLog,
    behaviors: HashMap<Phase, HookBehavior>,
    preferences: Arc<Mutex<Option<Preferences>>>,
    objects: Arc<Mutex<Option<GrantedObjects>>>,
    contexts: Arc<Mutex<Vec<ExtensionContext>>>,
}

impl ScriptedExtension {
    /// An extension whose hooks all succeed, with its own call log.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_log(name, CallLog::new())
    }

    /// An extension writing into a shared call log.
    #[must_use]
    pub fn with_log(name: impl Into<String>, log: CallLog) -> Self {
        Self {
            name: name.into(),
            log,
            behaviors: HashMap::new(),
            preferences: Arc::new(Mutex::new(None)),
            objects: Arc::new(Mutex::new(None)),
            contexts: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Script the hook for `phase`.
    #[must_use]
    pub fn on(mut self, phase: Phase, behavior: HookBehavior) -> Self {
        self.behaviors.insert(phase, behavior);
        self
    }

    /// Make the hook for `phase` fail with `message`.
    #[must_use]
    pub fn failing(self, phase: Phase, message: &str) -> Self {
        self.on(phase, HookBehavior::Fail(message.to_owned()))
    }

    /// Make the hook for `phase` panic with `message`.
    #[must_use]
    pub fn panicking(self, phase: Phase, message: &str) -> Self {
        self.on(phase, HookBehavior::Panic(message.to_owned()))
    }

    /// Leave the hook for `phase` unimplemented.
    #[must_use]
    pub fn without(self, phase: Phase) -> Self {
        self.on(phase, HookBehavior::Missing)
    }

    /// The shared call log.
    #[must_use]
    pub fn log(&self) -> &CallLog {
        &self.log
    }

    /// Preferences received, if the hook was called.
    #[must_use]
    pub fn received_preferences(&self) -> Option<Preferences> {
        lock(&self.preferences).clone()
    }

    /// Objects received, if the hook was called.
    #[must_use]
    pub fn received_objects(&self) -> Option<GrantedObjects> {
        lock(&self.objects).clone()
    }

    /// Contexts passed to the factory, one per construction.
    #[must_use]
    pub fn contexts(&self) -> Vec<ExtensionContext> {
        lock(&self.contexts).clone()
    }

    /// A factory that records its context and returns a clone of `self`.
    #[must_use]
    pub fn factory(&self) -> impl ExtensionFactory + 'static {
        let ext = self.clone();
        move |ctx: &ExtensionContext| -> Result<Arc<dyn Extension>, InitError> {
            lock(&ext.contexts).push(ctx.clone());
            Ok(Arc::new(ext.clone()))
        }
    }

    async fn act(&self, phase: Phase) -> HookResult {
        self.log.record(&self.name, phase);
        match self.behaviors.get(&phase).cloned().unwrap_or(HookBehavior::Succeed) {
            HookBehavior::Succeed => Ok(()),
            HookBehavior::Fail(message) => Err(HookError::Failed(message)),
            HookBehavior::Panic(message) => panic!("{message}"),
            HookBehavior::Missing => Err(HookError::Missing(phase)),
            HookBehavior::Sleep(duration) => {
                tokio::time::sleep(duration).await;
                Ok(())
            },
        }
    }
}

#[async_trait]
impl Extension for ScriptedExtension {
    async fn deliver_preferences(&self, prefs: Preferences) -> HookResult {
        if self.behaviors.get(&Phase::Preferences) != Some(&HookBehavior::Missing) {
            *lock(&self.preferences) = Some(prefs);
        }
        self.act(Phase::Preferences).await
    }

    async fn deliver_objects(&self, objects: GrantedObjects) -> HookResult {
        if self.behaviors.get(&Phase::Objects) != Some(&HookBehavior::Missing) {
            *lock(&self.objects) = Some(objects);
        }
        self.act(Phase::Objects).await
    }

    async fn run(&self) -> HookResult {
        self.act(Phase::Run).await
    }
}

/// A factory that always returns `message` as an initialization error.
#[must_use]
pub fn failing_factory(message: &str) -> impl ExtensionFactory + 'static {
    let message = message.to_owned();
    move |_: &ExtensionContext| -> Result<Arc<dyn Extension>, InitError> {
        Err(InitError::new(message.clone()))
    }
}

/// A factory that panics with `message`.
#[must_use]
pub fn panicking_factory(message: &str) -> impl ExtensionFactory + 'static {
    let message = message.to_owned();
    move |_: &ExtensionContext| -> Result<Arc<dyn Extension>, InitError> { panic!("{message}") }
}

/// An extension implementing no hooks at all.
#[derive(Debug, Default)]
pub struct BareExtension;

impl Extension for BareExtension {}
