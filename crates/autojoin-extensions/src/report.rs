//! Per-phase outcome reports.
//!
//! Every phase produces a [`PhaseReport`] with one [`UnitOutcome`] per
//! extension it attempted. [`PhaseReport::is_success`] is the aggregate
//! boolean; it is diagnostic only and never gates a later phase.

use chrono::{DateTime, Utc};
use serde::Serialize;

use autojoin_config::ExtensionId;

use crate::error::UnitError;
use crate::phase::Phase;

/// Result of one phase for one extension.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "error", rename_all = "snake_case")]
pub enum OutcomeStatus {
    /// The step completed.
    Succeeded,
    /// The step failed; only this extension and phase are affected.
    Failed(UnitError),
}

/// One extension's outcome in one phase.
#[derive(Debug, Clone, Serialize)]
pub struct UnitOutcome {
    /// The extension.
    pub extension: ExtensionId,
    /// The phase.
    pub phase: Phase,
    /// When the step started.
    pub started_at: DateTime<Utc>,
    /// Wall-clock duration in milliseconds.
    pub duration_ms: u64,
    /// What happened.
    #[serde(flatten)]
    pub status: OutcomeStatus,
}

impl UnitOutcome {
    /// Whether the step completed.
    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self.status, OutcomeStatus::Succeeded)
    }

    /// The failure, if any.
    #[must_use]
    pub fn error(&self) -> Option<&UnitError> {
        match &self.status {
            OutcomeStatus::Succeeded => None,
            OutcomeStatus::Failed(e) => Some(e),
        }
    }
}

/// Outcomes of one phase, in declaration order.
#[derive(Debug, Clone, Serialize)]
pub struct PhaseReport {
    /// The phase.
    pub phase: Phase,
    /// One entry per attempted extension.
    pub outcomes: Vec<UnitOutcome>,
}

impl PhaseReport {
    /// An empty report for `phase`.
    #[must_use]
    pub fn new(phase: Phase) -> Self {
        Self {
            phase,
            outcomes: Vec::new(),
        }
    }

    pub(crate) fn push(&mut self, outcome: UnitOutcome) {
        self.outcomes.push(outcome);
    }

    /// True iff every attempted extension succeeded. An empty phase succeeds.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.outcomes.iter().all(UnitOutcome::is_success)
    }

    /// The outcome for `id`, if it was attempted.
    #[must_use]
    pub fn outcome(&self, id: &ExtensionId) -> Option<&UnitOutcome> {
        self.outcomes.iter().find(|o| &o.extension == id)
    }

    /// Outcomes that failed.
    pub fn failures(&self) -> impl Iterator<Item = &UnitOutcome> {
        self.outcomes.iter().filter(|o| !o.is_success())
    }

    /// Extensions attempted, in order.
    pub fn attempted(&self) -> impl Iterator<Item = &ExtensionId> {
        self.outcomes.iter().map(|o| &o.extension)
    }
}

/// Reports for a full start sequence.
#[derive(Debug, Clone, Serialize)]
pub struct LifecycleReport {
    /// Load phase.
    pub load: PhaseReport,
    /// Preference delivery.
    pub preferences: PhaseReport,
    /// Object delivery.
    pub objects: PhaseReport,
    /// Run.
    pub run: PhaseReport,
}

impl LifecycleReport {
    /// The four phase reports in execution order.
    #[must_use]
    pub fn phases(&self) -> [&PhaseReport; 4] {
        [&self.load, &self.preferences, &self.objects, &self.run]
    }

    /// The report for `phase`.
    #[must_use]
    pub fn phase(&self, phase: Phase) -> &PhaseReport {
        match phase {
            Phase::Load => &self.load,
            Phase::Preferences => &self.preferences,
            Phase::Objects => &self.objects,
            Phase::Run => &self.run,
        }
    }

    /// Whether every phase succeeded for every extension.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.phases().iter().all(|p| p.is_success())
    }

    /// Number of failed steps across all phases.
    #[must_use]
    pub fn failure_count(&self) -> usize {
        self.phases().iter().map(|p| p.failures().count()).sum()
    }

    /// Per-phase outcome of one extension.
    #[must_use]
    pub fn unit_summary(&self, id: &ExtensionId) -> UnitSummary<'_> {
        UnitSummary {
            load: self.load.outcome(id),
            preferences: self.preferences.outcome(id),
            objects: self.objects.outcome(id),
            run: self.run.outcome(id),
        }
    }
}

/// One extension's view of a [`LifecycleReport`].
///
/// A phase is `None` when the extension was not attempted in it, which is
/// the case for every phase after a failed load.
#[derive(Debug, Clone, Copy)]
pub struct UnitSummary<'a> {
    /// Load outcome.
    pub load: Option<&'a UnitOutcome>,
    /// Preference delivery outcome.
    pub preferences: Option<&'a UnitOutcome>,
    /// Object delivery outcome.
    pub objects: Option<&'a UnitOutcome>,
    /// Run outcome.
    pub run: Option<&'a UnitOutcome>,
}

impl UnitSummary<'_> {
    /// Whether the extension loaded.
    #[must_use]
    pub fn loaded(&self) -> bool {
        self.load.is_some_and(UnitOutcome::is_success)
    }

    /// Whether `phase` was attempted and succeeded.
    #[must_use]
    pub fn succeeded(&self, phase: Phase) -> bool {
        let outcome = match phase {
            Phase::Load => self.load,
            Phase::Preferences => self.preferences,
            Phase::Objects => self.objects,
            Phase::Run => self.run,
        };
        outcome.is_some_and(UnitOutcome::is_success)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::HookError;

    fn outcome(name: &str, phase: Phase, status: OutcomeStatus) -> UnitOutcome {
        UnitOutcome {
            extension: ExtensionId::from_static(name),
            phase,
            started_at: Utc::now(),
            duration_ms: 1,
            status,
        }
    }

    #[test]
    fn empty_phase_is_success() {
        assert!(PhaseReport::new(Phase::Run).is_success());
    }

    #[test]
    fn one_failure_fails_aggregate() {
        let mut report = PhaseReport::new(Phase::Run);
        report.push(outcome("a", Phase::Run, OutcomeStatus::Succeeded));
        report.push(outcome(
            "b",
            Phase::Run,
            OutcomeStatus::Failed(HookError::failed("x").into()),
        ));

        assert!(!report.is_success());
        let failed: Vec<_> = report.failures().map(|o| o.extension.as_str()).collect();
        assert_eq!(failed, ["b"]);
        assert!(report.outcome(&ExtensionId::from_static("a")).unwrap().is_success());
    }

    #[test]
    fn outcome_serializes_flat() {
        let json = serde_json::to_value(outcome(
            "a",
            Phase::Objects,
            OutcomeStatus::Failed(HookError::Missing(Phase::Objects).into()),
        ))
        .unwrap();

        assert_eq!(json["extension"], "a");
        assert_eq!(json["phase"], "objects");
        assert_eq!(json["status"], "failed");
        assert_eq!(json["error"]["hook"]["missing"], "objects");
    }
}
