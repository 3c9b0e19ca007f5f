//! Rendering of lifecycle reports.

use std::fmt::Write as _;

use clap::ValueEnum;
use serde::Serialize;

use autojoin_extensions::{LifecycleReport, OutcomeStatus, PhaseReport};

use crate::theme::Theme;

/// How command results are printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    /// Colored, human-readable text.
    Pretty,
    /// One JSON document on stdout.
    Json,
}

/// Serialize `value` as pretty JSON.
pub(crate) fn to_json<T: Serialize>(value: &T) -> anyhow::Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

/// Render a lifecycle report as text.
pub(crate) fn render_lifecycle(report: &LifecycleReport) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", Theme::header("Extension lifecycle"));
    let _ = writeln!(out, "{}", Theme::separator());
    for phase in report.phases() {
        render_phase(&mut out, phase);
    }
    let _ = writeln!(out, "{}", Theme::separator());

    let failures = report.failure_count();
    let summary = if failures == 0 {
        Theme::success("all extensions started")
    } else {
        Theme::warning(&format!("{failures} step(s) failed; see the log for details"))
    };
    let _ = writeln!(out, "{summary}");
    out
}

fn render_phase(out: &mut String, report: &PhaseReport) {
    let _ = writeln!(out, "{}", Theme::header(report.phase.as_str()));
    if report.outcomes.is_empty() {
        let _ = writeln!(out, "  {}", Theme::dimmed("(no extensions)"));
        return;
    }
    for outcome in &report.outcomes {
        let line = match &outcome.status {
            OutcomeStatus::Succeeded => Theme::success(&format!(
                "{} {}",
                outcome.extension,
                Theme::dimmed(&format!("({} ms)", outcome.duration_ms))
            )),
            OutcomeStatus::Failed(e) => Theme::error(&format!("{}: {e}", outcome.extension)),
        };
        let _ = writeln!(out, "  {line}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use autojoin_extensions::{ExtensionCatalog, ExtensionHost};
    use autojoin_test::{BareExtension, MockHost, ScriptedExtension, test_store};

    async fn sample_report() -> LifecycleReport {
        let mut catalog = ExtensionCatalog::new();
        catalog.register("good", ScriptedExtension::new("good").factory()).unwrap();
        catalog.register_default::<BareExtension>("bare").unwrap();
        let mut host = ExtensionHost::new(test_store(&["good", "bare"], []), catalog);
        host.start(&MockHost::new().objects()).await.unwrap()
    }

    #[tokio::test]
    async fn pretty_lists_every_phase_and_failure() {
        colored::control::set_override(false);
        let text = render_lifecycle(&sample_report().await);

        for phase in ["load", "preferences", "objects", "run"] {
            assert!(text.contains(phase), "missing {phase} in:\n{text}");
        }
        assert!(text.contains("bare: extension does not implement the run hook"));
        assert!(text.contains("3 step(s) failed"));
    }

    #[tokio::test]
    async fn json_is_machine_readable() {
        let json: serde_json::Value = serde_json::from_str(&to_json(&sample_report().await).unwrap()).unwrap();
        assert_eq!(json["load"]["phase"], "load");
        assert_eq!(json["run"]["outcomes"][1]["extension"], "bare");
        assert_eq!(json["run"]["outcomes"][1]["status"], "failed");
        assert_eq!(json["run"]["outcomes"][0]["status"], "succeeded");
    }
}
