//! Per-step outcomes and the run summary.
//!
//! The provisioner is deliberately best-effort: a failing step never stops
//! the sequence. What it must not do is fail silently, so every step
//! produces a [`StepReport`] and the whole run aggregates into a
//! [`RunSummary`] that is printed at the end and optionally written as JSON.

use std::path::Path;

use colored::Colorize;
use serde::Serialize;
use strum::Display;
use tracing::warn;

use crate::error::Result;

/// Outcome of a single provisioning step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum StepStatus {
    /// The step did its work (or confirmed it was already done).
    Succeeded,
    /// The step attempted work and failed; the run continues.
    Failed,
    /// The step decided not to act (declined prompt, not applicable here).
    Skipped,
}

/// One step's name, outcome, and human-readable diagnostic.
#[derive(Debug, Clone, Serialize)]
pub struct StepReport {
    pub step: String,
    pub status: StepStatus,
    pub detail: String,
}

impl StepReport {
    pub fn succeeded(step: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            step: step.into(),
            status: StepStatus::Succeeded,
            detail: detail.into(),
        }
    }

    pub fn failed(step: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            step: step.into(),
            status: StepStatus::Failed,
            detail: detail.into(),
        }
    }

    pub fn skipped(step: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            step: step.into(),
            status: StepStatus::Skipped,
            detail: detail.into(),
        }
    }
}

/// Ordered collection of step reports for one provisioning run.
#[derive(Debug, Default, Serialize)]
pub struct RunSummary {
    reports: Vec<StepReport>,
}

impl RunSummary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a step outcome, echoing a one-line colored status to the
    /// terminal as the run progresses.
    pub fn record(&mut self, report: StepReport) {
        match report.status {
            StepStatus::Succeeded => {
                println!("  {} {}: {}", "✓".green(), report.step, report.detail);
            }
            StepStatus::Failed => {
                warn!("step {} failed: {}", report.step, report.detail);
                println!("  {} {}: {}", "✗".red(), report.step.red(), report.detail);
            }
            StepStatus::Skipped => {
                println!("  {} {}: {}", "-".yellow(), report.step, report.detail.dimmed());
            }
        }
        self.reports.push(report);
    }

    pub fn reports(&self) -> &[StepReport] {
        &self.reports
    }

    pub fn succeeded(&self) -> usize {
        self.count(StepStatus::Succeeded)
    }

    pub fn failed(&self) -> usize {
        self.count(StepStatus::Failed)
    }

    pub fn skipped(&self) -> usize {
        self.count(StepStatus::Skipped)
    }

    fn count(&self, status: StepStatus) -> usize {
        self.reports.iter().filter(|r| r.status == status).count()
    }

    /// Print the closing summary block.
    pub fn print_summary(&self) {
        println!();
        let line = format!(
            "{} succeeded, {} failed, {} skipped",
            self.succeeded(),
            self.failed(),
            self.skipped()
        );
        if self.failed() == 0 {
            println!("{}", line.green());
        } else {
            println!("{}", line.yellow());
            for report in self.reports.iter().filter(|r| r.status == StepStatus::Failed) {
                println!("    {} {}", report.step.red(), report.detail);
            }
        }
    }

    /// Write the run summary as pretty-printed JSON.
    pub fn write_json(&self, path: &Path) -> Result<()> {
        let doc = serde_json::json!({
            "succeeded": self.succeeded(),
            "failed": self.failed(),
            "skipped": self.skipped(),
            "steps": self.reports,
        });
        std::fs::write(path, serde_json::to_string_pretty(&doc)?)?;
        Ok(())
    }
}
