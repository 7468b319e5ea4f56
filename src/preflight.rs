//! Pre-flight checks for the runtime environment.
//!
//! Verifies the template files are present in the templates directory and
//! that we are not accidentally provisioning root's home. Nothing here
//! aborts the run; missing templates surface again as per-step failures
//! when the copy is attempted.

use std::path::Path;

use colored::Colorize;
use strum::IntoEnumIterator;
use tracing::warn;

use crate::steps::dotfiles::Dotfile;

/// Result of environment verification.
#[derive(Debug)]
pub struct PreflightReport {
    /// Template filenames missing from the templates directory.
    pub missing_templates: Vec<String>,
    /// Whether the process runs with EUID 0.
    pub running_as_root: bool,
}

impl PreflightReport {
    /// Returns true if all checks passed.
    pub fn is_ok(&self) -> bool {
        self.missing_templates.is_empty() && !self.running_as_root
    }
}

/// Check whether every template file exists under `templates_dir`.
pub fn verify_environment(templates_dir: &Path) -> PreflightReport {
    let missing_templates: Vec<String> = Dotfile::iter()
        .map(|d| d.template_name().to_string())
        .filter(|name| !templates_dir.join(name).is_file())
        .collect();

    PreflightReport {
        missing_templates,
        running_as_root: nix::unistd::geteuid().is_root(),
    }
}

/// Print warnings for anything the preflight found. The run continues
/// either way; this is a heads-up, not a gate.
pub fn warn_on_findings(report: &PreflightReport, templates_dir: &Path) {
    for name in &report.missing_templates {
        warn!("template {} missing from {}", name, templates_dir.display());
        println!(
            "{} template {} not found in {}; its copy step will fail",
            "WARNING:".yellow().bold(),
            name,
            templates_dir.display()
        );
    }
    if report.running_as_root {
        println!(
            "{} running as root; dotfiles will land in root's home directory",
            "WARNING:".yellow().bold()
        );
    }
}
