//! Optional hostname rename, driven by a free-text prompt.
//!
//! Empty input means "leave the hostname alone" and must not invoke any
//! privileged command.

use dialoguer::Input;

use crate::command;
use crate::error::Result;
use crate::host::{HostProfile, Platform};
use crate::report::StepReport;

/// Privileged rename invocation for a requested hostname, or `None` when
/// the input is empty/whitespace or the platform has no rename command.
pub fn hostname_command(platform: Platform, requested: &str) -> Option<(&'static str, Vec<String>)> {
    let name = requested.trim();
    if name.is_empty() {
        return None;
    }

    match platform {
        Platform::Linux => Some(("hostnamectl", vec!["set-hostname".into(), name.into()])),
        Platform::Darwin => Some(("scutil", vec!["--set".into(), "HostName".into(), name.into()])),
        Platform::Unsupported => None,
    }
}

/// Prompt for a hostname. Enter on an empty line keeps the current name.
pub fn prompt_hostname() -> Result<String> {
    let value: String = Input::new()
        .with_prompt("New hostname (leave empty to keep current)")
        .allow_empty(true)
        .interact_text()?;
    Ok(value)
}

/// Apply a requested hostname. Empty input skips without any privileged
/// invocation; an unsupported platform warns and reports failure.
pub fn apply_hostname(profile: &HostProfile, requested: &str) -> StepReport {
    const STEP: &str = "set_hostname";

    if requested.trim().is_empty() {
        return StepReport::skipped(STEP, "no hostname requested");
    }

    let Some((program, args)) = hostname_command(profile.platform, requested) else {
        return StepReport::failed(
            STEP,
            "could not determine your operating system; set the hostname manually",
        );
    };

    match command::run_privileged(program, &args) {
        Ok(output) if output.success => {
            StepReport::succeeded(STEP, format!("hostname set to {}", requested.trim()))
        }
        Ok(output) => StepReport::failed(
            STEP,
            format!(
                "{} exited {}: {}",
                program,
                output.exit_code.unwrap_or(-1),
                output.stderr.trim()
            ),
        ),
        Err(e) => StepReport::failed(STEP, e.to_string()),
    }
}
