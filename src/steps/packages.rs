//! Base dependency installation via the host's native package manager.
//!
//! The platform-to-command mapping is a lookup, not an if/else chain, so
//! adding a family touches exactly one table.

use crate::command;
use crate::host::HostProfile;
use crate::report::StepReport;

/// Fixed package list installed on every supported host.
pub const BASE_PACKAGES: &[&str] = &["vim", "git", "tmux", "curl"];

/// A resolved package-manager invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallCommand {
    pub program: &'static str,
    pub args: Vec<String>,
    /// Whether the invocation must run under sudo.
    pub privileged: bool,
}

impl InstallCommand {
    fn new(program: &'static str, base: &[&str], packages: &[&str], privileged: bool) -> Self {
        let mut args: Vec<String> = base.iter().map(|s| s.to_string()).collect();
        args.extend(packages.iter().map(|s| s.to_string()));
        Self {
            program,
            args,
            privileged,
        }
    }

    /// Run the invocation, honoring the privileged flag.
    pub fn execute(&self) -> anyhow::Result<command::CommandOutput> {
        if self.privileged {
            command::run_privileged(self.program, &self.args)
        } else {
            command::run_command(self.program, &self.args)
        }
    }
}

/// Select the package-manager command for this host, or `None` when the
/// platform family has no entry (the caller warns and skips).
pub fn install_command(profile: &HostProfile, packages: &[&str]) -> Option<InstallCommand> {
    use crate::host::Platform::*;

    match profile.platform {
        Linux if profile.is_amazon_linux() => {
            Some(InstallCommand::new("yum", &["install", "-y"], packages, true))
        }
        Linux => Some(InstallCommand::new(
            "apt-get",
            &["install", "-y"],
            packages,
            true,
        )),
        Darwin => Some(InstallCommand::new("brew", &["install"], packages, false)),
        Unsupported => None,
    }
}

/// Install the base package set. Unrecognized platforms skip with a
/// visible warning; command failures are downgraded to a failed report.
pub fn install_dependencies(profile: &HostProfile) -> StepReport {
    const STEP: &str = "install_dependencies";

    let Some(cmd) = install_command(profile, BASE_PACKAGES) else {
        return StepReport::skipped(
            STEP,
            "could not determine your operating system; install base packages manually",
        );
    };

    match cmd.execute() {
        Ok(output) if output.success => StepReport::succeeded(
            STEP,
            format!("{} installed {}", cmd.program, BASE_PACKAGES.join(" ")),
        ),
        Ok(output) => StepReport::failed(
            STEP,
            format!(
                "{} exited {}: {}",
                cmd.program,
                output.exit_code.unwrap_or(-1),
                output.stderr.trim()
            ),
        ),
        Err(e) => StepReport::failed(STEP, e.to_string()),
    }
}
