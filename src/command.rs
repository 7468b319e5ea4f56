//! Blocking external command execution.
//!
//! All shell-outs go through [`run_command`] / [`run_privileged`] so that
//! dry-run handling, logging, and output capture live in one place. A
//! non-zero exit is reported in the returned [`CommandOutput`], not as an
//! `Err`; `Err` is reserved for spawn failures (binary missing, permission
//! denied).

use std::ffi::OsStr;
use std::process::{Command, Stdio};
use std::sync::atomic::{AtomicBool, Ordering};

use anyhow::{Context, Result};
use tracing::{debug, info};

static DRY_RUN: AtomicBool = AtomicBool::new(false);

/// Enable dry-run mode: mutating commands are logged and reported as
/// successful without executing. Probes (`which`, `uname`) still run.
pub fn enable_dry_run() {
    DRY_RUN.store(true, Ordering::SeqCst);
}

/// Disable dry-run mode (used by tests).
pub fn disable_dry_run() {
    DRY_RUN.store(false, Ordering::SeqCst);
}

/// Whether dry-run mode is active.
pub fn is_dry_run() -> bool {
    DRY_RUN.load(Ordering::SeqCst)
}

/// Output from an external command.
#[derive(Debug, Clone)]
pub struct CommandOutput {
    /// Captured standard output.
    pub stdout: String,
    /// Captured standard error.
    pub stderr: String,
    /// Exit code (None if terminated by signal).
    pub exit_code: Option<i32>,
    /// Whether the command exited successfully (exit code 0).
    pub success: bool,
}

impl CommandOutput {
    /// Synthetic success used when dry-run suppresses execution.
    fn dry() -> Self {
        Self {
            stdout: String::new(),
            stderr: String::new(),
            exit_code: Some(0),
            success: true,
        }
    }

    /// Check the exit status and return an error if non-zero.
    pub fn ensure_success(&self, context: &str) -> Result<()> {
        if self.success {
            Ok(())
        } else {
            let code = self.exit_code.unwrap_or(-1);
            anyhow::bail!(
                "{} failed (exit code {}): {}",
                context,
                code,
                self.stderr.trim()
            )
        }
    }
}

/// Execute a mutating external command, blocking until it completes.
///
/// Honors dry-run mode. There is no timeout; every step of the provisioner
/// waits for its command to finish before the next begins.
pub fn run_command<S: AsRef<OsStr>>(program: &str, args: &[S]) -> Result<CommandOutput> {
    let shown: Vec<String> = args
        .iter()
        .map(|a| a.as_ref().to_string_lossy().into_owned())
        .collect();

    if is_dry_run() {
        info!("dry-run: would execute {} {}", program, shown.join(" "));
        return Ok(CommandOutput::dry());
    }

    info!("executing: {} {}", program, shown.join(" "));

    let output = Command::new(program)
        .args(args)
        .stdin(Stdio::inherit())
        .output()
        .with_context(|| format!("failed to spawn {}", program))?;

    let result = CommandOutput {
        stdout: String::from_utf8_lossy(&output.stdout).to_string(),
        stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        exit_code: output.status.code(),
        success: output.status.success(),
    };

    debug!(
        "{} exited with code {:?} (success: {})",
        program, result.exit_code, result.success
    );
    Ok(result)
}

/// Execute a command under `sudo`. Package installs and the hostname rename
/// need this; everything else runs as the invoking user.
pub fn run_privileged<S: AsRef<OsStr>>(program: &str, args: &[S]) -> Result<CommandOutput> {
    let mut full: Vec<&OsStr> = vec![program.as_ref()];
    full.extend(args.iter().map(|a| a.as_ref()));
    run_command("sudo", &full)
}

/// Check whether a binary resolves on the command search path.
///
/// This is a probe, not a mutation: it runs even in dry-run mode so that
/// "already installed" short-circuits stay accurate.
pub fn binary_exists(name: &str) -> bool {
    Command::new("which")
        .arg(name)
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map(|status| status.success())
        .unwrap_or(false)
}
