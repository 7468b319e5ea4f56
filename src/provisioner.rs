//! The orchestrator: one linear pass over every provisioning step.
//!
//! No retries, no rollback. Each step's outcome is recorded and the next
//! step always gets its chance; the only short-circuits live inside
//! individual steps ("already installed", "declined", "not applicable").

use std::path::PathBuf;

use colored::Colorize;
use dialoguer::Confirm;
use strum::IntoEnumIterator;
use tracing::{info, warn};

use crate::host::{HostProfile, Paths};
use crate::preflight;
use crate::report::{RunSummary, StepReport};
use crate::steps::{dotfiles, editor, hostname, packages, tools};

/// Options for one provisioning run.
#[derive(Debug, Clone)]
pub struct RunOptions {
    /// Directory holding the template files (default: current directory).
    pub templates_dir: PathBuf,
    /// Whether to pause for operator input (install gates, hostname).
    pub interactive: bool,
}

/// Run the full provisioning sequence and return the aggregated summary.
///
/// Best-effort by design: the caller exits 0 however many steps failed.
pub fn run(profile: &HostProfile, paths: &Paths, opts: &RunOptions) -> RunSummary {
    info!(
        "provisioning {} host (release {:?}), home {}",
        profile.platform,
        profile.release,
        paths.home.display()
    );
    println!(
        "Provisioning {} workstation ({})",
        profile.platform.to_string().cyan(),
        paths.home.display()
    );
    println!();

    let pre = preflight::verify_environment(&opts.templates_dir);
    preflight::warn_on_findings(&pre, &opts.templates_dir);

    let mut summary = RunSummary::new();

    // 1. Base packages via the native package manager.
    summary.record(packages::install_dependencies(profile));

    // 2-3. Editor plugin manager and undo history directory.
    summary.record(editor::install_plugin_manager(paths));
    summary.record(editor::ensure_undo_dir(paths));

    // 4. Dotfile materialization (destructive; see per-file backups).
    dotfiles::materialize_all(&opts.templates_dir, paths, &mut summary);

    // 5. Non-interactive plugin install pass.
    summary.record(editor::install_plugins());

    // 6. Optional tools, each with its own platform lookup.
    let confirm = |tool: tools::Tool| -> bool {
        if !opts.interactive {
            return false;
        }
        Confirm::new()
            .with_prompt(format!("Install {}?", tool))
            .default(false)
            .interact()
            .unwrap_or_else(|e| {
                warn!("prompt for {} failed: {}", tool, e);
                false
            })
    };
    for tool in tools::Tool::iter() {
        summary.record(tools::install_tool(tool, profile, paths, &confirm));
    }

    // 7. Optional hostname rename.
    if opts.interactive {
        match hostname::prompt_hostname() {
            Ok(requested) => summary.record(hostname::apply_hostname(profile, &requested)),
            Err(e) => summary.record(StepReport::skipped(
                "set_hostname",
                format!("prompt unavailable: {}", e),
            )),
        }
    } else {
        summary.record(StepReport::skipped("set_hostname", "non-interactive run"));
    }

    // 8. Darwin-only extra syntax bundles.
    summary.record(editor::install_syntax_extras(profile, paths));

    summary.print_summary();
    summary
}
