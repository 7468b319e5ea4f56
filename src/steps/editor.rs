//! Editor setup: plugin manager clone, undo directory, plugin install
//! trigger, and the Darwin-only extra syntax bundles.

use std::fs;

use tracing::info;

use crate::command;
use crate::host::{HostProfile, Paths, Platform};
use crate::report::StepReport;

/// Plugin manager repository, cloned into `~/.vim/bundle/Vundle.vim`.
pub const VUNDLE_REPO: &str = "https://github.com/VundleVim/Vundle.vim.git";

/// Extra syntax bundles cloned on Darwin only.
pub const SYNTAX_EXTRA_REPOS: &[&str] = &[
    "https://github.com/rust-lang/rust.vim.git",
    "https://github.com/cespare/vim-toml.git",
];

/// Whether the plugin manager still needs cloning. Re-running the
/// provisioner on a host that already has the clone must not clone again.
pub fn needs_plugin_manager_clone(paths: &Paths) -> bool {
    !paths.vundle_dir.exists()
}

/// Clone the plugin manager if its target directory does not exist.
/// Clone failure (offline host, blocked network) is non-fatal.
pub fn install_plugin_manager(paths: &Paths) -> StepReport {
    const STEP: &str = "install_plugin_manager";

    if !needs_plugin_manager_clone(paths) {
        return StepReport::succeeded(
            STEP,
            format!("{} already present", paths.vundle_dir.display()),
        );
    }

    let target = paths.vundle_dir.display().to_string();
    match command::run_command("git", &["clone", VUNDLE_REPO, target.as_str()]) {
        Ok(output) if output.success => StepReport::succeeded(STEP, format!("cloned {}", target)),
        Ok(output) => StepReport::failed(
            STEP,
            format!("git clone exited {}: {}", output.exit_code.unwrap_or(-1), output.stderr.trim()),
        ),
        Err(e) => StepReport::failed(STEP, e.to_string()),
    }
}

/// Create the editor undo-history directory if absent. No-op if present.
pub fn ensure_undo_dir(paths: &Paths) -> StepReport {
    const STEP: &str = "ensure_undo_dir";

    if paths.vim_undo_dir.is_dir() {
        return StepReport::succeeded(
            STEP,
            format!("{} already exists", paths.vim_undo_dir.display()),
        );
    }

    if command::is_dry_run() {
        info!("dry-run: would create {}", paths.vim_undo_dir.display());
        return StepReport::succeeded(STEP, format!("would create {}", paths.vim_undo_dir.display()));
    }

    match fs::create_dir_all(&paths.vim_undo_dir) {
        Ok(()) => StepReport::succeeded(STEP, format!("created {}", paths.vim_undo_dir.display())),
        Err(e) => StepReport::failed(STEP, e.to_string()),
    }
}

/// Run the editor in non-interactive "install all declared plugins" mode.
///
/// The exit status is deliberately ignored: `vim +PluginInstall +qall` has
/// always exited non-zero on some plugin hiccups while still installing the
/// rest, and the historical behavior treats any completed run as done.
pub fn install_plugins() -> StepReport {
    const STEP: &str = "install_editor_plugins";

    match command::run_command("vim", &["+PluginInstall", "+qall"]) {
        Ok(output) => StepReport::succeeded(
            STEP,
            format!(
                "vim +PluginInstall ran (exit status {} ignored)",
                output.exit_code.unwrap_or(-1)
            ),
        ),
        Err(e) => StepReport::failed(STEP, e.to_string()),
    }
}

/// Darwin-only: clone extra syntax bundles into the plugin directory.
/// Skipped with a warning when the plugin directory does not exist.
pub fn install_syntax_extras(profile: &HostProfile, paths: &Paths) -> StepReport {
    const STEP: &str = "install_syntax_extras";

    if profile.platform != Platform::Darwin {
        return StepReport::skipped(STEP, "only applicable on darwin");
    }

    if !paths.bundle_dir.is_dir() {
        return StepReport::skipped(
            STEP,
            format!("{} does not exist; run the plugin manager step first", paths.bundle_dir.display()),
        );
    }

    let mut cloned = Vec::new();
    let mut failures = Vec::new();
    for repo in SYNTAX_EXTRA_REPOS.iter().copied() {
        let name = repo
            .rsplit('/')
            .next()
            .unwrap_or(repo)
            .trim_end_matches(".git");
        let target = paths.bundle_dir.join(name);
        if target.exists() {
            continue;
        }
        let target = target.display().to_string();
        match command::run_command("git", &["clone", repo, target.as_str()]) {
            Ok(output) if output.success => cloned.push(name.to_string()),
            Ok(output) => failures.push(format!("{}: {}", name, output.stderr.trim())),
            Err(e) => failures.push(format!("{}: {}", name, e)),
        }
    }

    if failures.is_empty() {
        StepReport::succeeded(
            STEP,
            if cloned.is_empty() {
                "all syntax bundles already present".to_string()
            } else {
                format!("cloned {}", cloned.join(", "))
            },
        )
    } else {
        StepReport::failed(STEP, failures.join("; "))
    }
}
