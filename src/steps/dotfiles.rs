//! Config materialization: copy checked-in template files over dotfiles.
//!
//! This is the destructive part of the provisioner. Every destination is
//! overwritten unconditionally with the template's content; for the shell
//! profile and `.psqlrc` a one-time `.bak` sibling of the pre-existing file
//! is attempted first. Backup failure is swallowed on purpose.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use strum::{Display, EnumIter, IntoEnumIterator};
use tracing::{debug, info, warn};

use crate::command;
use crate::error::{ProvisionError, Result};
use crate::host::Paths;
use crate::report::{RunSummary, StepReport};

/// The dotfiles the provisioner materializes, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumIter)]
#[strum(serialize_all = "snake_case")]
pub enum Dotfile {
    Vimrc,
    TmuxConf,
    ShellProfile,
    Inputrc,
    Psqlrc,
}

impl Dotfile {
    /// Template filename expected in the templates directory.
    pub fn template_name(self) -> &'static str {
        match self {
            Dotfile::Vimrc => "vimrc_settings_file.txt",
            Dotfile::TmuxConf => "tmux_settings_file.txt",
            Dotfile::ShellProfile => "profile_settings_file.txt",
            Dotfile::Inputrc => "input_settings_file.txt",
            Dotfile::Psqlrc => "psqlrc_settings_file.txt",
        }
    }

    /// Destination path under the home directory.
    pub fn destination(self, paths: &Paths) -> PathBuf {
        match self {
            Dotfile::Vimrc => paths.vimrc.clone(),
            Dotfile::TmuxConf => paths.tmux_conf.clone(),
            Dotfile::ShellProfile => paths.shell_profile.clone(),
            Dotfile::Inputrc => paths.inputrc.clone(),
            Dotfile::Psqlrc => paths.psqlrc.clone(),
        }
    }

    /// Whether a pre-existing destination gets a `.bak` sibling first.
    pub fn wants_backup(self) -> bool {
        matches!(self, Dotfile::ShellProfile | Dotfile::Psqlrc)
    }
}

/// Sibling backup path for a destination (`.bashrc` -> `.bashrc.bak`).
fn backup_path(dest: &Path) -> PathBuf {
    let mut name = dest.as_os_str().to_os_string();
    name.push(".bak");
    PathBuf::from(name)
}

/// Copy one template over its dotfile destination.
///
/// A missing template is an error; the caller downgrades it to a per-step
/// failure so the rest of the run continues. The backup is best-effort and
/// one-time: an existing `.bak` is never overwritten.
pub fn materialize(templates_dir: &Path, paths: &Paths, dotfile: Dotfile) -> Result<()> {
    let source = templates_dir.join(dotfile.template_name());
    if !source.is_file() {
        return Err(ProvisionError::template(format!(
            "{} not found in {}",
            dotfile.template_name(),
            templates_dir.display()
        )));
    }

    let dest = dotfile.destination(paths);

    if dotfile.wants_backup() && dest.exists() {
        let bak = backup_path(&dest);
        if bak.exists() {
            debug!("backup {} already exists, leaving it alone", bak.display());
        } else if command::is_dry_run() {
            info!("dry-run: would back up {} to {}", dest.display(), bak.display());
        } else if let Err(e) = fs::copy(&dest, &bak) {
            // Best-effort: a failed backup never blocks the overwrite.
            warn!("could not back up {}: {}", dest.display(), e);
        }
    }

    if command::is_dry_run() {
        info!(
            "dry-run: would copy {} to {}",
            source.display(),
            dest.display()
        );
        return Ok(());
    }

    if let Some(parent) = dest.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::copy(&source, &dest)?;
    info!("wrote {}", dest.display());
    Ok(())
}

/// Materialize all dotfiles, one report per destination.
pub fn materialize_all(templates_dir: &Path, paths: &Paths, summary: &mut RunSummary) {
    for dotfile in Dotfile::iter() {
        let step = format!("copy_{}", dotfile);
        match materialize(templates_dir, paths, dotfile) {
            Ok(()) => {
                let dest = dotfile.destination(paths);
                summary.record(StepReport::succeeded(step, dest.display().to_string()));
            }
            Err(e) => summary.record(StepReport::failed(step, e.to_string())),
        }
    }
}

/// Append a line to the shell profile unless it is already there.
///
/// Used for tool init hooks that only make sense once the tool installed.
pub fn append_profile_line(paths: &Paths, line: &str) -> Result<()> {
    if command::is_dry_run() {
        info!(
            "dry-run: would append {:?} to {}",
            line,
            paths.shell_profile.display()
        );
        return Ok(());
    }

    let existing = fs::read_to_string(&paths.shell_profile).unwrap_or_default();
    if existing.lines().any(|l| l.trim() == line.trim()) {
        debug!("profile already contains {:?}", line);
        return Ok(());
    }

    let mut file = fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&paths.shell_profile)?;
    writeln!(file, "{}", line)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::Platform;

    fn fixture() -> (tempfile::TempDir, tempfile::TempDir, Paths) {
        let templates = tempfile::tempdir().unwrap();
        let home = tempfile::tempdir().unwrap();
        for dotfile in Dotfile::iter() {
            fs::write(
                templates.path().join(dotfile.template_name()),
                format!("# template for {}\n", dotfile),
            )
            .unwrap();
        }
        let paths = Paths::new(home.path(), Platform::Linux);
        (templates, home, paths)
    }

    #[test]
    fn test_copy_is_byte_identical() {
        command::disable_dry_run();
        let (templates, _home, paths) = fixture();

        materialize(templates.path(), &paths, Dotfile::Vimrc).unwrap();

        let template = fs::read(templates.path().join("vimrc_settings_file.txt")).unwrap();
        let written = fs::read(&paths.vimrc).unwrap();
        assert_eq!(template, written);
    }

    #[test]
    fn test_overwrite_is_unconditional() {
        command::disable_dry_run();
        let (templates, _home, paths) = fixture();

        fs::write(&paths.vimrc, "old content").unwrap();
        materialize(templates.path(), &paths, Dotfile::Vimrc).unwrap();

        let written = fs::read_to_string(&paths.vimrc).unwrap();
        assert_eq!(written, "# template for vimrc\n");
        // `.vimrc` is not backup-eligible.
        assert!(!backup_path(&paths.vimrc).exists());
    }

    #[test]
    fn test_backup_preserves_prior_content() {
        command::disable_dry_run();
        let (templates, _home, paths) = fixture();

        fs::write(&paths.shell_profile, "export OLD=1\n").unwrap();
        materialize(templates.path(), &paths, Dotfile::ShellProfile).unwrap();

        let bak = backup_path(&paths.shell_profile);
        assert_eq!(fs::read_to_string(&bak).unwrap(), "export OLD=1\n");
        assert_eq!(
            fs::read_to_string(&paths.shell_profile).unwrap(),
            "# template for shell_profile\n"
        );
    }

    #[test]
    fn test_backup_is_one_time() {
        command::disable_dry_run();
        let (templates, _home, paths) = fixture();

        fs::write(&paths.psqlrc, "\\timing on\n").unwrap();
        materialize(templates.path(), &paths, Dotfile::Psqlrc).unwrap();

        // Re-run: the destination now holds template content, but the
        // original backup must survive.
        materialize(templates.path(), &paths, Dotfile::Psqlrc).unwrap();
        let bak = backup_path(&paths.psqlrc);
        assert_eq!(fs::read_to_string(&bak).unwrap(), "\\timing on\n");
    }

    #[test]
    fn test_missing_template_is_error() {
        command::disable_dry_run();
        let (templates, _home, paths) = fixture();
        fs::remove_file(templates.path().join("input_settings_file.txt")).unwrap();

        let err = materialize(templates.path(), &paths, Dotfile::Inputrc).unwrap_err();
        assert!(matches!(err, ProvisionError::Template(_)));
    }

    #[test]
    fn test_materialize_all_continues_past_failures() {
        command::disable_dry_run();
        let (templates, _home, paths) = fixture();
        fs::remove_file(templates.path().join("tmux_settings_file.txt")).unwrap();

        let mut summary = RunSummary::new();
        materialize_all(templates.path(), &paths, &mut summary);

        assert_eq!(summary.failed(), 1);
        assert_eq!(summary.succeeded(), 4);
        assert!(paths.psqlrc.exists());
    }

    #[test]
    fn test_append_profile_line_is_idempotent() {
        command::disable_dry_run();
        let (_templates, _home, paths) = fixture();

        let line = r#"eval "$(starship init bash)""#;
        append_profile_line(&paths, line).unwrap();
        append_profile_line(&paths, line).unwrap();

        let content = fs::read_to_string(&paths.shell_profile).unwrap();
        assert_eq!(content.matches("starship init").count(), 1);
    }
}
