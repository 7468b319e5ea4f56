//! Host identity and path layout.
//!
//! Everything later steps branch on is captured once, up front, in two
//! immutable values: a [`HostProfile`] (which operating system family we are
//! on, plus a kernel release string for distribution hints) and a [`Paths`]
//! value (every destination under the invoking user's home directory).
//! Steps receive these explicitly; there is no ambient global state.

use std::path::{Path, PathBuf};
use std::process::Command;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

use crate::error::{ProvisionError, Result};

/// Operating system family the provisioner branches on.
///
/// Anything that is not Linux or macOS falls into `Unsupported`; detection
/// never fails, platform-gated steps warn and continue instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[derive(Display, EnumString, EnumIter)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    #[strum(serialize = "linux")]
    Linux,
    #[strum(serialize = "darwin")]
    Darwin,
    #[strum(serialize = "unsupported")]
    Unsupported,
}

impl Platform {
    /// Detect the platform family of the running process.
    pub fn detect() -> Self {
        match std::env::consts::OS {
            "linux" => Platform::Linux,
            "macos" => Platform::Darwin,
            _ => Platform::Unsupported,
        }
    }
}

/// Immutable host identity, derived once at startup.
#[derive(Debug, Clone, Serialize)]
pub struct HostProfile {
    /// Operating system family.
    pub platform: Platform,
    /// Kernel release string (`uname -r`), empty if it could not be read.
    pub release: String,
}

impl HostProfile {
    /// Detect the current host. Never fails: an unreadable release string
    /// becomes empty and an unknown OS becomes [`Platform::Unsupported`].
    pub fn detect() -> Self {
        let release = Command::new("uname")
            .arg("-r")
            .output()
            .ok()
            .filter(|o| o.status.success())
            .map(|o| String::from_utf8_lossy(&o.stdout).trim().to_string())
            .unwrap_or_default();

        Self {
            platform: Platform::detect(),
            release,
        }
    }

    /// Build a profile from known parts (used by tests and dry runs).
    pub fn from_parts(platform: Platform, release: impl Into<String>) -> Self {
        Self {
            platform,
            release: release.into(),
        }
    }

    /// Whether this looks like an Amazon Linux variant. Amazon kernels carry
    /// an `amzn` tag in the release string, which picks yum over apt.
    pub fn is_amazon_linux(&self) -> bool {
        self.platform == Platform::Linux && self.release.contains("amzn")
    }
}

/// Every destination path the provisioner writes under the home directory.
///
/// Computed once so that tests can point the whole run at a temp directory.
#[derive(Debug, Clone)]
pub struct Paths {
    /// The invoking user's home directory.
    pub home: PathBuf,
    /// `~/.vimrc`
    pub vimrc: PathBuf,
    /// `~/.vim/undodir/` (persistent undo history)
    pub vim_undo_dir: PathBuf,
    /// `~/.vim/bundle/` (editor plugin directory)
    pub bundle_dir: PathBuf,
    /// `~/.vim/bundle/Vundle.vim/` (plugin manager clone target)
    pub vundle_dir: PathBuf,
    /// `~/.tmux.conf`
    pub tmux_conf: PathBuf,
    /// `~/.bashrc` on Linux, `~/.bash_profile` on Darwin
    pub shell_profile: PathBuf,
    /// `~/.inputrc`
    pub inputrc: PathBuf,
    /// `~/.psqlrc`
    pub psqlrc: PathBuf,
}

impl Paths {
    /// Lay out all destinations under `home` for the given platform family.
    pub fn new(home: &Path, platform: Platform) -> Self {
        let vim_dir = home.join(".vim");
        let bundle_dir = vim_dir.join("bundle");
        let shell_profile = match platform {
            Platform::Darwin => home.join(".bash_profile"),
            _ => home.join(".bashrc"),
        };

        Self {
            home: home.to_path_buf(),
            vimrc: home.join(".vimrc"),
            vim_undo_dir: vim_dir.join("undodir"),
            vundle_dir: bundle_dir.join("Vundle.vim"),
            bundle_dir,
            tmux_conf: home.join(".tmux.conf"),
            shell_profile,
            inputrc: home.join(".inputrc"),
            psqlrc: home.join(".psqlrc"),
        }
    }

    /// Resolve the layout for the invoking user's real home directory.
    pub fn resolve(platform: Platform) -> Result<Self> {
        let home = dirs::home_dir()
            .ok_or_else(|| ProvisionError::platform("could not determine home directory"))?;
        Ok(Self::new(&home, platform))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_platform_display_roundtrip() {
        assert_eq!(Platform::Linux.to_string(), "linux");
        assert_eq!(Platform::Darwin.to_string(), "darwin");
        assert_eq!(Platform::from_str("linux").unwrap(), Platform::Linux);
        assert_eq!(Platform::from_str("darwin").unwrap(), Platform::Darwin);
    }

    #[test]
    fn test_amazon_linux_hint() {
        let amzn = HostProfile::from_parts(Platform::Linux, "6.1.66-91.160.amzn2023.x86_64");
        assert!(amzn.is_amazon_linux());

        let stock = HostProfile::from_parts(Platform::Linux, "6.8.0-45-generic");
        assert!(!stock.is_amazon_linux());

        // The hint only applies to Linux, whatever the release says.
        let darwin = HostProfile::from_parts(Platform::Darwin, "amzn");
        assert!(!darwin.is_amazon_linux());
    }

    #[test]
    fn test_paths_layout_linux() {
        let paths = Paths::new(Path::new("/home/dev"), Platform::Linux);
        assert_eq!(paths.vimrc, Path::new("/home/dev/.vimrc"));
        assert_eq!(paths.vim_undo_dir, Path::new("/home/dev/.vim/undodir"));
        assert_eq!(paths.vundle_dir, Path::new("/home/dev/.vim/bundle/Vundle.vim"));
        assert_eq!(paths.shell_profile, Path::new("/home/dev/.bashrc"));
    }

    #[test]
    fn test_paths_layout_darwin_profile() {
        let paths = Paths::new(Path::new("/Users/dev"), Platform::Darwin);
        assert_eq!(paths.shell_profile, Path::new("/Users/dev/.bash_profile"));
        assert_eq!(paths.psqlrc, Path::new("/Users/dev/.psqlrc"));
    }

    #[test]
    fn test_detect_never_panics() {
        let profile = HostProfile::detect();
        // We cannot assert the family in a portable way, only that detection
        // produced a usable value.
        let _ = profile.is_amazon_linux();
    }
}
