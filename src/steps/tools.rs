//! Optional workstation tools: multiplexer, command corrector, virtual-env
//! helper, shell prompt helper.
//!
//! Each install short-circuits if the tool already resolves on `PATH`, then
//! selects an install command from a per-platform lookup. An unrecognized
//! platform yields a warning and a failed outcome; the sequence continues.

use strum::{Display, EnumIter, EnumString};

use crate::command;
use crate::host::{HostProfile, Paths, Platform};
use crate::report::StepReport;
use crate::steps::dotfiles;
use crate::steps::packages::InstallCommand;

/// Optional tools, in install order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, EnumIter)]
#[strum(serialize_all = "lowercase")]
pub enum Tool {
    Tmux,
    #[strum(serialize = "thefuck")]
    TheFuck,
    Virtualenvwrapper,
    Starship,
}

impl Tool {
    /// Binary name looked up on `PATH` for the already-installed check.
    pub fn binary(self) -> &'static str {
        match self {
            Tool::Tmux => "tmux",
            Tool::TheFuck => "thefuck",
            Tool::Virtualenvwrapper => "virtualenvwrapper.sh",
            Tool::Starship => "starship",
        }
    }

    /// Whether installation is gated behind an interactive yes/no prompt.
    pub fn prompted(self) -> bool {
        matches!(self, Tool::TheFuck)
    }

    /// Shell profile line applied only after a successful install.
    pub fn profile_line(self) -> Option<&'static str> {
        match self {
            Tool::Starship => Some(r#"eval "$(starship init bash)""#),
            _ => None,
        }
    }

    /// Platform lookup for the install command. `None` means the platform
    /// family has no entry and the operator must install by hand.
    pub fn install_command(self, profile: &HostProfile) -> Option<InstallCommand> {
        match (self, profile.platform) {
            (Tool::Tmux, Platform::Linux) | (Tool::Tmux, Platform::Darwin) => {
                crate::steps::packages::install_command(profile, &["tmux"])
            }
            (Tool::TheFuck, Platform::Linux) => Some(InstallCommand {
                program: "pip3",
                args: vec!["install".into(), "--user".into(), "thefuck".into()],
                privileged: false,
            }),
            (Tool::TheFuck, Platform::Darwin) => Some(InstallCommand {
                program: "brew",
                args: vec!["install".into(), "thefuck".into()],
                privileged: false,
            }),
            (Tool::Virtualenvwrapper, Platform::Linux)
            | (Tool::Virtualenvwrapper, Platform::Darwin) => Some(InstallCommand {
                program: "pip3",
                args: vec!["install".into(), "--user".into(), "virtualenvwrapper".into()],
                privileged: false,
            }),
            (Tool::Starship, Platform::Linux) => Some(InstallCommand {
                program: "sh",
                args: vec![
                    "-c".into(),
                    "curl -sS https://starship.rs/install.sh | sh -s -- -y".into(),
                ],
                privileged: false,
            }),
            (Tool::Starship, Platform::Darwin) => Some(InstallCommand {
                program: "brew",
                args: vec!["install".into(), "starship".into()],
                privileged: false,
            }),
            (_, Platform::Unsupported) => None,
        }
    }
}

/// Install one optional tool.
///
/// `confirm` answers the yes/no gate for prompted tools; non-interactive
/// runs pass a closure that always declines. Follow-up config (the prompt
/// helper's profile hook) runs only when the install itself succeeded.
pub fn install_tool(
    tool: Tool,
    profile: &HostProfile,
    paths: &Paths,
    confirm: &dyn Fn(Tool) -> bool,
) -> StepReport {
    let step = format!("install_{}", tool);

    if command::binary_exists(tool.binary()) {
        // The dotfile pass overwrites the shell profile on every run, so a
        // tool that is already present still needs its hook re-applied.
        if let Some(line) = tool.profile_line() {
            if let Err(e) = dotfiles::append_profile_line(paths, line) {
                return StepReport::failed(
                    step,
                    format!("{} present but profile hook failed: {}", tool, e),
                );
            }
        }
        return StepReport::succeeded(step, format!("{} already installed", tool.binary()));
    }

    if tool.prompted() && !confirm(tool) {
        return StepReport::skipped(step, "declined");
    }

    let Some(cmd) = tool.install_command(profile) else {
        return StepReport::failed(
            step,
            format!(
                "could not determine your operating system; install {} manually",
                tool
            ),
        );
    };

    let outcome = cmd.execute();
    match outcome {
        Ok(output) if output.success => {
            if let Some(line) = tool.profile_line() {
                if let Err(e) = dotfiles::append_profile_line(paths, line) {
                    return StepReport::failed(
                        step,
                        format!("{} installed but profile hook failed: {}", tool, e),
                    );
                }
            }
            StepReport::succeeded(step, format!("installed {}", tool))
        }
        Ok(output) => StepReport::failed(
            step,
            format!(
                "{} exited {}: {}",
                cmd.program,
                output.exit_code.unwrap_or(-1),
                output.stderr.trim()
            ),
        ),
        Err(e) => StepReport::failed(step, e.to_string()),
    }
}
