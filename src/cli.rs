use clap::Parser;
use std::path::PathBuf;

/// homeforge - best-effort workstation bootstrapper
#[derive(Parser, Debug)]
#[command(name = "homeforge")]
#[command(about = "Installs workstation tools and materializes dotfiles from templates")]
#[command(version)]
pub struct Cli {
    /// Dry-run mode: show what would be executed without making changes.
    ///
    /// Mutating commands and file copies are logged and reported as
    /// successful; existence probes still execute so the preview is
    /// realistic. Implies --non-interactive: prompts are skipped because
    /// their answers would change nothing.
    #[arg(long)]
    pub dry_run: bool,

    /// Directory containing the template files (default: current directory)
    #[arg(long, value_name = "DIR")]
    pub templates: Option<PathBuf>,

    /// Skip all interactive prompts (gates answered "no", hostname kept)
    #[arg(long)]
    pub non_interactive: bool,

    /// Write the run summary as JSON to this path
    #[arg(long, value_name = "PATH")]
    pub report: Option<PathBuf>,
}

impl Cli {
    pub fn parse_args() -> Self {
        <Self as clap::Parser>::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_no_args() {
        let cli = Cli::try_parse_from(["homeforge"]).unwrap();
        assert!(!cli.dry_run);
        assert!(!cli.non_interactive);
        assert!(cli.templates.is_none());
        assert!(cli.report.is_none());
    }

    #[test]
    fn test_cli_all_flags() {
        let cli = Cli::try_parse_from([
            "homeforge",
            "--dry-run",
            "--non-interactive",
            "--templates",
            "/srv/templates",
            "--report",
            "/tmp/run.json",
        ])
        .unwrap();
        assert!(cli.dry_run);
        assert!(cli.non_interactive);
        assert_eq!(cli.templates.unwrap(), PathBuf::from("/srv/templates"));
        assert_eq!(cli.report.unwrap(), PathBuf::from("/tmp/run.json"));
    }

    #[test]
    fn test_cli_rejects_unknown_flag() {
        assert!(Cli::try_parse_from(["homeforge", "--force"]).is_err());
    }
}
