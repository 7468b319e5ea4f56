//! homeforge library
//!
//! Core functionality for the workstation bootstrapper: host detection,
//! external command execution, the provisioning steps, and run reporting.

pub mod cli;
pub mod command;
pub mod error;
pub mod host;
pub mod preflight;
pub mod provisioner;
pub mod report;
pub mod steps;

// Re-export main types for convenience
pub use command::{binary_exists, disable_dry_run, enable_dry_run, is_dry_run, CommandOutput};
pub use error::ProvisionError;
pub use host::{HostProfile, Paths, Platform};
pub use preflight::{verify_environment, PreflightReport};
pub use provisioner::RunOptions;
pub use report::{RunSummary, StepReport, StepStatus};
pub use steps::dotfiles::Dotfile;
pub use steps::packages::{InstallCommand, BASE_PACKAGES};
pub use steps::tools::Tool;
