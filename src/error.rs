//! Error handling module for homeforge
//!
//! Provides centralized error handling with proper error types using thiserror.
//! Step code converts these into per-step diagnostics; only setup code
//! (resolving the home directory, parsing the CLI) surfaces them directly.

use thiserror::Error;

/// Main error type for homeforge
#[derive(Error, Debug)]
pub enum ProvisionError {
    /// IO errors (file copies, directory creation)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Platform detection / unsupported platform errors
    #[error("Platform error: {0}")]
    Platform(String),

    /// External command failures (spawn errors, non-zero exits)
    #[error("Command failed: {0}")]
    Command(String),

    /// Missing or unreadable template files
    #[error("Template error: {0}")]
    Template(String),

    /// Interactive prompt failures
    #[error("Prompt error: {0}")]
    Prompt(#[from] dialoguer::Error),

    /// JSON serialization errors (run report)
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// General errors (catch-all for edge cases)
    #[error("{0}")]
    General(String),
}

/// Result type alias for homeforge operations
pub type Result<T> = std::result::Result<T, ProvisionError>;

// Convenient error constructors
impl ProvisionError {
    /// Create a platform error
    pub fn platform(msg: impl Into<String>) -> Self {
        Self::Platform(msg.into())
    }

    /// Create a command error
    pub fn command(msg: impl Into<String>) -> Self {
        Self::Command(msg.into())
    }

    /// Create a template error
    pub fn template(msg: impl Into<String>) -> Self {
        Self::Template(msg.into())
    }

    /// Create a general error
    pub fn general(msg: impl Into<String>) -> Self {
        Self::General(msg.into())
    }
}
