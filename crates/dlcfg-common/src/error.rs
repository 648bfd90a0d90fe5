//! Error types for data-link configuration operations.
//!
//! All errors implement `std::error::Error` via `thiserror`. The split
//! matters to callers: [`DlCfgError::InvalidConfig`] is raised before any
//! subprocess runs, while [`DlCfgError::CommandFailed`] carries the exit
//! code and captured output of a command that did run.

use std::io;
use thiserror::Error;

/// Result type alias for data-link configuration operations.
pub type DlCfgResult<T> = Result<T, DlCfgError>;

/// Errors that can occur while reconciling data-link configuration.
#[derive(Debug, Error)]
pub enum DlCfgError {
    /// The subprocess could not be spawned at all.
    #[error("Failed to execute command '{command}': {source}")]
    ShellExec {
        /// The command that failed to start.
        command: String,
        /// The underlying IO error.
        #[source]
        source: io::Error,
    },

    /// A mutating command exited non-zero.
    #[error("Command failed: '{command}' (exit code {exit_code}): {stderr}")]
    CommandFailed {
        /// The command that failed.
        command: String,
        /// The exit code.
        exit_code: i32,
        /// Captured stdout, verbatim.
        stdout: String,
        /// Captured stderr, verbatim.
        stderr: String,
    },

    /// Declared parameters failed validation.
    #[error("Invalid configuration for {field}: {message}")]
    InvalidConfig {
        /// The field that failed validation.
        field: String,
        /// Error message.
        message: String,
    },
}

impl DlCfgError {
    /// Creates an invalid configuration error.
    pub fn invalid_config(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Exit code of the failed command, when one actually ran.
    pub fn exit_code(&self) -> Option<i32> {
        match self {
            DlCfgError::CommandFailed { exit_code, .. } => Some(*exit_code),
            _ => None,
        }
    }

    /// True when the error was raised before any subprocess was spawned.
    pub fn is_validation(&self) -> bool {
        matches!(self, DlCfgError::InvalidConfig { .. })
    }
}
