//! Error types for the mkvbatch-core library.
//!
//! Every failure is fatal to the current run: there is no retry of external
//! invocations and no partial-skip mode. The CLI maps these variants onto
//! process exit codes (0 success, 1 file-system/external failure, 2 metadata
//! consistency failure).

use std::process::ExitStatus;
use thiserror::Error;

/// Custom error types for mkvbatch
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Discovery found zero files for the active extension.
    #[error("No matching files found in the input directory")]
    NoFilesFound,

    /// The identification facility could not parse a file.
    #[error("Unsupported or unreadable media file: {0}")]
    UnsupportedFile(String),

    /// Batch-consistency check found a divergent fingerprint.
    ///
    /// `expected` is the baseline fingerprint taken from the first file in
    /// enumeration order; `path` names the first file that diverged from it.
    #[error("Track metadata of '{path}' does not match baseline fingerprint {expected}")]
    MetadataMismatch { path: String, expected: String },

    /// A required external tool is not installed or not on PATH.
    #[error("Required external tool not found: {0}")]
    DependencyNotFound(String),

    #[error("Failed to start external command '{0}': {1}")]
    CommandStart(String, #[source] std::io::Error),

    #[error("External command '{cmd}' failed with status {status}: {stderr}")]
    CommandFailed {
        cmd: String,
        status: ExitStatus,
        stderr: String,
    },

    /// The shared options template could not be read or is malformed.
    #[error("Invalid options template: {0}")]
    TemplateInvalid(String),

    #[error("Failed to parse JSON output: {0}")]
    JsonParse(String),

    #[error("Invalid path: {0}")]
    PathError(String),
}

/// Result type for mkvbatch operations
pub type CoreResult<T> = std::result::Result<T, CoreError>;

/// Builds a `CommandFailed` error from a finished command's status and stderr.
pub fn command_failed_error(
    cmd: impl Into<String>,
    status: ExitStatus,
    stderr: impl Into<String>,
) -> CoreError {
    CoreError::CommandFailed {
        cmd: cmd.into(),
        status,
        stderr: stderr.into(),
    }
}

/// Builds a `CommandStart` error for a command that could not be spawned.
pub fn command_start_error(cmd: impl Into<String>, err: std::io::Error) -> CoreError {
    CoreError::CommandStart(cmd.into(), err)
}
