// ============================================================================
// mkvbatch-core/src/external/mod.rs
// ============================================================================
//
// EXTERNAL TOOLS: Interactions with External CLI Tools
//
// This module encapsulates every interaction with external command-line
// tools: mkvmerge (identification and remuxing), rsync (incremental file
// transfer) and mkvpropedit (post-hoc field deletion). Each facility is
// modeled as a narrow trait with one concrete implementation, so the
// processing pipeline can be exercised in tests with fakes instead of real
// external tools.

// ---- Internal crate imports ----
use crate::config::TransferMode;
use crate::error::{CoreError, CoreResult};
use crate::signature::TrackSignature;

// ---- Standard library imports ----
use std::io;
use std::path::Path;
use std::process::{Command, Stdio};

// ============================================================================
// SUBMODULES
// ============================================================================

/// mkvmerge-based identification and remuxing
pub mod mkvmerge_executor;

/// mkvpropedit-based container field deletion
pub mod mkvpropedit_executor;

/// rsync-based incremental file transfer
pub mod rsync_executor;

/// Mock implementations for testing (feature "test-mocks")
pub mod mocks;

// ============================================================================
// RE-EXPORTS
// ============================================================================

pub use mkvmerge_executor::{MkvmergeIdentifier, MkvmergeRemuxer};
pub use mkvpropedit_executor::MkvpropeditEditor;
pub use rsync_executor::RsyncTransfer;

// ============================================================================
// FACILITY TRAITS
// ============================================================================

/// Identification facility: extracts the ordered track signature of a
/// container file.
pub trait MediaIdentifier {
    /// Returns the track signature of `path`, preserving the container's
    /// native track order.
    ///
    /// Fails with [`CoreError::UnsupportedFile`] if the facility reports a
    /// non-zero status or its output cannot be parsed. Extraction failure is
    /// permanent for that file within a run; there is no retry.
    fn identify(&self, path: &Path) -> CoreResult<TrackSignature>;
}

/// Transformation facility: rewrites a container file using a list of option
/// tokens.
pub trait Remuxer {
    /// Produces a rewritten container at `output` from `input`, applying the
    /// given shared option tokens.
    fn remux(&self, output: &Path, options: &[String], input: &Path) -> CoreResult<()>;
}

/// Copy/move facility: transfers a file into a target directory.
pub trait FileTransfer {
    /// Transfers `file` into `dest_dir`, relocating it when `mode` is
    /// [`TransferMode::Move`]. Implementations should transfer incrementally
    /// so an interrupted batch can be resumed without re-transferring
    /// already-complete files.
    fn transfer(&self, file: &Path, dest_dir: &Path, mode: TransferMode) -> CoreResult<()>;
}

/// Post-hoc field deletion facility for already-produced outputs.
pub trait PropertyEditor {
    /// Deletes the container title field of `target`.
    fn delete_title(&self, target: &Path) -> CoreResult<()>;
}

// ============================================================================
// DEPENDENCY CHECKING
// ============================================================================

/// Checks that a required external command is available and executable.
///
/// Runs the command with `--version` and discards its output; only the fact
/// that it could be spawned matters.
pub(crate) fn check_dependency(cmd_name: &str) -> CoreResult<()> {
    let result = Command::new(cmd_name)
        .arg("--version")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status();

    match result {
        Ok(_) => {
            log::debug!("Found dependency: {cmd_name}");
            Ok(())
        }
        Err(e) => {
            if e.kind() == io::ErrorKind::NotFound {
                log::warn!("Dependency '{cmd_name}' not found.");
                Err(CoreError::DependencyNotFound(cmd_name.to_string()))
            } else {
                log::error!("Failed to start dependency check command '{cmd_name}': {e}");
                Err(CoreError::CommandStart(cmd_name.to_string(), e))
            }
        }
    }
}

/// Verifies that every named external tool is installed, before any file
/// discovery takes place.
///
/// # Returns
///
/// * `Ok(())` - All tools were found
/// * `Err(CoreError::DependencyNotFound)` - Naming the first missing tool
pub fn verify_dependencies(tools: &[&str]) -> CoreResult<()> {
    for tool in tools {
        check_dependency(tool)?;
    }
    Ok(())
}
