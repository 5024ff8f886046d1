//! rsync-based file transfer for routing files into group directories.
//!
//! rsync is used rather than a plain copy so an interrupted batch can be
//! resumed: `--partial` keeps incomplete transfers and a re-run skips files
//! that already arrived intact, making re-routing an already-routed file a
//! cheap no-op.

use crate::config::TransferMode;
use crate::error::{command_failed_error, command_start_error, CoreResult};

use std::path::Path;
use std::process::Command;

use super::FileTransfer;

/// Copy/move facility backed by `rsync -a --partial`.
#[derive(Debug, Clone, Default)]
pub struct RsyncTransfer;

impl RsyncTransfer {
    pub fn new() -> Self {
        RsyncTransfer
    }
}

impl FileTransfer for RsyncTransfer {
    fn transfer(&self, file: &Path, dest_dir: &Path, mode: TransferMode) -> CoreResult<()> {
        log::debug!(
            "Transferring ({:?}) {} -> {}",
            mode,
            file.display(),
            dest_dir.display()
        );

        let mut cmd = Command::new("rsync");
        cmd.arg("-a").arg("--partial");
        if mode == TransferMode::Move {
            cmd.arg("--remove-source-files");
        }
        // Trailing slash so rsync treats the destination as a directory.
        let mut dest = dest_dir.as_os_str().to_os_string();
        dest.push("/");
        cmd.arg(file).arg(dest);

        let output = cmd
            .output()
            .map_err(|e| command_start_error("rsync", e))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).into_owned();
            return Err(command_failed_error("rsync", output.status, stderr));
        }

        Ok(())
    }
}
