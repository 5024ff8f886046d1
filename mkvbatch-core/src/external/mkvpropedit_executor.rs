//! mkvpropedit integration for post-hoc container field deletion.

use crate::error::{command_failed_error, command_start_error, CoreResult};

use std::path::Path;
use std::process::Command;

use super::PropertyEditor;

/// Field deletion facility backed by `mkvpropedit`.
#[derive(Debug, Clone, Default)]
pub struct MkvpropeditEditor;

impl MkvpropeditEditor {
    pub fn new() -> Self {
        MkvpropeditEditor
    }
}

impl PropertyEditor for MkvpropeditEditor {
    fn delete_title(&self, target: &Path) -> CoreResult<()> {
        log::debug!("Deleting title field of: {}", target.display());

        let output = Command::new("mkvpropedit")
            .arg(target)
            .arg("--delete")
            .arg("title")
            .output()
            .map_err(|e| command_start_error("mkvpropedit", e))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).into_owned();
            return Err(command_failed_error("mkvpropedit", output.status, stderr));
        }

        Ok(())
    }
}
