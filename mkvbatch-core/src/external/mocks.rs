// mkvbatch-core/src/external/mocks.rs

// --- Mocking Infrastructure (for testing) ---

// This module is only compiled when the "test-mocks" feature is enabled.
#![cfg(feature = "test-mocks")]

use super::{FileTransfer, MediaIdentifier, PropertyEditor, Remuxer};
use crate::config::TransferMode;
use crate::error::{CoreError, CoreResult};
use crate::signature::TrackSignature;

use std::cell::RefCell;
use std::collections::HashMap;
use std::os::unix::process::ExitStatusExt; // For ExitStatus::from_raw
use std::path::{Path, PathBuf};
use std::process::ExitStatus;
use std::rc::Rc;

/// Raw wait status for exit code 1.
fn failure_status() -> ExitStatus {
    ExitStatus::from_raw(1 << 8)
}

/// Mock identification facility returning pre-registered signatures by file
/// name, and recording every identify call.
#[derive(Clone, Default)]
pub struct MockIdentifier {
    signatures: Rc<RefCell<HashMap<String, TrackSignature>>>,
    unsupported: Rc<RefCell<Vec<String>>>,
    calls: Rc<RefCell<Vec<PathBuf>>>,
}

impl MockIdentifier {
    pub fn new() -> Self {
        Default::default()
    }

    /// Registers the signature returned for files with the given name.
    pub fn add_signature(&self, file_name: &str, signature: TrackSignature) {
        self.signatures
            .borrow_mut()
            .insert(file_name.to_string(), signature);
    }

    /// Registers a file name for which identification fails.
    pub fn add_unsupported(&self, file_name: &str) {
        self.unsupported.borrow_mut().push(file_name.to_string());
    }

    /// Paths passed to identify, in call order.
    pub fn identify_calls(&self) -> Vec<PathBuf> {
        self.calls.borrow().clone()
    }
}

impl MediaIdentifier for MockIdentifier {
    fn identify(&self, path: &Path) -> CoreResult<TrackSignature> {
        self.calls.borrow_mut().push(path.to_path_buf());

        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();

        if self.unsupported.borrow().contains(&name) {
            return Err(CoreError::UnsupportedFile(path.display().to_string()));
        }

        self.signatures
            .borrow()
            .get(&name)
            .cloned()
            .ok_or_else(|| CoreError::UnsupportedFile(path.display().to_string()))
    }
}

/// One recorded remux invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemuxCall {
    pub output: PathBuf,
    pub options: Vec<String>,
    pub input: PathBuf,
}

/// Mock transformation facility recording calls and creating empty output
/// files, with an optional injected failure for a given input file name.
#[derive(Clone, Default)]
pub struct MockRemuxer {
    calls: Rc<RefCell<Vec<RemuxCall>>>,
    fail_on: Rc<RefCell<Option<String>>>,
}

impl MockRemuxer {
    pub fn new() -> Self {
        Default::default()
    }

    /// Makes remux fail when the input file has the given name.
    pub fn fail_on(&self, file_name: &str) {
        *self.fail_on.borrow_mut() = Some(file_name.to_string());
    }

    pub fn remux_calls(&self) -> Vec<RemuxCall> {
        self.calls.borrow().clone()
    }
}

impl Remuxer for MockRemuxer {
    fn remux(&self, output: &Path, options: &[String], input: &Path) -> CoreResult<()> {
        self.calls.borrow_mut().push(RemuxCall {
            output: output.to_path_buf(),
            options: options.to_vec(),
            input: input.to_path_buf(),
        });

        let name = input
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        if self.fail_on.borrow().as_deref() == Some(name.as_str()) {
            return Err(CoreError::CommandFailed {
                cmd: "mkvmerge".to_string(),
                status: failure_status(),
                stderr: format!("mock failure for {name}"),
            });
        }

        std::fs::write(output, b"")?;
        Ok(())
    }
}

/// Mock copy/move facility performing real std::fs transfers so tests can
/// observe file placement.
#[derive(Clone, Default)]
pub struct MockTransfer {
    calls: Rc<RefCell<Vec<(PathBuf, PathBuf, TransferMode)>>>,
    fail_on: Rc<RefCell<Option<String>>>,
}

impl MockTransfer {
    pub fn new() -> Self {
        Default::default()
    }

    /// Makes transfer fail when the source file has the given name.
    pub fn fail_on(&self, file_name: &str) {
        *self.fail_on.borrow_mut() = Some(file_name.to_string());
    }

    pub fn transfer_calls(&self) -> Vec<(PathBuf, PathBuf, TransferMode)> {
        self.calls.borrow().clone()
    }
}

impl FileTransfer for MockTransfer {
    fn transfer(&self, file: &Path, dest_dir: &Path, mode: TransferMode) -> CoreResult<()> {
        self.calls
            .borrow_mut()
            .push((file.to_path_buf(), dest_dir.to_path_buf(), mode));

        let name = file
            .file_name()
            .ok_or_else(|| CoreError::PathError(format!("no filename: {}", file.display())))?;
        if self.fail_on.borrow().as_deref() == Some(name.to_string_lossy().as_ref()) {
            return Err(CoreError::CommandFailed {
                cmd: "rsync".to_string(),
                status: failure_status(),
                stderr: format!("mock failure for {}", name.to_string_lossy()),
            });
        }

        let dest = dest_dir.join(name);
        std::fs::copy(file, &dest)?;
        if mode == TransferMode::Move {
            std::fs::remove_file(file)?;
        }
        Ok(())
    }
}

/// Mock field deletion facility recording the targets it was invoked on.
#[derive(Clone, Default)]
pub struct MockEditor {
    calls: Rc<RefCell<Vec<PathBuf>>>,
}

impl MockEditor {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn delete_title_calls(&self) -> Vec<PathBuf> {
        self.calls.borrow().clone()
    }
}

impl PropertyEditor for MockEditor {
    fn delete_title(&self, target: &Path) -> CoreResult<()> {
        self.calls.borrow_mut().push(target.to_path_buf());
        Ok(())
    }
}
