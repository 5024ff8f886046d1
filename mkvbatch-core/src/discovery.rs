//! File discovery module for finding container files to process.
//!
//! Scans the top level of the working directory for files matching the active
//! extension (case-insensitive) and returns them in lexicographic path order.
//! That order is the fixed enumeration order used by the consistency check
//! and by every per-file action, so "first divergence" and "i/total" progress
//! are stable and reproducible.

use crate::error::{CoreError, CoreResult};

use std::path::{Path, PathBuf};

/// Finds files matching the given extension in the specified directory.
///
/// Only the top level of `input_dir` is searched; subdirectories (such as
/// previously created group or output directories) are ignored. The extension
/// comparison is case-insensitive. The result is sorted lexicographically.
///
/// # Returns
///
/// * `Ok(Vec<PathBuf>)` - Sorted paths of the discovered files
/// * `Err(CoreError::NoFilesFound)` - If no files match the extension
pub fn find_matching_files(input_dir: &Path, extension: &str) -> CoreResult<Vec<PathBuf>> {
    let read_dir = std::fs::read_dir(input_dir)?;
    let mut files: Vec<PathBuf> = read_dir
        .filter_map(|entry| {
            let entry = entry.ok()?;
            let path = entry.path();

            if !path.is_file() {
                return None;
            }

            path.extension()
                .and_then(|ext| ext.to_str())
                .filter(|ext_str| ext_str.eq_ignore_ascii_case(extension))
                .map(|_| path.clone())
        })
        .collect();

    if files.is_empty() {
        return Err(CoreError::NoFilesFound);
    }

    files.sort();
    Ok(files)
}
