// ============================================================================
// mkvbatch-core/src/config.rs
// ============================================================================
//
// CONFIGURATION: Core Configuration Structures and Constants
//
// This module defines the configuration value threaded through the whole
// Discover -> Classify/Verify -> Act pipeline. It replaces ambient run state
// (active extension filter, file-operation mode) with one explicit value
// created by the consumer of the library (mkvbatch-cli) and passed to the
// processing entry points.

// ---- Standard library imports ----
use std::path::PathBuf;

// ============================================================================
// DEFAULT CONSTANTS
// ============================================================================

/// Default file extension filter used by discovery when neither the command
/// line nor an options template overrides it.
pub const DEFAULT_EXTENSION: &str = "mkv";

/// Well-known name of the optional shared options template in the working
/// directory. Its presence switches the remux tool into
/// batch-consistency-gated mode.
pub const TEMPLATE_FILE_NAME: &str = "remux-options.json";

/// Name of the output directory (under the working directory) that remuxed
/// files are written into.
pub const REMUX_OUTPUT_DIR: &str = "remuxed";

// ============================================================================
// FILE TRANSFER MODE
// ============================================================================

/// How routed files are placed into their fingerprint-named group directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransferMode {
    /// Copy the file, leaving the original in place.
    Copy,
    /// Relocate the file, removing the original after a complete transfer.
    Move,
}

// ============================================================================
// CORE CONFIGURATION
// ============================================================================

/// Main configuration structure for the mkvbatch-core library.
///
/// Holds the working directory, the active extension filter and the chosen
/// transfer mode for one batch run. Immutable for the duration of the run.
#[derive(Debug, Clone)]
pub struct CoreConfig {
    /// Directory whose top-level files form the batch.
    pub input_dir: PathBuf,

    /// Active file extension filter (without the leading dot), matched
    /// case-insensitively by discovery.
    pub extension: String,

    /// Whether routing copies or moves files into group directories.
    pub transfer_mode: TransferMode,
}

impl CoreConfig {
    /// Creates a configuration with the default extension filter and copy
    /// transfer mode.
    pub fn new(input_dir: PathBuf) -> Self {
        CoreConfig {
            input_dir,
            extension: DEFAULT_EXTENSION.to_string(),
            transfer_mode: TransferMode::Copy,
        }
    }
}
