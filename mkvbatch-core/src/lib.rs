//! Core library for track-structure classification and batch remuxing of
//! container-format media files.
//!
//! This crate reasons about the *shape* of a file's track metadata - codec,
//! track number, language and track type, in native container order - never
//! about its payload. A canonical fingerprint derived from that shape drives
//! two batch pipelines: routing files into fingerprint-named group
//! directories, and gating one shared remux recipe behind a whole-batch
//! consistency check.
//!
//! ## Usage Example
//!
//! ```rust,no_run
//! use mkvbatch_core::{CoreConfig, find_matching_files, route_files};
//! use mkvbatch_core::external::{MkvmergeIdentifier, RsyncTransfer};
//! use std::path::PathBuf;
//!
//! let config = CoreConfig::new(PathBuf::from("/path/to/videos"));
//! let files = find_matching_files(&config.input_dir, &config.extension).unwrap();
//!
//! let identifier = MkvmergeIdentifier::new();
//! let transfer = RsyncTransfer::new();
//! let summary = route_files(&identifier, &transfer, &config, &files, false).unwrap();
//! println!("{} group(s)", summary.groups.len());
//! ```

pub mod classify;
pub mod config;
pub mod discovery;
pub mod error;
pub mod external;
pub mod processing;
pub mod signature;
pub mod template;
pub mod utils;

// Re-exports for public API
pub use classify::{classify, extract_records, verify, FileRecord};
pub use config::{CoreConfig, TransferMode, DEFAULT_EXTENSION, TEMPLATE_FILE_NAME};
pub use discovery::find_matching_files;
pub use error::{CoreError, CoreResult};
pub use external::verify_dependencies;
pub use processing::{remux_batch, route_files, RemuxOptions, RemuxResult, RouteSummary};
pub use signature::{Fingerprint, TrackFields, TrackSignature};
pub use template::{OptionsTemplate, SanitizedTemplate};
pub use utils::format_bytes;
