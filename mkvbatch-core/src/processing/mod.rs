//! Batch execution logic and orchestration.
//!
//! This module holds the two batch pipelines built on the classifier: split
//! mode routing (group files by fingerprint and transfer them into
//! fingerprint-named directories) and batch-consistency-gated remuxing (verify
//! one shared fingerprint, then apply a sanitized shared options template to
//! every file). Both process files strictly sequentially in enumeration order
//! and abort on the first failure, leaving already-completed outputs in place.

/// Split mode: grouping and routing into fingerprint-named directories
pub mod route;

/// Batch-consistency-gated shared remuxing
pub mod remux;

pub use remux::{remux_batch, RemuxOptions, RemuxResult};
pub use route::{route_files, RouteSummary};
