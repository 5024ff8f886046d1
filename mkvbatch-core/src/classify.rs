//! Classification of file records by track-structure fingerprint.
//!
//! Two modes share the fingerprint function. Split mode partitions a batch
//! into equivalence groups keyed by fingerprint; batch-consistency mode
//! verifies the whole batch shares one fingerprint before a single shared
//! transformation is applied to all of it.

use crate::error::{CoreError, CoreResult};
use crate::signature::{Fingerprint, TrackSignature};

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// One discovered file with its extracted signature and derived fingerprint.
/// Immutable once built; discarded after the batch action completes.
#[derive(Debug, Clone)]
pub struct FileRecord {
    pub path: PathBuf,
    pub signature: TrackSignature,
    pub fingerprint: Fingerprint,
}

impl FileRecord {
    pub fn new(path: PathBuf, signature: TrackSignature) -> Self {
        let fingerprint = signature.fingerprint();
        FileRecord {
            path,
            signature,
            fingerprint,
        }
    }
}

/// Builds file records for a batch by extracting each file's signature in
/// enumeration order.
///
/// Any extraction failure is fatal to the whole run; there is no
/// partial-skip mode.
pub fn extract_records<I>(identifier: &I, files: &[PathBuf]) -> CoreResult<Vec<FileRecord>>
where
    I: crate::external::MediaIdentifier + ?Sized,
{
    let mut records = Vec::with_capacity(files.len());
    for path in files {
        let signature = identifier.identify(path)?;
        records.push(FileRecord::new(path.clone(), signature));
    }
    Ok(records)
}

/// Split mode: partitions records into equivalence groups keyed by
/// fingerprint.
///
/// There is no error condition; a single distinct fingerprint is a valid
/// (trivial) grouping. Within a group, records keep their enumeration order.
/// The map is ordered so summaries and group-directory creation are
/// deterministic.
pub fn classify(records: &[FileRecord]) -> BTreeMap<Fingerprint, Vec<FileRecord>> {
    let mut groups: BTreeMap<Fingerprint, Vec<FileRecord>> = BTreeMap::new();
    for record in records {
        groups
            .entry(record.fingerprint)
            .or_default()
            .push(record.clone());
    }
    groups
}

/// Batch-consistency mode: verifies all records share one fingerprint.
///
/// The fingerprint of the first record (in enumeration order) is the
/// baseline. On the first divergence the scan stops immediately and the
/// offending record plus the baseline are reported; remaining records are not
/// examined, since one mismatch already proves the shared transformation
/// inapplicable. A batch of exactly one file is always `Ok` - single-file
/// batches are exempt from consistency requirements by definition.
pub fn verify(records: &[FileRecord]) -> CoreResult<()> {
    let Some(first) = records.first() else {
        return Ok(());
    };
    let baseline = first.fingerprint;

    for record in &records[1..] {
        if record.fingerprint != baseline {
            log::error!(
                "Fingerprint mismatch: {} has {}, baseline is {}",
                record.path.display(),
                record.fingerprint,
                baseline
            );
            return Err(CoreError::MetadataMismatch {
                path: display_name(&record.path),
                expected: baseline.to_string(),
            });
        }
    }
    Ok(())
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}
