// ============================================================================
// mkvbatch-core/src/processing/route.rs
// ============================================================================
//
// ROUTING: Split-Mode Grouping and File Placement
//
// Partitions a batch into equivalence groups by track-structure fingerprint
// and routes each file into a directory named after its group's fingerprint.
// The grouping summary is always reported before any action, so scan-only
// runs share the exact code path that a routing run takes up to the point of
// acting.
//
// WORKFLOW:
// 1. Extract the track signature of every file (any failure is fatal)
// 2. Classify records into fingerprint-keyed groups
// 3. Report the grouping summary
// 4. Unless scan-only: create each group directory and transfer each file,
//    in enumeration order, aborting on the first failure

// ---- Internal crate imports ----
use crate::classify::{classify, extract_records, FileRecord};
use crate::config::CoreConfig;
use crate::error::CoreResult;
use crate::external::{FileTransfer, MediaIdentifier};
use crate::signature::Fingerprint;
use crate::utils::{format_bytes, get_filename_safe};

// ---- External crate imports ----
use colored::*;
use log::info;

// ---- Standard library imports ----
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Outcome of a routing run: the computed grouping, plus how many files were
/// actually transferred (zero in scan-only mode).
#[derive(Debug)]
pub struct RouteSummary {
    pub groups: BTreeMap<Fingerprint, Vec<FileRecord>>,
    pub transferred: usize,
}

/// Routes a batch of files into fingerprint-named group directories.
///
/// With `scan_only` set, stops after reporting the grouping summary; no
/// directory is created and no file is touched.
///
/// Transfers run strictly sequentially in enumeration order with 1-based
/// `i/total` progress. The first transfer failure aborts the batch; files
/// already routed stay where they are, and re-running after fixing the cause
/// resumes cheaply because the transfer facility is incremental.
pub fn route_files<I, T>(
    identifier: &I,
    transfer: &T,
    config: &CoreConfig,
    files: &[PathBuf],
    scan_only: bool,
) -> CoreResult<RouteSummary>
where
    I: MediaIdentifier + ?Sized,
    T: FileTransfer + ?Sized,
{
    info!(
        "Extracting track signatures for {} file(s) in {}",
        files.len(),
        config.input_dir.display()
    );
    let records = extract_records(identifier, files)?;
    let groups = classify(&records);

    print_summary(&groups);

    if scan_only {
        return Ok(RouteSummary {
            groups,
            transferred: 0,
        });
    }

    for fingerprint in groups.keys() {
        let group_dir = config.input_dir.join(fingerprint.to_string());
        std::fs::create_dir_all(group_dir)?;
    }

    let total = records.len();
    let mut transferred = 0;
    for (i, record) in records.iter().enumerate() {
        let filename = get_filename_safe(&record.path)?;
        let group_dir = config.input_dir.join(record.fingerprint.to_string());
        println!(
            "{} {} -> {}/",
            format!("[{}/{}]", i + 1, total).bold(),
            filename,
            record.fingerprint
        );
        transfer.transfer(&record.path, &group_dir, config.transfer_mode)?;
        transferred += 1;
    }

    println!("{}", format!("Routed {transferred} file(s).").green());
    Ok(RouteSummary { groups, transferred })
}

fn print_summary(groups: &BTreeMap<Fingerprint, Vec<FileRecord>>) {
    let total: usize = groups.values().map(Vec::len).sum();
    println!(
        "{}",
        format!("{} distinct track structure(s) across {} file(s):", groups.len(), total).bold()
    );
    for (fingerprint, group) in groups {
        let bytes: u64 = group
            .iter()
            .filter_map(|r| std::fs::metadata(&r.path).ok())
            .map(|m| m.len())
            .sum();
        println!(
            "  {}  {} file(s), {}",
            fingerprint.to_string().cyan(),
            group.len(),
            format_bytes(bytes)
        );
        for record in group {
            if let Ok(name) = get_filename_safe(&record.path) {
                println!("    {name}");
            }
        }
    }
}
