// ============================================================================
// mkvbatch-core/src/processing/remux.rs
// ============================================================================
//
// REMUXING: Batch-Consistency-Gated Shared Transformation
//
// Applies one shared options template to every file of a batch. The template
// was authored against a single reference file, so it is only applicable when
// every file in the batch shares that file's track structure; the consistency
// check gates the whole run and rejects the template for the batch on the
// first divergent fingerprint.
//
// WORKFLOW:
// 1. Extract the track signature of every file (any failure is fatal)
// 2. Verify all fingerprints match the baseline (single-file batches exempt)
// 3. In scan-headers mode, report the verdict and stop
// 4. Sanitize the template (strip per-file fields)
// 5. For each file, remux into the output directory with this file's own
//    paths reinstated, then optionally strip the title of the produced
//    output, aborting on the first failure

// ---- Internal crate imports ----
use crate::classify::{extract_records, verify};
use crate::config::{CoreConfig, REMUX_OUTPUT_DIR};
use crate::error::CoreResult;
use crate::external::{MediaIdentifier, PropertyEditor, Remuxer};
use crate::template::OptionsTemplate;
use crate::utils::get_filename_safe;

// ---- External crate imports ----
use colored::*;
use log::info;

// ---- Standard library imports ----
use std::path::PathBuf;

/// Per-run switches for the remux pipeline.
#[derive(Debug, Clone, Copy, Default)]
pub struct RemuxOptions {
    /// Run the consistency verification only; take no action.
    pub scan_headers: bool,
    /// Delete the title field of each produced output.
    pub strip_titles: bool,
}

/// Result of one successful per-file remux.
#[derive(Debug, Clone)]
pub struct RemuxResult {
    pub filename: String,
    pub output: PathBuf,
    pub input_size: u64,
    pub output_size: u64,
}

/// Remuxes a whole batch with one shared options template.
///
/// When `template` is `None` (no shared template file in the working
/// directory), each file is rebuilt with no extra options and the consistency
/// gate is skipped: with no shared recipe there is nothing for a divergent
/// track structure to invalidate. With a template, a
/// [`crate::CoreError::MetadataMismatch`] from the gate rejects the template
/// for the whole batch before any file is touched.
///
/// Files are processed strictly sequentially in enumeration order with
/// 1-based `i/total` progress. The first failure aborts the batch;
/// already-produced outputs remain in place.
pub fn remux_batch<I, R, E>(
    identifier: &I,
    remuxer: &R,
    editor: &E,
    config: &CoreConfig,
    files: &[PathBuf],
    template: Option<&OptionsTemplate>,
    options: RemuxOptions,
) -> CoreResult<Vec<RemuxResult>>
where
    I: MediaIdentifier + ?Sized,
    R: Remuxer + ?Sized,
    E: PropertyEditor + ?Sized,
{
    info!(
        "Extracting track signatures for {} file(s) in {}",
        files.len(),
        config.input_dir.display()
    );
    let records = extract_records(identifier, files)?;

    if template.is_some() || options.scan_headers {
        verify(&records)?;
        if let Some(first) = records.first() {
            println!(
                "{}",
                format!(
                    "All {} file(s) share fingerprint {}.",
                    records.len(),
                    first.fingerprint
                )
                .green()
            );
        }
    }

    if options.scan_headers {
        return Ok(Vec::new());
    }

    let sanitized = template.map(OptionsTemplate::sanitize);
    let shared_tokens: &[String] = sanitized.as_ref().map_or(&[], |s| s.tokens());

    let output_ext = template
        .and_then(OptionsTemplate::output_extension)
        .unwrap_or_else(|| config.extension.clone());
    let output_dir = config.input_dir.join(REMUX_OUTPUT_DIR);
    std::fs::create_dir_all(&output_dir)?;

    let total = records.len();
    let mut results = Vec::with_capacity(total);
    for (i, record) in records.iter().enumerate() {
        let filename = get_filename_safe(&record.path)?;
        let output = output_dir
            .join(&filename)
            .with_extension(&output_ext);

        println!(
            "{} Remuxing {}",
            format!("[{}/{}]", i + 1, total).bold(),
            filename
        );
        remuxer.remux(&output, shared_tokens, &record.path)?;

        if options.strip_titles {
            editor.delete_title(&output)?;
        }

        let input_size = std::fs::metadata(&record.path).map(|m| m.len()).unwrap_or(0);
        let output_size = std::fs::metadata(&output).map(|m| m.len()).unwrap_or(0);
        results.push(RemuxResult {
            filename,
            output,
            input_size,
            output_size,
        });
    }

    println!("{}", format!("Remuxed {} file(s).", results.len()).green());
    Ok(results)
}
