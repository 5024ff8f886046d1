//! mkvmerge integration for track identification and container remuxing.
//!
//! Identification uses `mkvmerge -J`, which prints a JSON document with one
//! entry per track in the container's native order. Exactly four fields per
//! track are extracted: codec, track number, language and track type.
//! Remuxing passes `-o <output> <options...> <input>` to mkvmerge through a
//! temporary JSON option file (`mkvmerge @file.json`).

use crate::error::{command_failed_error, command_start_error, CoreError, CoreResult};
use crate::signature::{TrackFields, TrackSignature};

use serde::Deserialize;
use std::io::Write;
use std::path::Path;
use std::process::Command;

use super::{MediaIdentifier, Remuxer};

/// Language reported when a track carries no language element.
const UNDETERMINED_LANGUAGE: &str = "und";

// ---- mkvmerge -J output (the subset we read) ----

#[derive(Debug, Deserialize)]
struct IdentifyOutput {
    #[serde(default)]
    container: IdentifyContainer,
    #[serde(default)]
    tracks: Vec<IdentifyTrack>,
}

#[derive(Debug, Default, Deserialize)]
struct IdentifyContainer {
    #[serde(default)]
    recognized: bool,
    #[serde(default)]
    supported: bool,
}

#[derive(Debug, Deserialize)]
struct IdentifyTrack {
    id: u64,
    codec: String,
    #[serde(rename = "type")]
    track_type: String,
    #[serde(default)]
    properties: IdentifyTrackProperties,
}

#[derive(Debug, Default, Deserialize)]
struct IdentifyTrackProperties {
    language: Option<String>,
}

/// Identification facility backed by `mkvmerge -J`.
#[derive(Debug, Clone, Default)]
pub struct MkvmergeIdentifier;

impl MkvmergeIdentifier {
    pub fn new() -> Self {
        MkvmergeIdentifier
    }
}

impl MediaIdentifier for MkvmergeIdentifier {
    fn identify(&self, path: &Path) -> CoreResult<TrackSignature> {
        log::debug!("Running mkvmerge -J on: {}", path.display());

        let output = Command::new("mkvmerge")
            .arg("-J")
            .arg(path)
            .output()
            .map_err(|e| command_start_error("mkvmerge -J", e))?;

        if !output.status.success() {
            log::error!(
                "mkvmerge -J failed for {} with status {}",
                path.display(),
                output.status
            );
            return Err(CoreError::UnsupportedFile(path.display().to_string()));
        }

        signature_from_identify_json(&output.stdout, path)
    }
}

/// Converts `mkvmerge -J` stdout into a track signature.
///
/// mkvmerge exits 0 even for a container it cannot read, reporting the
/// problem only through the `container` object; such files are rejected here
/// rather than collapsing into the empty-signature class.
fn signature_from_identify_json(stdout: &[u8], path: &Path) -> CoreResult<TrackSignature> {
    let parsed: IdentifyOutput = serde_json::from_slice(stdout).map_err(|e| {
        log::error!("Unparseable mkvmerge -J output for {}: {e}", path.display());
        CoreError::UnsupportedFile(path.display().to_string())
    })?;

    if !parsed.container.recognized || !parsed.container.supported {
        log::error!(
            "mkvmerge does not recognize the container of {}",
            path.display()
        );
        return Err(CoreError::UnsupportedFile(path.display().to_string()));
    }

    let tracks = parsed
        .tracks
        .into_iter()
        .map(|t| TrackFields {
            codec: t.codec,
            number: t.id.to_string(),
            language: t
                .properties
                .language
                .unwrap_or_else(|| UNDETERMINED_LANGUAGE.to_string()),
            track_type: t.track_type,
        })
        .collect();

    Ok(TrackSignature::new(tracks))
}

/// Transformation facility backed by `mkvmerge`.
#[derive(Debug, Clone, Default)]
pub struct MkvmergeRemuxer;

impl MkvmergeRemuxer {
    pub fn new() -> Self {
        MkvmergeRemuxer
    }
}

impl Remuxer for MkvmergeRemuxer {
    fn remux(&self, output: &Path, options: &[String], input: &Path) -> CoreResult<()> {
        log::debug!(
            "Running mkvmerge remux: {} -> {} ({} shared option tokens)",
            input.display(),
            output.display(),
            options.len()
        );

        // All arguments go through a JSON option file (mkvmerge's @file.json
        // mechanism). The temp file is removed on drop, on success and on
        // every failure path alike, so an interrupted run leaves no stray
        // option-file artifacts behind.
        let mut args: Vec<String> = Vec::with_capacity(options.len() + 3);
        args.push("-o".to_string());
        args.push(output.display().to_string());
        args.extend(options.iter().cloned());
        args.push(input.display().to_string());

        let mut option_file = tempfile::Builder::new()
            .prefix("mkvbatch-options-")
            .suffix(".json")
            .tempfile()?;
        serde_json::to_writer(&mut option_file, &args)
            .map_err(|e| CoreError::JsonParse(format!("option file serialization: {e}")))?;
        option_file.flush()?;

        let result = Command::new("mkvmerge")
            .arg(format!("@{}", option_file.path().display()))
            .output()
            .map_err(|e| command_start_error("mkvmerge", e))?;

        if !result.status.success() {
            let stderr = String::from_utf8_lossy(&result.stderr).into_owned();
            // mkvmerge writes its diagnostics to stdout; prefer stderr only
            // when non-empty.
            let detail = if stderr.trim().is_empty() {
                String::from_utf8_lossy(&result.stdout).into_owned()
            } else {
                stderr
            };
            return Err(command_failed_error("mkvmerge", result.status, detail));
        }

        Ok(())
    }
}
