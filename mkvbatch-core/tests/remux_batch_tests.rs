// mkvbatch-core/tests/remux_batch_tests.rs
//
// Batch-consistency-gated remux pipeline tests driven by the mock external
// facilities (feature "test-mocks").

use mkvbatch_core::config::CoreConfig;
use mkvbatch_core::discovery::find_matching_files;
use mkvbatch_core::error::CoreError;
use mkvbatch_core::external::mocks::{MockEditor, MockIdentifier, MockRemuxer};
use mkvbatch_core::processing::{remux_batch, RemuxOptions};
use mkvbatch_core::signature::{TrackFields, TrackSignature};
use mkvbatch_core::template::OptionsTemplate;

use std::fs::File;
use std::io::Write;
use std::path::Path;
use tempfile::tempdir;

fn create_dummy_file(dir: &Path, filename: &str) {
    let mut file = File::create(dir.join(filename)).expect("Failed to create dummy file");
    file.write_all(b"dummy content")
        .expect("Failed to write dummy content");
}

fn signature(languages: &[&str]) -> TrackSignature {
    let mut tracks = vec![TrackFields {
        codec: "MPEG-4p10/AVC/H.264".to_string(),
        number: "0".to_string(),
        language: "und".to_string(),
        track_type: "video".to_string(),
    }];
    for (i, lang) in languages.iter().enumerate() {
        tracks.push(TrackFields {
            codec: "AAC".to_string(),
            number: (i + 1).to_string(),
            language: (*lang).to_string(),
            track_type: "audio".to_string(),
        });
    }
    TrackSignature::new(tracks)
}

fn template(tokens: &[&str]) -> OptionsTemplate {
    OptionsTemplate::new(tokens.iter().map(|t| t.to_string()).collect())
}

#[test]
fn test_remux_batch_applies_sanitized_template_to_each_file(
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    create_dummy_file(dir.path(), "ep1.mkv");
    create_dummy_file(dir.path(), "ep2.mkv");

    let identifier = MockIdentifier::new();
    identifier.add_signature("ep1.mkv", signature(&["jpn"]));
    identifier.add_signature("ep2.mkv", signature(&["jpn"]));
    let remuxer = MockRemuxer::new();
    let editor = MockEditor::new();
    let config = CoreConfig::new(dir.path().to_path_buf());

    let t = template(&[
        "--title",
        "Episode 1",
        "--output",
        "/somewhere/ep1-remux.mkv",
        "--audio-tracks",
        "1",
    ]);

    let files = find_matching_files(dir.path(), "mkv")?;
    let results = remux_batch(
        &identifier,
        &remuxer,
        &editor,
        &config,
        &files,
        Some(&t),
        RemuxOptions::default(),
    )?;

    assert_eq!(results.len(), 2);

    let calls = remuxer.remux_calls();
    assert_eq!(calls.len(), 2);
    // Per-file fields were stripped; only the shared pair survives.
    for call in &calls {
        assert_eq!(call.options, ["--audio-tracks", "1"]);
    }
    // Each file's own paths were reinstated.
    assert!(calls[0].input.ends_with("ep1.mkv"));
    assert_eq!(
        calls[0].output,
        dir.path().join("remuxed").join("ep1.mkv")
    );
    assert!(calls[1].input.ends_with("ep2.mkv"));

    // No title stripping was requested.
    assert!(editor.delete_title_calls().is_empty());

    dir.close()?;
    Ok(())
}

#[test]
fn test_remux_batch_rejects_template_on_mismatch() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    create_dummy_file(dir.path(), "ep1.mkv");
    create_dummy_file(dir.path(), "ep2.mkv");
    create_dummy_file(dir.path(), "ep3.mkv");

    let identifier = MockIdentifier::new();
    identifier.add_signature("ep1.mkv", signature(&["jpn"]));
    identifier.add_signature("ep2.mkv", signature(&["jpn", "eng"]));
    identifier.add_signature("ep3.mkv", signature(&["jpn"]));
    let remuxer = MockRemuxer::new();
    let editor = MockEditor::new();
    let config = CoreConfig::new(dir.path().to_path_buf());

    let t = template(&["--audio-tracks", "1"]);
    let baseline = signature(&["jpn"]).fingerprint().to_string();

    let files = find_matching_files(dir.path(), "mkv")?;
    let result = remux_batch(
        &identifier,
        &remuxer,
        &editor,
        &config,
        &files,
        Some(&t),
        RemuxOptions::default(),
    );

    match result {
        Err(CoreError::MetadataMismatch { path, expected }) => {
            assert_eq!(path, "ep2.mkv");
            assert_eq!(expected, baseline);
        }
        other => panic!("Expected MetadataMismatch, got {other:?}"),
    }
    // The mismatch gated the whole batch: nothing was remuxed.
    assert!(remuxer.remux_calls().is_empty());

    dir.close()?;
    Ok(())
}

#[test]
fn test_remux_batch_single_file_is_exempt_from_consistency(
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    create_dummy_file(dir.path(), "only.mkv");

    let identifier = MockIdentifier::new();
    identifier.add_signature("only.mkv", signature(&["jpn", "eng", "ger"]));
    let remuxer = MockRemuxer::new();
    let editor = MockEditor::new();
    let config = CoreConfig::new(dir.path().to_path_buf());

    let t = template(&["--no-track-tags"]);
    let files = find_matching_files(dir.path(), "mkv")?;
    let results = remux_batch(
        &identifier,
        &remuxer,
        &editor,
        &config,
        &files,
        Some(&t),
        RemuxOptions::default(),
    )?;

    assert_eq!(results.len(), 1);
    assert_eq!(remuxer.remux_calls().len(), 1);

    dir.close()?;
    Ok(())
}

#[test]
fn test_remux_batch_scan_headers_verifies_without_acting(
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    create_dummy_file(dir.path(), "ep1.mkv");
    create_dummy_file(dir.path(), "ep2.mkv");

    let identifier = MockIdentifier::new();
    identifier.add_signature("ep1.mkv", signature(&["jpn"]));
    identifier.add_signature("ep2.mkv", signature(&["jpn"]));
    let remuxer = MockRemuxer::new();
    let editor = MockEditor::new();
    let config = CoreConfig::new(dir.path().to_path_buf());

    let files = find_matching_files(dir.path(), "mkv")?;
    let results = remux_batch(
        &identifier,
        &remuxer,
        &editor,
        &config,
        &files,
        None,
        RemuxOptions {
            scan_headers: true,
            strip_titles: false,
        },
    )?;

    assert!(results.is_empty());
    assert!(remuxer.remux_calls().is_empty());
    assert!(!dir.path().join("remuxed").exists());

    dir.close()?;
    Ok(())
}

#[test]
fn test_remux_batch_strip_titles_edits_each_output() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    create_dummy_file(dir.path(), "ep1.mkv");
    create_dummy_file(dir.path(), "ep2.mkv");

    let identifier = MockIdentifier::new();
    identifier.add_signature("ep1.mkv", signature(&["jpn"]));
    identifier.add_signature("ep2.mkv", signature(&["jpn"]));
    let remuxer = MockRemuxer::new();
    let editor = MockEditor::new();
    let config = CoreConfig::new(dir.path().to_path_buf());

    let t = template(&["--no-track-tags"]);
    let files = find_matching_files(dir.path(), "mkv")?;
    remux_batch(
        &identifier,
        &remuxer,
        &editor,
        &config,
        &files,
        Some(&t),
        RemuxOptions {
            scan_headers: false,
            strip_titles: true,
        },
    )?;

    let edits = editor.delete_title_calls();
    assert_eq!(edits.len(), 2);
    assert!(edits[0].ends_with("remuxed/ep1.mkv"));
    assert!(edits[1].ends_with("remuxed/ep2.mkv"));

    dir.close()?;
    Ok(())
}

#[test]
fn test_remux_batch_template_output_extension_applies() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    create_dummy_file(dir.path(), "ep1.mkv");

    let identifier = MockIdentifier::new();
    identifier.add_signature("ep1.mkv", signature(&["jpn"]));
    let remuxer = MockRemuxer::new();
    let editor = MockEditor::new();
    let config = CoreConfig::new(dir.path().to_path_buf());

    let t = template(&["--output", "/somewhere/sample.webm", "--no-chapters"]);
    let files = find_matching_files(dir.path(), "mkv")?;
    let results = remux_batch(
        &identifier,
        &remuxer,
        &editor,
        &config,
        &files,
        Some(&t),
        RemuxOptions::default(),
    )?;

    assert_eq!(
        results[0].output,
        dir.path().join("remuxed").join("ep1.webm")
    );

    dir.close()?;
    Ok(())
}

#[test]
fn test_remux_batch_aborts_on_first_failure_keeping_prior_outputs(
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    for name in ["a.mkv", "b.mkv", "c.mkv"] {
        create_dummy_file(dir.path(), name);
    }

    let identifier = MockIdentifier::new();
    for name in ["a.mkv", "b.mkv", "c.mkv"] {
        identifier.add_signature(name, signature(&["jpn"]));
    }
    let remuxer = MockRemuxer::new();
    remuxer.fail_on("b.mkv");
    let editor = MockEditor::new();
    let config = CoreConfig::new(dir.path().to_path_buf());

    let t = template(&["--no-track-tags"]);
    let files = find_matching_files(dir.path(), "mkv")?;
    let result = remux_batch(
        &identifier,
        &remuxer,
        &editor,
        &config,
        &files,
        Some(&t),
        RemuxOptions::default(),
    );

    assert!(matches!(result, Err(CoreError::CommandFailed { .. })));

    // a.mkv's output was produced before the failure and remains in place;
    // c.mkv was never attempted.
    assert!(dir.path().join("remuxed").join("a.mkv").is_file());
    assert!(!dir.path().join("remuxed").join("c.mkv").exists());
    assert_eq!(remuxer.remux_calls().len(), 2);

    dir.close()?;
    Ok(())
}

#[test]
fn test_remux_batch_without_template_rebuilds_plainly() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    create_dummy_file(dir.path(), "ep1.mkv");
    create_dummy_file(dir.path(), "ep2.mkv");

    // Divergent structures: without a shared template there is no
    // consistency gate to fail.
    let identifier = MockIdentifier::new();
    identifier.add_signature("ep1.mkv", signature(&["jpn"]));
    identifier.add_signature("ep2.mkv", signature(&["jpn", "eng"]));
    let remuxer = MockRemuxer::new();
    let editor = MockEditor::new();
    let config = CoreConfig::new(dir.path().to_path_buf());

    let files = find_matching_files(dir.path(), "mkv")?;
    let results = remux_batch(
        &identifier,
        &remuxer,
        &editor,
        &config,
        &files,
        None,
        RemuxOptions::default(),
    )?;

    assert_eq!(results.len(), 2);
    for call in remuxer.remux_calls() {
        assert!(call.options.is_empty());
    }

    dir.close()?;
    Ok(())
}
