//! Shared remux options template loading and sanitization.
//!
//! The template is a JSON array of option tokens in the mkvmerge option-file
//! format (the document mkvmerge consumes via `@file.json`), typically saved
//! by a GUI muxer for one reference file of the batch. To reuse it across a
//! whole batch, the fields that are inherently per-file are stripped:
//! input/output paths, the title, the UI-language selector and per-track
//! display names. Everything else - the shared option structure - survives
//! unchanged and in original relative order.
//!
//! Stripping operates on the parsed token sequence, removing each per-file
//! flag together with its following value token. A flag whose value contains
//! embedded line terminators is therefore stripped correctly; token
//! boundaries come from the JSON document, not from line structure.

use crate::error::{CoreError, CoreResult};

use std::path::Path;

/// Flags whose (flag, value) pair is inherently per-file and must not be
/// shared across a batch. `-o` is mkvmerge's short form of `--output`.
const PER_FILE_FLAGS: [&str; 5] = ["--output", "-o", "--title", "--ui-language", "--track-name"];

/// Shared transformation template as loaded from disk: an ordered token
/// stream of shared options with per-file fields interleaved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionsTemplate {
    pub tokens: Vec<String>,
}

impl OptionsTemplate {
    pub fn new(tokens: Vec<String>) -> Self {
        OptionsTemplate { tokens }
    }

    /// Loads a template from a JSON array-of-strings file.
    pub fn load(path: &Path) -> CoreResult<Self> {
        let data = std::fs::read_to_string(path).map_err(|e| {
            CoreError::TemplateInvalid(format!("cannot read {}: {e}", path.display()))
        })?;
        let tokens: Vec<String> = serde_json::from_str(&data).map_err(|e| {
            CoreError::TemplateInvalid(format!("{} is not a JSON token array: {e}", path.display()))
        })?;
        Ok(OptionsTemplate::new(tokens))
    }

    /// Strips all per-file fields, leaving only shared options.
    ///
    /// Removed, when present: the `--output`/`-o`, `--title`, `--ui-language`
    /// and `--track-name` pairs (flag plus its following value token), the
    /// input-file group `(` path `)`, and a bare trailing input path (the
    /// form a template takes when saved as a plain command line rather than
    /// with a parenthesized input group). Absent fields pass through
    /// silently; presence of each per-file field is optional. Idempotent.
    ///
    /// Known limitation: a shared option whose value names a file and sits at
    /// the very end of the template is indistinguishable from a bare input
    /// path and is stripped with it.
    pub fn sanitize(&self) -> SanitizedTemplate {
        let mut shared = Vec::with_capacity(self.tokens.len());
        let mut iter = self.tokens.iter();

        while let Some(token) = iter.next() {
            if PER_FILE_FLAGS.contains(&token.as_str()) {
                // Drop the flag and its value token together; dropping only
                // one of the two would corrupt the document for mkvmerge.
                iter.next();
                continue;
            }
            if token == "(" {
                // Input-file group: skip every token through the closing
                // parenthesis.
                for inner in iter.by_ref() {
                    if inner == ")" {
                        break;
                    }
                }
                continue;
            }
            shared.push(token.clone());
        }

        // A command-line-form template carries its input as a bare final
        // path token. Option tokens start with a dash and option values
        // (track selectors, id:value settings) do not name files, so the
        // trailing run of file-naming non-option tokens is the input.
        while shared
            .last()
            .is_some_and(|t| !t.starts_with('-') && names_file(t))
        {
            shared.pop();
        }

        SanitizedTemplate { tokens: shared }
    }

    /// Extension of the template's declared output file, if any.
    ///
    /// When present, it overrides the default discovery extension for the
    /// batch, unless an extension was forced on the command line.
    pub fn output_extension(&self) -> Option<String> {
        let mut iter = self.tokens.iter();
        while let Some(token) = iter.next() {
            if token == "--output" || token == "-o" {
                return iter
                    .next()
                    .and_then(|value| Path::new(value).extension())
                    .and_then(|ext| ext.to_str())
                    .map(|ext| ext.to_ascii_lowercase());
            }
        }
        None
    }
}

/// True when a token plausibly names a file: it has a path separator or an
/// extension. Option values in mkvmerge documents (track selectors,
/// `id:value` settings) have neither.
fn names_file(token: &str) -> bool {
    token.contains(std::path::MAIN_SEPARATOR) || Path::new(token).extension().is_some()
}

/// An options template with all per-file fields removed; structurally valid
/// for mkvmerge once a file's own paths are reinstated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SanitizedTemplate {
    tokens: Vec<String>,
}

impl SanitizedTemplate {
    /// The surviving shared option tokens, in original relative order.
    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn template(tokens: &[&str]) -> OptionsTemplate {
        OptionsTemplate::new(tokens.iter().map(|t| t.to_string()).collect())
    }

    #[test]
    fn sanitize_strips_per_file_pairs() {
        // Scenario C style token stream: title and output pairs removed,
        // truly shared tokens retained.
        let t = template(&[
            "--title",
            "Episode 1",
            "--output",
            "out.mkv",
            "--no-track-tags",
            "--no-global-tags",
        ]);
        let sanitized = t.sanitize();
        assert_eq!(sanitized.tokens(), &["--no-track-tags", "--no-global-tags"]);
    }

    #[test]
    fn sanitize_strips_short_output_flag() {
        let t = template(&["-o", "out.mkv", "--no-chapters"]);
        assert_eq!(t.sanitize().tokens(), &["--no-chapters"]);
    }

    #[test]
    fn sanitize_strips_input_file_group() {
        let t = template(&[
            "--output",
            "out.mkv",
            "--audio-tracks",
            "1,2",
            "(",
            "/media/in/episode.mkv",
            ")",
            "--track-order",
            "0:0,0:1",
        ]);
        let sanitized = t.sanitize();
        assert_eq!(
            sanitized.tokens(),
            &["--audio-tracks", "1,2", "--track-order", "0:0,0:1"]
        );
    }

    #[test]
    fn sanitize_strips_bare_trailing_input_path() {
        // Command-line-form template: the input is a bare final path token
        // instead of a parenthesized group.
        let t = template(&["--no-track-tags", "/media/in/episode1.mkv"]);
        assert_eq!(t.sanitize().tokens(), &["--no-track-tags"]);
    }

    #[test]
    fn sanitize_keeps_valued_options_before_trailing_input_path() {
        let t = template(&[
            "-o",
            "/out/episode1.mkv",
            "--language",
            "1:jpn",
            "episode 1.mkv",
        ]);
        let sanitized = t.sanitize();
        assert_eq!(sanitized.tokens(), &["--language", "1:jpn"]);

        let twice = OptionsTemplate::new(sanitized.tokens().to_vec()).sanitize();
        assert_eq!(sanitized, twice);
    }

    #[test]
    fn sanitize_strips_track_names_and_ui_language() {
        let t = template(&[
            "--ui-language",
            "en_US",
            "--track-name",
            "0:Director's Cut",
            "--default-track",
            "1:yes",
        ]);
        assert_eq!(t.sanitize().tokens(), &["--default-track", "1:yes"]);
    }

    #[test]
    fn sanitize_preserves_shared_tokens_in_order() {
        let t = template(&[
            "--audio-tracks",
            "1",
            "--title",
            "Ep",
            "--subtitle-tracks",
            "3",
            "--language",
            "1:jpn",
        ]);
        assert_eq!(
            t.sanitize().tokens(),
            &["--audio-tracks", "1", "--subtitle-tracks", "3", "--language", "1:jpn"]
        );
    }

    #[test]
    fn sanitize_is_idempotent() {
        let t = template(&[
            "--title",
            "Episode 1",
            "--output",
            "out.mkv",
            "(",
            "in.mkv",
            ")",
            "--no-track-tags",
        ]);
        let once = t.sanitize();
        let twice = OptionsTemplate::new(once.tokens().to_vec()).sanitize();
        assert_eq!(once, twice);
    }

    #[test]
    fn sanitize_passes_through_when_no_per_file_fields_present() {
        let t = template(&["--no-track-tags", "--language", "1:jpn"]);
        assert_eq!(t.sanitize().tokens(), t.tokens.as_slice());
    }

    #[test]
    fn sanitize_handles_multiline_title_value() {
        // Token-level stripping: an embedded newline in the value is part of
        // one token and cannot split the pair.
        let t = template(&["--title", "Line one\nLine two", "--no-chapters"]);
        assert_eq!(t.sanitize().tokens(), &["--no-chapters"]);
    }

    #[test]
    fn output_extension_comes_from_output_value() {
        let t = template(&["--title", "Ep", "--output", "/out/episode.webm"]);
        assert_eq!(t.output_extension().as_deref(), Some("webm"));

        let short = template(&["-o", "OUT.MKV"]);
        assert_eq!(short.output_extension().as_deref(), Some("mkv"));

        let none = template(&["--no-chapters"]);
        assert_eq!(none.output_extension(), None);
    }

    #[test]
    fn load_rejects_non_array_document() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("remux-options.json");
        std::fs::write(&path, "{\"not\": \"an array\"}").unwrap();
        assert!(matches!(
            OptionsTemplate::load(&path),
            Err(CoreError::TemplateInvalid(_))
        ));
    }

    #[test]
    fn load_reads_token_array() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("remux-options.json");
        std::fs::write(&path, r#"["--output", "out.mkv", "--no-chapters"]"#).unwrap();
        let t = OptionsTemplate::load(&path).unwrap();
        assert_eq!(t.tokens, vec!["--output", "out.mkv", "--no-chapters"]);
    }
}
