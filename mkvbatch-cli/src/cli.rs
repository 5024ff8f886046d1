// mkvbatch-cli/src/cli.rs
//
// Defines the command-line argument structures using clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

// --- CLI Argument Definition ---

#[derive(Parser, Debug)]
#[command(
    author,
    version, // Reads from Cargo.toml via "cargo" feature in clap
    about = "mkvbatch: classify and batch-transform container files by track structure",
    long_about = "Groups or verifies container-format media files by the shape of their \
track metadata (codec, track number, language, track type, in original order), then \
routes them into fingerprint-named directories or applies one shared remux recipe to \
a structurally consistent batch."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Groups files by track-structure fingerprint and routes them into
    /// fingerprint-named directories
    Sort(SortArgs),
    /// Remuxes a structurally consistent batch with one shared options
    /// template
    Remux(RemuxArgs),
}

#[derive(Parser, Debug)]
pub struct SortArgs {
    /// File extension to process (defaults to mkv)
    #[arg(value_name = "FILEEXT")]
    pub fileext: Option<String>,

    /// Working directory containing the batch
    #[arg(short = 'C', long = "directory", value_name = "DIR", default_value = ".")]
    pub directory: PathBuf,

    /// Only scan and report the grouping; take no action
    #[arg(short = 's', long = "scan-only")]
    pub scan_only: bool,

    /// Move files into their group directories instead of copying them
    #[arg(long = "move")]
    pub move_files: bool,

    /// Skip the confirmation prompt
    #[arg(short = 'y', long = "yes")]
    pub yes: bool,
}

#[derive(Parser, Debug)]
pub struct RemuxArgs {
    /// File extension to process (defaults to mkv, or to the options
    /// template's declared output extension when one is present)
    #[arg(value_name = "FILEEXT")]
    pub fileext: Option<String>,

    /// Working directory containing the batch
    #[arg(short = 'C', long = "directory", value_name = "DIR", default_value = ".")]
    pub directory: PathBuf,

    /// Only verify that all files share one track-structure fingerprint;
    /// take no action
    #[arg(short = 's', long = "scan-headers")]
    pub scan_headers: bool,

    /// Delete the title field of each produced output
    #[arg(short = 't', long = "strip-titles")]
    pub strip_titles: bool,

    /// Skip the confirmation prompt
    #[arg(short = 'y', long = "yes")]
    pub yes: bool,
}
