// mkvbatch-cli/src/main.rs
//
// Command-line interface for the mkvbatch batch tools.
//
// Responsibilities include:
// - Parsing user-provided arguments (see cli.rs).
// - Setting up logging via env_logger (RUST_LOG).
// - Probing required external tools before any file discovery.
// - Configuring the mkvbatch-core library and invoking its pipelines.
// - Interactive confirmation before destructive actions.
// - Managing process exit codes: 0 success/no-op, 1 file-system or
//   external-command failure, 2 metadata consistency failure.

use clap::{CommandFactory, Parser};
use colored::*;
use mkvbatch_core::{
    find_matching_files, format_bytes, remux_batch, route_files, verify_dependencies,
    CoreConfig, CoreError, CoreResult, OptionsTemplate, RemuxOptions, TransferMode,
    DEFAULT_EXTENSION, TEMPLATE_FILE_NAME,
};
use std::io::{self, Write};
use std::process;

mod cli;

use cli::{Cli, Commands, RemuxArgs, SortArgs};

/// Exit code for metadata consistency failures; all other failures exit 1.
const EXIT_MISMATCH: i32 = 2;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Sort(args) => run_sort(args),
        Commands::Remux(args) => run_remux(args),
    };

    if let Err(e) = result {
        eprintln!("{} {e}", "Error:".red().bold());
        let code = match e {
            CoreError::MetadataMismatch { .. } => EXIT_MISMATCH,
            _ => 1,
        };
        process::exit(code);
    }
}

// --- Sort (routing) tool ---

fn run_sort(args: SortArgs) -> CoreResult<()> {
    let mut tools = vec!["mkvmerge"];
    if !args.scan_only {
        tools.push("rsync");
    }
    // Dependency probe comes first, before any file discovery.
    verify_dependencies(&tools)?;

    let mut config = CoreConfig::new(args.directory);
    if let Some(ext) = args.fileext {
        config.extension = ext;
    }
    config.transfer_mode = if args.move_files {
        TransferMode::Move
    } else {
        TransferMode::Copy
    };

    let files = find_matching_files(&config.input_dir, &config.extension)?;

    if !args.scan_only && !args.yes {
        let verb = match config.transfer_mode {
            TransferMode::Copy => "copy",
            TransferMode::Move => "move",
        };
        let prompt = format!(
            "About to {verb} {} file(s) into fingerprint-named directories under {}.",
            files.len(),
            config.input_dir.display()
        );
        if !confirm(&prompt)? {
            return decline();
        }
    }

    route_files(
        &mkvbatch_core::external::MkvmergeIdentifier::new(),
        &mkvbatch_core::external::RsyncTransfer::new(),
        &config,
        &files,
        args.scan_only,
    )?;
    Ok(())
}

// --- Remux (shared transformation) tool ---

fn run_remux(args: RemuxArgs) -> CoreResult<()> {
    let mut tools = vec!["mkvmerge"];
    if args.strip_titles {
        tools.push("mkvpropedit");
    }
    verify_dependencies(&tools)?;

    let mut config = CoreConfig::new(args.directory);

    // The shared template is optional; its presence switches the tool into
    // batch-consistency-gated mode.
    let template_path = config.input_dir.join(TEMPLATE_FILE_NAME);
    let template = if template_path.is_file() {
        log::info!("Using options template {}", template_path.display());
        Some(OptionsTemplate::load(&template_path)?)
    } else {
        None
    };

    // Extension precedence: explicit argument, then the template's declared
    // output extension, then the default.
    config.extension = args
        .fileext
        .or_else(|| template.as_ref().and_then(OptionsTemplate::output_extension))
        .unwrap_or_else(|| DEFAULT_EXTENSION.to_string());

    let files = find_matching_files(&config.input_dir, &config.extension)?;

    if !args.scan_headers && !args.yes {
        let prompt = format!(
            "About to remux {} file(s) into {}.",
            files.len(),
            config.input_dir.join(mkvbatch_core::config::REMUX_OUTPUT_DIR).display()
        );
        if !confirm(&prompt)? {
            return decline();
        }
    }

    let results = remux_batch(
        &mkvbatch_core::external::MkvmergeIdentifier::new(),
        &mkvbatch_core::external::MkvmergeRemuxer::new(),
        &mkvbatch_core::external::MkvpropeditEditor::new(),
        &config,
        &files,
        template.as_ref(),
        RemuxOptions {
            scan_headers: args.scan_headers,
            strip_titles: args.strip_titles,
        },
    )?;

    if !results.is_empty() {
        let input_total: u64 = results.iter().map(|r| r.input_size).sum();
        let output_total: u64 = results.iter().map(|r| r.output_size).sum();
        println!(
            "Total: {} in, {} out.",
            format_bytes(input_total),
            format_bytes(output_total)
        );
    }
    Ok(())
}

// --- Confirmation prompt ---

/// Asks for confirmation on stdin. Anything but "y"/"yes" declines.
fn confirm(message: &str) -> CoreResult<bool> {
    println!("{message}");
    print!("Proceed? [y/N] ");
    io::stdout().flush()?;

    let mut line = String::new();
    io::stdin().read_line(&mut line)?;
    Ok(matches!(
        line.trim().to_ascii_lowercase().as_str(),
        "y" | "yes"
    ))
}

/// Declining the prompt re-displays usage and ends the run as a no-op.
fn decline() -> CoreResult<()> {
    let mut cmd = Cli::command();
    let _ = cmd.print_help();
    Ok(())
}
