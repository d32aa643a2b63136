///
/// This module implements the CLI interface for cnchar-data: command parsing,
/// config resolution, and the human-readable summaries printed after each run.
///
/// All pipeline logic (scanning, encoding, restoring, minifying) lives in the
/// [`cnchar-data-core`] crate. This module is strictly CLI glue.
///
/// ## How To Use
/// - For command-line users: use the installed `cnchar-data` binary with `--help`.
/// - For programmatic/integration use: call [`run`] with a constructed [`Cli`].
///
/// [`cnchar-data-core`]: ../../cnchar-data-core/
/// [`Cli`]: struct.Cli.html
/// [`run`]: fn.run.html
use crate::load_config::load_config;
use anyhow::Result;
use clap::{Parser, Subcommand};
use cnchar_data_core::audio::{load_document, restore};
use cnchar_data_core::config::Config;
use cnchar_data_core::pipeline::{run_draw, run_minify, run_voice, DrawReport, VoiceReport};
use std::path::PathBuf;

/// CLI for cnchar-data: build the drawing and voice datasets.
#[derive(Parser)]
#[clap(
    name = "cnchar-data",
    version,
    about = "Merge stroke-drawing JSON, embed voice clips as base64, and minify the results"
)]
pub struct Cli {
    /// Path to a YAML config file; built-in paths are used when omitted
    #[clap(long, global = true)]
    pub config: Option<PathBuf>,

    #[clap(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Merge every JSON file of the drawing directory into one document
    Draw {
        /// Directory of per-character JSON files
        #[clap(long)]
        input: Option<PathBuf>,
        /// Merged output file
        #[clap(long)]
        output: Option<PathBuf>,
    },
    /// Embed every MP3 of the voice directory as a base64 record
    Voice {
        /// Directory of audio clips
        #[clap(long)]
        input: Option<PathBuf>,
        /// Voice document output file
        #[clap(long)]
        output: Option<PathBuf>,
    },
    /// Re-serialize a JSON document without whitespace
    Minify {
        /// Document to minify
        #[clap(long)]
        input: Option<PathBuf>,
        /// Output file; defaults to `<stem>.min.<ext>` next to the input
        #[clap(long)]
        output: Option<PathBuf>,
    },
    /// Write one clip from a voice document back to disk
    Restore {
        /// Key (file stem) of the clip
        #[clap(long)]
        key: String,
        /// Voice document to read; defaults to the voice output file
        #[clap(long)]
        document: Option<PathBuf>,
        /// Directory to write the clip into
        #[clap(long)]
        output_dir: Option<PathBuf>,
    },
}

/// Extracted CLI logic entrypoint for integration tests and main()
pub fn run(cli: Cli) -> Result<()> {
    tracing::info!("trace_initialised");

    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => Config::default(),
    };
    config.trace_loaded();

    match cli.command {
        Commands::Draw { input, output } => {
            if let Some(input) = input {
                config.draw.input_dir = input;
            }
            if let Some(output) = output {
                config.draw.output_file = output;
            }
            tracing::info!(command = "draw", "Starting JSON merge");
            let report = run_draw(&config.draw).map_err(|e| {
                tracing::error!(command = "draw", error = %e, "Merge failed");
                anyhow::Error::new(e)
            })?;
            print_draw_report(&report);
        }
        Commands::Voice { input, output } => {
            if let Some(input) = input {
                config.voice.input_dir = input;
            }
            if let Some(output) = output {
                config.voice.output_file = output;
            }
            tracing::info!(command = "voice", "Starting audio embedding");
            println!("Warning: embedding MP3 files as base64 uses a lot of memory and disk space");
            let report = run_voice(&config.voice).map_err(|e| {
                tracing::error!(command = "voice", error = %e, "Audio embedding failed");
                anyhow::Error::new(e)
            })?;
            print_voice_report(&report)?;
        }
        Commands::Minify { input, output } => {
            if let Some(input) = input {
                config.minify.input_file = input;
            }
            if output.is_some() {
                config.minify.output_file = output;
            }
            tracing::info!(command = "minify", "Starting minify");
            let report = run_minify(&config.minify).map_err(|e| {
                tracing::error!(command = "minify", error = %e, "Minify failed");
                anyhow::Error::new(e)
            })?;
            println!(
                "Minified {} ({} bytes) -> {} ({} bytes)",
                report.input_path.display(),
                report.input_bytes,
                report.output_path.display(),
                report.output_bytes
            );
        }
        Commands::Restore {
            key,
            document,
            output_dir,
        } => {
            let document_path = document.unwrap_or(config.voice.output_file);
            let output_dir = output_dir.unwrap_or(config.voice.restore_dir);
            tracing::info!(command = "restore", key = %key, "Restoring clip");
            let document = load_document(&document_path).map_err(|e| {
                tracing::error!(command = "restore", error = %e, "Failed to load voice document");
                anyhow::Error::new(e)
            })?;
            let path = restore(&document, &key, &output_dir).map_err(|e| {
                tracing::error!(command = "restore", error = %e, "Restore failed");
                anyhow::Error::new(e)
            })?;
            println!("Restored {} -> {}", key, path.display());
        }
    }

    Ok(())
}

fn print_draw_report(report: &DrawReport) {
    println!(
        "Found {} JSON files, merged {}",
        report.candidates, report.merged
    );
    for skipped in &report.skipped {
        println!("Skipped {}: {}", skipped.file_name, skipped.reason);
    }
    println!("Saved to {}", report.output_path.display());
    println!("\nPreview:\n{}", report.preview);
}

fn print_voice_report(report: &VoiceReport) -> Result<()> {
    let stats = &report.statistics;
    println!("\n=== Statistics ===");
    println!("Files processed: {}", stats.count);
    println!("Total size: {:.2}MB", stats.total_size_mb);
    println!("Average size: {:.2}MB", stats.average_size_mb);
    println!("Keys: {}", stats.keys.join(", "));
    for skipped in &report.skipped {
        println!("Skipped {}: {}", skipped.file_name, skipped.reason);
    }
    println!(
        "Saved to {} ({:.2}MB)",
        report.output_path.display(),
        report.output_size_mb
    );
    println!("\n=== Preview ===");
    println!("{}", serde_json::to_string_pretty(&report.preview)?);
    Ok(())
}
