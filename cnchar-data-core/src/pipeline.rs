//! Top-level runs: scan → (summarise) → write → report.
//!
//! Each run is independent and takes its own configuration:
//!   - [`run_draw`]: merges drawing JSON files into one document
//!   - [`run_voice`]: embeds audio clips as base64 records and summarises them
//!   - [`run_minify`]: rewrites an existing document without whitespace
//!
//! # Error Handling
//! Per-file problems are absorbed by the scan and show up in the report's `skipped` list.
//! Everything else (missing source directory, unwritable output, invalid input to minify)
//! is a [`FatalError`] returned immediately; callers surface it and exit non-zero.
//!
//! Output documents are serialized completely in memory and written with a single call.

use std::fs;
use std::path::{Path, PathBuf};
use tracing::{error, info};

use crate::aggregate::scan;
use crate::audio::{size_in_mb, summarize, AudioEncoder, RecordPreview, StatisticsSummary};
use crate::compact::{compact_to, minified_sibling};
use crate::config::{DrawConfig, MinifyConfig, VoiceConfig};
use crate::contract::{AggregateDocument, FatalError, SkippedFile};
use crate::transform::JsonTransform;

/// Number of characters of the merged drawing document shown as a preview.
pub const DRAW_PREVIEW_CHARS: usize = 500;

#[derive(Debug)]
pub struct DrawReport {
    pub candidates: usize,
    pub merged: usize,
    pub skipped: Vec<SkippedFile>,
    pub output_path: PathBuf,
    pub preview: String,
}

#[derive(Debug)]
pub struct VoiceReport {
    pub candidates: usize,
    pub skipped: Vec<SkippedFile>,
    pub statistics: StatisticsSummary,
    pub output_path: PathBuf,
    pub output_bytes: u64,
    pub output_size_mb: f64,
    pub preview: AggregateDocument<RecordPreview>,
}

#[derive(Debug)]
pub struct MinifyReport {
    pub input_path: PathBuf,
    pub output_path: PathBuf,
    pub input_bytes: u64,
    pub output_bytes: u64,
}

/// Merges every drawing file of `config.input_dir` into `config.output_file`.
pub fn run_draw(config: &DrawConfig) -> Result<DrawReport, FatalError> {
    info!(input = %config.input_dir.display(), "[DRAW] Merging JSON files");
    let aggregation = scan(&config.input_dir, &config.extension, &JsonTransform)?;

    let pretty = serde_json::to_string_pretty(&aggregation.document)?;
    write_output(&config.output_file, pretty.as_bytes())?;
    info!(
        output = %config.output_file.display(),
        merged = aggregation.document.len(),
        skipped = aggregation.skipped.len(),
        "[DRAW] Saved merged document"
    );

    Ok(DrawReport {
        candidates: aggregation.candidates,
        merged: aggregation.document.len(),
        skipped: aggregation.skipped,
        output_path: config.output_file.clone(),
        preview: preview_prefix(&pretty, DRAW_PREVIEW_CHARS),
    })
}

/// Embeds every clip of `config.input_dir` into `config.output_file`.
pub fn run_voice(config: &VoiceConfig) -> Result<VoiceReport, FatalError> {
    info!(input = %config.input_dir.display(), "[VOICE] Embedding audio clips as base64");
    let aggregation = scan(&config.input_dir, &config.extension, &AudioEncoder)?;
    let statistics = summarize(&aggregation.document);
    info!(
        count = statistics.count,
        total_size_mb = statistics.total_size_mb,
        average_size_mb = statistics.average_size_mb,
        "[VOICE] Computed statistics"
    );

    let pretty = serde_json::to_string_pretty(&aggregation.document)?;
    write_output(&config.output_file, pretty.as_bytes())?;
    let output_bytes = pretty.len() as u64;
    info!(
        output = %config.output_file.display(),
        bytes = output_bytes,
        "[VOICE] Saved voice document"
    );

    let mut preview = AggregateDocument::new();
    for (key, record) in aggregation.document.iter() {
        preview.insert(key, RecordPreview::from(record));
    }

    Ok(VoiceReport {
        candidates: aggregation.candidates,
        skipped: aggregation.skipped,
        statistics,
        output_path: config.output_file.clone(),
        output_bytes,
        output_size_mb: size_in_mb(output_bytes),
        preview,
    })
}

/// Minifies `config.input_file`.
pub fn run_minify(config: &MinifyConfig) -> Result<MinifyReport, FatalError> {
    let output = config
        .output_file
        .clone()
        .unwrap_or_else(|| minified_sibling(&config.input_file));
    info!(input = %config.input_file.display(), output = %output.display(), "[MINIFY] Minifying document");
    let outcome = compact_to(&config.input_file, &output)?;
    Ok(MinifyReport {
        input_path: config.input_file.clone(),
        output_path: outcome.output_path,
        input_bytes: outcome.input_bytes,
        output_bytes: outcome.output_bytes,
    })
}

/// Writes `contents` to `path` in one call, replacing any existing file.
///
/// An existing file keeps its permissions; a new one gets the process default.
pub fn write_output(path: &Path, contents: &[u8]) -> Result<(), FatalError> {
    fs::write(path, contents).map_err(|source| {
        error!(path = %path.display(), error = %source, "Failed to write output file");
        FatalError::Write {
            path: path.to_path_buf(),
            source,
        }
    })
}

/// First `limit` characters of `text` followed by `...`.
fn preview_prefix(text: &str, limit: usize) -> String {
    let mut preview: String = text.chars().take(limit).collect();
    preview.push_str("...");
    preview
}
