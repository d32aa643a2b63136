use std::fs;
use std::path::{Path, PathBuf};
use tracing::{error, info};

use crate::contract::FatalError;
use crate::pipeline::write_output;

/// Sizes observed by one compaction.
#[derive(Debug, Clone, PartialEq)]
pub struct CompactOutcome {
    pub output_path: PathBuf,
    pub input_bytes: u64,
    pub output_bytes: u64,
}

/// `dir/name.ext` -> `dir/name.min.ext`; a file without extension gets `.min`.
pub fn minified_sibling(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let file_name = match input.extension() {
        Some(ext) => format!("{stem}.min.{}", ext.to_string_lossy()),
        None => format!("{stem}.min"),
    };
    input.with_file_name(file_name)
}

/// Minifies `input` into its `.min` sibling and returns the output path.
pub fn compact(input: &Path) -> Result<PathBuf, FatalError> {
    compact_to(input, &minified_sibling(input)).map(|outcome| outcome.output_path)
}

/// Parses `input` and writes it to `output` without insignificant whitespace.
///
/// Object key order is preserved, so the result parses to the same value.
pub fn compact_to(input: &Path, output: &Path) -> Result<CompactOutcome, FatalError> {
    let content = fs::read_to_string(input).map_err(|source| {
        error!(path = %input.display(), error = %source, "Failed to read document");
        FatalError::Read {
            path: input.to_path_buf(),
            source,
        }
    })?;

    let value: serde_json::Value = serde_json::from_str(&content).map_err(|source| {
        error!(path = %input.display(), error = %source, "Document is not valid JSON");
        FatalError::Parse {
            path: input.to_path_buf(),
            source,
        }
    })?;

    let minified = serde_json::to_string(&value)?;
    write_output(output, minified.as_bytes())?;

    let outcome = CompactOutcome {
        output_path: output.to_path_buf(),
        input_bytes: content.len() as u64,
        output_bytes: minified.len() as u64,
    };
    info!(
        input = %input.display(),
        output = %output.display(),
        input_bytes = outcome.input_bytes,
        output_bytes = outcome.output_bytes,
        "Minified document"
    );
    Ok(outcome)
}
