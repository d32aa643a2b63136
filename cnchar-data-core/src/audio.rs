//! Embedding audio clips as base64 records, restoring them, and summarising a voice document.
//!
//! The encoder is a [`Transform`], so the directory scan treats an unreadable clip
//! like any other bad file. [`restore`] is the exact inverse of the encoding step:
//! `decode_payload(key, &AudioRecord::from_bytes(name, bytes)) == bytes` for every byte
//! sequence, the empty one included.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{error, info, warn};

use crate::contract::{
    AudioRecord, FatalError, FileError, Transform, VoiceDocument, AUDIO_ENCODING, AUDIO_MIME_TYPE,
};

const BYTES_PER_MB: f64 = 1024.0 * 1024.0;

/// Rounds to two decimal places.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Size in megabytes (1 MB = 1 048 576 bytes), rounded to two decimals.
pub fn size_in_mb(bytes: u64) -> f64 {
    round2(bytes as f64 / BYTES_PER_MB)
}

impl AudioRecord {
    /// Encodes raw clip bytes into a record named after the source file.
    pub fn from_bytes(original_name: impl Into<String>, bytes: &[u8]) -> Self {
        let size = bytes.len() as u64;
        AudioRecord {
            data: STANDARD.encode(bytes),
            original_name: original_name.into(),
            size,
            size_mb: size_in_mb(size),
            mime_type: AUDIO_MIME_TYPE.to_string(),
            encoding: AUDIO_ENCODING.to_string(),
        }
    }
}

/// Reads a clip from disk and embeds it as an [`AudioRecord`].
#[derive(Debug, Default, Clone, Copy)]
pub struct AudioEncoder;

impl Transform for AudioEncoder {
    type Output = AudioRecord;

    fn transform(&self, path: &Path) -> Result<Self::Output, FileError> {
        let bytes = fs::read(path).map_err(|source| FileError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        info!(
            file = %name,
            size_mb = %format_args!("{:.2}", size_in_mb(bytes.len() as u64)),
            "Encoding audio clip"
        );
        Ok(AudioRecord::from_bytes(name, &bytes))
    }
}

/// Decodes the base64 payload of `record` back to the original bytes.
pub fn decode_payload(key: &str, record: &AudioRecord) -> Result<Vec<u8>, FatalError> {
    STANDARD
        .decode(record.data.as_bytes())
        .map_err(|source| FatalError::Decode {
            key: key.to_string(),
            source,
        })
}

/// Writes the clip stored under `key` to `output_dir/originalName`.
///
/// Creates `output_dir` (and parents) when missing. Returns the written path.
pub fn restore(
    document: &VoiceDocument,
    key: &str,
    output_dir: &Path,
) -> Result<PathBuf, FatalError> {
    let record = document.get(key).ok_or_else(|| {
        error!(key = key, "No record for key");
        FatalError::KeyNotFound(key.to_string())
    })?;

    // Only the final component is used so a record cannot escape output_dir.
    let file_name = Path::new(&record.original_name)
        .file_name()
        .ok_or_else(|| FatalError::InvalidRecord {
            key: key.to_string(),
            reason: format!("originalName {:?} has no file name", record.original_name),
        })?;

    let bytes = decode_payload(key, record)?;
    if bytes.len() as u64 != record.size {
        warn!(
            key = key,
            decoded = bytes.len(),
            declared = record.size,
            "Decoded length differs from declared size"
        );
    }

    fs::create_dir_all(output_dir).map_err(|source| FatalError::Write {
        path: output_dir.to_path_buf(),
        source,
    })?;

    let output_path = output_dir.join(file_name);
    fs::write(&output_path, &bytes).map_err(|source| FatalError::Write {
        path: output_path.clone(),
        source,
    })?;
    info!(key = key, path = %output_path.display(), bytes = bytes.len(), "Restored audio clip");
    Ok(output_path)
}

/// Loads a voice document previously written by the voice pipeline.
pub fn load_document(path: &Path) -> Result<VoiceDocument, FatalError> {
    let content = fs::read_to_string(path).map_err(|source| FatalError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&content).map_err(|source| FatalError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Read-only statistics over a voice document.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatisticsSummary {
    pub count: usize,
    pub total_bytes: u64,
    #[serde(rename = "totalSizeMB")]
    pub total_size_mb: f64,
    #[serde(rename = "averageSizeMB")]
    pub average_size_mb: f64,
    pub keys: Vec<String>,
}

/// Computes count, total and average size. An empty document averages to `0`.
pub fn summarize(document: &VoiceDocument) -> StatisticsSummary {
    let count = document.len();
    let total_bytes: u64 = document.iter().map(|(_, record)| record.size).sum();
    let average_size_mb = if count == 0 {
        0.0
    } else {
        round2(total_bytes as f64 / count as f64 / BYTES_PER_MB)
    };

    StatisticsSummary {
        count,
        total_bytes,
        total_size_mb: size_in_mb(total_bytes),
        average_size_mb,
        keys: document.keys().map(str::to_string).collect(),
    }
}

/// Payload-free view of one record for console previews.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordPreview {
    pub original_name: String,
    #[serde(rename = "sizeMB")]
    pub size_mb: f64,
    pub mime_type: String,
    pub data_length: usize,
}

impl From<&AudioRecord> for RecordPreview {
    fn from(record: &AudioRecord) -> Self {
        RecordPreview {
            original_name: record.original_name.clone(),
            size_mb: record.size_mb,
            mime_type: record.mime_type.clone(),
            data_length: record.data.len(),
        }
    }
}
