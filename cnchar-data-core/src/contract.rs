//! # contract: shared types for every cnchar-data pipeline
//!
//! This module defines the seam between the directory scan and the per-file work
//! (the [`Transform`] trait), the record and document types the pipelines produce,
//! and the two error tiers that separate "skip this file" from "abort the run".
//!
//! ## Error tiers
//! - [`FileError`] is recoverable. Only transforms return it, and the aggregator is the
//!   single place that catches it: the file is logged, recorded as skipped, and the scan goes on.
//! - [`FatalError`] aborts the whole run. It is surfaced to the CLI, which exits non-zero.
//!
//! ## Mocking & Testing
//! - [`Transform`] is annotated for `mockall`, so tests can drive the aggregator with
//!   deterministic successes and failures without touching file contents.

use indexmap::IndexMap;
use mockall::automock;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// MIME type stamped on every audio record.
pub const AUDIO_MIME_TYPE: &str = "audio/mpeg";
/// Payload encoding stamped on every audio record.
pub const AUDIO_ENCODING: &str = "base64";

/// Recoverable, per-file failure. Never escalated past the aggregator.
#[derive(Debug, Error)]
pub enum FileError {
    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Failure that aborts the whole run.
#[derive(Debug, Error)]
pub enum FatalError {
    #[error("directory does not exist: {}", .0.display())]
    DirectoryNotFound(PathBuf),

    #[error("failed to list directory {}: {source}", .path.display())]
    ReadDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to serialize document: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("key not found: {0}")]
    KeyNotFound(String),

    #[error("invalid base64 payload for key {key}: {source}")]
    Decode {
        key: String,
        #[source]
        source: base64::DecodeError,
    },

    #[error("invalid record for key {key}: {reason}")]
    InvalidRecord { key: String, reason: String },
}

/// Per-file work applied by the aggregator to every candidate file.
///
/// Implementors must only fail with [`FileError`]; anything that should stop the
/// run belongs before or after the scan, not inside a transform.
#[cfg_attr(any(test, feature = "test-export-mocks"), automock(type Output = serde_json::Value;))]
pub trait Transform {
    type Output;

    fn transform(&self, path: &Path) -> Result<Self::Output, FileError>;
}

/// One embedded audio clip, as written to `voice_data.json`.
///
/// Built through [`AudioRecord::from_bytes`]; deserialization rejects records
/// whose `mimeType` or `encoding` differ from the fixed values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "RawAudioRecord")]
pub struct AudioRecord {
    pub data: String,
    pub original_name: String,
    pub size: u64,
    #[serde(rename = "sizeMB")]
    pub size_mb: f64,
    pub mime_type: String,
    pub encoding: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawAudioRecord {
    data: String,
    original_name: String,
    size: u64,
    #[serde(rename = "sizeMB")]
    size_mb: f64,
    mime_type: String,
    encoding: String,
}

impl TryFrom<RawAudioRecord> for AudioRecord {
    type Error = String;

    fn try_from(raw: RawAudioRecord) -> Result<Self, Self::Error> {
        if raw.encoding != AUDIO_ENCODING {
            return Err(format!(
                "unsupported encoding {:?}, expected {:?}",
                raw.encoding, AUDIO_ENCODING
            ));
        }
        if raw.mime_type != AUDIO_MIME_TYPE {
            return Err(format!(
                "unsupported mimeType {:?}, expected {:?}",
                raw.mime_type, AUDIO_MIME_TYPE
            ));
        }
        if raw.original_name.is_empty() {
            return Err("originalName must not be empty".to_string());
        }
        Ok(AudioRecord {
            data: raw.data,
            original_name: raw.original_name,
            size: raw.size,
            size_mb: raw.size_mb,
            mime_type: raw.mime_type,
            encoding: raw.encoding,
        })
    }
}

/// Ordered mapping from stem to record.
///
/// Keys keep the position of their first insertion; inserting an existing key
/// replaces its value (last write wins).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AggregateDocument<R>(IndexMap<String, R>);

impl<R> Default for AggregateDocument<R> {
    fn default() -> Self {
        Self(IndexMap::new())
    }
}

impl<R> AggregateDocument<R> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts `record` under `key`, returning the record it replaced.
    pub fn insert(&mut self, key: impl Into<String>, record: R) -> Option<R> {
        self.0.insert(key.into(), record)
    }

    pub fn get(&self, key: &str) -> Option<&R> {
        self.0.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &R)> {
        self.0.iter().map(|(k, r)| (k.as_str(), r))
    }
}

/// Merged drawing data: stem -> verbatim file content.
pub type DrawDocument = AggregateDocument<serde_json::Value>;

/// Embedded voice data: stem -> audio record.
pub type VoiceDocument = AggregateDocument<AudioRecord>;

/// A candidate file the aggregator could not transform.
#[derive(Debug)]
pub struct SkippedFile {
    pub file_name: String,
    pub reason: String,
}

/// Everything one directory scan produced.
#[derive(Debug)]
pub struct Aggregation<R> {
    pub document: AggregateDocument<R>,
    /// Number of entries whose extension matched the filter.
    pub candidates: usize,
    pub skipped: Vec<SkippedFile>,
}
