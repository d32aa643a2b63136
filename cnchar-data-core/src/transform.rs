use std::fs;
use std::path::Path;
use tracing::debug;

use crate::contract::{FileError, Transform};

/// Reads a file as UTF-8 text and parses it as JSON, keeping the value verbatim.
#[derive(Debug, Default, Clone, Copy)]
pub struct JsonTransform;

impl Transform for JsonTransform {
    type Output = serde_json::Value;

    fn transform(&self, path: &Path) -> Result<Self::Output, FileError> {
        let content = fs::read_to_string(path).map_err(|source| FileError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), bytes = content.len(), "Read JSON file");
        serde_json::from_str(&content).map_err(|source| FileError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}
