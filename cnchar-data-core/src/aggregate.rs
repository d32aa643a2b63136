//! Directory scan that turns every matching file into one entry of an [`AggregateDocument`].

use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info};

use crate::contract::{AggregateDocument, Aggregation, FatalError, SkippedFile, Transform};

/// A directory entry whose extension matched the filter.
#[derive(Debug, Clone, PartialEq)]
pub struct CandidateFile {
    pub path: PathBuf,
    pub file_name: String,
    /// File name without its final extension; the aggregate key.
    pub stem: String,
}

/// Scans `directory` and returns only the merged document.
pub fn aggregate<T: Transform>(
    directory: &Path,
    extension: &str,
    transform: &T,
) -> Result<AggregateDocument<T::Output>, FatalError> {
    scan(directory, extension, transform).map(|aggregation| aggregation.document)
}

/// Scans `directory`, applies `transform` to every file with `extension`, and
/// collects the results keyed by stem.
///
/// A file the transform rejects is logged and listed in [`Aggregation::skipped`];
/// only a missing or unlistable directory fails the scan.
pub fn scan<T: Transform>(
    directory: &Path,
    extension: &str,
    transform: &T,
) -> Result<Aggregation<T::Output>, FatalError> {
    let candidates = list_candidates(directory, extension)?;
    info!(
        directory = %directory.display(),
        extension = extension,
        count = candidates.len(),
        "Found candidate files"
    );

    let mut document = AggregateDocument::new();
    let mut skipped = Vec::new();

    for candidate in &candidates {
        match transform.transform(&candidate.path) {
            Ok(record) => {
                if document.insert(candidate.stem.clone(), record).is_some() {
                    debug!(key = %candidate.stem, file = %candidate.file_name, "Replaced earlier entry with same key");
                }
                info!(file = %candidate.file_name, key = %candidate.stem, "Processed file");
            }
            Err(e) => {
                error!(file = %candidate.file_name, error = %e, "Skipping file");
                skipped.push(SkippedFile {
                    file_name: candidate.file_name.clone(),
                    reason: e.to_string(),
                });
            }
        }
    }

    Ok(Aggregation {
        document,
        candidates: candidates.len(),
        skipped,
    })
}

/// Lists entries of `directory` whose extension equals `extension`
/// (case-insensitive), ordered by file name.
pub fn list_candidates(directory: &Path, extension: &str) -> Result<Vec<CandidateFile>, FatalError> {
    if !directory.exists() {
        error!(directory = %directory.display(), "Source directory does not exist");
        return Err(FatalError::DirectoryNotFound(directory.to_path_buf()));
    }

    let read_dir_err = |source| FatalError::ReadDir {
        path: directory.to_path_buf(),
        source,
    };

    let wanted = extension.trim_start_matches('.');
    let mut candidates = Vec::new();
    for entry in fs::read_dir(directory).map_err(read_dir_err)? {
        let entry = entry.map_err(read_dir_err)?;
        let path = entry.path();
        let matches = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case(wanted));
        if !matches {
            continue;
        }
        let file_name = entry.file_name().to_string_lossy().into_owned();
        let stem = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        candidates.push(CandidateFile {
            path,
            file_name,
            stem,
        });
    }

    candidates.sort_by(|a, b| a.file_name.cmp(&b.file_name));
    Ok(candidates)
}
