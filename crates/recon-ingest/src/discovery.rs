//! Pattern-based input resolution.
//!
//! Upstream providers prepend arbitrary numeric identifiers to filenames
//! (e.g. `176541_DE1_0_2008_Beneficiary_Summary_File_Sample_1.zip`), so
//! inputs are located by required substrings rather than exact names.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::error::{IngestError, MissingInput, Result, UnresolvedInputs};

/// Lists files in a directory with the given extension (case-insensitive).
///
/// Scans immediate entries only. Returns paths sorted by filename so every
/// downstream selection is independent of filesystem iteration order.
pub fn list_files_with_extension(dir: &Path, extension: &str) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(IngestError::DirectoryNotFound {
            path: dir.to_path_buf(),
        });
    }

    let entries = std::fs::read_dir(dir).map_err(|e| IngestError::DirectoryRead {
        path: dir.to_path_buf(),
        source: e,
    })?;

    let mut files = Vec::new();
    for entry_result in entries {
        let entry = entry_result.map_err(|e| IngestError::DirectoryRead {
            path: dir.to_path_buf(),
            source: e,
        })?;

        let path = entry.path();
        if !path.is_file() {
            continue;
        }

        let matches = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.eq_ignore_ascii_case(extension))
            .unwrap_or(false);
        if matches {
            files.push(path);
        }
    }

    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(files)
}

/// True when `filename` contains every pattern, case-insensitively.
pub fn matches_all_patterns(filename: &str, patterns: &[String]) -> bool {
    let lower = filename.to_lowercase();
    patterns.iter().all(|p| lower.contains(&p.to_lowercase()))
}

/// Resolves each logical label to a concrete file path.
///
/// A candidate matches a label when its filename contains every required
/// substring. When several candidates match, the lexicographically first
/// filename wins, so repeated runs against the same staging directory are
/// identical. Any label with zero matches fails the whole pass: the error
/// lists every missing label and every file actually present.
pub fn resolve_inputs(
    dir: &Path,
    patterns: &BTreeMap<String, Vec<String>>,
    extension: &str,
) -> Result<BTreeMap<String, PathBuf>> {
    let files = list_files_with_extension(dir, extension)?;

    let mut resolved = BTreeMap::new();
    let mut missing = Vec::new();

    for (label, required) in patterns {
        let candidate = files.iter().find(|path| {
            path.file_name()
                .and_then(|name| name.to_str())
                .map(|name| matches_all_patterns(name, required))
                .unwrap_or(false)
        });
        match candidate {
            // `files` is sorted by filename, so the first hit is the
            // lexicographic tie-break.
            Some(path) => {
                debug!(label = %label, file = %path.display(), "resolved input");
                resolved.insert(label.clone(), path.clone());
            }
            None => missing.push(MissingInput {
                label: label.clone(),
                patterns: required.clone(),
            }),
        }
    }

    if !missing.is_empty() {
        let present = files
            .iter()
            .filter_map(|p| p.file_name().and_then(|n| n.to_str()))
            .map(str::to_string)
            .collect();
        return Err(UnresolvedInputs {
            dir: dir.to_path_buf(),
            missing,
            present,
        }
        .into());
    }

    info!(
        dir = %dir.display(),
        resolved = resolved.len(),
        "all required inputs resolved"
    );
    Ok(resolved)
}
