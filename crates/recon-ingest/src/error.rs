//! Error types for input resolution and loading.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// A logical input label that found no matching file.
#[derive(Debug, Clone)]
pub struct MissingInput {
    pub label: String,
    pub patterns: Vec<String>,
}

/// Resolution failure: one or more labels had zero matching candidates.
///
/// Display enumerates every missing label with its patterns and every file
/// actually present in the scanned directory. Operators rely on this
/// listing to fix input staging, so it must stay complete.
#[derive(Debug, Clone)]
pub struct UnresolvedInputs {
    pub dir: PathBuf,
    pub missing: Vec<MissingInput>,
    pub present: Vec<String>,
}

impl std::error::Error for UnresolvedInputs {}

impl fmt::Display for UnresolvedInputs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "missing required input files in {}; expected files matching:",
            self.dir.display()
        )?;
        for missing in &self.missing {
            writeln!(f, "  - {}: {:?}", missing.label, missing.patterns)?;
        }
        writeln!(f, "files currently present in {}:", self.dir.display())?;
        if self.present.is_empty() {
            write!(f, "  (none found)")?;
        } else {
            for (idx, name) in self.present.iter().enumerate() {
                if idx > 0 {
                    writeln!(f)?;
                }
                write!(f, "  - {name}")?;
            }
        }
        Ok(())
    }
}

/// Errors that can occur while resolving or loading input files.
#[derive(Debug, Error)]
pub enum IngestError {
    /// Directory not found or not a directory.
    #[error("directory not found: {path}")]
    DirectoryNotFound { path: PathBuf },

    /// Failed to read directory entries.
    #[error("failed to read directory {path}: {source}")]
    DirectoryRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// One or more logical inputs had no matching candidate file.
    #[error("{0}")]
    Unresolved(#[from] UnresolvedInputs),

    /// Failed to open or read a file.
    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse CSV content.
    #[error("failed to parse CSV {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// Failed to open an archive or one of its members.
    #[error("failed to read archive {path}: {source}")]
    Archive {
        path: PathBuf,
        #[source]
        source: zip::result::ZipError,
    },

    /// An archive contained no tabular member to load.
    #[error("no tabular payload found in {path}")]
    NoTabularPayload { path: PathBuf },

    /// A tabular file had no header row.
    #[error("tabular file is empty: {path}")]
    EmptyTable { path: PathBuf },
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unresolved_display_lists_missing_and_present() {
        let err = UnresolvedInputs {
            dir: PathBuf::from("data/raw/cms"),
            missing: vec![MissingInput {
                label: "beneficiary_2008".to_string(),
                patterns: vec!["Beneficiary_Summary_File".to_string(), "2008".to_string()],
            }],
            present: vec!["other.zip".to_string()],
        };
        let text = err.to_string();
        assert!(text.contains("beneficiary_2008"));
        assert!(text.contains("Beneficiary_Summary_File"));
        assert!(text.contains("other.zip"));
        assert!(text.contains("data/raw/cms"));
    }

    #[test]
    fn unresolved_display_marks_empty_directory() {
        let err = UnresolvedInputs {
            dir: PathBuf::from("data/raw/cms"),
            missing: vec![MissingInput {
                label: "x".to_string(),
                patterns: vec!["X".to_string()],
            }],
            present: vec![],
        };
        assert!(err.to_string().contains("(none found)"));
    }
}
