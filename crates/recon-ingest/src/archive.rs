//! Loading tabular payloads out of zip archives.
//!
//! The CMS downloads arrive as zip files that typically hold exactly one
//! CSV. When an archive holds several, the lexicographically smallest
//! member name is loaded; the underlying archive listing order is never
//! relied on.

use std::path::Path;

use tracing::debug;

use recon_model::Table;

use crate::csv_table::read_table;
use crate::error::{IngestError, Result};

fn open_archive(path: &Path) -> Result<zip::ZipArchive<std::fs::File>> {
    let file = std::fs::File::open(path).map_err(|e| IngestError::FileRead {
        path: path.to_path_buf(),
        source: e,
    })?;
    zip::ZipArchive::new(file).map_err(|e| IngestError::Archive {
        path: path.to_path_buf(),
        source: e,
    })
}

fn tabular_members(archive: &zip::ZipArchive<std::fs::File>) -> Vec<String> {
    let mut members: Vec<String> = archive
        .file_names()
        .filter(|name| name.to_lowercase().ends_with(".csv"))
        .map(str::to_string)
        .collect();
    members.sort();
    members
}

/// Lists the tabular member names of an archive, sorted.
///
/// Diagnostic helper for run previews; loading ignores everything but the
/// first member.
pub fn archive_inventory(path: &Path) -> Result<Vec<String>> {
    let archive = open_archive(path)?;
    Ok(tabular_members(&archive))
}

/// Loads the single tabular payload from a zip archive.
///
/// Fails with [`IngestError::NoTabularPayload`] when the archive holds no
/// CSV member. Extra CSV members are ignored after the deterministic pick.
pub fn load_csv_from_zip(path: &Path) -> Result<Table> {
    let mut archive = open_archive(path)?;

    let members = tabular_members(&archive);
    let Some(member_name) = members.first() else {
        return Err(IngestError::NoTabularPayload {
            path: path.to_path_buf(),
        });
    };
    if members.len() > 1 {
        debug!(
            archive = %path.display(),
            selected = %member_name,
            ignored = members.len() - 1,
            "archive holds multiple tabular members"
        );
    }

    let member = archive
        .by_name(member_name)
        .map_err(|e| IngestError::Archive {
            path: path.to_path_buf(),
            source: e,
        })?;
    read_table(std::io::BufReader::new(member), path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use recon_model::cell;
    use std::io::Write;
    use tempfile::TempDir;

    fn write_zip(dir: &Path, name: &str, members: &[(&str, &str)]) -> std::path::PathBuf {
        let path = dir.join(name);
        let file = std::fs::File::create(&path).unwrap();
        let mut writer = zip::ZipWriter::new(file);
        let options = zip::write::SimpleFileOptions::default();
        for (member_name, content) in members {
            writer.start_file(*member_name, options).unwrap();
            writer.write_all(content.as_bytes()).unwrap();
        }
        writer.finish().unwrap();
        path
    }

    #[test]
    fn loads_single_csv_member() {
        let dir = TempDir::new().unwrap();
        let path = write_zip(
            dir.path(),
            "bene_2008.zip",
            &[("DE1_0_2008_Beneficiary.csv", "ID,NAME\n1,Ann\n")],
        );

        let table = load_csv_from_zip(&path).unwrap();
        assert_eq!(table.columns, vec!["ID", "NAME"]);
        assert_eq!(cell(&table.rows[0], "NAME").as_text(), Some("Ann"));
    }

    #[test]
    fn multiple_members_pick_lexicographically_first() {
        let dir = TempDir::new().unwrap();
        let path = write_zip(
            dir.path(),
            "multi.zip",
            &[
                ("z_second.csv", "ID\n2\n"),
                ("a_first.csv", "ID\n1\n"),
                ("readme.txt", "not tabular"),
            ],
        );

        let table = load_csv_from_zip(&path).unwrap();
        assert_eq!(cell(&table.rows[0], "ID").as_text(), Some("1"));
    }

    #[test]
    fn archive_without_csv_member_fails() {
        let dir = TempDir::new().unwrap();
        let path = write_zip(dir.path(), "empty.zip", &[("readme.txt", "nothing here")]);

        let err = load_csv_from_zip(&path).unwrap_err();
        assert!(matches!(err, IngestError::NoTabularPayload { .. }));
    }

    #[test]
    fn inventory_lists_only_tabular_members_sorted() {
        let dir = TempDir::new().unwrap();
        let path = write_zip(
            dir.path(),
            "multi.zip",
            &[
                ("z_second.CSV", "ID\n2\n"),
                ("a_first.csv", "ID\n1\n"),
                ("readme.txt", "not tabular"),
            ],
        );

        let members = archive_inventory(&path).unwrap();
        assert_eq!(members, vec!["a_first.csv", "z_second.CSV"]);
    }
}
