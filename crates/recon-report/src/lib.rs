//! Report persistence.
//!
//! Writes the two artifacts the engine emits per dataset pair: an
//! ID-discrepancy table (capped sample per side) and the full column
//! mismatch table. Naming follows the original pipeline so downstream
//! tooling keeps working: `<label>_id_discrepancies.csv` and
//! `<label>_column_mismatches.csv`.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::info;

use recon_model::{KeyReconciliation, MismatchReport};

fn ensure_output_dir(dir: &Path) -> Result<()> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("create output directory {}", dir.display()))
}

/// Writes the ID-discrepancy report for one dataset pair.
///
/// Two columns, `missing_in_new_sample` and `missing_in_old_sample`, each
/// capped to the first `cap` keys of its side; the shorter side is padded
/// with empty cells. Returns the written path.
pub fn write_id_discrepancies(
    dir: &Path,
    label: &str,
    keys: &KeyReconciliation,
    cap: usize,
) -> Result<PathBuf> {
    ensure_output_dir(dir)?;
    let path = dir.join(format!("{label}_id_discrepancies.csv"));
    let mut writer = csv::Writer::from_path(&path)
        .with_context(|| format!("create report {}", path.display()))?;

    writer.write_record(["missing_in_new_sample", "missing_in_old_sample"])?;

    let missing_in_new = &keys.only_in_old[..keys.only_in_old.len().min(cap)];
    let missing_in_old = &keys.only_in_new[..keys.only_in_new.len().min(cap)];
    for idx in 0..missing_in_new.len().max(missing_in_old.len()) {
        writer.write_record([
            missing_in_new.get(idx).map_or("", String::as_str),
            missing_in_old.get(idx).map_or("", String::as_str),
        ])?;
    }
    writer
        .flush()
        .with_context(|| format!("flush report {}", path.display()))?;

    info!(report = %path.display(), "wrote ID discrepancy report");
    Ok(path)
}

/// Writes the column mismatch report for one dataset pair, in report order
/// (worst column first), unbounded.
pub fn write_column_mismatches(
    dir: &Path,
    label: &str,
    report: &MismatchReport,
) -> Result<PathBuf> {
    ensure_output_dir(dir)?;
    let path = dir.join(format!("{label}_column_mismatches.csv"));
    let mut writer = csv::Writer::from_path(&path)
        .with_context(|| format!("create report {}", path.display()))?;

    writer.write_record(["column", "mismatched_rows", "mismatch_rate"])?;
    for column in &report.columns {
        let mismatched_rows = column.mismatched_rows.to_string();
        let mismatch_rate = column.mismatch_rate.to_string();
        writer.write_record([
            column.column.as_str(),
            mismatched_rows.as_str(),
            mismatch_rate.as_str(),
        ])?;
    }
    writer
        .flush()
        .with_context(|| format!("flush report {}", path.display()))?;

    info!(report = %path.display(), "wrote column mismatch report");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use recon_model::ColumnMismatch;
    use tempfile::TempDir;

    fn read_lines(path: &Path) -> Vec<String> {
        std::fs::read_to_string(path)
            .unwrap()
            .lines()
            .map(str::to_string)
            .collect()
    }

    #[test]
    fn id_report_pads_the_shorter_side() {
        let dir = TempDir::new().unwrap();
        let keys = KeyReconciliation {
            only_in_old: vec!["a".to_string(), "b".to_string()],
            only_in_new: vec!["z".to_string()],
            shared: vec![],
        };

        let path = write_id_discrepancies(dir.path(), "beneficiary_2008", &keys, 200).unwrap();
        assert!(path.ends_with("beneficiary_2008_id_discrepancies.csv"));
        let lines = read_lines(&path);
        assert_eq!(lines[0], "missing_in_new_sample,missing_in_old_sample");
        assert_eq!(lines[1], "a,z");
        assert_eq!(lines[2], "b,");
    }

    #[test]
    fn id_report_caps_each_side() {
        let dir = TempDir::new().unwrap();
        let keys = KeyReconciliation {
            only_in_old: (0..300).map(|i| format!("{i:03}")).collect(),
            only_in_new: vec![],
            shared: vec![],
        };

        let path = write_id_discrepancies(dir.path(), "bene", &keys, 200).unwrap();
        let lines = read_lines(&path);
        // Header plus exactly the cap.
        assert_eq!(lines.len(), 201);
        assert_eq!(lines[1], "000,");
        assert_eq!(lines[200], "199,");
    }

    #[test]
    fn column_report_preserves_report_order() {
        let dir = TempDir::new().unwrap();
        let report = MismatchReport {
            shared_key_count: 4,
            columns: vec![
                ColumnMismatch {
                    column: "NAME".to_string(),
                    mismatched_rows: 2,
                    mismatch_rate: 0.5,
                },
                ColumnMismatch {
                    column: "AGE".to_string(),
                    mismatched_rows: 0,
                    mismatch_rate: 0.0,
                },
            ],
        };

        let path = write_column_mismatches(dir.path(), "bene", &report).unwrap();
        let lines = read_lines(&path);
        assert_eq!(lines[0], "column,mismatched_rows,mismatch_rate");
        assert_eq!(lines[1], "NAME,2,0.5");
        assert_eq!(lines[2], "AGE,0,0");
    }

    #[test]
    fn creates_missing_output_directory() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("outputs").join("run1");
        let keys = KeyReconciliation::default();

        let path = write_id_discrepancies(&nested, "bene", &keys, 200).unwrap();
        assert!(path.exists());
    }
}
