#![deny(unsafe_code)]

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Default cap on sampled keys in the ID-discrepancy report, per side.
pub const DEFAULT_ID_SAMPLE_CAP: usize = 200;

/// Required-substring patterns for one logical dataset.
///
/// A candidate filename matches when it contains every listed substring,
/// case-insensitively. Old-side inputs are archives, new-side inputs are
/// flat CSV files, so the two sides carry separate pattern lists.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetSpec {
    pub old_patterns: Vec<String>,
    pub new_patterns: Vec<String>,
}

/// Explicit run configuration for the reconciliation engine.
///
/// Passed into every entry point; there is no ambient global state. The
/// built-in default reproduces the CMS DE-SynPUF migration layout and can
/// be overridden wholesale from a TOML file.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReconConfig {
    /// Directory holding the old-side archive files.
    pub old_dir: PathBuf,
    /// Directory holding the new-side flat CSV files.
    pub new_dir: PathBuf,
    /// Directory where report files are written.
    pub output_dir: PathBuf,
    /// Identifier column shared by both sides of every dataset.
    pub key_column: String,
    /// Per-side cap on keys sampled into the ID-discrepancy report.
    pub id_sample_cap: usize,
    /// Logical dataset label to its filename patterns.
    pub datasets: BTreeMap<String, DatasetSpec>,
}

impl Default for ReconConfig {
    fn default() -> Self {
        let mut datasets = BTreeMap::new();
        for year in ["2008", "2009", "2010"] {
            datasets.insert(
                format!("beneficiary_{year}"),
                DatasetSpec {
                    old_patterns: vec![
                        "Beneficiary_Summary_File".to_string(),
                        year.to_string(),
                    ],
                    new_patterns: vec![format!("{year}_Beneficiary")],
                },
            );
        }
        for sample in ["1A", "1B"] {
            datasets.insert(
                format!("carrier_claims_{sample}"),
                DatasetSpec {
                    old_patterns: vec![
                        "Carrier_Claims".to_string(),
                        format!("Sample_{sample}"),
                    ],
                    new_patterns: vec![format!("Carrier_Claims_Sample_{sample}")],
                },
            );
        }
        Self {
            old_dir: PathBuf::from("data/raw/cms"),
            new_dir: PathBuf::from("data/raw/new"),
            output_dir: PathBuf::from("outputs"),
            key_column: "DESYNPUF_ID".to_string(),
            id_sample_cap: DEFAULT_ID_SAMPLE_CAP,
            datasets,
        }
    }
}

impl ReconConfig {
    /// Patterns for the old side, label to required substrings.
    pub fn old_patterns(&self) -> BTreeMap<String, Vec<String>> {
        self.datasets
            .iter()
            .map(|(label, spec)| (label.clone(), spec.old_patterns.clone()))
            .collect()
    }

    /// Patterns for the new side, label to required substrings.
    pub fn new_patterns(&self) -> BTreeMap<String, Vec<String>> {
        self.datasets
            .iter()
            .map(|(label, spec)| (label.clone(), spec.new_patterns.clone()))
            .collect()
    }
}
