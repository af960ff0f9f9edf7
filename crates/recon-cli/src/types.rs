use std::path::PathBuf;

use recon_model::ColumnMismatch;

/// Result of one full `run` invocation.
#[derive(Debug)]
pub struct RunOutcome {
    pub output_dir: PathBuf,
    pub datasets: Vec<DatasetOutcome>,
}

impl RunOutcome {
    /// True when any dataset failed to load or compare.
    pub fn has_failures(&self) -> bool {
        self.datasets
            .iter()
            .any(|d| matches!(d.detail, DatasetDetail::Failed { .. }))
    }
}

/// Per-dataset outcome; failures never abort sibling datasets.
#[derive(Debug)]
pub struct DatasetOutcome {
    pub label: String,
    pub detail: DatasetDetail,
}

#[derive(Debug)]
pub enum DatasetDetail {
    Compared(Box<ComparedDataset>),
    Failed { error: String },
}

#[derive(Debug)]
pub struct ComparedDataset {
    pub old_rows: usize,
    pub new_rows: usize,
    pub shared_keys: usize,
    pub only_in_old: usize,
    pub only_in_new: usize,
    pub compared_columns: usize,
    /// Total mismatched cells across all compared columns.
    pub total_mismatches: usize,
    /// Worst columns, in report order.
    pub top_columns: Vec<ColumnMismatch>,
    pub id_report: PathBuf,
    pub mismatch_report: PathBuf,
}
