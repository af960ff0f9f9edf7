#![deny(unsafe_code)]

/// Key-level reconciliation between two datasets.
///
/// Each list is sorted ascending so repeated runs over the same inputs are
/// byte-identical. Together the three lists partition the union of both
/// sides' key sets.
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct KeyReconciliation {
    /// Keys present only in the old (reference) dataset.
    pub only_in_old: Vec<String>,
    /// Keys present only in the new (rebuilt) dataset.
    pub only_in_new: Vec<String>,
    /// Keys present on both sides.
    pub shared: Vec<String>,
}

impl KeyReconciliation {
    pub fn shared_count(&self) -> usize {
        self.shared.len()
    }

    /// True when the two sides agree exactly on record existence.
    pub fn is_clean(&self) -> bool {
        self.only_in_old.is_empty() && self.only_in_new.is_empty()
    }
}

/// Per-column mismatch tally over the shared-key population.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ColumnMismatch {
    pub column: String,
    pub mismatched_rows: usize,
    /// Fraction of shared-key rows where the normalized values differ.
    /// Always in [0, 1]; exactly 0.0 when there are no shared keys.
    pub mismatch_rate: f64,
}

/// Column-level mismatch report for one dataset pair.
///
/// Entries cover every column present on both sides (the key column
/// excluded) and are sorted by `mismatched_rows` descending, then column
/// name ascending, so the worst offenders surface first and ties break
/// deterministically.
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct MismatchReport {
    pub shared_key_count: usize,
    pub columns: Vec<ColumnMismatch>,
}

impl MismatchReport {
    /// The `n` worst columns, in report order.
    pub fn top(&self, n: usize) -> &[ColumnMismatch] {
        &self.columns[..self.columns.len().min(n)]
    }

    /// Total mismatched cells across all compared columns.
    pub fn total_mismatches(&self) -> usize {
        self.columns.iter().map(|c| c.mismatched_rows).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn top_clamps_to_available_columns() {
        let report = MismatchReport {
            shared_key_count: 10,
            columns: vec![ColumnMismatch {
                column: "NAME".to_string(),
                mismatched_rows: 3,
                mismatch_rate: 0.3,
            }],
        };
        assert_eq!(report.top(5).len(), 1);
        assert_eq!(report.top(0).len(), 0);
        assert_eq!(report.total_mismatches(), 3);
    }

    #[test]
    fn clean_reconciliation_has_no_one_sided_keys() {
        let recon = KeyReconciliation {
            only_in_old: vec![],
            only_in_new: vec![],
            shared: vec!["1".to_string(), "2".to_string()],
        };
        assert!(recon.is_clean());
        assert_eq!(recon.shared_count(), 2);
    }
}
