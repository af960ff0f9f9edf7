//! One full comparison of a dataset pair.

use tracing::info;

use recon_model::{KeyReconciliation, MismatchReport, Table};

use crate::columns::ColumnReconciler;
use crate::keys::reconcile_keys;

/// Everything the engine produces for one dataset pair.
#[derive(Debug, Clone)]
pub struct ComparisonResult {
    pub keys: KeyReconciliation,
    pub report: MismatchReport,
    pub old_rows: usize,
    pub new_rows: usize,
}

/// Runs identity reconciliation, then column reconciliation restricted to
/// the shared keys. Pure per invocation: no state survives between calls.
pub fn compare_tables(
    old: &Table,
    new: &Table,
    key_column: &str,
    reconciler: &dyn ColumnReconciler,
) -> ComparisonResult {
    let keys = reconcile_keys(old, new, key_column);
    info!(
        old_rows = old.row_count(),
        new_rows = new.row_count(),
        shared = keys.shared.len(),
        only_in_old = keys.only_in_old.len(),
        only_in_new = keys.only_in_new.len(),
        "key reconciliation complete"
    );

    let report = reconciler.reconcile_columns(old, new, key_column, &keys.shared);
    info!(
        compared_columns = report.columns.len(),
        total_mismatches = report.total_mismatches(),
        "column reconciliation complete"
    );

    ComparisonResult {
        old_rows: old.row_count(),
        new_rows: new.row_count(),
        keys,
        report,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::columns::InMemoryReconciler;
    use recon_model::{CellValue, Row};

    fn table(columns: &[&str], rows: &[&[&str]]) -> Table {
        let mut table = Table::new(columns.iter().map(|c| (*c).to_string()).collect());
        for values in rows {
            let mut row = Row::new();
            for (column, value) in columns.iter().zip(values.iter()) {
                if !value.is_empty() {
                    row.insert((*column).to_string(), CellValue::Text((*value).to_string()));
                }
            }
            table.push_row(row);
        }
        table
    }

    #[test]
    fn degenerate_input_produces_full_listings_and_zero_rates() {
        let old = table(&["ID", "NAME"], &[&["1", "Ann"], &["2", "Bea"]]);
        let new = table(&["ID", "NAME"], &[&["3", "Cee"]]);

        let result = compare_tables(&old, &new, "ID", &InMemoryReconciler);
        assert_eq!(result.keys.only_in_old, vec!["1", "2"]);
        assert_eq!(result.keys.only_in_new, vec!["3"]);
        assert!(result.keys.shared.is_empty());
        assert_eq!(result.report.columns.len(), 1);
        assert_eq!(result.report.columns[0].mismatch_rate, 0.0);
    }

    #[test]
    fn duplicate_keys_compare_first_occurrence_only() {
        let old = table(&["ID", "NAME"], &[&["1", "Ann"], &["1", "Zed"]]);
        let new = table(&["ID", "NAME"], &[&["1", "Ann"]]);

        let result = compare_tables(&old, &new, "ID", &InMemoryReconciler);
        assert_eq!(result.keys.shared, vec!["1"]);
        // "Zed" in the duplicate row never participates.
        assert_eq!(result.report.columns[0].mismatched_rows, 0);
    }
}
