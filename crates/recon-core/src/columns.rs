//! Column-wise value comparison over the shared-key population.

use std::collections::BTreeMap;

use recon_model::{ColumnMismatch, MismatchReport, Table, cell};

use crate::keys::key_index;
use crate::normalize::normalize;

/// Columns compared between the two tables: the intersection of both
/// declared column sets, the key column excluded. Columns unique to one
/// side are schema drift, excluded without failure.
pub fn comparable_columns(old: &Table, new: &Table, key_column: &str) -> Vec<String> {
    let new_columns = new.column_set();
    old.column_set()
        .into_iter()
        .filter(|column| *column != key_column && new_columns.contains(column))
        .map(str::to_string)
        .collect()
}

/// Column comparison strategy.
///
/// Both implementations must produce identical reports for identical
/// inputs: per-column mismatch counts over normalized values, rates over
/// the shared-key cardinality (0.0 when it is zero), sorted by count
/// descending then column name ascending.
pub trait ColumnReconciler {
    fn reconcile_columns(
        &self,
        old: &Table,
        new: &Table,
        key_column: &str,
        shared_keys: &[String],
    ) -> MismatchReport;
}

fn tally_chunk(
    old: &Table,
    new: &Table,
    old_index: &BTreeMap<String, usize>,
    new_index: &BTreeMap<String, usize>,
    columns: &[String],
    keys: &[String],
    counts: &mut BTreeMap<String, usize>,
) {
    for key in keys {
        let (Some(&old_idx), Some(&new_idx)) = (old_index.get(key), new_index.get(key)) else {
            continue;
        };
        let old_row = &old.rows[old_idx];
        let new_row = &new.rows[new_idx];
        for column in columns {
            if normalize(cell(old_row, column)) != normalize(cell(new_row, column))
                && let Some(count) = counts.get_mut(column)
            {
                *count += 1;
            }
        }
    }
}

fn finalize(counts: BTreeMap<String, usize>, shared_count: usize) -> MismatchReport {
    let mut columns: Vec<ColumnMismatch> = counts
        .into_iter()
        .map(|(column, mismatched_rows)| ColumnMismatch {
            column,
            mismatched_rows,
            mismatch_rate: if shared_count == 0 {
                0.0
            } else {
                mismatched_rows as f64 / shared_count as f64
            },
        })
        .collect();
    columns.sort_by(|a, b| {
        b.mismatched_rows
            .cmp(&a.mismatched_rows)
            .then_with(|| a.column.cmp(&b.column))
    });
    MismatchReport {
        shared_key_count: shared_count,
        columns,
    }
}

/// Default strategy: aligns both tables once and tallies every shared key
/// in a single pass.
#[derive(Debug, Clone, Copy, Default)]
pub struct InMemoryReconciler;

impl ColumnReconciler for InMemoryReconciler {
    fn reconcile_columns(
        &self,
        old: &Table,
        new: &Table,
        key_column: &str,
        shared_keys: &[String],
    ) -> MismatchReport {
        let columns = comparable_columns(old, new, key_column);
        let old_index = key_index(old, key_column, "old");
        let new_index = key_index(new, key_column, "new");

        let mut counts: BTreeMap<String, usize> =
            columns.iter().map(|c| (c.clone(), 0)).collect();
        tally_chunk(
            old,
            new,
            &old_index,
            &new_index,
            &columns,
            shared_keys,
            &mut counts,
        );
        finalize(counts, shared_keys.len())
    }
}

/// Chunked strategy for oversized datasets.
///
/// Accumulates per-column counts across sequential key chunks without ever
/// materializing the joined table, and produces output identical to
/// [`InMemoryReconciler`].
#[derive(Debug, Clone, Copy)]
pub struct ChunkedReconciler {
    pub chunk_size: usize,
}

impl Default for ChunkedReconciler {
    fn default() -> Self {
        Self { chunk_size: 50_000 }
    }
}

impl ColumnReconciler for ChunkedReconciler {
    fn reconcile_columns(
        &self,
        old: &Table,
        new: &Table,
        key_column: &str,
        shared_keys: &[String],
    ) -> MismatchReport {
        let columns = comparable_columns(old, new, key_column);
        let old_index = key_index(old, key_column, "old");
        let new_index = key_index(new, key_column, "new");

        let chunk_size = self.chunk_size.max(1);
        let mut counts: BTreeMap<String, usize> =
            columns.iter().map(|c| (c.clone(), 0)).collect();
        for chunk in shared_keys.chunks(chunk_size) {
            tally_chunk(
                old,
                new,
                &old_index,
                &new_index,
                &columns,
                chunk,
                &mut counts,
            );
        }
        finalize(counts, shared_keys.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
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
    fn comparable_columns_exclude_key_and_one_sided_columns() {
        let old = table(&["ID", "NAME", "STATUS"], &[]);
        let new = table(&["ID", "NAME", "AGE"], &[]);
        assert_eq!(comparable_columns(&old, &new, "ID"), vec!["NAME"]);
    }

    #[test]
    fn trailing_whitespace_is_not_a_mismatch() {
        let old = table(&["ID", "NAME"], &[&["2", "Ann"]]);
        let new = table(&["ID", "NAME"], &[&["2", "Ann "]]);

        let report = InMemoryReconciler.reconcile_columns(
            &old,
            &new,
            "ID",
            &["2".to_string()],
        );
        assert_eq!(report.columns.len(), 1);
        assert_eq!(report.columns[0].mismatched_rows, 0);
        assert_eq!(report.columns[0].mismatch_rate, 0.0);
    }

    #[test]
    fn empty_and_missing_agree() {
        let old = table(&["ID", "NAME"], &[&["3", ""]]);
        let mut new = table(&["ID", "NAME"], &[]);
        let mut row = Row::new();
        row.insert("ID".to_string(), CellValue::Text("3".to_string()));
        row.insert("NAME".to_string(), CellValue::Missing);
        new.push_row(row);

        let report = InMemoryReconciler.reconcile_columns(
            &old,
            &new,
            "ID",
            &["3".to_string()],
        );
        assert_eq!(report.columns[0].mismatched_rows, 0);
    }

    #[test]
    fn zero_shared_keys_yield_rate_zero_not_nan() {
        let old = table(&["ID", "NAME"], &[&["1", "Ann"]]);
        let new = table(&["ID", "NAME"], &[&["2", "Bea"]]);

        let report = InMemoryReconciler.reconcile_columns(&old, &new, "ID", &[]);
        assert_eq!(report.shared_key_count, 0);
        assert_eq!(report.columns.len(), 1);
        assert_eq!(report.columns[0].mismatch_rate, 0.0);
        assert!(report.columns[0].mismatch_rate.is_finite());
    }

    #[test]
    fn alignment_is_by_key_not_row_position() {
        let old = table(&["ID", "NAME"], &[&["1", "Ann"], &["2", "Bea"]]);
        // Same records, opposite file order.
        let new = table(&["ID", "NAME"], &[&["2", "Bea"], &["1", "Ann"]]);

        let report = InMemoryReconciler.reconcile_columns(
            &old,
            &new,
            "ID",
            &["1".to_string(), "2".to_string()],
        );
        assert_eq!(report.columns[0].mismatched_rows, 0);
    }

    #[test]
    fn report_sorted_by_count_desc_then_name_asc() {
        let old = table(
            &["ID", "B", "A", "C"],
            &[&["1", "x", "x", "x"], &["2", "x", "x", "x"]],
        );
        let new = table(
            &["ID", "B", "A", "C"],
            &[&["1", "y", "x", "y"], &["2", "x", "x", "y"]],
        );

        let report = InMemoryReconciler.reconcile_columns(
            &old,
            &new,
            "ID",
            &["1".to_string(), "2".to_string()],
        );
        let order: Vec<(&str, usize)> = report
            .columns
            .iter()
            .map(|c| (c.column.as_str(), c.mismatched_rows))
            .collect();
        assert_eq!(order, vec![("C", 2), ("B", 1), ("A", 0)]);
    }

    #[test]
    fn chunked_matches_in_memory_exactly() {
        let keys: Vec<String> = (0..107).map(|i| format!("{i:04}")).collect();
        let old_rows: Vec<Vec<String>> = keys
            .iter()
            .map(|k| vec![k.clone(), format!("v{k}"), "same".to_string()])
            .collect();
        let new_rows: Vec<Vec<String>> = keys
            .iter()
            .enumerate()
            .map(|(i, k)| {
                let name = if i % 7 == 0 {
                    format!("changed{k}")
                } else {
                    format!("v{k}")
                };
                vec![k.clone(), name, "same".to_string()]
            })
            .collect();

        let build = |rows: &[Vec<String>]| {
            let columns = ["ID", "NAME", "FLAG"];
            let mut t = Table::new(columns.iter().map(|c| (*c).to_string()).collect());
            for values in rows {
                let mut row = Row::new();
                for (column, value) in columns.iter().zip(values.iter()) {
                    row.insert((*column).to_string(), CellValue::Text(value.clone()));
                }
                t.push_row(row);
            }
            t
        };
        let old = build(&old_rows);
        let new = build(&new_rows);

        let mut shared = keys.clone();
        shared.sort();

        let eager = InMemoryReconciler.reconcile_columns(&old, &new, "ID", &shared);
        for chunk_size in [1, 10, 64, 1000] {
            let chunked = ChunkedReconciler { chunk_size }
                .reconcile_columns(&old, &new, "ID", &shared);
            assert_eq!(chunked.shared_key_count, eager.shared_key_count);
            assert_eq!(chunked.columns, eager.columns);
        }
    }
}
