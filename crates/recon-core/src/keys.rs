//! Identity reconciliation: which records exist on which side.

use std::collections::{BTreeMap, BTreeSet};

use tracing::warn;

use recon_model::{KeyReconciliation, Row, Table, cell};

use crate::normalize::normalize;

/// The key of a row, or `None` when it is absent.
///
/// A row whose key normalizes to empty cannot participate in identity
/// reconciliation and is excluded from every output set.
pub fn row_key(row: &Row, key_column: &str) -> Option<String> {
    let key = normalize(cell(row, key_column));
    if key.is_empty() { None } else { Some(key) }
}

/// Maps each key to the index of its first occurrence in the table.
///
/// Duplicate keys within one side are compared by first occurrence only;
/// the duplication is surfaced through a warning, not a failure, so the
/// rest of the report stays available for diagnosis.
pub fn key_index(table: &Table, key_column: &str, side: &str) -> BTreeMap<String, usize> {
    let mut index = BTreeMap::new();
    let mut duplicates = 0usize;
    for (idx, row) in table.rows.iter().enumerate() {
        let Some(key) = row_key(row, key_column) else {
            continue;
        };
        if index.contains_key(&key) {
            duplicates += 1;
        } else {
            index.insert(key, idx);
        }
    }
    if duplicates > 0 {
        warn!(
            side = side,
            duplicates,
            "duplicate keys within one side; comparing first occurrence only"
        );
    }
    index
}

/// Computes the symmetric set difference and intersection of the two
/// tables' key sets, each result sorted ascending.
///
/// The three output sets partition the union of both sides' keys: no key
/// appears in more than one of them.
pub fn reconcile_keys(old: &Table, new: &Table, key_column: &str) -> KeyReconciliation {
    let old_keys: BTreeSet<String> = old
        .rows
        .iter()
        .filter_map(|row| row_key(row, key_column))
        .collect();
    let new_keys: BTreeSet<String> = new
        .rows
        .iter()
        .filter_map(|row| row_key(row, key_column))
        .collect();

    // BTreeSet iteration is already ascending, so the outputs are stable.
    KeyReconciliation {
        only_in_old: old_keys.difference(&new_keys).cloned().collect(),
        only_in_new: new_keys.difference(&old_keys).cloned().collect(),
        shared: old_keys.intersection(&new_keys).cloned().collect(),
    }
}
