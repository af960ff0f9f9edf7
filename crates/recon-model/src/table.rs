#![deny(unsafe_code)]

use std::collections::{BTreeMap, BTreeSet};

/// A single cell read from a source file.
///
/// Cells are opaque strings. No numeric or date typing is ever inferred,
/// so later comparisons cannot be skewed by silent coercion ("007" vs "7").
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", content = "value")]
pub enum CellValue {
    Text(String),
    Missing,
}

impl CellValue {
    /// The raw text of the cell, or `None` for a missing cell.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            CellValue::Text(text) => Some(text),
            CellValue::Missing => None,
        }
    }
}

/// One record: column name to cell value.
pub type Row = BTreeMap<String, CellValue>;

/// An in-memory table of string-typed columns.
///
/// `columns` is the declared column set; a row with no entry for a declared
/// column reads as [`CellValue::Missing`]. Tables are built once by the
/// loader and never mutated afterwards.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct Table {
    pub columns: Vec<String>,
    pub rows: Vec<Row>,
}

impl Table {
    pub fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    pub fn push_row(&mut self, row: Row) {
        self.rows.push(row);
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Declared column names as a set, for intersection with another table.
    pub fn column_set(&self) -> BTreeSet<&str> {
        self.columns.iter().map(String::as_str).collect()
    }

    /// Whether a column is declared on this table.
    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|c| c == name)
    }
}

/// Read a cell from a row, treating an absent entry as missing.
pub fn cell<'a>(row: &'a Row, column: &str) -> &'a CellValue {
    row.get(column).unwrap_or(&CellValue::Missing)
}
