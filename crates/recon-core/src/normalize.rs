//! The single equivalence rule for cell comparison.
//!
//! Every representation of "absent" (a true-missing cell, the empty string,
//! whitespace-only content) collapses to the empty string; everything else
//! is compared after trimming surrounding whitespace. Both sides of every
//! equality test go through this, never one side only.

use recon_model::CellValue;

/// Canonical string form of raw text.
pub fn normalize_str(raw: &str) -> String {
    raw.trim().to_string()
}

/// Canonical string form of a cell.
pub fn normalize(value: &CellValue) -> String {
    match value {
        CellValue::Missing => String::new(),
        CellValue::Text(text) => normalize_str(text),
    }
}
