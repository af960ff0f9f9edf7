//! Reconciliation engine over pre-loaded tables.
//!
//! Pure engine crate: receives loaded [`recon_model::Table`]s, returns
//! structured results. No file or directory I/O.

pub mod columns;
pub mod engine;
pub mod keys;
pub mod normalize;

pub use columns::{ChunkedReconciler, ColumnReconciler, InMemoryReconciler, comparable_columns};
pub use engine::{ComparisonResult, compare_tables};
pub use keys::{key_index, reconcile_keys, row_key};
pub use normalize::{normalize, normalize_str};
