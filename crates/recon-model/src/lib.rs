//! Data model for tabular migration reconciliation.
//!
//! Pure types only: the in-memory [`Table`] representation shared by the
//! loader and the engine, the result types both reconcilers produce, and
//! the explicit run configuration. No I/O lives here.

pub mod config;
pub mod report;
pub mod table;

pub use config::{DEFAULT_ID_SAMPLE_CAP, DatasetSpec, ReconConfig};
pub use report::{ColumnMismatch, KeyReconciliation, MismatchReport};
pub use table::{CellValue, Row, Table, cell};
