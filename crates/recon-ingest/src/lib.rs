//! Input resolution and tabular loading.
//!
//! Turns loosely-named staging directories into uniform in-memory tables:
//! pattern-based file resolution, flat CSV loading, and zip-archived CSV
//! loading, all read as opaque strings.

pub mod archive;
pub mod csv_table;
pub mod discovery;
pub mod error;

pub use archive::{archive_inventory, load_csv_from_zip};
pub use csv_table::{load_and_concatenate, load_csv, read_table};
pub use discovery::{list_files_with_extension, matches_all_patterns, resolve_inputs};
pub use error::{IngestError, MissingInput, Result, UnresolvedInputs};
