//! CSV loading into the uniform [`Table`] representation.
//!
//! Every value is read as a raw string. No type inference happens here;
//! trimming and missing/empty collapsing is the comparison normalizer's
//! job, applied to both sides at compare time.

use std::io::Read;
use std::path::Path;

use csv::ReaderBuilder;
use tracing::debug;

use recon_model::{CellValue, Row, Table};

use crate::error::{IngestError, Result};

/// Reads a headered CSV stream into a [`Table`].
///
/// `origin` is only used in error messages. Header names are stripped of a
/// leading BOM; cell contents are kept verbatim, with the empty string read
/// as [`CellValue::Missing`].
pub fn read_table<R: Read>(reader: R, origin: &Path) -> Result<Table> {
    let mut csv_reader = ReaderBuilder::new().has_headers(true).from_reader(reader);

    let headers: Vec<String> = csv_reader
        .headers()
        .map_err(|e| IngestError::Csv {
            path: origin.to_path_buf(),
            source: e,
        })?
        .iter()
        .map(|h| h.trim_matches('\u{feff}').to_string())
        .collect();

    if headers.is_empty() {
        return Err(IngestError::EmptyTable {
            path: origin.to_path_buf(),
        });
    }

    let mut table = Table::new(headers.clone());
    for record in csv_reader.records() {
        let record = record.map_err(|e| IngestError::Csv {
            path: origin.to_path_buf(),
            source: e,
        })?;

        let mut row = Row::new();
        for (header, value) in headers.iter().zip(record.iter()) {
            let cell = if value.is_empty() {
                CellValue::Missing
            } else {
                CellValue::Text(value.to_string())
            };
            row.insert(header.clone(), cell);
        }
        table.push_row(row);
    }

    debug!(
        origin = %origin.display(),
        rows = table.row_count(),
        columns = table.columns.len(),
        "loaded table"
    );
    Ok(table)
}

/// Loads a flat CSV file.
pub fn load_csv(path: &Path) -> Result<Table> {
    let file = std::fs::File::open(path).map_err(|e| IngestError::FileRead {
        path: path.to_path_buf(),
        source: e,
    })?;
    read_table(std::io::BufReader::new(file), path)
}

/// Vertically unions multiple same-shaped tables into one.
///
/// Used when one logical dataset is split across several source files.
/// Columns are unioned by name, declared in first-seen order across the
/// inputs; rows keep the concatenation order of the inputs as given.
pub fn load_and_concatenate(paths: &[std::path::PathBuf]) -> Result<Table> {
    let mut columns: Vec<String> = Vec::new();
    let mut rows: Vec<Row> = Vec::new();

    for path in paths {
        let table = load_csv(path)?;
        for column in &table.columns {
            if !columns.contains(column) {
                columns.push(column.clone());
            }
        }
        rows.extend(table.rows);
    }

    let mut combined = Table::new(columns);
    combined.rows = rows;
    Ok(combined)
}
