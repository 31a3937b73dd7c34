//! Flat indicator CSV data (one observation per row).

use std::path::Path;

use sdmx_model::{Row, RowTable};

use super::{read_document, read_file};
use crate::error::StandardsError;

/// Read a CSV file; blank cells and cells missing from short records
/// become `None`.
pub fn load_row_table(path: &Path) -> Result<RowTable, StandardsError> {
    let bytes = read_file(path)?;
    parse_row_table(&bytes, path)
}

pub fn parse_row_table(bytes: &[u8], path: &Path) -> Result<RowTable, StandardsError> {
    let document = read_document(bytes, path)?;
    let mut table = RowTable::new(document.headers.clone());
    for record in document.records {
        let mut cells = record.into_iter();
        let row: Row = document
            .headers
            .iter()
            .map(|column| {
                let value = cells.next().filter(|v| !v.is_empty());
                (column.clone(), value)
            })
            .collect();
        table.rows.push(row);
    }
    Ok(table)
}

/// Write rows in header order; `None` cells are written blank.
pub fn write_row_table(path: &Path, table: &RowTable) -> Result<(), StandardsError> {
    let mut writer = ::csv::Writer::from_path(path).map_err(|e| StandardsError::csv(path, &e))?;
    writer
        .write_record(&table.columns)
        .map_err(|e| StandardsError::csv(path, &e))?;
    for row in &table.rows {
        let record = table.columns.iter().map(|column| {
            row.get(column)
                .and_then(Option::as_deref)
                .unwrap_or_default()
        });
        writer
            .write_record(record)
            .map_err(|e| StandardsError::csv(path, &e))?;
    }
    writer.flush().map_err(|e| StandardsError::io(path, e))
}
