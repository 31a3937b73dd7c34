//! Parses the SDG global content constraint table.
//!
//! One row per series code (`SERIES` column), one column per concept. A
//! descriptive `Name` column may be present and is kept as metadata only.

use std::collections::BTreeMap;
use std::path::Path;

use sdmx_model::{ConstraintStore, ConstraintTable, SERIES_CONCEPT};
use tracing::{debug, warn};

use super::{read_document, read_file};
use crate::error::StandardsError;

/// Read the raw constraint table from a CSV file.
pub fn load_constraint_table(path: &Path) -> Result<ConstraintTable, StandardsError> {
    let bytes = read_file(path)?;
    parse_constraint_table(&bytes, path)
}

/// Parse raw constraint table bytes. `path` is only used in errors.
pub fn parse_constraint_table(bytes: &[u8], path: &Path) -> Result<ConstraintTable, StandardsError> {
    let document = read_document(bytes, path)?;
    if !document.headers.iter().any(|h| h == SERIES_CONCEPT) {
        return Err(StandardsError::MissingColumn {
            path: path.to_path_buf(),
            column: SERIES_CONCEPT.to_string(),
        });
    }

    let mut table = ConstraintTable::new(document.headers.clone());
    for record in document.records {
        let row: BTreeMap<String, String> = document
            .headers
            .iter()
            .cloned()
            .zip(record)
            .filter(|(column, _)| !column.is_empty())
            .collect();
        table.rows.push(row);
    }
    Ok(table)
}

/// Load and decode the constraint table into a [`ConstraintStore`].
pub fn load_constraint_store(path: &Path) -> Result<ConstraintStore, StandardsError> {
    let table = load_constraint_table(path)?;
    let store = ConstraintStore::from_table(&table);
    for series in store.duplicate_series() {
        warn!(
            path = %path.display(),
            series = %series,
            "series listed more than once in constraint table; keeping first row"
        );
    }
    debug!(
        path = %path.display(),
        rows = table.rows.len(),
        series = store.len(),
        "loaded content constraints"
    );
    Ok(store)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rows_shorter_than_header_leave_cells_unset() {
        let csv = b"SERIES,SEX,AGE\nX,F\n";
        let table = parse_constraint_table(csv, Path::new("inline.csv")).unwrap();
        assert_eq!(table.rows.len(), 1);
        assert_eq!(table.rows[0].get("SEX").map(String::as_str), Some("F"));
        assert!(!table.rows[0].contains_key("AGE"));
    }
}
