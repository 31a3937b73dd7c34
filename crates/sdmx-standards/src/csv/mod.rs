//! CSV readers for the constraint table and flat indicator data.

pub mod constraints;
pub mod rows;

use std::path::Path;

use crate::error::StandardsError;

/// Header names and raw records of a CSV document.
pub(crate) struct CsvDocument {
    pub headers: Vec<String>,
    pub records: Vec<Vec<String>>,
}

/// Parse CSV bytes, trimming values and the BOM from header names.
///
/// Invalid UTF-8 sequences are dropped rather than rejected; published
/// constraint tables are not reliably encoded.
pub(crate) fn read_document(bytes: &[u8], path: &Path) -> Result<CsvDocument, StandardsError> {
    let mut reader = ::csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(bytes);
    let headers = reader
        .byte_headers()
        .map_err(|e| StandardsError::csv(path, &e))?
        .iter()
        .map(|h| decode_field(h).trim_matches('\u{feff}').trim().to_string())
        .collect();

    let mut records = Vec::new();
    for record in reader.byte_records() {
        let record = record.map_err(|e| StandardsError::csv(path, &e))?;
        records.push(
            record
                .iter()
                .map(|value| decode_field(value).trim().to_string())
                .collect(),
        );
    }
    Ok(CsvDocument { headers, records })
}

/// Decode a field, dropping only byte sequences that are not valid UTF-8.
fn decode_field(bytes: &[u8]) -> String {
    bytes.utf8_chunks().map(|chunk| chunk.valid()).collect()
}

pub(crate) fn read_file(path: &Path) -> Result<Vec<u8>, StandardsError> {
    std::fs::read(path).map_err(|e| StandardsError::io(path, e))
}
