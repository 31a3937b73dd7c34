//! Loads the global DSD in its JSON hand-off form.

use std::path::Path;

use sdmx_model::StructureDefinition;

use crate::error::StandardsError;

/// Read and validate the global structure definition.
pub fn load_structure(path: &Path) -> Result<StructureDefinition, StandardsError> {
    let contents = std::fs::read_to_string(path).map_err(|e| StandardsError::io(path, e))?;
    let structure: StructureDefinition =
        serde_json::from_str(&contents).map_err(|source| StandardsError::Json {
            path: path.to_path_buf(),
            source,
        })?;
    structure
        .validate()
        .map_err(|source| StandardsError::InvalidStructure {
            path: path.to_path_buf(),
            source,
        })?;
    Ok(structure)
}
