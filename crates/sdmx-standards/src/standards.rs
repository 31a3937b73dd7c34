use sdmx_model::{ConstraintStore, StructureDefinition, StructureIndex};
use tracing::info;

use crate::csv::constraints::load_constraint_store;
use crate::error::StandardsError;
use crate::paths::StandardsPaths;
use crate::structure::load_structure;

/// The global DSD and content constraints, loaded once and shared read-only.
#[derive(Debug, Clone)]
pub struct Standards {
    pub structure: StructureDefinition,
    pub index: StructureIndex,
    pub constraints: ConstraintStore,
}

impl Standards {
    pub fn new(structure: StructureDefinition, constraints: ConstraintStore) -> Self {
        let index = StructureIndex::new(&structure);
        Self {
            structure,
            index,
            constraints,
        }
    }

    pub fn load(paths: &StandardsPaths) -> Result<Self, StandardsError> {
        let structure = load_structure(&paths.structure)?;
        let constraints = load_constraint_store(&paths.constraints)?;
        info!(
            structure = %structure.id,
            dimensions = structure.dimensions.len(),
            attributes = structure.attributes.len(),
            constrained_series = constraints.len(),
            "standards loaded"
        );
        Ok(Self::new(structure, constraints))
    }
}
