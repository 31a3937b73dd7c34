//! Standards directory path resolution.

use std::path::{Path, PathBuf};

/// Environment variable for overriding the standards directory.
pub const STANDARDS_ENV_VAR: &str = "SDMX_STANDARDS_DIR";

/// File name of the global DSD inside the standards directory.
pub const STRUCTURE_FILE: &str = "global_dsd.json";

/// File name of the content constraint table inside the standards directory.
pub const CONSTRAINTS_FILE: &str = "content_constraints.csv";

/// Get the standards root directory.
///
/// Resolution order:
/// 1. `SDMX_STANDARDS_DIR` environment variable
/// 2. `standards/` directory relative to workspace root
pub fn standards_root() -> PathBuf {
    if let Ok(root) = std::env::var(STANDARDS_ENV_VAR) {
        return PathBuf::from(root);
    }
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../standards")
}

/// Locations of the two standards inputs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StandardsPaths {
    pub structure: PathBuf,
    pub constraints: PathBuf,
}

impl StandardsPaths {
    /// Default file names under `root`.
    pub fn from_root(root: &Path) -> Self {
        Self {
            structure: root.join(STRUCTURE_FILE),
            constraints: root.join(CONSTRAINTS_FILE),
        }
    }

    pub fn with_structure(mut self, path: Option<PathBuf>) -> Self {
        if let Some(path) = path {
            self.structure = path;
        }
        self
    }

    pub fn with_constraints(mut self, path: Option<PathBuf>) -> Self {
        if let Some(path) = path {
            self.constraints = path;
        }
        self
    }
}

impl Default for StandardsPaths {
    fn default() -> Self {
        Self::from_root(&standards_root())
    }
}
