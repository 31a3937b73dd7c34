use std::path::PathBuf;

use sdmx_validate::{FilterResult, RowConstraintOutcome};

#[derive(Debug)]
pub struct FilterRun {
    pub data: PathBuf,
    pub structure_id: String,
    pub result: FilterResult,
    /// Where the filtered message was written; `None` for dry runs and
    /// empty output.
    pub output: Option<PathBuf>,
    pub report: Option<PathBuf>,
}

#[derive(Debug)]
pub struct RowsRun {
    pub csv: PathBuf,
    pub indicator: String,
    pub outcome: RowConstraintOutcome,
    pub output: PathBuf,
}
