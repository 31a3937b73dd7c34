use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Kept/removed counts for one dataset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetSummary {
    pub structure: String,
    pub kept: usize,
    pub removed: usize,
    pub total: usize,
}

/// Outcome of filtering a data message against the global constraints.
///
/// Message lists are deduplicated and sorted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterReport {
    pub kept: usize,
    pub removed: usize,
    pub total: usize,
    /// Series with at least one global codelist violation.
    pub dsd_violation_count: usize,
    /// Series with at least one content constraint violation.
    pub content_violation_count: usize,
    pub dsd_messages: Vec<String>,
    pub content_messages: Vec<String>,
    #[serde(default)]
    pub datasets: Vec<DatasetSummary>,
}

impl FilterReport {
    pub fn is_compliant(&self) -> bool {
        self.removed == 0
    }

    /// True when no series survived the filter.
    pub fn is_empty_output(&self) -> bool {
        self.kept == 0
    }

    /// Both message lists merged, deduplicated, and sorted.
    pub fn messages(&self) -> Vec<&str> {
        self.dsd_messages
            .iter()
            .chain(&self.content_messages)
            .map(String::as_str)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }
}
