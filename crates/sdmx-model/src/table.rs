use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// One flat indicator row: column -> value, `None` for a blank cell.
pub type Row = BTreeMap<String, Option<String>>;

/// Flat indicator data with its header order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowTable {
    pub columns: Vec<String>,
    pub rows: Vec<Row>,
}

impl RowTable {
    pub fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    pub fn height(&self) -> usize {
        self.rows.len()
    }

    /// Same header, different rows.
    pub fn with_rows(&self, rows: Vec<Row>) -> Self {
        Self {
            columns: self.columns.clone(),
            rows,
        }
    }
}
