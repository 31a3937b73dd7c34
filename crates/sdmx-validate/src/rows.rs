//! Content constraints applied to flat indicator rows.
//!
//! Each row is one observation with every concept as a column. A row is kept
//! only when its series code has a constraint row and every constrained
//! column holds an allowed value. Rows without a series code, or whose
//! series is not in the table, are removed without a reason.

use sdmx_model::{AllowedSpec, ConstraintStore, Row, RowTable, SERIES_CONCEPT};
use tracing::debug;

use crate::dedupe::dedupe_messages;

/// Rows that satisfied the constraints plus why the others were removed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RowConstraintOutcome {
    pub table: RowTable,
    pub total: usize,
    pub removed: usize,
    /// Distinct removal reasons, sorted.
    pub reasons: Vec<String>,
}

impl RowConstraintOutcome {
    pub fn kept(&self) -> usize {
        self.table.height()
    }

    pub fn summary(&self, indicator_id: &str) -> String {
        format!(
            "{indicator_id} - Removed {} rows while constraining data to the global content \
             constraints (out of {}).",
            self.removed, self.total
        )
    }
}

pub fn constrain_rows(table: &RowTable, constraints: &ConstraintStore) -> RowConstraintOutcome {
    let mut kept = Vec::with_capacity(table.height());
    let mut reasons = Vec::new();

    for row in &table.rows {
        match check_row(row, constraints) {
            RowCheck::Keep => kept.push(row.clone()),
            RowCheck::Unconstrained => {}
            RowCheck::Violations(row_reasons) => reasons.extend(row_reasons),
        }
    }

    let removed = table.height() - kept.len();
    if removed > 0 {
        debug!(removed, total = table.height(), "rows removed by content constraints");
    }
    RowConstraintOutcome {
        table: table.with_rows(kept),
        total: table.height(),
        removed,
        reasons: dedupe_messages(reasons),
    }
}

enum RowCheck {
    Keep,
    /// No series code, or no constraint row for it.
    Unconstrained,
    Violations(Vec<String>),
}

fn check_row(row: &Row, constraints: &ConstraintStore) -> RowCheck {
    let Some(series_constraints) = row
        .get(SERIES_CONCEPT)
        .and_then(Option::as_deref)
        .and_then(|series| constraints.series(series))
    else {
        return RowCheck::Unconstrained;
    };

    let mut reasons = Vec::new();
    for (column, spec) in series_constraints.concepts() {
        let AllowedSpec::Values(allowed) = spec else {
            continue;
        };
        match row.get(column) {
            None if allowed.allows_missing() => {}
            None => reasons.push(format!(
                "Column \"{column}\" is missing value. Allowed values are: {}",
                allowed.display()
            )),
            Some(None) if allowed.allows_missing() => {}
            Some(value) => {
                let value = value.as_deref().unwrap_or_default();
                if !allowed.permits(value) {
                    reasons.push(format!(
                        "Column \"{column}\" has invalid value \"{value}\". Allowed values are: {}",
                        allowed.display()
                    ));
                }
            }
        }
    }
    if reasons.is_empty() {
        RowCheck::Keep
    } else {
        RowCheck::Violations(reasons)
    }
}
