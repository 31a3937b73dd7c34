//! Dataset-level partition of series into globally compatible and
//! non-compliant groups.

use sdmx_model::{
    ConstraintStore, DataMessage, Dataset, DatasetSummary, FilterReport, RowTable, Series,
    StructureIndex,
};
use tracing::{debug, info};

use crate::dedupe::dedupe_messages;
use crate::rows::{RowConstraintOutcome, constrain_rows};
use crate::series::{Phase, Violation, validate_series};

/// Filtered message plus the counts and messages describing what was removed.
#[derive(Debug, Clone)]
pub struct FilterResult {
    /// Input message with only compatible series; headers and structure
    /// references are unchanged.
    pub message: DataMessage,
    pub report: FilterReport,
}

/// Filter every dataset of `message` down to its globally compatible series.
pub fn filter_dataset(
    message: &DataMessage,
    constraints: &ConstraintStore,
    structure: &StructureIndex,
) -> FilterResult {
    GlobalFilter::new(structure, constraints).filter(message)
}

/// The global DSD and content constraints, borrowed for a filter run.
#[derive(Debug, Clone, Copy)]
pub struct GlobalFilter<'a> {
    structure: &'a StructureIndex,
    constraints: &'a ConstraintStore,
}

impl<'a> GlobalFilter<'a> {
    pub fn new(structure: &'a StructureIndex, constraints: &'a ConstraintStore) -> Self {
        Self {
            structure,
            constraints,
        }
    }

    pub fn validate_series(&self, series: &Series) -> Vec<Violation> {
        validate_series(
            &series.key,
            &series.observations,
            self.structure,
            self.constraints,
        )
    }

    pub fn filter(&self, message: &DataMessage) -> FilterResult {
        let mut report = FilterReport::default();
        let mut dsd_messages = Vec::new();
        let mut content_messages = Vec::new();
        let mut datasets = Vec::with_capacity(message.datasets.len());

        for dataset in &message.datasets {
            let mut summary = DatasetSummary {
                structure: dataset.structure.clone(),
                ..DatasetSummary::default()
            };
            let mut kept = Vec::new();

            for series in &dataset.series {
                summary.total += 1;
                let violations = self.validate_series(series);
                if violations.is_empty() {
                    kept.push(series.clone());
                    summary.kept += 1;
                    continue;
                }

                summary.removed += 1;
                debug!(
                    series = %series.key,
                    violations = violations.len(),
                    "skipping series"
                );
                let mut has_dsd = false;
                let mut has_content = false;
                for violation in violations {
                    match violation.phase() {
                        Phase::Structure => {
                            has_dsd = true;
                            dsd_messages.push(violation.to_string());
                        }
                        Phase::Content => {
                            has_content = true;
                            content_messages.push(violation.to_string());
                        }
                    }
                }
                report.dsd_violation_count += usize::from(has_dsd);
                report.content_violation_count += usize::from(has_content);
            }

            report.kept += summary.kept;
            report.removed += summary.removed;
            report.total += summary.total;
            report.datasets.push(summary);
            datasets.push(Dataset {
                structure: dataset.structure.clone(),
                series: kept,
            });
        }

        report.dsd_messages = dedupe_messages(dsd_messages);
        report.content_messages = dedupe_messages(content_messages);
        info!(
            message_id = %message.header.id,
            structure = %self.structure.structure_id(),
            total = report.total,
            kept = report.kept,
            removed = report.removed,
            dsd_violations = report.dsd_violation_count,
            content_violations = report.content_violation_count,
            "filtered data message"
        );

        FilterResult {
            message: DataMessage {
                header: message.header.clone(),
                datasets,
            },
            report,
        }
    }

    /// Apply the content constraints to flat indicator rows.
    pub fn constrain_rows(&self, table: &RowTable) -> RowConstraintOutcome {
        constrain_rows(table, self.constraints)
    }
}
