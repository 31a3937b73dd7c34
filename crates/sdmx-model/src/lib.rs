pub mod constraint;
pub mod data;
pub mod error;
pub mod report;
pub mod structure;
pub mod table;

pub use constraint::{
    ANY_VALUE, AllowedSpec, AllowedValues, ConstraintStore, ConstraintTable, NAME_COLUMN,
    SeriesConstraints, TOTAL_CODE, ZERO_CODE,
};
pub use data::{
    AttributeValue, DataMessage, Dataset, MessageHeader, Observation, SERIES_CONCEPT, Series,
    SeriesKey, is_missing_value,
};
pub use error::{Result, SdmxError};
pub use report::{DatasetSummary, FilterReport};
pub use structure::{
    Codelist, Component, ComponentKind, IndexedConcept, StructureDefinition, StructureIndex,
};
pub use table::{Row, RowTable};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_merges_messages() {
        let report = FilterReport {
            kept: 1,
            removed: 2,
            total: 3,
            dsd_violation_count: 1,
            content_violation_count: 2,
            dsd_messages: vec!["b".to_string(), "c".to_string()],
            content_messages: vec!["a".to_string(), "c".to_string()],
            datasets: vec![],
        };
        assert_eq!(report.messages(), ["a", "b", "c"]);
        assert!(!report.is_compliant());
        assert!(!report.is_empty_output());
    }

    #[test]
    fn report_serializes() {
        let report = FilterReport {
            kept: 5,
            total: 5,
            ..FilterReport::default()
        };
        let json = serde_json::to_string(&report).expect("serialize report");
        let round: FilterReport = serde_json::from_str(&json).expect("deserialize report");
        assert_eq!(round, report);
    }
}
