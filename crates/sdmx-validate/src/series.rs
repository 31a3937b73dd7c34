//! Per-series compatibility checks.
//!
//! Two phases run for every series:
//!
//! ## Structure phase
//!
//! Every concept of the key that the global DSD enumerates must use a code
//! from its codelist. Concepts the key does not carry are not checked.
//!
//! ## Content phase
//!
//! When the content constraint table has a row for the series code, every
//! constrained concept must take an allowed value:
//!
//! - concepts in the key are compared directly
//! - other concepts are read from the first observation's attributes
//! - a concept found in neither place is missing, which only `_T` tolerates
//!
//! An empty result means the series is globally compatible.

use std::fmt;

use sdmx_model::{
    AllowedSpec, AttributeValue, ComponentKind, ConstraintStore, Observation, SeriesKey,
    StructureIndex,
};

/// Which check produced a violation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Phase {
    /// Global DSD codelists.
    Structure,
    /// Per-series content constraints.
    Content,
}

/// A reason a series is not globally compatible.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Violation {
    NotInCodelist {
        kind: ComponentKind,
        concept: String,
        code: String,
    },
    DisallowedDimension {
        series: String,
        concept: String,
        value: String,
        allowed: String,
    },
    DisallowedAttribute {
        series: String,
        concept: String,
        value: String,
        allowed: String,
    },
    MissingConcept {
        series: String,
        concept: String,
        allowed: String,
    },
}

impl Violation {
    pub fn phase(&self) -> Phase {
        match self {
            Violation::NotInCodelist { .. } => Phase::Structure,
            Violation::DisallowedDimension { .. }
            | Violation::DisallowedAttribute { .. }
            | Violation::MissingConcept { .. } => Phase::Content,
        }
    }

    pub fn concept(&self) -> &str {
        match self {
            Violation::NotInCodelist { concept, .. }
            | Violation::DisallowedDimension { concept, .. }
            | Violation::DisallowedAttribute { concept, .. }
            | Violation::MissingConcept { concept, .. } => concept,
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Violation::NotInCodelist { concept, code, .. } => {
                write!(f, "In \"{concept}\", \"{code}\" is not in the global codelist.")
            }
            Violation::DisallowedDimension {
                series,
                concept,
                value,
                allowed,
            } => write!(
                f,
                "Series \"{series}\": dimension \"{concept}\" has disallowed value \"{value}\". \
                 Allowed values are: {allowed}."
            ),
            Violation::DisallowedAttribute {
                series,
                concept,
                value,
                allowed,
            } => write!(
                f,
                "Series \"{series}\": attribute \"{concept}\" has disallowed value \"{value}\". \
                 Allowed values are: {allowed}."
            ),
            Violation::MissingConcept {
                series,
                concept,
                allowed,
            } => write!(
                f,
                "Series \"{series}\": \"{concept}\" is missing. Allowed values are: {allowed}."
            ),
        }
    }
}

/// Check one series against the global DSD and content constraints.
///
/// Structure violations come first, then content violations in constraint
/// table column order. Both phases always run.
pub fn validate_series(
    key: &SeriesKey,
    observations: &[Observation],
    structure: &StructureIndex,
    constraints: &ConstraintStore,
) -> Vec<Violation> {
    let mut violations = check_structure(key, structure);
    violations.extend(check_content(key, observations, constraints));
    violations
}

/// Codelist membership for every enumerated concept carried by the key.
pub fn check_structure(key: &SeriesKey, structure: &StructureIndex) -> Vec<Violation> {
    structure
        .concepts()
        .filter_map(|concept| {
            let code = key.get(&concept.id)?;
            if concept.is_valid(code) {
                return None;
            }
            Some(Violation::NotInCodelist {
                kind: concept.kind,
                concept: concept.id.clone(),
                code: code.to_string(),
            })
        })
        .collect()
}

/// Content constraints for the series code carried by the key.
pub fn check_content(
    key: &SeriesKey,
    observations: &[Observation],
    constraints: &ConstraintStore,
) -> Vec<Violation> {
    let Some(series) = key.series_code() else {
        return Vec::new();
    };
    let Some(row) = constraints.series(series) else {
        return Vec::new();
    };
    let first = observations.first();

    let mut violations = Vec::new();
    for (concept, spec) in row.concepts() {
        let AllowedSpec::Values(allowed) = spec else {
            continue;
        };

        if let Some(value) = key.get(concept) {
            if !allowed.permits(value) {
                violations.push(Violation::DisallowedDimension {
                    series: series.to_string(),
                    concept: concept.to_string(),
                    value: value.to_string(),
                    allowed: allowed.display(),
                });
            }
            continue;
        }

        let attribute = first.map_or(AttributeValue::Absent, |obs| obs.attribute(concept));
        let offending = match attribute {
            AttributeValue::Absent => {
                if !allowed.allows_missing() {
                    violations.push(Violation::MissingConcept {
                        series: series.to_string(),
                        concept: concept.to_string(),
                        allowed: allowed.display(),
                    });
                }
                continue;
            }
            AttributeValue::Missing if allowed.allows_missing() => continue,
            AttributeValue::Missing => "",
            AttributeValue::Present(value) if allowed.permits(value) => continue,
            AttributeValue::Present(value) => value,
        };
        violations.push(Violation::DisallowedAttribute {
            series: series.to_string(),
            concept: concept.to_string(),
            value: offending.to_string(),
            allowed: allowed.display(),
        });
    }
    violations
}
