//! Global data structure definition (DSD) model.
//!
//! A structure declares the dimensions and attributes a dataset may use. Each
//! component optionally carries an enumerated codelist; a component without
//! one accepts any value.
//!
//! ## Example: `REF_AREA`
//!
//! ```text
//! Dimension REF_AREA, codelist CL_AREA: USA, CAN, FRA, ...
//! Attribute COMMENT_OBS, no enumeration (free text)
//! ```
//!
//! [`StructureIndex`] is the read-only lookup built once from a structure and
//! shared by every validation run.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SdmxError};

/// Whether a concept is a dimension or an attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ComponentKind {
    Dimension,
    Attribute,
}

impl ComponentKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ComponentKind::Dimension => "dimension",
            ComponentKind::Attribute => "attribute",
        }
    }
}

impl fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An enumerated codelist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Codelist {
    /// Codelist identifier (e.g., "CL_AREA").
    pub id: String,
    /// Valid codes. Comparison is exact; SDMX codes are case-sensitive.
    pub codes: BTreeSet<String>,
}

impl Codelist {
    pub fn new<I, S>(id: impl Into<String>, codes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            id: id.into(),
            codes: codes.into_iter().map(Into::into).collect(),
        }
    }

    pub fn contains(&self, code: &str) -> bool {
        self.codes.contains(code)
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }
}

/// A dimension or attribute definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Component {
    pub id: String,
    /// Enumerated representation. `None` means any value is accepted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub codelist: Option<Codelist>,
}

impl Component {
    /// A component with no enumerated representation.
    pub fn free(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            codelist: None,
        }
    }

    pub fn coded(id: impl Into<String>, codelist: Codelist) -> Self {
        Self {
            id: id.into(),
            codelist: Some(codelist),
        }
    }
}

/// The global data structure definition.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructureDefinition {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Dimensions in key order.
    pub dimensions: Vec<Component>,
    #[serde(default)]
    pub attributes: Vec<Component>,
}

impl StructureDefinition {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    pub fn with_dimension(mut self, component: Component) -> Self {
        self.dimensions.push(component);
        self
    }

    pub fn with_attribute(mut self, component: Component) -> Self {
        self.attributes.push(component);
        self
    }

    /// All components, dimensions first, in declaration order.
    pub fn components(&self) -> impl Iterator<Item = (ComponentKind, &Component)> {
        self.dimensions
            .iter()
            .map(|c| (ComponentKind::Dimension, c))
            .chain(self.attributes.iter().map(|c| (ComponentKind::Attribute, c)))
    }

    /// Reject structures that declare the same id twice within a kind.
    pub fn validate(&self) -> Result<()> {
        let mut seen = BTreeSet::new();
        for (kind, component) in self.components() {
            if !seen.insert((kind, component.id.as_str())) {
                return Err(SdmxError::DuplicateComponent {
                    structure: self.id.clone(),
                    kind,
                    id: component.id.clone(),
                });
            }
        }
        Ok(())
    }
}

/// A concept as seen by the index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexedConcept {
    pub kind: ComponentKind,
    pub id: String,
    codes: Option<BTreeSet<String>>,
}

impl IndexedConcept {
    /// Number of codes in the codelist, if enumerated.
    pub fn code_count(&self) -> Option<usize> {
        self.codes.as_ref().map(BTreeSet::len)
    }

    pub fn is_valid(&self, code: &str) -> bool {
        match &self.codes {
            Some(codes) => codes.contains(code),
            None => true,
        }
    }
}

/// Read-only codelist lookup over a [`StructureDefinition`].
#[derive(Debug, Clone, Default)]
pub struct StructureIndex {
    structure_id: String,
    concepts: Vec<IndexedConcept>,
    dimensions: BTreeMap<String, usize>,
    attributes: BTreeMap<String, usize>,
}

impl StructureIndex {
    /// Build the index. When an id is declared twice within a kind, the first
    /// declaration wins; call [`StructureDefinition::validate`] to reject such
    /// structures instead.
    pub fn new(structure: &StructureDefinition) -> Self {
        let mut index = Self {
            structure_id: structure.id.clone(),
            ..Self::default()
        };
        for (kind, component) in structure.components() {
            let lookup = match kind {
                ComponentKind::Dimension => &mut index.dimensions,
                ComponentKind::Attribute => &mut index.attributes,
            };
            if lookup.contains_key(&component.id) {
                continue;
            }
            lookup.insert(component.id.clone(), index.concepts.len());
            index.concepts.push(IndexedConcept {
                kind,
                id: component.id.clone(),
                codes: component.codelist.as_ref().map(|cl| cl.codes.clone()),
            });
        }
        index
    }

    pub fn structure_id(&self) -> &str {
        &self.structure_id
    }

    /// Declared concepts, dimensions first, in structure order.
    pub fn concepts(&self) -> impl Iterator<Item = &IndexedConcept> {
        self.concepts.iter()
    }

    pub fn get(&self, kind: ComponentKind, concept_id: &str) -> Option<&IndexedConcept> {
        let lookup = match kind {
            ComponentKind::Dimension => &self.dimensions,
            ComponentKind::Attribute => &self.attributes,
        };
        lookup.get(concept_id).map(|&idx| &self.concepts[idx])
    }

    /// True when `code` is allowed for the concept. Concepts without an
    /// enumerated codelist, or not declared at all, accept every code.
    pub fn is_valid(&self, kind: ComponentKind, concept_id: &str, code: &str) -> bool {
        self.get(kind, concept_id)
            .is_none_or(|concept| concept.is_valid(code))
    }

    pub fn len(&self) -> usize {
        self.concepts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.concepts.is_empty()
    }
}
