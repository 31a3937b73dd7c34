//! Parsed SDMX data messages.
//!
//! These types are the hand-off form produced by an exchange-format codec:
//! a message holds datasets, a dataset holds series, and a series is a key
//! plus its observations.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SdmxError};

/// Concept that carries the SDG series code in every series key.
pub const SERIES_CONCEPT: &str = "SERIES";

/// Returns true if the value should be treated as missing (blank or NA).
pub fn is_missing_value(value: &str) -> bool {
    value.trim().is_empty()
}

/// Concept id -> coded value for one series.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SeriesKey {
    values: BTreeMap<String, String>,
}

impl SeriesKey {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, concept: impl Into<String>, code: impl Into<String>) -> Self {
        self.insert(concept, code);
        self
    }

    pub fn insert(&mut self, concept: impl Into<String>, code: impl Into<String>) {
        self.values.insert(concept.into(), code.into());
    }

    pub fn get(&self, concept: &str) -> Option<&str> {
        self.values.get(concept).map(String::as_str)
    }

    pub fn contains(&self, concept: &str) -> bool {
        self.values.contains_key(concept)
    }

    /// The SDG series code, if the key carries one.
    pub fn series_code(&self) -> Option<&str> {
        self.get(SERIES_CONCEPT)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for SeriesKey
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl fmt::Display for SeriesKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, (concept, code)) in self.values.iter().enumerate() {
            if idx > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{concept}={code}")?;
        }
        Ok(())
    }
}

/// How a concept appears on an observation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttributeValue<'a> {
    /// The attribute is not attached to the observation.
    Absent,
    /// Attached but NA (no value, or a blank value).
    Missing,
    Present(&'a str),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_period: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    /// Attribute id -> value; `None` records an attribute that is NA.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub attributes: BTreeMap<String, Option<String>>,
}

impl Observation {
    pub fn new(time_period: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            time_period: Some(time_period.into()),
            value: Some(value.into()),
            attributes: BTreeMap::new(),
        }
    }

    pub fn with_attribute(mut self, id: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(id.into(), Some(value.into()));
        self
    }

    /// Attach an attribute with no value.
    pub fn with_missing_attribute(mut self, id: impl Into<String>) -> Self {
        self.attributes.insert(id.into(), None);
        self
    }

    pub fn attribute(&self, id: &str) -> AttributeValue<'_> {
        match self.attributes.get(id) {
            None => AttributeValue::Absent,
            Some(None) => AttributeValue::Missing,
            Some(Some(value)) if is_missing_value(value) => AttributeValue::Missing,
            Some(Some(value)) => AttributeValue::Present(value),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Series {
    pub key: SeriesKey,
    #[serde(default)]
    pub observations: Vec<Observation>,
}

impl Series {
    pub fn new(key: SeriesKey) -> Self {
        Self {
            key,
            observations: Vec::new(),
        }
    }

    pub fn with_observation(mut self, observation: Observation) -> Self {
        self.observations.push(observation);
        self
    }

    pub fn first_observation(&self) -> Option<&Observation> {
        self.observations.first()
    }
}

/// One dataset; every series conforms to the structure named by `structure`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    pub structure: String,
    #[serde(default)]
    pub series: Vec<Series>,
}

impl Dataset {
    pub fn new(structure: impl Into<String>) -> Self {
        Self {
            structure: structure.into(),
            series: Vec::new(),
        }
    }

    pub fn with_series(mut self, series: Series) -> Self {
        self.series.push(series);
        self
    }

    pub fn len(&self) -> usize {
        self.series.len()
    }

    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }

    /// Series keys must be unique within a dataset.
    pub fn validate(&self) -> Result<()> {
        let mut seen = BTreeSet::new();
        for series in &self.series {
            if !seen.insert(&series.key) {
                return Err(SdmxError::DuplicateSeriesKey {
                    structure: self.structure.clone(),
                    key: series.key.to_string(),
                });
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageHeader {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sender: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prepared: Option<String>,
}

/// A data message: one or more datasets sharing one structure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DataMessage {
    pub header: MessageHeader,
    #[serde(default)]
    pub datasets: Vec<Dataset>,
}

impl DataMessage {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            header: MessageHeader {
                id: id.into(),
                ..MessageHeader::default()
            },
            datasets: Vec::new(),
        }
    }

    pub fn with_dataset(mut self, dataset: Dataset) -> Self {
        self.datasets.push(dataset);
        self
    }

    pub fn series_count(&self) -> usize {
        self.datasets.iter().map(Dataset::len).sum()
    }

    pub fn validate(&self) -> Result<()> {
        self.datasets.iter().try_for_each(Dataset::validate)
    }
}
