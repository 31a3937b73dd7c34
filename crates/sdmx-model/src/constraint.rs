//! SDG global content constraints.
//!
//! The constraint table has one row per series code and one column per
//! concept. Each cell is one of:
//!
//! - `ALL`: any value is permitted
//! - a single code (e.g., `_T`)
//! - a semicolon-joined code list (e.g., `15-24;25-34`)
//!
//! Two codes carry extra meaning inside a list:
//!
//! - `0` also accepts any value that is numerically zero (`0.0`)
//! - `_T` also accepts a missing value
//!
//! Cells are decoded into [`AllowedSpec`] once, when the [`ConstraintStore`]
//! is built.

use std::collections::{BTreeMap, BTreeSet};

use crate::data::SERIES_CONCEPT;

/// Cell value meaning "no restriction".
pub const ANY_VALUE: &str = "ALL";
/// Code that makes a missing value acceptable.
pub const TOTAL_CODE: &str = "_T";
/// Code that makes any numeric zero acceptable.
pub const ZERO_CODE: &str = "0";
/// Descriptive column carried by the published table; never a concept.
pub const NAME_COLUMN: &str = "Name";

/// Decoded constraint cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AllowedSpec {
    Any,
    Values(AllowedValues),
}

impl AllowedSpec {
    /// Decode a raw cell. Blank cells carry no constraint and yield `None`.
    pub fn parse(cell: &str) -> Option<Self> {
        let trimmed = cell.trim();
        if trimmed.is_empty() {
            return None;
        }
        if trimmed == ANY_VALUE {
            return Some(AllowedSpec::Any);
        }
        let values = AllowedValues::new(
            trimmed
                .split(';')
                .map(str::trim)
                .filter(|code| !code.is_empty()),
        );
        if values.codes.is_empty() {
            return None;
        }
        Some(AllowedSpec::Values(values))
    }

    pub fn permits(&self, value: &str) -> bool {
        match self {
            AllowedSpec::Any => true,
            AllowedSpec::Values(values) => values.permits(value),
        }
    }

    pub fn permits_missing(&self) -> bool {
        match self {
            AllowedSpec::Any => true,
            AllowedSpec::Values(values) => values.allows_missing(),
        }
    }
}

/// A finite set of allowed codes plus the `0` / `_T` modifiers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AllowedValues {
    /// Codes in table order, used when rendering messages.
    codes: Vec<String>,
    set: BTreeSet<String>,
    allow_missing: bool,
    allow_zero: bool,
}

impl AllowedValues {
    pub fn new<I, S>(codes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut ordered = Vec::new();
        let mut set = BTreeSet::new();
        for code in codes {
            let code = code.into();
            if set.insert(code.clone()) {
                ordered.push(code);
            }
        }
        Self {
            allow_missing: set.contains(TOTAL_CODE),
            allow_zero: set.contains(ZERO_CODE),
            codes: ordered,
            set,
        }
    }

    pub fn permits(&self, value: &str) -> bool {
        self.set.contains(value) || (self.allow_zero && is_numeric_zero(value))
    }

    pub fn allows_missing(&self) -> bool {
        self.allow_missing
    }

    pub fn allows_zero(&self) -> bool {
        self.allow_zero
    }

    pub fn codes(&self) -> &[String] {
        &self.codes
    }

    /// Codes joined for messages: `15-24, 25-34`.
    pub fn display(&self) -> String {
        self.codes.join(", ")
    }
}

fn is_numeric_zero(value: &str) -> bool {
    value.trim().parse::<f64>().is_ok_and(|n| n == 0.0)
}

/// Raw constraint table as read from disk: header columns plus one map per row.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConstraintTable {
    pub columns: Vec<String>,
    pub rows: Vec<BTreeMap<String, String>>,
}

impl ConstraintTable {
    pub fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    /// Append a row, registering any column not seen before.
    pub fn with_row<I, K, V>(mut self, cells: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut row = BTreeMap::new();
        for (column, value) in cells {
            let column = column.into();
            if !self.columns.contains(&column) {
                self.columns.push(column.clone());
            }
            row.insert(column, value.into());
        }
        self.rows.push(row);
        self
    }
}

/// Decoded constraints for one series code, concepts in table column order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeriesConstraints {
    pub series: String,
    pub name: Option<String>,
    concepts: Vec<(String, AllowedSpec)>,
}

impl SeriesConstraints {
    pub fn new(series: impl Into<String>) -> Self {
        Self {
            series: series.into(),
            name: None,
            concepts: Vec::new(),
        }
    }

    /// Add or replace the constraint for a concept.
    pub fn set(&mut self, concept: impl Into<String>, spec: AllowedSpec) {
        let concept = concept.into();
        match self.concepts.iter_mut().find(|(id, _)| *id == concept) {
            Some(slot) => slot.1 = spec,
            None => self.concepts.push((concept, spec)),
        }
    }

    pub fn get(&self, concept: &str) -> Option<&AllowedSpec> {
        self.concepts
            .iter()
            .find(|(id, _)| id == concept)
            .map(|(_, spec)| spec)
    }

    pub fn concepts(&self) -> impl Iterator<Item = (&str, &AllowedSpec)> {
        self.concepts.iter().map(|(id, spec)| (id.as_str(), spec))
    }

    pub fn len(&self) -> usize {
        self.concepts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.concepts.is_empty()
    }
}

/// Series code -> decoded constraints. Read-only once built.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConstraintStore {
    by_series: BTreeMap<String, SeriesConstraints>,
    duplicates: Vec<String>,
}

impl ConstraintStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode every row of the table. Rows without a series code are ignored;
    /// when a series code repeats, the first row wins and the code is recorded
    /// in [`ConstraintStore::duplicate_series`].
    pub fn from_table(table: &ConstraintTable) -> Self {
        let concept_columns: Vec<&String> = table
            .columns
            .iter()
            .filter(|c| c.as_str() != SERIES_CONCEPT && c.as_str() != NAME_COLUMN)
            .collect();

        let mut store = Self::new();
        for row in &table.rows {
            let Some(series) = row
                .get(SERIES_CONCEPT)
                .map(|s| s.trim())
                .filter(|s| !s.is_empty())
            else {
                continue;
            };
            let mut constraints = SeriesConstraints::new(series);
            constraints.name = row
                .get(NAME_COLUMN)
                .map(|s| s.trim())
                .filter(|s| !s.is_empty())
                .map(String::from);
            for column in &concept_columns {
                if let Some(spec) = row.get(*column).and_then(|cell| AllowedSpec::parse(cell)) {
                    constraints.set(column.as_str(), spec);
                }
            }
            store.insert(constraints);
        }
        store
    }

    /// Insert constraints for a series code. Returns false (and keeps the
    /// existing entry) if the code is already present.
    pub fn insert(&mut self, constraints: SeriesConstraints) -> bool {
        if self.by_series.contains_key(&constraints.series) {
            self.duplicates.push(constraints.series);
            return false;
        }
        self.by_series
            .insert(constraints.series.clone(), constraints);
        true
    }

    pub fn series(&self, series_code: &str) -> Option<&SeriesConstraints> {
        self.by_series.get(series_code)
    }

    /// `None` means the pairing is unconstrained.
    pub fn allowed_values(&self, series_code: &str, concept_id: &str) -> Option<&AllowedSpec> {
        self.series(series_code)?.get(concept_id)
    }

    pub fn series_codes(&self) -> impl Iterator<Item = &str> {
        self.by_series.keys().map(String::as_str)
    }

    /// Series codes that appeared on more than one row, in table order.
    pub fn duplicate_series(&self) -> &[String] {
        &self.duplicates
    }

    pub fn len(&self) -> usize {
        self.by_series.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_series.is_empty()
    }
}
