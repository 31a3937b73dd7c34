//! Output paths and the JSON filter report.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;

use sdmx_model::{DataMessage, FilterReport};
use sdmx_standards::{JsonCodec, MessageCodec};

/// `<dir>/<stem>.global.<extension>` next to `input`.
pub fn default_output_path(input: &Path, extension: &str) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| "output".to_string());
    input.with_file_name(format!("{stem}.global.{extension}"))
}

/// The file stem of `input`, used as the indicator id when none is given.
pub fn indicator_from_path(input: &Path) -> String {
    input
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Report written by `filter --report`.
#[derive(Debug, Serialize)]
pub struct RunReport<'a> {
    pub generated_at: DateTime<Utc>,
    pub input: &'a Path,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<&'a Path>,
    pub structure: &'a str,
    #[serde(flatten)]
    pub report: &'a FilterReport,
}

impl<'a> RunReport<'a> {
    pub fn new(input: &'a Path, structure: &'a str, report: &'a FilterReport) -> Self {
        Self {
            generated_at: Utc::now(),
            input,
            output: None,
            structure,
            report,
        }
    }

    pub fn with_output(mut self, output: Option<&'a Path>) -> Self {
        self.output = output;
        self
    }
}

pub fn read_message(path: &Path) -> Result<DataMessage> {
    let bytes = fs::read(path).with_context(|| format!("read {}", path.display()))?;
    JsonCodec::default()
        .decode(&bytes)
        .with_context(|| format!("decode {}", path.display()))
}

pub fn write_message(path: &Path, message: &DataMessage) -> Result<()> {
    let bytes = JsonCodec::pretty()
        .encode(message)
        .context("encode filtered message")?;
    fs::write(path, bytes).with_context(|| format!("write {}", path.display()))
}

pub fn write_report(path: &Path, report: &RunReport<'_>) -> Result<()> {
    let json = serde_json::to_string_pretty(report).context("serialize report")?;
    fs::write(path, json).with_context(|| format!("write {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_output_sits_next_to_input() {
        assert_eq!(
            default_output_path(Path::new("/data/ken_2024.json"), "json"),
            PathBuf::from("/data/ken_2024.global.json")
        );
        assert_eq!(
            default_output_path(Path::new("1-1-1.csv"), "csv"),
            PathBuf::from("1-1-1.global.csv")
        );
    }

    #[test]
    fn indicator_defaults_to_stem() {
        assert_eq!(indicator_from_path(Path::new("data/indicator_1-1-1.csv")), "indicator_1-1-1");
    }
}
