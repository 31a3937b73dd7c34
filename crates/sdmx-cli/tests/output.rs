//! Integration tests for reading, filtering, and writing messages.

use std::path::PathBuf;

use sdmx_cli::output::{
    RunReport, default_output_path, read_message, write_message, write_report,
};
use sdmx_model::{DataMessage, Dataset, Observation, Series, SeriesKey};
use sdmx_standards::{Standards, StandardsPaths};
use sdmx_validate::filter_dataset;

fn bundled() -> Standards {
    let root = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../standards");
    Standards::load(&StandardsPaths::from_root(&root)).expect("load bundled standards")
}

fn submission() -> DataMessage {
    let series = |area: &str| {
        Series::new(
            SeriesKey::new()
                .with("SERIES", "SH_STA_MORT")
                .with("REF_AREA", area)
                .with("SEX", "F")
                .with("AGE", "_T"),
        )
        .with_observation(Observation::new("2021", "19").with_attribute("UNIT_MULT", "0"))
    };
    DataMessage::new("NSO_SUBMISSION")
        .with_dataset(Dataset::new("SDG_DSD").with_series(series("840")).with_series(series("XX")))
}

#[test]
fn filtered_message_round_trips_through_disk() {
    let dir = tempfile::tempdir().expect("temp dir");
    let input = dir.path().join("submission.json");
    write_message(&input, &submission()).expect("write input");

    let message = read_message(&input).expect("read input");
    let standards = bundled();
    let result = filter_dataset(&message, &standards.constraints, &standards.index);
    assert_eq!((result.report.kept, result.report.removed), (1, 1));

    let output = default_output_path(&input, "json");
    assert_eq!(output, dir.path().join("submission.global.json"));
    write_message(&output, &result.message).expect("write output");

    let written = read_message(&output).expect("read output");
    assert_eq!(written, result.message);
    assert_eq!(written.header.id, "NSO_SUBMISSION");
    assert_eq!(written.series_count(), 1);
}

#[test]
fn report_carries_counts_and_timestamp() {
    let dir = tempfile::tempdir().expect("temp dir");
    let input = dir.path().join("submission.json");
    let output = dir.path().join("submission.global.json");
    let standards = bundled();
    let result = filter_dataset(&submission(), &standards.constraints, &standards.index);

    let path = dir.path().join("report.json");
    let report = RunReport::new(&input, &standards.structure.id, &result.report)
        .with_output(Some(output.as_path()));
    write_report(&path, &report).expect("write report");

    let json: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).expect("read report"))
            .expect("parse report");
    assert!(json["generated_at"].as_str().is_some_and(|ts| ts.contains('T')));
    assert_eq!(json["structure"], "SDG_DSD");
    assert_eq!(json["kept"], 1);
    assert_eq!(json["removed"], 1);
    assert_eq!(json["total"], 2);
    assert_eq!(json["dsd_violation_count"], 1);
    assert_eq!(
        json["dsd_messages"][0],
        r#"In "REF_AREA", "XX" is not in the global codelist."#
    );
    assert_eq!(json["datasets"][0]["structure"], "SDG_DSD");
}

#[test]
fn dry_run_report_omits_output() {
    let standards = bundled();
    let result = filter_dataset(&submission(), &standards.constraints, &standards.index);
    let input = PathBuf::from("submission.json");
    let report = RunReport::new(&input, "SDG_DSD", &result.report);

    let json = serde_json::to_value(&report).expect("serialize report");
    assert!(json.get("output").is_none());
}

#[test]
fn unreadable_message_reports_path() {
    let dir = tempfile::tempdir().expect("temp dir");
    let input = dir.path().join("broken.json");
    std::fs::write(&input, "{ nope").expect("write input");

    let error = read_message(&input).unwrap_err();
    assert!(format!("{error:#}").contains("broken.json"));
}
