use std::io::Write;
use std::path::{Path, PathBuf};

use sdmx_model::{AllowedSpec, ComponentKind, DataMessage, Dataset, Observation, Series, SeriesKey};
use sdmx_standards::{
    JsonCodec, MessageCodec, Standards, StandardsError, StandardsPaths, load_constraint_store,
    load_constraint_table, load_row_table, load_structure, parse_constraint_table,
    parse_row_table, write_row_table,
};

fn bundled_standards() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../standards")
}

fn write_temp(dir: &Path, name: &str, contents: &[u8]) -> PathBuf {
    let path = dir.join(name);
    let mut file = std::fs::File::create(&path).expect("create temp file");
    file.write_all(contents).expect("write temp file");
    path
}

#[test]
fn loads_bundled_standards() {
    let standards =
        Standards::load(&StandardsPaths::from_root(&bundled_standards())).expect("load standards");

    assert_eq!(standards.structure.id, "SDG_DSD");
    assert!(standards.constraints.series("SI_POV_EMP1").is_some());
    assert!(
        standards
            .index
            .is_valid(ComponentKind::Dimension, "REF_AREA", "840")
    );
    assert!(
        !standards
            .index
            .is_valid(ComponentKind::Dimension, "REF_AREA", "USA")
    );
    assert!(
        standards
            .index
            .is_valid(ComponentKind::Attribute, "COMMENT_OBS", "free text")
    );
}

#[test]
fn bundled_constraints_decode_sentinels() {
    let store = load_constraint_store(&bundled_standards().join("content_constraints.csv"))
        .expect("load constraints");

    assert_eq!(
        store.allowed_values("SI_POV_EMP1", "SEX"),
        Some(&AllowedSpec::Any)
    );
    let urbanisation = store
        .allowed_values("SI_POV_EMP1", "URBANISATION")
        .expect("urbanisation constraint");
    assert!(urbanisation.permits_missing());
    assert!(store.allowed_values("SI_POV_EMP1", "UNIT_MULT").unwrap().permits("0.0"));
    // Blank cell: unconstrained.
    assert!(store.allowed_values("SI_POV_EMP1", "NATURE").is_none());
    assert_eq!(
        store.series("SI_POV_EMP1").and_then(|s| s.name.as_deref()),
        Some("Employed population below international poverty line")
    );
}

#[test]
fn constraint_table_strips_bom_and_invalid_bytes() {
    let mut csv = b"\xef\xbb\xbfSERIES,AGE\n".to_vec();
    csv.extend_from_slice(b"X,15-24;25\xff-34\n");
    let table = parse_constraint_table(&csv, Path::new("inline.csv")).expect("parse table");

    assert_eq!(table.columns, ["SERIES", "AGE"]);
    assert_eq!(
        table.rows[0].get("AGE").map(String::as_str),
        Some("15-24;25-34")
    );
}

#[test]
fn encoded_replacement_character_is_kept() {
    let mut csv = "SERIES,Name\nX,Caf\u{fffd} index ".as_bytes().to_vec();
    csv.extend_from_slice(b"\xfe\n");
    let table = parse_constraint_table(&csv, Path::new("inline.csv")).expect("parse table");

    assert_eq!(
        table.rows[0].get("Name").map(String::as_str),
        Some("Caf\u{fffd} index")
    );
}

#[test]
fn short_row_records_fill_missing_columns() {
    let table = parse_row_table(b"SERIES,SEX,AGE\nX,F\n", Path::new("rows.csv"))
        .expect("parse rows");
    assert_eq!(table.rows[0].get("AGE"), Some(&None));
    assert_eq!(table.rows[0].len(), 3);
}

#[test]
fn constraint_table_requires_series_column() {
    let err = parse_constraint_table(b"CODE,AGE\nX,15-24\n", Path::new("bad.csv")).unwrap_err();
    assert!(matches!(err, StandardsError::MissingColumn { .. }));
    assert!(err.to_string().contains("SERIES"));
}

#[test]
fn missing_files_report_their_path() {
    let err = load_constraint_table(Path::new("/nonexistent/constraints.csv")).unwrap_err();
    assert!(matches!(err, StandardsError::Io { .. }));
    assert!(err.to_string().contains("/nonexistent/constraints.csv"));
}

#[test]
fn structure_with_duplicate_dimension_is_rejected() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = write_temp(
        dir.path(),
        "dsd.json",
        br#"{"id": "DSD", "dimensions": [{"id": "SEX"}, {"id": "SEX"}]}"#,
    );
    let err = load_structure(&path).unwrap_err();
    assert!(matches!(err, StandardsError::InvalidStructure { .. }));
}

#[test]
fn structure_json_errors_are_typed() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = write_temp(dir.path(), "dsd.json", b"{ not json");
    assert!(matches!(
        load_structure(&path),
        Err(StandardsError::Json { .. })
    ));
}

#[test]
fn row_tables_keep_blank_cells_as_missing() {
    let table = parse_row_table(b"SERIES,SEX,Value\nX,,1.5\nX,F,2\n", Path::new("rows.csv"))
        .expect("parse rows");
    assert_eq!(table.height(), 2);
    assert_eq!(table.rows[0].get("SEX"), Some(&None));
    assert_eq!(table.rows[1].get("SEX"), Some(&Some("F".to_string())));
}

#[test]
fn row_tables_write_in_header_order() {
    let dir = tempfile::tempdir().expect("temp dir");
    let source = write_temp(dir.path(), "in.csv", b"SERIES,SEX,Value\nX,,1.5\n");
    let table = load_row_table(&source).expect("load rows");

    let target = dir.path().join("out.csv");
    write_row_table(&target, &table).expect("write rows");
    let written = std::fs::read_to_string(&target).expect("read back");
    assert_eq!(written, "SERIES,SEX,Value\nX,,1.5\n");
}

#[test]
fn json_codec_round_trips_messages() {
    let message = DataMessage::new("NATIONAL").with_dataset(
        Dataset::new("SDG_DSD").with_series(
            Series::new(
                SeriesKey::new()
                    .with("SERIES", "SI_POV_EMP1")
                    .with("REF_AREA", "840"),
            )
            .with_observation(Observation::new("2020", "3.1").with_attribute("UNIT_MULT", "0")),
        ),
    );
    let codec = JsonCodec::pretty();
    let bytes = codec.encode(&message).expect("encode");
    assert_eq!(codec.decode(&bytes).expect("decode"), message);
    assert!(matches!(
        JsonCodec::default().decode(b"[]"),
        Err(StandardsError::Decode { .. })
    ));
}

#[test]
fn paths_accept_overrides() {
    let paths = StandardsPaths::from_root(Path::new("/std"))
        .with_structure(Some(PathBuf::from("/custom/dsd.json")))
        .with_constraints(None);
    assert_eq!(paths.structure, PathBuf::from("/custom/dsd.json"));
    assert_eq!(
        paths.constraints,
        PathBuf::from("/std/content_constraints.csv")
    );
}
