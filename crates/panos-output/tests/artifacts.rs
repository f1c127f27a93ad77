//! Artifact files and the consolidated matrix.

use std::fs;

use panos_model::{FieldRow, FieldTable};
use panos_output::{
    MATRIX_FILE_NAME, VersionLayout, build_matrix, read_transformed_tokens, write_field_table,
    write_format_artifact, write_matrix,
};
use tempfile::TempDir;

fn tokens(items: &[&str]) -> Vec<String> {
    items.iter().map(ToString::to_string).collect()
}

fn layout(temp: &TempDir) -> VersionLayout {
    let layout = VersionLayout::new(temp.path(), "11.1+");
    layout.create().unwrap();
    layout
}

#[test]
fn layout_paths() {
    let layout = VersionLayout::new(std::path::Path::new("out"), "10.2");
    assert_eq!(layout.dir(), std::path::Path::new("out/10.2"));
    assert!(layout.fields_path("Traffic_Log").ends_with("Traffic_Log_fields.csv"));
    assert!(layout.format_path("Traffic_Log").ends_with("Traffic_Log_format.csv"));
    assert!(layout.matrix_path().ends_with(MATRIX_FILE_NAME));
}

#[test]
fn field_table_csv() {
    let temp = TempDir::new().unwrap();
    let layout = layout(&temp);
    let mut table = FieldTable::new(tokens(&["Field Name", "Variable Name", "Description"]));
    table
        .push_row(FieldRow::new(tokens(&[
            "Source Address (src)",
            "src",
            "Original source IP, as seen\non the wire",
        ])))
        .unwrap();
    let path = layout.fields_path("Traffic_Log");
    write_field_table(&path, &table).unwrap();

    let written = fs::read_to_string(&path).unwrap();
    insta::assert_snapshot!(written, @r#"
    Field Name,Variable Name,Description
    Source Address (src),src,"Original source IP, as seen
    on the wire"
    "#);
}

#[test]
fn format_artifact_with_and_without_tokens() {
    let temp = TempDir::new().unwrap();
    let layout = layout(&temp);

    let path = layout.format_path("Traffic_Log");
    let list = tokens(&["src", "FUTURE_USE"]);
    write_format_artifact(&path, "Source Address, FUTURE_USE", Some(list.as_slice())).unwrap();
    assert_eq!(
        fs::read_to_string(&path).unwrap(),
        "Source Address, FUTURE_USE\n\"src\",\"FUTURE_USE\"\n"
    );
    assert_eq!(read_transformed_tokens(&path).unwrap(), Some(list));

    let bare = layout.format_path("Threat_Log");
    write_format_artifact(&bare, "a, b", None).unwrap();
    assert_eq!(fs::read_to_string(&bare).unwrap(), "a, b\n");
    assert_eq!(read_transformed_tokens(&bare).unwrap(), None);

    let empty = layout.format_path("Config_Log");
    write_format_artifact(&empty, "a", Some(&[] as &[String])).unwrap();
    assert_eq!(fs::read_to_string(&empty).unwrap(), "a\n");
}

#[test]
fn matrix_pads_and_skips_missing() {
    let temp = TempDir::new().unwrap();
    let layout = layout(&temp);
    let short = tokens(&["a", "b", "c"]);
    let long = tokens(&["v", "w", "x", "y", "z"]);
    write_format_artifact(&layout.format_path("Traffic_Log"), "x", Some(short.as_slice())).unwrap();
    write_format_artifact(
        &layout.format_path("HIP_Match_Log"),
        "x",
        Some(long.as_slice()),
    )
    .unwrap();

    let matrix = build_matrix(&layout, &["Traffic_Log", "Threat_Log", "HIP_Match_Log"])
        .expect("matrix");
    assert_eq!(matrix.columns, vec!["Traffic", "HIP Match"]);
    assert_eq!(matrix.row_count(), 5);
    assert_eq!(matrix.rows[3], vec!["", "y"]);

    write_matrix(&layout.matrix_path(), &matrix).unwrap();
    let written = fs::read_to_string(layout.matrix_path()).unwrap();
    insta::assert_snapshot!(written, @r#"
    Traffic,HIP Match
    a,v
    b,w
    c,x
    ,y
    ,z
    "#);
}

#[test]
fn matrix_skips_artifacts_without_tokens() {
    let temp = TempDir::new().unwrap();
    let layout = layout(&temp);
    write_format_artifact(&layout.format_path("Traffic_Log"), "a, b", None).unwrap();
    fs::write(layout.format_path("Threat_Log"), "a\n   \n").unwrap();
    assert_eq!(build_matrix(&layout, &["Traffic_Log", "Threat_Log"]), None);
    assert!(!layout.matrix_path().exists());
}

#[test]
fn completeness_counts_csv_files() {
    let temp = TempDir::new().unwrap();
    let missing = VersionLayout::new(temp.path(), "9.1");
    assert!(!missing.is_complete(2));

    let layout = layout(&temp);
    assert!(!layout.is_complete(2));
    fs::write(layout.fields_path("Traffic_Log"), "x\n").unwrap();
    fs::write(layout.dir().join("notes.txt"), "x\n").unwrap();
    assert_eq!(layout.csv_file_count(), 1);
    assert!(!layout.is_complete(2));
    fs::write(layout.format_path("Traffic_Log"), "x\n").unwrap();
    assert!(layout.is_complete(2));
}
