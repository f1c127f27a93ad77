//! Tests for name-map construction.

use panos_map::build_name_map;
use panos_model::{
    CorrectionRules, FIELD_NAME_COLUMN, FieldRow, FieldTable, VARIABLE_NAME_COLUMN,
};

fn table(rows: &[(&str, &str)]) -> FieldTable {
    let mut table = FieldTable::new(vec![
        FIELD_NAME_COLUMN.to_string(),
        VARIABLE_NAME_COLUMN.to_string(),
    ]);
    for (field, variable) in rows {
        table
            .push_row(FieldRow::new(vec![field.to_string(), variable.to_string()]))
            .unwrap();
    }
    table
}

fn rules() -> CorrectionRules {
    let mut rules = CorrectionRules::default();
    rules
        .global_name_overrides
        .insert("Serial Number".to_string(), "serial".to_string());
    rules
        .global_name_overrides
        .insert("Generated Time".to_string(), "time_generated".to_string());
    rules
}

#[test]
fn simple_name_registers_exact_and_lowercase_only() {
    let map = build_name_map(
        &table(&[("Source Address (src)", "src")]),
        &CorrectionRules::default(),
    );
    assert_eq!(map.get("Source Address"), Some("src"));
    assert_eq!(map.get("source address"), Some("src"));
    assert_eq!(map.len(), 2);
}

#[test]
fn irregular_spacing_registers_normalized_form() {
    let map = build_name_map(
        &table(&[("Source   Address (src)", "src")]),
        &CorrectionRules::default(),
    );
    assert_eq!(map.get("Source   Address"), Some("src"));
    assert_eq!(map.get("Source Address"), Some("src"));
    assert_eq!(map.get("source address"), Some("src"));
    assert_eq!(map.len(), 3);
}

#[test]
fn global_overrides_win() {
    let map = build_name_map(&table(&[("Generated Time (wrong_var)", "wrong_var")]), &rules());
    assert_eq!(map.get("Generated Time"), Some("time_generated"));
    // The lowercase variant is derived only; overrides are keyed exactly.
    assert_eq!(map.get("generated time"), Some("wrong_var"));
}

#[test]
fn empty_variable_name_is_skipped() {
    let map = build_name_map(
        &table(&[("No Parenthetical Field", "")]),
        &CorrectionRules::default(),
    );
    assert!(!map.contains_key("No Parenthetical Field"));
    assert!(map.is_empty());
}

#[test]
fn overrides_present_without_field_name_column() {
    let mut bare = FieldTable::new(vec!["Description".to_string()]);
    bare.push_row(FieldRow::new(vec!["text".to_string()]))
        .unwrap();
    let map = build_name_map(&bare, &rules());
    assert_eq!(map.get("Serial Number"), Some("serial"));
    assert_eq!(map.len(), 2);
}
