//! Field table extraction.

use panos_map::derive_variable_name;
use panos_model::{FIELD_NAME_COLUMN, FieldRow, FieldTable, VARIABLE_NAME_COLUMN};
use tracing::{debug, warn};

use crate::document::DocNode;
use crate::text::cell_text;

const CELL_TAGS: &[&str] = &["th", "td"];

/// True when the table's header cells mention "field" anywhere.
///
/// Documentation tables label the column "Field Name", "Field" or
/// "Fields", so this is a substring match over all `th` text.
pub fn header_mentions_field<N: DocNode>(table: &N) -> bool {
    table
        .find_all(&["th"])
        .iter()
        .map(|cell| cell.stripped_text().to_lowercase())
        .collect::<Vec<_>>()
        .join(" ")
        .contains("field")
}

/// Data rows narrower than the header are layout artifacts.
pub fn row_has_enough_cells(cell_count: usize, column_count: usize) -> bool {
    cell_count >= column_count
}

/// Locate the field description table on a page.
///
/// The first qualifying table that yields at least one data row wins.
/// Returns `None` (with a warning) when the page has none.
pub fn extract_field_table<N: DocNode>(root: &N) -> Option<FieldTable> {
    for (index, table) in root.find_all(&["table"]).into_iter().enumerate() {
        if !header_mentions_field(table) {
            continue;
        }
        match read_table(table) {
            Some(field_table) => {
                debug!(
                    table_index = index,
                    rows = field_table.len(),
                    columns = field_table.columns.len(),
                    "extracted field table"
                );
                return Some(field_table);
            }
            None => debug!(table_index = index, "qualifying table has no data rows"),
        }
    }
    warn!("no field table found on page");
    None
}

fn read_table<N: DocNode>(table: &N) -> Option<FieldTable> {
    let rows = table.find_all(&["tr"]);
    let (header, body) = rows.split_first()?;
    let columns: Vec<String> = header
        .find_all(CELL_TAGS)
        .iter()
        .map(|cell| cell.stripped_text())
        .collect();
    if columns.is_empty() {
        return None;
    }

    let mut field_table = FieldTable::new(columns);
    let width = field_table.columns.len();
    for row in body {
        let cells = row.find_all(CELL_TAGS);
        if !row_has_enough_cells(cells.len(), width) {
            continue;
        }
        let values = cells.iter().take(width).map(|cell| cell_text(*cell)).collect();
        // Width is checked above, so this cannot fail.
        field_table.push_row(FieldRow::new(values)).ok()?;
    }
    if field_table.is_empty() {
        return None;
    }

    let variable_names: Option<Vec<String>> = field_table
        .column_values(FIELD_NAME_COLUMN)
        .map(|field_names| field_names.into_iter().map(derive_variable_name).collect());
    if let Some(variable_names) = variable_names {
        field_table
            .insert_column_after(FIELD_NAME_COLUMN, VARIABLE_NAME_COLUMN, variable_names)
            .ok()?;
    }
    Some(field_table)
}
