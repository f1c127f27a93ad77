//! Field description tables extracted from documentation pages.

use serde::{Deserialize, Serialize};

use crate::{ModelError, Result};

/// Column holding the long, human-readable field name.
pub const FIELD_NAME_COLUMN: &str = "Field Name";

/// Column inserted after [`FIELD_NAME_COLUMN`] holding the derived short name.
pub const VARIABLE_NAME_COLUMN: &str = "Variable Name";

/// One table row, cells aligned with the owning table's columns.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldRow {
    pub cells: Vec<String>,
}

impl FieldRow {
    pub fn new(cells: Vec<String>) -> Self {
        Self { cells }
    }

    pub fn cell(&self, index: usize) -> Option<&str> {
        self.cells.get(index).map(String::as_str)
    }
}

/// The documented fields of one log type for one documentation version.
///
/// Column names come from the page's header row, so the column set differs
/// between versions. Duplicate column names are kept; lookups by name
/// resolve to the first occurrence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldTable {
    pub columns: Vec<String>,
    pub rows: Vec<FieldRow>,
}

impl FieldTable {
    pub fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    /// Append a row; its width must match the column count.
    pub fn push_row(&mut self, row: FieldRow) -> Result<()> {
        if row.cells.len() != self.columns.len() {
            return Err(ModelError::RowWidth {
                expected: self.columns.len(),
                found: row.cells.len(),
            });
        }
        self.rows.push(row);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|column| column == name)
    }

    /// Cell text for `row` in `column`; `None` when either is missing.
    pub fn value(&self, row: usize, column: &str) -> Option<&str> {
        let index = self.column_index(column)?;
        self.rows.get(row)?.cell(index)
    }

    /// All values of one column in row order.
    pub fn column_values(&self, column: &str) -> Option<Vec<&str>> {
        let index = self.column_index(column)?;
        Some(
            self.rows
                .iter()
                .map(|row| row.cell(index).unwrap_or(""))
                .collect(),
        )
    }

    /// Overwrite every value of an existing column.
    pub fn set_column(&mut self, column: &str, values: Vec<String>) -> Result<()> {
        let index = self
            .column_index(column)
            .ok_or_else(|| ModelError::UnknownColumn(column.to_string()))?;
        self.check_length(column, values.len())?;
        for (row, value) in self.rows.iter_mut().zip(values) {
            row.cells[index] = value;
        }
        Ok(())
    }

    /// Insert a new column immediately after `anchor`.
    pub fn insert_column_after(
        &mut self,
        anchor: &str,
        column: &str,
        values: Vec<String>,
    ) -> Result<()> {
        let index = self
            .column_index(anchor)
            .ok_or_else(|| ModelError::UnknownColumn(anchor.to_string()))?
            + 1;
        self.check_length(column, values.len())?;
        self.columns.insert(index, column.to_string());
        for (row, value) in self.rows.iter_mut().zip(values) {
            row.cells.insert(index, value);
        }
        Ok(())
    }

    fn check_length(&self, column: &str, found: usize) -> Result<()> {
        if found != self.rows.len() {
            return Err(ModelError::ColumnLength {
                column: column.to_string(),
                expected: self.rows.len(),
                found,
            });
        }
        Ok(())
    }
}
