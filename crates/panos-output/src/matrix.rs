//! Consolidated position-by-log-type field matrix.

use std::path::Path;

use csv::{Terminator, WriterBuilder};
use tracing::{error, info, warn};

use crate::artifacts::read_transformed_tokens;
use crate::error::{OutputError, Result};
use crate::layout::VersionLayout;

/// Column headers are log-type display names; row `i` holds every log
/// type's token at position `i`, padded with empty cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Matrix {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Matrix {
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }
}

/// `Traffic_Log` becomes `Traffic`, `GlobalProtect_Log` becomes
/// `GlobalProtect`, `HIP_Match_Log` becomes `HIP Match`.
pub fn display_name(log_type: &str) -> String {
    log_type
        .strip_suffix("_Log")
        .unwrap_or(log_type)
        .replace('_', " ")
}

/// Assemble the matrix from the version's format artifacts.
///
/// Log types without a usable transformed line are left out with a warning.
/// Returns `None` when no log type qualifies.
pub fn build_matrix<S: AsRef<str>>(layout: &VersionLayout, log_types: &[S]) -> Option<Matrix> {
    let mut columns: Vec<(String, Vec<String>)> = Vec::new();
    for log_type in log_types {
        let log_type = log_type.as_ref();
        let path = layout.format_path(log_type);
        if !path.is_file() {
            warn!(log_type, "matrix: no format file, skipping column");
            continue;
        }
        let tokens = match read_transformed_tokens(&path) {
            Ok(Some(tokens)) => tokens,
            Ok(None) => {
                warn!(log_type, "matrix: format file has no transformed line, skipping column");
                continue;
            }
            Err(err) => {
                error!(log_type, error = %err, "matrix: cannot read transformed line");
                continue;
            }
        };
        let name = display_name(log_type);
        if let Some(existing) = columns.iter_mut().find(|(existing, _)| *existing == name) {
            warn!(
                log_type,
                display_name = %name,
                "matrix: duplicate display name, later tokens win"
            );
            existing.1 = tokens;
        } else {
            columns.push((name, tokens));
        }
    }

    if columns.is_empty() {
        warn!(version = %layout.version(), "matrix: no valid format files found, skipping");
        return None;
    }

    let height = columns.iter().map(|(_, tokens)| tokens.len()).max().unwrap_or(0);
    let rows = (0..height)
        .map(|index| {
            columns
                .iter()
                .map(|(_, tokens)| tokens.get(index).cloned().unwrap_or_default())
                .collect()
        })
        .collect();
    Some(Matrix {
        columns: columns.into_iter().map(|(name, _)| name).collect(),
        rows,
    })
}

pub fn write_matrix(path: &Path, matrix: &Matrix) -> Result<()> {
    let mut writer = WriterBuilder::new()
        .terminator(Terminator::Any(b'\n'))
        .from_path(path)
        .map_err(|err| OutputError::csv(path, err))?;
    writer
        .write_record(&matrix.columns)
        .map_err(|err| OutputError::csv(path, err))?;
    for row in &matrix.rows {
        writer
            .write_record(row)
            .map_err(|err| OutputError::csv(path, err))?;
    }
    writer.flush().map_err(|err| OutputError::io(path, err))?;
    info!(
        path = %path.display(),
        rows = matrix.row_count(),
        columns = matrix.column_count(),
        "saved consolidated matrix"
    );
    Ok(())
}
