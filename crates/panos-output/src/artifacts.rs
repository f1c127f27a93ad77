//! Per-log-type CSV artifacts.

use std::fs;
use std::path::Path;

use csv::{QuoteStyle, ReaderBuilder, Terminator, WriterBuilder};
use panos_model::FieldTable;
use tracing::info;

use crate::error::{OutputError, Result};

/// Write the field table with its header row.
pub fn write_field_table(path: &Path, table: &FieldTable) -> Result<()> {
    let mut writer = WriterBuilder::new()
        .terminator(Terminator::Any(b'\n'))
        .from_path(path)
        .map_err(|err| OutputError::csv(path, err))?;
    writer
        .write_record(&table.columns)
        .map_err(|err| OutputError::csv(path, err))?;
    for row in &table.rows {
        writer
            .write_record(&row.cells)
            .map_err(|err| OutputError::csv(path, err))?;
    }
    writer.flush().map_err(|err| OutputError::io(path, err))?;
    info!(path = %path.display(), rows = table.len(), "saved field table");
    Ok(())
}

/// Tokens as one always-quoted CSV record, without line terminator.
pub fn render_token_line(tokens: &[String]) -> Result<String> {
    let mut writer = WriterBuilder::new()
        .quote_style(QuoteStyle::Always)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(Vec::new());
    let target = Path::new("<token line>");
    writer
        .write_record(tokens)
        .map_err(|err| OutputError::csv(target, err))?;
    let bytes = writer
        .into_inner()
        .map_err(|err| OutputError::io(target, std::io::Error::other(err.to_string())))?;
    let line = String::from_utf8_lossy(&bytes);
    Ok(line.trim_end_matches('\n').to_string())
}

/// Write the format artifact.
///
/// Line 1 is the format string as extracted. Line 2 holds the transformed
/// tokens and is omitted when there are none (no field table was found).
pub fn write_format_artifact(
    path: &Path,
    format_string: &str,
    tokens: Option<&[String]>,
) -> Result<()> {
    let mut contents = format!("{format_string}\n");
    let transformed = match tokens {
        Some(tokens) if !tokens.is_empty() => {
            contents.push_str(&render_token_line(tokens)?);
            contents.push('\n');
            true
        }
        _ => false,
    };
    fs::write(path, contents).map_err(|err| OutputError::io(path, err))?;
    if transformed {
        info!(path = %path.display(), "saved format");
    } else {
        info!(path = %path.display(), "saved format (no transformation, field table missing)");
    }
    Ok(())
}

/// Parse line 2 of a format artifact.
///
/// `Ok(None)` when the file has no non-blank second line.
pub fn read_transformed_tokens(path: &Path) -> Result<Option<Vec<String>>> {
    let contents = fs::read_to_string(path).map_err(|err| OutputError::io(path, err))?;
    let Some(line) = contents.lines().nth(1).map(str::trim) else {
        return Ok(None);
    };
    if line.is_empty() {
        return Ok(None);
    }
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(line.as_bytes());
    match reader.records().next() {
        Some(record) => {
            let record = record.map_err(|err| OutputError::csv(path, err))?;
            Ok(Some(record.iter().map(str::to_string).collect()))
        }
        None => Ok(None),
    }
}
