//! Table-level corrections.

use panos_map::long_name;
use panos_model::{CorrectionRules, FIELD_NAME_COLUMN, FieldTable, VARIABLE_NAME_COLUMN};
use tracing::{debug, warn};

/// Rewrite the `Variable Name` column using the rule set.
///
/// Derived names go through the token corrections. Rows with no derived
/// name look their long name up in the global overrides and stay empty when
/// there is no override. Tables missing either column are returned as-is.
pub fn apply_field_table_corrections(mut table: FieldTable, rules: &CorrectionRules) -> FieldTable {
    let mut filled = 0usize;
    let corrected: Option<Vec<String>> = match (
        table.column_values(FIELD_NAME_COLUMN),
        table.column_values(VARIABLE_NAME_COLUMN),
    ) {
        (Some(field_names), Some(variable_names)) => Some(
            field_names
                .into_iter()
                .zip(variable_names)
                .map(|(field_name, variable_name)| {
                    if variable_name.is_empty() {
                        let name = rules
                            .name_override(&long_name(field_name))
                            .unwrap_or_default();
                        if !name.is_empty() {
                            filled += 1;
                        }
                        name.to_string()
                    } else {
                        rules.correct_token(variable_name).to_string()
                    }
                })
                .collect(),
        ),
        _ => None,
    };
    let Some(corrected) = corrected else {
        return table;
    };

    if let Err(err) = table.set_column(VARIABLE_NAME_COLUMN, corrected) {
        warn!(error = %err, "could not apply field table corrections");
        return table;
    }
    debug!(
        rows = table.len(),
        filled_from_overrides = filled,
        "applied field table corrections"
    );
    table
}
