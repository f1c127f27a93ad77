//! Format string to variable-name token conversion.

use std::sync::LazyLock;

use panos_model::CorrectionRules;
use regex::Regex;

use crate::name_map::NameMap;

/// Device group hierarchy levels use a fixed vendor numbering scheme, so they
/// are mapped directly instead of through the field table.
static DEVICE_GROUP_LEVEL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^Device Group Hierarchy Level (\d+)")
        .expect("Invalid device group hierarchy regex")
});

/// `dg_hier_level_N` for a `Device Group Hierarchy Level N` token.
pub fn device_group_level_token(token: &str) -> Option<String> {
    DEVICE_GROUP_LEVEL
        .captures(token)
        .and_then(|captures| captures.get(1))
        .map(|level| format!("dg_hier_level_{}", level.as_str()))
}

/// Rewrite a comma-separated format string into variable-name tokens.
///
/// One token per field, in the original order. Tokens with no name-map entry
/// are kept verbatim (e.g. `FUTURE_USE`). Every resulting token is passed
/// through the token corrections.
pub fn transform_format_string(
    format_string: &str,
    name_map: &NameMap,
    rules: &CorrectionRules,
) -> Vec<String> {
    format_string
        .split(',')
        .map(str::trim)
        .map(|item| {
            let mapped = device_group_level_token(item)
                .or_else(|| name_map.lookup(item).map(str::to_string))
                .unwrap_or_else(|| item.to_string());
            rules.correct_token(&mapped).to_string()
        })
        .collect()
}
