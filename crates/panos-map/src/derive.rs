//! Variable-name derivation from `Field Name` cells.
//!
//! The documentation writes fields as `Long Name (short_name)`. The short name
//! is the first word inside the parentheses, so phrasing such as
//! `(src or source)` resolves to the first alternative. A parenthesis without
//! whitespace before it (`Name(tight)`) is treated as malformed.

use std::sync::LazyLock;

use regex::Regex;

static VARIABLE_NAME_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^.+?\s+\(([^)]+)\)").expect("Invalid variable name regex"));

static LONG_NAME_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(.+?)\s+\(").expect("Invalid long name regex"));

/// Short identifier for a `Field Name` cell, or `""` when none is documented.
pub fn derive_variable_name(field_name: &str) -> String {
    VARIABLE_NAME_PATTERN
        .captures(field_name)
        .and_then(|captures| captures.get(1))
        .and_then(|inner| inner.as_str().split_whitespace().next())
        .map(|word| word.trim().to_string())
        .unwrap_or_default()
}

/// Text before the first whitespace-preceded `(`, trimmed.
///
/// Returns `None` when the field name has no such parenthetical.
pub fn parenthetical_long_name(field_name: &str) -> Option<String> {
    LONG_NAME_PATTERN
        .captures(field_name)
        .and_then(|captures| captures.get(1))
        .map(|long| long.as_str().trim().to_string())
}

/// Long name of a field: the parenthetical prefix, or the whole trimmed name.
pub fn long_name(field_name: &str) -> String {
    parenthetical_long_name(field_name).unwrap_or_else(|| field_name.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn long_name_falls_back_to_whole_name() {
        assert_eq!(long_name("Serial Number"), "Serial Number");
        assert_eq!(long_name("  Serial Number  "), "Serial Number");
        assert_eq!(long_name("Serial Number (serial)"), "Serial Number");
    }

    #[test]
    fn parenthetical_long_name_requires_space() {
        assert_eq!(parenthetical_long_name("Server Name Indication(sni)"), None);
        assert_eq!(
            parenthetical_long_name("Receive Time (receive_time or cef-formatted-receive_time)"),
            Some("Receive Time".to_string())
        );
    }

    #[test]
    fn whitespace_only_parenthetical_is_empty() {
        assert_eq!(derive_variable_name("Odd Field (  )"), "");
    }
}
