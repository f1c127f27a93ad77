//! Format string extraction.

use std::sync::LazyLock;

use regex::Regex;
use tracing::{debug, warn};

/// `Format:` label, then everything up to a blank line or the end of text.
static FORMAT_LABEL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)Format\s*:\s*(.+?)(?:\n\s*\n|\z)").expect("Invalid format label regex")
});

/// Extract the comma-separated format declaration from page text.
///
/// Whitespace runs inside the declaration collapse to single spaces. Returns
/// `None` when the page has no `Format:` label.
pub fn extract_format_string(page_text: &str) -> Option<String> {
    let declaration = FORMAT_LABEL
        .captures(page_text)
        .and_then(|captures| captures.get(1))
        .map(|span| {
            span.as_str()
                .split_whitespace()
                .collect::<Vec<_>>()
                .join(" ")
        })
        .filter(|declaration| !declaration.is_empty());
    match &declaration {
        Some(format_string) => {
            let preview: String = format_string.chars().take(100).collect();
            debug!(preview = %preview, "found format string");
        }
        None => warn!("no format string found on page"),
    }
    declaration
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stops_at_blank_line() {
        let text = "Intro\nFormat: FUTURE_USE, Receive Time,\n  Serial Number\n\nField Name Description";
        assert_eq!(
            extract_format_string(text).as_deref(),
            Some("FUTURE_USE, Receive Time, Serial Number")
        );
    }

    #[test]
    fn blank_line_may_hold_spaces() {
        let text = "format :  a, b\n   \nrest";
        assert_eq!(extract_format_string(text).as_deref(), Some("a, b"));
    }

    #[test]
    fn runs_to_end_of_text() {
        assert_eq!(
            extract_format_string("Format: a, b, c").as_deref(),
            Some("a, b, c")
        );
    }

    #[test]
    fn missing_label_is_none() {
        assert_eq!(extract_format_string("Field Name, Description"), None);
    }
}
