//! Utility functions for name matching.

/// Collapses every whitespace run to a single space and trims the ends.
///
/// Idempotent: normalizing an already-normalized string returns it unchanged.
pub fn normalize_whitespace(raw: &str) -> String {
    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}
