//! Long field name to variable name lookup.

use std::collections::BTreeMap;

use panos_model::{CorrectionRules, FIELD_NAME_COLUMN, FieldTable, VARIABLE_NAME_COLUMN};
use tracing::debug;

use crate::derive::parenthetical_long_name;
use crate::utils::normalize_whitespace;

/// Lookup built per log type from its corrected field table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NameMap {
    entries: BTreeMap<String, String>,
}

impl NameMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite an entry.
    pub fn insert(&mut self, long_name: impl Into<String>, variable_name: impl Into<String>) {
        self.entries.insert(long_name.into(), variable_name.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_str()))
    }

    /// Resolve a format token: exact key, then whitespace-normalized, then
    /// lowercase of the normalized form. First hit wins.
    pub fn lookup(&self, token: &str) -> Option<&str> {
        if let Some(value) = self.get(token) {
            return Some(value);
        }
        let normalized = normalize_whitespace(token);
        self.get(&normalized)
            .or_else(|| self.get(&normalized.to_lowercase()))
    }
}

impl<K, V> FromIterator<(K, V)> for NameMap
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (key, value) in iter {
            map.insert(key, value);
        }
        map
    }
}

/// Build the name map for one log type.
///
/// Every row with a non-empty `Variable Name` and a `Long Name (...)` field
/// registers its long name, the whitespace-normalized form when it differs,
/// and the lowercase normalized form. Global name overrides are merged last
/// and replace any derived entry with the same key.
pub fn build_name_map(table: &FieldTable, rules: &CorrectionRules) -> NameMap {
    let mut map = NameMap::new();
    if let (Some(field_names), Some(variable_names)) = (
        table.column_values(FIELD_NAME_COLUMN),
        table.column_values(VARIABLE_NAME_COLUMN),
    ) {
        for (field_name, variable_name) in field_names.into_iter().zip(variable_names) {
            if variable_name.is_empty() {
                continue;
            }
            let Some(long_name) = parenthetical_long_name(field_name) else {
                continue;
            };
            let normalized = normalize_whitespace(&long_name);
            if normalized != long_name {
                map.insert(normalized.clone(), variable_name);
            }
            map.insert(normalized.to_lowercase(), variable_name);
            map.insert(long_name, variable_name);
        }
    }
    let derived = map.len();
    for (long_name, variable_name) in &rules.global_name_overrides {
        map.insert(long_name.clone(), variable_name.clone());
    }
    debug!(
        derived_entries = derived,
        total_entries = map.len(),
        "built name map"
    );
    map
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_order_is_exact_normalized_lowercase() {
        let map: NameMap = [
            ("Source  Address", "exact"),
            ("Source Address", "normalized"),
            ("source address", "lower"),
        ]
        .into_iter()
        .collect();
        assert_eq!(map.lookup("Source  Address"), Some("exact"));
        assert_eq!(map.lookup("Source \t Address"), Some("normalized"));
        assert_eq!(map.lookup("SOURCE ADDRESS"), Some("lower"));
        assert_eq!(map.lookup("Destination Address"), None);
    }
}
