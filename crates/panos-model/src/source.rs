use serde::{Deserialize, Serialize};

/// A documented log type and the page describing it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogTypeConfig {
    /// Identifier used for artifact names and per-log corrections (e.g. `Traffic_Log`).
    pub name: String,
    pub url: String,
}

/// One documentation version and its log types, in processing order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionConfig {
    /// Version label, also used as the output directory name (e.g. `11.1+`).
    pub name: String,
    #[serde(default)]
    pub log_types: Vec<LogTypeConfig>,
}

impl VersionConfig {
    pub fn log_type_names(&self) -> impl Iterator<Item = &str> {
        self.log_types.iter().map(|log_type| log_type.name.as_str())
    }
}
