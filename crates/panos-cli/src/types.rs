use std::path::PathBuf;

use serde::Serialize;

/// How far one log type got.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LogTypeStatus {
    /// Format string and field table both found.
    Complete,
    /// Only one of the two was found.
    Partial,
    /// Page not retrieved, or neither element found.
    Failed,
}

#[derive(Debug, Clone, Serialize)]
pub struct LogTypeOutcome {
    pub log_type: String,
    pub status: LogTypeStatus,
    pub format_found: bool,
    /// Field table rows, when a table was found.
    pub table_rows: Option<usize>,
    /// Transformed token count, when the format string was transformed.
    pub tokens: Option<usize>,
    pub fields_path: Option<PathBuf>,
    pub format_path: Option<PathBuf>,
    pub errors: Vec<String>,
}

impl LogTypeOutcome {
    pub fn new(log_type: &str) -> Self {
        Self {
            log_type: log_type.to_string(),
            status: LogTypeStatus::Failed,
            format_found: false,
            table_rows: None,
            tokens: None,
            fields_path: None,
            format_path: None,
            errors: Vec::new(),
        }
    }

    pub fn is_complete(&self) -> bool {
        self.status == LogTypeStatus::Complete
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct VersionOutcome {
    pub version: String,
    pub output_dir: PathBuf,
    pub log_types: Vec<LogTypeOutcome>,
    pub matrix: Option<PathBuf>,
    pub errors: Vec<String>,
}

impl VersionOutcome {
    pub fn count(&self, status: LogTypeStatus) -> usize {
        self.log_types
            .iter()
            .filter(|outcome| outcome.status == status)
            .count()
    }

    pub fn successful(&self) -> usize {
        self.count(LogTypeStatus::Complete)
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct RunOutcome {
    pub versions: Vec<VersionOutcome>,
    /// Versions left alone because their artifacts were already complete.
    pub skipped: Vec<String>,
}

impl RunOutcome {
    pub fn total_successful(&self) -> usize {
        self.versions.iter().map(VersionOutcome::successful).sum()
    }
}

/// A version the run would scrape, as listed by a dry run.
#[derive(Debug, Clone, Serialize)]
pub struct PlannedVersion {
    pub version: String,
    pub output_dir: PathBuf,
    pub log_types: Vec<PlannedLogType>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PlannedLogType {
    pub name: String,
    pub url: String,
}
