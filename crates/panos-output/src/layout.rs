//! Version directory layout.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::error::{OutputError, Result};

pub const MATRIX_FILE_NAME: &str = "panos_syslog_fields.csv";

/// Artifact paths for one documentation version under the output root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionLayout {
    version: String,
    dir: PathBuf,
}

impl VersionLayout {
    pub fn new(output_dir: &Path, version: &str) -> Self {
        Self {
            version: version.to_string(),
            dir: output_dir.join(version),
        }
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn fields_path(&self, log_type: &str) -> PathBuf {
        self.dir.join(format!("{log_type}_fields.csv"))
    }

    pub fn format_path(&self, log_type: &str) -> PathBuf {
        self.dir.join(format!("{log_type}_format.csv"))
    }

    pub fn matrix_path(&self) -> PathBuf {
        self.dir.join(MATRIX_FILE_NAME)
    }

    pub fn create(&self) -> Result<()> {
        fs::create_dir_all(&self.dir).map_err(|err| OutputError::io(&self.dir, err))
    }

    /// Number of `.csv` files in the version directory; 0 when it is absent.
    pub fn csv_file_count(&self) -> usize {
        let Ok(entries) = fs::read_dir(&self.dir) else {
            return 0;
        };
        entries
            .filter_map(std::result::Result::ok)
            .filter(|entry| entry.path().extension().is_some_and(|ext| ext == "csv"))
            .count()
    }

    /// A version counts as scraped once its directory holds at least one CSV
    /// file per configured log type.
    pub fn is_complete(&self, log_type_count: usize) -> bool {
        if !self.dir.is_dir() {
            return false;
        }
        let found = self.csv_file_count();
        if found >= log_type_count {
            info!(version = %self.version, csv_files = found, "version already complete");
            return true;
        }
        if found > 0 {
            warn!(
                version = %self.version,
                csv_files = found,
                expected = log_type_count,
                "version appears incomplete, will re-scrape"
            );
        }
        false
    }
}
