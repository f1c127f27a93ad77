#![deny(unsafe_code)]

use std::path::PathBuf;
use std::time::Duration;

use panos_model::VersionConfig;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScraperConfig {
    #[serde(default)]
    pub settings: Settings,
    #[serde(default)]
    pub versions: Vec<VersionConfig>,
}

impl ScraperConfig {
    pub fn version(&self, name: &str) -> Option<&VersionConfig> {
        self.versions.iter().find(|version| version.name == name)
    }
}

/// Run settings; every key is optional in the file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Seconds to pause after each successful fetch; also the retry backoff unit.
    pub base_delay: f64,
    /// Seconds to pause after each processed version.
    pub inter_version_delay: f64,
    /// Fetch attempts per page.
    pub max_retries: u32,
    /// Root directory for per-version artifact directories.
    pub output_dir: PathBuf,
    pub force_rescrape: bool,
    pub dry_run: bool,
    pub strip_leading_future_use: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            base_delay: 1.0,
            inter_version_delay: 2.0,
            max_retries: 3,
            output_dir: PathBuf::from("."),
            force_rescrape: false,
            dry_run: false,
            strip_leading_future_use: false,
        }
    }
}

impl Settings {
    pub fn base_delay(&self) -> Duration {
        seconds(self.base_delay)
    }

    pub fn inter_version_delay(&self) -> Duration {
        seconds(self.inter_version_delay)
    }

    /// Check value ranges; the message names the offending key.
    pub fn validate(&self) -> Result<(), String> {
        for (key, value) in [
            ("base_delay", self.base_delay),
            ("inter_version_delay", self.inter_version_delay),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(format!("settings.{key} must be a non-negative number, got {value}"));
            }
        }
        if self.max_retries == 0 {
            return Err("settings.max_retries must be at least 1".to_string());
        }
        Ok(())
    }
}

fn seconds(value: f64) -> Duration {
    Duration::try_from_secs_f64(value).unwrap_or(Duration::ZERO)
}
