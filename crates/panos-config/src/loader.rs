#![deny(unsafe_code)]

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use panos_model::{CorrectionRules, PerLogCorrection};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::{info, warn};

use crate::error::ConfigError;
use crate::settings::ScraperConfig;

pub const DEFAULT_CONFIG_FILE: &str = "scraper.toml";
pub const DEFAULT_EXCEPTIONS_FILE: &str = "exceptions.toml";

/// Load and validate `scraper.toml`.
///
/// A relative `output_dir` is resolved against the file's directory.
pub fn load_scraper_config(path: &Path) -> Result<ScraperConfig, ConfigError> {
    let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::io(path, e))?;
    let mut config = parse_scraper_config(&contents, path)?;
    if config.settings.output_dir.is_relative()
        && let Some(base) = path.parent()
    {
        config.settings.output_dir = base.join(&config.settings.output_dir);
    }
    info!(
        path = %path.display(),
        versions = config.versions.len(),
        "loaded scraper configuration"
    );
    Ok(config)
}

/// Parse and validate scraper configuration text. `origin` is only used in
/// error messages.
pub fn parse_scraper_config(contents: &str, origin: &Path) -> Result<ScraperConfig, ConfigError> {
    let config: ScraperConfig = parse_toml(contents, origin)?;
    validate_scraper_config(&config, origin)?;
    Ok(config)
}

fn validate_scraper_config(config: &ScraperConfig, origin: &Path) -> Result<(), ConfigError> {
    config
        .settings
        .validate()
        .map_err(|message| ConfigError::invalid(origin, message))?;

    if config.versions.is_empty() {
        warn!(path = %origin.display(), "no versions configured");
    }

    let mut version_names: BTreeSet<&str> = BTreeSet::new();
    for version in &config.versions {
        if version.name.trim().is_empty() {
            return Err(ConfigError::invalid(origin, "version with empty name"));
        }
        if !version_names.insert(version.name.as_str()) {
            return Err(ConfigError::invalid(
                origin,
                format!("duplicate version '{}'", version.name),
            ));
        }
        let mut log_type_names: BTreeSet<&str> = BTreeSet::new();
        for log_type in &version.log_types {
            if log_type.name.trim().is_empty() {
                return Err(ConfigError::invalid(
                    origin,
                    format!("log type with empty name in version '{}'", version.name),
                ));
            }
            if !log_type_names.insert(log_type.name.as_str()) {
                return Err(ConfigError::invalid(
                    origin,
                    format!(
                        "duplicate log type '{}' in version '{}'",
                        log_type.name, version.name
                    ),
                ));
            }
            if log_type.url.trim().is_empty() {
                return Err(ConfigError::invalid(
                    origin,
                    format!(
                        "log type '{}' in version '{}' has no url",
                        log_type.name, version.name
                    ),
                ));
            }
        }
    }
    Ok(())
}

/// Load `exceptions.toml`.
pub fn load_correction_rules(path: &Path) -> Result<CorrectionRules, ConfigError> {
    let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::io(path, e))?;
    let rules = parse_correction_rules(&contents, path)?;
    info!(
        path = %path.display(),
        global_name_overrides = rules.global_name_overrides.len(),
        token_corrections = rules.token_corrections.len(),
        per_log_corrections = rules.per_log_entry_count(),
        "loaded correction rules"
    );
    Ok(rules)
}

/// `exceptions.toml` as written, with per-log entries left untyped so one
/// bad entry cannot reject the whole file.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawCorrectionRules {
    global_name_overrides: BTreeMap<String, String>,
    token_corrections: BTreeMap<String, String>,
    per_log_corrections: BTreeMap<String, Vec<toml::Value>>,
}

/// Parse correction rules.
///
/// Per-log entries with wrong value types are dropped here with a warning.
/// Entries missing a target or action key are reported here and skipped
/// again when applied.
pub fn parse_correction_rules(
    contents: &str,
    origin: &Path,
) -> Result<CorrectionRules, ConfigError> {
    let raw: RawCorrectionRules = parse_toml(contents, origin)?;
    let mut per_log_corrections = BTreeMap::new();
    for (log_type, entries) in raw.per_log_corrections {
        let mut corrections = Vec::with_capacity(entries.len());
        for (index, entry) in entries.into_iter().enumerate() {
            let correction: PerLogCorrection = match entry.try_into() {
                Ok(correction) => correction,
                Err(err) => {
                    warn!(
                        path = %origin.display(),
                        log_type = %log_type,
                        correction = index,
                        error = %err,
                        "per-log correction has invalid values, skipping"
                    );
                    continue;
                }
            };
            if let Err(err) = correction.edit() {
                warn!(
                    path = %origin.display(),
                    log_type = %log_type,
                    correction = index,
                    error = %err,
                    "malformed per-log correction"
                );
            }
            corrections.push(correction);
        }
        per_log_corrections.insert(log_type, corrections);
    }
    Ok(CorrectionRules {
        global_name_overrides: raw.global_name_overrides,
        token_corrections: raw.token_corrections,
        per_log_corrections,
        strip_leading_future_use: false,
    })
}

fn parse_toml<T: DeserializeOwned>(contents: &str, origin: &Path) -> Result<T, ConfigError> {
    toml::from_str(contents).map_err(|e| ConfigError::Toml {
        path: origin.to_path_buf(),
        source: e,
    })
}
