//! Scrape pipeline with explicit stages.
//!
//! Per log type:
//! 1. **Fetch**: retrieve and parse the documentation page
//! 2. **Extract**: format string and field table
//! 3. **Correct**: table-level corrections
//! 4. **Transform**: name map, format tokens, per-log corrections
//! 5. **Persist**: field table and format artifacts
//!
//! Per version, every log type runs before the consolidated matrix is built.

use std::path::{Path, PathBuf};
use std::thread;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use panos_config::ScraperConfig;
use panos_ingest::{DocNode, PageSource, extract_field_table, extract_format_string};
use panos_map::{build_name_map, transform_format_string};
use panos_model::{CorrectionRules, FieldTable, LogTypeConfig, VersionConfig};
use panos_output::{
    VersionLayout, build_matrix, write_field_table, write_format_artifact, write_matrix,
};
use panos_transform::{apply_field_table_corrections, apply_per_log_corrections};
use tracing::{error, info, info_span, warn};

use crate::types::{
    LogTypeOutcome, LogTypeStatus, PlannedLogType, PlannedVersion, RunOutcome, VersionOutcome,
};

/// Versions chosen for a run.
#[derive(Debug)]
pub struct VersionSelection<'a> {
    pub versions: Vec<&'a VersionConfig>,
    pub skipped: Vec<String>,
}

/// Pick the versions to scrape.
///
/// Explicitly requested versions are taken as given, in request order, and
/// an unknown name is an error. Otherwise every configured version is taken
/// unless its directory is already complete and `force` is off.
pub fn select_versions<'a>(
    config: &'a ScraperConfig,
    requested: &[String],
    force: bool,
) -> Result<VersionSelection<'a>> {
    if !requested.is_empty() {
        let mut versions = Vec::with_capacity(requested.len());
        for name in requested {
            let Some(version) = config.version(name) else {
                bail!("version '{name}' is not configured");
            };
            versions.push(version);
        }
        info!(count = versions.len(), "using explicitly requested versions");
        return Ok(VersionSelection {
            versions,
            skipped: Vec::new(),
        });
    }

    if force {
        info!("force rescrape enabled, scraping all versions");
        return Ok(VersionSelection {
            versions: config.versions.iter().collect(),
            skipped: Vec::new(),
        });
    }

    let output_dir = &config.settings.output_dir;
    let (skipped, versions): (Vec<&VersionConfig>, Vec<&VersionConfig>) =
        config.versions.iter().partition(|version| {
            VersionLayout::new(output_dir, &version.name).is_complete(version.log_types.len())
        });
    info!(
        existing = skipped.len(),
        to_scrape = versions.len(),
        "filtered already scraped versions"
    );
    Ok(VersionSelection {
        versions,
        skipped: skipped
            .into_iter()
            .map(|version| version.name.clone())
            .collect(),
    })
}

/// What a dry run reports for the selected versions.
pub fn plan_versions(versions: &[&VersionConfig], output_dir: &Path) -> Vec<PlannedVersion> {
    versions
        .iter()
        .map(|version| PlannedVersion {
            version: version.name.clone(),
            output_dir: VersionLayout::new(output_dir, &version.name)
                .dir()
                .to_path_buf(),
            log_types: version
                .log_types
                .iter()
                .map(|log_type| PlannedLogType {
                    name: log_type.name.clone(),
                    url: log_type.url.clone(),
                })
                .collect(),
        })
        .collect()
}

/// Scrape every selected version in order, pausing `inter_version_delay`
/// after each one.
pub fn scrape_versions(
    source: &dyn PageSource,
    versions: &[&VersionConfig],
    output_dir: &Path,
    rules: &CorrectionRules,
    inter_version_delay: Duration,
) -> RunOutcome {
    info!(count = versions.len(), "starting scrape");
    let mut outcome = RunOutcome::default();
    for version in versions {
        let version_outcome = scrape_version(source, version, output_dir, rules);
        info!(
            version = %version.name,
            successful = version_outcome.successful(),
            "completed version"
        );
        outcome.versions.push(version_outcome);
        if !inter_version_delay.is_zero() {
            thread::sleep(inter_version_delay);
        }
    }
    info!(
        total_successful = outcome.total_successful(),
        "scraping completed"
    );
    outcome
}

/// Scrape all log types of one version, then rebuild its matrix.
pub fn scrape_version(
    source: &dyn PageSource,
    version: &VersionConfig,
    output_dir: &Path,
    rules: &CorrectionRules,
) -> VersionOutcome {
    let span = info_span!("version", version = %version.name);
    let _guard = span.enter();
    let layout = VersionLayout::new(output_dir, &version.name);
    let mut outcome = VersionOutcome {
        version: version.name.clone(),
        output_dir: layout.dir().to_path_buf(),
        log_types: Vec::new(),
        matrix: None,
        errors: Vec::new(),
    };

    if let Err(err) = layout.create() {
        error!(error = %err, "cannot create version directory");
        outcome.errors.push(err.to_string());
        return outcome;
    }

    for log_type in &version.log_types {
        outcome
            .log_types
            .push(scrape_log_type(source, log_type, &layout, rules));
    }

    match rebuild_matrix(&layout, version) {
        Ok(matrix) => outcome.matrix = matrix,
        Err(err) => {
            error!(error = %err, "matrix not written");
            outcome.errors.push(format!("{err:#}"));
        }
    }
    outcome
}

/// Scrape one log type and persist whatever was found.
pub fn scrape_log_type(
    source: &dyn PageSource,
    log_type: &LogTypeConfig,
    layout: &VersionLayout,
    rules: &CorrectionRules,
) -> LogTypeOutcome {
    let span = info_span!("log_type", log_type = %log_type.name);
    let _guard = span.enter();
    info!(url = %log_type.url, "processing log type");
    let mut outcome = LogTypeOutcome::new(&log_type.name);

    let Some(root) = source.fetch(&log_type.url) else {
        error!(url = %log_type.url, "failed to fetch page");
        outcome.errors.push(format!("failed to fetch {}", log_type.url));
        return outcome;
    };

    let format_string = extract_format_string(&root.text());
    let field_table =
        extract_field_table(&root).map(|table| apply_field_table_corrections(table, rules));
    outcome.format_found = format_string.is_some();
    outcome.table_rows = field_table.as_ref().map(FieldTable::len);

    if let Some(table) = &field_table {
        let path = layout.fields_path(&log_type.name);
        match write_field_table(&path, table) {
            Ok(()) => outcome.fields_path = Some(path),
            Err(err) => {
                error!(error = %err, "error saving field table");
                outcome.errors.push(err.to_string());
            }
        }
    }

    if let Some(format_string) = &format_string {
        let tokens = field_table
            .as_ref()
            .map(|table| transform_tokens(format_string, table, &log_type.name, rules));
        outcome.tokens = tokens.as_ref().map(Vec::len);
        let path = layout.format_path(&log_type.name);
        match write_format_artifact(&path, format_string, tokens.as_deref()) {
            Ok(()) => outcome.format_path = Some(path),
            Err(err) => {
                error!(error = %err, "error saving format");
                outcome.errors.push(err.to_string());
            }
        }
    }

    outcome.status = match (format_string.is_some(), field_table.is_some()) {
        (true, true) => LogTypeStatus::Complete,
        (false, true) => {
            warn!("field table saved but no format string found");
            LogTypeStatus::Partial
        }
        (true, false) => {
            warn!("format string saved without field table (no transformation)");
            LogTypeStatus::Partial
        }
        (false, false) => LogTypeStatus::Failed,
    };
    outcome
}

/// Format string to corrected variable-name tokens for one log type.
pub fn transform_tokens(
    format_string: &str,
    table: &FieldTable,
    log_type: &str,
    rules: &CorrectionRules,
) -> Vec<String> {
    let name_map = build_name_map(table, rules);
    let tokens = transform_format_string(format_string, &name_map, rules);
    apply_per_log_corrections(tokens, log_type, rules)
}

/// Rebuild `panos_syslog_fields.csv` from the version's format artifacts.
///
/// `Ok(None)` when no log type has a transformed line.
pub fn rebuild_matrix(layout: &VersionLayout, version: &VersionConfig) -> Result<Option<PathBuf>> {
    let names: Vec<&str> = version.log_type_names().collect();
    let Some(matrix) = build_matrix(layout, &names) else {
        return Ok(None);
    };
    let path = layout.matrix_path();
    write_matrix(&path, &matrix)
        .with_context(|| format!("write matrix for version {}", version.name))?;
    Ok(Some(path))
}

/// Write the run outcome as pretty JSON.
pub fn write_run_report(path: &Path, outcome: &RunOutcome) -> Result<()> {
    let json = serde_json::to_string_pretty(outcome).context("serialize run report")?;
    std::fs::write(path, json).with_context(|| format!("write {}", path.display()))?;
    info!(path = %path.display(), "wrote run report");
    Ok(())
}
