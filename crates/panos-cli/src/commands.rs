use std::path::PathBuf;

use anyhow::{Context, Result, anyhow, bail};
use comfy_table::Table;
use panos_config::{ScraperConfig, load_correction_rules, load_scraper_config};
use panos_ingest::{FetchSettings, HttpPageSource};
use panos_output::VersionLayout;
use tracing::{info, info_span};

use panos_cli::pipeline::{
    plan_versions, rebuild_matrix, scrape_versions, select_versions, write_run_report,
};
use panos_cli::types::{PlannedVersion, RunOutcome};

use crate::cli::{ConfigArgs, MatrixArgs, RunArgs};
use crate::summary::{apply_table_style, header_cell};

/// Result of the `run` command.
pub enum RunResult {
    Planned(Vec<PlannedVersion>),
    Scraped(RunOutcome),
}

pub fn run_scrape(args: &RunArgs) -> Result<RunResult> {
    let span = info_span!("run");
    let _guard = span.enter();

    // =========================================================================
    // Stage 0: configuration and correction rules
    // =========================================================================
    let mut config = load_scraper_config(&args.config.config).context("load scraper config")?;
    apply_overrides(&mut config, args)?;
    let settings = &config.settings;
    let rules = load_correction_rules(&args.exceptions)
        .context("load correction rules")?
        .with_strip_leading_future_use(settings.strip_leading_future_use);

    // =========================================================================
    // Stage 1: version selection
    // =========================================================================
    let selection = select_versions(&config, &args.versions, settings.force_rescrape)?;
    if settings.dry_run {
        info!(
            count = selection.versions.len(),
            "dry run, no pages will be fetched"
        );
        return Ok(RunResult::Planned(plan_versions(
            &selection.versions,
            &settings.output_dir,
        )));
    }

    // =========================================================================
    // Stage 2: scrape
    // =========================================================================
    let source = HttpPageSource::new(FetchSettings {
        base_delay: settings.base_delay(),
        max_retries: settings.max_retries,
        ..FetchSettings::default()
    })
    .context("create HTTP client")?;
    let mut outcome = scrape_versions(
        &source,
        &selection.versions,
        &settings.output_dir,
        &rules,
        settings.inter_version_delay(),
    );
    outcome.skipped = selection.skipped;

    if let Some(path) = &args.report_json {
        write_run_report(path, &outcome)?;
    }
    Ok(RunResult::Scraped(outcome))
}

fn apply_overrides(config: &mut ScraperConfig, args: &RunArgs) -> Result<()> {
    let settings = &mut config.settings;
    if let Some(dir) = &args.output_dir {
        settings.output_dir.clone_from(dir);
    }
    if let Some(delay) = args.base_delay {
        settings.base_delay = delay;
    }
    if let Some(delay) = args.inter_version_delay {
        settings.inter_version_delay = delay;
    }
    if let Some(retries) = args.max_retries {
        settings.max_retries = retries;
    }
    settings.force_rescrape |= args.force;
    settings.dry_run |= args.dry_run;
    settings.strip_leading_future_use |= args.strip_leading_future_use;
    settings
        .validate()
        .map_err(|message| anyhow!("invalid command-line override: {message}"))
}

pub fn run_matrix(args: &MatrixArgs) -> Result<Option<PathBuf>> {
    let config = load_scraper_config(&args.config.config).context("load scraper config")?;
    let Some(version) = config.version(&args.version) else {
        bail!("version '{}' is not configured", args.version);
    };
    let output_dir = args
        .output_dir
        .clone()
        .unwrap_or_else(|| config.settings.output_dir.clone());
    let layout = VersionLayout::new(&output_dir, &version.name);
    if !layout.dir().is_dir() {
        bail!("no artifacts for version '{}' at {}", version.name, layout.dir().display());
    }
    rebuild_matrix(&layout, version)
}

pub fn run_versions(args: &ConfigArgs) -> Result<()> {
    let config = load_scraper_config(&args.config).context("load scraper config")?;
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Version"),
        header_cell("Log types"),
        header_cell("CSV files"),
        header_cell("Complete"),
        header_cell("Directory"),
    ]);
    apply_table_style(&mut table);
    for version in &config.versions {
        let layout = VersionLayout::new(&config.settings.output_dir, &version.name);
        let complete = layout.is_complete(version.log_types.len());
        table.add_row(vec![
            version.name.clone(),
            version.log_types.len().to_string(),
            layout.csv_file_count().to_string(),
            if complete { "yes" } else { "no" }.to_string(),
            layout.dir().display().to_string(),
        ]);
    }
    println!("{table}");
    Ok(())
}
