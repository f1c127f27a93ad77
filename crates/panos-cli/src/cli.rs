//! CLI argument definitions for the PAN-OS syslog field scraper.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use panos_config::{DEFAULT_CONFIG_FILE, DEFAULT_EXCEPTIONS_FILE};

#[derive(Parser)]
#[command(
    name = "panos-scrape",
    version,
    about = "Scrape PAN-OS syslog field documentation into CSV artifacts",
    long_about = "Fetch the PAN-OS syslog field reference for each configured version,\n\
                  extract every log type's format string and field table, map long field\n\
                  names to variable names, and write per-log-type and consolidated CSVs."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Scrape the configured versions and write all artifacts.
    Run(RunArgs),

    /// Rebuild one version's consolidated matrix from existing artifacts.
    Matrix(MatrixArgs),

    /// List configured versions and whether their artifacts are complete.
    Versions(ConfigArgs),
}

#[derive(Args)]
pub struct ConfigArgs {
    /// Scraper configuration (settings and version registry).
    #[arg(long = "config", value_name = "PATH", default_value = DEFAULT_CONFIG_FILE)]
    pub config: PathBuf,
}

#[derive(Args)]
pub struct RunArgs {
    #[command(flatten)]
    pub config: ConfigArgs,

    /// Correction rules (name overrides, token corrections, per-log edits).
    #[arg(long = "exceptions", value_name = "PATH", default_value = DEFAULT_EXCEPTIONS_FILE)]
    pub exceptions: PathBuf,

    /// Root directory for version directories (overrides settings.output_dir).
    #[arg(long = "output-dir", value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Re-scrape versions whose artifacts are already complete.
    #[arg(long = "force")]
    pub force: bool,

    /// List what would be scraped without fetching anything.
    #[arg(long = "dry-run")]
    pub dry_run: bool,

    /// Seconds to pause after each successful fetch.
    #[arg(long = "base-delay", value_name = "SECONDS")]
    pub base_delay: Option<f64>,

    /// Seconds to pause between versions.
    #[arg(long = "inter-version-delay", value_name = "SECONDS")]
    pub inter_version_delay: Option<f64>,

    /// Fetch attempts per page.
    #[arg(long = "max-retries", value_name = "N")]
    pub max_retries: Option<u32>,

    /// Drop a leading FUTURE_USE token before per-log corrections.
    #[arg(long = "strip-leading-future-use")]
    pub strip_leading_future_use: bool,

    /// Only scrape this version (repeatable); completeness is not checked.
    #[arg(long = "version", value_name = "NAME")]
    pub versions: Vec<String>,

    /// Write a JSON run report.
    #[arg(long = "report-json", value_name = "PATH")]
    pub report_json: Option<PathBuf>,
}

#[derive(Args)]
pub struct MatrixArgs {
    /// Version name as configured (e.g. 11.1+).
    #[arg(value_name = "VERSION")]
    pub version: String,

    #[command(flatten)]
    pub config: ConfigArgs,

    /// Root directory for version directories (overrides settings.output_dir).
    #[arg(long = "output-dir", value_name = "DIR")]
    pub output_dir: Option<PathBuf>,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
