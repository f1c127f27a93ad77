//! TOML configuration for the scraper.
//!
//! `scraper.toml` holds run settings and the version registry;
//! `exceptions.toml` holds the correction rule set.

#![deny(unsafe_code)]

pub mod error;
pub mod loader;
pub mod settings;

pub use error::ConfigError;
pub use loader::{
    DEFAULT_CONFIG_FILE, DEFAULT_EXCEPTIONS_FILE, load_correction_rules, load_scraper_config,
    parse_correction_rules, parse_scraper_config,
};
pub use settings::{ScraperConfig, Settings};
