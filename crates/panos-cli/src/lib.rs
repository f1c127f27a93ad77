//! CLI library components for the PAN-OS syslog field scraper.

pub mod logging;
pub mod pipeline;
pub mod types;
