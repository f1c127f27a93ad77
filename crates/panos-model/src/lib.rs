//! Shared data model for the PAN-OS syslog field scraper.
//!
//! The types here are produced by extraction, rewritten by the correction
//! layers, and consumed by the artifact writers.

pub mod error;
pub mod rules;
pub mod source;
pub mod table;

pub use error::{ModelError, Result};
pub use rules::{
    CorrectionAction, CorrectionEdit, CorrectionRules, CorrectionTarget, FUTURE_USE,
    PerLogCorrection,
};
pub use source::{LogTypeConfig, VersionConfig};
pub use table::{FIELD_NAME_COLUMN, FieldRow, FieldTable, VARIABLE_NAME_COLUMN};
